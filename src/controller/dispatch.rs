//! Opcode Dispatcher
//!
//! Maps a decoded opcode onto discrete output writes and status updates.
//! Decision order, first match wins:
//!
//! 1. echo the raw opcode (unless it is a status query)
//! 2. warning light on / off exclusive opcodes
//! 3. config and sleep commands
//! 4. antenna bus and RF chain selections
//! 5. anything else is unrecognized

use core::fmt::{self, Write};

use crate::config::{channels, SLOT_DISCRETE_OUT, SLOT_WARNING_LIGHT};
use crate::hal::BaseController;
use crate::protocol::{Command, ConfigCommand, Opcode, Selection};
use crate::types::Level;

use super::state::ControllerState;

/// Opcode that decoded but could not be carried out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// Valid selection pattern with no physical output
    UnwiredChannel(Selection),
    /// Matches neither opcode layout
    Unrecognized(Opcode),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnwiredChannel(selection) => write!(f, "No output wired for {selection}."),
            Self::Unrecognized(_) => f.write_str("Unrecognized OpCode."),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for CommandError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UnwiredChannel(selection) => defmt::write!(f, "UnwiredChannel({})", selection),
            Self::Unrecognized(opcode) => defmt::write!(f, "Unrecognized({})", opcode),
        }
    }
}

/// Write one CRLF-terminated reply line
///
/// Replies are best-effort: a full response buffer truncates the line.
pub(crate) fn reply<W: Write>(out: &mut W, args: fmt::Arguments<'_>) {
    let _ = out.write_fmt(args);
    let _ = out.write_str("\r\n");
}

/// Carry out one opcode
///
/// # Errors
///
/// [`CommandError::UnwiredChannel`] for a selection without a physical
/// output and [`CommandError::Unrecognized`] for an unknown pattern. Neither
/// touches the outputs or the state.
pub fn dispatch<B, W>(
    opcode: Opcode,
    state: &mut ControllerState,
    base: &mut B,
    out: &mut W,
) -> Result<(), CommandError>
where
    B: BaseController,
    W: Write,
{
    let command = opcode.command();

    if state.echo() && command != Command::Config(ConfigCommand::QueryStatus) {
        reply(out, format_args!("OpCode: {opcode}"));
    }

    match command {
        Command::WarningLight(on) => {
            base.write_discrete(Level::from_bool(on), SLOT_WARNING_LIGHT, channels::WARNING_LIGHT);
            state.set_warning_light(on);
            Ok(())
        }
        Command::Config(config) => {
            run_config(config, opcode, state, base, out);
            Ok(())
        }
        Command::Select(selection) => select_chain(selection, state, base, out),
        Command::Unrecognized => Err(CommandError::Unrecognized(opcode)),
    }
}

fn run_config<B, W>(
    config: ConfigCommand,
    opcode: Opcode,
    state: &mut ControllerState,
    base: &mut B,
    out: &mut W,
) where
    B: BaseController,
    W: Write,
{
    match config {
        ConfigCommand::Sleep => {
            reply(out, format_args!("Sleep issued: all outputs disabled."));
            base.write_discrete(Level::Low, SLOT_DISCRETE_OUT, channels::ALL);
            state.record(opcode);
        }
        ConfigCommand::ToggleEcho => {
            if state.toggle_echo() {
                reply(out, format_args!("Parsed OpCodes will be returned."));
            } else {
                reply(out, format_args!("OpCode returns disabled."));
            }
        }
        ConfigCommand::GetFwVersion => {
            if base.is_base_active() {
                reply(out, format_args!("{}", base.fw_version()));
            }
        }
        ConfigCommand::PrintModules => {
            if base.is_base_active() {
                let _ = base.print_modules(out);
            }
        }
        ConfigCommand::IsBaseActive => {
            reply(out, format_args!("{}", u8::from(base.is_base_active())));
        }
        ConfigCommand::Check24V(slot) => {
            if base.check_24v(slot) {
                reply(out, format_args!("24V present on slot {slot}."));
            } else {
                reply(out, format_args!("24V missing on slot {slot}."));
            }
        }
        ConfigCommand::ReadStatus(slot) => {
            if base.is_base_active() {
                let word = base.read_status(slot);
                reply(out, format_args!("Slot {slot} status: 0x{word:08X}"));
            }
        }
        ConfigCommand::Init => {
            reply(out, format_args!("Initializing..."));
            // No new opcodes are taken until the hardware reports ready
            while !base.init() {
                core::hint::spin_loop();
            }
            info!("Base controller re-initialized");
            state.record(Opcode::SLEEP);
        }
        ConfigCommand::Disable => {
            reply(out, format_args!("Disabling base controller."));
            base.enable_base_controller(false);
            info!("Base controller disabled");
            state.record(opcode);
        }
        ConfigCommand::QueryStatus => {
            reply(out, format_args!("{}", state.status()));
        }
    }
}

fn select_chain<B, W>(
    selection: Selection,
    state: &mut ControllerState,
    base: &mut B,
    out: &mut W,
) -> Result<(), CommandError>
where
    B: BaseController,
    W: Write,
{
    let Some(rf_channel) = selection.rf_channel() else {
        return Err(CommandError::UnwiredChannel(selection));
    };
    let select_channel = selection.bus().select_channel();

    reply(
        out,
        format_args!(
            "{selection} selected: writing to channels {rf_channel} and {select_channel}."
        ),
    );
    base.write_discrete(Level::Low, SLOT_DISCRETE_OUT, channels::ALL);
    base.write_discrete(Level::High, SLOT_DISCRETE_OUT, rf_channel);
    base.write_discrete(Level::High, SLOT_DISCRETE_OUT, select_channel);
    state.record(selection.opcode());

    debug!("Selected {}", selection);
    Ok(())
}
