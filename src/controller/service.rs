//! Controller Service
//!
//! One cooperative polling step: decode a line if input is pending,
//! dispatch it, and report any failure on the serial line. Nothing here is
//! fatal; the caller simply polls again.

use core::fmt::Write;

use crate::hal::BaseController;
use crate::protocol::{decode, DecodeError, Opcode};
use crate::serial::SerialLink;

use super::dispatch::{dispatch, reply, CommandError};
use super::state::ControllerState;
use crate::types::Status;

/// Result of one [`Controller::poll`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// No input was pending
    Idle,
    /// The line could not be decoded
    Rejected(DecodeError),
    /// An opcode was decoded and dispatched
    Dispatched(Opcode, Result<(), CommandError>),
}

/// Opcode interpreter bound to one base controller
pub struct Controller<B> {
    base: B,
    state: ControllerState,
}

impl<B: BaseController> Controller<B> {
    /// Create a controller with fresh state
    #[must_use]
    pub const fn new(base: B) -> Self {
        Self {
            base,
            state: ControllerState::new(),
        }
    }

    /// Power-on barrier: spin until the base controller initializes
    pub fn bring_up(&mut self) {
        while !self.base.init() {
            core::hint::spin_loop();
        }
        info!("Base controller ready");
    }

    /// Process at most one pending line
    ///
    /// Returns [`PollOutcome::Idle`] immediately when the link has nothing
    /// buffered.
    pub fn poll<S: SerialLink, W: Write>(&mut self, link: &mut S, out: &mut W) -> PollOutcome {
        if link.available() == 0 {
            return PollOutcome::Idle;
        }

        let opcode = match decode(link) {
            Ok(opcode) => opcode,
            Err(err) => {
                warn!("Decode failed: {}", err);
                reply(out, format_args!("{err}"));
                return PollOutcome::Rejected(err);
            }
        };

        let result = self.execute(opcode, out);
        PollOutcome::Dispatched(opcode, result)
    }

    /// Dispatch one opcode and report a command error on `out`
    ///
    /// # Errors
    ///
    /// Returns the [`CommandError`] after it has been reported.
    pub fn execute<W: Write>(&mut self, opcode: Opcode, out: &mut W) -> Result<(), CommandError> {
        let result = dispatch(opcode, &mut self.state, &mut self.base, out);
        if let Err(err) = result {
            warn!("Command {} failed: {}", opcode, err);
            reply(out, format_args!("{err}"));
        }
        result
    }

    /// Current controller state
    #[must_use]
    pub const fn state(&self) -> &ControllerState {
        &self.state
    }

    /// Current status register
    #[must_use]
    pub const fn status(&self) -> Status {
        self.state.status()
    }

    /// Check if decoded opcodes are echoed
    #[must_use]
    pub const fn echo(&self) -> bool {
        self.state.echo()
    }

    /// Base controller
    #[must_use]
    pub const fn base(&self) -> &B {
        &self.base
    }

    /// Base controller (mutable)
    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }
}
