//! Controller State
//!
//! The status register and the echo flag. Both live for the lifetime of
//! the controller and are only mutated by the dispatcher.

use crate::protocol::Opcode;
use crate::types::Status;

/// Mutable controller state threaded through dispatch
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerState {
    status: Status,
    echo: bool,
}

impl ControllerState {
    /// Create a fresh state (status zero, echo off)
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: Status::from_bits(0),
            echo: false,
        }
    }

    /// Current status register
    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Check if decoded opcodes are echoed
    #[must_use]
    pub const fn echo(&self) -> bool {
        self.echo
    }

    /// Record a command in the status register, keeping the warning light
    pub fn record(&mut self, opcode: Opcode) {
        self.status = self.status.with_command(opcode.masked());
    }

    /// Set or clear the warning light bit
    pub fn set_warning_light(&mut self, on: bool) {
        self.status = self.status.with_warning_light(on);
    }

    /// Invert the echo flag, returns the new value
    pub fn toggle_echo(&mut self) -> bool {
        self.echo = !self.echo;
        self.echo
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ControllerState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "State({}, echo={})", self.status, self.echo);
    }
}
