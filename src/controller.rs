//! Opcode Interpreter
//!
//! State machine and dispatch logic that turns decoded opcodes into
//! discrete output writes. Implements the functional core of the firmware.

pub mod dispatch;
pub mod service;
pub mod state;

pub use dispatch::{dispatch, CommandError};
pub use service::{Controller, PollOutcome};
pub use state::ControllerState;
