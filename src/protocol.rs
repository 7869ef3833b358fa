//! Serial Command Protocol
//!
//! One opcode per line, sent as an ASCII base-2 literal terminated by CRLF
//! (`01000001\r\n` selects EMS chain 2). Replies are human-readable
//! CRLF-terminated lines.

pub mod decoder;
pub mod opcode;

pub use decoder::{decode, parse_binary_literal, DecodeError, FramingFault};
pub use opcode::{Command, ConfigCommand, Opcode, Selection};
