//! Line Decoder
//!
//! Turns one ASCII line such as `01000001\r\n` into an [`Opcode`].
//! A line is bounded to [`LINE_LENGTH`] bytes: eight binary digits and a
//! CRLF terminator.

use core::fmt;

use heapless::Vec;

use super::opcode::Opcode;
use crate::config::LINE_LENGTH;
use crate::serial::SerialLink;

/// Why a line could not be framed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramingFault {
    /// Nothing arrived, or only a terminator
    Empty,
    /// No line feed within the line bound
    Unterminated,
}

/// Decode failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// Malformed or incomplete line; pending input was drained
    Framing(FramingFault),
    /// No binary digits at the start of the line
    NotANumber,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framing(FramingFault::Empty) => {
                f.write_str("Read termination not found or buffer empty.")
            }
            Self::Framing(FramingFault::Unterminated) => {
                f.write_str("Too many characters in buffer or line terminator missing.")
            }
            Self::NotANumber => f.write_str("No binary integer found."),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DecodeError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Framing(FramingFault::Empty) => defmt::write!(f, "Framing(Empty)"),
            Self::Framing(FramingFault::Unterminated) => defmt::write!(f, "Framing(Unterminated)"),
            Self::NotANumber => defmt::write!(f, "NotANumber"),
        }
    }
}

/// Read one line from the link and decode it
///
/// Stops at the first line feed, after [`LINE_LENGTH`] bytes, or when the
/// link runs dry. Bytes after the line feed are left for the next call.
///
/// # Errors
///
/// [`DecodeError::Framing`] if the line is empty or unterminated (the link
/// is drained), [`DecodeError::NotANumber`] if it does not start with a
/// binary digit.
pub fn decode<S: SerialLink>(link: &mut S) -> Result<Opcode, DecodeError> {
    let mut line: Vec<u8, LINE_LENGTH> = Vec::new();
    let mut terminated = false;

    while !line.is_full() {
        let Some(byte) = link.read_byte() else {
            break;
        };
        if byte == b'\n' {
            terminated = true;
            break;
        }
        // Capacity checked by the loop condition
        let _ = line.push(byte);
    }

    if !terminated {
        link.clear();
        let fault = if line.is_empty() {
            FramingFault::Empty
        } else {
            FramingFault::Unterminated
        };
        return Err(DecodeError::Framing(fault));
    }

    let content = line.strip_suffix(b"\r").unwrap_or(line.as_slice());
    if content.is_empty() {
        link.clear();
        return Err(DecodeError::Framing(FramingFault::Empty));
    }

    parse_binary_literal(content)
}

/// Parse the leading base-2 literal of a line
///
/// Leading spaces and tabs are skipped; parsing stops at the first
/// character that is not `0` or `1`. The value is truncated to 8 bits.
///
/// # Errors
///
/// [`DecodeError::NotANumber`] if no digit is consumed.
pub fn parse_binary_literal(text: &[u8]) -> Result<Opcode, DecodeError> {
    let digits = text
        .iter()
        .skip_while(|&&b| b == b' ' || b == b'\t')
        .take_while(|&&b| b == b'0' || b == b'1');

    let mut value: u8 = 0;
    let mut consumed = false;
    for &digit in digits {
        value = (value << 1) | (digit - b'0');
        consumed = true;
    }

    if consumed {
        Ok(Opcode::new(value))
    } else {
        Err(DecodeError::NotANumber)
    }
}
