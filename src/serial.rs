//! Serial Line Buffers
//!
//! The decoder reads through [`SerialLink`]; on the target the USB task
//! fills a [`LineBuffer`] and the controller writes its replies into a
//! [`ResponseBuffer`] that is flushed after every poll.

use core::fmt;

use crate::config::{LINE_LENGTH, RX_BUFFER_SIZE, TX_BUFFER_SIZE};

/// Byte-oriented receive side of the serial transport
pub trait SerialLink {
    /// Bytes ready to be read without waiting
    fn available(&self) -> usize;

    /// Read one byte, or `None` once the transport's read timeout has elapsed
    fn read_byte(&mut self) -> Option<u8>;

    /// Discard everything pending in the receive buffer
    fn clear(&mut self) {
        while self.read_byte().is_some() {}
    }
}

/// Receive buffer
pub struct LineBuffer {
    buffer: [u8; RX_BUFFER_SIZE],
    read_pos: usize,
    write_pos: usize,
}

impl LineBuffer {
    /// Create an empty receive buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; RX_BUFFER_SIZE],
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Push data into buffer, returns bytes accepted
    pub fn push(&mut self, data: &[u8]) -> usize {
        if self.free() < data.len() {
            self.compact();
        }

        let mut written = 0;
        for &byte in data {
            if self.write_pos < RX_BUFFER_SIZE {
                self.buffer[self.write_pos] = byte;
                self.write_pos += 1;
                written += 1;
            }
        }
        written
    }

    /// Check whether a full command line can be decoded
    ///
    /// True once a line feed is buffered or a whole line-width of bytes
    /// has arrived without one.
    #[must_use]
    pub fn line_ready(&self) -> bool {
        let pending = &self.buffer[self.read_pos..self.write_pos];
        pending.len() >= LINE_LENGTH || pending.contains(&b'\n')
    }

    /// Compact the buffer
    fn compact(&mut self) {
        if self.read_pos > 0 {
            let remaining = self.write_pos - self.read_pos;
            self.buffer.copy_within(self.read_pos..self.write_pos, 0);
            self.read_pos = 0;
            self.write_pos = remaining;
        }
    }

    /// Get free space
    #[must_use]
    pub const fn free(&self) -> usize {
        RX_BUFFER_SIZE - self.write_pos
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialLink for LineBuffer {
    fn available(&self) -> usize {
        self.write_pos - self.read_pos
    }

    fn read_byte(&mut self) -> Option<u8> {
        if self.read_pos < self.write_pos {
            let byte = self.buffer[self.read_pos];
            self.read_pos += 1;
            if self.read_pos == self.write_pos {
                self.read_pos = 0;
                self.write_pos = 0;
            }
            Some(byte)
        } else {
            None
        }
    }

    fn clear(&mut self) {
        self.read_pos = 0;
        self.write_pos = 0;
    }
}

/// Transmit buffer for one poll cycle's replies
pub struct ResponseBuffer {
    buffer: [u8; TX_BUFFER_SIZE],
    len: usize,
}

impl ResponseBuffer {
    /// Create an empty response buffer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: [0; TX_BUFFER_SIZE],
            len: 0,
        }
    }

    /// Write data to buffer, returns bytes accepted
    pub fn write(&mut self, data: &[u8]) -> usize {
        let space = TX_BUFFER_SIZE - self.len;
        let to_write = data.len().min(space);
        self.buffer[self.len..self.len + to_write].copy_from_slice(&data[..to_write]);
        self.len += to_write;
        to_write
    }

    /// Get buffer contents
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// Buffer contents as text (lossy on a split UTF-8 sequence)
    #[must_use]
    pub fn as_str(&self) -> &str {
        match core::str::from_utf8(self.as_bytes()) {
            Ok(text) => text,
            Err(err) => {
                // Truncation can only split at the tail
                let valid = &self.buffer[..err.valid_up_to()];
                core::str::from_utf8(valid).unwrap_or_default()
            }
        }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Get used length
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for ResponseBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for ResponseBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.write(s.as_bytes()) == s.len() {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}
