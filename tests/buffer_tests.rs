//! Serial Buffer Tests
//!
//! Tests for the USB receive line buffer and the reply buffer.
//! Run with: cargo test --test buffer_tests

use core::fmt::Write;

use rf_selector::config::{LINE_LENGTH, RX_BUFFER_SIZE, TX_BUFFER_SIZE};
use rf_selector::serial::{LineBuffer, ResponseBuffer, SerialLink};

// =============================================================================
// Line Buffer Tests
// =============================================================================

#[test]
fn line_buffer_starts_empty() {
    let rx = LineBuffer::new();
    assert_eq!(rx.available(), 0);
    assert_eq!(rx.free(), RX_BUFFER_SIZE);
    assert!(!rx.line_ready());
}

#[test]
fn line_buffer_reads_in_order() {
    let mut rx = LineBuffer::new();
    assert_eq!(rx.push(b"01"), 2);
    assert_eq!(rx.read_byte(), Some(b'0'));
    assert_eq!(rx.read_byte(), Some(b'1'));
    assert_eq!(rx.read_byte(), None);
}

#[test]
fn line_ready_on_line_feed() {
    let mut rx = LineBuffer::new();
    rx.push(b"0100");
    assert!(!rx.line_ready());
    rx.push(b"\r\n");
    assert!(rx.line_ready());
}

#[test]
fn line_ready_on_full_width_without_terminator() {
    let mut rx = LineBuffer::new();
    rx.push(&[b'1'; LINE_LENGTH - 1]);
    assert!(!rx.line_ready());
    rx.push(b"1");
    assert!(rx.line_ready());
}

#[test]
fn line_buffer_packet_split_line() {
    // USB packets need not align with lines
    let mut rx = LineBuffer::new();
    rx.push(b"0101");
    rx.push(b"0000\r");
    assert!(!rx.line_ready());
    rx.push(b"\n");
    assert!(rx.line_ready());
    assert_eq!(rx.available(), 10);
}

#[test]
fn line_buffer_clear_discards_pending() {
    let mut rx = LineBuffer::new();
    rx.push(b"01000001\r\n");
    rx.clear();
    assert_eq!(rx.available(), 0);
    assert_eq!(rx.free(), RX_BUFFER_SIZE);
}

#[test]
fn line_buffer_overflow_protection() {
    let mut rx = LineBuffer::new();
    let data = [b'1'; RX_BUFFER_SIZE + 8];
    assert_eq!(rx.push(&data), RX_BUFFER_SIZE);
    assert_eq!(rx.push(b"0"), 0);
    assert_eq!(rx.available(), RX_BUFFER_SIZE);
}

// =============================================================================
// Response Buffer Tests
// =============================================================================

#[test]
fn response_buffer_starts_empty() {
    let tx = ResponseBuffer::new();
    assert!(tx.is_empty());
    assert_eq!(tx.len(), 0);
    assert_eq!(tx.as_str(), "");
}

#[test]
fn response_buffer_formats_lines() {
    let mut tx = ResponseBuffer::new();
    write!(tx, "OpCode: 0x{:02X} ({})\r\n", 0x41, 0x41).unwrap();
    assert_eq!(tx.as_bytes(), b"OpCode: 0x41 (65)\r\n");
}

#[test]
fn response_buffer_accumulates_writes() {
    let mut tx = ResponseBuffer::new();
    tx.write(b"Initializing...");
    tx.write(b"\r\n");
    assert_eq!(tx.as_str(), "Initializing...\r\n");
    tx.clear();
    assert!(tx.is_empty());
}

#[test]
fn response_buffer_truncates_at_capacity() {
    let mut tx = ResponseBuffer::new();
    let data = [b'a'; TX_BUFFER_SIZE + 10];
    assert_eq!(tx.write(&data), TX_BUFFER_SIZE);
    assert_eq!(tx.write(b"b"), 0);
    assert_eq!(tx.len(), TX_BUFFER_SIZE);
}

#[test]
fn line_buffer_reports_partial_accept() {
    let mut rx = LineBuffer::new();
    rx.push(&[b'0'; RX_BUFFER_SIZE - 4]);

    let packet = [b'1'; 10];
    let accepted = rx.push(&packet);

    assert_eq!(accepted, 4);
    assert_eq!(packet.len() - accepted, 6);
}
