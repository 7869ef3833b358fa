//! USB Subsystem
//!
//! CDC ACM virtual serial port carrying the opcode protocol.

pub mod cdc;
