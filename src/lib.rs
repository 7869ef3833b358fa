//! RF Chain Selector Firmware Library
//!
//! This library provides the opcode interpreter for a controller that
//! selects between RF signal chains by driving discrete outputs. Opcodes
//! arrive over a serial link as ASCII binary literals, one per line.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                        │
//! │  Controller service  │  Dispatcher  │  Status / echo state  │
//! ├─────────────────────────────────────────────────────────────┤
//! │                     PROTOCOL LAYER                          │
//! │  Line decoder  │  Opcode layout  │  Serial line buffers     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / DRIVER LAYER                        │
//! │  BaseController trait  │  GPIO base  │  USB CDC ACM          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    RTOS / SCHEDULER                         │
//! │           embassy-rs (async/await executor)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Explicit state**: status and echo flag are passed by `&mut`, never global
//! - **Type-driven design**: opcode layouts decode into typed commands
//! - **No unsafe code**: pins are driven through `embedded-hal` traits
//! - **Functional core, imperative shell**: Pure logic separated from I/O
//! - **Explicit error handling**: All fallible operations return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must stay first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;
#[cfg(feature = "embedded")]
pub use embassy_usb;

/// Hardware Abstraction Layer
///
/// The base controller interface and its GPIO implementation.
pub mod hal;

/// USB Subsystem
///
/// CDC ACM virtual serial port for the opcode link.
#[cfg(feature = "embedded")]
pub mod usb;

/// Serial line buffers and the transport trait
pub mod serial;

/// Communication Protocols
///
/// Opcode layout and line decoder.
pub mod protocol;

/// Opcode interpreter
///
/// Dispatcher, controller state and the polling service.
pub mod controller;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;
