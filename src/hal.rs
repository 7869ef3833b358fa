//! Hardware Abstraction Layer
//!
//! The dispatcher drives the hardware only through [`BaseController`]: a
//! base unit addressing I/O modules by slot, with discrete outputs
//! addressed by channel inside each slot. [`gpio`] implements it on
//! `embedded-hal` pins; dispatcher tests use a recording mock.

use core::fmt;

use crate::types::{FirmwareVersion, Level};

/// Base controller and its I/O modules
pub trait BaseController {
    /// Initialize the base and its modules
    ///
    /// Idempotent and safe to poll; returns `true` once the hardware is
    /// ready.
    fn init(&mut self) -> bool;

    /// Check if the base controller is active
    fn is_base_active(&self) -> bool;

    /// Firmware version of the base controller
    fn fw_version(&self) -> FirmwareVersion;

    /// Write a human-readable list of attached modules
    ///
    /// # Errors
    ///
    /// Propagates write errors from `out`.
    fn print_modules<W: fmt::Write>(&self, out: &mut W) -> fmt::Result;

    /// Drive a discrete output (channel 0 addresses every channel on the slot)
    fn write_discrete(&mut self, level: Level, slot: u8, channel: u8);

    /// Enable or disable the base controller
    fn enable_base_controller(&mut self, enable: bool);

    /// Check for 24V field supply on a slot
    fn check_24v(&mut self, slot: u8) -> bool;

    /// Read the status word of the module in a slot
    fn read_status(&mut self, slot: u8) -> u32;
}

/// GPIO-backed base controller
pub mod gpio;
