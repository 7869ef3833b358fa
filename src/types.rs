//! Shared types used across the RF selector firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

use crate::config::channels;

/// Logic level written to a discrete output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Level {
    /// Output deasserted
    #[default]
    Low,
    /// Output asserted
    High,
}

impl Level {
    /// Build a level from a boolean (`true` = asserted)
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Self::High
        } else {
            Self::Low
        }
    }

    /// Check if the level is asserted
    #[must_use]
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Level {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Low => defmt::write!(f, "LOW"),
            Self::High => defmt::write!(f, "HIGH"),
        }
    }
}

/// Antenna bus gating which RF chain outputs are electrically active
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AntennaBus {
    /// EMS antenna bus (selector bits `00`)
    Ems,
    /// DFS antenna bus (selector bits `01`)
    Dfs,
}

impl AntennaBus {
    /// Decode the two selector bits of a selection opcode
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0b11 {
            0b00 => Some(Self::Ems),
            0b01 => Some(Self::Dfs),
            _ => None,
        }
    }

    /// Selector bits for this bus
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Ems => 0b00,
            Self::Dfs => 0b01,
        }
    }

    /// Discrete channel of the bus-select line
    #[must_use]
    pub const fn select_channel(self) -> u8 {
        match self {
            Self::Ems => channels::EMS_SELECT,
            Self::Dfs => channels::DFS_SELECT,
        }
    }

    /// Discrete channel of this bus's first RF chain
    #[must_use]
    pub const fn first_rf_channel(self) -> u8 {
        match self {
            Self::Ems => channels::EMS_RF1,
            Self::Dfs => channels::DFS_RF1,
        }
    }

    /// Operator-facing name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ems => "EMS",
            Self::Dfs => "DFS",
        }
    }
}

impl fmt::Display for AntennaBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AntennaBus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}", self.name());
    }
}

/// Status register
///
/// Bits 6-0 mirror the most recently recorded command, bit 7 holds the
/// warning light. The two halves are written independently.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Status(u8);

impl Status {
    /// Warning light bit
    pub const WARNING_LIGHT: u8 = 0b1000_0000;

    /// Command bits
    pub const COMMAND_MASK: u8 = 0b0111_1111;

    /// Create a status register from its raw value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw register value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Recorded command bits (warning light stripped)
    #[must_use]
    pub const fn command_bits(self) -> u8 {
        self.0 & Self::COMMAND_MASK
    }

    /// Check if the warning light bit is set
    #[must_use]
    pub const fn warning_light(self) -> bool {
        self.0 & Self::WARNING_LIGHT != 0
    }

    /// Set or clear the warning light bit (returns new status)
    #[must_use]
    pub const fn with_warning_light(self, on: bool) -> Self {
        if on {
            Self(self.0 | Self::WARNING_LIGHT)
        } else {
            Self(self.0 & Self::COMMAND_MASK)
        }
    }

    /// Record a command, keeping the warning light bit (returns new status)
    #[must_use]
    pub const fn with_command(self, command: u8) -> Self {
        Self((self.0 & Self::WARNING_LIGHT) | (command & Self::COMMAND_MASK))
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Status({:#010b})", self.0)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Status({=u8:#b})", self.0);
    }
}

/// Base controller firmware version
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FirmwareVersion {
    /// Major version
    pub major: u8,
    /// Minor version
    pub minor: u8,
    /// Patch version
    pub patch: u8,
}

impl FirmwareVersion {
    /// Create a firmware version
    #[must_use]
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FirmwareVersion {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "v{}.{}.{}", self.major, self.minor, self.patch);
    }
}
