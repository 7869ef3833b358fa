//! Opcode Layout
//!
//! Each opcode is an 8-bit value with one of two layouts, chosen by bit 6:
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! ┌───┬───┬───────┬───────────────┐
//! │ W │ 1 │  bus  │  RF chain idx │   selection
//! ├───┼───┼───────┴───────────────┤
//! │ W │ 0 │      config code      │   config / sleep
//! └───┴───┴───────────────────────┘
//! ```
//!
//! `W` is the warning light. It never selects behavior on input: it is
//! masked off before matching and folded into the status register
//! separately.

use core::fmt;

use crate::config::RF_CHAINS_PER_BUS;
use crate::types::AntennaBus;

/// Raw 8-bit opcode
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Opcode(u8);

impl Opcode {
    /// Warning light bit
    pub const WARNING_LIGHT_BIT: u8 = 0b1000_0000;

    /// Selection layout marker
    pub const SELECTION_BIT: u8 = 0b0100_0000;

    /// Warning light on (exact match)
    pub const WARNING_LIGHT_ON: Self = Self(0b1111_1111);

    /// Warning light off (exact match)
    pub const WARNING_LIGHT_OFF: Self = Self(0b0111_1111);

    /// Sleep: all outputs off
    pub const SLEEP: Self = Self(0b0000_0000);

    /// Toggle opcode echo
    pub const TOGGLE_ECHO: Self = Self(0b0000_0001);

    /// Report base controller firmware version
    pub const GET_FW_VERSION: Self = Self(0b0000_0010);

    /// Enumerate attached modules
    pub const PRINT_MODULES: Self = Self(0b0000_0011);

    /// Report whether the base controller is active
    pub const IS_BASE_ACTIVE: Self = Self(0b0000_0100);

    /// Re-initialize the base controller
    pub const INIT: Self = Self(0b0000_0101);

    /// Disable the base controller
    pub const DISABLE: Self = Self(0b0000_0110);

    /// Report the status register
    pub const QUERY_STATUS: Self = Self(0b0000_0111);

    /// Create an opcode from its raw value
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw value, warning light included
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Value with the warning light bit stripped
    #[must_use]
    pub const fn masked(self) -> u8 {
        self.0 & !Self::WARNING_LIGHT_BIT
    }

    /// Check if the warning light bit is set
    #[must_use]
    pub const fn warning_light(self) -> bool {
        self.0 & Self::WARNING_LIGHT_BIT != 0
    }

    /// Check if this opcode uses the selection layout
    #[must_use]
    pub const fn is_selection(self) -> bool {
        self.0 & Self::SELECTION_BIT != 0
    }

    /// Classify the opcode
    #[must_use]
    pub fn command(self) -> Command {
        if self == Self::WARNING_LIGHT_ON {
            return Command::WarningLight(true);
        }
        if self == Self::WARNING_LIGHT_OFF {
            return Command::WarningLight(false);
        }

        let masked = self.masked();
        if self.is_selection() {
            Selection::from_bits(masked).map_or(Command::Unrecognized, Command::Select)
        } else {
            ConfigCommand::from_code(masked).map_or(Command::Unrecognized, Command::Config)
        }
    }
}

impl From<u8> for Opcode {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode.0
    }
}

impl fmt::Debug for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opcode({:#010b})", self.0)
    }
}

/// Operator echo form: `0xHH (D)`
impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X} ({})", self.0, self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Opcode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{=u8:02X}", self.0);
    }
}

/// Config/sleep layout commands (bit 6 clear)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigCommand {
    /// All outputs off
    Sleep,
    /// Invert the echo flag
    ToggleEcho,
    /// Report base controller firmware version
    GetFwVersion,
    /// Enumerate attached modules
    PrintModules,
    /// Report whether the base controller is active
    IsBaseActive,
    /// Busy-wait until the base controller initializes
    Init,
    /// Disable the base controller
    Disable,
    /// Report the status register
    QueryStatus,
    /// Check 24V presence on a slot (1-3)
    Check24V(u8),
    /// Read a module status word from a slot (1-3)
    ReadStatus(u8),
}

impl ConfigCommand {
    /// Decode the masked opcode of a config/sleep command
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0b00_0000 => Some(Self::Sleep),
            0b00_0001 => Some(Self::ToggleEcho),
            0b00_0010 => Some(Self::GetFwVersion),
            0b00_0011 => Some(Self::PrintModules),
            0b00_0100 => Some(Self::IsBaseActive),
            0b00_0101 => Some(Self::Init),
            0b00_0110 => Some(Self::Disable),
            0b00_0111 => Some(Self::QueryStatus),
            0b00_1001 => Some(Self::Check24V(1)),
            0b00_1010 => Some(Self::Check24V(2)),
            0b00_1011 => Some(Self::Check24V(3)),
            0b01_0001 => Some(Self::ReadStatus(1)),
            0b01_0010 => Some(Self::ReadStatus(2)),
            0b01_0011 => Some(Self::ReadStatus(3)),
            _ => None,
        }
    }

    /// Masked opcode of this command
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Sleep => 0b00_0000,
            Self::ToggleEcho => 0b00_0001,
            Self::GetFwVersion => 0b00_0010,
            Self::PrintModules => 0b00_0011,
            Self::IsBaseActive => 0b00_0100,
            Self::Init => 0b00_0101,
            Self::Disable => 0b00_0110,
            Self::QueryStatus => 0b00_0111,
            Self::Check24V(slot) => 0b00_1000 | (slot & 0b11),
            Self::ReadStatus(slot) => 0b01_0000 | (slot & 0b11),
        }
    }

    /// Opcode for this command with the warning light bit clear
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        Opcode(self.code())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConfigCommand {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Sleep => defmt::write!(f, "Sleep"),
            Self::ToggleEcho => defmt::write!(f, "ToggleEcho"),
            Self::GetFwVersion => defmt::write!(f, "GetFwVersion"),
            Self::PrintModules => defmt::write!(f, "PrintModules"),
            Self::IsBaseActive => defmt::write!(f, "IsBaseActive"),
            Self::Init => defmt::write!(f, "Init"),
            Self::Disable => defmt::write!(f, "Disable"),
            Self::QueryStatus => defmt::write!(f, "QueryStatus"),
            Self::Check24V(slot) => defmt::write!(f, "Check24V({})", slot),
            Self::ReadStatus(slot) => defmt::write!(f, "ReadStatus({})", slot),
        }
    }
}

/// Antenna bus and RF chain picked by a selection opcode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    bus: AntennaBus,
    index: u8,
}

impl Selection {
    /// Create a selection from a bus and a chain index (0-15)
    #[must_use]
    pub const fn new(bus: AntennaBus, index: u8) -> Self {
        Self {
            bus,
            index: index & 0x0F,
        }
    }

    /// Decode the masked bits of a selection opcode
    #[must_use]
    pub const fn from_bits(masked: u8) -> Option<Self> {
        match AntennaBus::from_bits(masked >> 4) {
            Some(bus) => Some(Self::new(bus, masked)),
            None => None,
        }
    }

    /// Antenna bus
    #[must_use]
    pub const fn bus(self) -> AntennaBus {
        self.bus
    }

    /// Chain index as encoded (0-15)
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// One-based RF chain number
    #[must_use]
    pub const fn chain(self) -> u8 {
        self.index + 1
    }

    /// Check if the chain has a physical output
    #[must_use]
    pub const fn is_wired(self) -> bool {
        self.index < RF_CHAINS_PER_BUS
    }

    /// Discrete channel of the RF chain, if wired
    #[must_use]
    pub const fn rf_channel(self) -> Option<u8> {
        if self.is_wired() {
            Some(self.bus.first_rf_channel() + self.index)
        } else {
            None
        }
    }

    /// Opcode for this selection with the warning light bit clear
    #[must_use]
    pub const fn opcode(self) -> Opcode {
        Opcode(Opcode::SELECTION_BIT | (self.bus.bits() << 4) | self.index)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Chain {}", self.bus, self.chain())
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Selection {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Chain {}", self.bus, self.chain());
    }
}

/// Decoded meaning of an opcode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Warning light on/off (exclusive opcodes)
    WarningLight(bool),
    /// Config or sleep command
    Config(ConfigCommand),
    /// Antenna bus and RF chain selection
    Select(Selection),
    /// Matches neither layout
    Unrecognized,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::WarningLight(on) => defmt::write!(f, "WarningLight({})", on),
            Self::Config(cmd) => defmt::write!(f, "Config({})", cmd),
            Self::Select(sel) => defmt::write!(f, "Select({})", sel),
            Self::Unrecognized => defmt::write!(f, "Unrecognized"),
        }
    }
}
