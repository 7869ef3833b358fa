//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the RF selector hardware.
//! Slot numbers, the discrete channel map and serial framing are
//! centralized here. Pin assignments live with the peripheral setup in
//! the firmware binary.

use crate::types::FirmwareVersion;

/// Firmware version reported by the GPIO base controller
pub const BASE_FW_VERSION: FirmwareVersion = FirmwareVersion::new(1, 0, 0);

/// Binary digits carried by one opcode line
pub const OPCODE_DIGITS: usize = 8;

/// Bytes accepted for one command line (digits plus CRLF)
pub const LINE_LENGTH: usize = OPCODE_DIGITS + 2;

/// Time the transport waits for the rest of a line, in milliseconds
pub const READ_TIMEOUT_MS: u64 = 1000;

/// Delay after the power-on bring-up barrier, in milliseconds
pub const SETTLE_DELAY_MS: u64 = 1000;

/// Receive buffer size (several lines of headroom)
pub const RX_BUFFER_SIZE: usize = 64;

/// Response buffer size for one poll cycle
pub const TX_BUFFER_SIZE: usize = 256;

/// Slot holding the discrete output bank
pub const SLOT_DISCRETE_OUT: u8 = 1;

/// Slot holding the warning light output
pub const SLOT_WARNING_LIGHT: u8 = 2;

/// Highest slot number the 24V and status queries address
pub const MAX_SLOT: u8 = 3;

/// Discrete channels wired on the output bank
pub const DISCRETE_CHANNELS: usize = 10;

/// Wired RF chains per antenna bus
pub const RF_CHAINS_PER_BUS: u8 = 4;

/// USB VID (use test VID for development)
pub const USB_VID: u16 = 0x1209;

/// USB PID (get from pid.codes for production)
pub const USB_PID: u16 = 0x0002;

/// USB CDC ACM packet size
pub const USB_CDC_PACKET_SIZE: u16 = 64;

/// Discrete output channel numbers on [`SLOT_DISCRETE_OUT`]
pub mod channels {
    //! Channel 0 addresses every channel of a slot at once.

    /// Every channel on the slot
    pub const ALL: u8 = 0;

    /// EMS RF chain 1
    pub const EMS_RF1: u8 = 1;
    /// EMS RF chain 2
    pub const EMS_RF2: u8 = 2;
    /// EMS RF chain 3
    pub const EMS_RF3: u8 = 3;
    /// EMS RF chain 4
    pub const EMS_RF4: u8 = 4;

    /// DFS RF chain 1
    pub const DFS_RF1: u8 = 5;
    /// DFS RF chain 2
    pub const DFS_RF2: u8 = 6;
    /// DFS RF chain 3
    pub const DFS_RF3: u8 = 7;
    /// DFS RF chain 4
    pub const DFS_RF4: u8 = 8;

    /// EMS antenna-bus select line
    pub const EMS_SELECT: u8 = 9;
    /// DFS antenna-bus select line
    pub const DFS_SELECT: u8 = 10;

    /// Warning light, on [`super::SLOT_WARNING_LIGHT`]
    pub const WARNING_LIGHT: u8 = 1;
}
