//! USB CDC ACM (Serial) Implementation
//!
//! Virtual serial port carrying the opcode protocol. Packets are pulled
//! into a [`LineBuffer`] until a line is ready or the read timeout
//! elapses; replies are pushed out of a [`ResponseBuffer`] in
//! packet-sized chunks.

use embassy_time::{with_timeout, Duration};
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::{Driver, EndpointError};

use crate::config::{READ_TIMEOUT_MS, USB_CDC_PACKET_SIZE};
use crate::serial::{LineBuffer, ResponseBuffer, SerialLink};

/// USB device descriptor strings
pub struct UsbStrings {
    /// Manufacturer name
    pub manufacturer: &'static str,
    /// Product name
    pub product: &'static str,
    /// Serial number
    pub serial: &'static str,
}

impl Default for UsbStrings {
    fn default() -> Self {
        Self {
            manufacturer: "RF Selector Project",
            product: "RF Chain Selector",
            serial: "0001",
        }
    }
}

/// USB device info for descriptor
#[derive(Clone, Copy, Debug)]
pub struct UsbDeviceInfo {
    /// Vendor ID
    pub vid: u16,
    /// Product ID
    pub pid: u16,
    /// Device release number
    pub device_release: u16,
}

impl Default for UsbDeviceInfo {
    fn default() -> Self {
        Self {
            vid: crate::config::USB_VID,
            pid: crate::config::USB_PID,
            device_release: 0x0100,
        }
    }
}

impl defmt::Format for UsbDeviceInfo {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "USB({:04X}:{:04X})", self.vid, self.pid);
    }
}

/// Build the device configuration from descriptor info and strings
#[must_use]
pub fn device_config(info: UsbDeviceInfo, strings: &UsbStrings) -> embassy_usb::Config<'static> {
    let mut config = embassy_usb::Config::new(info.vid, info.pid);
    config.manufacturer = Some(strings.manufacturer);
    config.product = Some(strings.product);
    config.serial_number = Some(strings.serial);
    config.device_release = info.device_release;
    config.max_power = 100;
    config.max_packet_size_0 = 64;
    config
}

/// Wait for input, then gather packets until a line is ready
///
/// Blocks until the first packet arrives. After that each further packet
/// is awaited for at most [`READ_TIMEOUT_MS`], so an incomplete line is
/// handed to the decoder once the host goes quiet.
///
/// # Errors
///
/// Returns the endpoint error when the host disconnects.
pub async fn fill_line<'d, D: Driver<'d>>(
    class: &mut CdcAcmClass<'d, D>,
    rx: &mut LineBuffer,
) -> Result<(), EndpointError> {
    let mut packet = [0u8; USB_CDC_PACKET_SIZE as usize];

    if rx.available() == 0 {
        let n = class.read_packet(&mut packet).await?;
        rx.push(&packet[..n]);
    }

    let timeout = Duration::from_millis(READ_TIMEOUT_MS);
    while !rx.line_ready() {
        match with_timeout(timeout, class.read_packet(&mut packet)).await {
            Ok(read) => {
                let n = read?;
                let accepted = rx.push(&packet[..n]);
                if accepted < n {
                    warn!("Receive buffer full, dropped {} bytes", n - accepted);
                }
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// Send the response buffer to the host and clear it
///
/// # Errors
///
/// Returns the endpoint error when the host disconnects.
pub async fn flush<'d, D: Driver<'d>>(
    class: &mut CdcAcmClass<'d, D>,
    tx: &mut ResponseBuffer,
) -> Result<(), EndpointError> {
    let packet_size = usize::from(USB_CDC_PACKET_SIZE);

    for chunk in tx.as_bytes().chunks(packet_size) {
        class.write_packet(chunk).await?;
    }
    // A full last packet needs a zero-length packet to end the transfer
    if !tx.is_empty() && tx.len() % packet_size == 0 {
        class.write_packet(&[]).await?;
    }

    tx.clear();
    Ok(())
}
