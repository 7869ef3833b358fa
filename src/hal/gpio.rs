//! GPIO Base Controller
//!
//! Implements [`BaseController`] on plain MCU pins driving relay drivers.
//! Slot 1 is the discrete bank, slot 2 carries the warning light and a
//! single 24V sense input covers both populated slots. Disabling the base
//! deasserts the discrete bank only; the warning light keeps its state.

use core::fmt;

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use super::BaseController;
use crate::config::{channels, BASE_FW_VERSION, SLOT_DISCRETE_OUT, SLOT_WARNING_LIGHT};
use crate::types::{FirmwareVersion, Level};

/// Base controller built from GPIO lines
pub struct GpioBase<O, I, const N: usize> {
    discrete: [O; N],
    warning_light: O,
    supply_sense: I,
    /// Bit `n - 1` set while discrete channel `n` is asserted
    asserted: u32,
    light_on: bool,
    active: bool,
}

impl<O: OutputPin, I: InputPin, const N: usize> GpioBase<O, I, N> {
    /// Create the base (inactive until [`BaseController::init`])
    #[must_use]
    pub fn new(discrete: [O; N], warning_light: O, supply_sense: I) -> Self {
        Self {
            discrete,
            warning_light,
            supply_sense,
            asserted: 0,
            light_on: false,
            active: false,
        }
    }

    fn drive_discrete(&mut self, level: Level, channel: u8) {
        let index = usize::from(channel).wrapping_sub(1);
        let Some(pin) = self.discrete.get_mut(index) else {
            warn!("No discrete channel {}", channel);
            return;
        };
        // Relay driver pins are infallible on this target
        let _ = pin.set_state(PinState::from(level.is_high()));
        if level.is_high() {
            self.asserted |= 1 << index;
        } else {
            self.asserted &= !(1 << index);
        }
    }

    fn drive_all_discrete(&mut self, level: Level) {
        for channel in (1..=N).filter_map(|ch| u8::try_from(ch).ok()) {
            self.drive_discrete(level, channel);
        }
    }

    fn drive_warning_light(&mut self, level: Level) {
        let _ = self.warning_light.set_state(PinState::from(level.is_high()));
        self.light_on = level.is_high();
    }
}

impl<O: OutputPin, I: InputPin, const N: usize> BaseController for GpioBase<O, I, N> {
    fn init(&mut self) -> bool {
        self.drive_all_discrete(Level::Low);
        self.active = true;
        info!("GPIO base active, {} discrete channels", N);
        true
    }

    fn is_base_active(&self) -> bool {
        self.active
    }

    fn fw_version(&self) -> FirmwareVersion {
        BASE_FW_VERSION
    }

    fn print_modules<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "Slot {}: discrete output, {} channels\r\n", SLOT_DISCRETE_OUT, N)?;
        write!(out, "Slot {SLOT_WARNING_LIGHT}: warning light, 1 channel\r\n")
    }

    fn write_discrete(&mut self, level: Level, slot: u8, channel: u8) {
        match (slot, channel) {
            // The light relay is not switched by the base enable
            (SLOT_WARNING_LIGHT, channels::ALL | channels::WARNING_LIGHT) => {
                self.drive_warning_light(level);
            }
            (SLOT_DISCRETE_OUT, _) if !self.active => {
                warn!("Base inactive, dropped write to channel {}", channel);
            }
            (SLOT_DISCRETE_OUT, channels::ALL) => self.drive_all_discrete(level),
            (SLOT_DISCRETE_OUT, ch) => self.drive_discrete(level, ch),
            _ => warn!("No output at slot {} channel {}", slot, channel),
        }
    }

    fn enable_base_controller(&mut self, enable: bool) {
        if !enable {
            self.drive_all_discrete(Level::Low);
        }
        self.active = enable;
    }

    fn check_24v(&mut self, slot: u8) -> bool {
        match slot {
            SLOT_DISCRETE_OUT | SLOT_WARNING_LIGHT => self.supply_sense.is_high().unwrap_or(false),
            _ => false,
        }
    }

    fn read_status(&mut self, slot: u8) -> u32 {
        match slot {
            SLOT_DISCRETE_OUT => self.asserted,
            SLOT_WARNING_LIGHT => u32::from(self.light_on),
            _ => 0,
        }
    }
}
