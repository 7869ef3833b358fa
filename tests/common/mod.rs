//! Shared test doubles
//!
//! A base controller that records every call, and a scripted serial link.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::fmt;

use rf_selector::hal::BaseController;
use rf_selector::serial::SerialLink;
use rf_selector::types::{FirmwareVersion, Level};

/// One discrete write: (level, slot, channel)
pub type DiscreteWrite = (Level, u8, u8);

/// Base controller that records writes instead of driving pins
pub struct RecordingBase {
    pub writes: Vec<DiscreteWrite>,
    pub active: bool,
    pub enabled_calls: Vec<bool>,
    /// `init` fails this many times before succeeding
    pub init_failures: u32,
    pub init_calls: u32,
    pub supply_slots: Vec<u8>,
    pub checked_slots: Vec<u8>,
    pub status_words: [u32; 4],
}

impl RecordingBase {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            active: true,
            enabled_calls: Vec::new(),
            init_failures: 0,
            init_calls: 0,
            supply_slots: vec![1, 2],
            checked_slots: Vec::new(),
            status_words: [0; 4],
        }
    }

    pub fn inactive() -> Self {
        Self {
            active: false,
            ..Self::new()
        }
    }
}

impl BaseController for RecordingBase {
    fn init(&mut self) -> bool {
        self.init_calls += 1;
        if self.init_failures > 0 {
            self.init_failures -= 1;
            return false;
        }
        self.active = true;
        true
    }

    fn is_base_active(&self) -> bool {
        self.active
    }

    fn fw_version(&self) -> FirmwareVersion {
        FirmwareVersion::new(2, 4, 1)
    }

    fn print_modules<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "Slot 1: P1-15TD2\r\n")
    }

    fn write_discrete(&mut self, level: Level, slot: u8, channel: u8) {
        self.writes.push((level, slot, channel));
    }

    fn enable_base_controller(&mut self, enable: bool) {
        self.enabled_calls.push(enable);
        self.active = enable;
    }

    fn check_24v(&mut self, slot: u8) -> bool {
        self.checked_slots.push(slot);
        self.supply_slots.contains(&slot)
    }

    fn read_status(&mut self, slot: u8) -> u32 {
        self.status_words[usize::from(slot)]
    }
}

/// Serial link fed from a fixed byte script
pub struct ScriptedLink {
    pub bytes: VecDeque<u8>,
    pub clears: u32,
}

impl ScriptedLink {
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: data.iter().copied().collect(),
            clears: 0,
        }
    }
}

impl SerialLink for ScriptedLink {
    fn available(&self) -> usize {
        self.bytes.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.bytes.clear();
    }
}
