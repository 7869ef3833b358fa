//! Opcode Layout Tests
//!
//! Tests for opcode classification, selection decoding and the status register.
//! Run with: cargo test --test opcode_tests

use rf_selector::config::channels;
use rf_selector::protocol::{Command, ConfigCommand, Opcode, Selection};
use rf_selector::types::{AntennaBus, Status};

// ============================================================================
// Warning Light Tests
// ============================================================================

#[test]
fn warning_light_on_is_exact_match() {
    assert_eq!(Opcode::new(0b1111_1111).command(), Command::WarningLight(true));
}

#[test]
fn warning_light_off_is_exact_match() {
    assert_eq!(Opcode::new(0b0111_1111).command(), Command::WarningLight(false));
}

#[test]
fn warning_light_bit_does_not_select_behavior() {
    for raw in 0..=0x7Fu8 {
        let plain = Opcode::new(raw);
        let lit = Opcode::new(raw | 0x80);
        if plain == Opcode::WARNING_LIGHT_OFF {
            continue;
        }
        assert_eq!(plain.command(), lit.command(), "opcode {raw:#010b}");
    }
}

#[test]
fn masked_strips_only_bit_seven() {
    let opcode = Opcode::new(0b1100_0011);
    assert!(opcode.warning_light());
    assert_eq!(opcode.masked(), 0b0100_0011);
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn config_codes_decode() {
    let table = [
        (0b0000_0000, ConfigCommand::Sleep),
        (0b0000_0001, ConfigCommand::ToggleEcho),
        (0b0000_0010, ConfigCommand::GetFwVersion),
        (0b0000_0011, ConfigCommand::PrintModules),
        (0b0000_0100, ConfigCommand::IsBaseActive),
        (0b0000_0101, ConfigCommand::Init),
        (0b0000_0110, ConfigCommand::Disable),
        (0b0000_0111, ConfigCommand::QueryStatus),
        (0b0000_1001, ConfigCommand::Check24V(1)),
        (0b0000_1010, ConfigCommand::Check24V(2)),
        (0b0000_1011, ConfigCommand::Check24V(3)),
        (0b0001_0001, ConfigCommand::ReadStatus(1)),
        (0b0001_0010, ConfigCommand::ReadStatus(2)),
        (0b0001_0011, ConfigCommand::ReadStatus(3)),
    ];
    for (raw, expected) in table {
        assert_eq!(Opcode::new(raw).command(), Command::Config(expected));
        assert_eq!(expected.code(), raw);
    }
}

#[test]
fn named_constants_match_commands() {
    assert_eq!(Opcode::SLEEP.command(), Command::Config(ConfigCommand::Sleep));
    assert_eq!(Opcode::QUERY_STATUS.command(), Command::Config(ConfigCommand::QueryStatus));
    assert_eq!(Opcode::INIT, ConfigCommand::Init.opcode());
    assert_eq!(Opcode::DISABLE, ConfigCommand::Disable.opcode());
}

#[test]
fn unused_config_codes_are_unrecognized() {
    for raw in [0b0000_1000, 0b0000_1100, 0b0000_1111, 0b0001_0000, 0b0010_1000, 0b0011_1111] {
        assert_eq!(Opcode::new(raw).command(), Command::Unrecognized, "opcode {raw:#010b}");
    }
}

// ============================================================================
// Selection Tests
// ============================================================================

#[test]
fn selection_decodes_bus_and_chain() {
    match Opcode::new(0b0100_0001).command() {
        Command::Select(sel) => {
            assert_eq!(sel.bus(), AntennaBus::Ems);
            assert_eq!(sel.chain(), 2);
            assert_eq!(sel.rf_channel(), Some(channels::EMS_RF2));
        }
        other => panic!("Expected selection, got {other:?}"),
    }
}

#[test]
fn dfs_chain_one() {
    match Opcode::new(0b0101_0000).command() {
        Command::Select(sel) => {
            assert_eq!(sel.bus(), AntennaBus::Dfs);
            assert_eq!(sel.rf_channel(), Some(channels::DFS_RF1));
            assert_eq!(sel.bus().select_channel(), channels::DFS_SELECT);
        }
        other => panic!("Expected selection, got {other:?}"),
    }
}

#[test]
fn only_first_four_chains_are_wired() {
    for index in 0..16 {
        let sel = Selection::new(AntennaBus::Ems, index);
        assert_eq!(sel.is_wired(), index < 4, "index {index}");
    }
}

#[test]
fn unknown_bus_bits_are_unrecognized() {
    assert_eq!(Opcode::new(0b0110_0000).command(), Command::Unrecognized);
    assert_eq!(Opcode::new(0b1111_0001).command(), Command::Unrecognized);
}

#[test]
fn selection_opcode_round_trips() {
    let sel = Selection::new(AntennaBus::Dfs, 3);
    assert_eq!(sel.opcode(), Opcode::new(0b0101_0011));
    assert_eq!(sel.opcode().command(), Command::Select(sel));
}

#[test]
fn selection_display_names_bus_and_chain() {
    assert_eq!(Selection::new(AntennaBus::Dfs, 0).to_string(), "DFS Chain 1");
}

// ============================================================================
// Echo Formatting Tests
// ============================================================================

#[test]
fn opcode_display_is_hex_and_decimal() {
    assert_eq!(Opcode::new(0x41).to_string(), "0x41 (65)");
    assert_eq!(Opcode::new(0xC1).to_string(), "0xC1 (193)");
}

// ============================================================================
// Status Register Tests
// ============================================================================

#[test]
fn status_command_keeps_light() {
    let status = Status::default().with_warning_light(true).with_command(0x41);
    assert!(status.warning_light());
    assert_eq!(status.command_bits(), 0x41);
    assert_eq!(status.bits(), 0xC1);
}

#[test]
fn status_light_keeps_command() {
    let status = Status::from_bits(0x50).with_warning_light(true).with_warning_light(false);
    assert_eq!(status.bits(), 0x50);
}

#[test]
fn status_display_is_decimal() {
    assert_eq!(Status::from_bits(0xC1).to_string(), "193");
}
