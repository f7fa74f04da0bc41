//! Scanner scenarios
//!
//! Run with: cargo test disasm -- --nocapture

use super::{disassemble, DisasmError};

/// Typical Solidity prologue:
/// PUSH1 0x80
/// PUSH1 0x40
/// MSTORE
const PROLOGUE: &[u8] = &[0x60, 0x80, 0x60, 0x40, 0x52];

#[test]
fn test_prologue() {
    let result = disassemble(PROLOGUE);

    println!("{}", result.format_listing());

    assert_eq!(result.byte_length, 5);
    assert_eq!(result.normalized_input, "0x6080604052");
    assert_eq!(result.instruction_count(), 3);
    assert!(result.diagnostics.is_empty());

    let first = &result.instructions[0];
    assert_eq!(first.offset, 0);
    assert_eq!(first.mnemonic, "PUSH1");
    assert_eq!(first.raw_value, "0x60");
    assert_eq!(first.immediate.as_deref(), Some("0x80"));

    let second = &result.instructions[1];
    assert_eq!(second.offset, 2);
    assert_eq!(second.mnemonic, "PUSH1");
    assert_eq!(second.immediate.as_deref(), Some("0x40"));

    let third = &result.instructions[2];
    assert_eq!(third.offset, 4);
    assert_eq!(third.mnemonic, "MSTORE");
    assert_eq!(third.raw_value, "0x52");
    assert_eq!(third.description, "Save word to memory");
    assert!(third.immediate.is_none());
}

#[test]
fn test_lone_push1() {
    let result = disassemble(&[0x60]);

    assert_eq!(result.instruction_count(), 1);
    assert_eq!(result.instructions[0].mnemonic, "PUSH1");
    assert_eq!(result.instructions[0].offset, 0);
    assert!(result.instructions[0].immediate.is_none());

    assert_eq!(result.diagnostics.len(), 1);
    let message = result.diagnostics[0].to_string();
    assert!(message.contains("PUSH1"));
    assert!(message.contains("incomplete"));
}

#[test]
fn test_unassigned_bytes() {
    let result = disassemble(&[0x0C, 0x0D, 0x0E]);

    assert_eq!(result.instruction_count(), 3);
    assert!(result.instructions.iter().all(|inst| inst.mnemonic == "UNKNOWN"));
    assert!(result.instructions.iter().all(|inst| inst.immediate.is_none()));
    assert_eq!(
        result.instructions[1].description,
        "Unknown byte (not an EVM opcode)"
    );

    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(
        result.diagnostics[0].to_string(),
        "Invalid byte 0x0c at offset 0 (not a valid EVM opcode)"
    );
    assert_eq!(
        result.diagnostics[2],
        DisasmError::InvalidByte {
            byte: 0x0E,
            offset: 2
        }
    );
}

#[test]
fn test_push2_full_argument() {
    let result = disassemble(&[0x61, 0x12, 0x34]);

    assert_eq!(result.instruction_count(), 1);
    assert_eq!(result.instructions[0].mnemonic, "PUSH2");
    assert_eq!(result.instructions[0].immediate.as_deref(), Some("0x1234"));
    assert_eq!(result.instructions[0].size, 3);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_empty_input() {
    let result = disassemble(&[]);

    assert_eq!(result.byte_length, 0);
    assert_eq!(result.normalized_input, "0x");
    assert!(result.instructions.is_empty());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_truncated_push32_reports_full_size() {
    let mut code = vec![0x7F];
    code.extend_from_slice(&[0xAB; 10]);

    let result = disassemble(&code);

    assert_eq!(result.instructions[0].mnemonic, "PUSH32");
    assert_eq!(result.instructions[0].offset, 0);
    assert!(result.instructions[0].immediate.is_none());

    assert_eq!(
        result.diagnostics[0],
        DisasmError::IncompletePush {
            name: "PUSH32",
            offset: 0,
            missing: 32
        }
    );
    assert_eq!(
        result.diagnostics[0].to_string(),
        "PUSH32 at offset 0 is incomplete (missing 32-byte argument)"
    );
}

#[test]
fn test_truncated_push_tail_is_rescanned() {
    // PUSH2 with a single trailing byte: the 0x01 is decoded as ADD
    let result = disassemble(&[0x61, 0x01]);

    assert_eq!(result.instruction_count(), 2);
    assert_eq!(result.instructions[0].mnemonic, "PUSH2");
    assert!(result.instructions[0].immediate.is_none());
    assert_eq!(result.instructions[1].mnemonic, "ADD");
    assert_eq!(result.instructions[1].offset, 1);
    assert_eq!(result.diagnostics.len(), 1);

    // The rescanned tail of PUSH32 + 10 bytes holds 0xAB, which is unassigned
    let mut code = vec![0x7F];
    code.extend_from_slice(&[0xAB; 10]);
    let result = disassemble(&code);
    assert_eq!(result.instruction_count(), 11);
    assert_eq!(result.diagnostics.len(), 11);
    assert_eq!(result.diagnostics[1].offset(), 1);
}

#[test]
fn test_push0_takes_no_argument() {
    let result = disassemble(&[0x5F]);

    assert_eq!(result.instruction_count(), 1);
    assert_eq!(result.instructions[0].mnemonic, "PUSH0");
    assert!(result.instructions[0].immediate.is_none());
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_halting_opcodes_do_not_stop_scan() {
    // STOP RETURN REVERT INVALID SELFDESTRUCT ADD
    let result = disassemble(&[0x00, 0xF3, 0xFD, 0xFE, 0xFF, 0x01]);

    let names: Vec<&str> = result.instructions.iter().map(|inst| inst.mnemonic).collect();
    assert_eq!(
        names,
        vec!["STOP", "RETURN", "REVERT", "INVALID", "SELFDESTRUCT", "ADD"]
    );
}

#[test]
fn test_push_data_is_not_decoded() {
    // PUSH4 0x0c0d0e0f: unassigned bytes inside immediate data are data
    let result = disassemble(&[0x63, 0x0C, 0x0D, 0x0E, 0x0F, 0x00]);

    assert_eq!(result.instruction_count(), 2);
    assert_eq!(result.instructions[0].immediate.as_deref(), Some("0x0c0d0e0f"));
    assert_eq!(result.instructions[1].offset, 5);
    assert!(result.diagnostics.is_empty());
}

#[test]
fn test_push_argument_exactly_at_end() {
    let mut code = vec![0x7F];
    code.extend((0..32).map(|i| i as u8));

    let result = disassemble(&code);

    assert_eq!(result.instruction_count(), 1);
    assert!(result.diagnostics.is_empty());
    let argument = result.instructions[0].immediate.as_deref().unwrap_or_default();
    assert_eq!(argument.len(), 2 + 64);
    assert!(argument.starts_with("0x000102"));
}

#[test]
fn test_format_listing() {
    let result = disassemble(PROLOGUE);
    let listing = result.format_listing();
    let lines: Vec<&str> = listing.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("00000000  60  PUSH1"));
    assert!(lines[0].ends_with("0x80"));
    assert_eq!(lines[2], "00000004  52  MSTORE");
}
