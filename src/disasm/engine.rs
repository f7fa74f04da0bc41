//! Disassembly Engine - EVM bytecode scanner
//!
//! Single left-to-right pass over an in-memory byte buffer. Each position is
//! classified through the opcode table, PUSH instructions consume their
//! immediate bytes, and malformed encodings become diagnostics instead of
//! aborting the scan.

use serde::{Serialize, Serializer};
use thiserror::Error;

use super::opcodes::{self, Opcode, OpcodeKind, UNKNOWN_DESCRIPTION, UNKNOWN_MNEMONIC};

/// Non-fatal decoding diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DisasmError {
    #[error("Invalid byte 0x{byte:02x} at offset {offset} (not a valid EVM opcode)")]
    InvalidByte { byte: u8, offset: usize },

    #[error("{name} at offset {offset} is incomplete (missing {missing}-byte argument)")]
    IncompletePush {
        name: &'static str,
        offset: usize,
        missing: usize,
    },
}

impl DisasmError {
    /// Offset of the byte that triggered the diagnostic
    pub fn offset(&self) -> usize {
        match self {
            DisasmError::InvalidByte { offset, .. } => *offset,
            DisasmError::IncompletePush { offset, .. } => *offset,
        }
    }
}

// Reports carry diagnostics as their message text.
impl Serialize for DisasmError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single decoded instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedInstruction {
    /// Offset of the opcode byte in the input
    pub offset: usize,

    /// Opcode byte
    #[serde(skip)]
    pub byte: u8,

    /// Opcode name, or "UNKNOWN"
    #[serde(rename = "opcode")]
    pub mnemonic: &'static str,

    /// Opcode byte as `0x`-prefixed lowercase hex
    #[serde(rename = "value")]
    pub raw_value: String,

    pub description: &'static str,

    /// PUSH argument as `0x`-prefixed hex, only when fully present
    #[serde(rename = "argument", skip_serializing_if = "Option::is_none")]
    pub immediate: Option<String>,

    /// Bytes consumed by this instruction
    #[serde(skip)]
    pub size: usize,
}

impl DecodedInstruction {
    fn known(opcode: Opcode, offset: usize, immediate: Option<&[u8]>) -> Self {
        Self {
            offset,
            byte: opcode.byte,
            mnemonic: opcode.name,
            raw_value: format!("0x{:02x}", opcode.byte),
            description: opcode.description,
            size: 1 + immediate.map_or(0, <[u8]>::len),
            immediate: immediate.map(|arg| format!("0x{}", hex::encode(arg))),
        }
    }

    fn unknown(byte: u8, offset: usize) -> Self {
        Self {
            offset,
            byte,
            mnemonic: UNKNOWN_MNEMONIC,
            raw_value: format!("0x{:02x}", byte),
            description: UNKNOWN_DESCRIPTION,
            immediate: None,
            size: 1,
        }
    }

    /// Whether the byte matched no opcode
    pub fn is_unknown(&self) -> bool {
        self.mnemonic == UNKNOWN_MNEMONIC
    }
}

/// Result of one disassembly call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Input rendered back as `0x`-prefixed lowercase hex
    pub normalized_input: String,

    /// Total input size in bytes
    pub byte_length: usize,

    /// Decoded instructions in scan order
    pub instructions: Vec<DecodedInstruction>,

    /// Diagnostics in detection order
    pub diagnostics: Vec<DisasmError>,
}

impl Disassembly {
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Format instructions as a listing (for display)
    pub fn format_listing(&self) -> String {
        let mut output = String::new();

        for inst in &self.instructions {
            // Format: OFFSET  BYTE  MNEMONIC  ARGUMENT
            let line = format!(
                "{:08x}  {:02x}  {:<14}{}",
                inst.offset,
                inst.byte,
                inst.mnemonic,
                inst.immediate.as_deref().unwrap_or("")
            );
            output.push_str(line.trim_end());
            output.push('\n');
        }

        output
    }
}

/// Disassemble a byte buffer
///
/// Total over all inputs: every byte ends up in exactly one instruction or
/// PUSH argument, and problems are reported through `diagnostics`.
pub fn disassemble(bytes: &[u8]) -> Disassembly {
    let mut instructions = Vec::new();
    let mut diagnostics = Vec::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let (instruction, diagnostic) = decode_at(bytes, cursor);

        if let Some(diagnostic) = diagnostic {
            log::debug!("{}", diagnostic);
            diagnostics.push(diagnostic);
        }

        cursor += instruction.size;
        instructions.push(instruction);
    }

    log::debug!(
        "Disassembled {} bytes into {} instructions ({} diagnostics)",
        bytes.len(),
        instructions.len(),
        diagnostics.len()
    );

    Disassembly {
        normalized_input: format!("0x{}", hex::encode(bytes)),
        byte_length: bytes.len(),
        instructions,
        diagnostics,
    }
}

/// Decode the instruction starting at `offset`
fn decode_at(bytes: &[u8], offset: usize) -> (DecodedInstruction, Option<DisasmError>) {
    let byte = bytes[offset];

    let Some(opcode) = opcodes::lookup(byte) else {
        return (
            DecodedInstruction::unknown(byte, offset),
            Some(DisasmError::InvalidByte { byte, offset }),
        );
    };

    match opcode.kind() {
        OpcodeKind::Push { size } if size > 0 => {
            match bytes.get(offset + 1..offset + 1 + size) {
                Some(argument) => (DecodedInstruction::known(opcode, offset, Some(argument)), None),
                // Truncated: only the opcode byte is consumed, the tail is rescanned.
                None => (
                    DecodedInstruction::known(opcode, offset, None),
                    Some(DisasmError::IncompletePush {
                        name: opcode.name,
                        offset,
                        missing: size,
                    }),
                ),
            }
        }
        _ => (DecodedInstruction::known(opcode, offset, None), None),
    }
}
