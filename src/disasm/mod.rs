//! Disassembly module - EVM bytecode decoding
//!
//! The opcode table is the only long-lived state. Every disassembly call is
//! an independent pure function of its input.

pub mod engine;
pub mod opcodes;

#[cfg(test)]
mod tests;

pub use engine::{disassemble, DecodedInstruction, Disassembly, DisasmError};
pub use opcodes::{Opcode, OpcodeKind, EVM_VERSION};
