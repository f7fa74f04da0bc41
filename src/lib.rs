//! evm-lens - EVM bytecode disassembler
//!
//! Decodes raw EVM bytecode into an instruction listing with offsets, PUSH
//! arguments and non-fatal parsing diagnostics, and renders it as JSON or
//! text.
//!
//! ```
//! let bytes = evm_lens::input::decode("0x6080604052", Default::default()).unwrap();
//! let result = evm_lens::disasm::disassemble(&bytes);
//! assert_eq!(result.instruction_count(), 3);
//! ```

pub mod app;
pub mod disasm;
pub mod error;
pub mod input;
pub mod report;
pub mod ui;

pub use error::{Error, Result};
