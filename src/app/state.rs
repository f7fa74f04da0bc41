//! Shared application state
//!
//! Holds the settings used by both the one-shot CLI and the interactive
//! shell, and runs the clean -> validate -> disassemble -> render pipeline.

use std::fs;
use std::path::Path;

use crate::disasm::disassemble;
use crate::error::Result;
use crate::input::{self, PrefixPolicy};
use crate::report::{self, RenderOptions};

/// Shared application state
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// How results are rendered
    pub options: RenderOptions,
    /// Whether the `0x` prefix is mandatory
    pub prefix: PrefixPolicy,
    /// Successful analyses so far
    pub analyses: usize,
    /// Whether the last analysis produced diagnostics
    pub last_had_errors: bool,
}

impl AppState {
    pub fn new(options: RenderOptions, prefix: PrefixPolicy) -> Self {
        Self {
            options,
            prefix,
            ..Self::default()
        }
    }

    /// Analyze bytecode given as hex text and return the rendered report
    pub fn analyze(&mut self, raw: &str) -> Result<String> {
        let original = raw.trim();
        log::debug!("Analyzing input ({} chars)", original.len());

        let bytes = input::decode(original, self.prefix)?;
        let disassembly = disassemble(&bytes);
        let rendered = report::render(&disassembly, original, &self.options)?;

        log::info!(
            "Analyzed {} bytes: {} instructions, {} parsing errors",
            disassembly.byte_length,
            disassembly.instruction_count(),
            disassembly.diagnostics.len()
        );

        self.analyses += 1;
        self.last_had_errors = disassembly.has_diagnostics();
        Ok(rendered)
    }

    /// Analyze bytecode stored as hex text in a file
    pub fn analyze_file<P: AsRef<Path>>(&mut self, path: P) -> Result<String> {
        log::info!("Loading bytecode from {}", path.as_ref().display());
        let text = fs::read_to_string(path)?;
        self.analyze(&text)
    }
}

/// Write a rendered report to a file, or stdout when `path` is `None`
pub fn write_output(rendered: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{}\n", rendered))?;
            log::info!("Wrote report to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
