//! Command processing
//!
//! Command grammar for the interactive shell. Anything that is not a known
//! command word is treated as bytecode.

use clap::ValueEnum;

use crate::disasm::opcodes::{self, Opcode};
use crate::report::{OutputFormat, MAX_INDENT};

/// Shell commands that can be executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Analyze bytecode text
    Analyze(String),
    /// Analyze bytecode stored in a file: load <path>
    Load(String),
    /// Show an opcode definition: opcode <name|0xNN>
    Opcode(String),
    /// Set or toggle compact JSON: compact [on|off]
    Compact(Option<bool>),
    /// Set or toggle verbose reports: verbose [on|off]
    Verbose(Option<bool>),
    /// Select output format: format json|text
    Format(OutputFormat),
    /// JSON indentation width: indent <n>
    Indent(usize),
    /// Show help
    Help,
    /// Clear the screen
    Clear,
    /// Quit the shell
    Quit,
    /// Blank input
    Empty,
    /// Known command with a bad or missing argument
    Invalid(String),
}

/// Parse a command string into AppCommand
pub fn parse_command(input: &str) -> AppCommand {
    let input = input.trim();
    if input.is_empty() {
        return AppCommand::Empty;
    }

    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts.first().copied().unwrap_or("").to_ascii_lowercase();
    let arg = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "help" | "?" => AppCommand::Help,
        "quit" | "exit" | "q" => AppCommand::Quit,
        "clear" => AppCommand::Clear,
        "load" | "open" | "o" => match arg {
            Some(path) => AppCommand::Load(path.to_string()),
            None => AppCommand::Invalid("load requires a path".into()),
        },
        "opcode" | "op" => match arg {
            Some(query) => AppCommand::Opcode(query.to_string()),
            None => AppCommand::Invalid("opcode requires a name or byte".into()),
        },
        "compact" => match parse_switch(arg) {
            Ok(value) => AppCommand::Compact(value),
            Err(msg) => AppCommand::Invalid(msg),
        },
        "verbose" => match parse_switch(arg) {
            Ok(value) => AppCommand::Verbose(value),
            Err(msg) => AppCommand::Invalid(msg),
        },
        "format" => match arg.map(|s| OutputFormat::from_str(s, true)) {
            Some(Ok(format)) => AppCommand::Format(format),
            _ => AppCommand::Invalid("format requires 'json' or 'text'".into()),
        },
        "indent" => match arg.and_then(|s| s.parse::<usize>().ok()) {
            Some(width) if width <= MAX_INDENT => AppCommand::Indent(width),
            _ => AppCommand::Invalid(format!(
                "indent requires a number between 0 and {}",
                MAX_INDENT
            )),
        },
        _ => AppCommand::Analyze(input.to_string()),
    }
}

/// Parse an optional on/off argument; `None` means toggle
fn parse_switch(arg: Option<&str>) -> Result<Option<bool>, String> {
    match arg.map(str::to_ascii_lowercase).as_deref() {
        None => Ok(None),
        Some("on" | "true" | "1") => Ok(Some(true)),
        Some("off" | "false" | "0") => Ok(Some(false)),
        Some(other) => Err(format!("expected 'on' or 'off', got '{}'", other)),
    }
}

/// Resolve an opcode from a mnemonic or a hex byte (0x prefix required)
pub fn resolve_opcode(query: &str) -> Option<Opcode> {
    let query = query.trim();
    if let Some(hex) = query.strip_prefix("0x").or_else(|| query.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok().and_then(opcodes::lookup);
    }
    opcodes::lookup_name(query)
}
