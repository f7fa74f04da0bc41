//! CLI - reedline-based interactive shell
//!
//! Reads bytecode or shell commands line by line, analyzes bytecode with the
//! shared pipeline and prints the rendered report.

use anyhow::Result;
use colored::Colorize;
use reedline::{Prompt, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal};
use std::borrow::Cow;

use crate::app::{parse_command, resolve_opcode, AppCommand, AppState};
use crate::disasm::opcodes;
use crate::report::OutputFormat;

const GOODBYE_MESSAGE: &str = "Thank you for using evm-lens!";

/// Custom prompt for the evm-lens shell
pub struct LensPrompt {
    /// Successful analyses so far
    analyses: usize,
    /// Whether the last analysis produced diagnostics
    had_errors: bool,
}

impl LensPrompt {
    pub fn new() -> Self {
        Self {
            analyses: 0,
            had_errors: false,
        }
    }

    pub fn update(&mut self, state: &AppState) {
        self.analyses = state.analyses;
        self.had_errors = state.last_had_errors;
    }
}

impl Default for LensPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for LensPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let status = if self.had_errors { "err" } else { "evm" };
        Cow::Owned(format!("[{}:{}]", status, self.analyses))
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _prompt_mode: reedline::PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "(failed) ",
        };
        Cow::Owned(format!("(search: {}{}) ", prefix, history_search.term))
    }
}

/// What the shell should do after a command
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    /// Rendered analysis report
    Report(String),
    /// Informational message
    Info(String),
    /// Error shown to the user, the shell keeps running
    Error(String),
    Help,
    Clear,
    Quit,
}

/// Print the help message
fn print_help() {
    println!("{}", "evm-lens Shell Commands".bold().cyan());
    println!("{}", "═".repeat(50).cyan());

    println!("\n{}", "Analysis:".bold().yellow());
    println!("  {}      Disassemble bytecode (0x optional)", "<hex>".green());
    println!("  {}   Disassemble bytecode from a file", "load <path>".green());
    println!(
        "  {}  Show an opcode by name or byte",
        "opcode <op>".green()
    );

    println!("\n{}", "Output:".bold().yellow());
    println!("  {}  Toggle single-line JSON", "compact [on|off]".green());
    println!("  {}  Toggle input echo", "verbose [on|off]".green());
    println!("  {}  Select output format", "format json|text".green());
    println!("  {}        Set JSON indentation", "indent <n>".green());

    println!("\n{}", "Other:".bold().yellow());
    println!("  {}            Clear the screen", "clear".green());
    println!("  {}                Show this help", "?".green());
    println!("  {}                Quit", "q".green());
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Execute a parsed command against the shell state
pub fn execute_command(state: &mut AppState, cmd: AppCommand) -> Reply {
    match cmd {
        AppCommand::Analyze(input) => match state.analyze(&input) {
            Ok(rendered) => Reply::Report(rendered),
            Err(e) => Reply::Error(e.to_string()),
        },
        AppCommand::Load(path) => match state.analyze_file(&path) {
            Ok(rendered) => Reply::Report(rendered),
            Err(e) => Reply::Error(format!("{}: {}", path, e)),
        },
        AppCommand::Opcode(query) => match resolve_opcode(&query) {
            Some(op) => Reply::Info(format!(
                "0x{:02x}  {}  {}",
                op.byte, op.name, op.description
            )),
            None => Reply::Error(format!(
                "Unknown opcode '{}' ({} defined, {})",
                query,
                opcodes::entry_count(),
                opcodes::EVM_VERSION
            )),
        },
        AppCommand::Compact(value) => {
            state.options.compact = value.unwrap_or(!state.options.compact);
            Reply::Info(format!("Compact output {}", on_off(state.options.compact)))
        }
        AppCommand::Verbose(value) => {
            state.options.verbose = value.unwrap_or(!state.options.verbose);
            Reply::Info(format!("Verbose output {}", on_off(state.options.verbose)))
        }
        AppCommand::Format(format) => {
            state.options.format = format;
            let name = match format {
                OutputFormat::Json => "json",
                OutputFormat::Text => "text",
            };
            Reply::Info(format!("Output format: {}", name))
        }
        AppCommand::Indent(width) => {
            state.options.indent = width;
            Reply::Info(format!("JSON indentation: {} spaces", width))
        }
        AppCommand::Help => Reply::Help,
        AppCommand::Clear => Reply::Clear,
        AppCommand::Quit => Reply::Quit,
        AppCommand::Empty => Reply::Error("Bytecode cannot be empty".into()),
        AppCommand::Invalid(msg) => Reply::Error(msg),
    }
}

fn print_banner() {
    println!(
        "{}",
        "╔══════════════════════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║  evm-lens - EVM Bytecode Analyzer (Interactive Mode)         ║".cyan()
    );
    println!(
        "{}",
        "║  Enter bytecode to analyze. Type '?' for help, 'q' to quit   ║".cyan()
    );
    println!(
        "{}",
        "╚══════════════════════════════════════════════════════════════╝".cyan()
    );
}

/// Run the interactive shell
pub fn run_cli(state: &mut AppState) -> Result<()> {
    let mut line_editor = Reedline::create();
    let mut prompt = LensPrompt::new();

    print_banner();

    loop {
        prompt.update(state);
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let cmd = parse_command(&buffer);
                log::debug!("Shell command: {:?}", cmd);

                match execute_command(state, cmd) {
                    Reply::Report(rendered) => {
                        println!("{}", "✓ Bytecode validated successfully".green());
                        println!("\n{}", "Analysis Result:".bold());
                        println!("{}", "=".repeat(80));
                        println!("{}", rendered);
                        println!("{}\n", "=".repeat(80));
                    }
                    Reply::Info(msg) => println!("[*] {}", msg),
                    Reply::Error(msg) => println!("\n{} Error: {}\n", "[!]".red(), msg),
                    Reply::Help => print_help(),
                    Reply::Clear => {
                        line_editor.clear_screen()?;
                    }
                    Reply::Quit => {
                        println!("\n{}\n", GOODBYE_MESSAGE);
                        break;
                    }
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\n{}\n", GOODBYE_MESSAGE);
                break;
            }
        }
    }

    Ok(())
}
