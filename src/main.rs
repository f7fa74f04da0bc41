//! evm-lens - EVM bytecode analyzer
//!
//! Entry point that handles CLI argument parsing and switches between
//! one-shot analysis and the interactive shell.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use evm_lens::app::{write_output, AppState};
use evm_lens::input::PrefixPolicy;
use evm_lens::report::{OutputFormat, RenderOptions, MAX_INDENT};
use evm_lens::ui::cli::run_cli;

/// evm-lens: EVM bytecode disassembler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bytecode as hex text (0x prefix optional unless --strict)
    #[arg(conflicts_with = "file")]
    bytecode: Option<String>,

    /// Read bytecode hex text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Single-line JSON output
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Spaces per indentation level for JSON output (0-16)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=MAX_INDENT as i64))]
    indent: u8,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Require the 0x prefix
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Start the interactive shell
    #[arg(short, long, default_value_t = false, conflicts_with_all = ["bytecode", "file"])]
    interactive: bool,

    /// Verbose report and log level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    // 1. Parse command line arguments
    let args = Args::parse();

    // 2. Initialize logger with verbosity level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        },
    ))
    .init();

    log::debug!("Arguments: {:?}", args);

    let options = RenderOptions {
        format: args.format,
        compact: args.compact,
        indent: usize::from(args.indent),
        verbose: args.verbose > 0,
    };
    let prefix = if args.strict {
        PrefixPolicy::Required
    } else {
        PrefixPolicy::Optional
    };
    let mut state = AppState::new(options, prefix);

    // 3. Branch based on execution mode
    let rendered = match (&args.bytecode, &args.file) {
        (Some(bytecode), _) if !args.interactive => {
            state.analyze(bytecode).context("Invalid bytecode")?
        }
        (None, Some(path)) if !args.interactive => state
            .analyze_file(path)
            .with_context(|| format!("Failed to analyze {}", path.display()))?,
        _ => {
            println!("[*] evm-lens v{} - Interactive Mode", env!("CARGO_PKG_VERSION"));
            return run_cli(&mut state);
        }
    };

    write_output(&rendered, args.output.as_deref())
        .context("Failed to write report")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_range() {
        let args = Args::try_parse_from(["evm-lens", "--indent", "16", "0x00"]).unwrap();
        assert_eq!(args.indent, 16);
        assert!(Args::try_parse_from(["evm-lens", "--indent", "17", "0x00"]).is_err());
        assert!(Args::try_parse_from(["evm-lens", "--indent", "18446744073709551615", "0x00"]).is_err());
    }
}
