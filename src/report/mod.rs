//! Report rendering - JSON and text output for a disassembly
//!
//! JSON layout (key order is stable):
//! {
//!   "bytecode": "0x...",
//!   "length": <bytes>,
//!   "opcodes": [ { "offset", "opcode", "value", "description", "argument"? }, ... ],
//!   "metadata": { "total_opcodes": <n>, "parsing_errors": [ "...", ... ] },
//!   "input": { "original", "normalized", "has_errors" }   (verbose only)
//! }

use serde::Serialize;

use crate::disasm::{DecodedInstruction, Disassembly, DisasmError};
use crate::error::Result;

/// Widest accepted JSON indentation
pub const MAX_INDENT: usize = 16;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Rendering settings shared by the CLI and the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Single-line JSON
    pub compact: bool,
    /// Spaces per level for indented JSON, at most [`MAX_INDENT`]
    pub indent: usize,
    /// Echo the original and normalized input
    pub verbose: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            compact: false,
            indent: 2,
            verbose: false,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    bytecode: &'a str,
    length: usize,
    opcodes: &'a [DecodedInstruction],
    metadata: Metadata<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<InputEcho<'a>>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    total_opcodes: usize,
    parsing_errors: &'a [DisasmError],
}

#[derive(Serialize)]
struct InputEcho<'a> {
    original: &'a str,
    normalized: &'a str,
    has_errors: bool,
}

/// Render a disassembly; `original` is the text the user supplied
pub fn render(disassembly: &Disassembly, original: &str, options: &RenderOptions) -> Result<String> {
    match options.format {
        OutputFormat::Json => render_json(disassembly, original, options),
        OutputFormat::Text => Ok(render_text(disassembly, original, options)),
    }
}

pub fn render_json(disassembly: &Disassembly, original: &str, options: &RenderOptions) -> Result<String> {
    let report = Report {
        bytecode: &disassembly.normalized_input,
        length: disassembly.byte_length,
        opcodes: &disassembly.instructions,
        metadata: Metadata {
            total_opcodes: disassembly.instruction_count(),
            parsing_errors: &disassembly.diagnostics,
        },
        input: options.verbose.then(|| InputEcho {
            original,
            normalized: &disassembly.normalized_input,
            has_errors: disassembly.has_diagnostics(),
        }),
    };

    if options.compact {
        return Ok(serde_json::to_string(&report)?);
    }

    let indent = " ".repeat(options.indent.min(MAX_INDENT));
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    report.serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn render_text(disassembly: &Disassembly, original: &str, options: &RenderOptions) -> String {
    let mut output = String::new();

    if options.verbose {
        output.push_str(&format!("; input:      {}\n", original));
        output.push_str(&format!("; normalized: {}\n", disassembly.normalized_input));
        output.push_str(&format!("; has errors: {}\n", disassembly.has_diagnostics()));
    }

    output.push_str(&format!(
        "; {} bytes, {} instructions\n",
        disassembly.byte_length,
        disassembly.instruction_count()
    ));
    output.push_str(&disassembly.format_listing());

    if disassembly.has_diagnostics() {
        output.push_str(&format!("; {} parsing errors\n", disassembly.diagnostics.len()));
        for diagnostic in &disassembly.diagnostics {
            output.push_str(&format!(";   {}\n", diagnostic));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disasm::disassemble;
    use serde_json::Value;

    fn parse(rendered: &str) -> Value {
        serde_json::from_str(rendered).expect("valid JSON")
    }

    #[test]
    fn render_json_basic() {
        let result = disassemble(&[0x60, 0x80, 0x60, 0x40, 0x52]);
        let rendered = render(&result, "0x6080604052", &RenderOptions::default()).unwrap();

        let v = parse(&rendered);
        assert_eq!(v["bytecode"], "0x6080604052");
        assert_eq!(v["length"], 5);
        assert_eq!(v["metadata"]["total_opcodes"], 3);
        assert_eq!(v["metadata"]["parsing_errors"].as_array().map(Vec::len), Some(0));

        let opcodes = v["opcodes"].as_array().expect("opcodes array");
        assert_eq!(opcodes.len(), 3);
        assert_eq!(opcodes[0]["opcode"], "PUSH1");
        assert_eq!(opcodes[0]["value"], "0x60");
        assert_eq!(opcodes[0]["argument"], "0x80");
        assert_eq!(opcodes[2]["offset"], 4);
        assert!(opcodes[2].get("argument").is_none());
        assert!(v.get("input").is_none());
    }

    #[test]
    fn render_json_key_order() {
        let result = disassemble(&[0x00]);
        let rendered = render(&result, "0x00", &RenderOptions::default()).unwrap();

        let bytecode = rendered.find("\"bytecode\"").unwrap();
        let length = rendered.find("\"length\"").unwrap();
        let opcodes = rendered.find("\"opcodes\"").unwrap();
        let metadata = rendered.find("\"metadata\"").unwrap();
        assert!(bytecode < length && length < opcodes && opcodes < metadata);
        assert!(rendered.contains("\n  \"bytecode\""));
    }

    #[test]
    fn render_json_truncated_push_has_no_argument() {
        let result = disassemble(&[0x60]);
        let rendered = render(&result, "0x60", &RenderOptions::default()).unwrap();

        let v = parse(&rendered);
        assert!(v["opcodes"][0].get("argument").is_none());
        let errors = v["metadata"]["parsing_errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].as_str().unwrap().contains("PUSH1"));
    }

    #[test]
    fn render_json_compact_and_indent() {
        let result = disassemble(&[0x60, 0x80]);

        let compact = RenderOptions {
            compact: true,
            ..RenderOptions::default()
        };
        let rendered = render(&result, "0x6080", &compact).unwrap();
        assert!(!rendered.contains('\n'));

        let wide = RenderOptions {
            indent: 4,
            ..RenderOptions::default()
        };
        let rendered = render(&result, "0x6080", &wide).unwrap();
        assert!(rendered.contains("\n    \"bytecode\""));
    }

    #[test]
    fn render_json_clamps_indent() {
        let result = disassemble(&[0x00]);
        let options = RenderOptions {
            indent: usize::MAX,
            ..RenderOptions::default()
        };
        let rendered = render(&result, "0x00", &options).unwrap();

        let widest = format!("\n{}\"bytecode\"", " ".repeat(MAX_INDENT));
        assert!(rendered.contains(&widest));
    }

    #[test]
    fn render_json_verbose_echoes_input() {
        let result = disassemble(&[0x0C]);
        let options = RenderOptions {
            verbose: true,
            ..RenderOptions::default()
        };
        let rendered = render(&result, "0x0C", &options).unwrap();

        let v = parse(&rendered);
        assert_eq!(v["input"]["original"], "0x0C");
        assert_eq!(v["input"]["normalized"], "0x0c");
        assert_eq!(v["input"]["has_errors"], true);
    }

    #[test]
    fn render_text_listing() {
        let result = disassemble(&[0x60, 0x80, 0x0C]);
        let options = RenderOptions {
            format: OutputFormat::Text,
            verbose: true,
            ..RenderOptions::default()
        };
        let rendered = render(&result, "0x60800c", &options).unwrap();

        assert!(rendered.contains("; input:      0x60800c"));
        assert!(rendered.contains("; 3 bytes, 2 instructions"));
        assert!(rendered.contains("PUSH1"));
        assert!(rendered.contains("UNKNOWN"));
        assert!(rendered.contains("; 1 parsing errors"));
        assert!(rendered.contains("Invalid byte 0x0c at offset 2"));
    }
}
