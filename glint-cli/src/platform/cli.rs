//! CLI formatted output
//!
//! Error display with source context, and the JSON bytecode dump.

use clap::ValueEnum;
use glint_api::GlintError;
use glint_core::{Chunk, OpCode};
use serde_json::{json, Value as Json};

/// How errors are written to stderr
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ErrorFormat {
    /// Diagnostic lines followed by the surrounding source
    Text,
    /// One `ErrorReport` JSON object per error
    Json,
}

/// Print an error in the requested format
pub fn print_error(e: &GlintError, source: Option<&str>, format: ErrorFormat) {
    match format {
        ErrorFormat::Json => eprintln!("{}", e.to_report().to_json()),
        ErrorFormat::Text => {
            eprintln!("{}", e);
            if let (Some(line), Some(source)) = (e.line(), source) {
                print_source_context(source, line);
            }
        }
    }
}

/// Print the lines around an error line, marking the error line with `>`
pub fn print_source_context(source: &str, error_line: usize) {
    for line in source_context(source, error_line) {
        eprintln!("{}", line);
    }
}

fn source_context(source: &str, error_line: usize) -> Vec<String> {
    const CONTEXT_LINES: usize = 2;

    let lines: Vec<&str> = source.lines().collect();
    if error_line == 0 || error_line > lines.len() {
        return Vec::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(lines.len());
    let width = end_line.to_string().len();

    (start_line..=end_line)
        .map(|n| {
            let marker = if n == error_line { '>' } else { ' ' };
            format!("{marker} {n:>width$} | {}", lines[n - 1])
        })
        .collect()
}

/// JSON view of a chunk: constants and decoded instructions with lines
pub fn bytecode_json(chunk: &Chunk, name: &str) -> Json {
    let constants: Vec<Json> = chunk
        .constants
        .iter()
        .map(|v| json!({ "type": v.type_name(), "value": v.to_string() }))
        .collect();

    let mut instructions = Vec::new();
    let mut offset = 0;
    while offset < chunk.code.len() {
        let byte = chunk.code[offset];
        let line = chunk.line_for(offset);
        let Ok(op) = OpCode::try_from(byte) else {
            instructions.push(json!({ "offset": offset, "line": line, "opcode": null, "byte": byte }));
            offset += 1;
            continue;
        };

        let operand = match op.operand_size() {
            0 => None,
            1 => chunk.code.get(offset + 1).map(|&b| u16::from(b)),
            _ => chunk.read_u16(offset + 1),
        };
        let mut instr = json!({ "offset": offset, "line": line, "opcode": op.name() });
        if let Some(operand) = operand {
            instr["operand"] = json!(operand);
        }
        instructions.push(instr);
        offset += 1 + op.operand_size();
    }

    json!({
        "name": name,
        "constants": constants,
        "bytecode": instructions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::Value;

    #[test]
    fn test_source_context_marks_error_line() {
        let source = "a\nb\nc\nd\ne\nf";
        assert_eq!(
            source_context(source, 4),
            vec!["  2 | b", "  3 | c", "> 4 | d", "  5 | e", "  6 | f"]
        );
        assert_eq!(source_context(source, 1), vec!["> 1 | a", "  2 | b", "  3 | c"]);
        assert!(source_context(source, 9).is_empty());
    }

    #[test]
    fn test_bytecode_json() {
        let mut chunk = Chunk::new();
        let idx = chunk.add_constant(Value::Number(1.5)).unwrap();
        chunk.write_constant(idx, 1);
        chunk.write_op(OpCode::Print, 1);
        chunk.write_op(OpCode::Return, 2);

        let dump = bytecode_json(&chunk, "script");
        assert_eq!(dump["name"], "script");
        assert_eq!(dump["constants"][0]["value"], "1.5");
        assert_eq!(dump["constants"][0]["type"], "number");
        assert_eq!(dump["bytecode"][0]["opcode"], "OP_CONSTANT");
        assert_eq!(dump["bytecode"][0]["operand"], 0);
        assert_eq!(dump["bytecode"][1]["offset"], 2);
        assert!(dump["bytecode"][1].get("operand").is_none());
        assert_eq!(dump["bytecode"][2]["line"], 2);
    }
}
