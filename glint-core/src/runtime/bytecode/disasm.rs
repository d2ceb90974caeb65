//! Disassembler
//!
//! Read-only text view of a chunk, one instruction per line:
//!
//! ```text
//! == script ==
//! 0000    1 OP_CONSTANT         0 '1.2'
//! 0002    | OP_NEGATE
//! ```

use super::chunk::Chunk;
use super::OpCode;
use std::fmt::Write;

/// Render the whole chunk under a `== label ==` header
pub fn disassemble(chunk: &Chunk, label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {label} ==");
    let mut offset = 0;
    while offset < chunk.code.len() {
        offset = disassemble_instruction(chunk, offset, &mut out);
    }
    out
}

/// Render the instruction at `offset` and return the offset of the next one
pub fn disassemble_instruction(chunk: &Chunk, offset: usize, out: &mut String) -> usize {
    let _ = write!(out, "{offset:04} ");

    let line = chunk.line_for(offset);
    if offset > 0 && line == chunk.line_for(offset - 1) {
        out.push_str("   | ");
    } else {
        match line {
            Some(line) => {
                let _ = write!(out, "{line:4} ");
            }
            None => out.push_str("   ? "),
        }
    }

    let byte = chunk.code[offset];
    let op = match OpCode::try_from(byte) {
        Ok(op) => op,
        Err(byte) => {
            let _ = writeln!(out, "Unknown opcode {byte}");
            return offset + 1;
        }
    };

    match op.operand_size() {
        0 => {
            let _ = writeln!(out, "{}", op.name());
            offset + 1
        }
        size => {
            let operand = match size {
                1 => chunk.code.get(offset + 1).map(|&b| b as u16),
                _ => chunk.read_u16(offset + 1),
            };
            let Some(idx) = operand else {
                let _ = writeln!(out, "{} <truncated>", op.name());
                return chunk.code.len();
            };
            let _ = write!(out, "{:<16} {idx:4} ", op.name());
            match chunk.constants.get(idx as usize) {
                Some(value) => {
                    let _ = writeln!(out, "'{value}'");
                }
                None => out.push_str("<invalid>\n"),
            }
            offset + 1 + size
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::Value;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_listing_format() {
        let mut chunk = Chunk::new();
        chunk.emit_constant(Value::Number(1.2), 123).unwrap();
        chunk.write_op(OpCode::Negate, 123);
        chunk.write_op(OpCode::Return, 124);

        let expected = "\
== test chunk ==
0000  123 OP_CONSTANT         0 '1.2'
0002    | OP_NEGATE
0003  124 OP_RETURN
";
        assert_eq!(disassemble(&chunk, "test chunk"), expected);
    }

    #[test]
    fn test_long_constant_and_global() {
        let mut chunk = Chunk::new();
        chunk.constants = vec![Value::Nil; 300];
        chunk.constants[299] = Value::Bool(true);
        chunk.write_constant(299, 1);
        chunk.write_op(OpCode::DefineGlobal, 1);
        chunk.write_u16(299, 1);

        let mut out = String::new();
        let next = disassemble_instruction(&chunk, 0, &mut out);
        assert_eq!(next, 3);
        assert_eq!(out, "0000    1 OP_CONSTANT_LONG  299 'true'\n");

        out.clear();
        assert_eq!(disassemble_instruction(&chunk, next, &mut out), 6);
        assert_eq!(out, "0003    | OP_DEFINE_GLOBAL  299 'true'\n");
    }

    #[test]
    fn test_unknown_and_truncated() {
        let mut chunk = Chunk::new();
        chunk.write(0xEE, 1);
        chunk.write_op(OpCode::Constant, 1);
        let listing = disassemble(&chunk, "bad");
        assert_eq!(
            listing,
            "== bad ==\n0000    1 Unknown opcode 238\n0001    | OP_CONSTANT <truncated>\n"
        );
    }
}
