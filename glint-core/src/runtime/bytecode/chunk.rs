//! Bytecode chunk

use super::lines::LineIndex;
use super::OpCode;
use crate::runtime::Value;
use thiserror::Error;

/// Largest constant pool a chunk can address
pub const MAX_CONSTANTS: usize = u16::MAX as usize + 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkError {
    #[error("Too many constants in one chunk.")]
    TooManyConstants,
}

/// Bytecode chunk: instructions, constant pool and line index
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    /// Instruction bytes
    pub code: Vec<u8>,
    /// Constant pool
    pub constants: Vec<Value>,
    /// Source line of every instruction byte
    pub lines: LineIndex,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one byte
    pub fn write(&mut self, byte: u8, line: usize) {
        self.lines.record(self.code.len(), line);
        self.code.push(byte);
    }

    /// Append an operand-less instruction
    pub fn write_op(&mut self, op: OpCode, line: usize) {
        self.write(op as u8, line);
    }

    /// Append a u16 operand, little-endian
    pub fn write_u16(&mut self, value: u16, line: usize) {
        let [lo, hi] = value.to_le_bytes();
        self.write(lo, line);
        self.write(hi, line);
    }

    /// Add a constant and return its index. No deduplication.
    pub fn add_constant(&mut self, value: Value) -> Result<u16, ChunkError> {
        let idx = self.constants.len();
        if idx >= MAX_CONSTANTS {
            return Err(ChunkError::TooManyConstants);
        }
        self.constants.push(value);
        Ok(idx as u16)
    }

    /// Load the constant at `idx`, picking the short or wide form
    pub fn write_constant(&mut self, idx: u16, line: usize) {
        match u8::try_from(idx) {
            Ok(short) => {
                self.write_op(OpCode::Constant, line);
                self.write(short, line);
            }
            Err(_) => {
                self.write_op(OpCode::ConstantLong, line);
                self.write_u16(idx, line);
            }
        }
    }

    /// Add a constant and emit the load for it
    pub fn emit_constant(&mut self, value: Value, line: usize) -> Result<u16, ChunkError> {
        let idx = self.add_constant(value)?;
        self.write_constant(idx, line);
        Ok(idx)
    }

    /// Source line of the instruction byte at `offset`
    pub fn line_for(&self, offset: usize) -> Option<usize> {
        if offset >= self.code.len() {
            return None;
        }
        self.lines.line_for(offset)
    }

    /// Read a u16 operand at `offset`
    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        let bytes = self.code.get(offset..offset + 2)?;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_op() {
        let mut chunk = Chunk::new();
        chunk.write_op(OpCode::Add, 1);
        assert_eq!(chunk.code, vec![OpCode::Add as u8]);
        assert_eq!(chunk.line_for(0), Some(1));
    }

    #[test]
    fn test_constant() {
        let mut chunk = Chunk::new();
        let idx = chunk.add_constant(Value::Number(42.0)).unwrap();
        assert_eq!(idx, 0);
        assert_eq!(chunk.constants[0], Value::Number(42.0));
    }

    #[test]
    fn test_short_and_long_constant_forms() {
        let mut chunk = Chunk::new();
        for i in 0..=256 {
            chunk.add_constant(Value::Number(i as f64)).unwrap();
        }
        chunk.write_constant(255, 1);
        chunk.write_constant(256, 1);
        assert_eq!(
            chunk.code,
            vec![
                OpCode::Constant as u8,
                255,
                OpCode::ConstantLong as u8,
                0x00,
                0x01
            ]
        );
        assert_eq!(chunk.read_u16(3), Some(256));
    }

    #[test]
    fn test_constant_pool_limit() {
        let mut chunk = Chunk::new();
        chunk.constants = vec![Value::Nil; MAX_CONSTANTS];
        assert_eq!(
            chunk.add_constant(Value::Nil),
            Err(ChunkError::TooManyConstants)
        );
        assert_eq!(chunk.constants.len(), MAX_CONSTANTS);
    }

    #[test]
    fn test_line_for_out_of_range() {
        let mut chunk = Chunk::new();
        assert_eq!(chunk.line_for(0), None);
        chunk.emit_constant(Value::Nil, 7).unwrap();
        assert_eq!(chunk.line_for(1), Some(7));
        assert_eq!(chunk.line_for(2), None);
    }

    #[test]
    fn test_lines_are_sparse() {
        let mut chunk = Chunk::new();
        chunk.emit_constant(Value::Number(1.0), 1).unwrap();
        chunk.emit_constant(Value::Number(2.0), 1).unwrap();
        chunk.write_op(OpCode::Add, 1);
        chunk.write_op(OpCode::Print, 2);
        assert_eq!(chunk.lines.len(), 2);
        assert_eq!(chunk.line_for(4), Some(1));
        assert_eq!(chunk.line_for(5), Some(2));
    }
}
