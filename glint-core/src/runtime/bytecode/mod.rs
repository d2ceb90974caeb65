//! Bytecode definitions

pub mod chunk;
pub mod disasm;
pub mod lines;

pub use chunk::{Chunk, ChunkError};
pub use disasm::{disassemble, disassemble_instruction};
pub use lines::LineIndex;

/// Operation codes
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpCode {
    // ===== Control =====
    Return = 0x00,

    // ===== Constants (0x01-0x0F) =====
    Constant = 0x01, // + u8 index
    ConstantLong,    // + u16 index
    Nil,
    True,
    False,

    // ===== Stack (0x10-0x1F) =====
    Pop = 0x10,

    // ===== Globals (0x20-0x2F), all + u16 name index =====
    GetGlobal = 0x20,
    DefineGlobal,
    SetGlobal,

    // ===== Comparison (0x30-0x3F) =====
    Equal = 0x30,
    Greater,
    Less,

    // ===== Arithmetic (0x40-0x4F) =====
    Add = 0x40,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Not,
    Negate,

    // ===== Output =====
    Print = 0x50,
}

impl OpCode {
    /// Mnemonic, as printed by the disassembler
    pub fn name(&self) -> &'static str {
        match self {
            OpCode::Return => "OP_RETURN",
            OpCode::Constant => "OP_CONSTANT",
            OpCode::ConstantLong => "OP_CONSTANT_LONG",
            OpCode::Nil => "OP_NIL",
            OpCode::True => "OP_TRUE",
            OpCode::False => "OP_FALSE",
            OpCode::Pop => "OP_POP",
            OpCode::GetGlobal => "OP_GET_GLOBAL",
            OpCode::DefineGlobal => "OP_DEFINE_GLOBAL",
            OpCode::SetGlobal => "OP_SET_GLOBAL",
            OpCode::Equal => "OP_EQUAL",
            OpCode::Greater => "OP_GREATER",
            OpCode::Less => "OP_LESS",
            OpCode::Add => "OP_ADD",
            OpCode::Subtract => "OP_SUBTRACT",
            OpCode::Multiply => "OP_MULTIPLY",
            OpCode::Divide => "OP_DIVIDE",
            OpCode::Modulo => "OP_MODULO",
            OpCode::Not => "OP_NOT",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Print => "OP_PRINT",
        }
    }

    /// Operand size (bytes)
    pub fn operand_size(&self) -> usize {
        match self {
            OpCode::Constant => 1,
            OpCode::ConstantLong
            | OpCode::GetGlobal
            | OpCode::DefineGlobal
            | OpCode::SetGlobal => 2,
            _ => 0,
        }
    }

    /// Whether the operand is an index into the constant pool
    pub fn has_constant_operand(&self) -> bool {
        self.operand_size() > 0
    }
}

impl TryFrom<u8> for OpCode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Self, u8> {
        let op = match byte {
            0x00 => OpCode::Return,
            0x01 => OpCode::Constant,
            0x02 => OpCode::ConstantLong,
            0x03 => OpCode::Nil,
            0x04 => OpCode::True,
            0x05 => OpCode::False,
            0x10 => OpCode::Pop,
            0x20 => OpCode::GetGlobal,
            0x21 => OpCode::DefineGlobal,
            0x22 => OpCode::SetGlobal,
            0x30 => OpCode::Equal,
            0x31 => OpCode::Greater,
            0x32 => OpCode::Less,
            0x40 => OpCode::Add,
            0x41 => OpCode::Subtract,
            0x42 => OpCode::Multiply,
            0x43 => OpCode::Divide,
            0x44 => OpCode::Modulo,
            0x45 => OpCode::Not,
            0x46 => OpCode::Negate,
            0x50 => OpCode::Print,
            other => return Err(other),
        };
        Ok(op)
    }
}
