//! Glint runtime
//!
//! Value model, heap, hash table, bytecode container and the virtual machine.

// ==================== Values ====================

pub mod object;
pub mod value;

pub use object::{ObjString, ObjType, Object};
pub use value::Value;

// ==================== Storage ====================

pub mod heap;
pub mod stack;
pub mod table;

pub use heap::Heap;
pub use stack::Stack;
pub use table::Table;

// ==================== Bytecode ====================

pub mod bytecode;

pub use bytecode::{disassemble, disassemble_instruction, Chunk, ChunkError, OpCode};

// ==================== Execution ====================

pub mod error;
pub mod vm;

pub use error::{RuntimeError, RuntimeErrorKind};
pub use vm::{InterpretResult, Output, VM};
