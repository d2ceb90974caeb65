//! API types
//!
//! Inputs and outputs of compilation and execution.

use glint_core::Chunk;

/// Compile output
#[derive(Debug)]
pub struct CompileOutput {
    /// Bytecode chunk
    pub chunk: Chunk,
}

/// Execute output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteOutput {
    /// Value popped by the final `return`, rendered
    pub value: Option<String>,
    /// Captured program output (`print` plus any bytecode dump)
    pub stdout: String,
}
