//! Glint Core - scanner, compiler and virtual machine (pure logic, no IO)
//!
//! Contains the scanner, the single-pass bytecode compiler, the value and
//! object model, and the virtual machine. The only output is the VM's
//! `print` sink, which can be pointed at an in-memory buffer.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod compiler;
pub mod runtime;

// Re-export common types
pub use compiler::{compile, compile_with_config, CompileError, Diagnostic};
pub use runtime::bytecode::{disassemble, Chunk, OpCode};
pub use runtime::value::Value;
pub use runtime::vm::{InterpretResult, Output, VM};
pub use runtime::{RuntimeError, RuntimeErrorKind};

// Re-export config types from glint-config
pub use glint_config::{CompilerConfig, LimitConfig, Phase};
