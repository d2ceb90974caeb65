//! Source-to-bytecode front end
//!
//! The scanner feeds tokens to a single-pass compiler that writes straight
//! into a [`Chunk`](crate::runtime::bytecode::Chunk).

pub mod lexer;
pub mod parser;

pub use parser::{
    compile, compile_with_config, CompileError, CompileOutput, Compiler, Diagnostic,
    DiagnosticLocation,
};
