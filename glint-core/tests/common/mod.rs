//! Test helpers
//!
//! End-to-end helpers: compile and run Glint source on a capturing VM.

#![allow(dead_code)]

use glint_core::runtime::{InterpretResult, RuntimeErrorKind, VM};
use glint_core::CompileError;

/// Output of a successful run
#[derive(Debug)]
pub struct ExecResult {
    pub output: String,
}

#[derive(Debug)]
pub enum ExecError {
    Compile(CompileError),
    Runtime {
        kind: RuntimeErrorKind,
        line: Option<usize>,
        /// Output printed before the error
        output: String,
    },
}

/// Compile and run on a fresh VM
///
/// # Example
/// ```
/// let result = run_code("print 1 + 2;").unwrap();
/// assert_eq!(result.output, "3\n");
/// ```
pub fn run_code(code: &str) -> Result<ExecResult, ExecError> {
    let mut vm = VM::capturing();
    run_on(&mut vm, code)
}

/// Compile and run on an existing VM, keeping its globals
pub fn run_on(vm: &mut VM, code: &str) -> Result<ExecResult, ExecError> {
    match vm.interpret(code) {
        InterpretResult::Ok => Ok(ExecResult {
            output: vm.take_output(),
        }),
        InterpretResult::CompileError(err) => Err(ExecError::Compile(err)),
        InterpretResult::RuntimeError(err) => Err(ExecError::Runtime {
            kind: err.kind,
            line: err.line,
            output: vm.take_output(),
        }),
    }
}

/// Printed lines of a run that must succeed
pub fn output_lines(code: &str) -> Vec<String> {
    match run_code(code) {
        Ok(result) => result.output.lines().map(str::to_string).collect(),
        Err(err) => panic!("run failed: {err:?}"),
    }
}

/// Kind and line of a run that must fail at runtime
pub fn runtime_error(code: &str) -> (RuntimeErrorKind, Option<usize>) {
    match run_code(code) {
        Err(ExecError::Runtime { kind, line, .. }) => (kind, line),
        other => panic!("expected runtime error, got {other:?}"),
    }
}

/// Rendered diagnostics of a compile that must fail
pub fn compile_errors(code: &str) -> Vec<String> {
    match run_code(code) {
        Err(ExecError::Compile(err)) => err.diagnostics.iter().map(|d| d.to_string()).collect(),
        other => panic!("expected compile error, got {other:?}"),
    }
}
