//! Virtual machine
//!
//! One VM owns one heap, one intern set and one global table. Successive
//! chunks run against the same state, so a REPL keeps its globals between
//! lines.

use crate::compiler::{self, CompileError};
use crate::runtime::bytecode::Chunk;
use crate::runtime::error::RuntimeError;
use crate::runtime::heap::Heap;
use crate::runtime::stack::Stack;
use crate::runtime::table::Table;
use crate::runtime::value::Value;
use glint_config::{CompilerConfig, LimitConfig};
use std::io::{self, Write};
use tracing::debug;

mod execution;
mod operators;

/// Where `print` writes
#[derive(Debug)]
pub enum Output {
    Stdout(io::Stdout),
    /// In-memory buffer, for embedding and tests
    Capture(Vec<u8>),
}

impl Output {
    pub fn stdout() -> Self {
        Output::Stdout(io::stdout())
    }

    pub fn capture() -> Self {
        Output::Capture(Vec::new())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(out) => out.write(buf),
            Output::Capture(buffer) => buffer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(out) => out.flush(),
            Output::Capture(_) => Ok(()),
        }
    }
}

/// Outcome of compiling and running one unit of source
#[derive(Debug, Clone, PartialEq)]
pub enum InterpretResult {
    Ok,
    CompileError(CompileError),
    RuntimeError(RuntimeError),
}

impl InterpretResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, InterpretResult::Ok)
    }
}

/// Virtual machine
#[derive(Debug)]
pub struct VM {
    /// Operand stack
    pub(crate) stack: Stack,
    /// Global variables
    pub(crate) globals: Table,
    /// Object heap and intern set
    pub(crate) heap: Heap,
    pub(crate) output: Output,
    compiler: CompilerConfig,
}

impl VM {
    /// VM with default limits, printing to stdout
    pub fn new() -> Self {
        Self::with_config(&LimitConfig::default(), Output::stdout())
    }

    pub fn with_config(limits: &LimitConfig, output: Output) -> Self {
        Self {
            stack: Stack::new(limits.initial_stack_capacity, limits.max_stack_size),
            globals: Table::new(),
            heap: Heap::new(),
            output,
            compiler: CompilerConfig::default(),
        }
    }

    /// VM with default limits whose output is kept in memory
    pub fn capturing() -> Self {
        Self::with_config(&LimitConfig::default(), Output::capture())
    }

    pub fn set_compiler_config(&mut self, config: CompilerConfig) {
        self.compiler = config;
    }

    // ==================== Pipeline ====================

    /// Compile source against this VM's heap, so its strings share the VM's
    /// intern set
    pub fn compile(&mut self, source: &str) -> Result<Chunk, CompileError> {
        compiler::compile_with_config(source, &mut self.heap, &self.compiler)
    }

    /// Execute a chunk to completion. Returns the value popped by the final
    /// `return`, if any.
    pub fn run(&mut self, chunk: &Chunk) -> Result<Option<Value>, RuntimeError> {
        debug!(
            target: "glint::vm",
            code_len = chunk.code.len(),
            constants = chunk.constants.len(),
            "run"
        );
        let result = execution::run(self, chunk);
        match &result {
            Ok(_) => debug!(target: "glint::vm", globals = self.globals.len(), "halt"),
            Err(err) => {
                debug!(target: "glint::vm", line = ?err.line, error = %err.kind, "runtime error");
                self.stack.clear();
            }
        }
        result
    }

    /// Compile then run
    pub fn interpret(&mut self, source: &str) -> InterpretResult {
        let chunk = match self.compile(source) {
            Ok(chunk) => chunk,
            Err(err) => return InterpretResult::CompileError(err),
        };
        match self.run(&chunk) {
            Ok(_) => InterpretResult::Ok,
            Err(err) => InterpretResult::RuntimeError(err),
        }
    }

    // ==================== Accessors ====================

    /// Captured output so far, leaving the buffer empty. Always empty when
    /// printing to stdout.
    pub fn take_output(&mut self) -> String {
        match &mut self.output {
            Output::Capture(buffer) => String::from_utf8_lossy(&std::mem::take(buffer)).into_owned(),
            Output::Stdout(_) => String::new(),
        }
    }

    /// Sink that `print` writes to
    pub fn output_mut(&mut self) -> &mut Output {
        &mut self.output
    }

    pub fn global(&self, name: &str) -> Option<&Value> {
        let hash = crate::runtime::object::hash_string(name.as_bytes());
        let key = self.heap.strings().find_interned(name, hash)?;
        self.globals.get(&key)
    }

    pub fn globals(&self) -> &Table {
        &self.globals
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    /// Operand stack, bottom to top
    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }
}

impl Default for VM {
    fn default() -> Self {
        Self::new()
    }
}
