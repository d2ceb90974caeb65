//! Glint API - Execution orchestration layer
//!
//! Provides a unified execution interface, including:
//! - Execution flow orchestration (`Interpreter`, `run`)
//! - Configuration abstraction (`RunConfig`)
//! - Unified error handling (`GlintError`)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `run(source, &config)` API.

use std::io::Write;

use glint_core::runtime::Heap;
use glint_core::{disassemble, Chunk, Output, VM};
use tracing::{debug, info};

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export config types from glint_config
pub use glint_config::{CompilerConfig, GlintConfig, LimitConfig, LogLevel, LoggingConfig};

// Re-export error and types
pub mod error;
pub mod types;
pub use error::{DiagnosticReport, ErrorDetails, ErrorReport, GlintError};
pub use types::{CompileOutput, ExecuteOutput};

// Re-export core types
pub use glint_config;
pub use glint_core::{CompileError, Phase, RuntimeError, RuntimeErrorKind, Value};

/// Label used for the top-level chunk in bytecode dumps
pub const SCRIPT_LABEL: &str = "script";

/// Interpreter session
///
/// Owns one VM, so globals and interned strings persist across calls. The
/// REPL feeds every line through the same session.
#[derive(Debug)]
pub struct Interpreter {
    vm: VM,
    config: RunConfig,
}

impl Interpreter {
    /// Session whose `print` output goes to stdout
    pub fn new(config: &RunConfig) -> Self {
        Self::with_output(config, Output::stdout())
    }

    /// Session whose output is captured and returned in `ExecuteOutput`
    pub fn capturing(config: &RunConfig) -> Self {
        Self::with_output(config, Output::capture())
    }

    pub fn with_output(config: &RunConfig, output: Output) -> Self {
        let mut vm = VM::with_config(&config.limits, output);
        vm.set_compiler_config(config.compiler.clone());
        Self {
            vm,
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn vm(&self) -> &VM {
        &self.vm
    }

    /// Compile against this session's heap
    pub fn compile(&mut self, source: &str) -> Result<CompileOutput, GlintError> {
        let chunk = self.vm.compile(source)?;
        debug!(
            target: "glint::compiler",
            code_bytes = chunk.code.len(),
            constants = chunk.constants.len(),
            "compilation completed"
        );
        Ok(CompileOutput { chunk })
    }

    /// Run an already compiled chunk
    pub fn execute(&mut self, chunk: &Chunk) -> Result<ExecuteOutput, GlintError> {
        let result = self.vm.run(chunk);
        let stdout = self.vm.take_output();
        match result {
            Ok(value) => Ok(ExecuteOutput {
                value: value.map(|v| v.to_string()),
                stdout,
            }),
            Err(error) => Err(GlintError::Runtime { error, stdout }),
        }
    }

    /// Compile, optionally dump, then run
    pub fn interpret(&mut self, source: &str) -> Result<ExecuteOutput, GlintError> {
        let compiled = self.compile(source)?;

        if self.config.dump_bytecode {
            let listing = disassemble(&compiled.chunk, SCRIPT_LABEL);
            if let Err(err) = self.vm.output_mut().write_all(listing.as_bytes()) {
                debug!(target: "glint::vm", error = %err, "bytecode dump not written");
            }
        }

        self.execute(&compiled.chunk)
    }
}

/// Execute with explicit configuration
///
/// This is the recommended API for library users. Output is captured and
/// returned rather than written to stdout.
pub fn run(source: &str, config: &RunConfig) -> Result<ExecuteOutput, GlintError> {
    info!(target: "glint::vm", "Starting execution");
    let result = Interpreter::capturing(config).interpret(source);
    info!(target: "glint::vm", ok = result.is_ok(), "Execution completed");
    result
}

/// Compile with explicit configuration, into a fresh heap
pub fn compile_with_config(source: &str, config: &RunConfig) -> Result<CompileOutput, GlintError> {
    let mut heap = Heap::new();
    let chunk = glint_core::compile_with_config(source, &mut heap, &config.compiler)?;
    Ok(CompileOutput { chunk })
}

/// Disassembly listing for a source file, without running it
pub fn disassemble_source(source: &str, config: &RunConfig) -> Result<String, GlintError> {
    let compiled = compile_with_config(source, config)?;
    Ok(disassemble(&compiled.chunk, SCRIPT_LABEL))
}

// ==================== Global config API ====================

/// Compile source code (uses global config)
pub fn compile(source: &str) -> Result<CompileOutput, GlintError> {
    compile_with_config(source, get_config())
}

/// Compile and run (uses global config)
pub fn compile_and_run(source: &str) -> Result<ExecuteOutput, GlintError> {
    run(source, get_config())
}

/// Quick run with default config (auto-initializes if needed)
pub fn quick_run(source: &str) -> Result<ExecuteOutput, GlintError> {
    if !is_initialized() {
        let _ = init_config(RunConfig::default());
    }
    compile_and_run(source)
}
