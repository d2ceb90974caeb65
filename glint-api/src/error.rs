//! API error types
//!
//! Unified error type and structured error reports.

use glint_core::compiler::{Diagnostic, DiagnosticLocation};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

pub use glint_core::runtime::{RuntimeError, RuntimeErrorKind};
pub use glint_core::CompileError;

/// Glint error type
#[derive(Error, Debug)]
pub enum GlintError {
    /// One or more compile diagnostics
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// Execution halted; `stdout` holds captured output printed before the
    /// failing instruction
    #[error("{error}")]
    Runtime {
        #[source]
        error: RuntimeError,
        stdout: String,
    },

    /// Source file could not be read
    #[error("Could not read file \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RuntimeError> for GlintError {
    fn from(error: RuntimeError) -> Self {
        GlintError::Runtime {
            error,
            stdout: String::new(),
        }
    }
}

impl GlintError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GlintError::Io {
            path: path.into(),
            source,
        }
    }

    /// Line of the (first) error, if known
    pub fn line(&self) -> Option<usize> {
        match self {
            GlintError::Compile(e) => e.line(),
            GlintError::Runtime { error, .. } => error.line,
            GlintError::Io { .. } => None,
        }
    }

    /// Name of the phase that failed
    pub fn phase(&self) -> &'static str {
        match self {
            GlintError::Compile(_) => "compiler",
            GlintError::Runtime { .. } => "runtime",
            GlintError::Io { .. } => "io",
        }
    }

    /// Process exit status for this error (sysexits)
    pub fn exit_code(&self) -> i32 {
        match self {
            GlintError::Compile(_) => 65,
            GlintError::Runtime { .. } => 70,
            GlintError::Io { .. } => 74,
        }
    }

    /// Captured output produced before a runtime error; empty otherwise
    pub fn partial_output(&self) -> &str {
        match self {
            GlintError::Runtime { stdout, .. } => stdout,
            _ => "",
        }
    }

    /// Convert to a structured report
    ///
    /// The CLI prints it directly or serializes it as JSON.
    pub fn to_report(&self) -> ErrorReport {
        match self {
            GlintError::Compile(e) => ErrorReport {
                phase: self.phase(),
                line: e.line(),
                error_kind: "CompileError".to_string(),
                message: e.to_string(),
                details: Some(ErrorDetails::Diagnostics {
                    items: e.diagnostics.iter().map(DiagnosticReport::from).collect(),
                }),
            },
            GlintError::Runtime { error, .. } => ErrorReport {
                phase: self.phase(),
                line: error.line,
                error_kind: runtime_kind_name(&error.kind).to_string(),
                message: error.kind.to_string(),
                details: None,
            },
            GlintError::Io { path, source } => ErrorReport {
                phase: self.phase(),
                line: None,
                error_kind: format!("{:?}", source.kind()),
                message: self.to_string(),
                details: Some(ErrorDetails::File {
                    path: path.display().to_string(),
                }),
            },
        }
    }
}

fn runtime_kind_name(kind: &RuntimeErrorKind) -> &'static str {
    match kind {
        RuntimeErrorKind::OperandMustBeNumber => "OperandMustBeNumber",
        RuntimeErrorKind::OperandsMustBeNumbers => "OperandsMustBeNumbers",
        RuntimeErrorKind::OperandsMustBeNumbersOrStrings => "OperandsMustBeNumbersOrStrings",
        RuntimeErrorKind::UndefinedVariable(_) => "UndefinedVariable",
        RuntimeErrorKind::StackOverflow => "StackOverflow",
        RuntimeErrorKind::StackUnderflow => "StackUnderflow",
        RuntimeErrorKind::InvalidOpcode(_) => "InvalidOpcode",
        RuntimeErrorKind::MalformedOperand => "MalformedOperand",
        RuntimeErrorKind::ConstantOutOfRange(_) => "ConstantOutOfRange",
        RuntimeErrorKind::NonStringName => "NonStringName",
        RuntimeErrorKind::Output(_) => "Output",
    }
}

/// Structured error report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// Failing phase: compiler, runtime, io
    pub phase: &'static str,
    /// 1-based line, if known
    pub line: Option<usize>,
    /// Machine-readable error kind
    pub error_kind: String,
    /// Human-readable message
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    Diagnostics { items: Vec<DiagnosticReport> },
    File { path: String },
}

/// One compile diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    pub line: usize,
    /// Offending lexeme, `"end"` at end of input, absent for scanner errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<String>,
    pub message: String,
}

impl From<&Diagnostic> for DiagnosticReport {
    fn from(diagnostic: &Diagnostic) -> Self {
        let at = match &diagnostic.location {
            DiagnosticLocation::AtEnd => Some("end".to_string()),
            DiagnosticLocation::At(lexeme) => Some(lexeme.clone()),
            DiagnosticLocation::Unlocated => None,
        };
        Self {
            line: diagnostic.line,
            at,
            message: diagnostic.message.clone(),
        }
    }
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] {} error: {}", line, self.phase, self.message),
            None => write!(f, "{} error: {}", self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// JSON form, for machine consumers
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            serde_json::json!({ "phase": self.phase, "message": self.message }).to_string()
        })
    }

    /// Short form for terminals
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile_error() -> GlintError {
        GlintError::Compile(CompileError {
            diagnostics: vec![
                Diagnostic {
                    line: 3,
                    location: DiagnosticLocation::At(";".to_string()),
                    message: "Expect expression.".to_string(),
                },
                Diagnostic {
                    line: 4,
                    location: DiagnosticLocation::Unlocated,
                    message: "Unterminated string.".to_string(),
                },
            ],
        })
    }

    #[test]
    fn test_compile_error() {
        let err = compile_error();
        assert_eq!(err.line(), Some(3));
        assert_eq!(err.phase(), "compiler");
        assert_eq!(err.exit_code(), 65);
        assert_eq!(
            err.to_string(),
            "[line 3] Error at ';': Expect expression.\n[line 4] Error: Unterminated string."
        );
    }

    #[test]
    fn test_runtime_error() {
        let err = GlintError::from(RuntimeError::new(
            RuntimeErrorKind::UndefinedVariable("x".to_string()),
            Some(2),
        ));
        assert_eq!(err.line(), Some(2));
        assert_eq!(err.phase(), "runtime");
        assert_eq!(err.exit_code(), 70);
        assert_eq!(err.to_string(), "Undefined variable 'x'.\n[line 2] in script");
        assert_eq!(err.partial_output(), "");

        let report = err.to_report();
        assert_eq!(report.error_kind, "UndefinedVariable");
        assert_eq!(report.message, "Undefined variable 'x'.");
        assert_eq!(report.to_string(), "[2] runtime error: Undefined variable 'x'.");
    }

    #[test]
    fn test_io_error() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = GlintError::io("nope.glint", source);
        assert_eq!(err.exit_code(), 74);
        assert_eq!(err.line(), None);
        assert_eq!(err.to_string(), "Could not read file \"nope.glint\": missing");
        assert_eq!(err.to_report().error_kind, "NotFound");
    }

    #[test]
    fn test_report_json() {
        let json: serde_json::Value = serde_json::from_str(&compile_error().to_report().to_json()).unwrap();
        assert_eq!(json["phase"], "compiler");
        assert_eq!(json["line"], 3);
        assert_eq!(json["details"]["type"], "diagnostics");
        assert_eq!(json["details"]["items"][0]["at"], ";");
        assert!(json["details"]["items"][1].get("at").is_none());
    }

    #[test]
    fn test_report_short() {
        let report = ErrorReport {
            phase: "runtime",
            line: None,
            error_kind: "StackOverflow".to_string(),
            message: "Stack overflow.".to_string(),
            details: None,
        };
        assert_eq!(report.to_short(), "runtime: Stack overflow.");
        assert_eq!(report.to_string(), "runtime error: Stack overflow.");
    }
}
