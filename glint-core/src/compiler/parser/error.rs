//! Compile diagnostics

use std::fmt;
use thiserror::Error;

/// Where a diagnostic points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticLocation {
    /// At the end of the input
    AtEnd,
    /// At a token, by its lexeme
    At(String),
    /// No usable lexeme (scanner errors)
    Unlocated,
}

/// One compile error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub location: DiagnosticLocation,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error", self.line)?;
        match &self.location {
            DiagnosticLocation::AtEnd => f.write_str(" at end")?,
            DiagnosticLocation::At(lexeme) => write!(f, " at '{lexeme}'")?,
            DiagnosticLocation::Unlocated => {}
        }
        write!(f, ": {}", self.message)
    }
}

/// Every diagnostic reported while compiling one unit
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CompileError {
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}

impl CompileError {
    /// Line of the first diagnostic
    pub fn line(&self) -> Option<usize> {
        self.diagnostics.first().map(|d| d.line)
    }
}
