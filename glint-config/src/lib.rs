//! Glint Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all Glint crates,
//! and every type deserializes from JSON with missing fields falling back to
//! their defaults.

use serde::{Deserialize, Serialize};

/// Configuration for compiler behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Disassemble every successfully compiled chunk to the compiler log target
    pub print_code: bool,
}

/// Configuration for execution limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Maximum number of values on the operand stack
    pub max_stack_size: usize,
    /// Capacity the operand stack is allocated with up front
    pub initial_stack_capacity: usize,
}

/// Log verbosity, mirrors the levels understood by the CLI logger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No events at all
    #[serde(alias = "silent")]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Per-phase logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for every target
    pub global: LogLevel,
    /// Scanner level (None falls back to `global`)
    pub lexer: Option<LogLevel>,
    /// Compiler level
    pub compiler: Option<LogLevel>,
    /// VM level
    pub vm: Option<LogLevel>,
}

/// Aggregate configuration, as read from a `glint.json` file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlintConfig {
    pub compiler: CompilerConfig,
    pub limits: LimitConfig,
    pub logging: LoggingConfig,
}

/// Execution phase enum for phase-specific configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Lexer,
    Compiler,
    Vm,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lexer => "lexer",
            Phase::Compiler => "compiler",
            Phase::Vm => "vm",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> &'static str {
        match self {
            Phase::Lexer => "glint::lexer",
            Phase::Compiler => "glint::compiler",
            Phase::Vm => "glint::vm",
        }
    }
}

impl LoggingConfig {
    /// Effective level for a phase: the phase override if set, otherwise the global level
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Lexer => self.lexer,
            Phase::Compiler => self.compiler,
            Phase::Vm => self.vm,
        };
        specific.unwrap_or(self.global)
    }
}

impl LogLevel {
    /// Parse a level name; `silent` is accepted as an alias for `off`
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" | "silent" => Some(LogLevel::Off),
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self { print_code: false }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_stack_size: 1024,
            initial_stack_capacity: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            global: LogLevel::Warn,
            lexer: None,
            compiler: None,
            vm: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_compiler_config() {
        let cfg = CompilerConfig::default();
        assert!(!cfg.print_code);
    }

    #[test]
    fn test_default_limit_config() {
        let cfg = LimitConfig::default();
        assert_eq!(cfg.max_stack_size, 1024);
        assert_eq!(cfg.initial_stack_capacity, 256);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Lexer.as_str(), "lexer");
        assert_eq!(Phase::Vm.target(), "glint::vm");
    }

    #[test]
    fn test_level_for_falls_back_to_global() {
        let cfg = LoggingConfig {
            global: LogLevel::Warn,
            lexer: Some(LogLevel::Trace),
            compiler: None,
            vm: None,
        };
        assert_eq!(cfg.level_for(Phase::Lexer), LogLevel::Trace);
        assert_eq!(cfg.level_for(Phase::Compiler), LogLevel::Warn);
    }

    #[test]
    fn test_parse_log_level() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("silent"), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse("off"), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse("error"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: GlintConfig =
            serde_json::from_str(r#"{ "limits": { "max_stack_size": 64 } }"#).unwrap();
        assert_eq!(cfg.limits.max_stack_size, 64);
        assert_eq!(cfg.limits.initial_stack_capacity, 256);
        assert_eq!(cfg.logging.global, LogLevel::Warn);
        assert!(!cfg.compiler.print_code);
    }

    #[test]
    fn test_logging_json_lowercase_levels() {
        let cfg: GlintConfig =
            serde_json::from_str(r#"{ "logging": { "global": "info", "vm": "trace" } }"#).unwrap();
        assert_eq!(cfg.logging.level_for(Phase::Vm), LogLevel::Trace);
        assert_eq!(cfg.logging.level_for(Phase::Lexer), LogLevel::Info);
    }

    #[test]
    fn test_logging_json_silent_is_off() {
        let cfg: GlintConfig =
            serde_json::from_str(r#"{ "logging": { "global": "silent", "vm": "off" } }"#).unwrap();
        assert_eq!(cfg.logging.global, LogLevel::Off);
        assert_eq!(cfg.logging.level_for(Phase::Vm), LogLevel::Off);
    }
}
