//! API configuration
//!
//! Holds the execution configuration `RunConfig` and a global singleton for
//! CLI convenience.

use glint_config::{CompilerConfig, GlintConfig, LimitConfig};
use once_cell::sync::OnceCell;

/// Execution configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Disassemble each chunk into the output before running it
    pub dump_bytecode: bool,
    /// Compiler configuration
    pub compiler: CompilerConfig,
    /// Execution limits
    pub limits: LimitConfig,
}

impl RunConfig {
    /// Execution settings taken from a loaded configuration file
    pub fn from_config(config: &GlintConfig) -> Self {
        Self {
            dump_bytecode: false,
            compiler: config.compiler.clone(),
            limits: config.limits.clone(),
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize the global configuration
///
/// Only the first call takes effect; later calls hand their config back.
pub fn init(config: RunConfig) -> Result<(), RunConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Global config reference, falling back to defaults if `init` was never
/// called
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}
