//! CLI configuration
//!
//! Locates and reads the optional `glint.json` file.

use glint_api::GlintConfig;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "glint.json";

/// Load configuration
///
/// An explicit path must exist. Without one, `glint.json` is read if present
/// and defaults are used otherwise.
pub fn load(explicit: Option<&Path>) -> Result<GlintConfig, String> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(GlintConfig::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(&path)
        .map_err(|e| format!("Cannot read config '{}': {}", path.display(), e))?;
    parse(&content).map_err(|e| format!("Invalid config '{}': {}", path.display(), e))
}

/// Parse a JSON config document; missing fields take their defaults
pub fn parse(content: &str) -> Result<GlintConfig, serde_json::Error> {
    serde_json::from_str(content)
}
