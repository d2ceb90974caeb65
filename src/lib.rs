//! Glint workspace
//!
//! Thin facade over `glint-api` so the end-to-end tests under `tests/` can
//! drive the whole pipeline through one crate.

pub use glint_api::*;
