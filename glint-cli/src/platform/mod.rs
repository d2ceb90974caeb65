//! Terminal-facing output

mod cli;

pub use cli::{bytecode_json, print_error, ErrorFormat};
