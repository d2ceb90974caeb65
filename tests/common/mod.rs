//! Test helpers
//!
//! Helpers for end-to-end tests through the public API.

use glint_workspace::{run, GlintError, Interpreter, RunConfig};

/// Run a whole program with default configuration, returning its output
pub fn run_code(code: &str) -> Result<String, GlintError> {
    run(code, &RunConfig::default()).map(|output| output.stdout)
}

/// Output lines of a program that must succeed
pub fn output_lines(code: &str) -> Vec<String> {
    match run_code(code) {
        Ok(stdout) => stdout.lines().map(str::to_string).collect(),
        Err(e) => panic!("program failed: {e}\n--- source ---\n{code}"),
    }
}

/// Feed lines one by one through a single session, as the REPL does.
/// Each entry is that line's output, or the rendered error.
pub fn repl_session(lines: &[&str]) -> Vec<Result<String, String>> {
    let mut session = Interpreter::capturing(&RunConfig::default());
    lines
        .iter()
        .map(|line| {
            session
                .interpret(line)
                .map(|output| output.stdout)
                .map_err(|e| e.to_string())
        })
        .collect()
}
