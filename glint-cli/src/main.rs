//! Glint CLI - Command line interface
//!
//! `glint` starts a REPL; `glint path/to/script.glint` runs a file.

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

mod config;
mod logging;
mod platform;

use crate::logging::LogFormat;
use crate::platform::{bytecode_json, print_error, ErrorFormat};
use glint_api::{compile_with_config, init_config, GlintError, Interpreter, LogLevel, RunConfig};

#[derive(Parser)]
#[command(
    name = "glint",
    about = "Glint programming language - bytecode compiler and VM",
    version
)]
struct Cli {
    /// Script to run; starts a REPL when omitted
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Print the disassembled bytecode before running
    #[arg(long)]
    dump_bytecode: bool,

    /// Print the compiled bytecode as JSON instead of running
    #[arg(long, requires = "script")]
    dump_json: bool,

    /// Configuration file (default: ./glint.json if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Global log level: off (or silent), error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Error output format
    #[arg(long, value_enum, default_value = "text")]
    error_format: ErrorFormat,
}

fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{s}'"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut file_config = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(64);
        }
    };
    if let Some(level) = cli.log_level {
        file_config.logging.global = level;
    }

    if let Err(e) = logging::init(&file_config.logging, cli.log_format, cli.log_file.as_deref()) {
        eprintln!("Error: {}", e);
        return ExitCode::from(64);
    }

    let mut run_config = RunConfig::from_config(&file_config);
    run_config.dump_bytecode = cli.dump_bytecode;

    // Global singleton for convenience
    let _ = init_config(run_config.clone());

    let status = match &cli.script {
        Some(path) if cli.dump_json => dump_json(path, &run_config, cli.error_format),
        Some(path) => run_file(path, &run_config, cli.error_format),
        None => repl(&run_config, cli.error_format),
    };
    ExitCode::from(status)
}

fn read_source(path: &Path) -> Result<String, GlintError> {
    std::fs::read_to_string(path).map_err(|e| GlintError::io(path, e))
}

fn exit_status(e: &GlintError) -> u8 {
    u8::try_from(e.exit_code()).unwrap_or(1)
}

fn run_file(path: &Path, config: &RunConfig, format: ErrorFormat) -> u8 {
    info!(target: "glint::vm", path = %path.display(), "running file");
    let source = match read_source(path) {
        Ok(s) => s,
        Err(e) => {
            print_error(&e, None, format);
            return exit_status(&e);
        }
    };

    let mut interpreter = Interpreter::new(config);
    match interpreter.interpret(&source) {
        Ok(output) => {
            if let Some(value) = output.value {
                debug!(target: "glint::vm", %value, "script returned");
            }
            0
        }
        Err(e) => {
            let _ = io::stdout().flush();
            print_error(&e, Some(&source), format);
            exit_status(&e)
        }
    }
}

fn dump_json(path: &Path, config: &RunConfig, format: ErrorFormat) -> u8 {
    let source = match read_source(path) {
        Ok(s) => s,
        Err(e) => {
            print_error(&e, None, format);
            return exit_status(&e);
        }
    };

    let compiled = match compile_with_config(&source, config) {
        Ok(compiled) => compiled,
        Err(e) => {
            print_error(&e, Some(&source), format);
            return exit_status(&e);
        }
    };

    let dump = bytecode_json(&compiled.chunk, glint_api::SCRIPT_LABEL);
    match serde_json::to_string_pretty(&dump) {
        Ok(text) => {
            println!("{}", text);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

/// Read-eval-print loop; one interpreter for the whole session so globals
/// persist between lines
fn repl(config: &RunConfig, format: ErrorFormat) -> u8 {
    let mut interpreter = Interpreter::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("Error: {}", e);
                return 74;
            }
            None => {
                println!();
                return 0;
            }
        };

        if let Err(e) = interpreter.interpret(&line) {
            let _ = io::stdout().flush();
            print_error(&e, None, format);
        }
    }
}
