//! CLI logging initialization
//!
//! Per-phase log control built on `tracing-subscriber`. Logs go to stderr so
//! they never interleave with program output.

use clap::ValueEnum;
use glint_api::{LogLevel, LoggingConfig, Phase};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

/// Log output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, multi-line (development)
    Pretty,
    /// One line per event
    Compact,
    /// JSON (tool integration)
    Json,
}

pub fn to_tracing_level(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Off => LevelFilter::OFF,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Trace => LevelFilter::TRACE,
    }
}

/// Filter with one directive per phase target
pub fn targets(config: &LoggingConfig) -> Targets {
    [Phase::Lexer, Phase::Compiler, Phase::Vm]
        .into_iter()
        .fold(
            Targets::new().with_default(to_tracing_level(config.global)),
            |targets, phase| {
                targets.with_target(phase.target(), to_tracing_level(config.level_for(phase)))
            },
        )
}

/// Initialize logging with the given format, optionally copying every event
/// to a file
pub fn init(config: &LoggingConfig, format: LogFormat, file: Option<&Path>) -> Result<(), String> {
    let targets = targets(config);

    let file_layer = match file {
        Some(path) => {
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("Cannot open log file '{}': {}", path.display(), e))?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(handle))
                    .with_filter(targets.clone()),
            )
        }
        None => None,
    };

    let console_layer = create_format_layer(format).with_filter(targets);

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Cannot initialize logging: {}", e))
}

/// Create formatter layer based on format
fn create_format_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    match format {
        LogFormat::Pretty => fmt::layer()
            .pretty()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .without_time()
            .with_writer(io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_target(true)
            .with_writer(io::stderr)
            .boxed(),
    }
}
