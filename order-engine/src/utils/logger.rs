//! Logging Infrastructure
//!
//! Structured logging setup for development (pretty console) and production
//! (JSON lines, optional daily rolling file).

use std::fs;
use std::path::Path;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the logger at `info` on the console
pub fn init_logger() -> anyhow::Result<()> {
    init_logger_with_file("info", false, None)
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug"); `RUST_LOG` wins when set
/// * `json_format` - JSON lines instead of human-readable output
/// * `log_dir` - Optional directory for a daily rolling `order-engine.*.log`
///
/// Logs go to stderr so the binary's stdout stays machine-readable.
pub fn init_logger_with_file(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = match log_dir {
        Some(dir) => {
            fs::create_dir_all(Path::new(dir))?;
            Some(tracing_appender::rolling::daily(dir, "order-engine.log"))
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(env_filter);

    if json_format {
        let console = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .json()
                .with_target(true)
                .with_ansi(false)
                .with_writer(appender)
        });
        registry.with(console).with(file).try_init()?;
    } else {
        let console = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(appender)
        });
        registry.with(console).with(file).try_init()?;
    }

    Ok(())
}
