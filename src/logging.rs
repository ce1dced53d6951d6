//! Logging initialization.
//!
//! Events are appended to the configured log file so that `--verbose` can
//! print the accumulated history of previous runs. Stdout stays reserved for
//! news output.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::app::Result;
use crate::config::LoggingConfig;

/// Parse log level string to tracing Level.
fn parse_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy()
}

/// Initialize file logging.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if let Some(parent) = config.file.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false)
                .with_target(true),
        )
        .with(filter(&config.level))
        .init();

    Ok(())
}

/// Fallback when the log file can't be opened.
pub fn init_stderr_only(level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter(level))
        .init();
}

/// Whole content of the log file, empty when nothing was logged yet.
pub fn read_log(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("warning"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_default() {
        assert_eq!(parse_level("invalid"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_read_log_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let content = read_log(&dir.path().join("none.log")).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_read_log_returns_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rss_reader.log");
        fs::write(&path, "first run\nsecond run\n").unwrap();
        assert_eq!(read_log(&path).unwrap(), "first run\nsecond run\n");
    }
}
