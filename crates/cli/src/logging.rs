//! Logging setup for the command-line tool

use std::str::FromStr;

use anyhow::{anyhow, Result};
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// The log level to use when `RUST_LOG` is not set
    pub level: Level,
    /// Whether to emit JSON lines
    pub json: bool,
    /// Whether to include file and line information
    pub file_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: Level::INFO,
            json: false,
            file_info: false,
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration
    pub fn new(level: Level) -> Self {
        LoggingConfig {
            level,
            ..Default::default()
        }
    }

    /// Enable JSON formatting
    pub fn with_json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Enable file and line information in logs
    pub fn with_file_info(mut self) -> Self {
        self.file_info = true;
        self
    }
}

/// Install the global subscriber
///
/// Logs go to stderr so command output on stdout stays machine readable.
pub fn setup_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str().to_ascii_lowercase()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.file_info)
        .with_line_number(config.file_info);

    let result = if config.json {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    };
    result.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}

/// Parse a log level from a string
pub fn parse_log_level(level: &str) -> Result<Level> {
    Level::from_str(level).map_err(|_| anyhow!("Invalid log level: {}", level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level("WARN").unwrap(), Level::WARN);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_builder_flags() {
        let config = LoggingConfig::new(Level::DEBUG).with_json().with_file_info();
        assert!(config.json);
        assert!(config.file_info);
        assert_eq!(config.level, Level::DEBUG);
    }
}
