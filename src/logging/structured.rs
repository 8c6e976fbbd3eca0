//! Structured logging setup using tracing
//!
//! Console output goes to stderr so reports written to stdout stay
//! machine-readable. An optional JSON file layer writes through a rolling
//! appender. Log events carry counts, categories and paths; matched PHI
//! values are never logged.

use crate::config::LoggingConfig;
use crate::domain::{RedactorError, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log file name prefix inside `logging.local_path`
const LOG_FILE_PREFIX: &str = "phi-redactor.log";

/// Keeps the file writer alive; logs buffered at drop are flushed
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self {
            _file_guard: file_guard,
        }
    }
}

/// Initialize the logging system based on configuration
///
/// `RUST_LOG` takes precedence over `log_level_str` when set. Fails if a
/// global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use phi_redactor::logging::init_logging;
/// use phi_redactor::config::LoggingConfig;
///
/// let config = LoggingConfig::default();
/// let _guard = init_logging("info", &config).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level_str: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let log_level = parse_log_level(log_level_str)?;
    let filter = crate_filter(log_level);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed();

    let mut layers = vec![console_layer];
    let mut file_guard = None;

    if config.local_enabled {
        let (writer, guard) = open_log_file(config)?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_current_span(false)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        );
        file_guard = Some(guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| RedactorError::Configuration(format!("Failed to initialize logging: {e}")))?;

    tracing::debug!(
        level = %log_level,
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        "Logging initialized"
    );

    Ok(LoggingGuard::new(file_guard))
}

/// Filter for this crate's events at `level`, unless `RUST_LOG` is set
fn crate_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("phi_redactor={level}")))
}

/// Rotation for a validated `logging.local_rotation` value
fn rotation(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        RedactorError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    Ok(tracing_appender::non_blocking(appender))
}

/// Parse log level from string (case-insensitive)
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    level_str.to_lowercase().parse::<Level>().map_err(|_| {
        RedactorError::Configuration(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("trace", Level::TRACE)]
    #[test_case("Debug", Level::DEBUG)]
    #[test_case("INFO", Level::INFO)]
    #[test_case("warn", Level::WARN)]
    #[test_case("error", Level::ERROR)]
    fn test_parse_log_level(input: &str, expected: Level) {
        assert_eq!(parse_log_level(input).unwrap(), expected);
    }

    #[test_case("verbose")]
    #[test_case("")]
    fn test_parse_log_level_invalid(input: &str) {
        assert!(matches!(
            parse_log_level(input),
            Err(RedactorError::Configuration(_))
        ));
    }

    #[test]
    fn test_rotation_names() {
        assert_eq!(rotation("hourly"), Rotation::HOURLY);
        assert_eq!(rotation("never"), Rotation::NEVER);
        assert_eq!(rotation("daily"), Rotation::DAILY);
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            local_enabled: true,
            local_path: dir.path().join("nested").to_string_lossy().to_string(),
            local_rotation: "never".to_string(),
        };

        let (_writer, guard) = open_log_file(&config).unwrap();
        drop(guard);
        assert!(dir.path().join("nested").join(LOG_FILE_PREFIX).exists());
    }
}
