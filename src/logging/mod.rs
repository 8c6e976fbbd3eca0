//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with `RUST_LOG` filtering
//! - JSON file logs with daily or hourly rotation
//! - Helper macros for page and document events
//!
//! Log events carry counts and categories only. Matched text never appears in
//! logs.
//!
//! # Example
//!
//! ```no_run
//! use phi_redactor::logging::init_logging;
//! use phi_redactor::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of work on a page
///
/// # Example
///
/// ```
/// use phi_redactor::log_page_start;
///
/// log_page_start!("discovery", 3, 12);
/// ```
#[macro_export]
macro_rules! log_page_start {
    ($pass:expr, $page:expr, $total:expr) => {
        tracing::debug!(pass = $pass, page = $page, total = $total, "Processing page");
    };
}

/// Log the completion of a document
///
/// # Example
///
/// ```
/// use phi_redactor::log_document_complete;
/// use std::time::Duration;
///
/// log_document_complete!(4, 17, Duration::from_millis(850));
/// ```
#[macro_export]
macro_rules! log_document_complete {
    ($pages:expr, $matches:expr, $duration:expr) => {
        tracing::info!(
            pages = $pages,
            matches = $matches,
            duration_ms = $duration.as_millis() as u64,
            "Document redacted"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```
/// use phi_redactor::log_error_with_context;
/// use phi_redactor::domain::RedactorError;
///
/// let error = RedactorError::RecognitionFailure("tesseract exited with 1".to_string());
/// log_error_with_context!(&error, "Page 2 recognition failed");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
