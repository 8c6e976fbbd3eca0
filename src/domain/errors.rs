//! Domain error types
//!
//! This module defines the error hierarchy for the redactor. Collaborator
//! failures (recognition, rasterization, output) keep their original message
//! so callers see exactly what the external tool reported.

use thiserror::Error;

/// Main redactor error type
///
/// Any error raised while processing a page aborts the whole document; there
/// are no partial-document results.
#[derive(Debug, Error)]
pub enum RedactorError {
    /// The input file extension is not one of the supported formats
    #[error("Unsupported input format: {0}")]
    UnsupportedInputFormat(String),

    /// The input file does not exist
    #[error("Input file not found: {0}")]
    SourceNotFound(String),

    /// The recognizer collaborator failed
    #[error("Recognition failed: {0}")]
    RecognitionFailure(String),

    /// The rasterizer collaborator failed
    #[error("Rasterization failed: {0}")]
    RasterizationFailure(String),

    /// Persisting redacted output failed
    #[error("Failed to write output: {0}")]
    WriteFailure(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A detection pattern failed to compile or evaluate
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Audit log errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// A page worker panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RedactorError {
    /// Whether the error originated in an external collaborator
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::RecognitionFailure(_) | Self::RasterizationFailure(_) | Self::WriteFailure(_)
        )
    }
}

impl From<std::io::Error> for RedactorError {
    fn from(err: std::io::Error) -> Self {
        RedactorError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RedactorError {
    fn from(err: serde_json::Error) -> Self {
        RedactorError::Serialization(err.to_string())
    }
}

impl From<tokio::task::JoinError> for RedactorError {
    fn from(err: tokio::task::JoinError) -> Self {
        RedactorError::Internal(format!("Page worker failed: {err}"))
    }
}

impl From<toml::de::Error> for RedactorError {
    fn from(err: toml::de::Error) -> Self {
        RedactorError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<fancy_regex::Error> for RedactorError {
    fn from(err: fancy_regex::Error) -> Self {
        RedactorError::Pattern(err.to_string())
    }
}
