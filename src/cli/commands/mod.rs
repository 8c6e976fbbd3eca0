//! CLI command implementations
//!
//! Commands return a process exit code: 0 on success, 1 when a document
//! could not be redacted, 2 for configuration errors and 5 for fatal errors.

pub mod detect;
pub mod init;
pub mod redact;
pub mod validate;

/// Exit code for success
pub const EXIT_OK: i32 = 0;
/// Exit code when redaction of the input failed
pub const EXIT_FAILURE: i32 = 1;
/// Exit code for configuration errors
pub const EXIT_CONFIG: i32 = 2;
/// Exit code for fatal errors
pub const EXIT_FATAL: i32 = 5;
