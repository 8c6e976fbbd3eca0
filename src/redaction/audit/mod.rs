//! Audit logging module
//!
//! Provides structured audit logging for redaction runs. Matched values are
//! recorded only as SHA-256 hashes.

pub mod logger;

pub use logger::AuditLogger;
