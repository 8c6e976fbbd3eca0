//! PHI detection and redaction
//!
//! This module locates protected health information in canonical text and
//! obscures it, both in the text itself and on the page images the text was
//! recognized from.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: an ordered rule catalog resolved into non-overlapping spans
//! - **Propagation**: names found by labeled rules are flagged wherever they recur
//! - **Anonymization**: spans are replaced with `[CATEGORY]` placeholders
//! - **Geometry**: spans are mapped onto recognized word boxes and painted
//! - **Audit**: structured logging with hashed PHI values
//!
//! # Usage
//!
//! ```rust,ignore
//! use phi_redactor::redaction::{RedactionEngine, config::RedactionSettings};
//!
//! let engine = RedactionEngine::new(RedactionSettings::default())?;
//! let result = engine.redact_buffer("Patient: John Smith, DOB: 01/02/1980", None)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod geometry;
pub mod layout;
pub mod models;
pub mod preprocess;
pub mod report;

// Re-export main types
pub use config::{DetectionMode, RedactionSettings};
pub use engine::RedactionEngine;
pub use models::{NameTokenSet, PhiCategory, PhiMatch, RedactionOutcome};
pub use report::RedactionReport;
