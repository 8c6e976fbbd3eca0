// PHI Redactor - Local PHI detection and redaction
// Copyright (c) 2025 PHI Redactor Contributors
// Licensed under the MIT License

//! # PHI Redactor
//!
//! PHI Redactor finds protected health information in clinical text, scanned
//! images and PDFs and removes it locally, both from the recognized text and
//! from the page pixels.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** PHI with an ordered, data-driven rule catalog and name
//!   dictionaries
//! - **Propagating** names seen anywhere in a document to their bare
//!   occurrences on every page
//! - **Redacting** text with `[CATEGORY]` placeholders and page images with
//!   filled rectangles
//! - **Auditing** runs with hashed values, never plaintext
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Document orchestration and the two-pass PDF protocol
//! - [`redaction`] - Detection, propagation, text and pixel redaction
//! - [`adapters`] - OCR, rasterization and output collaborators
//! - [`domain`] - Error and result types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use phi_redactor::redaction::{DetectionMode, PhiCategory, RedactionEngine, RedactionSettings};
//!
//! # fn main() -> phi_redactor::domain::Result<()> {
//! let engine = RedactionEngine::new(RedactionSettings::with_mode(DetectionMode::Normal))?;
//! let result = engine.redact_buffer("Patient: John Smith, DOB: 01/02/1980", None)?;
//!
//! assert!(result.matches.iter().any(|m| m.category == PhiCategory::Name));
//! assert!(!result.redacted_text.contains("John Smith"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Documents
//!
//! ```rust,no_run
//! use phi_redactor::config::load_config_or_default;
//! use phi_redactor::core::document::DocumentRedactor;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config_or_default("phi-redactor.toml")?;
//!     let redactor = DocumentRedactor::from_config(&config)?;
//!
//!     let outcome = redactor.redact_file(Path::new("scan.pdf"), None).await?;
//!     println!("Redacted {} items", outcome.total_matches());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::RedactorError`]. Errors from the
//! OCR engine, the rasterizer and the output writer are passed through
//! unchanged, and a failure on any page aborts the whole document.
//!
//! ## Residual Risk
//!
//! Detection is pattern-based. Candidates below the confidence threshold are
//! not reported, so redacted output should be reviewed before it is shared.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod redaction;
