//! Configuration management for the redactor.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! The redactor reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PHI_REDACTOR_<SECTION>_<KEY>` environment overrides
//! - Default values for every section
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use phi_redactor::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("phi-redactor.toml")?;
//!
//! println!("Mode: {}", config.detection.mode);
//! println!("DPI: {}", config.pdf.dpi);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - `detection` - Detection mode and optional rule library
//! - `geometry` - Redaction box padding and fill color
//! - [`OcrConfig`] - Tesseract binary, language and upscale threshold
//! - [`PdfConfig`] - `pdftoppm` binary and render resolution
//! - [`OutputConfig`] - Text output, file suffix and page parallelism
//! - `audit` - Audit log location and format
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [detection]
//! mode = "normal"
//!
//! [ocr]
//! language = "eng"
//!
//! [pdf]
//! dpi = 300
//!
//! [audit]
//! enabled = true
//! log_path = "${PHI_AUDIT_DIR}/redaction.log"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApplicationConfig, LoggingConfig, OcrConfig, OutputConfig, PdfConfig, RedactorConfig,
};
