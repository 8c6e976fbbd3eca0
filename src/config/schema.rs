//! Configuration schema types
//!
//! This module defines the configuration structure for the redactor. Every
//! section has defaults, so an empty file is a valid configuration.

use crate::adapters::poppler::DEFAULT_DPI;
use crate::adapters::tesseract::DEFAULT_LANGUAGE;
use crate::redaction::config::{AuditConfig, DetectionConfig, GeometryConfig, RedactionSettings};
use crate::redaction::preprocess::DEFAULT_UPSCALE_MIN_DIMENSION;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main redactor configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactorConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Detection mode and rule library
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Redaction box drawing
    #[serde(default)]
    pub geometry: GeometryConfig,

    /// OCR settings
    #[serde(default)]
    pub ocr: OcrConfig,

    /// PDF rasterization settings
    #[serde(default)]
    pub pdf: PdfConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Audit log settings
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RedactorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.detection.validate().map_err(|e| e.to_string())?;
        self.geometry.validate().map_err(|e| e.to_string())?;
        self.ocr.validate()?;
        self.pdf.validate()?;
        self.output.validate()?;
        self.audit.validate().map_err(|e| e.to_string())?;
        self.logging.validate()?;
        Ok(())
    }

    /// Settings for building a [`crate::redaction::RedactionEngine`]
    pub fn redaction_settings(&self) -> RedactionSettings {
        RedactionSettings {
            detection: self.detection.clone(),
            geometry: self.geometry.clone(),
            audit: self.audit.clone(),
            upscale_min_dimension: self.ocr.upscale_min_dimension,
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// OCR configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Path or name of the `tesseract` binary
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: PathBuf,

    /// Tesseract language code(s), e.g. `eng` or `eng+spa`
    #[serde(default = "default_language")]
    pub language: String,

    /// Pages whose shorter side is below this many pixels are upscaled
    #[serde(default = "default_upscale_min_dimension")]
    pub upscale_min_dimension: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: default_tesseract_path(),
            language: default_language(),
            upscale_min_dimension: default_upscale_min_dimension(),
        }
    }
}

impl OcrConfig {
    fn validate(&self) -> Result<(), String> {
        if self.language.trim().is_empty() {
            return Err("ocr.language cannot be empty".to_string());
        }
        if self.upscale_min_dimension > 10_000 {
            return Err(format!(
                "ocr.upscale_min_dimension must be <= 10000, got {}",
                self.upscale_min_dimension
            ));
        }
        Ok(())
    }
}

/// PDF rasterization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Path or name of the `pdftoppm` binary
    #[serde(default = "default_pdftoppm_path")]
    pub pdftoppm_path: PathBuf,

    /// Render resolution; also sets the page size of PDF output
    #[serde(default = "default_dpi")]
    pub dpi: u32,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            pdftoppm_path: default_pdftoppm_path(),
            dpi: default_dpi(),
        }
    }
}

impl PdfConfig {
    fn validate(&self) -> Result<(), String> {
        if !(72..=1200).contains(&self.dpi) {
            return Err(format!(
                "pdf.dpi must be between 72 and 1200, got {}",
                self.dpi
            ));
        }
        Ok(())
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Write the redacted canonical text next to the output
    #[serde(default = "default_true")]
    pub write_text_output: bool,

    /// Suffix appended to the input stem for the default output path
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Pages processed concurrently within a pass
    #[serde(default = "default_max_parallel_pages")]
    pub max_parallel_pages: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_text_output: true,
            suffix: default_suffix(),
            max_parallel_pages: default_max_parallel_pages(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        if self.suffix.is_empty() {
            return Err("output.suffix cannot be empty".to_string());
        }
        if self.suffix.contains(['/', '\\']) {
            return Err(format!(
                "output.suffix cannot contain path separators: '{}'",
                self.suffix
            ));
        }
        if self.max_parallel_pages == 0 || self.max_parallel_pages > 64 {
            return Err(format!(
                "output.max_parallel_pages must be between 1 and 64, got {}",
                self.max_parallel_pages
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tesseract_path() -> PathBuf {
    PathBuf::from("tesseract")
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_upscale_min_dimension() -> u32 {
    DEFAULT_UPSCALE_MIN_DIMENSION
}

fn default_pdftoppm_path() -> PathBuf {
    PathBuf::from("pdftoppm")
}

fn default_dpi() -> u32 {
    DEFAULT_DPI
}

fn default_suffix() -> String {
    "_redacted".to_string()
}

fn default_max_parallel_pages() -> usize {
    4
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::config::DetectionMode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RedactorConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.detection.mode, DetectionMode::Normal);
        assert_eq!(config.pdf.dpi, 300);
        assert_eq!(config.ocr.language, "eng");
        assert_eq!(config.output.suffix, "_redacted");
        assert!(config.output.write_text_output);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pdf_dpi_range() {
        let mut config = PdfConfig::default();
        config.dpi = 50;
        assert!(config.validate().is_err());
        config.dpi = 600;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_validation() {
        let mut config = OutputConfig::default();
        config.max_parallel_pages = 0;
        assert!(config.validate().is_err());

        config.max_parallel_pages = 2;
        config.suffix = "../x".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_rotation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());
        config.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_redaction_settings() {
        let config: RedactorConfig = toml::from_str(
            r#"
[detection]
mode = "aggressive"

[geometry]
padding = 4

[ocr]
upscale_min_dimension = 1500
"#,
        )
        .unwrap();

        let settings = config.redaction_settings();
        assert_eq!(settings.detection.mode, DetectionMode::Aggressive);
        assert_eq!(settings.geometry.padding, 4);
        assert_eq!(settings.upscale_min_dimension, 1500);
    }
}
