//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating the
//! redactor configuration file and its rule library.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use crate::redaction::detector::PatternCatalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded and validated");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        let catalog = match &config.detection.pattern_library {
            Some(path) => PatternCatalog::from_file(path),
            None => PatternCatalog::build(),
        };
        let catalog = match catalog {
            Ok(c) => {
                println!("✅ Detection rules compiled");
                c
            }
            Err(e) => {
                println!("❌ Detection rules failed to compile");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Detection Mode: {}", config.detection.mode);
        println!(
            "  Rule Library: {}",
            config
                .detection
                .pattern_library
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in".to_string())
        );
        println!(
            "  Active Rules: {}",
            catalog.rules(config.detection.mode).count()
        );
        println!("  Box Padding: {} px", config.geometry.padding);
        println!("  Tesseract: {}", config.ocr.tesseract_path.display());
        println!("  OCR Language: {}", config.ocr.language);
        println!("  pdftoppm: {}", config.pdf.pdftoppm_path.display());
        println!("  PDF DPI: {}", config.pdf.dpi);
        println!("  Text Output: {}", config.output.write_text_output);
        println!("  Parallel Pages: {}", config.output.max_parallel_pages);
        println!(
            "  Audit Log: {}",
            if config.audit.enabled {
                config.audit.log_path.display().to_string()
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(EXIT_OK)
    }
}
