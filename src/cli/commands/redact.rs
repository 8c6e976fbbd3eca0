//! Redact command implementation
//!
//! This module implements the `redact` command for redacting a PDF, image or
//! text file and printing a summary report.

use super::{EXIT_CONFIG, EXIT_FAILURE, EXIT_FATAL, EXIT_OK};
use crate::config::{load_config_or_default, RedactorConfig};
use crate::core::document::DocumentRedactor;
use crate::domain::RedactorError;
use crate::redaction::config::DetectionMode;
use crate::redaction::RedactionReport;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Input file (.pdf, .png, .jpg, .jpeg, .tif, .tiff, .bmp, .gif, .txt)
    pub input: PathBuf,

    /// Output file (defaults to `<stem>_redacted.<ext>` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Aggressive mode: lower threshold and extra low-confidence rules
    #[arg(short, long)]
    pub aggressive: bool,

    /// Do not write the redacted text file
    #[arg(long)]
    pub no_text_output: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Print nothing on success
    #[arg(short, long)]
    pub quiet: bool,
}

impl RedactArgs {
    /// Apply command-line overrides to the loaded configuration
    pub fn apply_overrides(&self, config: &mut RedactorConfig) {
        if self.aggressive {
            tracing::info!("Enabling aggressive detection from CLI");
            config.detection.mode = DetectionMode::Aggressive;
        }
        if self.no_text_output {
            config.output.write_text_output = false;
        }
    }

    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting redact command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration loading failed");
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        self.apply_overrides(&mut config);

        let redactor = match DocumentRedactor::from_config(&config) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("❌ Failed to initialize redaction engine: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        match redactor.redact_file(&self.input, self.output.as_deref()).await {
            Ok(outcome) => {
                if !self.quiet {
                    let report = RedactionReport::from_outcome(&outcome);
                    if self.json {
                        println!("{}", report.format_json()?);
                    } else {
                        print!("{}", report.format_console());
                    }
                }
                Ok(EXIT_OK)
            }
            Err(e) => {
                eprintln!("❌ Redaction failed: {e}");
                if e.is_collaborator_failure() {
                    eprintln!(
                        "   Check that {} and {} are installed and the output directory is writable",
                        config.ocr.tesseract_path.display(),
                        config.pdf.pdftoppm_path.display()
                    );
                }
                Ok(exit_code_for(&e))
            }
        }
    }
}

/// Map a redaction error to a process exit code
pub fn exit_code_for(error: &RedactorError) -> i32 {
    match error {
        RedactorError::Configuration(_) | RedactorError::Pattern(_) => EXIT_CONFIG,
        RedactorError::Internal(_) => EXIT_FATAL,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RedactArgs {
        RedactArgs {
            input: PathBuf::from("scan.pdf"),
            output: None,
            aggressive: true,
            no_text_output: true,
            json: false,
            quiet: true,
        }
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = RedactorConfig::default();
        args().apply_overrides(&mut config);
        assert_eq!(config.detection.mode, DetectionMode::Aggressive);
        assert!(!config.output.write_text_output);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&RedactorError::SourceNotFound("x".into())),
            EXIT_FAILURE
        );
        assert_eq!(
            exit_code_for(&RedactorError::RecognitionFailure("x".into())),
            EXIT_FAILURE
        );
        assert_eq!(
            exit_code_for(&RedactorError::Configuration("x".into())),
            EXIT_CONFIG
        );
        assert_eq!(exit_code_for(&RedactorError::Internal("x".into())), EXIT_FATAL);
    }

    #[tokio::test]
    async fn test_execute_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.txt");
        std::fs::write(&input, "Contact: jane@example.com").unwrap();

        let args = RedactArgs {
            input: input.clone(),
            aggressive: false,
            ..args()
        };
        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(code, EXIT_OK);
        let redacted = std::fs::read_to_string(dir.path().join("note_redacted.txt")).unwrap();
        assert_eq!(redacted, "Contact: [EMAIL]");
        assert!(!dir.path().join("note_redacted_text.txt").exists());
    }

    #[tokio::test]
    async fn test_execute_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let args = RedactArgs {
            input: dir.path().join("absent.pdf"),
            ..args()
        };
        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }
}
