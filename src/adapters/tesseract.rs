//! Tesseract command-line recognizer
//!
//! Runs `tesseract <png> stdout -l <lang> tsv` on a temporary PNG and parses
//! the TSV report. Every TSV row becomes a token; page, block, paragraph and
//! line rows carry a confidence of `-1` and are reported with no confidence
//! so the layout step can use them as structural markers.

use crate::adapters::traits::Recognizer;
use crate::domain::{RedactorError, Result};
use crate::redaction::models::{BoundingBox, OcrToken};
use image::{GrayImage, ImageFormat};
use std::path::PathBuf;
use std::process::Command;

/// Default recognition language
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Number of columns in a Tesseract TSV row
const TSV_COLUMNS: usize = 12;

/// Recognizer backed by the `tesseract` binary
#[derive(Debug, Clone)]
pub struct TesseractCli {
    binary: PathBuf,
    language: String,
}

impl TesseractCli {
    /// Create a recognizer using `binary` and `language`
    pub fn new(binary: impl Into<PathBuf>, language: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            language: language.into(),
        }
    }

    /// Binary that will be invoked
    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new("tesseract", DEFAULT_LANGUAGE)
    }
}

impl Recognizer for TesseractCli {
    fn recognize(&self, page: &GrayImage) -> Result<Vec<OcrToken>> {
        let input = tempfile::Builder::new()
            .prefix("phi-page-")
            .suffix(".png")
            .tempfile()
            .map_err(|e| RedactorError::RecognitionFailure(format!("Temp file: {e}")))?;

        page.save_with_format(input.path(), ImageFormat::Png)
            .map_err(|e| {
                RedactorError::RecognitionFailure(format!("Failed to stage page image: {e}"))
            })?;

        let output = Command::new(&self.binary)
            .arg(input.path())
            .arg("stdout")
            .args(["-l", &self.language])
            .arg("tsv")
            .output()
            .map_err(|e| {
                RedactorError::RecognitionFailure(format!(
                    "Failed to run {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RedactorError::RecognitionFailure(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let tokens = parse_tsv(&String::from_utf8_lossy(&output.stdout))?;
        tracing::trace!(tokens = tokens.len(), "Tesseract recognition complete");
        Ok(tokens)
    }
}

/// Parse a Tesseract TSV report into tokens
///
/// The header row and blank lines are skipped. A row with fewer than eleven
/// columns is an error.
pub fn parse_tsv(report: &str) -> Result<Vec<OcrToken>> {
    let mut tokens = Vec::new();

    for (index, line) in report.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with("level") {
            continue;
        }

        let fields: Vec<&str> = line.splitn(TSV_COLUMNS, '\t').collect();
        if fields.len() < TSV_COLUMNS - 1 {
            return Err(RedactorError::RecognitionFailure(format!(
                "Malformed TSV row {}: expected {TSV_COLUMNS} columns, got {}",
                index + 1,
                fields.len()
            )));
        }

        let int = |col: usize| -> Result<u32> {
            let value = fields[col].trim();
            value
                .parse::<i64>()
                .map(|v| v.max(0) as u32)
                .map_err(|_| {
                    RedactorError::RecognitionFailure(format!(
                        "Malformed TSV row {}: column {col} is not a number: {value:?}",
                        index + 1
                    ))
                })
        };

        let confidence = fields[10]
            .trim()
            .parse::<f32>()
            .ok()
            .filter(|c| *c >= 0.0);

        tokens.push(OcrToken {
            text: fields.get(11).copied().unwrap_or_default().to_string(),
            confidence,
            bbox: BoundingBox::new(int(6)?, int(7)?, int(8)?, int(9)?),
            block_id: int(2)?,
            paragraph_id: int(3)?,
            line_id: int(4)?,
        });
    }

    Ok(tokens)
}
