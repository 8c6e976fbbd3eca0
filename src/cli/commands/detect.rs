//! Detect command implementation
//!
//! Lists PHI found in a text file. Nothing is written to disk.

use super::redact::exit_code_for;
use super::{EXIT_CONFIG, EXIT_FAILURE, EXIT_OK};
use crate::config::load_config_or_default;
use crate::core::document::detect_input_kind;
use crate::redaction::config::DetectionMode;
use crate::redaction::models::{count_by_category, InputKind, PhiMatch};
use crate::redaction::RedactionEngine;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the detect command
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Text file to scan (.txt or .text)
    pub input: PathBuf,

    /// Aggressive mode: lower threshold and extra low-confidence rules
    #[arg(short, long)]
    pub aggressive: bool,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,

    /// Include matched values in the output
    #[arg(long)]
    pub show_values: bool,
}

/// One listed detection
#[derive(Debug, Serialize)]
struct DetectionRow {
    category: String,
    start: usize,
    end: usize,
    confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
}

impl DetectArgs {
    /// Execute the detect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(EXIT_CONFIG);
            }
        };
        if self.aggressive {
            config.detection.mode = DetectionMode::Aggressive;
        }

        match detect_input_kind(&self.input) {
            Ok(InputKind::Text) => {}
            Ok(kind) => {
                eprintln!("❌ detect only scans text files; use `redact` for {kind} input");
                return Ok(EXIT_FAILURE);
            }
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(exit_code_for(&e));
            }
        }

        let engine = match RedactionEngine::new(config.redaction_settings()) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ Failed to initialize redaction engine: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let bytes = tokio::fs::read(&self.input).await?;
        let text = String::from_utf8_lossy(&bytes);
        let matches = match engine.find_matches(&text, None) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ Detection failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        tracing::info!(matches = matches.len(), mode = %engine.mode(), "Detection complete");

        if self.json {
            let rows: Vec<DetectionRow> = matches.iter().map(|m| self.row(m)).collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            self.print_table(&matches);
        }

        Ok(EXIT_OK)
    }

    fn row(&self, m: &PhiMatch) -> DetectionRow {
        DetectionRow {
            category: m.category.label().to_string(),
            start: m.start,
            end: m.end,
            confidence: m.confidence,
            value: self.show_values.then(|| m.text.clone()),
        }
    }

    fn print_table(&self, matches: &[PhiMatch]) {
        println!("🔍 {} PHI match(es) in {}", matches.len(), self.input.display());
        println!();
        for m in matches {
            let row = self.row(m);
            match row.value {
                Some(value) => println!(
                    "  {:<28} {:>6}..{:<6} {:.2}  {value}",
                    row.category, row.start, row.end, row.confidence
                ),
                None => println!(
                    "  {:<28} {:>6}..{:<6} {:.2}",
                    row.category, row.start, row.end, row.confidence
                ),
            }
        }
        if !matches.is_empty() {
            println!();
            for (category, count) in count_by_category(matches) {
                println!("  {:<28} {count:>5}", category.label());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::models::PhiCategory;

    #[test]
    fn test_row_hides_values_by_default() {
        let args = DetectArgs {
            input: PathBuf::from("note.txt"),
            aggressive: false,
            json: true,
            show_values: false,
        };
        let m = PhiMatch::new("jane@example.com", PhiCategory::Email, 9, 25, 0.98);
        let json = serde_json::to_value(args.row(&m)).unwrap();
        assert_eq!(json["category"], "EMAIL");
        assert!(json.get("value").is_none());
    }

    #[tokio::test]
    async fn test_detect_rejects_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scan.pdf");
        std::fs::write(&input, b"%PDF-1.5").unwrap();

        let args = DetectArgs {
            input,
            aggressive: false,
            json: false,
            show_values: false,
        };
        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_FAILURE);
    }

    #[tokio::test]
    async fn test_detect_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.txt");
        std::fs::write(&input, "Contact: jane@example.com").unwrap();

        let args = DetectArgs {
            input: input.clone(),
            aggressive: false,
            json: true,
            show_values: false,
        };
        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_OK);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
