//! Audit logger for redaction runs

use crate::domain::{RedactorError, Result};
use crate::redaction::config::AuditConfig;
use crate::redaction::models::{PhiMatch, RedactionOutcome};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    run_id: String,
    input: String,
    output: String,
    kind: String,
    mode: String,
    pages: usize,
    detections_count: usize,
    category_counts: BTreeMap<String, usize>,
    processing_time_ms: u64,
    detections: Vec<AuditDetection>,
}

/// Audit detection entry (with hashed PHI)
#[derive(Debug, Serialize)]
struct AuditDetection {
    page: usize,
    category: String,
    start: usize,
    end: usize,
    confidence: f32,
    /// SHA-256 hash of the matched value (never log plaintext PHI)
    value_hash: String,
}

/// Audit logger for redaction runs
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
}

impl AuditLogger {
    /// Create a new audit logger
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    RedactorError::Audit(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
        })
    }

    /// Create an audit logger from configuration
    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    /// Whether entries are written
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Log a completed document
    pub fn log_redaction(&self, outcome: &RedactionOutcome) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let detections = outcome
            .pages
            .iter()
            .flat_map(|page| {
                page.matches
                    .iter()
                    .map(move |m| Self::create_audit_detection(page.page_number, m))
            })
            .collect();

        let entry = AuditLogEntry {
            timestamp: outcome.timestamp.to_rfc3339(),
            run_id: outcome.run_id.to_string(),
            input: outcome.input.display().to_string(),
            output: outcome.output.display().to_string(),
            kind: outcome.kind.to_string(),
            mode: outcome.mode.to_string(),
            pages: outcome.pages.len(),
            detections_count: outcome.total_matches(),
            category_counts: outcome
                .category_counts()
                .into_iter()
                .map(|(c, n)| (c.label().to_string(), n))
                .collect(),
            processing_time_ms: outcome.processing_time_ms,
            detections,
        };

        self.write_entry(&entry)
    }

    fn create_audit_detection(page: usize, m: &PhiMatch) -> AuditDetection {
        AuditDetection {
            page,
            category: m.category.label().to_string(),
            start: m.start,
            end: m.end,
            confidence: m.confidence,
            value_hash: hash_phi_value(&m.text),
        }
    }

    /// Write an audit entry to the log file
    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                RedactorError::Audit(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            format!(
                "[{}] Run: {} | Input: {} | Mode: {} | Pages: {} | Detections: {} | Time: {}ms",
                entry.timestamp,
                entry.run_id,
                entry.input,
                entry.mode,
                entry.pages,
                entry.detections_count,
                entry.processing_time_ms
            )
        };

        writeln!(file, "{line}")
            .map_err(|e| RedactorError::Audit(format!("Failed to write audit entry: {e}")))
    }
}

/// Hash a PHI value using SHA-256
fn hash_phi_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
