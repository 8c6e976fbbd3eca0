//! Redaction summary reporting
//!
//! Formats the category counts and per-page statistics of a redaction run
//! for the console or as JSON. Matched values are never included.

use crate::redaction::config::DetectionMode;
use crate::redaction::models::{InputKind, PhiCategory, RedactionOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

const RULE: &str = "───────────────────────────────────────────────────────────────\n";
const BANNER: &str = "═══════════════════════════════════════════════════════════════\n";

/// Summary of a redaction run
#[derive(Debug, Clone, Serialize)]
pub struct RedactionReport {
    /// Input file
    pub input: String,
    /// Redacted output file
    pub output: String,
    /// Redacted text file, when written
    pub text_output: Option<String>,
    /// Input kind
    pub kind: InputKind,
    /// Detection mode
    pub mode: DetectionMode,
    /// Total matches
    pub total_matches: usize,
    /// Matches per category
    pub detections_by_category: BTreeMap<PhiCategory, usize>,
    /// Per-page statistics
    pub pages: Vec<PageStats>,
    /// Size of the document-wide name token set
    pub propagated_names: usize,
    /// Processing time
    pub processing_time_ms: u64,
    /// Notes for the reader
    pub warnings: Vec<String>,
}

/// Per-page statistics
#[derive(Debug, Clone, Serialize)]
pub struct PageStats {
    pub page_number: usize,
    pub matches: usize,
    pub rects_drawn: usize,
}

impl RedactionReport {
    /// Build a report from a completed run
    pub fn from_outcome(outcome: &RedactionOutcome) -> Self {
        let mut report = Self {
            input: outcome.input.display().to_string(),
            output: outcome.output.display().to_string(),
            text_output: outcome
                .text_output
                .as_ref()
                .map(|p| p.display().to_string()),
            kind: outcome.kind,
            mode: outcome.mode,
            total_matches: outcome.total_matches(),
            detections_by_category: outcome.category_counts(),
            pages: outcome
                .pages
                .iter()
                .map(|p| PageStats {
                    page_number: p.page_number,
                    matches: p.matches.len(),
                    rects_drawn: p.rects_drawn,
                })
                .collect(),
            propagated_names: outcome.propagated_names,
            processing_time_ms: outcome.processing_time_ms,
            warnings: Vec::new(),
        };

        report.add_warning(
            "Pattern-based detection is probabilistic; review redacted output before sharing"
                .to_string(),
        );
        if outcome.total_matches() == 0 {
            report.add_warning("No PHI detected; the output is identical in content".to_string());
        }
        if outcome.kind != InputKind::Text && outcome.total_matches() > outcome.total_rects() {
            report.add_warning(
                "Some matches had no recognized word boxes and were redacted in text only"
                    .to_string(),
            );
        }
        if outcome.mode.is_aggressive() {
            report.add_warning(
                "Aggressive mode flags low-confidence candidates; expect false positives"
                    .to_string(),
            );
        }

        report
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(BANNER);
        output.push_str("                     PHI REDACTION REPORT                      \n");
        output.push_str(BANNER);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(RULE);
        output.push_str(&format!("  Input:                 {}\n", self.input));
        output.push_str(&format!("  Output:                {}\n", self.output));
        if let Some(text_output) = &self.text_output {
            output.push_str(&format!("  Text Output:           {text_output}\n"));
        }
        output.push_str(&format!("  Input Kind:            {}\n", self.kind));
        output.push_str(&format!("  Mode:                  {}\n", self.mode));
        output.push_str(&format!("  Pages:                 {}\n", self.pages.len()));
        output.push_str(&format!("  Total PHI Redacted:    {}\n", self.total_matches));
        if self.kind == InputKind::Pdf {
            output.push_str(&format!(
                "  Propagated Names:      {}\n",
                self.propagated_names
            ));
        }
        output.push_str(&format!(
            "  Processing Time:       {} ms\n",
            self.processing_time_ms
        ));
        output.push('\n');

        if !self.detections_by_category.is_empty() {
            output.push_str("🔍 PHI BY CATEGORY\n");
            output.push_str(RULE);

            let mut categories: Vec<_> = self.detections_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.label(), count));
            }
            output.push('\n');
        }

        if self.pages.len() > 1 {
            output.push_str("📄 PAGES\n");
            output.push_str(RULE);
            for page in &self.pages {
                output.push_str(&format!(
                    "  Page {:<4} matches: {:>4}   boxes: {:>4}\n",
                    page.page_number, page.matches, page.rects_drawn
                ));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(RULE);
            for warning in &self.warnings {
                output.push_str(&format!("  • {warning}\n"));
            }
            output.push('\n');
        }

        output.push_str(BANNER);
        output.push('\n');

        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::models::{PageOutcome, PhiMatch};
    use chrono::Utc;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn outcome() -> RedactionOutcome {
        RedactionOutcome {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input: PathBuf::from("scan.pdf"),
            output: PathBuf::from("scan_redacted.pdf"),
            text_output: Some(PathBuf::from("scan_redacted_text.txt")),
            kind: InputKind::Pdf,
            mode: DetectionMode::Normal,
            pages: vec![
                PageOutcome {
                    page_number: 1,
                    matches: vec![PhiMatch::new("KJ", PhiCategory::Name, 0, 2, 0.85)],
                    redacted_text: "[NAME] is stable".to_string(),
                    rects_drawn: 1,
                },
                PageOutcome {
                    page_number: 2,
                    matches: vec![PhiMatch::new(
                        "Patient: KJ Burmaster",
                        PhiCategory::Name,
                        0,
                        21,
                        0.95,
                    )],
                    redacted_text: "[NAME]".to_string(),
                    rects_drawn: 3,
                },
            ],
            propagated_names: 2,
            processing_time_ms: 120,
        }
    }

    #[test]
    fn test_report_from_outcome() {
        let report = RedactionReport::from_outcome(&outcome());
        assert_eq!(report.total_matches, 2);
        assert_eq!(report.detections_by_category.get(&PhiCategory::Name), Some(&2));
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_console_format_has_no_plaintext() {
        let console = RedactionReport::from_outcome(&outcome()).format_console();
        assert!(console.contains("PHI REDACTION REPORT"));
        assert!(console.contains("NAME"));
        assert!(console.contains("Page 2"));
        assert!(!console.contains("Burmaster"));
    }

    #[test]
    fn test_json_format() {
        let json = RedactionReport::from_outcome(&outcome()).format_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_matches"], 2);
        assert_eq!(value["detections_by_category"]["NAME"], 2);
        assert_eq!(value["kind"], "pdf");
    }
}
