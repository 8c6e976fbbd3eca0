//! Per-document redaction results

use super::phi_match::{count_by_category, PhiCategory, PhiMatch};
use crate::redaction::config::DetectionMode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

/// Kind of input document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Plain text file
    Text,
    /// Single raster image
    Image,
    /// Multi-page PDF
    Pdf,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

/// Result for a single page (or the whole buffer of a text/image input)
#[derive(Debug, Clone, Serialize)]
pub struct PageOutcome {
    /// 1-based page number
    pub page_number: usize,
    /// Accepted matches ordered by start offset
    pub matches: Vec<PhiMatch>,
    /// Canonical text with placeholders
    pub redacted_text: String,
    /// Number of rectangles painted on the page image
    pub rects_drawn: usize,
}

/// Result of redacting one document
#[derive(Debug, Clone, Serialize)]
pub struct RedactionOutcome {
    /// Unique run identifier
    pub run_id: Uuid,
    /// Completion timestamp
    pub timestamp: DateTime<Utc>,
    /// Input file
    pub input: PathBuf,
    /// Redacted document
    pub output: PathBuf,
    /// Redacted text file, when written
    pub text_output: Option<PathBuf>,
    /// Input kind
    pub kind: InputKind,
    /// Detection mode used
    pub mode: DetectionMode,
    /// Pages in document order
    pub pages: Vec<PageOutcome>,
    /// Size of the document-wide name token set
    pub propagated_names: usize,
    /// Wall-clock processing time
    pub processing_time_ms: u64,
}

impl RedactionOutcome {
    /// All matches across pages, in page then offset order
    pub fn all_matches(&self) -> impl Iterator<Item = &PhiMatch> {
        self.pages.iter().flat_map(|p| p.matches.iter())
    }

    /// Total number of matches
    pub fn total_matches(&self) -> usize {
        self.pages.iter().map(|p| p.matches.len()).sum()
    }

    /// Total rectangles painted
    pub fn total_rects(&self) -> usize {
        self.pages.iter().map(|p| p.rects_drawn).sum()
    }

    /// Match count per category
    pub fn category_counts(&self) -> BTreeMap<PhiCategory, usize> {
        let all: Vec<PhiMatch> = self.all_matches().cloned().collect();
        count_by_category(&all)
    }

    /// Redacted text of the whole document
    ///
    /// PDF pages are headed `--- Page N ---` and separated by a blank line.
    pub fn combined_text(&self) -> String {
        match self.kind {
            InputKind::Pdf => self
                .pages
                .iter()
                .map(|p| format!("--- Page {} ---\n{}", p.page_number, p.redacted_text))
                .collect::<Vec<_>>()
                .join("\n\n"),
            InputKind::Text | InputKind::Image => self
                .pages
                .iter()
                .map(|p| p.redacted_text.as_str())
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }
}
