//! Redaction strategy

use super::Anonymizer;
use crate::redaction::models::PhiMatch;

/// Redaction strategy - replaces PHI with [CATEGORY] placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct RedactionStrategy;

impl RedactionStrategy {
    /// Create a new redaction strategy
    pub fn new() -> Self {
        Self
    }
}

impl Anonymizer for RedactionStrategy {
    fn replacement(&self, phi_match: &PhiMatch) -> String {
        format!("[{}]", phi_match.category.label())
    }
}

/// Replace every match in `text` with its `[CATEGORY]` placeholder
pub fn redact_text(text: &str, matches: &[PhiMatch]) -> String {
    RedactionStrategy::new().anonymize_text(text, matches)
}
