//! Text anonymization module
//!
//! Rewrites a canonical text buffer by replacing accepted PHI spans.

pub mod redaction;

use crate::redaction::models::PhiMatch;

pub use redaction::{redact_text, RedactionStrategy};

/// Trait for text anonymization strategies
pub trait Anonymizer: Send + Sync {
    /// Replacement text for a single match
    fn replacement(&self, phi_match: &PhiMatch) -> String;

    /// Rewrite `text`, replacing every match
    ///
    /// Matches are applied from the highest start offset down so earlier
    /// offsets stay valid. Matches that fall outside the buffer, split a
    /// character, or overlap an already replaced span are skipped.
    fn anonymize_text(&self, text: &str, matches: &[PhiMatch]) -> String {
        let mut ordered: Vec<&PhiMatch> = matches.iter().collect();
        ordered.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

        let mut output = text.to_string();
        let mut floor = text.len();

        for m in ordered {
            let in_bounds = m.start < m.end
                && m.end <= floor
                && text.is_char_boundary(m.start)
                && text.is_char_boundary(m.end);
            if !in_bounds {
                tracing::warn!(
                    start = m.start,
                    end = m.end,
                    category = %m.category,
                    "Skipping match outside buffer or overlapping a replaced span"
                );
                continue;
            }

            output.replace_range(m.start..m.end, &self.replacement(m));
            floor = m.start;
        }

        output
    }
}
