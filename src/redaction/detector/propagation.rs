//! Name propagation
//!
//! A name found through a labeled rule ("Patient: KJ Burmaster") is split
//! into tokens, and every bare whole-word occurrence of those tokens in a
//! buffer is flagged as well. Tokens may come from the buffer itself or from
//! other pages of the same document.

use super::patterns::PatternCatalog;
use super::resolver::SpanClaims;
use crate::domain::{RedactorError, Result};
use crate::redaction::models::{NameTokenSet, PhiCategory, PhiMatch};

/// Confidence assigned to propagated name occurrences
pub const PROPAGATED_CONFIDENCE: f32 = 0.85;

/// Minimum token length in characters
const MIN_TOKEN_CHARS: usize = 2;

/// Extract proper-name tokens from the NAME matches in `matches`
///
/// Titles, role labels and credentials are dropped, as are fragments shorter
/// than two characters.
pub fn extract_name_tokens(matches: &[PhiMatch], catalog: &PatternCatalog) -> NameTokenSet {
    name_tokens(matches.iter(), catalog)
}

pub(crate) fn name_tokens<'a>(
    matches: impl Iterator<Item = &'a PhiMatch>,
    catalog: &PatternCatalog,
) -> NameTokenSet {
    let mut tokens = NameTokenSet::new();
    for m in matches.filter(|m| m.category == PhiCategory::Name) {
        for token in catalog.name_token_pattern().find_iter(&m.text) {
            let token = token.as_str();
            if token.chars().count() >= MIN_TOKEN_CHARS && !catalog.is_label_word(token) {
                tokens.insert(token.to_string());
            }
        }
    }
    tokens
}

/// Flag every whole-word, case-sensitive occurrence of each token
///
/// Tokens are visited in sorted order. An occurrence already claimed by a
/// POSSIBLE_NAME guess becomes NAME: an exact-span guess is promoted, and a
/// wider guess is split around the token.
pub(crate) fn propagate(text: &str, tokens: &NameTokenSet, claims: &mut SpanClaims) -> Result<()> {
    for token in tokens {
        let pattern = regex::Regex::new(&format!(r"\b{}\b", regex::escape(token)))
            .map_err(|e| RedactorError::Pattern(format!("Invalid name token '{token}': {e}")))?;

        for hit in pattern.find_iter(text) {
            let candidate = PhiMatch::new(
                hit.as_str(),
                PhiCategory::Name,
                hit.start(),
                hit.end(),
                PROPAGATED_CONFIDENCE,
            );
            if claims.offer(candidate.clone())
                || claims.promote_to_name(hit.start(), hit.end(), PROPAGATED_CONFIDENCE)
            {
                continue;
            }
            claims.carve_name(candidate);
        }
    }
    Ok(())
}
