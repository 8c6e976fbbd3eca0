//! Rule-driven span resolver
//!
//! Runs every active rule of the catalog over a buffer and keeps the first
//! rule to claim each region. Later rules, the dictionary pass and name
//! propagation can only claim text that is still free.

use super::patterns::PatternCatalog;
use super::propagation;
use super::PhiDetector;
use crate::domain::Result;
use crate::redaction::config::DetectionMode;
use crate::redaction::models::{NameTokenSet, PhiCategory, PhiMatch};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Confidence of a common name found by dictionary lookup in normal mode
const DICTIONARY_CONFIDENCE: f32 = 0.7;

/// Confidence of any dictionary name in aggressive mode
const AGGRESSIVE_DICTIONARY_CONFIDENCE: f32 = 0.6;

/// Accepted spans for one buffer
///
/// Accepted spans never overlap, so they are kept ordered by start and an
/// overlap check only needs the closest span starting before the candidate
/// ends.
#[derive(Debug)]
pub(crate) struct SpanClaims {
    threshold: f32,
    spans: BTreeMap<usize, PhiMatch>,
}

impl SpanClaims {
    pub(crate) fn new(threshold: f32) -> Self {
        Self {
            threshold,
            spans: BTreeMap::new(),
        }
    }

    /// Accept the candidate if it clears the threshold and its region is free
    pub(crate) fn offer(&mut self, candidate: PhiMatch) -> bool {
        if candidate.is_empty() || candidate.confidence < self.threshold {
            return false;
        }
        if self.is_claimed(candidate.start, candidate.end) {
            return false;
        }
        self.spans.insert(candidate.start, candidate);
        true
    }

    /// Whether any accepted span intersects `[start, end)`
    pub(crate) fn is_claimed(&self, start: usize, end: usize) -> bool {
        self.spans
            .range(..end)
            .next_back()
            .is_some_and(|(_, m)| m.overlaps(start, end))
    }

    /// Promote a POSSIBLE_NAME covering exactly `[start, end)` to NAME
    pub(crate) fn promote_to_name(&mut self, start: usize, end: usize, confidence: f32) -> bool {
        match self.spans.get_mut(&start) {
            Some(m) if m.end == end && m.category == PhiCategory::PossibleName => {
                m.category = PhiCategory::Name;
                m.confidence = m.confidence.max(confidence);
                true
            }
            _ => false,
        }
    }

    /// Claim `name` out of a wider POSSIBLE_NAME that contains it
    ///
    /// The rest of the guess stays claimed as POSSIBLE_NAME on either side,
    /// trimmed of whitespace.
    pub(crate) fn carve_name(&mut self, name: PhiMatch) -> bool {
        let host_start = match self.spans.range(..name.end).next_back() {
            Some((&start, host))
                if host.category == PhiCategory::PossibleName
                    && host.start <= name.start
                    && name.end <= host.end =>
            {
                start
            }
            _ => return false,
        };
        let Some(host) = self.spans.remove(&host_start) else {
            return false;
        };

        let head = host.text[..name.start - host.start].trim_end();
        if head.chars().any(char::is_alphanumeric) {
            let fragment = PhiMatch::new(
                head,
                PhiCategory::PossibleName,
                host.start,
                host.start + head.len(),
                host.confidence,
            );
            self.spans.insert(fragment.start, fragment);
        }

        let tail = &host.text[name.end - host.start..];
        let trimmed = tail.trim_start();
        if trimmed.chars().any(char::is_alphanumeric) {
            let start = host.end - trimmed.len();
            let fragment = PhiMatch::new(
                trimmed,
                PhiCategory::PossibleName,
                start,
                host.end,
                host.confidence,
            );
            self.spans.insert(fragment.start, fragment);
        }

        self.spans.insert(name.start, name);
        true
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PhiMatch> {
        self.spans.values()
    }

    /// Accepted matches ordered by start offset
    pub(crate) fn into_sorted(self) -> Vec<PhiMatch> {
        self.spans.into_values().collect()
    }
}

/// Span resolver backed by a [`PatternCatalog`]
pub struct SpanResolver {
    catalog: Arc<PatternCatalog>,
    mode: DetectionMode,
}

impl SpanResolver {
    /// Create a resolver with the built-in catalog
    pub fn new(mode: DetectionMode) -> Result<Self> {
        let catalog = PatternCatalog::build()?;
        Ok(Self::with_catalog(Arc::new(catalog), mode))
    }

    /// Create a resolver sharing an existing catalog
    pub fn with_catalog(catalog: Arc<PatternCatalog>, mode: DetectionMode) -> Self {
        Self { catalog, mode }
    }

    /// The catalog this resolver runs
    pub fn catalog(&self) -> &Arc<PatternCatalog> {
        &self.catalog
    }

    fn apply_rules(&self, text: &str, claims: &mut SpanClaims) -> Result<()> {
        for rule in self.catalog.rules(self.mode) {
            for found in rule.pattern.find_iter(text) {
                let found = found?;
                let matched = found.as_str();

                if rule.category.is_name_like() && self.catalog.contains_excluded_phrase(matched) {
                    continue;
                }

                claims.offer(PhiMatch::new(
                    matched,
                    rule.category,
                    found.start(),
                    found.end(),
                    rule.base_confidence,
                ));
            }
        }
        Ok(())
    }

    /// Standalone capitalized words found in the name dictionaries
    fn apply_dictionaries(&self, text: &str, claims: &mut SpanClaims) {
        let aggressive = self.mode.is_aggressive();

        for word in self.catalog.dictionary_word_pattern().find_iter(text) {
            let token = word.as_str();

            let confidence = if self.catalog.is_ambiguous_name(token) {
                if aggressive {
                    Some(AGGRESSIVE_DICTIONARY_CONFIDENCE)
                } else if self.catalog.has_name_context(text, word.start()) {
                    Some(DICTIONARY_CONFIDENCE)
                } else {
                    None
                }
            } else if self.catalog.is_common_name(token) {
                Some(if aggressive {
                    AGGRESSIVE_DICTIONARY_CONFIDENCE
                } else {
                    DICTIONARY_CONFIDENCE
                })
            } else {
                None
            };

            if let Some(confidence) = confidence {
                claims.offer(PhiMatch::new(
                    token,
                    PhiCategory::PossibleName,
                    word.start(),
                    word.end(),
                    confidence,
                ));
            }
        }
    }
}

impl PhiDetector for SpanResolver {
    fn find_matches(
        &self,
        text: &str,
        known_names: Option<&NameTokenSet>,
    ) -> Result<Vec<PhiMatch>> {
        let mut claims = SpanClaims::new(self.mode.threshold());

        self.apply_rules(text, &mut claims)?;
        self.apply_dictionaries(text, &mut claims);

        let mut tokens = propagation::name_tokens(claims.iter(), &self.catalog);
        if let Some(known) = known_names {
            tokens.extend(known.iter().cloned());
        }
        propagation::propagate(text, &tokens, &mut claims)?;

        let matches = claims.into_sorted();
        tracing::trace!(
            mode = %self.mode,
            match_count = matches.len(),
            propagated_tokens = tokens.len(),
            "Resolved PHI spans"
        );
        Ok(matches)
    }

    fn extract_name_tokens(&self, matches: &[PhiMatch]) -> NameTokenSet {
        propagation::extract_name_tokens(matches, &self.catalog)
    }

    fn mode(&self) -> DetectionMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(mode: DetectionMode) -> SpanResolver {
        SpanResolver::new(mode).unwrap()
    }

    fn find<'a>(matches: &'a [PhiMatch], category: PhiCategory) -> Vec<&'a PhiMatch> {
        matches.iter().filter(|m| m.category == category).collect()
    }

    #[test]
    fn test_claims_reject_overlap() {
        let mut claims = SpanClaims::new(0.7);
        assert!(claims.offer(PhiMatch::new("abcd", PhiCategory::Name, 10, 14, 0.9)));
        assert!(!claims.offer(PhiMatch::new("x", PhiCategory::Date, 12, 13, 0.99)));
        assert!(!claims.offer(PhiMatch::new("x", PhiCategory::Date, 5, 20, 0.99)));
        assert!(!claims.offer(PhiMatch::new("x", PhiCategory::Date, 13, 16, 0.99)));
        assert!(claims.offer(PhiMatch::new("x", PhiCategory::Date, 14, 16, 0.99)));
        assert!(claims.offer(PhiMatch::new("x", PhiCategory::Date, 0, 10, 0.99)));
        assert!(!claims.offer(PhiMatch::new("x", PhiCategory::Date, 30, 31, 0.5)));
        assert_eq!(claims.into_sorted().len(), 3);
    }

    #[test]
    fn test_promote_only_exact_possible_name() {
        let mut claims = SpanClaims::new(0.7);
        claims.offer(PhiMatch::new("John", PhiCategory::PossibleName, 0, 4, 0.7));
        assert!(!claims.promote_to_name(0, 3, 0.85));
        assert!(claims.promote_to_name(0, 4, 0.85));

        let matches = claims.into_sorted();
        assert_eq!(matches[0].category, PhiCategory::Name);
        assert_eq!(matches[0].confidence, 0.85);
    }

    #[test]
    fn test_carve_name_out_of_wider_guess() {
        let mut claims = SpanClaims::new(0.5);
        claims.offer(PhiMatch::new(
            "Visited Burmaster",
            PhiCategory::PossibleName,
            0,
            17,
            0.5,
        ));
        assert!(claims.carve_name(PhiMatch::new("Burmaster", PhiCategory::Name, 8, 17, 0.85)));

        let matches = claims.into_sorted();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text, "Visited");
        assert_eq!((matches[0].start, matches[0].end), (0, 7));
        assert_eq!(matches[0].category, PhiCategory::PossibleName);
        assert_eq!(matches[1].text, "Burmaster");
        assert_eq!(matches[1].category, PhiCategory::Name);
    }

    #[test]
    fn test_carve_name_leaves_other_categories_alone() {
        let mut claims = SpanClaims::new(0.5);
        claims.offer(PhiMatch::new("Room Burmaster", PhiCategory::Location, 0, 14, 0.8));
        assert!(!claims.carve_name(PhiMatch::new("Burmaster", PhiCategory::Name, 5, 14, 0.85)));
        assert_eq!(claims.into_sorted()[0].category, PhiCategory::Location);
    }

    #[test]
    fn test_known_name_inside_capitalized_pair() {
        let known: NameTokenSet = ["Burmaster".to_string()].into();
        let matches = resolver(DetectionMode::Aggressive)
            .find_matches("Visited Burmaster yesterday", Some(&known))
            .unwrap();

        let names = find(&matches, PhiCategory::Name);
        assert_eq!(names.len(), 1);
        assert_eq!(names[0].text, "Burmaster");
        assert_eq!((names[0].start, names[0].end), (8, 17));
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_labeled_name_and_dob() {
        let text = "Patient: John Smith, DOB: 01/02/1980";
        let matches = resolver(DetectionMode::Normal)
            .find_matches(text, None)
            .unwrap();

        let names = find(&matches, PhiCategory::Name);
        assert!(names.iter().any(|m| m.text.contains("John Smith")));

        let dobs = find(&matches, PhiCategory::Dob);
        assert_eq!(dobs.len(), 1);
        assert!(dobs[0].text.contains("01/02/1980"));
    }

    #[test]
    fn test_single_email() {
        let matches = resolver(DetectionMode::Normal)
            .find_matches("Contact: jane@example.com", None)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, PhiCategory::Email);
        assert_eq!(matches[0].text, "jane@example.com");
        assert_eq!(matches[0].confidence, 0.98);
    }

    #[test]
    fn test_bare_zip_only_in_aggressive_mode() {
        let normal = resolver(DetectionMode::Normal)
            .find_matches("Zip 90210", None)
            .unwrap();
        assert!(find(&normal, PhiCategory::ZipCode).is_empty());

        let aggressive = resolver(DetectionMode::Aggressive)
            .find_matches("Zip 90210", None)
            .unwrap();
        let zips = find(&aggressive, PhiCategory::ZipCode);
        assert_eq!(zips.len(), 1);
        assert_eq!(zips[0].text, "90210");
        assert_eq!(zips[0].confidence, 0.5);
    }

    #[test]
    fn test_excluded_phrase_is_not_a_name() {
        let matches = resolver(DetectionMode::Aggressive)
            .find_matches("Referred to Internal Medicine for review.", None)
            .unwrap();
        assert!(matches.iter().all(|m| !m.category.is_name_like()));
    }

    #[test]
    fn test_ambiguous_name_needs_context_in_normal_mode() {
        let r = resolver(DetectionMode::Normal);

        let without = r.find_matches("Grace period ends soon.", None).unwrap();
        assert!(without.is_empty());

        let with = r
            .find_matches("Seen today with caregiver. Grace reports less pain.", None)
            .unwrap();
        let possible = find(&with, PhiCategory::PossibleName);
        assert_eq!(possible.len(), 1);
        assert_eq!(possible[0].text, "Grace");
        assert_eq!(possible[0].confidence, 0.7);
    }

    #[test]
    fn test_ambiguous_name_unconditional_in_aggressive_mode() {
        let matches = resolver(DetectionMode::Aggressive)
            .find_matches("Grace period ends soon.", None)
            .unwrap();
        let possible = find(&matches, PhiCategory::PossibleName);
        assert_eq!(possible.len(), 1);
        assert_eq!(possible[0].confidence, 0.6);
    }

    #[test]
    fn test_common_name_without_label() {
        let matches = resolver(DetectionMode::Normal)
            .find_matches("seen with Linda today", None)
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, PhiCategory::PossibleName);
        assert_eq!(matches[0].text, "Linda");
    }

    #[test]
    fn test_known_names_are_propagated() {
        let known: NameTokenSet = ["KJ".to_string(), "Burmaster".to_string()].into();
        let matches = resolver(DetectionMode::Normal)
            .find_matches("KJ is stable", Some(&known))
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].category, PhiCategory::Name);
        assert_eq!(matches[0].text, "KJ");
        assert_eq!(matches[0].confidence, 0.85);
    }

    #[test]
    fn test_matches_sorted_and_disjoint() {
        let text = "Dr. Adams saw Patient: Maria Lopez on 03/14/2024. \
                    Phone: (555) 234-5678. Email maria@example.org. SSN 123-45-6789.";
        let matches = resolver(DetectionMode::Aggressive)
            .find_matches(text, None)
            .unwrap();
        assert!(!matches.is_empty());
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
        assert!(matches.iter().all(|m| m.confidence >= 0.5));
    }
}
