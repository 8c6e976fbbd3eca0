//! Rule catalog for PHI detection

pub mod dictionaries;

use crate::domain::{RedactorError, Result};
use crate::redaction::config::DetectionMode;
use crate::redaction::models::PhiCategory;
use fancy_regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Radius, in characters, of the window searched for a clinical label around
/// an ambiguous name
pub const CONTEXT_WINDOW_CHARS: usize = 80;

/// Rule definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RuleDefinition {
    /// Rule name, used in logs and error messages
    pub name: String,
    /// PHI category assigned to matches
    pub category: PhiCategory,
    /// Base confidence (0.0 - 1.0)
    pub confidence: f32,
    /// Only active in aggressive mode
    #[serde(default)]
    pub aggressive_only: bool,
    /// Regular expression
    pub pattern: String,
}

/// Rule library container
#[derive(Debug, Deserialize)]
struct RuleLibrary {
    rules: Vec<RuleDefinition>,
}

/// A compiled detection rule
#[derive(Debug, Clone)]
pub struct DetectionRule {
    /// Rule name
    pub name: String,
    /// Compiled pattern
    pub pattern: Regex,
    /// PHI category
    pub category: PhiCategory,
    /// Base confidence
    pub base_confidence: f32,
    /// Only active in aggressive mode
    pub aggressive_only: bool,
}

impl DetectionRule {
    /// Whether the rule runs in the given mode
    pub fn is_active(&self, mode: DetectionMode) -> bool {
        !self.aggressive_only || mode.is_aggressive()
    }
}

/// Immutable rule catalog plus the word lists used around it
///
/// Built once per engine and shared read-only between page workers.
#[derive(Debug)]
pub struct PatternCatalog {
    rules: Vec<DetectionRule>,
    excluded_phrases: Vec<&'static str>,
    common_names: HashSet<&'static str>,
    ambiguous_names: HashSet<&'static str>,
    context_labels: Vec<&'static str>,
    label_words: HashSet<&'static str>,
    dictionary_word: regex::Regex,
    name_token: regex::Regex,
}

impl PatternCatalog {
    /// Build the catalog from the built-in rule library
    pub fn build() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/phi_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// Build a catalog from a rule library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            RedactorError::Configuration(format!(
                "Failed to read rule library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Build a catalog from TOML content
    ///
    /// Rule order in the document is preserved and defines priority.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RuleLibrary = toml::from_str(content)?;

        if library.rules.is_empty() {
            return Err(RedactorError::Configuration(
                "Rule library contains no rules".to_string(),
            ));
        }

        let mut rules = Vec::with_capacity(library.rules.len());
        for def in library.rules {
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(RedactorError::Pattern(format!(
                    "Rule '{}' has confidence {} outside [0, 1]",
                    def.name, def.confidence
                )));
            }

            let pattern = Regex::new(&def.pattern).map_err(|e| {
                RedactorError::Pattern(format!("Invalid regex in rule '{}': {e}", def.name))
            })?;

            rules.push(DetectionRule {
                name: def.name,
                pattern,
                category: def.category,
                base_confidence: def.confidence,
                aggressive_only: def.aggressive_only,
            });
        }

        Ok(Self {
            rules,
            excluded_phrases: dictionaries::EXCLUDED_PHRASES.to_vec(),
            common_names: dictionaries::COMMON_FIRST_NAMES
                .iter()
                .chain(dictionaries::COMMON_LAST_NAMES)
                .copied()
                .collect(),
            ambiguous_names: dictionaries::AMBIGUOUS_NAMES.iter().copied().collect(),
            context_labels: dictionaries::CONTEXT_LABELS.to_vec(),
            label_words: dictionaries::LABEL_WORDS.iter().copied().collect(),
            dictionary_word: compile_plain(r"\b[A-Z][a-z]+\b")?,
            name_token: compile_plain(r"[A-Z][A-Za-z']+")?,
        })
    }

    /// All rules in priority order
    pub fn all_rules(&self) -> &[DetectionRule] {
        &self.rules
    }

    /// Rules active in `mode`, in priority order
    pub fn rules(&self, mode: DetectionMode) -> impl Iterator<Item = &DetectionRule> {
        self.rules.iter().filter(move |r| r.is_active(mode))
    }

    /// Whether the text contains an excluded clinical or geographic phrase
    pub fn contains_excluded_phrase(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.excluded_phrases.iter().any(|p| lower.contains(p))
    }

    /// Whether the word is in the common first/last name dictionary
    pub fn is_common_name(&self, word: &str) -> bool {
        self.common_names.contains(word.to_lowercase().as_str())
    }

    /// Whether the word is a name that is also an ordinary English word
    pub fn is_ambiguous_name(&self, word: &str) -> bool {
        self.ambiguous_names.contains(word.to_lowercase().as_str())
    }

    /// Whether the token is a title, role label or credential
    pub fn is_label_word(&self, token: &str) -> bool {
        self.label_words.contains(token.to_lowercase().as_str())
    }

    /// Whether a clinical label appears within [`CONTEXT_WINDOW_CHARS`] of
    /// the byte offset `position`
    pub fn has_name_context(&self, text: &str, position: usize) -> bool {
        let window = context_window(text, position, CONTEXT_WINDOW_CHARS).to_lowercase();
        self.context_labels.iter().any(|l| window.contains(l))
    }

    /// Pattern for capitalized words checked against the name dictionaries
    pub fn dictionary_word_pattern(&self) -> &regex::Regex {
        &self.dictionary_word
    }

    /// Pattern for name fragments inside NAME matches
    pub fn name_token_pattern(&self) -> &regex::Regex {
        &self.name_token
    }
}

fn compile_plain(pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|e| RedactorError::Pattern(e.to_string()))
}

/// Slice of `text` spanning `radius` characters either side of `position`
fn context_window(text: &str, position: usize, radius: usize) -> &str {
    let position = position.min(text.len());
    let before = &text[..position];
    let start = before
        .char_indices()
        .rev()
        .nth(radius.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let after = &text[position..];
    let end = after
        .char_indices()
        .nth(radius)
        .map(|(i, _)| position + i)
        .unwrap_or(text.len());
    &text[start..end]
}
