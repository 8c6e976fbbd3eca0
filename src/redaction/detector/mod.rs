//! PHI detection module
//!
//! Provides the trait-based detection interface and the rule-driven span
//! resolver that implements it.

pub mod patterns;
pub mod propagation;
pub mod resolver;

use crate::domain::Result;
use crate::redaction::config::DetectionMode;
use crate::redaction::models::{NameTokenSet, PhiMatch};

pub use patterns::{DetectionRule, PatternCatalog};
pub use propagation::extract_name_tokens;
pub use resolver::SpanResolver;

/// Trait for PHI detection implementations
pub trait PhiDetector: Send + Sync {
    /// Find PHI spans in a canonical text buffer
    ///
    /// Returned matches are sorted by start offset and never overlap. When
    /// `known_names` is given, every whole-word occurrence of those tokens is
    /// also flagged as a name.
    fn find_matches(&self, text: &str, known_names: Option<&NameTokenSet>)
        -> Result<Vec<PhiMatch>>;

    /// Collect proper-name tokens from NAME matches for propagation
    fn extract_name_tokens(&self, matches: &[PhiMatch]) -> NameTokenSet;

    /// Detection mode this detector runs in
    fn mode(&self) -> DetectionMode;

    /// Get the confidence threshold for this detector
    fn confidence_threshold(&self) -> f32 {
        self.mode().threshold()
    }
}
