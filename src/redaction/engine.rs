//! Main redaction engine
//!
//! This module provides the [`RedactionEngine`] that ties together PHI
//! detection, text redaction, and pixel redaction for a single buffer or page.
//!
//! # Architecture
//!
//! The engine coordinates:
//! - **Detector**: resolves non-overlapping PHI spans from the rule catalog
//! - **Anonymizer**: replaces spans with `[CATEGORY]` placeholders
//! - **Geometry**: projects spans onto recognized word boxes and paints them
//! - **Audit Logger**: records runs with hashed values
//!
//! Page-level methods are synchronous and CPU bound; callers run them on a
//! blocking thread.
//!
//! # Examples
//!
//! ```
//! use phi_redactor::redaction::{RedactionEngine, config::RedactionSettings};
//!
//! # fn example() -> phi_redactor::domain::Result<()> {
//! let engine = RedactionEngine::new(RedactionSettings::default())?;
//! let result = engine.redact_buffer("Contact: jane@example.com", None)?;
//! assert_eq!(result.redacted_text, "Contact: [EMAIL]");
//! # Ok(())
//! # }
//! ```

use crate::domain::{RedactorError, Result};
use crate::redaction::{
    anonymizer::{Anonymizer, RedactionStrategy},
    audit::AuditLogger,
    config::{DetectionMode, GeometryConfig, RedactionSettings},
    detector::{PatternCatalog, PhiDetector, SpanResolver},
    geometry, layout,
    models::{NameTokenSet, OcrToken, PhiMatch, RedactionOutcome},
    preprocess::{self, PreparedPage},
};
use image::RgbImage;
use std::sync::Arc;

/// Redacted text buffer with its matches
#[derive(Debug, Clone)]
pub struct TextRedaction {
    pub redacted_text: String,
    pub matches: Vec<PhiMatch>,
}

/// Result of redacting one recognized page
#[derive(Debug, Clone)]
pub struct PageRedaction {
    /// Canonical text before redaction
    pub canonical_text: String,
    /// Canonical text with placeholders
    pub redacted_text: String,
    /// Accepted matches
    pub matches: Vec<PhiMatch>,
    /// Rectangles painted on the page image
    pub rects_drawn: usize,
}

/// Main redaction engine
///
/// Cheap to share across page workers behind an `Arc`; the detector and its
/// catalog are read-only after construction.
pub struct RedactionEngine {
    mode: DetectionMode,
    detector: Arc<dyn PhiDetector>,
    anonymizer: RedactionStrategy,
    geometry: GeometryConfig,
    upscale_min_dimension: u32,
    audit_logger: Option<AuditLogger>,
}

impl RedactionEngine {
    /// Create a new redaction engine
    ///
    /// Builds the rule catalog (built-in or from `detection.pattern_library`)
    /// and the audit logger when enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid, a rule fails to compile,
    /// or the audit log directory cannot be created.
    pub fn new(settings: RedactionSettings) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| RedactorError::Configuration(format!("{e:#}")))?;

        let catalog = match &settings.detection.pattern_library {
            Some(path) => PatternCatalog::from_file(path)?,
            None => PatternCatalog::build()?,
        };
        let detector = Arc::new(SpanResolver::with_catalog(
            Arc::new(catalog),
            settings.detection.mode,
        ));

        Self::with_detector(detector, settings)
    }

    /// Create an engine around an existing detector
    pub fn with_detector(
        detector: Arc<dyn PhiDetector>,
        settings: RedactionSettings,
    ) -> Result<Self> {
        let audit_logger = if settings.audit.enabled {
            Some(AuditLogger::from_config(&settings.audit)?)
        } else {
            None
        };

        tracing::debug!(
            mode = %detector.mode(),
            threshold = detector.confidence_threshold(),
            audit = audit_logger.is_some(),
            "Redaction engine initialized"
        );

        Ok(Self {
            mode: detector.mode(),
            detector,
            anonymizer: RedactionStrategy::new(),
            geometry: settings.geometry,
            upscale_min_dimension: settings.upscale_min_dimension,
            audit_logger,
        })
    }

    /// Detection mode
    pub fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Find PHI spans in a buffer
    pub fn find_matches(
        &self,
        text: &str,
        known_names: Option<&NameTokenSet>,
    ) -> Result<Vec<PhiMatch>> {
        self.detector.find_matches(text, known_names)
    }

    /// Name tokens from NAME matches
    pub fn extract_name_tokens(&self, matches: &[PhiMatch]) -> NameTokenSet {
        self.detector.extract_name_tokens(matches)
    }

    /// Replace matches with placeholders
    pub fn redact_text(&self, text: &str, matches: &[PhiMatch]) -> String {
        self.anonymizer.anonymize_text(text, matches)
    }

    /// Detect and redact a plain text buffer
    pub fn redact_buffer(
        &self,
        text: &str,
        known_names: Option<&NameTokenSet>,
    ) -> Result<TextRedaction> {
        let matches = self.find_matches(text, known_names)?;
        let redacted_text = self.redact_text(text, &matches);
        Ok(TextRedaction {
            redacted_text,
            matches,
        })
    }

    /// Prepare a page image for the recognizer
    pub fn prepare_page(&self, page: &RgbImage) -> PreparedPage {
        preprocess::prepare_for_recognition(page, self.upscale_min_dimension)
    }

    /// Discovery pass for one page: name tokens found without propagation
    pub fn discover_page_names(&self, tokens: &[OcrToken]) -> Result<NameTokenSet> {
        let (text, _) = layout::build_canonical_text(tokens);
        let matches = self.find_matches(&text, None)?;
        Ok(self.extract_name_tokens(&matches))
    }

    /// Redaction pass for one page
    ///
    /// `tokens` come from recognizing the prepared copy of `page`, whose
    /// upscale was `scale_factor`. Rectangles are painted on `page` in place.
    pub fn redact_page(
        &self,
        page: &mut RgbImage,
        scale_factor: f64,
        tokens: &[OcrToken],
        known_names: Option<&NameTokenSet>,
    ) -> Result<PageRedaction> {
        let (canonical_text, words) = layout::build_canonical_text(tokens);
        let matches = self.find_matches(&canonical_text, known_names)?;

        let bounds = page.dimensions();
        let mut rects = Vec::new();
        for (_, boxes) in geometry::map_matches_to_boxes(&matches, &words) {
            rects.extend(geometry::compute_redaction_rects(
                &boxes,
                scale_factor,
                self.geometry.padding,
                bounds,
            ));
        }
        geometry::fill_rects(page, &rects, self.geometry.fill_color);

        let redacted_text = self.redact_text(&canonical_text, &matches);

        Ok(PageRedaction {
            canonical_text,
            redacted_text,
            matches,
            rects_drawn: rects.len(),
        })
    }

    /// Record a completed run in the audit log, if enabled
    pub fn audit(&self, outcome: &RedactionOutcome) -> Result<()> {
        match &self.audit_logger {
            Some(logger) => logger.log_redaction(outcome),
            None => Ok(()),
        }
    }

    /// Check if audit logging is enabled
    pub fn is_audit_enabled(&self) -> bool {
        self.audit_logger.is_some()
    }
}
