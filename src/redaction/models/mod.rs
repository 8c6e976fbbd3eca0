//! Data models for detection and redaction

pub mod ocr_word;
pub mod outcome;
pub mod phi_match;

pub use ocr_word::{BoundingBox, OcrToken, RecognizedWord};
pub use outcome::{InputKind, PageOutcome, RedactionOutcome};
pub use phi_match::{count_by_category, NameTokenSet, PhiCategory, PhiMatch};
