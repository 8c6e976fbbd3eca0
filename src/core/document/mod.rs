//! Document orchestration
//!
//! This module coordinates redaction of a whole input file:
//!
//! - [`format`] - input classification and output naming
//! - [`redactor`] - the [`DocumentRedactor`] and its two-pass PDF protocol

pub mod format;
pub mod redactor;

pub use format::{default_output_path, detect_input_kind, text_output_path};
pub use redactor::{DocumentOptions, DocumentRedactor};
