//! Input classification and output naming

use crate::domain::{RedactorError, Result};
use crate::redaction::models::InputKind;
use std::path::{Path, PathBuf};

const PDF_EXTENSIONS: &[&str] = &["pdf"];
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "tif", "bmp", "gif"];
const TEXT_EXTENSIONS: &[&str] = &["txt", "text"];

/// Suffix of the redacted text file, appended to the output stem
pub const TEXT_OUTPUT_SUFFIX: &str = "_text.txt";

/// Classify an input file by extension (case-insensitive)
///
/// # Errors
///
/// Returns [`RedactorError::SourceNotFound`] if the file does not exist and
/// [`RedactorError::UnsupportedInputFormat`] if the extension is not
/// recognized. Existence is checked first.
pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if !path.exists() {
        return Err(RedactorError::SourceNotFound(path.display().to_string()));
    }
    kind_from_extension(path)
}

/// Classify a path by extension without touching the filesystem
pub fn kind_from_extension(path: &Path) -> Result<InputKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if PDF_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Pdf)
    } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Image)
    } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
        Ok(InputKind::Text)
    } else if ext.is_empty() {
        Err(RedactorError::UnsupportedInputFormat(format!(
            "{} has no file extension",
            path.display()
        )))
    } else {
        Err(RedactorError::UnsupportedInputFormat(format!(".{ext}")))
    }
}

/// `<dir>/<stem><suffix>.<ext>` next to the input
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    input.with_file_name(file_name)
}

/// `<dir>/<output-stem>_text.txt` next to the output
pub fn text_output_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(format!("{stem}{TEXT_OUTPUT_SUFFIX}"))
}
