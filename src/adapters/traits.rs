//! Collaborator traits
//!
//! This module defines the traits that rasterizers, recognizers and output
//! writers must implement to plug into the document pipeline. All methods are
//! blocking; the orchestrator calls them from the blocking thread pool.

use crate::domain::{RedactorError, Result};
use crate::redaction::models::OcrToken;
use image::{GrayImage, RgbImage};
use std::path::Path;

/// Turns documents into page bitmaps
pub trait Rasterizer: Send + Sync {
    /// Render every page of a PDF at `dpi`, in page order
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::RasterizationFailure`] if the document cannot
    /// be rendered.
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<Vec<RgbImage>>;

    /// Decode a single image file
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::RasterizationFailure`] if the file cannot be
    /// decoded.
    fn load_image(&self, path: &Path) -> Result<RgbImage> {
        image::open(path)
            .map(|img| img.to_rgb8())
            .map_err(|e| {
                RedactorError::RasterizationFailure(format!(
                    "Failed to decode {}: {e}",
                    path.display()
                ))
            })
    }
}

/// Recognizes words on a prepared page
pub trait Recognizer: Send + Sync {
    /// Recognize tokens with their boxes and structural ids
    ///
    /// Boxes are in the coordinate space of `page`.
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::RecognitionFailure`] if recognition fails.
    fn recognize(&self, page: &GrayImage) -> Result<Vec<OcrToken>>;
}

/// Persists redacted output
pub trait PageWriter: Send + Sync {
    /// Write a single redacted image; the format follows the extension
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::WriteFailure`] if the file cannot be written.
    fn write_image(&self, image: &RgbImage, path: &Path) -> Result<()>;

    /// Write redacted pages as one multi-page document
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::WriteFailure`] if the file cannot be written.
    fn write_pages(&self, pages: &[RgbImage], dpi: u32, path: &Path) -> Result<()>;

    /// Write redacted text
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::WriteFailure`] if the file cannot be written.
    fn write_text(&self, text: &str, path: &Path) -> Result<()>;
}
