//! Collaborator factory
//!
//! Builds the rasterizer, recognizer and writer described by the
//! configuration.

use crate::adapters::output::FileWriter;
use crate::adapters::poppler::PdftoppmRasterizer;
use crate::adapters::tesseract::TesseractCli;
use crate::adapters::traits::{PageWriter, Rasterizer, Recognizer};
use crate::config::schema::RedactorConfig;
use std::sync::Arc;

/// The external collaborators a document run needs
#[derive(Clone)]
pub struct Collaborators {
    pub rasterizer: Arc<dyn Rasterizer>,
    pub recognizer: Arc<dyn Recognizer>,
    pub writer: Arc<dyn PageWriter>,
}

/// Create collaborators based on the configuration
///
/// # Arguments
///
/// * `config` - The redactor configuration
pub fn create_collaborators(config: &RedactorConfig) -> Collaborators {
    tracing::info!(
        tesseract = %config.ocr.tesseract_path.display(),
        language = %config.ocr.language,
        pdftoppm = %config.pdf.pdftoppm_path.display(),
        "Creating OCR and rasterizer collaborators"
    );

    Collaborators {
        rasterizer: Arc::new(PdftoppmRasterizer::new(config.pdf.pdftoppm_path.clone())),
        recognizer: Arc::new(TesseractCli::new(
            config.ocr.tesseract_path.clone(),
            config.ocr.language.clone(),
        )),
        writer: Arc::new(FileWriter::new()),
    }
}
