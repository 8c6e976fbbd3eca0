//! Document redactor - orchestrates redaction of one input file
//!
//! Text files go straight through the engine. Images are recognized and
//! redacted as a single page. PDFs use a two-pass protocol: every page is
//! recognized once to collect name tokens, and only after all pages finish
//! is each page recognized again and redacted with the document-wide token
//! set, so a name seen in full on a later page is also caught in its short
//! form on an earlier one.

use crate::adapters::factory::{create_collaborators, Collaborators};
use crate::adapters::traits::{PageWriter, Rasterizer, Recognizer};
use crate::config::RedactorConfig;
use crate::core::document::format;
use crate::domain::{RedactorError, Result};
use crate::redaction::engine::PageRedaction;
use crate::redaction::models::{InputKind, NameTokenSet, PageOutcome, RedactionOutcome};
use crate::redaction::RedactionEngine;
use crate::{log_document_complete, log_error_with_context, log_page_start};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// Per-run document options
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// PDF render resolution
    pub dpi: u32,
    /// Write the redacted text next to the output
    pub write_text_output: bool,
    /// Suffix for the default output file name
    pub suffix: String,
    /// Pages processed concurrently within a pass
    pub max_parallel_pages: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            dpi: crate::adapters::poppler::DEFAULT_DPI,
            write_text_output: true,
            suffix: "_redacted".to_string(),
            max_parallel_pages: 4,
        }
    }
}

impl DocumentOptions {
    pub fn from_config(config: &RedactorConfig) -> Self {
        Self {
            dpi: config.pdf.dpi,
            write_text_output: config.output.write_text_output,
            suffix: config.output.suffix.clone(),
            max_parallel_pages: config.output.max_parallel_pages.max(1),
        }
    }
}

/// Redacts whole documents using an engine and external collaborators
pub struct DocumentRedactor {
    engine: Arc<RedactionEngine>,
    rasterizer: Arc<dyn Rasterizer>,
    recognizer: Arc<dyn Recognizer>,
    writer: Arc<dyn PageWriter>,
    options: DocumentOptions,
}

impl DocumentRedactor {
    /// Create a document redactor from its parts
    ///
    /// A `max_parallel_pages` of zero is raised to one.
    pub fn new(
        engine: Arc<RedactionEngine>,
        collaborators: Collaborators,
        mut options: DocumentOptions,
    ) -> Self {
        options.max_parallel_pages = options.max_parallel_pages.max(1);
        Self {
            engine,
            rasterizer: collaborators.rasterizer,
            recognizer: collaborators.recognizer,
            writer: collaborators.writer,
            options,
        }
    }

    /// Create a document redactor from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be built.
    pub fn from_config(config: &RedactorConfig) -> Result<Self> {
        let engine = Arc::new(RedactionEngine::new(config.redaction_settings())?);
        Ok(Self::new(
            engine,
            create_collaborators(config),
            DocumentOptions::from_config(config),
        ))
    }

    /// The redaction engine
    pub fn engine(&self) -> &RedactionEngine {
        &self.engine
    }

    /// Run options
    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    /// Default output path for `input`
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        format::default_output_path(input, &self.options.suffix)
    }

    /// Redact one file
    ///
    /// Writes the redacted document to `output` (or the default path) and,
    /// when enabled, the redacted text next to it. Any failure on any page
    /// aborts the document; nothing is written for a failed PDF.
    ///
    /// # Errors
    ///
    /// Returns [`RedactorError::SourceNotFound`] or
    /// [`RedactorError::UnsupportedInputFormat`] for bad inputs, and
    /// collaborator errors unchanged.
    pub async fn redact_file(&self, input: &Path, output: Option<&Path>) -> Result<RedactionOutcome> {
        let start_time = Instant::now();
        let kind = format::detect_input_kind(input)?;
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.output_path_for(input));

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            kind = %kind,
            mode = %self.engine.mode(),
            "Redacting document"
        );

        let result = match kind {
            InputKind::Text => self.redact_text_file(input, &output).await,
            InputKind::Image => self.redact_image_file(input, &output).await,
            InputKind::Pdf => self.redact_pdf(input, &output).await,
        };
        let (pages, propagated_names) = result.map_err(|e| {
            log_error_with_context!(&e, "Document redaction failed");
            e
        })?;

        let mut outcome = RedactionOutcome {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            input: input.to_path_buf(),
            output,
            text_output: None,
            kind,
            mode: self.engine.mode(),
            pages,
            propagated_names,
            processing_time_ms: 0,
        };

        if self.options.write_text_output {
            let text = outcome.combined_text();
            if !text.is_empty() {
                let path = format::text_output_path(&outcome.output);
                self.writer.write_text(&text, &path)?;
                outcome.text_output = Some(path);
            }
        }

        let elapsed = start_time.elapsed();
        outcome.processing_time_ms = elapsed.as_millis() as u64;
        self.engine.audit(&outcome)?;

        log_document_complete!(outcome.pages.len(), outcome.total_matches(), elapsed);
        Ok(outcome)
    }

    async fn redact_text_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<(Vec<PageOutcome>, usize)> {
        let bytes = tokio::fs::read(input).await?;
        let text = String::from_utf8_lossy(&bytes).into_owned();

        let engine = Arc::clone(&self.engine);
        let redaction =
            tokio::task::spawn_blocking(move || engine.redact_buffer(&text, None)).await??;

        self.writer.write_text(&redaction.redacted_text, output)?;

        Ok((
            vec![PageOutcome {
                page_number: 1,
                matches: redaction.matches,
                redacted_text: redaction.redacted_text,
                rects_drawn: 0,
            }],
            0,
        ))
    }

    async fn redact_image_file(
        &self,
        input: &Path,
        output: &Path,
    ) -> Result<(Vec<PageOutcome>, usize)> {
        let engine = Arc::clone(&self.engine);
        let rasterizer = Arc::clone(&self.rasterizer);
        let recognizer = Arc::clone(&self.recognizer);
        let path = input.to_path_buf();

        let (image, redaction) = tokio::task::spawn_blocking(move || {
            let page = rasterizer.load_image(&path)?;
            redact_page(&engine, recognizer.as_ref(), page, None)
        })
        .await??;

        self.writer.write_image(&image, output)?;

        Ok((vec![page_outcome(1, redaction)], 0))
    }

    async fn redact_pdf(&self, input: &Path, output: &Path) -> Result<(Vec<PageOutcome>, usize)> {
        let rasterizer = Arc::clone(&self.rasterizer);
        let path = input.to_path_buf();
        let dpi = self.options.dpi;
        let pages = tokio::task::spawn_blocking(move || rasterizer.rasterize(&path, dpi)).await??;

        tracing::info!(pages = pages.len(), dpi, "PDF rasterized");

        let pages = Arc::new(pages);
        let known_names = Arc::new(self.discover_names(Arc::clone(&pages)).await?);
        let pages = Arc::try_unwrap(pages).unwrap_or_else(|shared| shared.as_ref().clone());

        tracing::info!(
            name_tokens = known_names.len(),
            "Name discovery complete, redacting pages"
        );

        let redacted = self.redact_pages(pages, Arc::clone(&known_names)).await?;

        let mut images = Vec::with_capacity(redacted.len());
        let mut outcomes = Vec::with_capacity(redacted.len());
        for (index, (image, redaction)) in redacted.into_iter().enumerate() {
            images.push(image);
            outcomes.push(page_outcome(index + 1, redaction));
        }

        let writer = Arc::clone(&self.writer);
        let out = output.to_path_buf();
        tokio::task::spawn_blocking(move || writer.write_pages(&images, dpi, &out)).await??;

        Ok((outcomes, known_names.len()))
    }

    /// Discovery pass: name tokens found on any page, without propagation
    ///
    /// Returns only after every page has been processed.
    pub async fn discover_names(&self, pages: Arc<Vec<RgbImage>>) -> Result<NameTokenSet> {
        let total = pages.len();

        let per_page: Vec<NameTokenSet> = stream::iter(0..total)
            .map(|index| {
                let engine = Arc::clone(&self.engine);
                let recognizer = Arc::clone(&self.recognizer);
                let pages = Arc::clone(&pages);
                tokio::task::spawn_blocking(move || {
                    log_page_start!("discovery", index + 1, total);
                    let prepared = engine.prepare_page(&pages[index]);
                    let tokens = recognizer.recognize(&prepared.image)?;
                    engine.discover_page_names(&tokens)
                })
            })
            .buffered(self.options.max_parallel_pages)
            .map(|joined| joined.map_err(RedactorError::from).and_then(|r| r))
            .try_collect()
            .await?;

        Ok(per_page.into_iter().flatten().collect())
    }

    /// Redaction pass: every page with the document-wide name tokens
    ///
    /// Results keep page order.
    pub async fn redact_pages(
        &self,
        pages: Vec<RgbImage>,
        known_names: Arc<NameTokenSet>,
    ) -> Result<Vec<(RgbImage, PageRedaction)>> {
        let total = pages.len();

        stream::iter(pages.into_iter().enumerate())
            .map(|(index, page)| {
                let engine = Arc::clone(&self.engine);
                let recognizer = Arc::clone(&self.recognizer);
                let known_names = Arc::clone(&known_names);
                tokio::task::spawn_blocking(move || {
                    log_page_start!("redaction", index + 1, total);
                    redact_page(&engine, recognizer.as_ref(), page, Some(&known_names))
                })
            })
            .buffered(self.options.max_parallel_pages)
            .map(|joined| joined.map_err(RedactorError::from).and_then(|r| r))
            .try_collect()
            .await
    }
}

/// Recognize and redact one page bitmap
fn redact_page(
    engine: &RedactionEngine,
    recognizer: &dyn Recognizer,
    mut page: RgbImage,
    known_names: Option<&NameTokenSet>,
) -> Result<(RgbImage, PageRedaction)> {
    let prepared = engine.prepare_page(&page);
    let tokens = recognizer.recognize(&prepared.image)?;
    let redaction = engine.redact_page(&mut page, prepared.scale_factor, &tokens, known_names)?;

    tracing::debug!(
        matches = redaction.matches.len(),
        rects = redaction.rects_drawn,
        "Page redacted"
    );

    Ok((page, redaction))
}

fn page_outcome(page_number: usize, redaction: PageRedaction) -> PageOutcome {
    PageOutcome {
        page_number,
        matches: redaction.matches,
        redacted_text: redaction.redacted_text,
        rects_drawn: redaction.rects_drawn,
    }
}
