//! External tool integrations for the redactor.
//!
//! This module provides adapters for the collaborators the document pipeline
//! depends on:
//!
//! - [`traits`] - `Rasterizer`, `Recognizer` and `PageWriter` seams
//! - [`tesseract`] - OCR through the `tesseract` command line
//! - [`poppler`] - PDF rendering through `pdftoppm`
//! - [`output`] - image, PDF and text output on the local filesystem
//! - [`factory`] - builds the collaborators from configuration
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external tools and
//! enable testing with in-memory implementations:
//!
//! ```rust
//! use phi_redactor::adapters::traits::Recognizer;
//! use phi_redactor::domain::Result;
//! use phi_redactor::redaction::models::OcrToken;
//! use image::GrayImage;
//!
//! struct Blank;
//!
//! impl Recognizer for Blank {
//!     fn recognize(&self, _page: &GrayImage) -> Result<Vec<OcrToken>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! assert!(Blank.recognize(&GrayImage::new(1, 1)).unwrap().is_empty());
//! ```

pub mod factory;
pub mod output;
pub mod poppler;
pub mod tesseract;
pub mod traits;

pub use factory::{create_collaborators, Collaborators};
pub use traits::{PageWriter, Rasterizer, Recognizer};
