//! Core orchestration for the redactor.
//!
//! # Modules
//!
//! - [`document`] - classifies inputs and drives the engine and collaborators
//!
//! # Document Workflow
//!
//! 1. **Classify**: pick the text, image or PDF path from the file extension
//! 2. **Rasterize**: render PDF pages to bitmaps
//! 3. **Discover**: recognize each page and collect name tokens
//! 4. **Redact**: recognize each page again, detect with the collected names,
//!    paint boxes and replace text
//! 5. **Write**: save the redacted document and, optionally, its text
//! 6. **Audit**: append a hashed record of the run
//!
//! # Example
//!
//! ```rust,no_run
//! use phi_redactor::config::load_config;
//! use phi_redactor::core::document::DocumentRedactor;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("phi-redactor.toml")?;
//! let redactor = DocumentRedactor::from_config(&config)?;
//!
//! let outcome = redactor.redact_file(Path::new("scan.pdf"), None).await?;
//! println!("Redacted {} items", outcome.total_matches());
//! # Ok(())
//! # }
//! ```

pub mod document;
