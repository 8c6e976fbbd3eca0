//! Domain error and result types.
//!
//! All fallible engine operations return [`Result<T, RedactorError>`]:
//!
//! ```rust
//! use phi_redactor::domain::{RedactorError, Result};
//! use std::path::Path;
//!
//! fn require_pdf(path: &Path) -> Result<()> {
//!     match path.extension().and_then(|e| e.to_str()) {
//!         Some("pdf") => Ok(()),
//!         other => Err(RedactorError::UnsupportedInputFormat(
//!             other.unwrap_or_default().to_string(),
//!         )),
//!     }
//! }
//!
//! assert!(require_pdf(Path::new("scan.pdf")).is_ok());
//! assert!(require_pdf(Path::new("notes.docx")).is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::RedactorError;
pub use result::Result;
