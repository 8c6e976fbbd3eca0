//! Recognition output models

use serde::{Deserialize, Serialize};

/// Pixel bounding box `(x, y, w, h)` in the coordinate space of the image
/// that was recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the box covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// Raw token reported by a recognizer, before canonical text is built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrToken {
    /// Token text as reported (may be blank)
    pub text: String,
    /// Recognition confidence; `None` for structural rows with no word
    pub confidence: Option<f32>,
    /// Token box
    pub bbox: BoundingBox,
    /// Block number
    pub block_id: u32,
    /// Paragraph number within the block
    pub paragraph_id: u32,
    /// Line number within the paragraph
    pub line_id: u32,
}

/// A recognized word positioned in the canonical text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    /// Trimmed word text
    pub text: String,
    /// Word box in recognized-image pixels
    pub bbox: BoundingBox,
    /// Start offset in the canonical text
    pub char_start: usize,
    /// End offset in the canonical text (exclusive)
    pub char_end: usize,
    /// Block number
    pub block_id: u32,
    /// Paragraph number
    pub paragraph_id: u32,
    /// Line number
    pub line_id: u32,
}
