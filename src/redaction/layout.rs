//! Canonical text reconstruction from recognizer tokens
//!
//! Words are joined in recognition order. A block change inserts a blank
//! line, a paragraph or line change inserts a newline, and words on the same
//! line are separated by a single space. Structural rows (no confidence or no
//! text) add no text but still move the block/paragraph/line cursor, so a
//! boundary they introduce is kept.

use crate::redaction::models::{OcrToken, RecognizedWord};

/// Structural position of the previous token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    block: u32,
    paragraph: u32,
    line: u32,
}

impl Cursor {
    fn of(token: &OcrToken) -> Self {
        Self {
            block: token.block_id,
            paragraph: token.paragraph_id,
            line: token.line_id,
        }
    }

    /// Separator implied by moving from `self` to `next`, if any
    fn separator_to(&self, next: &Cursor) -> Option<&'static str> {
        if self.block != next.block {
            Some("\n\n")
        } else if self.paragraph != next.paragraph || self.line != next.line {
            Some("\n")
        } else {
            None
        }
    }
}

fn is_structural(token: &OcrToken) -> bool {
    let undefined = token.confidence.map_or(true, |c| c < 0.0);
    undefined || token.text.trim().is_empty()
}

/// Build the canonical text and the positioned word list for a page
///
/// Offsets in the returned words are byte offsets into the returned text.
pub fn build_canonical_text(tokens: &[OcrToken]) -> (String, Vec<RecognizedWord>) {
    let mut text = String::new();
    let mut words: Vec<RecognizedWord> = Vec::new();
    let mut previous: Option<Cursor> = None;
    let mut last_was_word = false;

    for token in tokens {
        let cursor = Cursor::of(token);
        let separator = previous.and_then(|p| p.separator_to(&cursor));

        if let Some(sep) = separator {
            if !text.is_empty() {
                text.push_str(sep);
                last_was_word = false;
            }
        }
        previous = Some(cursor);

        if is_structural(token) {
            continue;
        }

        if last_was_word {
            text.push(' ');
        }

        let trimmed = token.text.trim();
        let char_start = text.len();
        text.push_str(trimmed);

        words.push(RecognizedWord {
            text: trimmed.to_string(),
            bbox: token.bbox,
            char_start,
            char_end: text.len(),
            block_id: token.block_id,
            paragraph_id: token.paragraph_id,
            line_id: token.line_id,
        });
        last_was_word = true;
    }

    (text, words)
}
