//! Mapping of text spans onto page pixels
//!
//! Recognition may run on an upscaled copy of a page. Word boxes are scaled
//! back to the original resolution, padded, and clamped to the image before
//! they are painted.

use crate::redaction::models::{BoundingBox, PhiMatch, RecognizedWord};
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// Default padding, in pixels, added around each word box
pub const DEFAULT_PADDING: u32 = 2;

/// Rectangle in original-image pixels, `[left, right) × [top, bottom)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

/// Word boxes covering each match
///
/// A word belongs to a match when their half-open character ranges
/// intersect. Boxes are kept per word because a match may wrap onto another
/// line. Matches with no recognized word are left out.
pub fn map_matches_to_boxes(
    matches: &[PhiMatch],
    words: &[RecognizedWord],
) -> Vec<(PhiMatch, Vec<BoundingBox>)> {
    matches
        .iter()
        .filter_map(|m| {
            let boxes: Vec<BoundingBox> = words
                .iter()
                .filter(|w| m.overlaps(w.char_start, w.char_end))
                .map(|w| w.bbox)
                .collect();
            (!boxes.is_empty()).then(|| (m.clone(), boxes))
        })
        .collect()
}

/// Convert recognized-image boxes into padded original-image rectangles
///
/// `scale_factor` is the upscale applied before recognition; coordinates are
/// divided by it. Left and top edges round down and right and bottom edges
/// round up so the rectangle always contains the scaled box. Empty boxes are
/// skipped.
pub fn compute_redaction_rects(
    boxes: &[BoundingBox],
    scale_factor: f64,
    padding: u32,
    image_bounds: (u32, u32),
) -> Vec<PixelRect> {
    let (width, height) = image_bounds;
    let scale = if scale_factor.is_finite() && scale_factor > 0.0 {
        scale_factor
    } else {
        1.0
    };
    let pad = f64::from(padding);

    boxes
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| {
            let left = f64::from(b.x) / scale - pad;
            let top = f64::from(b.y) / scale - pad;
            let right = (f64::from(b.x) + f64::from(b.w)) / scale + pad;
            let bottom = (f64::from(b.y) + f64::from(b.h)) / scale + pad;

            PixelRect {
                left: clamp_px(left.floor(), width),
                top: clamp_px(top.floor(), height),
                right: clamp_px(right.ceil(), width),
                bottom: clamp_px(bottom.ceil(), height),
            }
        })
        .filter(|r| !r.is_empty())
        .collect()
}

fn clamp_px(value: f64, limit: u32) -> u32 {
    value.clamp(0.0, f64::from(limit)) as u32
}

/// Paint rectangles onto an image
pub fn fill_rects(image: &mut RgbImage, rects: &[PixelRect], color: [u8; 3]) {
    let (width, height) = image.dimensions();
    let fill = Rgb(color);

    for rect in rects {
        for y in rect.top..rect.bottom.min(height) {
            for x in rect.left..rect.right.min(width) {
                image.put_pixel(x, y, fill);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::models::PhiCategory;

    fn word(text: &str, start: usize, bbox: BoundingBox) -> RecognizedWord {
        RecognizedWord {
            text: text.to_string(),
            bbox,
            char_start: start,
            char_end: start + text.len(),
            block_id: 1,
            paragraph_id: 1,
            line_id: 1,
        }
    }

    #[test]
    fn test_map_collects_overlapping_words() {
        // "John Smith is stable"
        let words = vec![
            word("John", 0, BoundingBox::new(10, 10, 40, 12)),
            word("Smith", 5, BoundingBox::new(55, 10, 50, 12)),
            word("is", 11, BoundingBox::new(110, 10, 15, 12)),
            word("stable", 14, BoundingBox::new(130, 10, 55, 12)),
        ];
        let matches = vec![
            PhiMatch::new("John Smith", PhiCategory::Name, 0, 10, 0.95),
            PhiMatch::new("ghost", PhiCategory::Name, 40, 45, 0.95),
        ];

        let mapped = map_matches_to_boxes(&matches, &words);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].1.len(), 2);
        assert_eq!(mapped[0].1[1], BoundingBox::new(55, 10, 50, 12));
    }

    #[test]
    fn test_adjacent_word_not_included() {
        let words = vec![
            word("KJ", 0, BoundingBox::new(0, 0, 10, 10)),
            word("is", 3, BoundingBox::new(12, 0, 8, 10)),
        ];
        let matches = vec![PhiMatch::new("KJ", PhiCategory::Name, 0, 2, 0.85)];
        let mapped = map_matches_to_boxes(&matches, &words);
        assert_eq!(mapped[0].1, vec![BoundingBox::new(0, 0, 10, 10)]);
    }

    #[test]
    fn test_rects_scale_and_pad() {
        let boxes = vec![BoundingBox::new(100, 50, 40, 20)];
        let rects = compute_redaction_rects(&boxes, 2.0, 2, (500, 500));
        assert_eq!(
            rects,
            vec![PixelRect {
                left: 48,
                top: 23,
                right: 72,
                bottom: 37
            }]
        );
    }

    #[test]
    fn test_rects_clamped_to_image() {
        let boxes = vec![BoundingBox::new(0, 0, 30, 30), BoundingBox::new(90, 90, 30, 30)];
        let rects = compute_redaction_rects(&boxes, 1.0, 5, (100, 100));
        assert_eq!(rects[0].left, 0);
        assert_eq!(rects[0].top, 0);
        assert_eq!(rects[1].right, 100);
        assert_eq!(rects[1].bottom, 100);
    }

    #[test]
    fn test_rects_contain_scaled_box() {
        let boxes = vec![BoundingBox::new(13, 7, 11, 5)];
        let scale = 1.5;
        let rects = compute_redaction_rects(&boxes, scale, 0, (1000, 1000));
        let r = rects[0];
        assert!(f64::from(r.left) <= 13.0 / scale);
        assert!(f64::from(r.top) <= 7.0 / scale);
        assert!(f64::from(r.right) >= 24.0 / scale);
        assert!(f64::from(r.bottom) >= 12.0 / scale);
    }

    #[test]
    fn test_empty_boxes_skipped() {
        let boxes = vec![BoundingBox::new(10, 10, 0, 5)];
        assert!(compute_redaction_rects(&boxes, 1.0, 2, (100, 100)).is_empty());
    }

    #[test]
    fn test_fill_rects() {
        let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
        let rects = vec![PixelRect {
            left: 2,
            top: 2,
            right: 5,
            bottom: 4,
        }];
        fill_rects(&mut image, &rects, [0, 0, 0]);

        assert_eq!(image.get_pixel(2, 2), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(4, 3), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(5, 3), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(2, 4), &Rgb([255, 255, 255]));
    }
}
