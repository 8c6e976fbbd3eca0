//! Page image preparation for recognition

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};

/// Minimum shorter side, in pixels, below which pages are upscaled
pub const DEFAULT_UPSCALE_MIN_DIMENSION: u32 = 1000;

/// Contrast boost in percent
const CONTRAST_PERCENT: f32 = 50.0;

/// Unsharp mask parameters
const SHARPEN_SIGMA: f32 = 1.0;
const SHARPEN_THRESHOLD: i32 = 3;

/// Percentile spread below which a scan is treated as flat
const FLAT_SPREAD: u8 = 40;

/// 95th percentile brightness below which a flat scan is binarized
const FLAT_CEILING: u8 = 200;

/// A page image ready for recognition
#[derive(Debug, Clone)]
pub struct PreparedPage {
    /// Grayscale, possibly upscaled image
    pub image: GrayImage,
    /// Upscale applied; recognizer coordinates are divided by this to get
    /// original-image coordinates
    pub scale_factor: f64,
}

/// Upscale small pages, convert to grayscale, boost contrast, sharpen, and
/// binarize faded low-contrast scans
pub fn prepare_for_recognition(page: &RgbImage, min_dimension: u32) -> PreparedPage {
    let (width, height) = page.dimensions();
    let shorter = width.min(height);

    let (scaled, scale_factor) = if shorter > 0 && shorter < min_dimension {
        let factor = f64::from(min_dimension) / f64::from(shorter);
        let new_w = (f64::from(width) * factor) as u32;
        let new_h = (f64::from(height) * factor) as u32;
        (
            imageops::resize(page, new_w, new_h, FilterType::Lanczos3),
            factor,
        )
    } else {
        (page.clone(), 1.0)
    };

    let gray = imageops::grayscale(&scaled);
    let gray = imageops::contrast(&gray, CONTRAST_PERCENT);
    let mut gray = imageops::unsharpen(&gray, SHARPEN_SIGMA, SHARPEN_THRESHOLD);

    let (p5, p95) = percentiles(&gray);
    if p95.saturating_sub(p5) < FLAT_SPREAD && p95 < FLAT_CEILING {
        let threshold = ((u16::from(p5) + u16::from(p95)) / 2) as u8;
        binarize(&mut gray, threshold);
    }

    PreparedPage {
        image: gray,
        scale_factor,
    }
}

/// 5th and 95th percentile brightness
fn percentiles(image: &GrayImage) -> (u8, u8) {
    let mut histogram = [0u64; 256];
    for Luma([v]) in image.pixels() {
        histogram[*v as usize] += 1;
    }

    let total: u64 = histogram.iter().sum();
    if total == 0 {
        return (0, 255);
    }

    let mut cumulative = 0u64;
    let mut p5 = None;
    let mut p95 = None;
    for (level, count) in histogram.iter().enumerate() {
        cumulative += count;
        if p5.is_none() && cumulative * 100 >= total * 5 {
            p5 = Some(level as u8);
        }
        if cumulative * 100 >= total * 95 {
            p95 = Some(level as u8);
            break;
        }
    }

    (p5.unwrap_or(0), p95.unwrap_or(255))
}

fn binarize(image: &mut GrayImage, threshold: u8) {
    for Luma([v]) in image.pixels_mut() {
        *v = if *v > threshold { 255 } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_small_page_is_upscaled() {
        let page = RgbImage::from_pixel(200, 500, Rgb([255, 255, 255]));
        let prepared = prepare_for_recognition(&page, 1000);
        assert_eq!(prepared.scale_factor, 5.0);
        assert_eq!(prepared.image.dimensions(), (1000, 2500));
    }

    #[test]
    fn test_large_page_keeps_size() {
        let page = RgbImage::from_pixel(1200, 1600, Rgb([255, 255, 255]));
        let prepared = prepare_for_recognition(&page, 1000);
        assert_eq!(prepared.scale_factor, 1.0);
        assert_eq!(prepared.image.dimensions(), (1200, 1600));
    }

    #[test]
    fn test_percentiles() {
        let mut image = GrayImage::from_pixel(10, 10, Luma([100]));
        for x in 0..10 {
            image.put_pixel(x, 0, Luma([10]));
        }
        let (p5, p95) = percentiles(&image);
        assert_eq!(p5, 10);
        assert_eq!(p95, 100);
    }

    #[test]
    fn test_flat_dark_scan_is_binarized() {
        let mut page = RgbImage::from_pixel(1000, 1000, Rgb([120, 120, 120]));
        for x in 0..1000 {
            for y in 0..40 {
                page.put_pixel(x, y, Rgb([110, 110, 110]));
            }
        }
        let prepared = prepare_for_recognition(&page, 1000);
        assert!(prepared
            .image
            .pixels()
            .all(|Luma([v])| *v == 0 || *v == 255));
    }
}
