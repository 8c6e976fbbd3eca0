//! Poppler `pdftoppm` rasterizer

use crate::adapters::traits::Rasterizer;
use crate::domain::{RedactorError, Result};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Default render resolution
pub const DEFAULT_DPI: u32 = 300;

const PAGE_PREFIX: &str = "page";

/// Rasterizer backed by the `pdftoppm` binary
///
/// Pages are rendered as PNG files into a temporary directory that is removed
/// when rasterization returns.
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    binary: PathBuf,
}

impl PdftoppmRasterizer {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new("pdftoppm")
    }
}

impl Rasterizer for PdftoppmRasterizer {
    fn rasterize(&self, document: &Path, dpi: u32) -> Result<Vec<RgbImage>> {
        let workdir = tempfile::tempdir()
            .map_err(|e| RedactorError::RasterizationFailure(format!("Temp dir: {e}")))?;
        let root = workdir.path().join(PAGE_PREFIX);

        tracing::debug!(document = %document.display(), dpi, "Rasterizing PDF");

        let output = Command::new(&self.binary)
            .args(["-r", &dpi.to_string(), "-png"])
            .arg(document)
            .arg(&root)
            .output()
            .map_err(|e| {
                RedactorError::RasterizationFailure(format!(
                    "Failed to run {}: {e}",
                    self.binary.display()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RedactorError::RasterizationFailure(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let pages = rendered_pages(workdir.path())?;
        if pages.is_empty() {
            return Err(RedactorError::RasterizationFailure(format!(
                "{} produced no pages",
                document.display()
            )));
        }

        pages
            .iter()
            .map(|path| {
                image::open(path).map(|img| img.to_rgb8()).map_err(|e| {
                    RedactorError::RasterizationFailure(format!(
                        "Failed to load rendered page {}: {e}",
                        path.display()
                    ))
                })
            })
            .collect()
    }
}

/// Rendered page files in page order
///
/// `pdftoppm` names pages `page-1.png` or `page-01.png` depending on the page
/// count, so the order comes from the numeric suffix.
fn rendered_pages(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pages: Vec<(u32, PathBuf)> = std::fs::read_dir(dir)
        .map_err(|e| RedactorError::RasterizationFailure(e.to_string()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter_map(|path| page_number(&path).map(|n| (n, path)))
        .collect();

    pages.sort_by_key(|(n, _)| *n);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}

fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (prefix, number) = stem.rsplit_once('-')?;
    if prefix != PAGE_PREFIX {
        return None;
    }
    number.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    #[test]
    fn test_page_number() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/x/page-012.png")), Some(12));
        assert_eq!(page_number(Path::new("/tmp/x/page-1.ppm")), None);
        assert_eq!(page_number(Path::new("/tmp/x/other-1.png")), None);
    }

    #[test]
    fn test_rendered_pages_sorted_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let pages = rendered_pages(dir.path()).unwrap();
        let names: Vec<_> = pages
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["page-1.png", "page-2.png", "page-10.png"]);
    }

    #[test]
    fn test_missing_binary_is_rasterization_failure() {
        let rasterizer = PdftoppmRasterizer::new("/nonexistent/pdftoppm-binary");
        let err = rasterizer
            .rasterize(Path::new("missing.pdf"), DEFAULT_DPI)
            .unwrap_err();
        assert!(matches!(err, RedactorError::RasterizationFailure(_)));
    }

    #[test]
    fn test_load_image_decode_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not an image").unwrap();

        let err = PdftoppmRasterizer::default().load_image(&path).unwrap_err();
        assert!(matches!(err, RedactorError::RasterizationFailure(_)));
    }
}
