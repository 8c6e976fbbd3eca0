//! File output for redacted documents
//!
//! Single images are written through the `image` crate in the format implied
//! by the file extension. Multi-page documents are written as an image-only
//! PDF: each page is a JPEG XObject on a page sized `pixels × 72 / dpi`
//! points, so the printed size matches the scan.

use crate::adapters::traits::PageWriter;
use crate::domain::{RedactorError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

/// JPEG quality for embedded pages
const JPEG_QUALITY: u8 = 90;

/// PDF user-space units per inch
const POINTS_PER_INCH: f32 = 72.0;

/// Writes redacted output to the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FileWriter;

impl FileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl PageWriter for FileWriter {
    fn write_image(&self, image: &RgbImage, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        image.save(path).map_err(|e| {
            RedactorError::WriteFailure(format!("Failed to write {}: {e}", path.display()))
        })
    }

    fn write_pages(&self, pages: &[RgbImage], dpi: u32, path: &Path) -> Result<()> {
        if pages.is_empty() {
            return Err(RedactorError::WriteFailure(
                "No pages to write".to_string(),
            ));
        }
        ensure_parent(path)?;

        let mut doc = build_pdf(pages, dpi)?;
        doc.save(path).map_err(|e| {
            RedactorError::WriteFailure(format!("Failed to write {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), pages = pages.len(), "PDF written");
        Ok(())
    }

    fn write_text(&self, text: &str, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        std::fs::write(path, text).map_err(|e| {
            RedactorError::WriteFailure(format!("Failed to write {}: {e}", path.display()))
        })
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| {
                RedactorError::WriteFailure(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            }),
        _ => Ok(()),
    }
}

/// Build an image-only PDF with one page per bitmap
fn build_pdf(pages: &[RgbImage], dpi: u32) -> Result<Document> {
    let dpi = if dpi == 0 { 72 } else { dpi };
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = add_page(&mut doc, pages_id, page, dpi)?;
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    Ok(doc)
}

fn add_page(doc: &mut Document, parent: ObjectId, page: &RgbImage, dpi: u32) -> Result<ObjectId> {
    let (width, height) = page.dimensions();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(page)
        .map_err(|e| RedactorError::WriteFailure(format!("JPEG encoding failed: {e}")))?;

    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8_i64,
            "Filter" => "DCTDecode",
        },
        jpeg,
    )
    .with_compression(false);
    let image_id = doc.add_object(image);

    let width_pt = width as f32 * POINTS_PER_INCH / dpi as f32;
    let height_pt = height as f32 * POINTS_PER_INCH / dpi as f32;

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(width_pt),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(height_pt),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| RedactorError::WriteFailure(format!("PDF content encoding failed: {e}")))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ],
        "Contents" => content_id,
        "Resources" => dictionary! {
            "XObject" => dictionary! {
                "Im0" => image_id,
            },
        },
    }))
}
