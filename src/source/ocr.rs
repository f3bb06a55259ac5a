//! Page-level OCR fallback for scanned PDFs.
//!
//! Each page's text layer is read with pdfium. Pages with fewer than
//! [`MIN_PAGE_TEXT_CHARS`] characters are rendered at [`OCR_DPI`] and passed through
//! Tesseract. Renders larger than [`MAX_OCR_PIXELS`] are skipped. The engine is only
//! compiled with the `ocr` feature; the page-merging rules are always available.

/// Pages whose trimmed text layer is shorter than this are OCR'd.
pub const MIN_PAGE_TEXT_CHARS: usize = 50;

/// Render resolution for OCR.
pub const OCR_DPI: f32 = 200.0;

/// Pages rendering to more pixels than this are not OCR'd.
pub const MAX_OCR_PIXELS: u64 = 12_000_000;

const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Returns `true` when a page's text layer is too thin to trust.
pub fn needs_ocr(page_text: &str) -> bool {
    page_text.chars().count() < MIN_PAGE_TEXT_CHARS
}

/// Pixel size of a page of `width_pts` x `height_pts` rendered at [`OCR_DPI`].
pub fn render_size(width_pts: f32, height_pts: f32) -> (u32, u32) {
    let pixels = |points: f32| (points * OCR_DPI / PDF_POINTS_PER_INCH).max(0.0) as u32;
    (pixels(width_pts), pixels(height_pts))
}

pub fn within_pixel_budget(width: u32, height: u32) -> bool {
    u64::from(width) * u64::from(height) <= MAX_OCR_PIXELS
}

/// Joins per-page text, substituting `ocr(page_index)` for thin pages.
pub fn merge_pages<I, F>(layers: I, mut ocr: F) -> String
where
    I: IntoIterator<Item = String>,
    F: FnMut(usize) -> String,
{
    let mut text = String::new();
    for (index, layer) in layers.into_iter().enumerate() {
        let layer = layer.trim();
        if needs_ocr(layer) {
            text.push_str(ocr(index).trim());
        } else {
            text.push_str(layer);
        }
        text.push('\n');
    }
    text.trim().to_string()
}

#[cfg(feature = "ocr")]
pub use engine::{OcrError, extract_with_ocr};

#[cfg(feature = "ocr")]
mod engine {
    use std::io::Cursor;

    use image::ImageFormat;
    use leptess::LepTess;
    use pdfium_render::prelude::*;
    use thiserror::Error;
    use tracing::{debug, warn};

    use super::{merge_pages, render_size, within_pixel_budget};

    const TESSERACT_LANGUAGE: &str = "eng";

    #[derive(Debug, Error)]
    pub enum OcrError {
        #[error("failed to bind pdfium: {0}")]
        Bind(String),

        #[error("failed to open PDF: {0}")]
        Load(String),
    }

    /// Text of every page, OCR'ing thin pages. Per-page OCR failures yield empty text for
    /// that page; only an unusable pdfium or document is an error.
    pub fn extract_with_ocr(document: &[u8]) -> Result<String, OcrError> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| OcrError::Bind(e.to_string()))?;
        let pdfium = Pdfium::new(bindings);
        let pdf = pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(|e| OcrError::Load(e.to_string()))?;

        let pages: Vec<_> = pdf.pages().iter().collect();
        let layers = pages
            .iter()
            .map(|page| page.text().map(|t| t.all()).unwrap_or_default());

        let mut tesseract = None;
        let text = merge_pages(layers, |index| {
            ocr_page(&pages[index], &mut tesseract).unwrap_or_else(|reason| {
                warn!(page = index + 1, %reason, "OCR failed for page");
                String::new()
            })
        });

        debug!(pages = pages.len(), chars = text.len(), "PDF extracted with OCR fallback");
        Ok(text)
    }

    fn ocr_page(page: &PdfPage<'_>, tesseract: &mut Option<LepTess>) -> Result<String, String> {
        let (width, height) = render_size(page.width().value, page.height().value);
        if !within_pixel_budget(width, height) {
            debug!(width, height, "Page render too large for OCR, skipping");
            return Ok(String::new());
        }

        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(width as i32)
                    .set_target_height(height as i32),
            )
            .map_err(|e| e.to_string())?;

        let mut png = Vec::new();
        bitmap
            .as_image()
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| e.to_string())?;

        let engine = match tesseract {
            Some(engine) => engine,
            None => tesseract.insert(
                LepTess::new(None, TESSERACT_LANGUAGE).map_err(|e| e.to_string())?,
            ),
        };
        engine.set_image_from_mem(&png).map_err(|e| e.to_string())?;
        engine.get_utf8_text().map_err(|e| e.to_string())
    }
}
