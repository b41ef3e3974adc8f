//! First-page rasterization.

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use tracing::debug;

use crate::encode::encode_jpeg;
use crate::ThumbnailError;

/// Resolution of a PDF page at zoom 1.0.
pub const PDF_BASE_DPI: f32 = 72.0;

/// Quality used for the intermediate JPEG of a rendered page.
pub const INTERMEDIATE_QUALITY: u8 = 95;

/// Linear scale that renders a page at `dpi`.
pub fn zoom_for_dpi(dpi: u32) -> f32 {
    dpi as f32 / PDF_BASE_DPI
}

/// Rasterize page index 0 at `zoom`, with form fields and annotations.
///
/// PDFium clears the bitmap to opaque white before drawing, so dropping the
/// alpha channel leaves the page on a white background.
pub fn render_first_page(document: &PdfDocument, zoom: f32) -> Result<RgbImage, ThumbnailError> {
    let page = document.pages().first()?;

    let config = PdfRenderConfig::new()
        .scale_page_by_factor(zoom)
        .render_form_data(true)
        .render_annotations(true);

    let bitmap = page.render_with_config(&config)?;
    let (width, height) = (bitmap.width() as u32, bitmap.height() as u32);
    debug!(width, height, zoom, "Rendered first page");

    let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes()).ok_or_else(|| {
        ThumbnailError::CorruptDocument(format!(
            "rendered bitmap does not match its {width}x{height} size"
        ))
    })?;

    Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
}

/// Encode a rendered page as JPEG and decode it again.
///
/// The result is a generic image that goes through the same resize and
/// encode steps as any decoded raster.
pub fn jpeg_round_trip(raster: RgbImage) -> Result<DynamicImage, ThumbnailError> {
    let bytes = encode_jpeg(&DynamicImage::ImageRgb8(raster), INTERMEDIATE_QUALITY)?;
    Ok(image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg)?)
}
