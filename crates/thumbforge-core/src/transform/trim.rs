//! White border trimming.
//!
//! The image is compared against a pure white canvas of the same size and
//! cropped to the bounding box of the pixels that differ. Borders of any other
//! color are left alone.

use image::DynamicImage;
use tracing::info;

/// A pixel rectangle, `right` and `bottom` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Normalize an image for trimming: RGB8 and L8 are kept, anything else is
/// converted to RGB8. Alpha is dropped without compositing.
pub fn prepare_for_trim(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageRgb8(other.into_rgb8()),
    }
}

/// Find the bounding box of every pixel that is not pure white.
///
/// Returns `None` when the image is entirely white (or empty).
pub fn non_white_bounds(image: &DynamicImage) -> Option<BoundingBox> {
    let channels = image.color().channel_count() as usize;
    match image {
        DynamicImage::ImageRgb8(buf) => scan_bounds(buf.as_raw(), buf.width(), buf.height(), channels),
        DynamicImage::ImageLuma8(buf) => scan_bounds(buf.as_raw(), buf.width(), buf.height(), channels),
        other => {
            let rgb = other.to_rgb8();
            scan_bounds(rgb.as_raw(), rgb.width(), rgb.height(), 3)
        }
    }
}

fn scan_bounds(pixels: &[u8], width: u32, height: u32, channels: usize) -> Option<BoundingBox> {
    let row_len = width as usize * channels;
    if row_len == 0 {
        return None;
    }

    let mut bounds: Option<BoundingBox> = None;
    for (y, row) in pixels.chunks_exact(row_len).take(height as usize).enumerate() {
        let is_ink = |px: &[u8]| px.iter().any(|&v| v != u8::MAX);
        let Some(first) = row.chunks_exact(channels).position(is_ink) else {
            continue;
        };
        let last = row.chunks_exact(channels).rposition(is_ink).unwrap_or(first);

        let (y, first, last) = (y as u32, first as u32, last as u32);
        bounds = Some(match bounds {
            None => BoundingBox {
                left: first,
                top: y,
                right: last + 1,
                bottom: y + 1,
            },
            Some(b) => BoundingBox {
                left: b.left.min(first),
                top: b.top,
                right: b.right.max(last + 1),
                bottom: y + 1,
            },
        });
    }
    bounds
}

/// Crop away a uniform white border.
///
/// The image is first normalized with [`prepare_for_trim`]. If it has no
/// non-white pixel it is returned uncropped.
pub fn trim_white_border(image: DynamicImage) -> DynamicImage {
    let image = prepare_for_trim(image);
    match non_white_bounds(&image) {
        Some(b) if (b.width(), b.height()) != (image.width(), image.height()) => {
            info!(
                left = b.left,
                top = b.top,
                right = b.right,
                bottom = b.bottom,
                "Trimmed image to bounding box"
            );
            image.crop_imm(b.left, b.top, b.width(), b.height())
        }
        _ => image,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
