//! JPEG encoding for thumbnail output.
//!
//! Encoding happens fully in memory so that a failure never leaves a partial
//! file behind.

use std::io::{Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, ImageEncoder};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ThumbnailError;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The image must be flattened to RGB8 or L8 first
    #[error("Unsupported color type for JPEG: {0:?}")]
    UnsupportedColor(ColorType),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGB8 or L8 image to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The image to encode, already flattened
/// * `quality` - JPEG quality; values outside 1-100 are clamped
///
/// # Quality Guidelines
///
/// * 90-100: High quality, suitable for archival or further editing
/// * 80-90: Good quality, recommended for thumbnails
/// * 60-80: Medium quality, acceptable for web
/// * Below 60: Low quality, visible artifacts
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let color = image.color();
    if !matches!(color, ColorType::Rgb8 | ColorType::L8) {
        return Err(EncodeError::UnsupportedColor(color));
    }

    // The encoder accepts 1-100 only
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(image.as_bytes(), width, height, color.into())
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Write encoded bytes to `path`, replacing any existing file.
///
/// The bytes go to a temporary file in the same directory, which is then
/// renamed over `path`. On failure the temporary file is removed and any
/// existing file at `path` is left as it was.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ThumbnailError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| ThumbnailError::writing(e, path))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.flush())
        .map_err(|e| ThumbnailError::writing(e, path))?;
    tmp.persist(path)
        .map_err(|e| ThumbnailError::writing(e.error, path))?;
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
