//! Raster image decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::Orientation;
use crate::ThumbnailError;

/// Decode an image from bytes, applying EXIF orientation correction.
///
/// The format is guessed from the content. `hint` (usually derived from the
/// file extension) is only used when the content is not recognized.
///
/// # Errors
///
/// Returns `ThumbnailError::Decode` if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8], hint: Option<ImageFormat>) -> Result<DynamicImage, ThumbnailError> {
    let orientation = extract_orientation(bytes);
    let img = decode_image_no_orientation(bytes, hint)?;
    Ok(apply_orientation(img, orientation))
}

/// Decode an image from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(
    bytes: &[u8],
    hint: Option<ImageFormat>,
) -> Result<DynamicImage, ThumbnailError> {
    let reader = open_reader(bytes, hint)?;
    Ok(reader.decode()?)
}

/// Build a reader over in-memory bytes with its format resolved.
pub(crate) fn open_reader(
    bytes: &[u8],
    hint: Option<ImageFormat>,
) -> Result<ImageReader<Cursor<&[u8]>>, ThumbnailError> {
    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;

    if reader.format().is_none() {
        if let Some(format) = hint {
            reader.set_format(format);
        }
    }
    Ok(reader)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
pub(crate) fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}
