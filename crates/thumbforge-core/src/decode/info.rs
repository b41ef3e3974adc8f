//! Header-only image inspection.

use std::fs;
use std::path::Path;

use image::{ImageDecoder, ImageFormat};
use tracing::{error, instrument};

use super::raster::{get_orientation, open_reader};
use super::types::format_name;
use super::ImageInfo;
use crate::ThumbnailError;

/// Read dimensions, format, color layout and orientation of an image file.
///
/// Pixel data is not decoded.
#[instrument(level = "debug", skip_all, fields(input = %input.as_ref().display()))]
pub fn read_image_info(input: impl AsRef<Path>) -> Result<ImageInfo, ThumbnailError> {
    let input = input.as_ref();
    let bytes = fs::read(input).map_err(|e| ThumbnailError::reading(e, input))?;

    let reader = open_reader(&bytes, ImageFormat::from_path(input).ok())?;
    // An unrecognized format fails in into_decoder
    let format = reader.format();
    let decoder = reader.into_decoder()?;
    let (width, height) = decoder.dimensions();

    Ok(ImageInfo {
        width,
        height,
        format: format.map(format_name).unwrap_or_default(),
        color_mode: decoder.color_type().into(),
        orientation: get_orientation(&bytes),
    })
}

/// Like [`read_image_info`], but logs the failure and returns `None`.
pub fn get_image_info(input: impl AsRef<Path>) -> Option<ImageInfo> {
    let input = input.as_ref();
    match read_image_info(input) {
        Ok(info) => Some(info),
        Err(e) => {
            error!(input = %input.display(), "Error getting image info: {e}");
            None
        }
    }
}
