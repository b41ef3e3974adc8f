//! Image decoding for thumbnail generation.
//!
//! This module provides functionality for:
//! - Decoding raster images (JPEG, PNG, GIF, BMP, TIFF, WebP)
//! - Applying EXIF orientation so pixels match the intended display
//! - Shrink-to-fit resizing
//! - Header-only inspection of image files
//!
//! # Examples
//!
//! ```ignore
//! use thumbforge_core::decode::{decode_image, shrink_to_fit};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes, None).unwrap();
//! let thumb = shrink_to_fit(image, 400, 400);
//! println!("Thumbnail is {}x{}", thumb.width(), thumb.height());
//! ```

mod info;
mod raster;
mod resize;
mod types;

pub use info::{get_image_info, read_image_info};
pub use raster::{decode_image, decode_image_no_orientation, get_orientation};
#[cfg(test)]
pub(crate) use raster::test_support;
pub use resize::{fit_within, shrink_to_fit};
pub use types::{format_name, ColorMode, ImageInfo, Orientation};
