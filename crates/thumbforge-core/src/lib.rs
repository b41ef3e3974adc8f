//! Thumbforge Core - JPEG thumbnail generation
//!
//! This crate turns raster images and the first page of PDF documents into
//! fixed-size JPEG thumbnails, and reads basic image metadata without decoding
//! pixel data.
//!
//! Each operation has a `try_*` form returning [`ThumbnailError`] and a
//! logging wrapper that reports success as a `bool` (or `Option` for info).

pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod pdf;
pub mod thumbnail;
pub mod transform;

pub use decode::{get_image_info, read_image_info, ColorMode, ImageInfo, Orientation};
pub use error::{ErrorKind, ThumbnailError};
pub use options::ThumbnailOptions;
pub use pdf::{generate_pdf_thumbnail, is_pdfium_available, try_generate_pdf_thumbnail, zoom_for_dpi};
pub use thumbnail::{generate_thumbnail, try_generate_thumbnail, Thumbnail};
