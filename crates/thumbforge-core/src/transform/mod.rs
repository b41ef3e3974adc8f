//! Pixel transforms applied between decoding and resizing.
//!
//! # Transform Order
//!
//! When generating a thumbnail, transforms are applied in this order:
//! 1. Trim (optional, images only)
//! 2. Flatten to RGB8 or L8 for JPEG output

mod flatten;
mod trim;

pub use flatten::{composite_on_white, flatten_for_jpeg};
pub use trim::{non_white_bounds, prepare_for_trim, trim_white_border, BoundingBox};
