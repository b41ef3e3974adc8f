//! Core types for image decoding.

use std::fmt;

use serde::{Deserialize, Serialize};

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Pixel layout reported by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorMode {
    /// 8-bit grayscale.
    L8,
    /// 8-bit grayscale with alpha.
    La8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGB with alpha.
    Rgba8,
    /// 16-bit grayscale.
    L16,
    /// 16-bit grayscale with alpha.
    La16,
    /// 16-bit RGB.
    Rgb16,
    /// 16-bit RGB with alpha.
    Rgba16,
    /// 32-bit float RGB.
    Rgb32F,
    /// 32-bit float RGB with alpha.
    Rgba32F,
    /// A layout this crate does not name.
    Unknown,
}

impl ColorMode {
    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            ColorMode::La8 | ColorMode::Rgba8 | ColorMode::La16 | ColorMode::Rgba16 | ColorMode::Rgba32F
        )
    }
}

impl From<image::ColorType> for ColorMode {
    fn from(color: image::ColorType) -> Self {
        use image::ColorType;

        match color {
            ColorType::L8 => ColorMode::L8,
            ColorType::La8 => ColorMode::La8,
            ColorType::Rgb8 => ColorMode::Rgb8,
            ColorType::Rgba8 => ColorMode::Rgba8,
            ColorType::L16 => ColorMode::L16,
            ColorType::La16 => ColorMode::La16,
            ColorType::Rgb16 => ColorMode::Rgb16,
            ColorType::Rgba16 => ColorMode::Rgba16,
            ColorType::Rgb32F => ColorMode::Rgb32F,
            ColorType::Rgba32F => ColorMode::Rgba32F,
            _ => ColorMode::Unknown,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Information about an image file, read without decoding pixel data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Stored width in pixels (before orientation correction).
    pub width: u32,
    /// Stored height in pixels (before orientation correction).
    pub height: u32,
    /// Detected container format, e.g. `"JPEG"` or `"PNG"`.
    pub format: String,
    /// Decoder color layout.
    pub color_mode: ColorMode,
    /// EXIF orientation, `Normal` when absent.
    pub orientation: Orientation,
}

impl ImageInfo {
    /// Stored dimensions as a `(width, height)` pair.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the effective dimensions after orientation correction.
    pub fn oriented_dimensions(&self) -> (u32, u32) {
        if self.orientation.swaps_dimensions() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }
}

/// Upper-case tag for an image container format (`Jpeg` becomes `"JPEG"`).
pub fn format_name(format: image::ImageFormat) -> String {
    format!("{format:?}").to_uppercase()
}
