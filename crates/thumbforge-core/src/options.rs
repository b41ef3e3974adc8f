//! Per-call thumbnail options.

use serde::{Deserialize, Serialize};

use crate::ThumbnailError;

/// Default bounding box width in pixels.
pub const DEFAULT_WIDTH: u32 = 400;
/// Default bounding box height in pixels.
pub const DEFAULT_HEIGHT: u32 = 400;
/// Default JPEG quality.
pub const DEFAULT_QUALITY: u8 = 85;
/// Default PDF rasterization resolution.
pub const DEFAULT_DPI: u32 = 150;

/// Options controlling thumbnail generation.
///
/// Every field is optional when deserialized, so a partial mapping such as
/// `{"width": 200}` picks up the defaults for the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailOptions {
    /// Bounding box width in pixels.
    pub width: u32,
    /// Bounding box height in pixels.
    pub height: u32,
    /// JPEG quality (0 to 100).
    pub quality: u8,
    /// Trim a uniform white border before resizing (images only).
    pub trim: bool,
    /// Rasterization resolution (PDFs only).
    pub dpi: u32,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            quality: DEFAULT_QUALITY,
            trim: false,
            dpi: DEFAULT_DPI,
        }
    }
}

impl ThumbnailOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Parse options from a JSON object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ThumbnailError> {
        let options: Self =
            serde_json::from_str(json).map_err(|e| ThumbnailError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Check that every field is within its accepted range.
    pub fn validate(&self) -> Result<(), ThumbnailError> {
        if self.width == 0 || self.height == 0 {
            return Err(ThumbnailError::InvalidOptions(format!(
                "width ({}) and height ({}) must be non-zero",
                self.width, self.height
            )));
        }
        if self.quality > 100 {
            return Err(ThumbnailError::InvalidOptions(format!(
                "quality ({}) must be between 0 and 100",
                self.quality
            )));
        }
        if self.dpi == 0 {
            return Err(ThumbnailError::InvalidOptions("dpi must be non-zero".to_string()));
        }
        Ok(())
    }
}
