//! Color normalization for JPEG output.
//!
//! JPEG has no alpha channel, so transparent pixels are composited onto an
//! opaque white background. Layouts the encoder cannot take directly are
//! converted to 8-bit RGB.

use image::{DynamicImage, Rgb, RgbImage, RgbaImage};

/// Normalize an image to 8-bit RGB or 8-bit grayscale.
///
/// - Images with alpha are composited onto white and become RGB8.
/// - RGB8 and L8 pass through untouched.
/// - Everything else (16-bit, float) is converted to RGB8.
pub fn flatten_for_jpeg(image: DynamicImage) -> DynamicImage {
    if image.color().has_alpha() {
        return DynamicImage::ImageRgb8(composite_on_white(&image.into_rgba8()));
    }
    match image {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => image,
        other => DynamicImage::ImageRgb8(other.into_rgb8()),
    }
}

/// Composite an RGBA image onto an opaque white canvas, using alpha as the mask.
pub fn composite_on_white(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        Rgb([blend(r, a), blend(g, a), blend(b, a)])
    })
}

/// `value * alpha + 255 * (1 - alpha)`, rounded.
#[inline]
fn blend(value: u8, alpha: u8) -> u8 {
    let (v, a) = (value as u32, alpha as u32);
    ((v * a + 255 * (255 - a) + 127) / 255) as u8
}
