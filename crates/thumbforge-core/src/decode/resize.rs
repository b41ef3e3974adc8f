//! Shrink-to-fit resizing for thumbnails.
//!
//! Images are only ever reduced: anything already inside the bounding box is
//! returned unchanged.

use image::imageops::FilterType;
use image::DynamicImage;

/// Calculate the size of an image shrunk to fit within `max_width x max_height`.
///
/// The side that constrains the fit is set to its bound. The other side is
/// the floor or ceiling of its exact scaled length, whichever keeps the
/// aspect ratio closest (floor wins ties), and never less than 1.
///
/// Returns the input size unchanged when it already fits.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    let max_width = max_width.max(1);
    let max_height = max_height.max(1);

    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    let (bound_w, bound_h) = (max_width as f64, max_height as f64);

    if bound_w / bound_h >= aspect {
        // Taller than the box: height is the binding constraint
        let new_width = closest_rounding(bound_h * aspect, |n| (aspect - n / bound_h).abs());
        (new_width, max_height)
    } else {
        // Wider than the box: width is the binding constraint
        let new_height = closest_rounding(bound_w / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - bound_w / n).abs()
            }
        });
        (max_width, new_height)
    }
}

fn closest_rounding(exact: f64, error: impl Fn(f64) -> f64) -> u32 {
    let (floor, ceil) = (exact.floor(), exact.ceil());
    let picked = if error(ceil) < error(floor) { ceil } else { floor };
    (picked as u32).max(1)
}

/// Shrink an image to fit within a bounding box using Lanczos3 resampling.
///
/// Aspect ratio is preserved and the image is never enlarged.
pub fn shrink_to_fit(image: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    let (new_width, new_height) = fit_within(width, height, max_width, max_height);

    // Fast path: already fits
    if (new_width, new_height) == (width, height) {
        return image;
    }

    image.resize_exact(new_width, new_height, FilterType::Lanczos3)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
