//! Raster image thumbnails.
//!
//! Both thumbnail entry points come in two flavors: `try_*` functions that
//! return a [`ThumbnailError`], and boolean wrappers that log every failure
//! and report `false`.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::{error, info, instrument};

use crate::decode::{decode_image, shrink_to_fit};
use crate::encode::{encode_jpeg, write_output};
use crate::transform::{flatten_for_jpeg, trim_white_border};
use crate::{ErrorKind, ThumbnailError, ThumbnailOptions};

/// A thumbnail that was written successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub bytes_written: usize,
}

/// Generate a JPEG thumbnail from a raster image.
///
/// The image is oriented per its EXIF data, optionally trimmed of a white
/// border, flattened onto white, shrunk to fit the requested box and written
/// as JPEG to `output`, replacing any existing file.
#[instrument(level = "debug", skip_all, fields(input = %input.as_ref().display()))]
pub fn try_generate_thumbnail(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ThumbnailOptions,
) -> Result<Thumbnail, ThumbnailError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    options.validate()?;

    info!("Generating thumbnail from {}", input.display());
    info!(
        "Target size: {}x{}, Quality: {}, Trim: {}",
        options.width, options.height, options.quality, options.trim
    );

    let bytes = fs::read(input).map_err(|e| ThumbnailError::reading(e, input))?;
    let mut image = decode_image(&bytes, ImageFormat::from_path(input).ok())?;

    if options.trim {
        image = trim_white_border(image);
    }

    let thumbnail = finish(flatten_for_jpeg(image), output, options)?;
    info!("Successfully created thumbnail: {}", output.display());
    Ok(thumbnail)
}

/// Like [`try_generate_thumbnail`], but logs the failure and returns `false`.
pub fn generate_thumbnail(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ThumbnailOptions,
) -> bool {
    report("generate_thumbnail", || try_generate_thumbnail(input, output, options))
}

/// Shrink an RGB8 or L8 image to fit the options' box, encode and write it.
pub(crate) fn finish(
    image: DynamicImage,
    output: &Path,
    options: &ThumbnailOptions,
) -> Result<Thumbnail, ThumbnailError> {
    let image = shrink_to_fit(image, options.width, options.height);
    let (width, height) = (image.width(), image.height());
    info!("Thumbnail size after resize: {width}x{height}");

    let bytes = encode_jpeg(&image, options.quality)?;
    write_output(output, &bytes)?;

    Ok(Thumbnail {
        width,
        height,
        bytes_written: bytes.len(),
    })
}

/// Run a thumbnail job, logging any error or panic, and report success.
pub(crate) fn report(
    operation: &str,
    job: impl FnOnce() -> Result<Thumbnail, ThumbnailError>,
) -> bool {
    match panic::catch_unwind(AssertUnwindSafe(job)) {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            error!(operation, kind = ?e.kind(), "{}", failure_message(operation, &e));
            false
        }
        Err(_) => {
            error!(operation, "Panic in {operation}");
            false
        }
    }
}

/// Log line for a failed job, naming the entry point it came from.
fn failure_message(operation: &str, err: &ThumbnailError) -> String {
    match err.kind() {
        ErrorKind::Unanticipated => format!("Exception in {operation}: {err}"),
        _ => format!("{operation}: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_image_info;
    use crate::decode::test_support::with_exif_orientation;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn options(width: u32, height: u32) -> ThumbnailOptions {
        ThumbnailOptions::new().with_size(width, height).with_quality(85)
    }

    #[test]
    fn test_landscape_jpeg_fits_box() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("wide.jpg");
        let output = dir.path().join("wide_thumb.jpg");
        RgbImage::from_pixel(1000, 500, Rgb([30, 90, 200])).save(&input).unwrap();

        let thumb = try_generate_thumbnail(&input, &output, &options(200, 200)).unwrap();
        assert_eq!((thumb.width, thumb.height), (200, 100));
        assert_eq!(thumb.bytes_written as u64, fs::metadata(&output).unwrap().len());

        let info = read_image_info(&output).unwrap();
        assert_eq!((info.width, info.height), (200, 100));
        assert_eq!(info.format, "JPEG");
    }

    #[test]
    fn test_exif_rotation_applied_before_resize() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("rotated.jpg");
        let output = dir.path().join("rotated_thumb.jpg");
        let src = DynamicImage::ImageRgb8(RgbImage::from_pixel(400, 200, Rgb([90, 30, 10])));
        let jpeg = encode_jpeg(&src, 90).unwrap();
        fs::write(&input, with_exif_orientation(&jpeg, 6)).unwrap();

        let thumb = try_generate_thumbnail(&input, &output, &options(100, 100)).unwrap();
        assert_eq!((thumb.width, thumb.height), (50, 100));

        let info = read_image_info(&output).unwrap();
        assert_eq!(info.size(), (50, 100));
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("small.png");
        let output = dir.path().join("small.jpg");
        RgbImage::from_pixel(50, 30, Rgb([1, 2, 3])).save(&input).unwrap();

        let thumb = try_generate_thumbnail(&input, &output, &options(400, 400)).unwrap();
        assert_eq!((thumb.width, thumb.height), (50, 30));
    }

    #[test]
    fn test_transparent_png_becomes_white() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("clear.png");
        let output = dir.path().join("clear.jpg");
        RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 0])).save(&input).unwrap();

        assert!(generate_thumbnail(&input, &output, &options(20, 20)));

        let out = image::open(&output).unwrap().to_rgb8();
        assert_eq!(out.dimensions(), (20, 20));
        let px = out.get_pixel(10, 10).0;
        assert!(px.iter().all(|&v| v >= 250), "expected white, got {px:?}");
    }

    #[test]
    fn test_trim_removes_white_frame() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("framed.png");
        let output = dir.path().join("framed.jpg");
        let img = RgbImage::from_fn(300, 200, |x, y| {
            if (100..160).contains(&x) && (50..90).contains(&y) {
                Rgb([200, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        img.save(&input).unwrap();

        let opts = options(400, 400).with_trim(true);
        let thumb = try_generate_thumbnail(&input, &output, &opts).unwrap();
        assert_eq!((thumb.width, thumb.height), (60, 40));
    }

    #[test]
    fn test_trim_disabled_keeps_frame() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("framed.png");
        let output = dir.path().join("framed.jpg");
        let mut img = RgbImage::from_pixel(300, 200, Rgb([255, 255, 255]));
        img.put_pixel(150, 100, Rgb([0, 0, 0]));
        img.save(&input).unwrap();

        let thumb = try_generate_thumbnail(&input, &output, &options(400, 400)).unwrap();
        assert_eq!((thumb.width, thumb.height), (300, 200));
    }

    #[test]
    fn test_grayscale_stays_grayscale() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("gray.png");
        let output = dir.path().join("gray.jpg");
        GrayImage::from_pixel(100, 100, Luma([77])).save(&input).unwrap();

        assert!(generate_thumbnail(&input, &output, &options(50, 50)));
        let info = read_image_info(&output).unwrap();
        assert_eq!(info.color_mode, crate::ColorMode::L8);
    }

    #[test]
    fn test_overwrites_existing_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.jpg");
        RgbImage::from_pixel(10, 10, Rgb([9, 9, 9])).save(&input).unwrap();
        fs::write(&output, b"not a jpeg").unwrap();

        assert!(generate_thumbnail(&input, &output, &options(400, 400)));
        assert_eq!(read_image_info(&output).unwrap().format, "JPEG");
    }

    #[test]
    fn test_missing_input_returns_false() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("nope.jpg");
        let output = dir.path().join("nope_thumb.jpg");

        let err = try_generate_thumbnail(&input, &output, &options(200, 200)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputNotFound);

        assert!(!generate_thumbnail(&input, &output, &options(200, 200)));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_output_dir_returns_false() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("missing").join("out.jpg");
        RgbImage::new(10, 10).save(&input).unwrap();

        assert!(!generate_thumbnail(&input, &output, &options(200, 200)));
        assert!(!output.exists());
    }

    #[test]
    fn test_undecodable_input_returns_false() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("broken.png");
        let output = dir.path().join("broken.jpg");
        fs::write(&input, b"this is not a png").unwrap();

        let err = try_generate_thumbnail(&input, &output, &options(200, 200)).unwrap_err();
        assert!(matches!(err, ThumbnailError::Decode(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_options_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.jpg");
        RgbImage::new(10, 10).save(&input).unwrap();

        let opts = options(0, 200);
        let err = try_generate_thumbnail(&input, &output, &opts).unwrap_err();
        assert!(matches!(err, ThumbnailError::InvalidOptions(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_failure_message_names_operation() {
        let err = ThumbnailError::InputNotFound("missing.pdf".into());
        let image = failure_message("generate_thumbnail", &err);
        let pdf = failure_message("generate_pdf_thumbnail", &err);

        assert_eq!(image, "generate_thumbnail: Input file not found: missing.pdf");
        assert_eq!(pdf, "generate_pdf_thumbnail: Input file not found: missing.pdf");
        assert_ne!(image, pdf);
    }

    #[test]
    fn test_failure_message_unanticipated() {
        let err = ThumbnailError::InvalidOptions("width (0) and height (1) must be non-zero".into());
        assert_eq!(
            failure_message("generate_thumbnail", &err),
            "Exception in generate_thumbnail: Invalid thumbnail options: width (0) and height (1) must be non-zero"
        );
    }

    #[test]
    fn test_report_catches_panic() {
        assert!(!report("test", || panic!("boom")));
    }
}
