//! PDF first-page thumbnails.

use std::fs;
use std::path::Path;

use tracing::{info, instrument};

use super::library::bind_pdfium;
use super::render::{jpeg_round_trip, render_first_page, zoom_for_dpi};
use crate::thumbnail::{finish, report, Thumbnail};
use crate::{ThumbnailError, ThumbnailOptions};

/// Generate a JPEG thumbnail from the first page of a PDF.
///
/// The page is rendered at `options.dpi`, shrunk to fit the requested box and
/// written as JPEG to `output`. `options.trim` is not consulted.
///
/// # Errors
///
/// * `InputNotFound` / `PermissionDenied` when the input cannot be read
/// * `PdfiumUnavailable` when the PDFium library cannot be bound
/// * `CorruptDocument` when PDFium rejects the file
/// * `EmptyDocument` when the document has no pages
#[instrument(level = "debug", skip_all, fields(input = %input.as_ref().display()))]
pub fn try_generate_pdf_thumbnail(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ThumbnailOptions,
) -> Result<Thumbnail, ThumbnailError> {
    let (input, output) = (input.as_ref(), output.as_ref());
    options.validate()?;

    info!("Generating thumbnail from PDF: {}", input.display());
    info!(
        "Target size: {}x{}, Quality: {}, DPI: {}",
        options.width, options.height, options.quality, options.dpi
    );

    let bytes = fs::read(input).map_err(|e| ThumbnailError::reading(e, input))?;

    let pdfium = bind_pdfium()?;
    let document = pdfium
        .load_pdf_from_byte_slice(&bytes, None)
        .map_err(|e| ThumbnailError::CorruptDocument(e.to_string()))?;

    if document.pages().is_empty() {
        return Err(ThumbnailError::EmptyDocument(input.to_path_buf()));
    }

    let raster = render_first_page(&document, zoom_for_dpi(options.dpi))?;
    info!("PDF page rendered, size: {}x{}", raster.width(), raster.height());

    let image = jpeg_round_trip(raster)?;
    info!("PDF converted to image, size: {}x{}", image.width(), image.height());

    let thumbnail = finish(image, output, options)?;
    info!("Successfully created PDF thumbnail: {}", output.display());
    Ok(thumbnail)
}

/// Like [`try_generate_pdf_thumbnail`], but logs the failure and returns `false`.
pub fn generate_pdf_thumbnail(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &ThumbnailOptions,
) -> bool {
    report("generate_pdf_thumbnail", || {
        try_generate_pdf_thumbnail(input, output, options)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_image_info;
    use crate::pdf::is_pdfium_available;
    use crate::ErrorKind;
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static PDFIUM_LOCK: Mutex<()> = Mutex::new(());

    /// Serialize tests that may initialize PDFium.
    fn pdfium_lock() -> MutexGuard<'static, ()> {
        PDFIUM_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Assemble a PDF with a correct cross-reference table.
    fn build_pdf(objects: &[&str]) -> Vec<u8> {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<</Size {}/Root 1 0 R>>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    /// A4 portrait page with a single filled rectangle.
    fn one_page_pdf() -> Vec<u8> {
        let content = "0 0 1 rg 100 100 200 300 re f";
        build_pdf(&[
            "<</Type/Catalog/Pages 2 0 R>>",
            "<</Type/Pages/Kids[3 0 R]/Count 1>>",
            "<</Type/Page/MediaBox[0 0 595 842]/Parent 2 0 R/Contents 4 0 R>>",
            &format!("<</Length {}>>\nstream\n{content}\nendstream", content.len()),
        ])
    }

    /// Portrait first page (300x600 pt) followed by a landscape page (800x200 pt).
    fn two_page_pdf() -> Vec<u8> {
        let content = "0 g 10 10 50 50 re f";
        let stream = format!("<</Length {}>>\nstream\n{content}\nendstream", content.len());
        build_pdf(&[
            "<</Type/Catalog/Pages 2 0 R>>",
            "<</Type/Pages/Kids[3 0 R 4 0 R]/Count 2>>",
            "<</Type/Page/MediaBox[0 0 300 600]/Parent 2 0 R/Contents 5 0 R>>",
            "<</Type/Page/MediaBox[0 0 800 200]/Parent 2 0 R/Contents 5 0 R>>",
            &stream,
        ])
    }

    fn empty_pdf() -> Vec<u8> {
        build_pdf(&["<</Type/Catalog/Pages 2 0 R>>", "<</Type/Pages/Kids[]/Count 0>>"])
    }

    fn write(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_pdf_returns_false() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.pdf");
        let output = dir.path().join("missing.jpg");

        let err = try_generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputNotFound);

        assert!(!generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default()));
        assert!(!output.exists());
    }

    #[test]
    fn test_garbage_pdf_returns_false() {
        let _guard = pdfium_lock();
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "garbage.pdf", b"definitely not a pdf");
        let output = dir.path().join("garbage.jpg");

        assert!(!generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default()));
        assert!(!output.exists());
    }

    #[test]
    fn test_garbage_pdf_is_corrupt() {
        let _guard = pdfium_lock();
        if !is_pdfium_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "garbage.pdf", b"definitely not a pdf");
        let output = dir.path().join("garbage.jpg");

        let err = try_generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptDocument);
    }

    #[test]
    fn test_empty_pdf_returns_false() {
        let _guard = pdfium_lock();
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "empty.pdf", &empty_pdf());
        let output = dir.path().join("empty.jpg");

        assert!(!generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default()));
        assert!(!output.exists());
    }

    #[test]
    fn test_empty_pdf_is_empty_document() {
        let _guard = pdfium_lock();
        if !is_pdfium_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "empty.pdf", &empty_pdf());
        let output = dir.path().join("empty.jpg");

        let err = try_generate_pdf_thumbnail(&input, &output, &ThumbnailOptions::default())
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::EmptyDocument(_)), "got {err:?}");
        assert_eq!(err.kind(), ErrorKind::CorruptDocument);
        assert!(!output.exists());
    }

    #[test]
    fn test_renders_first_page_only() {
        let _guard = pdfium_lock();
        if !is_pdfium_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "two.pdf", &two_page_pdf());
        let output = dir.path().join("two.jpg");

        // At 72 DPI the raster matches the page size in points
        let opts = ThumbnailOptions::new().with_size(400, 400).with_dpi(72);
        let thumb = try_generate_pdf_thumbnail(&input, &output, &opts).unwrap();

        // Page 0 is portrait 1:2, page 1 would be landscape 4:1
        assert_eq!((thumb.width, thumb.height), (200, 400));
        assert_eq!(read_image_info(&output).unwrap().size(), (200, 400));
    }

    #[test]
    fn test_first_page_fits_box() {
        let _guard = pdfium_lock();
        if !is_pdfium_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "page.pdf", &one_page_pdf());
        let output = dir.path().join("page.jpg");

        let opts = ThumbnailOptions::new().with_size(400, 400);
        let thumb = try_generate_pdf_thumbnail(&input, &output, &opts).unwrap();

        // Portrait page: height is the binding side
        assert_eq!(thumb.height, 400);
        assert!(thumb.width < 400);

        let info = read_image_info(&output).unwrap();
        assert_eq!((info.width, info.height), (thumb.width, thumb.height));
        assert_eq!(info.format, "JPEG");
    }
}
