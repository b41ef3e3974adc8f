//! PDF thumbnail generation using PDFium.
//!
//! The PDFium shared library is loaded at runtime. Set
//! `PDFIUM_DYNAMIC_LIB_PATH` to the directory containing it, or place it next
//! to the executable, in the working directory, or on the system library path.

mod library;
mod render;
mod thumbnail;

pub use library::{bind_pdfium, is_pdfium_available, pdfium_library_name, PDFIUM_LIB_PATH_ENV};
pub use render::{jpeg_round_trip, render_first_page, zoom_for_dpi, INTERMEDIATE_QUALITY, PDF_BASE_DPI};
pub use thumbnail::{generate_pdf_thumbnail, try_generate_pdf_thumbnail};
