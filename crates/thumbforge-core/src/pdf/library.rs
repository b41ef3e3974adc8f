//! Locating and binding the PDFium shared library.

use std::env;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::*;
use tracing::debug;

use crate::ThumbnailError;

/// Environment variable naming a directory that contains the PDFium library.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_DYNAMIC_LIB_PATH";

/// Platform file name of the PDFium shared library.
pub fn pdfium_library_name() -> &'static str {
    #[cfg(target_os = "windows")]
    return "pdfium.dll";

    #[cfg(target_os = "macos")]
    return "libpdfium.dylib";

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    return "libpdfium.so";
}

/// Directories searched for the library, in order.
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Some(dir) = env::var_os(PDFIUM_LIB_PATH_ENV) {
        dirs.push(PathBuf::from(dir));
    }

    if let Some(dir) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(dir);
    }

    if let Ok(dir) = env::current_dir() {
        dirs.push(dir);
    }

    dirs
}

/// Bind to the PDFium library.
///
/// Each candidate directory is tried first, then the system library search
/// path. The binding is released when the returned value is dropped.
pub fn bind_pdfium() -> Result<Pdfium, ThumbnailError> {
    let lib_name = pdfium_library_name();

    for dir in candidate_dirs() {
        let lib_path = dir.join(lib_name);
        if !lib_path.exists() {
            continue;
        }
        match Pdfium::bind_to_library(&lib_path) {
            Ok(bindings) => {
                debug!(path = %lib_path.display(), "Bound PDFium library");
                return Ok(Pdfium::new(bindings));
            }
            Err(e) => debug!(path = %lib_path.display(), "Failed to bind PDFium: {e}"),
        }
    }

    Pdfium::bind_to_system_library()
        .map(Pdfium::new)
        .map_err(|e| ThumbnailError::PdfiumUnavailable(e.to_string()))
}

/// Whether the PDFium library can be bound in this environment.
pub fn is_pdfium_available() -> bool {
    bind_pdfium().is_ok()
}
