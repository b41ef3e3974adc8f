//! Error type shared by the thumbnail entry points.

use std::io;
use std::path::{Path, PathBuf};

use pdfium_render::prelude::PdfiumError;
use thiserror::Error;

use crate::encode::EncodeError;

/// Coarse classification of a [`ThumbnailError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input path does not exist.
    InputNotFound,
    /// The input or output path could not be accessed.
    PermissionDenied,
    /// The PDF container could not be parsed, or has no pages.
    CorruptDocument,
    /// Anything else.
    Unanticipated,
}

/// Errors that can occur while generating a thumbnail or reading image info.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// The input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input or output path is not accessible.
    #[error("Permission denied accessing: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// PDFium rejected the document.
    #[error("Invalid or corrupted PDF file: {0}")]
    CorruptDocument(String),

    /// The PDF parsed but contains no pages.
    #[error("PDF has no pages: {}", .0.display())]
    EmptyDocument(PathBuf),

    /// The PDFium shared library could not be bound.
    #[error("PDFium library not available: {0}")]
    PdfiumUnavailable(String),

    /// PDFium failed while rasterizing a page.
    #[error("Failed to render PDF page: {0}")]
    Render(#[from] PdfiumError),

    /// The options are outside their accepted range.
    #[error("Invalid thumbnail options: {0}")]
    InvalidOptions(String),

    /// The image could not be decoded.
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The thumbnail could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Any other I/O failure.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ThumbnailError {
    /// Classify an I/O error raised while reading an input file.
    pub(crate) fn reading(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::InputNotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Classify an I/O error raised while writing an output file.
    ///
    /// A missing output directory is not an input problem, so `NotFound`
    /// stays a plain I/O error here.
    pub(crate) fn writing(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound(_) => ErrorKind::InputNotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::CorruptDocument(_) | Self::EmptyDocument(_) => ErrorKind::CorruptDocument,
            Self::PdfiumUnavailable(_)
            | Self::Render(_)
            | Self::InvalidOptions(_)
            | Self::Decode(_)
            | Self::Encode(_)
            | Self::Io { .. } => ErrorKind::Unanticipated,
        }
    }
}
