//! Runs every backend over every profile for each input file.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use thumbforge_core::{get_image_info, ThumbnailOptions};

use crate::backend::Backend;
use crate::profiles::{image_profiles, pdf_profile, Profile};

/// Raster extensions handled by the image profiles.
pub const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "tif", "tiff", "gif", "bmp"];

const RULE: &str = "============================================================";

/// How an input file is dispatched, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Image,
    Pdf,
    Unsupported,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return Self::Unsupported;
        };
        let ext = ext.to_ascii_lowercase();

        if ext == "pdf" {
            Self::Pdf
        } else if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else {
            Self::Unsupported
        }
    }
}

/// `<dir>/<stem><suffix>_<backend>.jpg`
pub fn output_path(dir: &Path, input: &Path, suffix: &str, backend: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    dir.join(format!("{stem}{suffix}_{backend}.jpg"))
}

/// Result of one backend on one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseOutcome {
    pub backend: &'static str,
    pub success: bool,
    pub elapsed: Duration,
    pub size_bytes: Option<u64>,
    pub dimensions: Option<(u32, u32)>,
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = format!("{}:", self.backend);
        if !self.success {
            return write!(f, "  {label:<8} Failed");
        }

        write!(f, "  {label:<8} Success ({:.3}s", self.elapsed.as_secs_f64())?;
        if let Some(bytes) = self.size_bytes {
            write!(f, ", {:.1}KB", bytes as f64 / 1024.0)?;
        }
        if let Some((width, height)) = self.dimensions {
            write!(f, ", {width}x{height}")?;
        }
        write!(f, ")")
    }
}

/// Drives the backends and writes a report to `out`.
pub struct Runner<'a, W: Write> {
    backends: &'a [Box<dyn Backend>],
    output_dir: PathBuf,
    out: W,
}

impl<'a, W: Write> Runner<'a, W> {
    pub fn new(backends: &'a [Box<dyn Backend>], output_dir: impl Into<PathBuf>, out: W) -> Self {
        Self {
            backends,
            output_dir: output_dir.into(),
            out,
        }
    }

    /// Process one input file. Problems with the file are reported and skipped.
    pub fn run_file(&mut self, input: &Path) -> io::Result<()> {
        if !input.exists() {
            return writeln!(self.out, "\nWarning: File not found: {}", input.display());
        }

        match FileKind::from_path(input) {
            FileKind::Image => self.run_image(input),
            FileKind::Pdf => self.run_pdf(input),
            FileKind::Unsupported => {
                writeln!(self.out, "\nWarning: Unsupported file type: {}", input.display())
            }
        }
    }

    fn run_image(&mut self, input: &Path) -> io::Result<()> {
        self.header(&format!("Testing: {}", input.display()))?;
        for profile in image_profiles() {
            writeln!(self.out, "\n{}:", profile.name)?;
            self.run_profile(input, &profile, false)?;
        }
        Ok(())
    }

    fn run_pdf(&mut self, input: &Path) -> io::Result<()> {
        self.header(&format!("Testing PDF: {}", input.display()))?;
        self.run_profile(input, &pdf_profile(), true)
    }

    fn run_profile(&mut self, input: &Path, profile: &Profile, pdf: bool) -> io::Result<()> {
        for backend in self.backends {
            let output = output_path(&self.output_dir, input, profile.suffix, backend.name());
            let outcome = run_case(backend.as_ref(), input, &output, &profile.options, pdf);
            writeln!(self.out, "{outcome}")?;
        }
        Ok(())
    }

    fn header(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out, "\n{RULE}\n{title}\n{RULE}")
    }

    pub fn footer(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "\n{RULE}\nTest complete! Check the '{}' directory for results.\n\
             Compare the backend outputs visually.\n{RULE}",
            self.output_dir.display()
        )
    }
}

/// Time a single backend call and inspect what it wrote.
pub fn run_case(
    backend: &dyn Backend,
    input: &Path,
    output: &Path,
    options: &ThumbnailOptions,
    pdf: bool,
) -> CaseOutcome {
    let start = Instant::now();
    let success = if pdf {
        backend.generate_pdf_thumbnail(input, output, options)
    } else {
        backend.generate_thumbnail(input, output, options)
    };
    let elapsed = start.elapsed();

    let (size_bytes, dimensions) = if success {
        (
            fs::metadata(output).ok().map(|m| m.len()),
            get_image_info(output).map(|info| info.size()),
        )
    } else {
        (None, None)
    };

    CaseOutcome {
        backend: backend.name(),
        success,
        elapsed,
        size_bytes,
        dimensions,
    }
}
