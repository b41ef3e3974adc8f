//! Thumbnail backends driven by the comparison harness.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use thumbforge_core::ThumbnailOptions;
use tracing::{debug, error};

/// A thumbnail implementation that can be compared against the others.
pub trait Backend {
    /// Short name used in output file names and reports.
    fn name(&self) -> &'static str;

    fn generate_thumbnail(&self, input: &Path, output: &Path, options: &ThumbnailOptions) -> bool;

    fn generate_pdf_thumbnail(&self, input: &Path, output: &Path, options: &ThumbnailOptions)
        -> bool;
}

/// Backends selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// The thumbforge library
    Native,
    /// ImageMagick command line tools
    Magick,
}

impl BackendKind {
    /// Construct the backend, failing if its tooling is missing.
    pub fn detect(self) -> Result<Box<dyn Backend>> {
        match self {
            Self::Native => Ok(Box::new(NativeBackend)),
            Self::Magick => Ok(Box::new(MagickBackend::discover()?)),
        }
    }
}

/// Detect every requested backend, skipping those that are unavailable.
///
/// Duplicate requests are ignored.
pub fn available_backends(kinds: &[BackendKind]) -> Vec<Box<dyn Backend>> {
    let mut seen = Vec::new();
    let mut backends = Vec::new();

    for &kind in kinds {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);

        match kind.detect() {
            Ok(backend) => backends.push(backend),
            Err(e) => println!("Warning: {kind:?} backend not available: {e:#}"),
        }
    }
    backends
}

/// Backend calling the thumbforge library in-process.
pub struct NativeBackend;

impl Backend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    fn generate_thumbnail(&self, input: &Path, output: &Path, options: &ThumbnailOptions) -> bool {
        thumbforge_core::generate_thumbnail(input, output, options)
    }

    fn generate_pdf_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        options: &ThumbnailOptions,
    ) -> bool {
        thumbforge_core::generate_pdf_thumbnail(input, output, options)
    }
}

/// Backend shelling out to ImageMagick.
#[derive(Debug, Clone)]
pub struct MagickBackend {
    program: String,
}

impl MagickBackend {
    /// Programs tried in order: ImageMagick 7, then the legacy entry point.
    pub const CANDIDATES: [&'static str; 2] = ["magick", "convert"];

    /// Find a working ImageMagick executable on `PATH`.
    pub fn discover() -> Result<Self> {
        for program in Self::CANDIDATES {
            match Self::check(program) {
                Ok(()) => {
                    debug!(program, "Found ImageMagick");
                    return Ok(Self {
                        program: program.to_string(),
                    });
                }
                Err(e) => debug!(program, "ImageMagick detection failed: {e:#}"),
            }
        }
        bail!("no ImageMagick executable found (tried {})", Self::CANDIDATES.join(", "))
    }

    fn check(program: &str) -> Result<()> {
        let out = Command::new(program)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("running {program} -version"))?;

        if !out.status.success() || !String::from_utf8_lossy(&out.stdout).contains("ImageMagick") {
            bail!("{program} is not ImageMagick");
        }
        Ok(())
    }

    /// Arguments for an image thumbnail, excluding the program name.
    pub fn image_args(input: &Path, output: &Path, options: &ThumbnailOptions) -> Vec<String> {
        let mut args = vec![input.display().to_string(), "-auto-orient".to_string()];
        if options.trim {
            args.extend(["-trim".to_string(), "+repage".to_string()]);
        }
        args.extend(Self::finishing_args(output, options));
        args
    }

    /// Arguments for a first-page PDF thumbnail, excluding the program name.
    pub fn pdf_args(input: &Path, output: &Path, options: &ThumbnailOptions) -> Vec<String> {
        let mut args = vec![
            "-density".to_string(),
            options.dpi.to_string(),
            format!("{}[0]", input.display()),
        ];
        args.extend(Self::finishing_args(output, options));
        args
    }

    fn finishing_args(output: &Path, options: &ThumbnailOptions) -> Vec<String> {
        [
            "-background",
            "white",
            "-alpha",
            "remove",
            "-alpha",
            "off",
            "-thumbnail",
            &format!("{}x{}>", options.width, options.height),
            "-quality",
            &options.quality.to_string(),
        ]
        .into_iter()
        .map(str::to_string)
        .chain([format!("jpg:{}", output.display())])
        .collect()
    }

    fn run(&self, args: &[String], output: &Path) -> bool {
        debug!(program = %self.program, ?args, "Running ImageMagick");
        match Command::new(&self.program).args(args).stdin(Stdio::null()).output() {
            Ok(out) if out.status.success() && output.is_file() => true,
            Ok(out) => {
                error!(
                    status = %out.status,
                    "ImageMagick failed: {}",
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                false
            }
            Err(e) => {
                error!("Failed to run {}: {e}", self.program);
                false
            }
        }
    }
}

impl Backend for MagickBackend {
    fn name(&self) -> &'static str {
        "magick"
    }

    fn generate_thumbnail(&self, input: &Path, output: &Path, options: &ThumbnailOptions) -> bool {
        self.run(&Self::image_args(input, output, options), output)
    }

    fn generate_pdf_thumbnail(
        &self,
        input: &Path,
        output: &Path,
        options: &ThumbnailOptions,
    ) -> bool {
        self.run(&Self::pdf_args(input, output, options), output)
    }
}
