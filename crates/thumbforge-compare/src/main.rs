//! Compare thumbnail backends over a fixed set of option profiles.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

mod backend;
mod profiles;
mod runner;

use backend::{available_backends, BackendKind};
use runner::{Runner, IMAGE_EXTENSIONS};

#[derive(Parser, Debug)]
#[command(name = "thumbforge-compare")]
#[command(about = "Generate thumbnails with each backend for side-by-side comparison", long_about = None)]
struct Cli {
    /// Images or PDFs to process
    files: Vec<PathBuf>,

    /// Directory receiving the generated thumbnails
    #[arg(short, long, default_value = "test_output")]
    output_dir: PathBuf,

    /// Backends to run
    #[arg(short, long, value_enum, value_delimiter = ',', default_values = ["native", "magick"])]
    backend: Vec<BackendKind>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Completed,
    NoBackend,
    Usage,
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        match status {
            RunStatus::Completed => ExitCode::SUCCESS,
            RunStatus::NoBackend | RunStatus::Usage => ExitCode::FAILURE,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<RunStatus> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Thumbnail Comparison\n====================\n")?;

    let backends = available_backends(&cli.backend);
    if backends.is_empty() {
        writeln!(out, "ERROR: No thumbnail backend is available!")?;
        return Ok(RunStatus::NoBackend);
    }

    if cli.files.is_empty() {
        print_usage(&mut out)?;
        return Ok(RunStatus::Usage);
    }

    fs::create_dir_all(&cli.output_dir)
        .with_context(|| format!("creating output directory {}", cli.output_dir.display()))?;

    let mut runner = Runner::new(&backends, &cli.output_dir, out);
    for file in &cli.files {
        runner.run_file(file)?;
    }
    runner.footer()?;

    Ok(RunStatus::Completed)
}

fn print_usage(out: &mut impl Write) -> io::Result<()> {
    let images = IMAGE_EXTENSIONS.map(|ext| format!(".{ext}")).join(", ");
    writeln!(out, "Usage: thumbforge-compare [OPTIONS] <FILE>...")?;
    writeln!(out, "\nExample:")?;
    writeln!(out, "  thumbforge-compare sample.jpg sample.tif sample.pdf")?;
    writeln!(out, "\nSupported formats:")?;
    writeln!(out, "  Images: {images}")?;
    writeln!(out, "  PDFs: .pdf")
}
