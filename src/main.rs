//! Image checksum CLI.
//!
//! Prints, and optionally verifies, the SHA-1 checksums that the library's
//! matchers compare against, so expected values for tests can be captured
//! from real files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use imgsum::checksum::{ensure_algorithm, SHA1};
use imgsum::source::{pdf, raster};
use imgsum::{ImageSource, PdfImage};

/// Image Checksum Tool
///
/// Computes SHA-1 checksums of images embedded in PDF documents and of
/// decoded raster images.
#[derive(Parser)]
#[command(name = "imgsum")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Digest algorithm (only sha1 is available)
    #[arg(short, long, global = true, default_value = SHA1)]
    algorithm: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List image XObjects in a PDF with their raw stream checksums
    Pdf {
        /// Input PDF file path
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Expected checksum for each image, in listing order
        #[arg(short, long, value_name = "SHA1")]
        expect: Vec<String>,
    },

    /// Print the checksum of a decoded raster image's pixel buffer
    Raster {
        /// Input image file path (PNG)
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Expected checksum
        #[arg(short, long, value_name = "SHA1")]
        expect: Option<String>,
    },
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "imgsum=debug" } else { "imgsum=warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Checksum command handler.
struct ChecksumHandler {
    verbose: bool,
}

impl ChecksumHandler {
    fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Lists every image in a PDF, verifying against `expected` when given.
    fn pdf(&self, input: &Path, expected: &[String]) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let doc = lopdf::Document::load(input)
            .with_context(|| format!("Failed to load PDF {}", input.display()))?;
        let images = pdf::images(&doc).with_context(|| "Image lookup failed")?;

        if self.verbose {
            eprintln!("Input:  {}", input.display());
            eprintln!("Images: {}", images.len());
        }

        if !expected.is_empty() && expected.len() != images.len() {
            anyhow::bail!(
                "Expected {} checksum(s) but the document has {} image(s)",
                expected.len(),
                images.len()
            );
        }

        let mut mismatches = Vec::new();
        for (index, image) in images.iter().enumerate() {
            let line = describe_pdf_image(image)
                .with_context(|| format!("Failed to checksum image #{}", index + 1))?;
            println!("{}\t{}", index + 1, line.text);

            if let Some(want) = expected.get(index) {
                if &line.checksum != want {
                    mismatches.push(format!(
                        "image #{}: expected {} but was {}",
                        index + 1,
                        want,
                        line.checksum
                    ));
                }
            }
        }

        if !mismatches.is_empty() {
            anyhow::bail!("Checksum mismatch:\n  {}", mismatches.join("\n  "));
        }
        if !expected.is_empty() {
            println!("✓ All {} image checksum(s) match", expected.len());
        }

        Ok(())
    }

    /// Prints the pixel-buffer checksum of a raster file.
    fn raster(&self, input: &Path, expected: Option<&str>) -> Result<()> {
        if !input.exists() {
            anyhow::bail!("Input file does not exist: {}", input.display());
        }

        let image = raster::load(input)
            .with_context(|| format!("Failed to decode {}", input.display()))?;

        if self.verbose {
            eprintln!("Input: {}", input.display());
            eprintln!("Size:  {}x{}", image.width(), image.height());
        }

        let checksum = image.checksum().with_context(|| "Checksum failed")?;
        println!("{}  {}", checksum, input.display());

        if let Some(want) = expected {
            if checksum != want {
                anyhow::bail!("Checksum mismatch: expected {} but was {}", want, checksum);
            }
            println!("✓ Checksum matches");
        }

        Ok(())
    }
}

struct ImageLine {
    text: String,
    checksum: String,
}

fn describe_pdf_image(image: &PdfImage<'_>) -> imgsum::ChecksumResult<ImageLine> {
    let (number, generation) = image.id();
    let filters = image.filters()?;
    let checksum = image.checksum()?;
    let filters = if filters.is_empty() {
        "-".to_string()
    } else {
        filters.join(",")
    };

    Ok(ImageLine {
        text: format!(
            "{} {}\t{}x{}\t{}\t{}",
            number,
            generation,
            image.width()?,
            image.height()?,
            filters,
            checksum
        ),
        checksum,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    ensure_algorithm(&cli.algorithm)?;

    let handler = ChecksumHandler::new(cli.verbose);

    match &cli.command {
        Commands::Pdf { input, expect } => handler.pdf(input, expect)?,
        Commands::Raster { input, expect } => handler.raster(input, expect.as_deref())?,
    }

    Ok(())
}
