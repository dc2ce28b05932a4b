//! Vector artwork rasterization.
//!
//! Delta's `resizable` assets are single-page PDFs. They are rendered to PNG
//! through poppler's `pdftoppm`, run as an external process.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use tracing::debug;

/// Name of the poppler rasterizer binary.
pub const PDFTOPPM: &str = "pdftoppm";

/// Renders vector artwork into PNG bytes.
pub trait Rasterizer {
    /// Rasterizes the first page of `pdf` to a `width` x `height` PNG.
    fn rasterize(&self, pdf: &[u8], width: u32, height: u32) -> Result<Vec<u8>>;
}

/// Rasterizer backed by the `pdftoppm` command-line tool.
#[derive(Debug, Clone)]
pub struct Pdftoppm {
    program: PathBuf,
}

impl Pdftoppm {
    /// Uses an explicit `pdftoppm` executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Finds `pdftoppm`, preferring `explicit` over a `PATH` lookup.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                bail!("Configured pdftoppm not found: {}", path.display());
            }
            return Ok(Self::new(path));
        }

        let program = which::which(PDFTOPPM).with_context(|| {
            format!(
                "{PDFTOPPM} not found in PATH. Install poppler \
                 (e.g. `brew install poppler` or `apt install poppler-utils`)"
            )
        })?;
        Ok(Self::new(program))
    }

    /// Path of the executable this rasterizer runs.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Rasterizer for Pdftoppm {
    fn rasterize(&self, pdf: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
        let workdir = TempDir::new().context("Failed to create temporary directory")?;
        let input = workdir.path().join("input.pdf");
        let output_root = workdir.path().join("page");
        fs::write(&input, pdf).context("Failed to write temporary PDF")?;

        debug!(
            "Running {} at {}x{}",
            self.program.display(),
            width,
            height
        );
        let output = Command::new(&self.program)
            .arg("-png")
            .arg("-singlefile")
            .args(["-f", "1", "-l", "1"])
            .arg("-scale-to-x")
            .arg(width.to_string())
            .arg("-scale-to-y")
            .arg(height.to_string())
            .arg(&input)
            .arg(&output_root)
            .output()
            .with_context(|| format!("Failed to run {}", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "{PDFTOPPM} exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let png = output_root.with_extension("png");
        fs::read(&png).with_context(|| format!("{PDFTOPPM} produced no image at {}", png.display()))
    }
}

/// Stand-in used when no rasterizer could be found.
///
/// Every call fails with the reason the real rasterizer is missing, so each
/// PDF asset reports the problem while raster assets still convert.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    /// Creates a stand-in that fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Rasterizer for Unavailable {
    fn rasterize(&self, _pdf: &[u8], _width: u32, _height: u32) -> Result<Vec<u8>> {
        bail!("PDF rasterization unavailable: {}", self.reason)
    }
}
