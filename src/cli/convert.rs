//! Convert command: skin packages → RetroArch overlay directories.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::services::converter::{ConversionReport, ConvertOptions, Converter, DeviceOutcome};
use crate::services::raster::{Pdftoppm, Rasterizer, Unavailable};
use clap::Args;
use std::path::PathBuf;
use tracing::{debug, error, warn};

/// Convert Delta skins to RetroArch overlays
#[derive(Debug, Clone, Args)]
pub struct ConvertArgs {
    /// Skin packages (.deltaskin archives or expanded skin directories)
    #[arg(value_name = "PACKAGE", required = true)]
    pub packages: Vec<PathBuf>,

    /// Output directory (defaults to the configured directory, then "output")
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Devices to convert, e.g. iphone ipad tv (defaults to every device in the skin)
    #[arg(long, value_name = "DEVICE", num_args = 1..)]
    pub devices: Option<Vec<String>>,

    /// Scale factor for rasterized PDF artwork (defaults to the configured scale, then 3)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: Option<u32>,

    /// Path to the pdftoppm executable (looked up in PATH when omitted)
    #[arg(long, value_name = "PATH")]
    pub pdftoppm: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_else(|e| {
            warn!("Failed to load configuration, using defaults: {e:#}");
            Config::default()
        });

        let options = self.options(&config);
        let rasterizer = self.rasterizer(&config);
        let converter = Converter::new(&options, rasterizer.as_ref());

        let mut failed = 0usize;
        for path in &self.packages {
            if !path.exists() {
                eprintln!("Error: File not found: {}", path.display());
                failed += 1;
                continue;
            }

            println!("Converting: {}", path.display());
            match converter.convert_path(path) {
                Ok(report) => {
                    print_report(&report);
                    if report.failed().next().is_some() {
                        failed += 1;
                    }
                }
                Err(e) => {
                    error!("Conversion of {} failed: {e:?}", path.display());
                    eprintln!("Error converting {}: {e:#}", path.display());
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::io(format!(
                "{failed} of {} package(s) could not be converted",
                self.packages.len()
            )));
        }

        Ok(())
    }

    /// Merges CLI flags over configured values.
    fn options(&self, config: &Config) -> ConvertOptions {
        ConvertOptions {
            output_dir: self
                .output
                .clone()
                .unwrap_or_else(|| config.output.dir.clone()),
            devices: self.devices.clone(),
            scale: self.scale.unwrap_or(config.output.scale),
        }
    }

    /// Finds pdftoppm. A missing rasterizer only matters once a PDF asset
    /// is met, so the failure is deferred to each rasterization.
    fn rasterizer(&self, config: &Config) -> Box<dyn Rasterizer> {
        let explicit = self
            .pdftoppm
            .as_deref()
            .or(config.raster.pdftoppm.as_deref());

        match Pdftoppm::locate(explicit) {
            Ok(pdftoppm) => {
                debug!("Using {}", pdftoppm.program().display());
                Box::new(pdftoppm)
            }
            Err(e) => {
                debug!("No rasterizer available: {e:#}");
                Box::new(Unavailable::new(format!("{e:#}")))
            }
        }
    }
}

fn print_report(report: &ConversionReport) {
    for outcome in &report.devices {
        match outcome {
            DeviceOutcome::Skipped { device, reason } => {
                println!("  Skipping {device}: {reason}");
            }
            DeviceOutcome::Failed { device, reason } => {
                println!("  Error converting {device}: {reason}");
            }
            DeviceOutcome::Converted(converted) => {
                println!(
                    "  Device: {} ({})",
                    converted.device, converted.display_type
                );
                let orientations: Vec<&str> =
                    converted.orientations.iter().map(|o| o.name()).collect();
                println!("    Orientations: {}", orientations.join(", "));
                for image in &converted.images {
                    println!("      Saved: {}", image.display());
                }
                for issue in &converted.image_issues {
                    println!("      Error: {issue}");
                }
                println!("    Config: {}", converted.config_path.display());
            }
        }
    }
    println!("Done!");
}
