//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug, Clone)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug, Clone)]
pub struct ConfigSetArgs {
    /// Default directory for converted overlays
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Default rasterization scale for PDF artwork
    #[arg(long, value_name = "N")]
    scale: Option<u32>,

    /// pdftoppm executable to use instead of the one in PATH
    #[arg(long, value_name = "PATH")]
    pdftoppm: Option<PathBuf>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: Option<String>,
    output: OutputSection,
    raster: RasterSection,
}

#[derive(Serialize, Debug)]
struct OutputSection {
    dir: String,
    scale: u32,
}

#[derive(Serialize, Debug)]
struct RasterSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pdftoppm: Option<String>,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            output_json(&config)?;
        } else {
            output_human_readable(&config);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.output_dir.is_none() && self.scale.is_none() && self.pdftoppm.is_none() {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --output-dir, --scale, or --pdftoppm",
            ));
        }

        let mut config = Config::load().unwrap_or_default();
        self.apply(&mut config)?;

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }

    fn apply(&self, config: &mut Config) -> CliResult<()> {
        if let Some(path) = &self.output_dir {
            config.output.dir.clone_from(path);
        }

        if let Some(scale) = self.scale {
            if scale == 0 {
                return Err(CliError::validation("Scale must be at least 1"));
            }
            config.output.scale = scale;
        }

        if let Some(path) = &self.pdftoppm {
            if !path.is_file() {
                return Err(CliError::validation(format!(
                    "pdftoppm executable does not exist: {}",
                    path.display()
                )));
            }
            config.raster.pdftoppm = Some(path.clone());
        }

        Ok(())
    }
}

/// Output configuration in JSON format
fn output_json(config: &Config) -> CliResult<()> {
    let output = ConfigOutput {
        config_file: Config::config_file_path()
            .ok()
            .map(|p| p.to_string_lossy().to_string()),
        output: OutputSection {
            dir: config.output.dir.to_string_lossy().to_string(),
            scale: config.output.scale,
        },
        raster: RasterSection {
            pdftoppm: config
                .raster
                .pdftoppm
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
    };

    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| CliError::io(format!("Failed to serialize configuration to JSON: {e}")))?;

    println!("{json}");
    Ok(())
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    let title = format!("{APP_NAME} Configuration");
    println!("{title}");
    println!("{}", "=".repeat(title.len()));
    println!();

    if let Ok(path) = Config::config_file_path() {
        let state = if Config::exists() { "" } else { " (not created)" };
        println!("Config File: {}{state}", path.display());
        println!();
    }

    println!("Output:");
    println!("  Directory: {}", config.output.dir.display());
    println!("  Scale: {}", config.output.scale);
    println!();

    println!("Raster:");
    match &config.raster.pdftoppm {
        Some(path) => println!("  pdftoppm: {}", path.display()),
        None => println!("  pdftoppm: (from PATH)"),
    }
    println!();
}
