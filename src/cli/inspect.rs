//! Inspect command: summarize a skin package without converting it.

use crate::cli::common::{CliError, CliResult};
use crate::input_map;
use crate::overlay::generator::{available_orientations, viewport_frame, OverlayConfig};
use crate::package::{PackageKind, SkinPackage};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the devices, orientations and assets of a skin
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Skin package (.deltaskin archive or expanded skin directory)
    #[arg(value_name = "PACKAGE")]
    pub package: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Summary of one skin package.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSummary {
    /// Skin display name
    pub name: String,
    /// Raw game type identifier
    pub game_type: String,
    /// Short platform name
    pub platform: String,
    /// "archive" or "directory"
    pub kind: &'static str,
    /// Devices in manifest order
    pub devices: Vec<DeviceSummary>,
}

/// Summary of one device representation.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    /// Device key
    pub device: String,
    /// Every display type the device offers
    pub display_types: Vec<String>,
    /// Display type a conversion would use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<String>,
    /// Orientations of the selected display type
    pub orientations: Vec<OrientationSummary>,
    /// Why the device cannot be converted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one orientation.
#[derive(Debug, Clone, Serialize)]
pub struct OrientationSummary {
    /// "portrait" or "landscape"
    pub orientation: &'static str,
    /// Mapping size width
    pub width: f64,
    /// Mapping size height
    pub height: f64,
    /// Source items
    pub items: usize,
    /// Descriptor count the overlay would declare
    pub descriptors: usize,
    /// Artwork that would be used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Whether a game viewport is defined
    pub has_viewport: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        if !self.package.exists() {
            return Err(CliError::validation(format!(
                "File not found: {}",
                self.package.display()
            )));
        }

        let package = SkinPackage::open(&self.package)
            .map_err(|e| CliError::io(format!("Failed to open package: {e:#}")))?;
        let summary = summarize(&package);

        if self.json {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
            println!("{json}");
        } else {
            print_summary(&summary);
        }

        Ok(())
    }
}

/// Builds the summary of an opened package.
pub fn summarize(package: &SkinPackage) -> PackageSummary {
    let manifest = package.manifest();
    let devices = manifest
        .device_keys()
        .into_iter()
        .map(|device| summarize_device(package, device))
        .collect();

    PackageSummary {
        name: manifest.display_name().to_string(),
        game_type: manifest.game_type().to_string(),
        platform: input_map::platform_name(manifest.game_type()),
        kind: match package.kind() {
            PackageKind::Archive => "archive",
            PackageKind::Directory => "directory",
        },
        devices,
    }
}

fn summarize_device(package: &SkinPackage, device: String) -> DeviceSummary {
    let mut summary = DeviceSummary {
        device,
        display_types: Vec::new(),
        selected: None,
        orientations: Vec::new(),
        error: None,
    };

    let layout = match package.manifest().device(&summary.device) {
        Some(Ok(layout)) => layout,
        Some(Err(e)) => {
            summary.error = Some(format!("{e:#}"));
            return summary;
        }
        None => return summary,
    };

    summary.display_types = layout.display_types().map(str::to_string).collect();
    let Some(selected) = layout.preferred_display_type() else {
        summary.error = Some("no display types found".to_string());
        return summary;
    };
    summary.selected = Some(selected.to_string());

    let display = match layout.display(selected) {
        Ok(display) => display,
        Err(e) => {
            summary.error = Some(format!("{e:#}"));
            return summary;
        }
    };

    let config = OverlayConfig::generate(&display);
    summary.orientations = available_orientations(&display)
        .into_iter()
        .map(|(orientation, data)| OrientationSummary {
            orientation: orientation.name(),
            width: data.mapping_size.width,
            height: data.mapping_size.height,
            items: data.items.len(),
            descriptors: config
                .overlay(orientation)
                .map_or(0, |overlay| overlay.desc_count),
            asset: data.assets.preferred().map(str::to_string),
            has_viewport: viewport_frame(data).is_some(),
        })
        .collect();
    if summary.orientations.is_empty() {
        summary.error = Some("no orientations found".to_string());
    }

    summary
}

fn print_summary(summary: &PackageSummary) {
    println!("{} ({}, {})", summary.name, summary.platform, summary.kind);
    for device in &summary.devices {
        match &device.selected {
            Some(selected) => println!(
                "  {}: {} [{}]",
                device.device,
                selected,
                device.display_types.join(", ")
            ),
            None => println!("  {}", device.device),
        }
        for orientation in &device.orientations {
            println!(
                "    {}: {}x{}, {} items, {} descriptors, asset {}{}",
                orientation.orientation,
                orientation.width,
                orientation.height,
                orientation.items,
                orientation.descriptors,
                orientation.asset.as_deref().unwrap_or("none"),
                if orientation.has_viewport {
                    ""
                } else {
                    ", no viewport"
                }
            );
        }
        if let Some(error) = &device.error {
            println!("    error: {error}");
        }
    }
}
