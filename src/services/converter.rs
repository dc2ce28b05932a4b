//! Skin package → RetroArch overlay directory conversion.
//!
//! For every requested device the converter picks a display type, writes one
//! PNG per orientation and a `.cfg` describing the overlays. Problems with a
//! single device or image are recorded in the [`ConversionReport`] instead of
//! aborting the package.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::constants::{DEFAULT_OUTPUT_DIR, DEFAULT_SCALE};
use crate::input_map;
use crate::models::OrientationData;
use crate::overlay::generator::{available_orientations, Orientation, OverlayConfig};
use crate::package::SkinPackage;

use super::raster::Rasterizer;

/// Settings for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Directory receiving one sub-directory per converted device
    pub output_dir: PathBuf,
    /// Devices to convert; `None` converts every device in the skin
    pub devices: Option<Vec<String>>,
    /// Multiplier applied to the mapping size when rasterizing PDFs
    pub scale: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            devices: None,
            scale: DEFAULT_SCALE,
        }
    }
}

/// A device that produced an overlay directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertedDevice {
    /// Device key from the manifest
    pub device: String,
    /// Display type the overlay was built from
    pub display_type: String,
    /// Orientations present in the overlay, in config order
    pub orientations: Vec<Orientation>,
    /// Directory holding the config and images
    pub output_dir: PathBuf,
    /// Written `.cfg` file
    pub config_path: PathBuf,
    /// Images written (copied or rasterized)
    pub images: Vec<PathBuf>,
    /// Images that could not be produced, with the reason
    pub image_issues: Vec<String>,
}

/// Result of converting one device.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceOutcome {
    /// Overlay written
    Converted(ConvertedDevice),
    /// Device skipped
    Skipped {
        /// Device key
        device: String,
        /// Why it was skipped
        reason: String,
    },
    /// Writing the device's output failed
    Failed {
        /// Device key
        device: String,
        /// Error chain
        reason: String,
    },
}

impl DeviceOutcome {
    fn skipped(device: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        warn!("Skipping {device}: {reason}");
        Self::Skipped {
            device: device.to_string(),
            reason,
        }
    }

    fn failed(device: &str, err: &anyhow::Error) -> Self {
        error!("Converting {device} failed: {err:?}");
        Self::Failed {
            device: device.to_string(),
            reason: format!("{err:#}"),
        }
    }
}

/// Summary of converting one package.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    /// Skin display name
    pub skin_name: String,
    /// Short platform name (e.g., "GBA")
    pub platform: String,
    /// Per-device results in processing order
    pub devices: Vec<DeviceOutcome>,
}

impl ConversionReport {
    /// Devices that produced output.
    pub fn converted(&self) -> impl Iterator<Item = &ConvertedDevice> {
        self.devices.iter().filter_map(|outcome| match outcome {
            DeviceOutcome::Converted(device) => Some(device),
            _ => None,
        })
    }

    /// Devices that were skipped, with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.devices.iter().filter_map(|outcome| match outcome {
            DeviceOutcome::Skipped { device, reason } => Some((device.as_str(), reason.as_str())),
            _ => None,
        })
    }

    /// Devices whose output could not be written, with the error.
    pub fn failed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.devices.iter().filter_map(|outcome| match outcome {
            DeviceOutcome::Failed { device, reason } => Some((device.as_str(), reason.as_str())),
            _ => None,
        })
    }
}

/// Replaces characters that are unsafe in directory names with `_`.
pub fn sanitize_name(name: &str) -> String {
    name.replace([' ', '/', '\\'], "_")
}

/// Output directory and config stem: `<skin>_<platform>_<device>`.
pub fn output_name(skin_name: &str, platform: &str, device: &str) -> String {
    format!("{}_{}_{}", sanitize_name(skin_name), platform, device)
}

/// Converts skin packages using a fixed set of options.
pub struct Converter<'a> {
    options: &'a ConvertOptions,
    rasterizer: &'a dyn Rasterizer,
}

impl<'a> Converter<'a> {
    /// Creates a converter.
    pub fn new(options: &'a ConvertOptions, rasterizer: &'a dyn Rasterizer) -> Self {
        Self {
            options,
            rasterizer,
        }
    }

    /// Opens and converts the package at `path`.
    pub fn convert_path(&self, path: &Path) -> Result<ConversionReport> {
        let mut package = SkinPackage::open(path)?;
        self.convert_package(&mut package)
    }

    /// Converts every requested device of an opened package.
    pub fn convert_package(&self, package: &mut SkinPackage) -> Result<ConversionReport> {
        let skin_name = package.manifest().display_name().to_string();
        let platform = input_map::platform_name(package.manifest().game_type());

        let devices = self
            .options
            .devices
            .clone()
            .unwrap_or_else(|| package.manifest().device_keys());

        info!("Converting '{skin_name}' ({platform}): {} device(s)", devices.len());

        let mut outcomes = Vec::with_capacity(devices.len());
        for device in &devices {
            let stem = output_name(&skin_name, &platform, device);
            let outcome = self
                .convert_device(package, device, &stem)
                .unwrap_or_else(|err| DeviceOutcome::failed(device, &err));
            outcomes.push(outcome);
        }

        Ok(ConversionReport {
            skin_name,
            platform,
            devices: outcomes,
        })
    }

    fn convert_device(
        &self,
        package: &mut SkinPackage,
        device: &str,
        stem: &str,
    ) -> Result<DeviceOutcome> {
        let device_layout = match package.manifest().device(device) {
            None => return Ok(DeviceOutcome::skipped(device, "not found in skin")),
            Some(Err(err)) => return Ok(DeviceOutcome::skipped(device, format!("{err:#}"))),
            Some(Ok(layout)) => layout,
        };

        let Some(display_type) = device_layout.preferred_display_type() else {
            return Ok(DeviceOutcome::skipped(device, "no display types found"));
        };
        let display_type = display_type.to_string();

        let layout = match device_layout.display(&display_type) {
            Ok(layout) => layout,
            Err(err) => return Ok(DeviceOutcome::skipped(device, format!("{err:#}"))),
        };

        let orientations = available_orientations(&layout);
        if orientations.is_empty() {
            return Ok(DeviceOutcome::skipped(device, "no orientations found"));
        }

        let output_dir = self.options.output_dir.join(stem);
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;

        info!("Device {device} ({display_type})");

        let mut images = Vec::new();
        let mut image_issues = Vec::new();
        for (orientation, data) in &orientations {
            match self.write_image(package, *orientation, data, &output_dir) {
                Ok(Some(path)) => images.push(path),
                Ok(None) => {}
                Err(err) => {
                    warn!("{device} {orientation}: {err:#}");
                    image_issues.push(format!("{orientation}: {err:#}"));
                }
            }
        }

        let config = OverlayConfig::generate(&layout);
        let config_path = output_dir.join(format!("{stem}.cfg"));
        fs::write(&config_path, config.to_string())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        debug!("Wrote {}", config_path.display());

        Ok(DeviceOutcome::Converted(ConvertedDevice {
            device: device.to_string(),
            display_type,
            orientations: orientations.iter().map(|(o, _)| *o).collect(),
            output_dir,
            config_path,
            images,
            image_issues,
        }))
    }

    /// Copies or rasterizes the artwork of one orientation.
    ///
    /// Returns `Ok(None)` when the orientation has no artwork at all.
    fn write_image(
        &self,
        package: &mut SkinPackage,
        orientation: Orientation,
        data: &OrientationData,
        output_dir: &Path,
    ) -> Result<Option<PathBuf>> {
        let Some(asset) = data.assets.preferred() else {
            debug!("{orientation}: no assets listed");
            return Ok(None);
        };

        let bytes = package
            .read_entry(asset)?
            .with_context(|| format!("asset '{asset}' not found in package"))?;

        let extension = Path::new(asset)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let png = match extension.as_deref() {
            Some("pdf") => {
                let (width, height) = data.mapping_size.scaled(self.options.scale);
                debug!("{orientation}: rasterizing {asset} at {width}x{height}");
                self.rasterizer
                    .rasterize(&bytes, width, height)
                    .with_context(|| format!("Failed to rasterize {asset}"))?
            }
            Some("png") => bytes,
            _ => anyhow::bail!("unsupported asset format: {asset}"),
        };

        let path = output_dir.join(orientation.image_name());
        fs::write(&path, png).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records requested sizes and returns a fixed payload.
    #[derive(Default)]
    struct FakeRasterizer {
        calls: RefCell<Vec<(u32, u32)>>,
    }

    impl Rasterizer for FakeRasterizer {
        fn rasterize(&self, _pdf: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push((width, height));
            Ok(b"rendered".to_vec())
        }
    }

    const MANIFEST: &str = r#"{
        "name": "Test Skin",
        "gameTypeIdentifier": "com.rileytestut.delta.game.gba",
        "representations": {
            "iphone": {
                "standard": {
                    "portrait": {
                        "mappingSize": {"width": 100, "height": 200},
                        "assets": {"resizable": "portrait.pdf"},
                        "items": [{"inputs": ["a"], "frame": {"x": 0, "y": 0, "width": 10, "height": 10}}],
                        "gameScreenFrame": {"x": 0, "y": 0, "width": 100, "height": 100}
                    },
                    "landscape": {
                        "mappingSize": {"width": 200, "height": 100},
                        "assets": {"small": "landscape.png"},
                        "items": []
                    }
                }
            },
            "ipad": {"edgeToEdge": {}},
            "tv": {"standard": {"portrait": {"items": []}}}
        }
    }"#;

    fn skin_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("info.json"), MANIFEST).unwrap();
        fs::write(temp.path().join("portrait.pdf"), b"%PDF").unwrap();
        fs::write(temp.path().join("landscape.png"), b"\x89PNG").unwrap();
        temp
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("My Skin/v2"), "My_Skin_v2");
        assert_eq!(output_name("Clear Skin", "GBA", "iphone"), "Clear_Skin_GBA_iphone");
    }

    #[test]
    fn test_convert_directory_package() {
        let skin = skin_dir();
        let out = TempDir::new().unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            devices: Some(vec!["iphone".to_string()]),
            scale: 2,
        };
        let rasterizer = FakeRasterizer::default();

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        assert_eq!(report.skin_name, "Test Skin");
        assert_eq!(report.platform, "GBA");
        let device = report.converted().next().unwrap();
        assert_eq!(device.display_type, "standard");
        assert_eq!(
            device.orientations,
            vec![Orientation::Portrait, Orientation::Landscape]
        );
        assert!(device.image_issues.is_empty());

        let dir = out.path().join("Test_Skin_GBA_iphone");
        assert_eq!(device.output_dir, dir);
        assert_eq!(fs::read(dir.join("portrait.png")).unwrap(), b"rendered");
        assert_eq!(fs::read(dir.join("landscape.png")).unwrap(), b"\x89PNG");
        assert_eq!(*rasterizer.calls.borrow(), vec![(200, 400)]);

        let cfg = fs::read_to_string(dir.join("Test_Skin_GBA_iphone.cfg")).unwrap();
        assert!(cfg.starts_with("overlays = 2\n"));
        assert!(cfg.contains("overlay0_desc1_next_target = \"landscape\""));
        assert!(cfg.contains("overlay1_desc0_next_target = \"portrait\""));
    }

    #[test]
    fn test_device_problems_do_not_abort_package() {
        let skin = skin_dir();
        let out = TempDir::new().unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            devices: Some(vec![
                "watch".to_string(),
                "ipad".to_string(),
                "tv".to_string(),
                "iphone".to_string(),
            ]),
            scale: 1,
        };
        let rasterizer = FakeRasterizer::default();

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        let skipped: Vec<_> = report.skipped().map(|(device, _)| device).collect();
        assert_eq!(skipped, vec!["watch", "ipad", "tv"]);
        assert_eq!(report.converted().count(), 1);

        let (_, reason) = report.skipped().next().unwrap();
        assert_eq!(reason, "not found in skin");
    }

    #[test]
    fn test_blocked_output_dir_fails_only_that_device() {
        let skin = skin_dir();
        let out = TempDir::new().unwrap();
        fs::write(out.path().join("Test_Skin_GBA_tv"), b"not a directory").unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            devices: Some(vec!["tv".to_string(), "iphone".to_string()]),
            scale: 1,
        };
        let tv_layout = r#"{"standard": {"portrait": {"mappingSize": {"width": 10, "height": 10}}}}"#;
        let manifest = MANIFEST.replace(
            r#""tv": {"standard": {"portrait": {"items": []}}}"#,
            &format!(r#""tv": {tv_layout}"#),
        );
        fs::write(skin.path().join("info.json"), manifest).unwrap();
        let rasterizer = FakeRasterizer::default();

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        let failed: Vec<_> = report.failed().map(|(device, _)| device).collect();
        assert_eq!(failed, vec!["tv"]);
        assert_eq!(report.converted().count(), 1);
        assert!(out
            .path()
            .join("Test_Skin_GBA_iphone")
            .join("Test_Skin_GBA_iphone.cfg")
            .exists());
    }

    #[test]
    fn test_all_devices_by_default() {
        let skin = skin_dir();
        let out = TempDir::new().unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            ..ConvertOptions::default()
        };
        let rasterizer = FakeRasterizer::default();

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        assert_eq!(report.devices.len(), 3);
        assert_eq!(*rasterizer.calls.borrow(), vec![(300, 600)]);
    }

    #[test]
    fn test_rasterizer_failure_keeps_config() {
        let skin = skin_dir();
        let out = TempDir::new().unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            devices: Some(vec!["iphone".to_string()]),
            scale: 3,
        };
        let rasterizer = crate::services::raster::Unavailable::new("pdftoppm not found");

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        let device = report.converted().next().unwrap();
        assert_eq!(device.images.len(), 1);
        assert_eq!(device.image_issues.len(), 1);
        assert!(device.image_issues[0].starts_with("portrait:"));
        assert!(device.config_path.exists());
        assert!(!device.output_dir.join("portrait.png").exists());
        assert!(device.output_dir.join("landscape.png").exists());
    }

    #[test]
    fn test_missing_asset_is_reported() {
        let skin = skin_dir();
        fs::remove_file(skin.path().join("landscape.png")).unwrap();
        let out = TempDir::new().unwrap();
        let options = ConvertOptions {
            output_dir: out.path().to_path_buf(),
            devices: Some(vec!["iphone".to_string()]),
            scale: 1,
        };
        let rasterizer = FakeRasterizer::default();

        let report = Converter::new(&options, &rasterizer)
            .convert_path(skin.path())
            .unwrap();

        let device = report.converted().next().unwrap();
        assert_eq!(device.image_issues.len(), 1);
        assert!(device.image_issues[0].contains("landscape.png"));
    }
}
