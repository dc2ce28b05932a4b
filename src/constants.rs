//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the defaults for a conversion run.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Delta Skin Overlay Converter";

/// Directory name used under the platform config directory.
pub const CONFIG_DIR_NAME: &str = "deltaskin-overlay";

/// Name of the manifest entry inside a skin package.
pub const MANIFEST_ENTRY: &str = "info.json";

/// Output directory used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Rasterization scale used for vector assets (3x matches retina skins).
pub const DEFAULT_SCALE: u32 = 3;
