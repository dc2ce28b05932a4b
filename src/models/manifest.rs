//! Delta skin manifest (`info.json`) structures.
//!
//! Only the fields needed for conversion are modelled. Unknown fields are
//! ignored. Device representations stay as raw JSON until a device is
//! actually converted, so a malformed device does not poison its siblings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geometry::{MappingSize, Rect};

/// Display types in order of preference.
const DISPLAY_TYPE_PREFERENCE: [&str; 3] = ["edgeToEdge", "standard", "splitView"];

/// Top-level skin manifest.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinManifest {
    /// Display name of the skin
    #[serde(default)]
    pub name: Option<String>,
    /// Platform identifier (e.g., "com.rileytestut.delta.game.gba")
    #[serde(default)]
    pub game_type_identifier: Option<String>,
    /// Device class (e.g., "iphone", "ipad") → per-device layout data
    #[serde(default)]
    pub representations: Map<String, Value>,
}

impl SkinManifest {
    /// Parses a manifest from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("Failed to parse skin manifest")
    }

    /// Skin display name, `Unknown` when the manifest has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Platform identifier, empty when the manifest has none.
    pub fn game_type(&self) -> &str {
        self.game_type_identifier.as_deref().unwrap_or("")
    }

    /// Device keys in manifest order.
    pub fn device_keys(&self) -> Vec<String> {
        self.representations.keys().cloned().collect()
    }

    /// Returns the layout for a device, or `None` if the skin has no such device.
    pub fn device(&self, key: &str) -> Option<Result<DeviceLayout>> {
        self.representations
            .get(key)
            .map(|value| DeviceLayout::from_value(key, value))
    }
}

/// One device representation: display type → orientation layouts.
#[derive(Debug, Clone)]
pub struct DeviceLayout {
    display_types: Map<String, Value>,
}

impl DeviceLayout {
    /// Wraps a raw representation value; it must be a JSON object.
    pub fn from_value(key: &str, value: &Value) -> Result<Self> {
        let display_types = value
            .as_object()
            .with_context(|| format!("Representation '{key}' is not an object"))?
            .clone();
        Ok(Self { display_types })
    }

    /// Display type keys in manifest order.
    pub fn display_types(&self) -> impl Iterator<Item = &str> {
        self.display_types.keys().map(String::as_str)
    }

    /// Picks `edgeToEdge`, then `standard`, then `splitView`, then the first
    /// display type listed in the manifest.
    pub fn preferred_display_type(&self) -> Option<&str> {
        DISPLAY_TYPE_PREFERENCE
            .iter()
            .copied()
            .find(|dtype| self.display_types.contains_key(*dtype))
            .or_else(|| self.display_types.keys().next().map(String::as_str))
    }

    /// Deserializes the orientation layouts of one display type.
    pub fn display(&self, display_type: &str) -> Result<DisplayLayout> {
        let value = self
            .display_types
            .get(display_type)
            .with_context(|| format!("Display type '{display_type}' not found"))?;
        DisplayLayout::deserialize(value)
            .with_context(|| format!("Invalid '{display_type}' layout"))
    }
}

/// Portrait and landscape layouts for one display type.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DisplayLayout {
    /// Portrait layout, if the skin supports it
    #[serde(default)]
    pub portrait: Option<OrientationData>,
    /// Landscape layout, if the skin supports it
    #[serde(default)]
    pub landscape: Option<OrientationData>,
}

/// Layout data for one orientation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationData {
    /// Coordinate space for every frame in this orientation
    pub mapping_size: MappingSize,
    /// Interactive regions, in source order
    #[serde(default)]
    pub items: Vec<InputItem>,
    /// Game screen placements (multi-screen systems list several)
    #[serde(default)]
    pub screens: Option<Vec<ScreenFrame>>,
    /// Single game screen placement used by older skins
    #[serde(default)]
    pub game_screen_frame: Option<Rect>,
    /// Background artwork per quality tier
    #[serde(default)]
    pub assets: Assets,
}

impl OrientationData {
    /// Frames describing where the game screens are drawn.
    ///
    /// Each screen contributes its `outputFrame`, or its `inputFrame` when
    /// it has no output frame. Screens with neither are dropped.
    pub fn screen_frames(&self) -> Vec<Rect> {
        self.screens
            .iter()
            .flatten()
            .filter_map(|screen| screen.output_frame.or(screen.input_frame))
            .collect()
    }
}

/// One entry of an orientation's `screens` list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenFrame {
    /// Region of the emulated display that is shown
    #[serde(default)]
    pub input_frame: Option<Rect>,
    /// Where that region is placed on the skin
    #[serde(default)]
    pub output_frame: Option<Rect>,
}

/// Artwork file names keyed by quality tier.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Assets {
    /// Vector artwork usable at any size
    #[serde(default)]
    pub resizable: Option<String>,
    /// Small raster artwork
    #[serde(default)]
    pub small: Option<String>,
    /// Medium raster artwork
    #[serde(default)]
    pub medium: Option<String>,
    /// Large raster artwork
    #[serde(default)]
    pub large: Option<String>,
}

impl Assets {
    /// Returns the first available asset in `resizable`, `small`, `medium`,
    /// `large` order.
    pub fn preferred(&self) -> Option<&str> {
        [&self.resizable, &self.small, &self.medium, &self.large]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|name| !name.is_empty())
    }
}

/// One interactive region of a skin.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputItem {
    /// Visual bounds of the region
    #[serde(default)]
    pub frame: Option<Rect>,
    /// Inputs triggered by the region
    #[serde(default)]
    pub inputs: Option<Inputs>,
    /// Extra touch area beyond the frame, per edge
    #[serde(default)]
    pub extended_edges: Option<ExtendedEdges>,
}

/// The two shapes an item's `inputs` can take.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Inputs {
    /// Plain button list, e.g. `["a"]` or `["a", "b"]`
    Buttons(Vec<String>),
    /// Direction → input mapping used by d-pads and analog sticks
    Directional(Map<String, Value>),
}

impl Inputs {
    /// Returns true if no inputs are listed.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Buttons(buttons) => buttons.is_empty(),
            Self::Directional(map) => map.is_empty(),
        }
    }
}

/// Extra hit-area distances in pixels beyond each edge of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ExtendedEdges {
    /// Extension above the frame
    #[serde(default)]
    pub top: Option<f64>,
    /// Extension below the frame
    #[serde(default)]
    pub bottom: Option<f64>,
    /// Extension left of the frame
    #[serde(default)]
    pub left: Option<f64>,
    /// Extension right of the frame
    #[serde(default)]
    pub right: Option<f64>,
}
