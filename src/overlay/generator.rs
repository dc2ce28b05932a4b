//! RetroArch overlay config assembly.
//!
//! One overlay is produced per orientation the skin provides, portrait
//! first. When both exist, each overlay gets an extra hot zone that flips
//! to the other one.

use std::fmt;

use tracing::debug;

use crate::models::{DisplayLayout, OrientationData, Rect};

use super::descriptor::{convert_item, descriptor_id};
use super::geometry::{bounding_box, normalize_rect};

/// Device orientation of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall
    Landscape,
}

impl Orientation {
    /// Orientations in output order.
    pub const ALL: [Self; 2] = [Self::Portrait, Self::Landscape];

    /// Overlay name, also used as the `next_target` of the rotate control.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }

    /// File name of the overlay image.
    pub const fn image_name(self) -> &'static str {
        match self {
            Self::Portrait => "portrait.png",
            Self::Landscape => "landscape.png",
        }
    }

    /// The opposite orientation.
    pub const fn other(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }

    /// Rotate control placement near top-center, as
    /// `center_x,center_y,radial,half_width,half_height`.
    const fn rotate_hot_zone(self) -> &'static str {
        match self {
            Self::Portrait => "0.5,0.02,radial,0.04,0.02",
            Self::Landscape => "0.5,0.04,radial,0.02,0.04",
        }
    }

    /// Aspect ratio RetroArch expects for this orientation.
    ///
    /// Portrait uses height / width and landscape width / height.
    fn aspect_ratio(self, data: &OrientationData) -> f64 {
        let size = &data.mapping_size;
        match self {
            Self::Portrait => size.height / size.width,
            Self::Landscape => size.width / size.height,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the orientation layouts present in a display layout, in output order.
pub fn available_orientations(layout: &DisplayLayout) -> Vec<(Orientation, &OrientationData)> {
    Orientation::ALL
        .into_iter()
        .filter_map(|orientation| {
            let data = match orientation {
                Orientation::Portrait => layout.portrait.as_ref(),
                Orientation::Landscape => layout.landscape.as_ref(),
            };
            data.map(|data| (orientation, data))
        })
        .collect()
}

/// Pixel viewport of an orientation: the bounding box of its screens, or its
/// `gameScreenFrame` when it lists no screens.
pub fn viewport_frame(data: &OrientationData) -> Option<Rect> {
    bounding_box(&data.screen_frames()).or(data.game_screen_frame)
}

/// One overlay section of the config.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Position of this overlay in the config (`overlayN_`)
    pub index: usize,
    /// Orientation this overlay covers
    pub orientation: Orientation,
    /// Value of `overlayN_aspect_ratio`
    pub aspect_ratio: f64,
    /// Normalized game viewport (top-left + size)
    pub viewport: Option<Rect>,
    /// Value of `overlayN_descs`: source items plus the rotate control
    pub desc_count: usize,
    /// Descriptor and modifier lines in output order
    pub descriptor_lines: Vec<String>,
}

impl Overlay {
    /// Builds the overlay for one orientation.
    ///
    /// `rotate` adds the hot zone that switches to the other orientation.
    pub fn build(
        index: usize,
        orientation: Orientation,
        data: &OrientationData,
        rotate: bool,
    ) -> Self {
        let mapping_size = &data.mapping_size;

        let viewport = viewport_frame(data).map(|frame| normalize_rect(&frame, mapping_size));
        if viewport.is_none() {
            debug!("{orientation}: no screen frame, omitting viewport");
        }

        let mut descriptor_lines: Vec<String> = data
            .items
            .iter()
            .enumerate()
            .flat_map(|(item_index, item)| {
                convert_item(item, mapping_size, index, item_index).lines()
            })
            .collect();

        let mut desc_count = data.items.len();
        if rotate {
            let id = descriptor_id(index, data.items.len());
            descriptor_lines.push(format!(
                "{id} = \"overlay_next,{}\"",
                orientation.rotate_hot_zone()
            ));
            descriptor_lines.push(format!(
                "{id}_next_target = \"{}\"",
                orientation.other().name()
            ));
            desc_count += 1;
        }

        Self {
            index,
            orientation,
            aspect_ratio: orientation.aspect_ratio(data),
            viewport,
            desc_count,
            descriptor_lines,
        }
    }

    fn write_lines(&self, lines: &mut Vec<String>) {
        let prefix = format!("overlay{}", self.index);

        lines.push(format!("{prefix}_name = \"{}\"", self.orientation.name()));
        lines.push(format!(
            "{prefix}_overlay = \"{}\"",
            self.orientation.image_name()
        ));
        lines.push(format!("{prefix}_full_screen = true"));
        lines.push(format!("{prefix}_normalized = true"));
        lines.push(format!("{prefix}_aspect_ratio = {:.6}", self.aspect_ratio));
        if let Some(vp) = &self.viewport {
            lines.push(format!(
                "{prefix}_viewport = \"{:.6},{:.6},{:.6},{:.6}\"",
                vp.x, vp.y, vp.width, vp.height
            ));
        }
        lines.push(String::new());

        lines.push(format!("{prefix}_descs = {}", self.desc_count));
        lines.push(String::new());
        lines.extend(self.descriptor_lines.iter().cloned());
        lines.push(String::new());
    }
}

/// A complete overlay config for one device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayConfig {
    /// Overlays in output order
    pub overlays: Vec<Overlay>,
}

impl OverlayConfig {
    /// Builds the config for every orientation present in `layout`.
    pub fn generate(layout: &DisplayLayout) -> Self {
        let orientations = available_orientations(layout);
        let rotate = orientations.len() > 1;

        let overlays = orientations
            .into_iter()
            .enumerate()
            .map(|(index, (orientation, data))| Overlay::build(index, orientation, data, rotate))
            .collect();

        Self { overlays }
    }

    /// Finds the overlay for an orientation.
    pub fn overlay(&self, orientation: Orientation) -> Option<&Overlay> {
        self.overlays
            .iter()
            .find(|overlay| overlay.orientation == orientation)
    }

    /// Config file lines, blank lines included.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("overlays = {}", self.overlays.len()), String::new()];
        for overlay in &self.overlays {
            overlay.write_lines(&mut lines);
        }
        lines
    }
}

impl fmt::Display for OverlayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
