//! Input item classification and descriptor emission.
//!
//! Each skin item becomes at most one overlay descriptor line plus optional
//! reach lines that grow its hit area. Descriptor ids follow the item's
//! position in the source list, so skipped items leave gaps in the numbering.

use std::fmt;

use crate::input_map::{self, ANALOG_STICK_INPUTS, DPAD_DIRECTIONS};
use crate::models::{ExtendedEdges, InputItem, Inputs, MappingSize, Rect};

use super::geometry::{normalize_frame, NormalizedFrame};

/// RetroArch input name for an analog stick region.
pub const ANALOG_STICK_TARGET: &str = "analog_left";

/// RetroArch input name for a d-pad region.
pub const DPAD_TARGET: &str = "dpad_area";

/// Hit-test shape of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Elliptical hit test
    Radial,
    /// Rectangular hit test
    Rect,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Radial => write!(f, "radial"),
            Self::Rect => write!(f, "rect"),
        }
    }
}

/// What kind of control an item's `inputs` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind<'a> {
    /// Button list; only the first button is used
    Button(&'a str),
    /// Four-way directional pad
    DirectionalPad,
    /// Analog stick (checked before d-pad)
    AnalogStick,
    /// Composite input with no overlay equivalent
    Unrecognized,
}

impl<'a> InputKind<'a> {
    /// Classifies an item's inputs.
    pub fn classify(inputs: &'a Inputs) -> Self {
        match inputs {
            Inputs::Buttons(buttons) => buttons
                .first()
                .map_or(Self::Unrecognized, |button| Self::Button(button)),
            Inputs::Directional(map) => {
                let is_analog = map
                    .values()
                    .filter_map(|value| value.as_str())
                    .any(|value| ANALOG_STICK_INPUTS.contains(&value));
                if is_analog {
                    Self::AnalogStick
                } else if DPAD_DIRECTIONS.iter().all(|dir| map.contains_key(*dir)) {
                    Self::DirectionalPad
                } else {
                    Self::Unrecognized
                }
            }
        }
    }

    /// RetroArch input name and shape, or `None` if nothing is emitted.
    pub fn target(self) -> Option<(&'a str, Shape)> {
        match self {
            Self::Button(button) => {
                input_map::retroarch_input(button).map(|name| (name, Shape::Radial))
            }
            Self::AnalogStick => Some((ANALOG_STICK_TARGET, Shape::Radial)),
            Self::DirectionalPad => Some((DPAD_TARGET, Shape::Rect)),
            Self::Unrecognized => None,
        }
    }
}

/// Frame edge that can carry a reach modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top edge (`reach_up`)
    Top,
    /// Bottom edge (`reach_down`)
    Bottom,
    /// Left edge (`reach_left`)
    Left,
    /// Right edge (`reach_right`)
    Right,
}

impl Edge {
    /// All edges in emission order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Direction suffix used by RetroArch's `_reach_*` keys.
    pub const fn reach_name(self) -> &'static str {
        match self {
            Self::Top => "up",
            Self::Bottom => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    fn extension(self, edges: &ExtendedEdges) -> Option<f64> {
        match self {
            Self::Top => edges.top,
            Self::Bottom => edges.bottom,
            Self::Left => edges.left,
            Self::Right => edges.right,
        }
    }

    fn half_extent(self, frame: &Rect) -> f64 {
        match self {
            Self::Top | Self::Bottom => frame.height / 2.0,
            Self::Left | Self::Right => frame.width / 2.0,
        }
    }
}

/// One `overlayN_descI = "..."` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    /// Key prefix, e.g. `overlay0_desc3`
    pub id: String,
    /// RetroArch input name
    pub input: String,
    /// Normalized hit area
    pub frame: NormalizedFrame,
    /// Hit-test shape
    pub shape: Shape,
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} = \"{},{:.6},{:.6},{},{:.6},{:.6}\"",
            self.id,
            self.input,
            self.frame.center_x,
            self.frame.center_y,
            self.shape,
            self.frame.half_width,
            self.frame.half_height
        )
    }
}

/// One `overlayN_descI_reach_<dir> = <multiplier>` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Reach {
    /// Descriptor key prefix this modifier belongs to
    pub id: String,
    /// Edge being extended
    pub edge: Edge,
    /// Hit-area multiplier along that edge
    pub multiplier: f64,
}

impl fmt::Display for Reach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_reach_{} = {:.2}",
            self.id,
            self.edge.reach_name(),
            self.multiplier
        )
    }
}

/// Everything emitted for a single skin item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDescriptors {
    /// Main descriptor, absent for unconvertible inputs
    pub descriptor: Option<Descriptor>,
    /// Reach modifiers in top, bottom, left, right order
    pub reaches: Vec<Reach>,
}

impl ItemDescriptors {
    /// Config lines for this item, descriptor first.
    pub fn lines(&self) -> Vec<String> {
        self.descriptor
            .iter()
            .map(ToString::to_string)
            .chain(self.reaches.iter().map(ToString::to_string))
            .collect()
    }
}

/// Key prefix for a descriptor: `overlay<overlay>_desc<item>`.
pub fn descriptor_id(overlay_index: usize, item_index: usize) -> String {
    format!("overlay{overlay_index}_desc{item_index}")
}

/// Converts one skin item into its descriptor and reach modifiers.
///
/// Items without a frame or without inputs produce nothing. Reach modifiers
/// are emitted for every non-zero extended edge even when the inputs have
/// no overlay equivalent.
pub fn convert_item(
    item: &InputItem,
    mapping_size: &MappingSize,
    overlay_index: usize,
    item_index: usize,
) -> ItemDescriptors {
    let (Some(frame), Some(inputs)) = (item.frame.as_ref(), item.inputs.as_ref()) else {
        return ItemDescriptors::default();
    };
    if inputs.is_empty() {
        return ItemDescriptors::default();
    }

    let id = descriptor_id(overlay_index, item_index);

    let descriptor = InputKind::classify(inputs)
        .target()
        .map(|(input, shape)| Descriptor {
            id: id.clone(),
            input: input.to_string(),
            frame: normalize_frame(frame, mapping_size),
            shape,
        });

    let reaches = item
        .extended_edges
        .as_ref()
        .map(|edges| reaches_for(&id, frame, edges))
        .unwrap_or_default();

    ItemDescriptors {
        descriptor,
        reaches,
    }
}

fn reaches_for(id: &str, frame: &Rect, edges: &ExtendedEdges) -> Vec<Reach> {
    Edge::ALL
        .into_iter()
        .filter_map(|edge| {
            let extension = edge.extension(edges).filter(|ext| *ext != 0.0)?;
            let half_extent = edge.half_extent(frame);
            if half_extent == 0.0 {
                tracing::debug!("{id}: ignoring {:?} reach on zero-sized frame", edge);
                return None;
            }
            Some(Reach {
                id: id.to_string(),
                edge,
                multiplier: 1.0 + extension / half_extent,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(value: serde_json::Value) -> InputItem {
        serde_json::from_value(value).unwrap()
    }

    fn size() -> MappingSize {
        MappingSize::new(400.0, 800.0)
    }

    #[test]
    fn test_single_button_resolves_to_same_name() {
        let inputs = Inputs::Buttons(vec!["a".to_string()]);
        assert_eq!(
            InputKind::classify(&inputs).target(),
            Some(("a", Shape::Radial))
        );
    }

    #[test]
    fn test_menu_button_resolves_to_menu_toggle() {
        let inputs = Inputs::Buttons(vec!["menu".to_string()]);
        assert_eq!(
            InputKind::classify(&inputs).target(),
            Some(("menu_toggle", Shape::Radial))
        );
    }

    #[test]
    fn test_only_first_button_is_used() {
        let inputs = Inputs::Buttons(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(InputKind::classify(&inputs), InputKind::Button("b"));
    }

    #[test]
    fn test_dpad_classification() {
        let item = item(json!({
            "frame": {"x": 0, "y": 400, "width": 200, "height": 200},
            "inputs": {"up": "up", "down": "down", "left": "left", "right": "right"}
        }));
        let out = convert_item(&item, &size(), 0, 2);
        let descriptor = out.descriptor.unwrap();

        assert_eq!(descriptor.input, DPAD_TARGET);
        assert_eq!(descriptor.shape, Shape::Rect);
        assert_eq!(
            descriptor.to_string(),
            "overlay0_desc2 = \"dpad_area,0.250000,0.625000,rect,0.250000,0.125000\""
        );
    }

    #[test]
    fn test_dpad_key_order_does_not_matter() {
        let inputs: Inputs = serde_json::from_value(
            json!({"right": "right", "left": "left", "down": "down", "up": "up"}),
        )
        .unwrap();
        assert_eq!(InputKind::classify(&inputs), InputKind::DirectionalPad);
    }

    #[test]
    fn test_analog_stick_takes_precedence_over_dpad() {
        let inputs: Inputs = serde_json::from_value(json!({
            "up": "analogStickUp",
            "down": "analogStickDown",
            "left": "analogStickLeft",
            "right": "analogStickRight"
        }))
        .unwrap();
        let kind = InputKind::classify(&inputs);

        assert_eq!(kind, InputKind::AnalogStick);
        assert_eq!(kind.target(), Some((ANALOG_STICK_TARGET, Shape::Radial)));
    }

    #[test]
    fn test_partial_direction_map_is_unrecognized() {
        let inputs: Inputs =
            serde_json::from_value(json!({"up": "up", "down": "down", "left": "left"})).unwrap();
        assert_eq!(InputKind::classify(&inputs), InputKind::Unrecognized);
        assert_eq!(InputKind::classify(&inputs).target(), None);
    }

    #[test]
    fn test_touch_screen_emits_no_descriptor() {
        let inputs: Inputs =
            serde_json::from_value(json!({"x": "touchScreenX", "y": "touchScreenY"})).unwrap();
        assert_eq!(InputKind::classify(&inputs).target(), None);

        let inputs = Inputs::Buttons(vec!["touchScreenX".to_string()]);
        assert_eq!(InputKind::classify(&inputs).target(), None);
    }

    #[test]
    fn test_button_line_format() {
        let item = item(json!({
            "frame": {"x": 300, "y": 500, "width": 60, "height": 60},
            "inputs": ["a"]
        }));
        let lines = convert_item(&item, &size(), 1, 0).lines();

        assert_eq!(
            lines,
            vec!["overlay1_desc0 = \"a,0.825000,0.662500,radial,0.075000,0.037500\""]
        );
    }

    #[test]
    fn test_missing_frame_or_inputs_is_skipped() {
        let no_frame = item(json!({"inputs": ["a"]}));
        assert!(convert_item(&no_frame, &size(), 0, 0).lines().is_empty());

        let no_inputs = item(json!({"frame": {"x": 0, "y": 0, "width": 10, "height": 10}}));
        assert!(convert_item(&no_inputs, &size(), 0, 0).lines().is_empty());

        let empty_inputs = item(json!({
            "frame": {"x": 0, "y": 0, "width": 10, "height": 10},
            "inputs": [],
            "extendedEdges": {"top": 5}
        }));
        assert!(convert_item(&empty_inputs, &size(), 0, 0).lines().is_empty());
    }

    #[test]
    fn test_reach_lines() {
        let item = item(json!({
            "frame": {"x": 0, "y": 0, "width": 40, "height": 20},
            "inputs": ["b"],
            "extendedEdges": {"top": 5, "bottom": 0, "left": 10, "right": 3}
        }));
        let lines = convert_item(&item, &size(), 0, 4).lines();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "overlay0_desc4_reach_up = 1.50");
        assert_eq!(lines[2], "overlay0_desc4_reach_left = 1.50");
        assert_eq!(lines[3], "overlay0_desc4_reach_right = 1.15");
    }

    #[test]
    fn test_reach_emitted_for_unrecognized_inputs() {
        let item = item(json!({
            "frame": {"x": 0, "y": 0, "width": 100, "height": 100},
            "inputs": {"x": "touchScreenX", "y": "touchScreenY"},
            "extendedEdges": {"bottom": 25}
        }));
        let out = convert_item(&item, &size(), 0, 7);

        assert!(out.descriptor.is_none());
        assert_eq!(out.lines(), vec!["overlay0_desc7_reach_down = 1.50"]);
    }
}
