//! Pixel → normalized coordinate conversion.
//!
//! RetroArch overlays address everything in the unit square. Descriptors use
//! a center point plus half extents; viewports use top-left plus size.

use crate::models::{MappingSize, Rect};

/// A frame in the unit square, as center point and half extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedFrame {
    /// Horizontal center
    pub center_x: f64,
    /// Vertical center
    pub center_y: f64,
    /// Half the width
    pub half_width: f64,
    /// Half the height
    pub half_height: f64,
}

/// Converts a pixel frame into center + half-extent form relative to
/// `mapping_size`.
///
/// `mapping_size` must have non-zero dimensions.
pub fn normalize_frame(frame: &Rect, mapping_size: &MappingSize) -> NormalizedFrame {
    NormalizedFrame {
        center_x: (frame.x + frame.width / 2.0) / mapping_size.width,
        center_y: (frame.y + frame.height / 2.0) / mapping_size.height,
        half_width: (frame.width / 2.0) / mapping_size.width,
        half_height: (frame.height / 2.0) / mapping_size.height,
    }
}

/// Converts a pixel rectangle into a normalized top-left + size rectangle.
pub fn normalize_rect(rect: &Rect, mapping_size: &MappingSize) -> Rect {
    Rect::new(
        rect.x / mapping_size.width,
        rect.y / mapping_size.height,
        rect.width / mapping_size.width,
        rect.height / mapping_size.height,
    )
}

/// Smallest rectangle covering every frame, or `None` for no frames.
///
/// Used to merge the screens of multi-screen systems (e.g. DS) into one
/// viewport.
pub fn bounding_box<'a, I>(frames: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Rect>,
{
    let mut frames = frames.into_iter();
    let first = frames.next()?;

    let (min_x, min_y, max_x, max_y) = frames.fold(
        (first.x, first.y, first.right(), first.bottom()),
        |(min_x, min_y, max_x, max_y), frame| {
            (
                min_x.min(frame.x),
                min_y.min(frame.y),
                max_x.max(frame.right()),
                max_y.max(frame.bottom()),
            )
        },
    );

    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}
