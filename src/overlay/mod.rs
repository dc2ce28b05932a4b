//! Delta layout → RetroArch overlay translation.
//!
//! This module turns the pixel-space layout of one skin device into the
//! normalized descriptors and header fields of a RetroArch overlay config.

pub mod descriptor;
pub mod generator;
pub mod geometry;

pub use descriptor::{convert_item, Descriptor, InputKind, ItemDescriptors, Shape};
pub use generator::{Orientation, Overlay, OverlayConfig};
pub use geometry::{bounding_box, normalize_frame, NormalizedFrame};
