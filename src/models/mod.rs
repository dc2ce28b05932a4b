//! Data models for Delta skin manifests.
//!
//! These types mirror the parts of `info.json` the converter reads and are
//! independent of the overlay output format.

pub mod geometry;
pub mod manifest;

// Re-export all model types
pub use geometry::{MappingSize, Rect};
pub use manifest::{
    Assets, DeviceLayout, DisplayLayout, ExtendedEdges, InputItem, Inputs, OrientationData,
    ScreenFrame, SkinManifest,
};
