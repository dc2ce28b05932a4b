//! Service layer for conversion work.
//!
//! This module contains the conversion driver and the external rasterizer it
//! delegates PDF rendering to.

pub mod converter;
pub mod raster;

// Re-export commonly used types and functions
pub use converter::{ConversionReport, ConvertOptions, Converter, DeviceOutcome};
pub use raster::{Pdftoppm, Rasterizer, Unavailable};
