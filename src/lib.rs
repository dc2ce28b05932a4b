//! Delta Skin Overlay Library
//!
//! Converts Delta emulator skins into RetroArch overlay configurations:
//! manifest parsing, input translation, coordinate normalization, overlay
//! text generation and per-device package conversion.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod input_map;
pub mod models;
pub mod overlay;
pub mod package;
pub mod services;
