//! Shared test fixtures: skin manifests and packages on disk.
#![allow(dead_code)] // Not every test binary uses every fixture

use serde_json::{json, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Minimal PNG signature used as artwork payload.
pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfixture";

/// Portrait layout with a face button, a d-pad, a menu button and a game screen.
pub fn portrait_layout() -> Value {
    json!({
        "mappingSize": {"width": 414, "height": 896},
        "assets": {"medium": "portrait.png"},
        "items": [
            {
                "inputs": ["a"],
                "frame": {"x": 300, "y": 600, "width": 60, "height": 60},
                "extendedEdges": {"top": 10, "bottom": 10, "left": 10, "right": 10}
            },
            {
                "inputs": {"up": "up", "down": "down", "left": "left", "right": "right"},
                "frame": {"x": 20, "y": 580, "width": 120, "height": 120}
            },
            {
                "inputs": ["menu"],
                "frame": {"x": 190, "y": 820, "width": 34, "height": 20}
            }
        ],
        "gameScreenFrame": {"x": 0, "y": 60, "width": 414, "height": 276}
    })
}

/// Landscape layout with an analog stick and a shoulder button.
pub fn landscape_layout() -> Value {
    json!({
        "mappingSize": {"width": 896, "height": 414},
        "assets": {"large": "landscape.png"},
        "items": [
            {
                "inputs": {"up": "analogStickUp", "down": "analogStickDown",
                           "left": "analogStickLeft", "right": "analogStickRight"},
                "frame": {"x": 40, "y": 200, "width": 140, "height": 140}
            },
            {
                "inputs": ["z"],
                "frame": {"x": 0, "y": 0, "width": 100, "height": 40}
            }
        ],
        "screens": [
            {"outputFrame": {"x": 224, "y": 0, "width": 448, "height": 336}}
        ]
    })
}

/// Manifest with one iPhone device carrying both orientations.
pub fn manifest(name: &str, game_type: &str) -> Value {
    json!({
        "name": name,
        "identifier": "com.example.fixture",
        "gameTypeIdentifier": game_type,
        "representations": {
            "iphone": {
                "edgeToEdge": {
                    "portrait": portrait_layout(),
                    "landscape": landscape_layout()
                }
            }
        }
    })
}

/// Manifest with iPhone (both orientations) and iPad (portrait only) devices.
pub fn multi_device_manifest() -> Value {
    json!({
        "name": "Multi Skin",
        "gameTypeIdentifier": "com.rileytestut.delta.game.gba",
        "representations": {
            "iphone": {
                "standard": {
                    "portrait": portrait_layout(),
                    "landscape": landscape_layout()
                }
            },
            "ipad": {
                "splitView": {"portrait": portrait_layout()}
            }
        }
    })
}

/// Writes a skin directory holding `manifest` and both PNG artworks.
pub fn create_skin_dir(manifest: &Value) -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    write_skin_files(temp.path(), manifest);
    temp
}

/// Writes the manifest and artwork into an existing directory.
pub fn write_skin_files(dir: &Path, manifest: &Value) {
    fs::create_dir_all(dir).expect("Failed to create skin dir");
    fs::write(
        dir.join("info.json"),
        serde_json::to_vec_pretty(manifest).unwrap(),
    )
    .expect("Failed to write info.json");
    fs::write(dir.join("portrait.png"), PNG_BYTES).unwrap();
    fs::write(dir.join("landscape.png"), PNG_BYTES).unwrap();
}

/// Writes a `.deltaskin` archive holding `manifest` and both PNG artworks.
///
/// Returns the archive path and the temp dir that owns it.
pub fn create_skin_archive(manifest: &Value, file_name: &str) -> (PathBuf, TempDir) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join(file_name);

    let mut zip = ZipWriter::new(File::create(&path).expect("Failed to create archive"));
    let options = SimpleFileOptions::default();

    zip.start_file("info.json", options).unwrap();
    zip.write_all(&serde_json::to_vec(manifest).unwrap())
        .unwrap();
    for asset in ["portrait.png", "landscape.png"] {
        zip.start_file(asset, options).unwrap();
        zip.write_all(PNG_BYTES).unwrap();
    }
    zip.finish().unwrap();

    (path, temp)
}

/// Reads a text file, panicking with the path on failure.
pub fn read_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()))
}

/// Returns the value of `key` in RetroArch config text.
pub fn config_value<'a>(config: &'a str, key: &str) -> Option<&'a str> {
    config.lines().find_map(|line| {
        let (k, v) = line.split_once(" = ")?;
        (k == key).then_some(v)
    })
}
