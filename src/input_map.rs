//! Delta → RetroArch input name tables.
//!
//! Both tables are built once on first access and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Source button identifiers and the RetroArch input each one drives.
///
/// `None` marks inputs that exist in skins but have no overlay equivalent
/// (the DS touch screen axes).
static BUTTONS: LazyLock<HashMap<&'static str, Option<&'static str>>> = LazyLock::new(|| {
    HashMap::from([
        // Standard buttons
        ("a", Some("a")),
        ("b", Some("b")),
        ("x", Some("x")),
        ("y", Some("y")),
        ("l", Some("l")),
        ("r", Some("r")),
        ("start", Some("start")),
        ("select", Some("select")),
        ("menu", Some("menu_toggle")),
        // N64
        ("z", Some("l2")),
        ("cUp", Some("r_y_minus")),
        ("cDown", Some("r_y_plus")),
        ("cLeft", Some("r_x_minus")),
        ("cRight", Some("r_x_plus")),
        // D-pad directions
        ("up", Some("up")),
        ("down", Some("down")),
        ("left", Some("left")),
        ("right", Some("right")),
        // Analog stick directions
        ("analogStickUp", Some("l_y_minus")),
        ("analogStickDown", Some("l_y_plus")),
        ("analogStickLeft", Some("l_x_minus")),
        ("analogStickRight", Some("l_x_plus")),
        // DS touch screen
        ("touchScreenX", None),
        ("touchScreenY", None),
    ])
});

/// Game type identifiers and their short platform names.
static PLATFORMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("com.rileytestut.delta.game.nes", "NES"),
        ("com.rileytestut.delta.game.snes", "SNES"),
        ("com.rileytestut.delta.game.n64", "N64"),
        ("com.rileytestut.delta.game.gbc", "GBC"),
        ("com.rileytestut.delta.game.gba", "GBA"),
        ("com.rileytestut.delta.game.ds", "DS"),
        ("com.rileytestut.delta.game.genesis", "Genesis"),
    ])
});

/// Values of a d-pad style mapping that mark it as an analog stick.
pub const ANALOG_STICK_INPUTS: [&str; 4] = [
    "analogStickUp",
    "analogStickDown",
    "analogStickLeft",
    "analogStickRight",
];

/// Keys a mapping must contain to be treated as a d-pad.
pub const DPAD_DIRECTIONS: [&str; 4] = ["up", "down", "left", "right"];

/// Resolves a source button to its RetroArch input name.
///
/// Unknown buttons pass through unchanged; buttons with no overlay
/// equivalent resolve to `None`.
pub fn retroarch_input(button: &str) -> Option<&str> {
    match BUTTONS.get(button) {
        Some(mapped) => *mapped,
        None => Some(button),
    }
}

/// Returns the short platform name for a game type identifier.
///
/// Unknown identifiers fall back to their last dot-separated segment,
/// e.g. `com.example.game.psx` → `psx`. An empty identifier is `Unknown`.
pub fn platform_name(game_type: &str) -> String {
    if let Some(name) = PLATFORMS.get(game_type) {
        return (*name).to_string();
    }
    if game_type.is_empty() {
        return "Unknown".to_string();
    }
    game_type
        .rsplit('.')
        .next()
        .unwrap_or(game_type)
        .to_string()
}
