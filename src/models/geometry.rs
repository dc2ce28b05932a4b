//! Pixel-space rectangles and the coordinate space they live in.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in skin pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in pixels
    pub width: f64,
    /// Height in pixels
    pub height: f64,
}

impl Rect {
    /// Creates a new `Rect`.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Reference size that defines the coordinate space of one orientation.
///
/// Every frame of an orientation is expressed relative to its own mapping
/// size, so frames from different orientations are never comparable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingSize {
    /// Reference width in pixels
    pub width: f64,
    /// Reference height in pixels
    pub height: f64,
}

impl MappingSize {
    /// Creates a new `MappingSize`.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions of an image rendered at `scale` times this size.
    pub fn scaled(&self, scale: u32) -> (u32, u32) {
        let scale = f64::from(scale);
        ((self.width * scale) as u32, (self.height * scale) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_scaled_truncates() {
        let size = MappingSize::new(414.5, 896.0);
        assert_eq!(size.scaled(3), (1243, 2688));
        assert_eq!(size.scaled(1), (414, 896));
    }
}
