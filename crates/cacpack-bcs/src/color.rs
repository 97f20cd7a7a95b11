//! Color table data structures.
//!
//! Every material slot of a part carries a [`ColorSelector`] that points at a
//! named [`ColorGroup`] and picks one palette entry out of it. The group name
//! tells which character attribute (skin, hair, top clothing, ...) drives it.

use serde::{Deserialize, Serialize};

/// RGBA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from bytes (0-255 range).
    pub fn from_bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a white color.
    pub const fn white() -> Self {
        Self {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        }
    }
}

impl Default for ColorRgba {
    fn default() -> Self {
        Self::white()
    }
}

/// A named palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorGroup {
    /// Group name, e.g. `SKIN_A` or `CC00_BUST_`.
    pub name: String,
    /// Palette entries.
    #[serde(default)]
    pub colors: Vec<ColorRgba>,
}

impl ColorGroup {
    /// Create a new group.
    pub fn new(name: impl Into<String>, colors: Vec<ColorRgba>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Number of palette entries.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the palette is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// A material slot's choice of palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSelector {
    /// Index into the file's color groups.
    pub group: u16,
    /// Index into the group's palette.
    pub color: u16,
}

impl ColorSelector {
    /// Create a new selector.
    pub const fn new(group: u16, color: u16) -> Self {
        Self { group, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_rgba() {
        let color = ColorRgba::from_bytes(255, 128, 0, 255);
        assert!((color.r - 1.0).abs() < 0.01);
        assert!((color.g - 0.5).abs() < 0.01);
        assert!((color.b - 0.0).abs() < 0.01);
        assert!((color.a - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_group_len() {
        let group = ColorGroup::new("HAIR_", vec![ColorRgba::white(); 3]);
        assert_eq!(group.len(), 3);
        assert!(!group.is_empty());
    }
}
