//! Part and part set data structures.
//!
//! A part set is the full appearance of one costume: one [`Part`] per body
//! region. Each part names its geometry (model ids), the files it loads and
//! the color selectors of its material slots.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ColorSelector;

/// Body regions a part set is composed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PartKind {
    /// Face base (skin, mouth).
    FaceBase = 0,
    /// Forehead.
    FaceForehead = 1,
    /// Eyes.
    FaceEye = 2,
    /// Nose.
    FaceNose = 3,
    /// Ears.
    FaceEar = 4,
    /// Hair.
    Hair = 5,
    /// Upper body clothing.
    Bust = 6,
    /// Lower body clothing.
    Pants = 7,
    /// Gloves and wrists.
    Rist = 8,
    /// Shoes.
    Boots = 9,
    /// Accessory.
    Accessory = 10,
}

impl PartKind {
    /// Get all part kinds in order.
    pub const fn all() -> [PartKind; 11] {
        [
            PartKind::FaceBase,
            PartKind::FaceForehead,
            PartKind::FaceEye,
            PartKind::FaceNose,
            PartKind::FaceEar,
            PartKind::Hair,
            PartKind::Bust,
            PartKind::Pants,
            PartKind::Rist,
            PartKind::Boots,
            PartKind::Accessory,
        ]
    }

    /// Get the name of this part kind.
    pub const fn name(&self) -> &'static str {
        match self {
            PartKind::FaceBase => "FaceBase",
            PartKind::FaceForehead => "FaceForehead",
            PartKind::FaceEye => "FaceEye",
            PartKind::FaceNose => "FaceNose",
            PartKind::FaceEar => "FaceEar",
            PartKind::Hair => "Hair",
            PartKind::Bust => "Bust",
            PartKind::Pants => "Pants",
            PartKind::Rist => "Rist",
            PartKind::Boots => "Boots",
            PartKind::Accessory => "Accessory",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One body region's geometry and material choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// The region this part covers.
    pub kind: PartKind,
    /// Code of the character directory owning the part's files.
    pub owner: String,
    /// Primary model id.
    pub model: u16,
    /// Secondary model id.
    #[serde(default)]
    pub model2: u16,
    /// Texture id.
    #[serde(default)]
    pub texture: u16,
    /// Files the part loads, relative to the owner's directory.
    #[serde(default)]
    pub files: Vec<String>,
    /// One selector per colorable material slot.
    #[serde(default)]
    pub color_selectors: Vec<ColorSelector>,
}

impl Part {
    /// Create a new part without files or color selectors.
    pub fn new(kind: PartKind, owner: impl Into<String>, model: u16) -> Self {
        Self {
            kind,
            owner: owner.into(),
            model,
            model2: 0,
            texture: 0,
            files: Vec::new(),
            color_selectors: Vec::new(),
        }
    }

    /// Add a file reference.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.files.push(file.into());
        self
    }

    /// Add a color selector.
    pub fn with_selector(mut self, selector: ColorSelector) -> Self {
        self.color_selectors.push(selector);
        self
    }

    /// Move ownership to another character code.
    ///
    /// File names carrying the `from` prefix are renamed to the new owner,
    /// `HUM_000_Bust.emd` becoming `XYZ_000_Bust.emd` for `from = "HUM"`
    /// and `owner = "XYZ"`.
    pub fn rebase(&mut self, from: &str, owner: &str) {
        for file in &mut self.files {
            *file = rebase_file_name(file, from, owner);
        }
        self.owner = owner.to_string();
    }
}

/// Replace the `from` prefix of a file name with `to`.
///
/// Names without the prefix are returned unchanged.
pub fn rebase_file_name(file: &str, from: &str, to: &str) -> String {
    match file.strip_prefix(from) {
        Some(rest) if !from.is_empty() => format!("{}{}", to, rest),
        _ => file.to_string(),
    }
}

/// A costume: at most one part per body region.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartSet {
    parts: BTreeMap<PartKind, Part>,
}

impl PartSet {
    /// Create a new empty part set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the part of a kind, if present.
    pub fn get(&self, kind: PartKind) -> Option<&Part> {
        self.parts.get(&kind)
    }

    /// Insert a part, replacing any previous part of its kind.
    pub fn insert(&mut self, part: Part) -> Option<Part> {
        self.parts.insert(part.kind, part)
    }

    /// Remove the part of a kind.
    pub fn remove(&mut self, kind: PartKind) -> Option<Part> {
        self.parts.remove(&kind)
    }

    /// Iterate over parts in [`PartKind`] order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.parts.values()
    }

    /// Iterate mutably over parts in [`PartKind`] order.
    pub fn parts_mut(&mut self) -> impl Iterator<Item = &mut Part> {
        self.parts.values_mut()
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Check if the set has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Replace this set's parts with every part `other` defines.
    ///
    /// Regions `other` leaves empty keep their current part.
    pub fn overlay(&mut self, other: &PartSet) {
        for part in other.parts() {
            self.insert(part.clone());
        }
    }

    /// Move every part to another owner. See [`Part::rebase`].
    pub fn rebase(&mut self, from: &str, owner: &str) {
        for part in self.parts_mut() {
            part.rebase(from, owner);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebase_renames_prefixed_files() {
        let mut part = Part::new(PartKind::Bust, "HUM", 3)
            .with_file("HUM_003_Bust.emd")
            .with_file("shared/fx.emb");
        part.rebase("HUM", "XYZ");

        assert_eq!(part.owner, "XYZ");
        assert_eq!(part.files, vec!["XYZ_003_Bust.emd", "shared/fx.emb"]);
    }

    #[test]
    fn test_rebase_file_name_empty_prefix() {
        assert_eq!(rebase_file_name("HUM_000.emd", "", "XYZ"), "HUM_000.emd");
    }

    #[test]
    fn test_overlay_replaces_only_defined_regions() {
        let mut base = PartSet::new();
        base.insert(Part::new(PartKind::Hair, "HUM", 1));
        base.insert(Part::new(PartKind::Bust, "HUM", 2));

        let mut stage = PartSet::new();
        stage.insert(Part::new(PartKind::Hair, "HUM", 100));

        base.overlay(&stage);
        assert_eq!(base.get(PartKind::Hair).map(|p| p.model), Some(100));
        assert_eq!(base.get(PartKind::Bust).map(|p| p.model), Some(2));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_parts_in_kind_order() {
        let mut set = PartSet::new();
        set.insert(Part::new(PartKind::Boots, "HUM", 0));
        set.insert(Part::new(PartKind::FaceBase, "HUM", 0));
        let kinds: Vec<_> = set.parts().map(|p| p.kind).collect();
        assert_eq!(kinds, vec![PartKind::FaceBase, PartKind::Boots]);
    }
}
