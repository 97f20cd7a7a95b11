//! BCS container.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ColorGroup, ColorSelector, Error, Part, PartKind, PartSet, Result};

/// Scale applied to one skeleton bone by a body shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneScale {
    pub bone: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// A body shape: the bone scales applied on top of the base skeleton.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub bone_scales: Vec<BoneScale>,
}

/// A body-part-set file.
///
/// Part sets are keyed by id. Costumes occupy the low ids while
/// transformation stages keep the ids the game addresses them by.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BcsFile {
    #[serde(default)]
    part_sets: BTreeMap<u16, PartSet>,
    #[serde(default)]
    color_groups: Vec<ColorGroup>,
    #[serde(default)]
    bodies: Vec<Body>,
}

impl BcsFile {
    /// Create a new empty file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty file sharing this file's color table and bodies.
    ///
    /// Output part sets are built into such a file so color selectors
    /// copied from the template keep pointing at the same groups.
    pub fn with_tables_of(template: &BcsFile) -> Self {
        Self {
            part_sets: BTreeMap::new(),
            color_groups: template.color_groups.clone(),
            bodies: template.bodies.clone(),
        }
    }

    /// Get a part set by id.
    pub fn part_set(&self, id: u16) -> Result<&PartSet> {
        self.part_sets.get(&id).ok_or(Error::PartSetNotFound(id))
    }

    /// Get one part of a part set.
    pub fn part(&self, set: u16, kind: PartKind) -> Result<&Part> {
        self.part_set(set)?
            .get(kind)
            .ok_or(Error::PartNotFound { set, kind })
    }

    /// Check whether a part set id is occupied.
    pub fn contains_part_set(&self, id: u16) -> bool {
        self.part_sets.contains_key(&id)
    }

    /// Insert a part set, returning the one previously stored at `id`.
    pub fn insert_part_set(&mut self, id: u16, set: PartSet) -> Option<PartSet> {
        self.part_sets.insert(id, set)
    }

    /// Iterate over part sets in id order.
    pub fn part_sets(&self) -> impl Iterator<Item = (u16, &PartSet)> {
        self.part_sets.iter().map(|(id, set)| (*id, set))
    }

    /// Number of part sets.
    pub fn part_set_count(&self) -> usize {
        self.part_sets.len()
    }

    /// Get the color table.
    pub fn color_groups(&self) -> &[ColorGroup] {
        &self.color_groups
    }

    /// Add a color group, returning its index.
    pub fn add_color_group(&mut self, group: ColorGroup) -> u16 {
        self.color_groups.push(group);
        (self.color_groups.len() - 1) as u16
    }

    /// Get a color group by index.
    pub fn color_group(&self, index: u16) -> Result<&ColorGroup> {
        self.color_groups
            .get(index as usize)
            .ok_or(Error::ColorGroupNotFound(index))
    }

    /// Check that a selector points at an existing palette entry.
    pub fn check_selector(&self, selector: ColorSelector) -> Result<()> {
        let group = self.color_group(selector.group)?;
        if selector.color as usize >= group.len() {
            return Err(Error::ColorOutOfRange {
                group: group.name.clone(),
                color: selector.color,
                len: group.len(),
            });
        }
        Ok(())
    }

    /// Get the body shapes.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Add a body shape.
    pub fn add_body(&mut self, body: Body) {
        self.bodies.push(body);
    }

    /// Get a body shape by index.
    pub fn body(&self, index: u8) -> Result<&Body> {
        self.bodies
            .get(index as usize)
            .ok_or(Error::BodyNotFound(index))
    }

    /// Keep only the given body shape.
    pub fn retain_body(&mut self, index: u8) -> Result<()> {
        let body = self.body(index)?.clone();
        self.bodies = vec![body];
        Ok(())
    }
}
