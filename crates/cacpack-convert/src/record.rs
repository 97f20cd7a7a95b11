//! Create-a-Character input records.
//!
//! Records come from an external save-file reader and are read-only for the
//! duration of a conversion.

use serde::{Deserialize, Serialize};

use cacpack_x2m::{Language, StatBlock, SKILL_UNSET};

use crate::game::{GameData, ItemCategory};

/// Number of costume presets a character record holds.
pub const NUM_PRESETS: usize = 8;

/// Item index of an empty equipment slot. Indices at or above it are empty.
pub const ITEM_NONE: u32 = 0xFFFF;

/// Talisman index meaning no talisman. Indices at or above it are unset.
pub const TALISMAN_NONE: u32 = 0xFFFF;

/// Color value keeping the template's palette choice.
pub const COLOR_UNSET: u16 = 0xFFFF;

fn item_none() -> u32 {
    ITEM_NONE
}

fn talisman_none() -> u32 {
    TALISMAN_NONE
}

fn colors_unset<const N: usize>() -> [u16; N] {
    [COLOR_UNSET; N]
}

fn skills_unset<const N: usize>() -> [u16; N] {
    [SKILL_UNSET; N]
}

fn skill_unset() -> u16 {
    SKILL_UNSET
}

fn color_unset() -> u16 {
    COLOR_UNSET
}

/// One saved costume: equipment, clothing colors, talisman and skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostumePreset {
    #[serde(default = "item_none")]
    pub top: u32,
    #[serde(default = "item_none")]
    pub bottom: u32,
    #[serde(default = "item_none")]
    pub gloves: u32,
    #[serde(default = "item_none")]
    pub shoes: u32,
    #[serde(default = "item_none")]
    pub accessory: u32,

    #[serde(default = "colors_unset")]
    pub top_colors: [u16; 4],
    #[serde(default = "colors_unset")]
    pub bottom_colors: [u16; 4],
    #[serde(default = "colors_unset")]
    pub gloves_colors: [u16; 4],
    #[serde(default = "colors_unset")]
    pub shoes_colors: [u16; 4],

    #[serde(default = "talisman_none")]
    pub talisman: u32,

    #[serde(default = "skills_unset")]
    pub super_skills: [u16; 4],
    #[serde(default = "skills_unset")]
    pub ult_skills: [u16; 2],
    #[serde(default = "skill_unset")]
    pub evasive_skill: u16,
    #[serde(default = "skill_unset")]
    pub blast_skill: u16,
    #[serde(default = "skill_unset")]
    pub awaken_skill: u16,
}

impl Default for CostumePreset {
    fn default() -> Self {
        Self {
            top: ITEM_NONE,
            bottom: ITEM_NONE,
            gloves: ITEM_NONE,
            shoes: ITEM_NONE,
            accessory: ITEM_NONE,
            top_colors: [COLOR_UNSET; 4],
            bottom_colors: [COLOR_UNSET; 4],
            gloves_colors: [COLOR_UNSET; 4],
            shoes_colors: [COLOR_UNSET; 4],
            talisman: TALISMAN_NONE,
            super_skills: [SKILL_UNSET; 4],
            ult_skills: [SKILL_UNSET; 2],
            evasive_skill: SKILL_UNSET,
            blast_skill: SKILL_UNSET,
            awaken_skill: SKILL_UNSET,
        }
    }
}

impl CostumePreset {
    /// Equipped item of a category.
    pub fn item(&self, category: ItemCategory) -> u32 {
        match category {
            ItemCategory::Bust => self.top,
            ItemCategory::Pants => self.bottom,
            ItemCategory::Rist => self.gloves,
            ItemCategory::Boots => self.shoes,
            ItemCategory::Accessory => self.accessory,
        }
    }

    /// Whether a talisman is equipped.
    pub fn has_talisman(&self) -> bool {
        self.talisman < TALISMAN_NONE
    }
}

/// A Create-a-Character record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    /// Raw race value, resolved with [`crate::Race::resolve`].
    pub race: u32,
    #[serde(default)]
    pub body_shape: u8,

    #[serde(default)]
    pub face_base: u16,
    #[serde(default)]
    pub face_forehead: u16,
    #[serde(default)]
    pub eyes: u16,
    #[serde(default)]
    pub nose: u16,
    #[serde(default)]
    pub ears: u16,
    #[serde(default)]
    pub hair: u16,

    #[serde(default = "colors_unset")]
    pub skin_colors: [u16; 4],
    #[serde(default = "color_unset")]
    pub hair_color: u16,
    #[serde(default = "color_unset")]
    pub eye_color: u16,
    #[serde(default = "colors_unset")]
    pub makeup_colors: [u16; 3],

    /// Attribute points.
    #[serde(default)]
    pub stats: StatBlock<u8>,
    #[serde(default)]
    pub voice: u32,

    #[serde(default)]
    pub presets: Vec<CostumePreset>,
}

/// A save file's export: the account identity and its characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveExport {
    /// 64-bit account identifier of the save's owner.
    #[serde(default)]
    pub account_id: u64,
    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
}

/// Name shown for a preset whose top item has no localized name.
pub fn fallback_costume_name(preset_index: usize) -> String {
    if preset_index == 0 {
        "Current Clothing".to_string()
    } else {
        format!("Preset {}", preset_index)
    }
}

/// English label of a preset: its top item's costume name, or the fallback.
pub fn preset_label<G: GameData + ?Sized>(game: &G, preset: &CostumePreset, index: usize) -> String {
    named_top(game, preset).unwrap_or_else(|| fallback_costume_name(index))
}

/// English labels of all of a record's presets, in record order.
pub fn preset_labels<G: GameData + ?Sized>(game: &G, record: &CharacterRecord) -> Vec<String> {
    record
        .presets
        .iter()
        .enumerate()
        .map(|(i, preset)| preset_label(game, preset, i))
        .collect()
}

/// Presets selected when the caller does not choose: those wearing a named top.
pub fn default_selection<G: GameData + ?Sized>(game: &G, record: &CharacterRecord) -> Vec<usize> {
    record
        .presets
        .iter()
        .enumerate()
        .filter(|(_, preset)| named_top(game, preset).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn named_top<G: GameData + ?Sized>(game: &G, preset: &CostumePreset) -> Option<String> {
    if preset.top >= ITEM_NONE {
        return None;
    }
    game.costume_name(preset.top, Language::En)
        .filter(|name| !name.is_empty())
}
