//! Game data collaborators.
//!
//! The converter never reads game archives itself. Templates, lookup tables
//! and raw asset bytes come through [`GameData`], implemented in memory by
//! [`MemoryGameData`] and over an extracted data directory by
//! [`crate::DirGameData`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use cacpack_bcs::{BcsFile, PartKind};
use cacpack_x2m::{AudioEntry, AuraLink, ClipLink, Language, StatBlock};

use crate::{ConvertError, Race, Result};

/// Equipment categories and the part they fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Bust,
    Pants,
    Rist,
    Boots,
    Accessory,
}

impl ItemCategory {
    /// All categories in part order.
    pub const ALL: [ItemCategory; 5] = [
        ItemCategory::Bust,
        ItemCategory::Pants,
        ItemCategory::Rist,
        ItemCategory::Boots,
        ItemCategory::Accessory,
    ];

    /// The part kind items of this category fill.
    pub const fn part_kind(&self) -> PartKind {
        match self {
            ItemCategory::Bust => PartKind::Bust,
            ItemCategory::Pants => PartKind::Pants,
            ItemCategory::Rist => PartKind::Rist,
            ItemCategory::Boots => PartKind::Boots,
            ItemCategory::Accessory => PartKind::Accessory,
        }
    }
}

/// Transformation data of an awaken skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwakenSkill {
    /// First part set of the transformation, or [`crate::PARTSET_NONE`].
    pub partset: u16,
    /// Number of stages, or [`crate::SINGLE_STAGE`].
    pub num_transforms: u32,
}

/// Audio layout of one voice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceBank {
    /// Bank names routed for every costume using this voice.
    pub audio: AudioEntry,
    /// Audio files the banks load.
    #[serde(default)]
    pub files: Vec<String>,
    /// Character-select screen lines.
    #[serde(default)]
    pub css_tracks: Vec<String>,
}

/// Base resources of one race.
///
/// Paths are asset paths resolved through [`GameData::read_asset`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceTemplate {
    /// Directory holding the race's character files.
    pub base_dir: String,
    /// Base part-set file.
    pub bcs: BcsFile,
    /// Base skeleton.
    pub skeleton: String,
    /// Base camera animation.
    pub camera: String,
    /// Default character-select portrait.
    pub portrait: String,
    /// Skills the race's base skill table already contains.
    #[serde(default)]
    pub baseline_skills: BTreeSet<u16>,
    /// Audio layout by voice id.
    #[serde(default)]
    pub voices: BTreeMap<u32, VoiceBank>,
    /// Baseline stat values.
    #[serde(default)]
    pub stats: Option<StatBlock<f32>>,
    /// Default aura.
    #[serde(default)]
    pub aura: Option<AuraLink>,
    /// Default movement clip set.
    #[serde(default)]
    pub clip: Option<ClipLink>,
    /// Animation set of the third default-chain stage.
    #[serde(default)]
    pub third_stage_animation: Option<String>,
}

/// Source of templates, lookup tables and asset bytes.
pub trait GameData {
    /// Base resources of a race.
    fn race_template(&self, race: Race) -> Result<RaceTemplate>;

    /// Part set an equipment item maps to.
    fn item_part_set(&self, category: ItemCategory, item: u32) -> Option<u16>;

    /// Blast skill a talisman grants.
    fn talisman_blast(&self, talisman: u32) -> Option<u16>;

    /// Transformation data of an awaken skill.
    fn awaken_skill(&self, id: u16) -> Option<AwakenSkill>;

    /// Localized name of a top item's costume.
    fn costume_name(&self, top: u32, lang: Language) -> Option<String>;

    /// Whether a character code is taken by the game or an installed mod.
    fn is_reserved_code(&self, code: &str) -> bool;

    /// Raw bytes of an asset.
    fn read_asset(&self, path: &str) -> Result<Vec<u8>>;
}

/// In-memory game data.
#[derive(Debug, Clone, Default)]
pub struct MemoryGameData {
    pub templates: BTreeMap<Race, RaceTemplate>,
    pub items: BTreeMap<(ItemCategory, u32), u16>,
    pub talismans: BTreeMap<u32, u16>,
    pub awaken_skills: BTreeMap<u16, AwakenSkill>,
    pub costume_names: BTreeMap<(u32, Language), String>,
    pub reserved_codes: BTreeSet<String>,
    pub assets: BTreeMap<String, Vec<u8>>,
}

impl MemoryGameData {
    pub fn set_template(&mut self, race: Race, template: RaceTemplate) {
        self.templates.insert(race, template);
    }

    pub fn set_item(&mut self, category: ItemCategory, item: u32, part_set: u16) {
        self.items.insert((category, item), part_set);
    }

    pub fn set_talisman(&mut self, talisman: u32, blast: u16) {
        self.talismans.insert(talisman, blast);
    }

    pub fn set_awaken_skill(&mut self, id: u16, skill: AwakenSkill) {
        self.awaken_skills.insert(id, skill);
    }

    pub fn set_costume_name(&mut self, top: u32, lang: Language, name: impl Into<String>) {
        self.costume_names.insert((top, lang), name.into());
    }

    pub fn reserve_code(&mut self, code: impl Into<String>) {
        self.reserved_codes.insert(code.into());
    }

    pub fn set_asset(&mut self, path: impl Into<String>, data: Vec<u8>) {
        self.assets.insert(path.into(), data);
    }
}

impl GameData for MemoryGameData {
    fn race_template(&self, race: Race) -> Result<RaceTemplate> {
        self.templates
            .get(&race)
            .cloned()
            .ok_or_else(|| ConvertError::template(race.code(), "race template"))
    }

    fn item_part_set(&self, category: ItemCategory, item: u32) -> Option<u16> {
        self.items.get(&(category, item)).copied()
    }

    fn talisman_blast(&self, talisman: u32) -> Option<u16> {
        self.talismans.get(&talisman).copied()
    }

    fn awaken_skill(&self, id: u16) -> Option<AwakenSkill> {
        self.awaken_skills.get(&id).copied()
    }

    fn costume_name(&self, top: u32, lang: Language) -> Option<String> {
        self.costume_names.get(&(top, lang)).cloned()
    }

    fn is_reserved_code(&self, code: &str) -> bool {
        self.reserved_codes.contains(code)
    }

    fn read_asset(&self, path: &str) -> Result<Vec<u8>> {
        self.assets
            .get(path)
            .cloned()
            .ok_or_else(|| ConvertError::IoFailure(format!("asset not found: {}", path)))
    }
}
