//! Per-costume package records.
//!
//! Every selected costume contributes exactly one record of each kind,
//! tagged with its costume index (position in the selection).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Language;

/// Voice id used when the character-select screen's generic lines replace
/// the costume's own.
pub const DUMMY_VOICE_ID: u32 = 0xFFFF_FFFF;

/// Audio file name routing a slot to the staged character-select lines.
pub const DUMMY_VOICE_FILE: &str = "VOICE";

/// Skill id marking an empty skill slot.
pub const SKILL_UNSET: u16 = 0xFFFF;

/// Character-select slot of one costume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotEntry {
    pub costume_index: u32,
    /// Costume name per language. Languages without a name are absent.
    pub costume_names: BTreeMap<Language, String>,
    /// Forced voice routing, when set.
    pub voice: Option<SlotVoice>,
}

/// Voice routing override of a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotVoice {
    pub ids: [u32; 2],
    pub audio_files: [String; 2],
}

impl SlotVoice {
    /// Routing to the character-select lines staged with the package.
    pub fn dummy() -> Self {
        Self {
            ids: [DUMMY_VOICE_ID; 2],
            audio_files: [DUMMY_VOICE_FILE.to_string(), DUMMY_VOICE_FILE.to_string()],
        }
    }
}

/// Audio routing of one costume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioEntry {
    #[serde(default)]
    pub costume_index: u32,
    /// Sound-effect bank.
    pub se: String,
    /// Voice bank.
    pub vox: String,
    /// Animation-event reference.
    pub amk: String,
    /// Skill audio bank.
    pub skills: String,
}

/// Skill assignment of one costume.
///
/// Slot layout: four supers, two ultimates, evasive, blast, awaken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillSet {
    pub costume_index: u32,
    pub skills: [u16; 9],
}

impl SkillSet {
    pub const SUPER: std::ops::Range<usize> = 0..4;
    pub const ULTIMATE: std::ops::Range<usize> = 4..6;
    pub const EVASIVE: usize = 6;
    pub const BLAST: usize = 7;
    pub const AWAKEN: usize = 8;

    /// Create a set with every slot unset.
    pub fn new(costume_index: u32) -> Self {
        Self {
            costume_index,
            skills: [SKILL_UNSET; 9],
        }
    }

    /// Get the blast skill.
    pub fn blast(&self) -> u16 {
        self.skills[Self::BLAST]
    }

    /// Get the awaken skill.
    pub fn awaken(&self) -> u16 {
        self.skills[Self::AWAKEN]
    }
}

/// Six character attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock<T> {
    pub health: T,
    pub ki: T,
    pub stamina: T,
    pub basic_attack: T,
    pub strike: T,
    pub blast: T,
}

/// Physical stats of one costume.
#[derive(Debug, Clone, PartialEq)]
pub struct StatEntry {
    pub costume_index: u32,
    pub body_shape: u8,
    pub talisman: u32,
    /// Race baseline values.
    pub base: StatBlock<f32>,
    /// Attribute points spent by the player.
    pub points: StatBlock<u8>,
}

/// Aura linked to one costume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraLink {
    #[serde(default)]
    pub costume_index: u32,
    pub aura_id: u32,
    #[serde(default)]
    pub glare: bool,
}

/// Movement clip set linked to one costume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipLink {
    #[serde(default)]
    pub costume_index: u32,
    pub clip_set: u32,
    #[serde(default)]
    pub body_shape: u8,
}

/// Link from the third transformation stage's skeleton to its animations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThirdStageLink {
    pub partset: u16,
    pub skeleton: String,
    pub animation: String,
}
