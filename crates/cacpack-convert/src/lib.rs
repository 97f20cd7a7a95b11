//! Create-a-Character to X2M conversion pipeline.
//!
//! Converts a saved character record and a selection of its costume presets
//! into a new-character mod package.
//!
//! # Pipeline
//!
//! ```text
//! ValidateOptions -> ResolveRace -> InitTemplate
//!   -> per preset: part set, colors, audio, slot, skills, transforms, stats, aura, clip
//!   -> FinalizeBody -> default chain / extra transforms -> flush files
//!   -> part-set table, portrait, third-stage fix-up, voice lines -> Persist
//! ```
//!
//! Game resources come through the [`GameData`] trait: [`MemoryGameData`]
//! for tests and embedding, [`DirGameData`] for an extracted data directory.
//!
//! # Example
//!
//! ```no_run
//! use cacpack_convert::{ConvertOptions, Converter, DirGameData, GuidMode, SaveExport};
//!
//! let game = DirGameData::open("gamedata")?;
//! let save: SaveExport = serde_json::from_str(&std::fs::read_to_string("save.json")?)?;
//! let record = &save.characters[0];
//!
//! let options = ConvertOptions {
//!     entry_code: "XYZ".into(),
//!     guid_mode: GuidMode::NameRaceAccount(save.account_id),
//!     css_voice: false,
//!     presets: cacpack_convert::default_selection(&game, record),
//! };
//! Converter::new(&game).convert(record, &options, "XYZ.x2m")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod assembler;
mod code;
mod costume;
mod dir;
mod entries;
mod error;
mod game;
mod guid;
mod orchestrator;
mod race;
mod record;
mod resources;
mod skills;
mod transform;

pub use assembler::{PackageAssembler, CSS_AUDIO_DIR, PORTRAIT_PATH};
pub use code::EntryCode;
pub use costume::{apply_colors, build_part_set};
pub use dir::{DirGameData, DATABASE_FILE, TEMPLATES_DIR};
pub use entries::{
    build_audio_entry, build_aura_link, build_clip_link, build_slot_entry, build_stat_entry,
};
pub use error::{ConvertError, Result};
pub use game::{AwakenSkill, GameData, ItemCategory, MemoryGameData, RaceTemplate, VoiceBank};
pub use guid::GuidMode;
pub use orchestrator::{ConvertOptions, Converter, AUTHOR};
pub use race::Race;
pub use record::{
    default_selection, fallback_costume_name, preset_label, preset_labels, CharacterRecord,
    CostumePreset, SaveExport, COLOR_UNSET, ITEM_NONE, NUM_PRESETS, TALISMAN_NONE,
};
pub use resources::{normalize_path, ResourceFileCollector};
pub use skills::{custom_skills, resolve_skill_set, AWAKEN_UNSET, DEFAULT_BLAST_SKILL};
pub use transform::{
    is_default_chain, TransformationCollector, TransformationRequest, DEFAULT_CHAIN_RANGES,
    PARTSET_NONE, SINGLE_STAGE, THIRD_STAGE_PARTSET,
};
