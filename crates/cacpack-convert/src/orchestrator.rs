//! Conversion orchestration.
//!
//! One pass, no retries. Every step runs in order and the first failure
//! ends the conversion; the package only reaches the disk once every prior
//! step has succeeded.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use cacpack_x2m::{Language, ModPackage, PackageInfo};
use tracing::{debug, info, warn};

use crate::assembler::PackageAssembler;
use crate::game::GameData;
use crate::guid::GuidMode;
use crate::record::{CharacterRecord, NUM_PRESETS};
use crate::transform::TransformationCollector;
use crate::{costume, entries, skills, ConvertError, EntryCode, Race, Result};

/// Author recorded in every package.
pub const AUTHOR: &str = concat!("cacpack v", env!("CARGO_PKG_VERSION"));

/// Caller choices for one conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Three-character code the character installs under.
    pub entry_code: String,
    pub guid_mode: GuidMode,
    /// Use the character-select screen's generic voice lines.
    pub css_voice: bool,
    /// Record positions of the selected presets. They are packaged in
    /// record order whatever order they are listed in.
    pub presets: Vec<usize>,
}

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    ValidateOptions,
    ResolveRace,
    InitTemplate,
    BuildPartSet,
    ApplyColors,
    BuildAudioEntry,
    BuildSlotEntry,
    BuildSkillSet,
    BuildTransformRequest,
    BuildStatEntry,
    BuildAuraEntry,
    BuildClipEntry,
    FinalizeBody,
    CopyDefaultTransformChain,
    CopyExtraTransforms,
    FlushResources,
    WriteCustomResources,
    WritePortraitLinkage,
    FixupThirdStage,
    WriteVoiceLines,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Run one step, logging it and any failure.
fn step<T>(stage: Stage, f: impl FnOnce() -> Result<T>) -> Result<T> {
    debug!(%stage, "step");
    f().inspect_err(|e| warn!(%stage, "conversion failed: {}", e))
}

/// Converts character records using one game data source.
pub struct Converter<'g, G: GameData + ?Sized> {
    game: &'g G,
}

impl<'g, G: GameData + ?Sized> Converter<'g, G> {
    pub fn new(game: &'g G) -> Self {
        Self { game }
    }

    /// Check the entry code and preset selection against a record.
    pub fn validate(&self, record: &CharacterRecord, options: &ConvertOptions) -> Result<EntryCode> {
        let code = EntryCode::parse_free(&options.entry_code, self.game)?;

        if options.presets.is_empty() {
            return Err(ConvertError::NoPresetsSelected);
        }
        if record.presets.len() > NUM_PRESETS {
            return Err(ConvertError::mapping(format!(
                "record holds {} presets (at most {})",
                record.presets.len(),
                NUM_PRESETS
            )));
        }

        let mut seen = BTreeSet::new();
        for &index in &options.presets {
            if index >= record.presets.len() {
                return Err(ConvertError::mapping(format!(
                    "preset {} out of range ({} presets)",
                    index,
                    record.presets.len()
                )));
            }
            if !seen.insert(index) {
                return Err(ConvertError::mapping(format!("preset {} selected twice", index)));
            }
        }

        Ok(code)
    }

    /// Build the complete package in memory.
    pub fn assemble(&self, record: &CharacterRecord, options: &ConvertOptions) -> Result<ModPackage> {
        self.run(record, options, None)
    }

    /// Build the package and write it to `dest`.
    ///
    /// Returns the written package. On failure nothing is written.
    pub fn convert(
        &self,
        record: &CharacterRecord,
        options: &ConvertOptions,
        dest: impl AsRef<Path>,
    ) -> Result<ModPackage> {
        self.run(record, options, Some(dest.as_ref()))
    }

    fn run(
        &self,
        record: &CharacterRecord,
        options: &ConvertOptions,
        dest: Option<&Path>,
    ) -> Result<ModPackage> {
        let game = self.game;

        let code = step(Stage::ValidateOptions, || self.validate(record, options))?;
        let mut selection = options.presets.clone();
        selection.sort_unstable();

        let race = step(Stage::ResolveRace, || Race::resolve(record.race))?;
        let template = step(Stage::InitTemplate, || game.race_template(race))?;

        info!(
            "Converting {} ({}) as {} with {} costume(s)",
            record.name,
            race,
            code,
            selection.len()
        );

        let mut package = ModPackage::new(PackageInfo {
            name: record.name.clone(),
            author: AUTHOR.to_string(),
            version: 1.0,
            entry_name: code.to_string(),
            guid: options.guid_mode.assign(&record.name, race),
            chara_names: BTreeMap::from([(Language::En, record.name.clone())]),
            body_shape: record.body_shape,
            can_use_any_dual_skill: true,
        });
        let mut assembler = PackageAssembler::new(game, race, &template, code);
        let mut transforms = TransformationCollector::new();

        for (position, &preset_index) in selection.iter().enumerate() {
            let preset = &record.presets[preset_index];
            let costume_index = position as u32;
            debug!(preset_index, costume_index, "Building costume");

            let mut set = step(Stage::BuildPartSet, || {
                costume::build_part_set(
                    game,
                    race,
                    &template,
                    &code,
                    record,
                    preset,
                    assembler.files_mut(),
                )
            })?;
            step(Stage::ApplyColors, || {
                costume::apply_colors(assembler.bcs(), &mut set, record, preset)
            })?;
            assembler.add_costume(costume_index, set)?;

            let audio = step(Stage::BuildAudioEntry, || {
                entries::build_audio_entry(&template, record.voice, costume_index, assembler.files_mut())
            })?;
            package.add_audio_entry(audio);

            let slot = step(Stage::BuildSlotEntry, || {
                Ok(entries::build_slot_entry(
                    game,
                    preset,
                    preset_index,
                    costume_index,
                    options.css_voice,
                ))
            })?;
            package.add_slot(slot);

            let skill_set = step(Stage::BuildSkillSet, || {
                Ok(skills::resolve_skill_set(game, preset, costume_index))
            })?;
            for id in skills::custom_skills(&template, &skill_set) {
                if package.add_custom_skill(id) {
                    debug!("Custom skill {}", id);
                }
            }
            package.add_skill_set(skill_set);

            step(Stage::BuildTransformRequest, || {
                transforms.collect(game, preset, costume_index)
            })?;

            let stats = step(Stage::BuildStatEntry, || {
                entries::build_stat_entry(race, &template, record, preset, costume_index)
            })?;
            package.add_stat_entry(stats);

            let aura = step(Stage::BuildAuraEntry, || {
                entries::build_aura_link(race, &template, costume_index)
            })?;
            package.add_aura_link(aura);

            let clip = step(Stage::BuildClipEntry, || {
                entries::build_clip_link(race, &template, record.body_shape, costume_index)
            })?;
            package.add_clip_link(clip);
        }

        step(Stage::FinalizeBody, || assembler.finalize_body(record.body_shape))?;

        if race.has_default_transform_chain() {
            step(Stage::CopyDefaultTransformChain, || assembler.copy_default_chain())?;
        }
        if !transforms.is_empty() {
            step(Stage::CopyExtraTransforms, || {
                assembler.copy_extra_transforms(transforms.requests())
            })?;
        }

        step(Stage::FlushResources, || assembler.flush_resources(&mut package))?;
        step(Stage::WriteCustomResources, || {
            assembler.write_custom_resources(&mut package)
        })?;
        step(Stage::WritePortraitLinkage, || assembler.write_portrait(&mut package))?;

        if race.has_default_transform_chain() {
            step(Stage::FixupThirdStage, || assembler.fixup_third_stage(&mut package))?;
        }
        if options.css_voice {
            step(Stage::WriteVoiceLines, || {
                assembler.write_css_voice(&mut package, record.voice)
            })?;
        }

        if let Some(dest) = dest {
            step(Stage::Persist, || assembler.persist(&package, dest))?;
        }

        info!(
            "Package {}: {} part set(s), {} skill set(s), {} custom skill(s), {} file(s)",
            code,
            package.bcs().part_set_count(),
            package.skill_sets().len(),
            package.custom_skills().len(),
            package.file_count()
        );

        Ok(package)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MemoryGameData;
    use crate::record::CostumePreset;

    fn record(presets: usize) -> CharacterRecord {
        let mut record: CharacterRecord =
            serde_json::from_str(r#"{"name":"ABC","race":1}"#).unwrap();
        record.presets = vec![CostumePreset::default(); presets];
        record
    }

    fn options(code: &str, presets: Vec<usize>) -> ConvertOptions {
        ConvertOptions {
            entry_code: code.into(),
            presets,
            ..ConvertOptions::default()
        }
    }

    #[test]
    fn test_validate() {
        let game = MemoryGameData::default();
        let converter = Converter::new(&game);
        let record = record(3);

        assert!(converter.validate(&record, &options("XYZ", vec![2, 0])).is_ok());
        assert!(matches!(
            converter.validate(&record, &options("XY", vec![0])),
            Err(ConvertError::InvalidEntryCode { .. })
        ));
        assert!(matches!(
            converter.validate(&record, &options("XYZ", vec![])),
            Err(ConvertError::NoPresetsSelected)
        ));
        assert!(matches!(
            converter.validate(&record, &options("XYZ", vec![3])),
            Err(ConvertError::MappingFailure(_))
        ));
        assert!(matches!(
            converter.validate(&record, &options("XYZ", vec![1, 1])),
            Err(ConvertError::MappingFailure(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_record() {
        let game = MemoryGameData::default();
        let converter = Converter::new(&game);

        assert!(converter
            .validate(&record(NUM_PRESETS), &options("XYZ", vec![0, NUM_PRESETS - 1]))
            .is_ok());

        let oversized = record(NUM_PRESETS + 1);
        let all: Vec<usize> = (0..oversized.presets.len()).collect();
        assert!(matches!(
            converter.validate(&oversized, &options("XYZ", all)),
            Err(ConvertError::MappingFailure(_))
        ));
        assert!(matches!(
            converter.validate(&oversized, &options("XYZ", vec![0])),
            Err(ConvertError::MappingFailure(_))
        ));
    }

    #[test]
    fn test_unsupported_race_stops_before_template() {
        let game = MemoryGameData::default();
        let mut record = record(1);
        record.race = 9;
        assert!(matches!(
            Converter::new(&game).assemble(&record, &options("XYZ", vec![0])),
            Err(ConvertError::UnsupportedRace(9))
        ));
    }

    #[test]
    fn test_missing_template() {
        let game = MemoryGameData::default();
        assert!(matches!(
            Converter::new(&game).assemble(&record(1), &options("XYZ", vec![0])),
            Err(ConvertError::TemplateMissing { race: "HUF", .. })
        ));
    }

    #[test]
    fn test_author() {
        assert!(AUTHOR.starts_with("cacpack v"));
    }
}
