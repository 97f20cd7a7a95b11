//! Package finalization.
//!
//! The assembler owns the output part-set table and the resource registry
//! while costumes are built, then runs the finishing steps that turn them
//! into package contents. Nothing reaches the disk before [`PackageAssembler::persist`].

use std::path::Path;

use cacpack_bcs::{rebase_file_name, BcsFile, PartSet};
use cacpack_x2m::{ModPackage, SkeletonPair, ThirdStageLink, SKELETON_PATH};
use tracing::debug;

use crate::game::{GameData, RaceTemplate};
use crate::resources::{normalize_path, ResourceFileCollector};
use crate::transform::{is_default_chain, TransformationRequest, THIRD_STAGE_PARTSET};
use crate::{ConvertError, EntryCode, Race, Result};

/// Archive path of the character-select portrait.
pub const PORTRAIT_PATH: &str = "UI/SEL.DDS";

/// Archive directory of staged character-select voice lines.
pub const CSS_AUDIO_DIR: &str = "audio";

pub struct PackageAssembler<'a, G: GameData + ?Sized> {
    game: &'a G,
    race: Race,
    template: &'a RaceTemplate,
    code: EntryCode,
    bcs: BcsFile,
    files: ResourceFileCollector,
    skeleton: Option<SkeletonPair>,
}

impl<'a, G: GameData + ?Sized> PackageAssembler<'a, G> {
    pub fn new(game: &'a G, race: Race, template: &'a RaceTemplate, code: EntryCode) -> Self {
        Self {
            game,
            race,
            template,
            code,
            bcs: BcsFile::with_tables_of(&template.bcs),
            files: ResourceFileCollector::new(),
            skeleton: None,
        }
    }

    /// Output table; shares the template's color groups.
    pub fn bcs(&self) -> &BcsFile {
        &self.bcs
    }

    pub fn files(&self) -> &ResourceFileCollector {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut ResourceFileCollector {
        &mut self.files
    }

    /// Store a costume's part set at its costume index.
    pub fn add_costume(&mut self, costume_index: u32, set: PartSet) -> Result<()> {
        self.bcs.insert_part_set(costume_id(costume_index)?, set);
        Ok(())
    }

    fn read_template_asset(&self, path: &str, what: &str) -> Result<Vec<u8>> {
        if path.is_empty() {
            return Err(ConvertError::template(self.race.code(), what));
        }
        self.game.read_asset(path)
    }

    /// Resolve the shared skeleton pair and the body shape it is scaled by.
    pub fn finalize_body(&mut self, body_shape: u8) -> Result<()> {
        if !self.bcs.bodies().is_empty() {
            self.bcs.retain_body(body_shape)?;
        } else if body_shape != 0 {
            return Err(ConvertError::mapping(format!(
                "body shape {} not in the {} template",
                body_shape, self.race
            )));
        }

        let esk = self.read_template_asset(&self.template.skeleton, "skeleton")?;
        let cam_ean = self.read_template_asset(&self.template.camera, "camera animation")?;
        self.skeleton = Some(SkeletonPair { esk, cam_ean });
        Ok(())
    }

    /// Template stage set moved to the package, its files registered.
    fn package_stage(&mut self, id: u16) -> Result<PartSet> {
        let mut stage = self.template.bcs.part_set(id)?.clone();
        for part in stage.parts() {
            for file in &part.files {
                self.files
                    .register(&format!("{}/{}", self.template.base_dir, file));
            }
        }
        stage.rebase(self.race.code(), self.code.as_str());
        Ok(stage)
    }

    /// Overlay a stage on a costume and store it under the stage's id.
    ///
    /// The id must still be free.
    fn copy_stage(&mut self, costume_index: u32, id: u16) -> Result<()> {
        if self.bcs.contains_part_set(id) {
            return Err(ConvertError::mapping(format!(
                "transformation stage {} collides with an existing part set",
                id
            )));
        }
        let stage = self.package_stage(id)?;
        let mut set = self.bcs.part_set(costume_id(costume_index)?)?.clone();
        set.overlay(&stage);
        self.bcs.insert_part_set(id, set);
        Ok(())
    }

    /// Copy the default transformation chain on top of the first costume.
    pub fn copy_default_chain(&mut self) -> Result<usize> {
        let ids: Vec<u16> = self
            .template
            .bcs
            .part_sets()
            .map(|(id, _)| id)
            .filter(|&id| is_default_chain(id))
            .collect();

        if ids.is_empty() {
            return Err(ConvertError::template(
                self.race.code(),
                "default transformation chain part sets",
            ));
        }

        for &id in &ids {
            self.copy_stage(0, id)?;
        }
        Ok(ids.len())
    }

    /// Copy queued extra stages on top of their originating costumes.
    pub fn copy_extra_transforms(&mut self, requests: &[TransformationRequest]) -> Result<()> {
        for request in requests {
            self.copy_stage(request.preset_index, request.target())?;
        }
        Ok(())
    }

    /// Archive path a registered asset is stored under.
    fn archive_path(&self, asset: &str) -> String {
        let base = normalize_path(&self.template.base_dir);
        match asset.strip_prefix(&base).and_then(|rest| rest.strip_prefix('/')) {
            Some(rel) if !base.is_empty() => format!(
                "chara/{}/{}",
                self.code,
                rebase_file_name(rel, self.race.code(), self.code.as_str())
            ),
            _ => asset.to_string(),
        }
    }

    /// Stage every registered file into the package.
    pub fn flush_resources(&self, package: &mut ModPackage) -> Result<usize> {
        for asset in self.files.iter() {
            let data = self.game.read_asset(asset)?;
            let path = self.archive_path(asset);
            debug!("Staging {} as {}", asset, path);
            package.add_file(path, data)?;
        }
        Ok(self.files.len())
    }

    /// Move the part-set table and skeleton pair into the package.
    pub fn write_custom_resources(&mut self, package: &mut ModPackage) -> Result<()> {
        let skeleton = self
            .skeleton
            .take()
            .ok_or_else(|| ConvertError::template(self.race.code(), "skeleton"))?;
        package.set_skeleton(skeleton);
        package.set_bcs(std::mem::take(&mut self.bcs));
        Ok(())
    }

    pub fn write_portrait(&self, package: &mut ModPackage) -> Result<()> {
        let data = self.read_template_asset(&self.template.portrait, "character-select portrait")?;
        package.add_file(PORTRAIT_PATH, data)?;
        Ok(())
    }

    /// Link the third default-chain stage to its animation set.
    pub fn fixup_third_stage(&self, package: &mut ModPackage) -> Result<()> {
        let animation = self
            .template
            .third_stage_animation
            .clone()
            .ok_or_else(|| ConvertError::template(self.race.code(), "third-stage animation"))?;

        package.set_third_stage(ThirdStageLink {
            partset: THIRD_STAGE_PARTSET,
            skeleton: SKELETON_PATH.to_string(),
            animation,
        });
        Ok(())
    }

    /// Stage the character-select voice lines of a voice.
    pub fn write_css_voice(&self, package: &mut ModPackage, voice: u32) -> Result<usize> {
        let bank = self
            .template
            .voices
            .get(&voice)
            .ok_or_else(|| ConvertError::mapping(format!("voice {} not in the race audio layout", voice)))?;

        if bank.css_tracks.is_empty() {
            return Err(ConvertError::template(
                self.race.code(),
                format!("character-select lines of voice {}", voice),
            ));
        }

        for track in &bank.css_tracks {
            let normalized = normalize_path(track);
            let name = normalized.rsplit('/').next().unwrap_or(normalized.as_str());
            let data = self.game.read_asset(track)?;
            package.add_file(format!("{}/{}", CSS_AUDIO_DIR, name), data)?;
        }
        Ok(bank.css_tracks.len())
    }

    /// Write the finished package to `dest`.
    pub fn persist(&self, package: &ModPackage, dest: &Path) -> Result<()> {
        package.save(dest)?;
        debug!("Persisted {} as {}", self.code, dest.display());
        Ok(())
    }
}

fn costume_id(costume_index: u32) -> Result<u16> {
    u16::try_from(costume_index)
        .map_err(|_| ConvertError::mapping(format!("costume index {} out of range", costume_index)))
}

#[cfg(test)]
mod tests {
    use cacpack_bcs::{Body, Part, PartKind};

    use super::*;
    use crate::game::MemoryGameData;

    fn template() -> RaceTemplate {
        let mut bcs = BcsFile::new();
        bcs.add_body(Body::default());
        bcs.add_body(Body::default());

        let mut ssj = PartSet::new();
        ssj.insert(Part::new(PartKind::Hair, "HUM", 100).with_file("HUM_100_Hair.emd"));
        bcs.insert_part_set(100, ssj);

        let mut giant = PartSet::new();
        giant.insert(Part::new(PartKind::Bust, "HUM", 350).with_file("HUM_350_Bust.emd"));
        bcs.insert_part_set(350, giant);

        RaceTemplate {
            base_dir: "chara/HUM".into(),
            bcs,
            skeleton: "chara/HUM/HUM_000.esk".into(),
            camera: "chara/HUM/HUM.cam.ean".into(),
            portrait: "ui/HUM_000.dds".into(),
            third_stage_animation: Some("HUM_SSJ3".into()),
            ..RaceTemplate::default()
        }
    }

    fn game() -> MemoryGameData {
        let mut game = MemoryGameData::default();
        for path in [
            "chara/HUM/HUM_000.esk",
            "chara/HUM/HUM.cam.ean",
            "ui/HUM_000.dds",
            "chara/HUM/HUM_100_Hair.emd",
            "chara/HUM/HUM_350_Bust.emd",
            "chara/HUM/HUM_000_Hair.emd",
        ] {
            game.set_asset(path, path.as_bytes().to_vec());
        }
        game
    }

    fn costume() -> PartSet {
        let mut set = PartSet::new();
        set.insert(Part::new(PartKind::Hair, "XYZ", 0).with_file("XYZ_000_Hair.emd"));
        set.insert(Part::new(PartKind::Bust, "XYZ", 0).with_file("XYZ_000_Bust.emd"));
        set
    }

    fn assembler<'a>(game: &'a MemoryGameData, template: &'a RaceTemplate) -> PackageAssembler<'a, MemoryGameData> {
        let mut assembler =
            PackageAssembler::new(game, Race::Hum, template, EntryCode::parse("XYZ").unwrap());
        assembler.add_costume(0, costume()).unwrap();
        assembler
    }

    #[test]
    fn test_finalize_body() {
        let (game, template) = (game(), template());
        let mut asm = assembler(&game, &template);
        asm.finalize_body(1).unwrap();
        assert_eq!(asm.bcs().bodies().len(), 1);

        let mut asm = assembler(&game, &template);
        assert!(matches!(asm.finalize_body(4), Err(ConvertError::MappingFailure(_))));
    }

    #[test]
    fn test_default_chain_overlays_first_costume() {
        let (game, template) = (game(), template());
        let mut asm = assembler(&game, &template);
        assert_eq!(asm.copy_default_chain().unwrap(), 1);

        let stage = asm.bcs().part_set(100).unwrap();
        let hair = stage.get(PartKind::Hair).unwrap();
        assert_eq!(hair.owner, "XYZ");
        assert_eq!(hair.files, vec!["XYZ_100_Hair.emd"]);
        assert_eq!(stage.get(PartKind::Bust).unwrap().files, vec!["XYZ_000_Bust.emd"]);
        assert!(asm.files().contains("chara/HUM/HUM_100_Hair.emd"));
    }

    #[test]
    fn test_default_chain_missing() {
        let game = game();
        let template = RaceTemplate::default();
        let mut asm = assembler(&game, &template);
        assert!(matches!(
            asm.copy_default_chain(),
            Err(ConvertError::TemplateMissing { .. })
        ));
    }

    #[test]
    fn test_default_chain_refuses_occupied_id() {
        let (game, template) = (game(), template());
        let mut asm = assembler(&game, &template);
        asm.add_costume(100, costume()).unwrap();

        assert!(matches!(
            asm.copy_default_chain(),
            Err(ConvertError::MappingFailure(_))
        ));
        let kept = asm.bcs().part_set(100).unwrap();
        assert_eq!(kept.get(PartKind::Hair).unwrap().files, vec!["XYZ_000_Hair.emd"]);
    }

    #[test]
    fn test_extra_transform_collision() {
        let (game, template) = (game(), template());
        let mut asm = assembler(&game, &template);
        let request = TransformationRequest {
            base_partset: 350,
            stage: 0,
            preset_index: 0,
        };
        asm.copy_extra_transforms(&[request]).unwrap();
        assert!(asm.bcs().contains_part_set(350));

        assert!(matches!(
            asm.copy_extra_transforms(&[request]),
            Err(ConvertError::MappingFailure(_))
        ));
    }

    #[test]
    fn test_flush_and_finish() {
        let (game, template) = (game(), template());
        let mut asm = assembler(&game, &template);
        asm.files_mut().register("chara/HUM/HUM_000_Hair.emd");
        asm.finalize_body(0).unwrap();
        asm.copy_default_chain().unwrap();

        let mut package = ModPackage::default();
        assert_eq!(asm.flush_resources(&mut package).unwrap(), 2);
        asm.write_custom_resources(&mut package).unwrap();
        asm.write_portrait(&mut package).unwrap();
        asm.fixup_third_stage(&mut package).unwrap();

        assert!(package.file("chara/XYZ/XYZ_000_Hair.emd").is_some());
        assert!(package.file("chara/XYZ/XYZ_100_Hair.emd").is_some());
        assert_eq!(package.file(PORTRAIT_PATH), Some(&b"ui/HUM_000.dds"[..]));
        assert_eq!(package.bcs().part_set_count(), 2);
        assert_eq!(package.skeleton().map(|s| s.esk.clone()), Some(b"chara/HUM/HUM_000.esk".to_vec()));
        assert_eq!(package.third_stage().map(|t| t.partset), Some(THIRD_STAGE_PARTSET));
    }

    #[test]
    fn test_css_voice_without_tracks() {
        let (game, template) = (game(), template());
        let asm = assembler(&game, &template);
        let mut package = ModPackage::default();
        assert!(matches!(
            asm.write_css_voice(&mut package, 0),
            Err(ConvertError::MappingFailure(_))
        ));
    }
}
