//! The in-memory mod package.

use std::collections::{BTreeMap, BTreeSet};

use cacpack_bcs::BcsFile;
use cacpack_common::ModGuid;

use crate::{
    AudioEntry, AuraLink, ClipLink, Error, Language, Result, SkillSet, SlotEntry, StatEntry,
    ThirdStageLink,
};

/// Package metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageInfo {
    pub name: String,
    pub author: String,
    pub version: f32,
    /// Three-character code the character is installed under.
    pub entry_name: String,
    /// Identity letting the engine recognize re-exports. `None` lets the
    /// engine assign one on install.
    pub guid: Option<ModGuid>,
    pub chara_names: BTreeMap<Language, String>,
    pub body_shape: u8,
    pub can_use_any_dual_skill: bool,
}

impl Default for PackageInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            author: String::new(),
            version: 1.0,
            entry_name: String::new(),
            guid: None,
            chara_names: BTreeMap::new(),
            body_shape: 0,
            can_use_any_dual_skill: false,
        }
    }
}

/// Skeleton and camera animation overriding the engine defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkeletonPair {
    pub esk: Vec<u8>,
    pub cam_ean: Vec<u8>,
}

/// A new-character mod package.
///
/// Built up by the converter and written with [`ModPackage::save`]. Files
/// are keyed by archive path; staging two files under one path is an error.
#[derive(Debug, Clone, Default)]
pub struct ModPackage {
    info: PackageInfo,
    bcs: BcsFile,
    skeleton: Option<SkeletonPair>,
    slots: Vec<SlotEntry>,
    audio: Vec<AudioEntry>,
    skill_sets: Vec<SkillSet>,
    custom_skills: BTreeSet<u16>,
    stats: Vec<StatEntry>,
    auras: Vec<AuraLink>,
    clips: Vec<ClipLink>,
    third_stage: Option<ThirdStageLink>,
    files: BTreeMap<String, Vec<u8>>,
}

impl ModPackage {
    /// Create an empty package.
    pub fn new(info: PackageInfo) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    /// Get the metadata.
    pub fn info(&self) -> &PackageInfo {
        &self.info
    }

    /// Get mutable access to the metadata.
    pub fn info_mut(&mut self) -> &mut PackageInfo {
        &mut self.info
    }

    /// Get the custom part-set table.
    pub fn bcs(&self) -> &BcsFile {
        &self.bcs
    }

    /// Replace the custom part-set table.
    pub fn set_bcs(&mut self, bcs: BcsFile) {
        self.bcs = bcs;
    }

    /// Get the skeleton override pair.
    pub fn skeleton(&self) -> Option<&SkeletonPair> {
        self.skeleton.as_ref()
    }

    /// Set the skeleton override pair.
    pub fn set_skeleton(&mut self, skeleton: SkeletonPair) {
        self.skeleton = Some(skeleton);
    }

    pub fn slots(&self) -> &[SlotEntry] {
        &self.slots
    }

    pub fn add_slot(&mut self, slot: SlotEntry) {
        self.slots.push(slot);
    }

    pub fn audio_entries(&self) -> &[AudioEntry] {
        &self.audio
    }

    pub fn add_audio_entry(&mut self, entry: AudioEntry) {
        self.audio.push(entry);
    }

    pub fn skill_sets(&self) -> &[SkillSet] {
        &self.skill_sets
    }

    pub fn add_skill_set(&mut self, set: SkillSet) {
        self.skill_sets.push(set);
    }

    /// Skills the engine must install alongside the mod.
    pub fn custom_skills(&self) -> &BTreeSet<u16> {
        &self.custom_skills
    }

    /// Register a custom skill. Returns false if already registered.
    pub fn add_custom_skill(&mut self, id: u16) -> bool {
        self.custom_skills.insert(id)
    }

    pub fn stat_entries(&self) -> &[StatEntry] {
        &self.stats
    }

    pub fn add_stat_entry(&mut self, entry: StatEntry) {
        self.stats.push(entry);
    }

    pub fn aura_links(&self) -> &[AuraLink] {
        &self.auras
    }

    pub fn add_aura_link(&mut self, link: AuraLink) {
        self.auras.push(link);
    }

    pub fn clip_links(&self) -> &[ClipLink] {
        &self.clips
    }

    pub fn add_clip_link(&mut self, link: ClipLink) {
        self.clips.push(link);
    }

    pub fn third_stage(&self) -> Option<&ThirdStageLink> {
        self.third_stage.as_ref()
    }

    pub fn set_third_stage(&mut self, link: ThirdStageLink) {
        self.third_stage = Some(link);
    }

    /// Stage a file under an archive path.
    pub fn add_file(&mut self, path: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let path = path.into();
        if self.files.contains_key(&path) {
            return Err(Error::DuplicateEntry(path));
        }
        self.files.insert(path, data);
        Ok(())
    }

    /// Get a staged file.
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Iterate over staged files in path order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().map(|(p, d)| (p.as_str(), d.as_slice()))
    }

    /// Number of staged files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file_rejects_duplicates() {
        let mut package = ModPackage::new(PackageInfo::default());
        package.add_file("UI/SEL.DDS", vec![1]).unwrap();
        assert!(matches!(
            package.add_file("UI/SEL.DDS", vec![2]),
            Err(Error::DuplicateEntry(_))
        ));
        assert_eq!(package.file("UI/SEL.DDS"), Some(&[1u8][..]));
    }

    #[test]
    fn test_custom_skills_dedup() {
        let mut package = ModPackage::default();
        assert!(package.add_custom_skill(40000));
        assert!(!package.add_custom_skill(40000));
        assert_eq!(package.custom_skills().len(), 1);
    }

    #[test]
    fn test_default_version() {
        assert_eq!(PackageInfo::default().version, 1.0);
    }
}
