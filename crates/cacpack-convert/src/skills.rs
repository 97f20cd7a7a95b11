//! Skill set resolution.

use cacpack_x2m::{SkillSet, SKILL_UNSET};

use crate::game::{GameData, RaceTemplate};
use crate::record::CostumePreset;

/// Generic blast skill given to costumes whose blast slot stays unresolved.
pub const DEFAULT_BLAST_SKILL: u16 = 21081;

/// Awaken slot values at or above this are unset.
pub const AWAKEN_UNSET: u16 = 0x8000;

/// Build a preset's skill set.
///
/// An equipped talisman replaces the preset's blast skill when it maps to
/// one. A blast slot still unset afterwards gets [`DEFAULT_BLAST_SKILL`].
pub fn resolve_skill_set<G: GameData + ?Sized>(
    game: &G,
    preset: &CostumePreset,
    costume_index: u32,
) -> SkillSet {
    let mut set = SkillSet::new(costume_index);

    set.skills[SkillSet::SUPER].copy_from_slice(&preset.super_skills);
    set.skills[SkillSet::ULTIMATE].copy_from_slice(&preset.ult_skills);
    set.skills[SkillSet::EVASIVE] = preset.evasive_skill;
    set.skills[SkillSet::BLAST] = preset.blast_skill;
    set.skills[SkillSet::AWAKEN] = preset.awaken_skill;

    if preset.has_talisman() {
        if let Some(blast) = game.talisman_blast(preset.talisman) {
            set.skills[SkillSet::BLAST] = blast;
        }
    }

    if set.skills[SkillSet::BLAST] >= SKILL_UNSET {
        set.skills[SkillSet::BLAST] = DEFAULT_BLAST_SKILL;
    }

    set
}

/// Skills of a set the race's base skill table does not contain.
pub fn custom_skills<'a>(
    template: &'a RaceTemplate,
    set: &'a SkillSet,
) -> impl Iterator<Item = u16> + 'a {
    set.skills
        .iter()
        .enumerate()
        .filter(|&(slot, &id)| {
            if slot == SkillSet::AWAKEN {
                id < AWAKEN_UNSET
            } else {
                id < SKILL_UNSET
            }
        })
        .map(|(_, &id)| id)
        .filter(move |id| !template.baseline_skills.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::MemoryGameData;

    #[test]
    fn test_unresolved_blast_gets_default() {
        let game = MemoryGameData::default();
        let set = resolve_skill_set(&game, &CostumePreset::default(), 0);
        assert_eq!(set.blast(), DEFAULT_BLAST_SKILL);
        assert_eq!(set.awaken(), SKILL_UNSET);
    }

    #[test]
    fn test_talisman_overrides_blast() {
        let mut game = MemoryGameData::default();
        game.set_talisman(4, 21050);
        let preset = CostumePreset {
            talisman: 4,
            blast_skill: 21010,
            ..CostumePreset::default()
        };
        assert_eq!(resolve_skill_set(&game, &preset, 0).blast(), 21050);
    }

    #[test]
    fn test_unmapped_talisman_keeps_own_blast() {
        let game = MemoryGameData::default();
        let preset = CostumePreset {
            talisman: 4,
            blast_skill: 21010,
            ..CostumePreset::default()
        };
        assert_eq!(resolve_skill_set(&game, &preset, 0).blast(), 21010);

        let unresolved = CostumePreset {
            talisman: 4,
            ..CostumePreset::default()
        };
        assert_eq!(resolve_skill_set(&game, &unresolved, 0).blast(), DEFAULT_BLAST_SKILL);
    }

    #[test]
    fn test_slots_copied_in_order() {
        let game = MemoryGameData::default();
        let preset = CostumePreset {
            super_skills: [1, 2, 3, 4],
            ult_skills: [5, 6],
            evasive_skill: 7,
            blast_skill: 8,
            awaken_skill: 9,
            ..CostumePreset::default()
        };
        let set = resolve_skill_set(&game, &preset, 3);
        assert_eq!(set.skills, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(set.costume_index, 3);
    }

    #[test]
    fn test_custom_skills_skip_baseline_and_unset() {
        let mut template = RaceTemplate::default();
        template.baseline_skills.extend([1, DEFAULT_BLAST_SKILL]);

        let mut set = SkillSet::new(0);
        set.skills[0] = 1;
        set.skills[1] = 40000;
        set.skills[SkillSet::BLAST] = DEFAULT_BLAST_SKILL;
        set.skills[SkillSet::AWAKEN] = 0x8001;

        let custom: Vec<_> = custom_skills(&template, &set).collect();
        assert_eq!(custom, vec![40000]);
    }
}
