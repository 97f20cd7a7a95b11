//! Per-costume auxiliary records: audio, slot, stats, aura and clip.

use cacpack_x2m::{AudioEntry, AuraLink, ClipLink, Language, SlotEntry, SlotVoice, StatEntry};

use crate::game::{GameData, RaceTemplate};
use crate::record::{fallback_costume_name, CharacterRecord, CostumePreset, ITEM_NONE};
use crate::resources::ResourceFileCollector;
use crate::{ConvertError, Race, Result};

/// Route the character's voice through the race's audio layout.
pub fn build_audio_entry(
    template: &RaceTemplate,
    voice: u32,
    costume_index: u32,
    files: &mut ResourceFileCollector,
) -> Result<AudioEntry> {
    let bank = template
        .voices
        .get(&voice)
        .ok_or_else(|| ConvertError::mapping(format!("voice {} not in the race audio layout", voice)))?;

    for file in &bank.files {
        files.register(file);
    }

    Ok(AudioEntry {
        costume_index,
        ..bank.audio.clone()
    })
}

/// Build a costume's character-select slot.
///
/// Names come from the top item per language. English always gets a name,
/// falling back to the preset's position in the record.
pub fn build_slot_entry<G: GameData + ?Sized>(
    game: &G,
    preset: &CostumePreset,
    preset_index: usize,
    costume_index: u32,
    css_voice: bool,
) -> SlotEntry {
    let mut slot = SlotEntry {
        costume_index,
        ..SlotEntry::default()
    };

    if preset.top < ITEM_NONE {
        for lang in Language::ALL {
            if let Some(name) = game.costume_name(preset.top, lang).filter(|n| !n.is_empty()) {
                slot.costume_names.insert(lang, name);
            }
        }
    }
    slot.costume_names
        .entry(Language::En)
        .or_insert_with(|| fallback_costume_name(preset_index));

    if css_voice {
        slot.voice = Some(SlotVoice::dummy());
    }

    slot
}

/// Race baseline stats with the character's attribute points.
pub fn build_stat_entry(
    race: Race,
    template: &RaceTemplate,
    record: &CharacterRecord,
    preset: &CostumePreset,
    costume_index: u32,
) -> Result<StatEntry> {
    let base = template
        .stats
        .ok_or_else(|| ConvertError::template(race.code(), "baseline stats"))?;

    Ok(StatEntry {
        costume_index,
        body_shape: record.body_shape,
        talisman: preset.talisman,
        base,
        points: record.stats,
    })
}

pub fn build_aura_link(race: Race, template: &RaceTemplate, costume_index: u32) -> Result<AuraLink> {
    let aura = template
        .aura
        .as_ref()
        .ok_or_else(|| ConvertError::template(race.code(), "default aura"))?;

    Ok(AuraLink {
        costume_index,
        ..aura.clone()
    })
}

pub fn build_clip_link(
    race: Race,
    template: &RaceTemplate,
    body_shape: u8,
    costume_index: u32,
) -> Result<ClipLink> {
    let clip = template
        .clip
        .as_ref()
        .ok_or_else(|| ConvertError::template(race.code(), "default movement clips"))?;

    Ok(ClipLink {
        costume_index,
        clip_set: clip.clip_set,
        body_shape,
    })
}

#[cfg(test)]
mod tests {
    use cacpack_x2m::{StatBlock, DUMMY_VOICE_ID};

    use super::*;
    use crate::game::{MemoryGameData, VoiceBank};

    fn template() -> RaceTemplate {
        let mut template = RaceTemplate {
            stats: Some(StatBlock {
                health: 1.0,
                ..StatBlock::default()
            }),
            aura: Some(AuraLink {
                costume_index: 9,
                aura_id: 4,
                glare: true,
            }),
            clip: Some(ClipLink {
                costume_index: 9,
                clip_set: 2,
                body_shape: 0,
            }),
            ..RaceTemplate::default()
        };
        template.voices.insert(
            3,
            VoiceBank {
                audio: AudioEntry {
                    se: "CAR_BTL_HUF".into(),
                    vox: "CAR_BTL_HUF_VOX_03".into(),
                    ..AudioEntry::default()
                },
                files: vec![r"sound\VOX\CAR_BTL_HUF_VOX_03.acb".into()],
                css_tracks: Vec::new(),
            },
        );
        template
    }

    #[test]
    fn test_audio_entry() {
        let mut files = ResourceFileCollector::new();
        let entry = build_audio_entry(&template(), 3, 1, &mut files).unwrap();
        assert_eq!(entry.costume_index, 1);
        assert_eq!(entry.vox, "CAR_BTL_HUF_VOX_03");
        assert!(files.contains("sound/VOX/CAR_BTL_HUF_VOX_03.acb"));

        assert!(matches!(
            build_audio_entry(&template(), 8, 1, &mut files),
            Err(ConvertError::MappingFailure(_))
        ));
    }

    #[test]
    fn test_slot_names_and_fallback() {
        let mut game = MemoryGameData::default();
        game.set_costume_name(12, Language::En, "Turtle School Gi");
        game.set_costume_name(12, Language::Fr, "Kimono de la Tortue");

        let named = CostumePreset {
            top: 12,
            ..CostumePreset::default()
        };
        let slot = build_slot_entry(&game, &named, 4, 0, false);
        assert_eq!(slot.costume_names.len(), 2);
        assert_eq!(slot.costume_names[&Language::En], "Turtle School Gi");
        assert!(slot.voice.is_none());

        let slot = build_slot_entry(&game, &CostumePreset::default(), 0, 1, true);
        assert_eq!(slot.costume_names[&Language::En], "Current Clothing");
        assert_eq!(slot.costume_names.len(), 1);
        assert_eq!(slot.voice.map(|v| v.ids), Some([DUMMY_VOICE_ID; 2]));

        let slot = build_slot_entry(&game, &CostumePreset::default(), 5, 1, false);
        assert_eq!(slot.costume_names[&Language::En], "Preset 5");
    }

    #[test]
    fn test_stat_aura_clip() {
        let record: CharacterRecord = serde_json::from_str(
            r#"{"name":"ABC","race":1,"body_shape":2,"stats":{"health":5,"ki":1,"stamina":0,"basic_attack":0,"strike":3,"blast":0}}"#,
        )
        .unwrap();
        let preset = CostumePreset {
            talisman: 7,
            ..CostumePreset::default()
        };
        let template = template();

        let stats = build_stat_entry(Race::Huf, &template, &record, &preset, 1).unwrap();
        assert_eq!(stats.points.health, 5);
        assert_eq!(stats.talisman, 7);
        assert_eq!(stats.body_shape, 2);

        let aura = build_aura_link(Race::Huf, &template, 1).unwrap();
        assert_eq!((aura.costume_index, aura.aura_id, aura.glare), (1, 4, true));

        let clip = build_clip_link(Race::Huf, &template, 2, 1).unwrap();
        assert_eq!((clip.costume_index, clip.clip_set, clip.body_shape), (1, 2, 2));
    }

    #[test]
    fn test_missing_template_parts() {
        let template = RaceTemplate::default();
        assert!(matches!(
            build_aura_link(Race::Hum, &template, 0),
            Err(ConvertError::TemplateMissing { race: "HUM", .. })
        ));
        assert!(build_clip_link(Race::Hum, &template, 0, 0).is_err());
    }
}
