//! Per-preset body-part-set construction.
//!
//! A costume is composed from the race template: the character's fixed face
//! and hair parts plus the preset's equipment, each copied out of the
//! template part set it references. Colors are then painted onto the copied
//! selectors from the record and preset.

use cacpack_bcs::{BcsFile, PartKind, PartSet};
use tracing::trace;

use crate::game::{GameData, ItemCategory, RaceTemplate};
use crate::record::{CharacterRecord, CostumePreset, COLOR_UNSET, ITEM_NONE};
use crate::resources::ResourceFileCollector;
use crate::{ConvertError, EntryCode, Race, Result};

/// Character-driven color channel of a palette group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Skin(usize),
    Hair,
    Eye,
    Makeup(usize),
    Clothing(ItemCategory, usize),
}

/// Resolve the channel a color group is driven by, from its name.
fn channel_of(group: &str) -> Option<Channel> {
    let channel = match group {
        "SKIN_A" => Channel::Skin(0),
        "SKIN_B" => Channel::Skin(1),
        "SKIN_C" => Channel::Skin(2),
        "SKIN_D" => Channel::Skin(3),
        "HAIR_" => Channel::Hair,
        "eye_" => Channel::Eye,
        "PAINT_A_" => Channel::Makeup(0),
        "PAINT_B_" => Channel::Makeup(1),
        "PAINT_C_" => Channel::Makeup(2),
        _ => {
            // CC00_BUST_ .. CC03_BOOTS_
            let rest = group.strip_prefix("CC0")?;
            let mut chars = rest.chars();
            let index = chars.next()?.to_digit(10)? as usize;
            if index > 3 {
                return None;
            }
            let category = match chars.as_str() {
                "_BUST_" => ItemCategory::Bust,
                "_PANTS_" => ItemCategory::Pants,
                "_RIST_" => ItemCategory::Rist,
                "_BOOTS_" => ItemCategory::Boots,
                _ => return None,
            };
            Channel::Clothing(category, index)
        }
    };
    Some(channel)
}

fn channel_value(channel: Channel, record: &CharacterRecord, preset: &CostumePreset) -> u16 {
    match channel {
        Channel::Skin(i) => record.skin_colors[i],
        Channel::Hair => record.hair_color,
        Channel::Eye => record.eye_color,
        Channel::Makeup(i) => record.makeup_colors[i],
        Channel::Clothing(category, i) => match category {
            ItemCategory::Bust => preset.top_colors[i],
            ItemCategory::Pants => preset.bottom_colors[i],
            ItemCategory::Rist => preset.gloves_colors[i],
            ItemCategory::Boots => preset.shoes_colors[i],
            ItemCategory::Accessory => COLOR_UNSET,
        },
    }
}

/// Template part sets the record's fixed body components come from.
fn body_components(record: &CharacterRecord) -> [(PartKind, u16); 6] {
    [
        (PartKind::FaceBase, record.face_base),
        (PartKind::FaceForehead, record.face_forehead),
        (PartKind::FaceEye, record.eyes),
        (PartKind::FaceNose, record.nose),
        (PartKind::FaceEar, record.ears),
        (PartKind::Hair, record.hair),
    ]
}

/// Build one costume's part set from the template.
///
/// Every file the copied parts load is registered in `files` under the
/// template's base directory. The returned set is owned by `code`.
pub fn build_part_set<G: GameData + ?Sized>(
    game: &G,
    race: Race,
    template: &RaceTemplate,
    code: &EntryCode,
    record: &CharacterRecord,
    preset: &CostumePreset,
    files: &mut ResourceFileCollector,
) -> Result<PartSet> {
    let mut refs: Vec<(PartKind, u16)> = body_components(record).to_vec();

    for category in ItemCategory::ALL {
        let item = preset.item(category);
        if item >= ITEM_NONE {
            continue;
        }
        let set = game.item_part_set(category, item).ok_or_else(|| {
            ConvertError::mapping(format!("{:?} item {} has no part set", category, item))
        })?;
        refs.push((category.part_kind(), set));
    }

    let mut output = PartSet::new();
    for (kind, set) in refs {
        let part = template.bcs.part(set, kind)?;
        for file in &part.files {
            if files.register(&format!("{}/{}", template.base_dir, file)) {
                trace!("Registered {}/{}", template.base_dir, file);
            }
        }
        output.insert(part.clone());
    }

    output.rebase(race.code(), code.as_str());
    Ok(output)
}

/// Paint the record's and preset's colors onto a part set.
///
/// `table` supplies the color groups the selectors index. Unset values
/// and groups the record does not drive keep the template's choice.
pub fn apply_colors(
    table: &BcsFile,
    set: &mut PartSet,
    record: &CharacterRecord,
    preset: &CostumePreset,
) -> Result<()> {
    for part in set.parts_mut() {
        for selector in &mut part.color_selectors {
            let group = table.color_group(selector.group)?;
            if let Some(channel) = channel_of(&group.name) {
                let value = channel_value(channel, record, preset);
                if value != COLOR_UNSET {
                    selector.color = value;
                }
            }
            table.check_selector(*selector).map_err(|e| {
                ConvertError::mapping(format!("color-table slot mismatch on {}: {}", part.kind, e))
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use cacpack_bcs::{ColorGroup, ColorRgba, ColorSelector, Part};

    use super::*;
    use crate::game::MemoryGameData;

    fn template() -> RaceTemplate {
        let mut bcs = BcsFile::new();
        bcs.add_color_group(ColorGroup::new("SKIN_A", vec![ColorRgba::white(); 4]));
        bcs.add_color_group(ColorGroup::new("CC01_BUST_", vec![ColorRgba::white(); 8]));
        bcs.add_color_group(ColorGroup::new("GLOW_", vec![ColorRgba::white(); 2]));

        let mut face = PartSet::new();
        for (kind, _) in body_components(&record()) {
            face.insert(Part::new(kind, "HUF", 0).with_file(format!("HUF_000_{}.emd", kind)));
        }
        face.insert(
            Part::new(PartKind::FaceBase, "HUF", 0)
                .with_file("HUF_000_FaceBase.emd")
                .with_selector(ColorSelector::new(0, 0)),
        );
        bcs.insert_part_set(0, face);

        let mut gi = PartSet::new();
        gi.insert(
            Part::new(PartKind::Bust, "HUF", 12)
                .with_file("HUF_012_Bust.emd")
                .with_file("HUF_000_FaceBase.emd")
                .with_selector(ColorSelector::new(1, 0))
                .with_selector(ColorSelector::new(2, 1)),
        );
        bcs.insert_part_set(12, gi);

        RaceTemplate {
            base_dir: "chara/HUF".into(),
            bcs,
            ..RaceTemplate::default()
        }
    }

    fn record() -> CharacterRecord {
        serde_json::from_str(r#"{"name":"ABC","race":1}"#).unwrap()
    }

    fn game() -> MemoryGameData {
        let mut game = MemoryGameData::default();
        game.set_item(ItemCategory::Bust, 7, 12);
        game
    }

    #[test]
    fn test_channel_names() {
        assert_eq!(channel_of("SKIN_C"), Some(Channel::Skin(2)));
        assert_eq!(channel_of("CC03_BOOTS_"), Some(Channel::Clothing(ItemCategory::Boots, 3)));
        assert_eq!(channel_of("CC04_BUST_"), None);
        assert_eq!(channel_of("GLOW_"), None);
    }

    #[test]
    fn test_build_part_set_registers_and_rebases() {
        let template = template();
        let code = EntryCode::parse("XYZ").unwrap();
        let preset = CostumePreset {
            top: 7,
            ..CostumePreset::default()
        };
        let mut files = ResourceFileCollector::new();

        let set = build_part_set(&game(), Race::Huf, &template, &code, &record(), &preset, &mut files)
            .unwrap();

        assert_eq!(set.len(), 7);
        let bust = set.get(PartKind::Bust).unwrap();
        assert_eq!(bust.owner, "XYZ");
        assert_eq!(bust.files[0], "XYZ_012_Bust.emd");
        assert!(files.contains("chara/HUF/HUF_012_Bust.emd"));
        // Shared face file registered once.
        assert_eq!(files.iter().filter(|p| p.ends_with("FaceBase.emd")).count(), 1);
    }

    #[test]
    fn test_unmapped_item_fails() {
        let template = template();
        let code = EntryCode::parse("XYZ").unwrap();
        let preset = CostumePreset {
            bottom: 3,
            ..CostumePreset::default()
        };
        let mut files = ResourceFileCollector::new();
        let result =
            build_part_set(&game(), Race::Huf, &template, &code, &record(), &preset, &mut files);
        assert!(matches!(result, Err(ConvertError::MappingFailure(_))));
    }

    #[test]
    fn test_apply_colors() {
        let template = template();
        let mut set = template.bcs.part_set(12).unwrap().clone();
        let preset = CostumePreset {
            top_colors: [COLOR_UNSET, 5, COLOR_UNSET, COLOR_UNSET],
            ..CostumePreset::default()
        };

        apply_colors(&template.bcs, &mut set, &record(), &preset).unwrap();

        let selectors = &set.get(PartKind::Bust).unwrap().color_selectors;
        assert_eq!(selectors[0], ColorSelector::new(1, 5));
        // Undriven group keeps the template value.
        assert_eq!(selectors[1], ColorSelector::new(2, 1));
    }

    #[test]
    fn test_apply_colors_out_of_palette() {
        let template = template();
        let mut set = template.bcs.part_set(12).unwrap().clone();
        let preset = CostumePreset {
            top_colors: [COLOR_UNSET, 8, COLOR_UNSET, COLOR_UNSET],
            ..CostumePreset::default()
        };

        let result = apply_colors(&template.bcs, &mut set, &record(), &preset);
        assert!(matches!(result, Err(ConvertError::MappingFailure(msg)) if msg.contains("slot mismatch")));
    }

    fn character_table() -> (BcsFile, PartSet) {
        let mut table = BcsFile::new();
        for name in ["SKIN_A", "HAIR_", "eye_", "PAINT_B_", "SKIN_B"] {
            table.add_color_group(ColorGroup::new(name, vec![ColorRgba::white(); 6]));
        }

        let mut set = PartSet::new();
        set.insert(
            Part::new(PartKind::FaceBase, "XYZ", 0)
                .with_selector(ColorSelector::new(0, 0))
                .with_selector(ColorSelector::new(4, 2)),
        );
        set.insert(Part::new(PartKind::Hair, "XYZ", 0).with_selector(ColorSelector::new(1, 0)));
        set.insert(Part::new(PartKind::FaceEye, "XYZ", 0).with_selector(ColorSelector::new(2, 0)));
        set.insert(
            Part::new(PartKind::FaceForehead, "XYZ", 0).with_selector(ColorSelector::new(3, 1)),
        );
        (table, set)
    }

    fn selectors(set: &PartSet, kind: PartKind) -> Vec<ColorSelector> {
        set.get(kind).unwrap().color_selectors.clone()
    }

    #[test]
    fn test_apply_character_colors() {
        let (table, mut set) = character_table();
        let mut record = record();
        record.skin_colors = [3, COLOR_UNSET, COLOR_UNSET, COLOR_UNSET];
        record.hair_color = 4;
        record.eye_color = 2;
        record.makeup_colors = [COLOR_UNSET, 5, COLOR_UNSET];

        apply_colors(&table, &mut set, &record, &CostumePreset::default()).unwrap();

        assert_eq!(
            selectors(&set, PartKind::FaceBase),
            vec![ColorSelector::new(0, 3), ColorSelector::new(4, 2)]
        );
        assert_eq!(selectors(&set, PartKind::Hair), vec![ColorSelector::new(1, 4)]);
        assert_eq!(selectors(&set, PartKind::FaceEye), vec![ColorSelector::new(2, 2)]);
        assert_eq!(selectors(&set, PartKind::FaceForehead), vec![ColorSelector::new(3, 5)]);
    }

    #[test]
    fn test_unset_character_colors_keep_template() {
        let (table, mut set) = character_table();
        let before = set.clone();

        apply_colors(&table, &mut set, &record(), &CostumePreset::default()).unwrap();

        assert_eq!(set, before);
    }
}
