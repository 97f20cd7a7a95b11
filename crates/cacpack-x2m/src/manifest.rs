//! The `x2m.xml` manifest.

use serde::Serialize;

use cacpack_common::hash;

use crate::{Error, Language, ModPackage, Result};

/// Mod type tag for new playable characters.
pub const MOD_TYPE_NEW_CHARACTER: &str = "NEW_CHARACTER";

#[derive(Serialize)]
#[serde(rename = "X2M")]
struct ManifestXml<'a> {
    #[serde(rename = "@type")]
    mod_type: &'static str,
    #[serde(rename = "Mod")]
    info: InfoXml<'a>,
    #[serde(rename = "CharaName")]
    chara_names: Vec<NameXml<'a>>,
    #[serde(rename = "Slot")]
    slots: Vec<SlotXml<'a>>,
    #[serde(rename = "Audio")]
    audio: Vec<AudioXml<'a>>,
    #[serde(rename = "SkillSet")]
    skill_sets: Vec<SkillSetXml>,
    #[serde(rename = "CustomSkill")]
    custom_skills: Vec<IdXml>,
    #[serde(rename = "Stats")]
    stats: Vec<StatsXml>,
    #[serde(rename = "Aura")]
    auras: Vec<AuraXml>,
    #[serde(rename = "Clip")]
    clips: Vec<ClipXml>,
    #[serde(rename = "ThirdStage", skip_serializing_if = "Option::is_none")]
    third_stage: Option<ThirdStageXml<'a>>,
    #[serde(rename = "File")]
    files: Vec<FileXml<'a>>,
}

#[derive(Serialize)]
struct InfoXml<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "@author")]
    author: &'a str,
    #[serde(rename = "@version")]
    version: f32,
    #[serde(rename = "@entry")]
    entry: &'a str,
    #[serde(rename = "@guid", skip_serializing_if = "Option::is_none")]
    guid: Option<String>,
    #[serde(rename = "@body_shape")]
    body_shape: u8,
    #[serde(rename = "@any_dual_skill")]
    any_dual_skill: bool,
}

#[derive(Serialize)]
struct NameXml<'a> {
    #[serde(rename = "@lang")]
    lang: &'static str,
    #[serde(rename = "@value")]
    value: &'a str,
}

#[derive(Serialize)]
struct SlotXml<'a> {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@voice_ids", skip_serializing_if = "Option::is_none")]
    voice_ids: Option<String>,
    #[serde(rename = "@audio_files", skip_serializing_if = "Option::is_none")]
    audio_files: Option<String>,
    #[serde(rename = "CostumeName")]
    names: Vec<NameXml<'a>>,
}

#[derive(Serialize)]
struct AudioXml<'a> {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@se")]
    se: &'a str,
    #[serde(rename = "@vox")]
    vox: &'a str,
    #[serde(rename = "@amk")]
    amk: &'a str,
    #[serde(rename = "@skills")]
    skills: &'a str,
}

#[derive(Serialize)]
struct SkillSetXml {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@skills")]
    skills: String,
}

#[derive(Serialize)]
struct IdXml {
    #[serde(rename = "@id")]
    id: u16,
}

#[derive(Serialize)]
struct StatsXml {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@body_shape")]
    body_shape: u8,
    #[serde(rename = "@talisman")]
    talisman: u32,
    #[serde(rename = "@base")]
    base: String,
    #[serde(rename = "@points")]
    points: String,
}

#[derive(Serialize)]
struct AuraXml {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@aura")]
    aura_id: u32,
    #[serde(rename = "@glare")]
    glare: bool,
}

#[derive(Serialize)]
struct ClipXml {
    #[serde(rename = "@costume_index")]
    costume_index: u32,
    #[serde(rename = "@clip_set")]
    clip_set: u32,
    #[serde(rename = "@body_shape")]
    body_shape: u8,
}

#[derive(Serialize)]
struct ThirdStageXml<'a> {
    #[serde(rename = "@partset")]
    partset: u16,
    #[serde(rename = "@skeleton")]
    skeleton: &'a str,
    #[serde(rename = "@animation")]
    animation: &'a str,
}

#[derive(Serialize)]
struct FileXml<'a> {
    #[serde(rename = "@path")]
    path: &'a str,
    #[serde(rename = "@size")]
    size: usize,
    #[serde(rename = "@crc")]
    crc: String,
}

fn join<T: ToString>(values: impl IntoIterator<Item = T>) -> String {
    values
        .into_iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn names(map: &std::collections::BTreeMap<Language, String>) -> Vec<NameXml<'_>> {
    map.iter()
        .map(|(lang, value)| NameXml {
            lang: lang.code(),
            value,
        })
        .collect()
}

/// Render the manifest for a package whose archive will hold `entries`.
pub(crate) fn render(package: &ModPackage, entries: &[(String, &[u8])]) -> Result<String> {
    let info = package.info();

    let doc = ManifestXml {
        mod_type: MOD_TYPE_NEW_CHARACTER,
        info: InfoXml {
            name: &info.name,
            author: &info.author,
            version: info.version,
            entry: &info.entry_name,
            guid: info.guid.map(|g| g.to_string()),
            body_shape: info.body_shape,
            any_dual_skill: info.can_use_any_dual_skill,
        },
        chara_names: names(&info.chara_names),
        slots: package
            .slots()
            .iter()
            .map(|slot| SlotXml {
                costume_index: slot.costume_index,
                voice_ids: slot.voice.as_ref().map(|v| join(v.ids)),
                audio_files: slot.voice.as_ref().map(|v| v.audio_files.join(",")),
                names: names(&slot.costume_names),
            })
            .collect(),
        audio: package
            .audio_entries()
            .iter()
            .map(|a| AudioXml {
                costume_index: a.costume_index,
                se: &a.se,
                vox: &a.vox,
                amk: &a.amk,
                skills: &a.skills,
            })
            .collect(),
        skill_sets: package
            .skill_sets()
            .iter()
            .map(|s| SkillSetXml {
                costume_index: s.costume_index,
                skills: join(s.skills),
            })
            .collect(),
        custom_skills: package
            .custom_skills()
            .iter()
            .map(|&id| IdXml { id })
            .collect(),
        stats: package
            .stat_entries()
            .iter()
            .map(|s| StatsXml {
                costume_index: s.costume_index,
                body_shape: s.body_shape,
                talisman: s.talisman,
                base: join([
                    s.base.health,
                    s.base.ki,
                    s.base.stamina,
                    s.base.basic_attack,
                    s.base.strike,
                    s.base.blast,
                ]),
                points: join([
                    s.points.health,
                    s.points.ki,
                    s.points.stamina,
                    s.points.basic_attack,
                    s.points.strike,
                    s.points.blast,
                ]),
            })
            .collect(),
        auras: package
            .aura_links()
            .iter()
            .map(|a| AuraXml {
                costume_index: a.costume_index,
                aura_id: a.aura_id,
                glare: a.glare,
            })
            .collect(),
        clips: package
            .clip_links()
            .iter()
            .map(|c| ClipXml {
                costume_index: c.costume_index,
                clip_set: c.clip_set,
                body_shape: c.body_shape,
            })
            .collect(),
        third_stage: package.third_stage().map(|t| ThirdStageXml {
            partset: t.partset,
            skeleton: &t.skeleton,
            animation: &t.animation,
        }),
        files: entries
            .iter()
            .map(|(path, data)| FileXml {
                path,
                size: data.len(),
                crc: format!("{:08x}", hash::crc32c(data)),
            })
            .collect(),
    };

    quick_xml::se::to_string(&doc).map_err(|e| Error::Xml(e.to_string()))
}
