//! XML output for BCS files.

use serde::Serialize;

use crate::{BcsFile, Error, Result};

#[derive(Serialize)]
#[serde(rename = "BCS")]
struct BcsXml<'a> {
    #[serde(rename = "PartSet")]
    part_sets: Vec<PartSetXml<'a>>,
    #[serde(rename = "ColorGroup")]
    color_groups: Vec<ColorGroupXml<'a>>,
    #[serde(rename = "Body")]
    bodies: Vec<BodyXml<'a>>,
}

#[derive(Serialize)]
struct PartSetXml<'a> {
    #[serde(rename = "@id")]
    id: u16,
    #[serde(rename = "Part")]
    parts: Vec<PartXml<'a>>,
}

#[derive(Serialize)]
struct PartXml<'a> {
    #[serde(rename = "@kind")]
    kind: &'static str,
    #[serde(rename = "@owner")]
    owner: &'a str,
    #[serde(rename = "@model")]
    model: u16,
    #[serde(rename = "@model2")]
    model2: u16,
    #[serde(rename = "@texture")]
    texture: u16,
    #[serde(rename = "File")]
    files: Vec<FileXml<'a>>,
    #[serde(rename = "ColorSelector")]
    selectors: Vec<SelectorXml>,
}

#[derive(Serialize)]
struct FileXml<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
}

#[derive(Serialize)]
struct SelectorXml {
    #[serde(rename = "@group")]
    group: u16,
    #[serde(rename = "@color")]
    color: u16,
}

#[derive(Serialize)]
struct ColorGroupXml<'a> {
    #[serde(rename = "@name")]
    name: &'a str,
    #[serde(rename = "Color")]
    colors: Vec<ColorXml>,
}

#[derive(Serialize)]
struct ColorXml {
    #[serde(rename = "@r")]
    r: f32,
    #[serde(rename = "@g")]
    g: f32,
    #[serde(rename = "@b")]
    b: f32,
    #[serde(rename = "@a")]
    a: f32,
}

#[derive(Serialize)]
struct BodyXml<'a> {
    #[serde(rename = "BoneScale")]
    bone_scales: Vec<BoneScaleXml<'a>>,
}

#[derive(Serialize)]
struct BoneScaleXml<'a> {
    #[serde(rename = "@bone")]
    bone: &'a str,
    #[serde(rename = "@x")]
    x: f32,
    #[serde(rename = "@y")]
    y: f32,
    #[serde(rename = "@z")]
    z: f32,
}

impl BcsFile {
    /// Serialize to an XML document.
    pub fn to_xml(&self) -> Result<String> {
        let doc = BcsXml {
            part_sets: self
                .part_sets()
                .map(|(id, set)| PartSetXml {
                    id,
                    parts: set
                        .parts()
                        .map(|part| PartXml {
                            kind: part.kind.name(),
                            owner: &part.owner,
                            model: part.model,
                            model2: part.model2,
                            texture: part.texture,
                            files: part.files.iter().map(|name| FileXml { name }).collect(),
                            selectors: part
                                .color_selectors
                                .iter()
                                .map(|s| SelectorXml {
                                    group: s.group,
                                    color: s.color,
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
            color_groups: self
                .color_groups()
                .iter()
                .map(|group| ColorGroupXml {
                    name: &group.name,
                    colors: group
                        .colors
                        .iter()
                        .map(|c| ColorXml {
                            r: c.r,
                            g: c.g,
                            b: c.b,
                            a: c.a,
                        })
                        .collect(),
                })
                .collect(),
            bodies: self
                .bodies()
                .iter()
                .map(|body| BodyXml {
                    bone_scales: body
                        .bone_scales
                        .iter()
                        .map(|s| BoneScaleXml {
                            bone: &s.bone,
                            x: s.x,
                            y: s.y,
                            z: s.z,
                        })
                        .collect(),
                })
                .collect(),
        };

        quick_xml::se::to_string(&doc).map_err(|e| Error::Xml(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use crate::{BcsFile, ColorSelector, Part, PartKind, PartSet};

    #[test]
    fn test_to_xml_contains_parts() {
        let mut file = BcsFile::new();
        let mut set = PartSet::new();
        set.insert(
            Part::new(PartKind::Hair, "XYZ", 7)
                .with_file("XYZ_007_Hair.emd")
                .with_selector(ColorSelector::new(1, 4)),
        );
        file.insert_part_set(0, set);

        let xml = file.to_xml().unwrap();
        assert!(xml.starts_with("<BCS>"));
        assert!(xml.contains(r#"<PartSet id="0">"#));
        assert!(xml.contains(r#"kind="Hair""#));
        assert!(xml.contains(r#"<File name="XYZ_007_Hair.emd"/>"#));
        assert!(xml.contains(r#"<ColorSelector group="1" color="4"/>"#));
    }
}
