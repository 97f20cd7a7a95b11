//! Game data read from an extracted data directory.
//!
//! Layout:
//!
//! ```text
//! <root>/database.json         lookup tables
//! <root>/templates/<RACE>.json race templates
//! <root>/<asset path>          raw assets
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use cacpack_x2m::Language;

use crate::game::{AwakenSkill, GameData, ItemCategory, MemoryGameData, RaceTemplate};
use crate::resources::normalize_path;
use crate::{ConvertError, Race, Result};

/// File name of the lookup tables.
pub const DATABASE_FILE: &str = "database.json";
/// Directory of the race templates.
pub const TEMPLATES_DIR: &str = "templates";

#[derive(Debug, Deserialize)]
struct ItemRow {
    category: ItemCategory,
    item: u32,
    part_set: u16,
}

#[derive(Debug, Deserialize)]
struct CostumeNameRow {
    top: u32,
    lang: Language,
    name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Database {
    items: Vec<ItemRow>,
    talismans: BTreeMap<u32, u16>,
    awaken_skills: BTreeMap<u16, AwakenSkill>,
    costume_names: Vec<CostumeNameRow>,
    reserved_codes: BTreeSet<String>,
}

/// Game data backed by a directory.
///
/// The lookup tables load eagerly; templates and assets are read on demand.
#[derive(Debug)]
pub struct DirGameData {
    root: PathBuf,
    tables: MemoryGameData,
}

impl DirGameData {
    /// Open a game data directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let path = root.join(DATABASE_FILE);
        let json = fs::read_to_string(&path)
            .map_err(|e| ConvertError::IoFailure(format!("{}: {}", path.display(), e)))?;
        let database: Database = serde_json::from_str(&json)?;

        let mut tables = MemoryGameData::default();
        for row in database.items {
            tables.set_item(row.category, row.item, row.part_set);
        }
        for row in database.costume_names {
            tables.set_costume_name(row.top, row.lang, row.name);
        }
        tables.talismans = database.talismans;
        tables.awaken_skills = database.awaken_skills;
        tables.reserved_codes = database.reserved_codes;

        debug!(
            "Loaded {} item mappings, {} reserved codes from {}",
            tables.items.len(),
            tables.reserved_codes.len(),
            path.display()
        );

        Ok(Self { root, tables })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an asset path inside the root, refusing to leave it.
    fn asset_path(&self, asset: &str) -> Result<PathBuf> {
        let normalized = normalize_path(asset);
        let escapes = asset.starts_with('/')
            || asset.starts_with('\\')
            || normalized.split('/').any(|seg| seg == ".." || seg.contains(':'));
        if normalized.is_empty() || escapes {
            return Err(ConvertError::IoFailure(format!("invalid asset path {:?}", asset)));
        }
        Ok(normalized.split('/').fold(self.root.clone(), |path, seg| path.join(seg)))
    }
}

impl GameData for DirGameData {
    fn race_template(&self, race: Race) -> Result<RaceTemplate> {
        let path = self
            .root
            .join(TEMPLATES_DIR)
            .join(format!("{}.json", race.code()));
        if !path.is_file() {
            return Err(ConvertError::template(
                race.code(),
                format!("{} does not exist", path.display()),
            ));
        }
        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn item_part_set(&self, category: ItemCategory, item: u32) -> Option<u16> {
        self.tables.item_part_set(category, item)
    }

    fn talisman_blast(&self, talisman: u32) -> Option<u16> {
        self.tables.talisman_blast(talisman)
    }

    fn awaken_skill(&self, id: u16) -> Option<AwakenSkill> {
        self.tables.awaken_skill(id)
    }

    fn costume_name(&self, top: u32, lang: Language) -> Option<String> {
        self.tables.costume_name(top, lang)
    }

    fn is_reserved_code(&self, code: &str) -> bool {
        self.tables.is_reserved_code(code)
    }

    fn read_asset(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.asset_path(path)?;
        fs::read(&full).map_err(|e| ConvertError::IoFailure(format!("{}: {}", full.display(), e)))
    }
}
