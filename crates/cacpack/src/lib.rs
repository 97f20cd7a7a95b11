//! cacpack - turns Create-a-Character records into installable mod packages.
//!
//! This crate provides a unified interface to the cacpack library ecosystem.
//!
//! # Crates
//!
//! - [`cacpack_common`] - Common utilities (mod GUIDs, MD5, CRC32C)
//! - [`cacpack_bcs`] - Body-part-set model (part sets, colors, body shapes)
//! - [`cacpack_x2m`] - X2M package model, manifest and writer
//! - [`cacpack_convert`] - The conversion pipeline and game data sources
//!
//! # Example
//!
//! ```no_run
//! use cacpack::prelude::*;
//!
//! let game = DirGameData::open("gamedata")?;
//! let save: SaveExport = serde_json::from_str(&std::fs::read_to_string("save.json")?)?;
//! let record = &save.characters[0];
//!
//! let options = ConvertOptions {
//!     entry_code: "XYZ".into(),
//!     presets: default_selection(&game, record),
//!     ..ConvertOptions::default()
//! };
//! let package = Converter::new(&game).convert(record, &options, "XYZ.x2m")?;
//! println!("{} files", package.file_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use cacpack_bcs as bcs;
pub use cacpack_common as common;
pub use cacpack_convert as convert;
pub use cacpack_x2m as x2m;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use cacpack_bcs::{BcsFile, Part, PartKind, PartSet};
    pub use cacpack_common::ModGuid;
    pub use cacpack_convert::{
        default_selection, preset_labels, CharacterRecord, ConvertError, ConvertOptions,
        Converter, CostumePreset, DirGameData, EntryCode, GameData, GuidMode, MemoryGameData,
        Race, SaveExport,
    };
    pub use cacpack_x2m::{Language, ModPackage, PackageInfo};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
