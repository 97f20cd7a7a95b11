//! X2M mod package model and writer.
//!
//! An X2M package installs a new playable character. It is a ZIP archive
//! holding:
//!
//! - `x2m.xml`: manifest with metadata, per-costume records and a checksum
//!   listing of every other entry
//! - `bcs.xml`: the custom body-part-set table
//! - `skeleton.esk` / `camera.ean`: the skeleton override pair
//! - `chara/<CODE>/...`, `UI/...`, `audio/...`: staged resource files
//!
//! # Example
//!
//! ```no_run
//! use cacpack_x2m::{ModPackage, PackageInfo};
//!
//! let mut package = ModPackage::new(PackageInfo {
//!     name: "Gohan".into(),
//!     entry_name: "GHN".into(),
//!     ..PackageInfo::default()
//! });
//! package.add_file("UI/SEL.DDS", std::fs::read("portrait.dds")?)?;
//! package.save("gohan.x2m")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod entry;
mod error;
mod language;
mod manifest;
mod package;
mod writer;

pub use entry::{
    AudioEntry, AuraLink, ClipLink, SkillSet, SlotEntry, SlotVoice, StatBlock, StatEntry,
    ThirdStageLink, DUMMY_VOICE_FILE, DUMMY_VOICE_ID, SKILL_UNSET,
};
pub use error::{Error, Result};
pub use language::Language;
pub use manifest::MOD_TYPE_NEW_CHARACTER;
pub use package::{ModPackage, PackageInfo, SkeletonPair};
pub use writer::{BCS_PATH, CAMERA_PATH, MANIFEST_PATH, SKELETON_PATH};
