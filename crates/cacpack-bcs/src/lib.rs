//! Body-part-set (BCS) model.
//!
//! A BCS file describes how a character's visible appearance is composed:
//! which geometry each body part uses, which color palette entry each
//! material slot picks, and which bone scales each body shape applies.
//!
//! # Data Structure
//!
//! - [`BcsFile`]: the container
//!   - [`PartSet`]s keyed by id, each holding up to one [`Part`] per [`PartKind`]
//!   - [`ColorGroup`]s: named palettes that [`ColorSelector`]s index into
//!   - [`Body`] shapes: bone scale tables selected by body shape index
//!
//! The byte layout of the on-disk format is out of scope; templates are
//! loaded through serde and the merged table is written as XML.
//!
//! # Example
//!
//! ```
//! use cacpack_bcs::{BcsFile, Part, PartKind, PartSet};
//!
//! let mut template = BcsFile::new();
//! let mut set = PartSet::new();
//! set.insert(Part::new(PartKind::Hair, "HUM", 12));
//! template.insert_part_set(4, set);
//!
//! let hair = template.part(4, PartKind::Hair)?;
//! assert_eq!(hair.model, 12);
//! # Ok::<(), cacpack_bcs::Error>(())
//! ```

mod color;
mod error;
mod file;
mod part;
mod xml;

pub use color::{ColorGroup, ColorRgba, ColorSelector};
pub use error::{Error, Result};
pub use file::{BcsFile, Body, BoneScale};
pub use part::{rebase_file_name, Part, PartKind, PartSet};
