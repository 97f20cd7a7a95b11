//! Error types for BCS lookups.

use thiserror::Error;

use crate::PartKind;

/// Errors that can occur when working with BCS data.
#[derive(Debug, Error)]
pub enum Error {
    /// A part set id has no entry.
    #[error("part set {0} not found")]
    PartSetNotFound(u16),

    /// A part set exists but has no part of the requested kind.
    #[error("part set {set} has no {kind} part")]
    PartNotFound { set: u16, kind: PartKind },

    /// A color selector references a group the color table does not have.
    #[error("color group {0} not found")]
    ColorGroupNotFound(u16),

    /// A color value lies outside its group's palette.
    #[error("color {color} out of range for group {group} ({len} entries)")]
    ColorOutOfRange { group: String, color: u16, len: usize },

    /// A body shape index has no entry.
    #[error("body shape {0} not found")]
    BodyNotFound(u8),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Result type for BCS operations.
pub type Result<T> = std::result::Result<T, Error>;
