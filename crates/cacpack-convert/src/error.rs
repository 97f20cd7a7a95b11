//! Conversion errors.
//!
//! Every error aborts the whole conversion; no package is written.

use thiserror::Error;

/// Why a conversion failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The record's race value is outside the eight playable races.
    #[error("unsupported race: {0}")]
    UnsupportedRace(u32),

    /// A base resource for the resolved race cannot be located.
    #[error("template missing for {race}: {what}")]
    TemplateMissing { race: &'static str, what: String },

    /// An index has no entry in its lookup table.
    #[error("mapping failure: {0}")]
    MappingFailure(String),

    /// The caller selected no presets.
    #[error("no presets selected")]
    NoPresetsSelected,

    /// The entry code is malformed or reserved.
    #[error("invalid entry code {code:?}: {reason}")]
    InvalidEntryCode { code: String, reason: &'static str },

    /// Reading a template or writing the package failed.
    #[error("I/O failure: {0}")]
    IoFailure(String),
}

impl ConvertError {
    pub(crate) fn mapping(msg: impl Into<String>) -> Self {
        ConvertError::MappingFailure(msg.into())
    }

    pub(crate) fn template(race: &'static str, what: impl Into<String>) -> Self {
        ConvertError::TemplateMissing {
            race,
            what: what.into(),
        }
    }
}

impl From<std::io::Error> for ConvertError {
    fn from(e: std::io::Error) -> Self {
        ConvertError::IoFailure(e.to_string())
    }
}

impl From<serde_json::Error> for ConvertError {
    fn from(e: serde_json::Error) -> Self {
        ConvertError::IoFailure(e.to_string())
    }
}

impl From<cacpack_bcs::Error> for ConvertError {
    fn from(e: cacpack_bcs::Error) -> Self {
        match e {
            cacpack_bcs::Error::Xml(_) => ConvertError::IoFailure(e.to_string()),
            _ => ConvertError::MappingFailure(e.to_string()),
        }
    }
}

impl From<cacpack_x2m::Error> for ConvertError {
    fn from(e: cacpack_x2m::Error) -> Self {
        ConvertError::IoFailure(e.to_string())
    }
}

/// Result type for conversions.
pub type Result<T> = std::result::Result<T, ConvertError>;
