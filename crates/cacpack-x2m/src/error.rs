//! Error types for package assembly and writing.

use thiserror::Error;

/// Errors that can occur when building or writing a package.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP container error.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML serialization error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Part-set table error.
    #[error("{0}")]
    Bcs(#[from] cacpack_bcs::Error),

    /// Two different files were staged under the same archive path.
    #[error("duplicate package entry: {0}")]
    DuplicateEntry(String),
}

/// Result type for package operations.
pub type Result<T> = std::result::Result<T, Error>;
