//! Error types for cacpack-common.

use thiserror::Error;

/// Common error type for cacpack operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid GUID format.
    #[error("invalid GUID format: {0}")]
    InvalidGuid(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
