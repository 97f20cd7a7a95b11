//! Common utilities for cacpack.
//!
//! This crate provides foundational types used across all cacpack crates:
//!
//! - [`ModGuid`] - 16-byte mod package identity
//! - [`hash`] - MD5 digests for identities and CRC32C checksums for stored files

mod error;
mod guid;

pub mod hash;

pub use error::{Error, Result};
pub use guid::ModGuid;
