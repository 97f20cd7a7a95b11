//! Hashing utilities.
//!
//! MD5 provides the fixed 16-byte digests mod identities are built from.
//! CRC32C (Castagnoli) checksums every file stored in a package.

use md5::{Digest, Md5};

use crate::ModGuid;

/// Compute the MD5 digest of a byte slice.
#[inline]
pub fn md5_bytes(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

/// Compute the MD5 digest of a string, encoded as UTF-8.
#[inline]
pub fn md5_str(s: &str) -> [u8; 16] {
    md5_bytes(s.as_bytes())
}

/// MD5 digest of a string as a [`ModGuid`].
#[inline]
pub fn guid_of_str(s: &str) -> ModGuid {
    ModGuid::from_bytes(md5_str(s))
}

/// MD5 digest of a 64-bit value, hashed as its little-endian bytes.
#[inline]
pub fn guid_of_u64(value: u64) -> ModGuid {
    ModGuid::from_bytes(md5_bytes(&value.to_le_bytes()))
}

/// Compute the CRC32C checksum of a byte slice.
///
/// Uses hardware acceleration when available (SSE4.2 on x86).
#[inline]
pub fn crc32c(data: &[u8]) -> u32 {
    crc32c::crc32c(data)
}
