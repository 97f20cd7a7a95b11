//! Mod GUID type - the identity embedded in a mod package.
//!
//! The host engine uses this 16-byte value to recognize a re-exported mod as
//! an update of an already installed one instead of a new mod.

use std::fmt;
use std::ops::{BitXor, BitXorAssign};
use std::str::FromStr;

use crate::Error;

/// A 16-byte mod package identity.
///
/// Format: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, lowercase hex, bytes in
/// storage order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModGuid {
    bytes: [u8; 16],
}

impl ModGuid {
    /// Empty GUID (all zeros).
    pub const EMPTY: Self = Self { bytes: [0; 16] };

    /// Create a new ModGuid from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Get the raw bytes of the GUID.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    /// Check if the GUID is empty (all zeros).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes == [0; 16]
    }
}

impl BitXor for ModGuid {
    type Output = Self;

    fn bitxor(mut self, rhs: Self) -> Self::Output {
        self ^= rhs;
        self
    }
}

impl BitXorAssign for ModGuid {
    fn bitxor_assign(&mut self, rhs: Self) {
        for (a, b) in self.bytes.iter_mut().zip(rhs.bytes) {
            *a ^= b;
        }
    }
}

impl fmt::Debug for ModGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModGuid({})", self)
    }
}

impl fmt::Display for ModGuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if matches!(i, 4 | 6 | 8 | 10) {
                f.write_str("-")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for ModGuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 36 {
            return Err(Error::InvalidGuid(format!(
                "expected 36 characters, got {}",
                s.len()
            )));
        }

        let raw = s.as_bytes();
        if raw[8] != b'-' || raw[13] != b'-' || raw[18] != b'-' || raw[23] != b'-' {
            return Err(Error::InvalidGuid("invalid hyphen positions".into()));
        }

        let hex: Vec<u8> = raw.iter().copied().filter(|&c| c != b'-').collect();
        if hex.len() != 32 {
            return Err(Error::InvalidGuid("unexpected hyphen".into()));
        }

        let mut bytes = [0u8; 16];
        for (i, pair) in hex.chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(pair)
                .map_err(|_| Error::InvalidGuid(format!("invalid hex at byte {}", i)))?;
            bytes[i] = u8::from_str_radix(pair, 16)
                .map_err(|_| Error::InvalidGuid(format!("invalid hex at byte {}", i)))?;
        }

        Ok(Self { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_guid() {
        let guid = ModGuid::EMPTY;
        assert!(guid.is_empty());
        assert_eq!(guid.to_string(), "00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_display_byte_order() {
        let guid = ModGuid::from_bytes([
            0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x10, 0x32, 0x54, 0x76, 0x98, 0xba,
            0xdc, 0xfe,
        ]);
        assert_eq!(guid.to_string(), "01234567-89ab-cdef-1032-547698badcfe");
    }

    #[test]
    fn test_roundtrip() {
        let original = "12345678-abcd-ef01-2345-6789abcdef01";
        let guid: ModGuid = original.parse().unwrap();
        assert_eq!(guid.to_string(), original);
    }

    #[test]
    fn test_xor_is_self_inverse() {
        let a = ModGuid::from_bytes([0x5a; 16]);
        let b = ModGuid::from_bytes([0x0f; 16]);
        assert_eq!((a ^ b) ^ b, a);
        assert!((a ^ a).is_empty());
    }

    #[test]
    fn test_invalid_length() {
        assert!("too-short".parse::<ModGuid>().is_err());
    }

    #[test]
    fn test_invalid_hyphens() {
        assert!("12345678_abcd-ef01-2345-6789abcdef01".parse::<ModGuid>().is_err());
    }

    #[test]
    fn test_invalid_hex() {
        assert!("1234567g-abcd-ef01-2345-6789abcdef01".parse::<ModGuid>().is_err());
    }
}
