//! Three-character mod entry codes.

use std::fmt;

use rand::Rng;

use crate::game::GameData;
use crate::{ConvertError, Result};

const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const RANDOM_ATTEMPTS: usize = 256;

/// A validated entry code: exactly three characters from `A-Z0-9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryCode([u8; 3]);

impl EntryCode {
    /// Length of every code.
    pub const LEN: usize = 3;

    /// Parse a code, checking its shape only.
    pub fn parse(code: &str) -> Result<Self> {
        let invalid = |reason| ConvertError::InvalidEntryCode {
            code: code.to_string(),
            reason,
        };

        let bytes: [u8; Self::LEN] = code
            .as_bytes()
            .try_into()
            .map_err(|_| invalid("must be exactly three characters"))?;

        if !bytes.iter().all(|b| ALPHABET.contains(b)) {
            return Err(invalid("only A-Z and 0-9 are allowed"));
        }

        Ok(Self(bytes))
    }

    /// Parse a code and check it is not taken by the game or another mod.
    pub fn parse_free<G: GameData + ?Sized>(code: &str, game: &G) -> Result<Self> {
        let parsed = Self::parse(code)?;
        if game.is_reserved_code(parsed.as_str()) {
            return Err(ConvertError::InvalidEntryCode {
                code: code.to_string(),
                reason: "already used by the game or an installed mod",
            });
        }
        Ok(parsed)
    }

    /// Generate a random code not reserved in `game`.
    pub fn generate<G, R>(game: &G, rng: &mut R) -> Result<Self>
    where
        G: GameData + ?Sized,
        R: Rng,
    {
        for _ in 0..RANDOM_ATTEMPTS {
            let code = Self([
                ALPHABET[rng.random_range(0..ALPHABET.len())],
                ALPHABET[rng.random_range(0..ALPHABET.len())],
                ALPHABET[rng.random_range(0..ALPHABET.len())],
            ]);
            if !game.is_reserved_code(code.as_str()) {
                return Ok(code);
            }
        }

        // Nearly full code space: fall back to the first free code.
        Self::all()
            .find(|code| !game.is_reserved_code(code.as_str()))
            .ok_or_else(|| ConvertError::InvalidEntryCode {
                code: String::new(),
                reason: "no free entry code left",
            })
    }

    /// Generate a code with the thread-local generator.
    pub fn random<G: GameData + ?Sized>(game: &G) -> Result<Self> {
        Self::generate(game, &mut rand::rng())
    }

    fn all() -> impl Iterator<Item = Self> {
        ALPHABET.iter().flat_map(|&a| {
            ALPHABET
                .iter()
                .flat_map(move |&b| ALPHABET.iter().map(move |&c| Self([a, b, c])))
        })
    }

    /// The code as a string slice.
    pub fn as_str(&self) -> &str {
        // Every byte is ASCII, checked on construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for EntryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntryCode {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
