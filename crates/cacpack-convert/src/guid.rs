//! Package identity derivation.

use cacpack_common::hash::{guid_of_str, guid_of_u64};
use cacpack_common::ModGuid;

use crate::Race;

/// How the package identity is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuidMode {
    /// No identity; the engine assigns one on install.
    #[default]
    None,
    /// md5(name).
    Name,
    /// md5(name) ^ md5(race code).
    NameRace,
    /// md5(name) ^ md5(race code) ^ md5(account id, little-endian).
    NameRaceAccount(u64),
}

impl GuidMode {
    /// Derive the identity of a character, if the mode embeds one.
    pub fn assign(&self, name: &str, race: Race) -> Option<ModGuid> {
        match *self {
            GuidMode::None => None,
            GuidMode::Name => Some(guid_of_str(name)),
            GuidMode::NameRace => Some(guid_of_str(name) ^ guid_of_str(race.code())),
            GuidMode::NameRaceAccount(account) => {
                Some(guid_of_str(name) ^ guid_of_str(race.code()) ^ guid_of_u64(account))
            }
        }
    }
}
