//! Playable races.

use std::fmt;

use crate::ConvertError;

/// The eight playable Create-a-Character races.
///
/// Raw save values map in declaration order, `0` being [`Race::Hum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Race {
    /// Human, male.
    Hum,
    /// Human, female.
    Huf,
    /// Saiyan, male.
    Sym,
    /// Saiyan, female.
    Syf,
    /// Namekian.
    Nmc,
    /// Frieza race.
    Fri,
    /// Majin, male.
    Mam,
    /// Majin, female.
    Maf,
}

impl Race {
    /// All races in save order.
    pub const ALL: [Race; 8] = [
        Race::Hum,
        Race::Huf,
        Race::Sym,
        Race::Syf,
        Race::Nmc,
        Race::Fri,
        Race::Mam,
        Race::Maf,
    ];

    /// Resolve a raw save value.
    pub fn resolve(raw: u32) -> Result<Self, ConvertError> {
        Self::ALL
            .get(raw as usize)
            .copied()
            .ok_or(ConvertError::UnsupportedRace(raw))
    }

    /// The canonical three-character code.
    pub const fn code(&self) -> &'static str {
        match self {
            Race::Hum => "HUM",
            Race::Huf => "HUF",
            Race::Sym => "SYM",
            Race::Syf => "SYF",
            Race::Nmc => "NMC",
            Race::Fri => "FRI",
            Race::Mam => "MAM",
            Race::Maf => "MAF",
        }
    }

    /// Whether the race transforms through the default chain.
    ///
    /// Gates both copying the chain's part sets and the third-stage
    /// skeleton fix-up.
    pub const fn has_default_transform_chain(&self) -> bool {
        match self {
            Race::Hum | Race::Huf | Race::Sym | Race::Syf => true,
            Race::Nmc | Race::Fri | Race::Mam | Race::Maf => false,
        }
    }
}

impl TryFrom<u32> for Race {
    type Error = ConvertError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::resolve(value)
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_codes() {
        let codes: Vec<_> = (0..8).map(|r| Race::resolve(r).unwrap().code()).collect();
        assert_eq!(codes, ["HUM", "HUF", "SYM", "SYF", "NMC", "FRI", "MAM", "MAF"]);
    }

    #[test]
    fn test_unsupported_race() {
        assert!(matches!(Race::resolve(8), Err(ConvertError::UnsupportedRace(8))));
        assert!(matches!(
            Race::try_from(u32::MAX),
            Err(ConvertError::UnsupportedRace(u32::MAX))
        ));
    }

    #[test]
    fn test_default_chain_capability() {
        let with_chain: Vec<_> = Race::ALL
            .iter()
            .filter(|r| r.has_default_transform_chain())
            .map(Race::code)
            .collect();
        assert_eq!(with_chain, ["HUM", "HUF", "SYM", "SYF"]);
    }
}
