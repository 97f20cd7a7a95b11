//! Languages the game ships localized text for.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported game language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Ca,
    Fr,
    De,
    It,
    Pt,
    Pl,
    Ru,
    Tw,
    Zh,
    Kr,
}

impl Language {
    /// All languages in game order.
    pub const ALL: [Language; 12] = [
        Language::En,
        Language::Es,
        Language::Ca,
        Language::Fr,
        Language::De,
        Language::It,
        Language::Pt,
        Language::Pl,
        Language::Ru,
        Language::Tw,
        Language::Zh,
        Language::Kr,
    ];

    /// Two-letter code used in manifests.
    pub const fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Ca => "ca",
            Language::Fr => "fr",
            Language::De => "de",
            Language::It => "it",
            Language::Pt => "pt",
            Language::Pl => "pl",
            Language::Ru => "ru",
            Language::Tw => "tw",
            Language::Zh => "zh",
            Language::Kr => "kr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
