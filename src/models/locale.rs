use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
    Fr,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ar, Locale::Fr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Fr => "fr",
        }
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.as_str())
    }
}

/// Text keyed by locale. English is always present; the push providers
/// fall back to it for devices in any other language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
}

impl LocalizedText {
    pub fn translated(en: impl Into<String>, ar: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ar: Some(ar.into()),
            fr: Some(fr.into()),
        }
    }

    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::En => Some(self.en.as_str()),
            Locale::Ar => self.ar.as_deref(),
            Locale::Fr => self.fr.as_deref(),
        }
    }

    /// Text for `locale`, or the English text when that locale is missing.
    pub fn get_or_english(&self, locale: Locale) -> &str {
        self.get(locale).unwrap_or(&self.en)
    }
}
