use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

/// A supported reading language.
///
/// The set is closed: every language here has a full template bundle and a
/// localized name for every card and spread position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English. Card names in this language are the canonical names.
    #[default]
    #[serde(rename = "en")]
    English,
    /// German.
    #[serde(rename = "de")]
    German,
}

impl Language {
    /// Every supported language, in declaration order.
    pub const ALL: [Language; 2] = [Language::English, Language::German];

    /// The BCP 47 primary tag for this language.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::German => "de",
        }
    }

    /// Parse a language tag such as `en`, `de-AT`, or `German`.
    pub fn from_tag(tag: &str) -> DeckResult<Self> {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match primary.as_str() {
            "en" | "english" => Ok(Self::English),
            "de" | "german" | "deutsch" => Ok(Self::German),
            _ => Err(DeckError::UnsupportedLanguage(tag.to_string())),
        }
    }

    /// Parse a language tag, falling back to English when it is not supported.
    pub fn from_tag_or_default(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or_else(|e| {
            tracing::warn!("{e}, falling back to {}", Self::default());
            Self::default()
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Language {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s)
    }
}

/// Text with one variant per supported language.
///
/// The English variant is required. A missing German variant falls back to
/// the English text, so decks authored in English alone still load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    /// English text.
    pub en: String,
    /// German text.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub de: String,
}

impl Localized {
    /// Create localized text from an English and a German variant.
    pub fn new(en: impl Into<String>, de: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            de: de.into(),
        }
    }

    /// The text in the given language.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.en,
            Language::German if self.de.is_empty() => &self.en,
            Language::German => &self.de,
        }
    }

    /// Iterate over every non-empty variant.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        [self.en.as_str(), self.de.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
    }
}
