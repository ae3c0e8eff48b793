//! Per-language template bundles.
//!
//! Every supported language ships one JSON bundle with the same key set. A
//! bundle is loaded once and passed into the engine; nothing in the engine
//! branches on the language itself.

use serde::{Deserialize, Serialize};

use kl_core::{Language, Suit};

use crate::error::{ReadingError, ReadingResult};
use crate::interaction::Classification;
use crate::theme::Energy;

const ENGLISH: &str = include_str!("../bundles/en.json");
const GERMAN: &str = include_str!("../bundles/de.json");

/// Substitute `{name}` placeholders in a template.
///
/// Placeholders without a matching value are left as they are.
pub fn render(template: &str, values: &[(&str, &str)]) -> String {
    values
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

/// One text per overall energy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyTemplates {
    /// Positive energy.
    pub positive: String,
    /// Negative energy.
    pub negative: String,
    /// Neutral energy.
    pub neutral: String,
    /// Mixed energy.
    pub mixed: String,
}

impl EnergyTemplates {
    /// The template for an energy.
    pub fn get(&self, energy: Energy) -> &str {
        match energy {
            Energy::Positive => &self.positive,
            Energy::Negative => &self.negative,
            Energy::Neutral => &self.neutral,
            Energy::Mixed => &self.mixed,
        }
    }
}

/// One text per suit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuitTemplates {
    /// Wands.
    pub wands: String,
    /// Cups.
    pub cups: String,
    /// Swords.
    pub swords: String,
    /// Pentacles.
    pub pentacles: String,
}

impl SuitTemplates {
    /// The template for a suit.
    pub fn get(&self, suit: Suit) -> &str {
        match suit {
            Suit::Wands => &self.wands,
            Suit::Cups => &self.cups,
            Suit::Swords => &self.swords,
            Suit::Pentacles => &self.pentacles,
        }
    }
}

/// Words whose presence in a meaning summary shifts the reading's energy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnergyKeywords {
    /// Uplifting words.
    pub positive: Vec<String>,
    /// Heavy words.
    pub negative: Vec<String>,
}

/// Interpretation lines for card pairs, keyed by classification.
///
/// Placeholders: `{first}`, `{second}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InteractionTemplates {
    /// Supporting pair.
    pub supporting: String,
    /// Challenging pair.
    pub challenging: String,
    /// Same-suit pair.
    pub complementary: String,
    /// Opposite orientations with shared keywords.
    pub contradicting: String,
    /// No particular relationship.
    pub neutral: String,
}

impl InteractionTemplates {
    /// The template for a classification.
    pub fn get(&self, classification: Classification) -> &str {
        match classification {
            Classification::Supporting => &self.supporting,
            Classification::Challenging => &self.challenging,
            Classification::Complementary => &self.complementary,
            Classification::Contradicting => &self.contradicting,
            Classification::Neutral => &self.neutral,
        }
    }
}

/// Theme phrases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeTemplates {
    /// Primary theme when the majors dominate.
    pub major_heavy: String,
    /// Primary theme without a dominant suit.
    pub balanced: String,
    /// Primary theme for each dominant suit.
    pub suit: SuitTemplates,
    /// Secondary theme: relationships.
    pub relationships: String,
    /// Secondary theme: career.
    pub career: String,
}

/// Opening lines. Placeholders: `{theme}`, and `{question}` in `question`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningTemplates {
    /// Positive energy.
    pub positive: String,
    /// Negative energy.
    pub negative: String,
    /// Neutral energy.
    pub neutral: String,
    /// Mixed energy.
    pub mixed: String,
    /// Clause appended when the reader asked a question.
    pub question: String,
}

impl OpeningTemplates {
    /// The opening for an energy.
    pub fn get(&self, energy: Energy) -> &str {
        match energy {
            Energy::Positive => &self.positive,
            Energy::Negative => &self.negative,
            Energy::Neutral => &self.neutral,
            Energy::Mixed => &self.mixed,
        }
    }
}

/// Body paragraphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyTemplates {
    /// Dominant-suit paragraph.
    pub suit: SuitTemplates,
    /// Major-arcana paragraph. Placeholder: `{count}`.
    pub major: String,
    /// More supporting than challenging cards. Placeholder: `{cards}`.
    pub more_supporting: String,
    /// More challenging than supporting cards. Placeholder: `{cards}`.
    pub more_challenging: String,
    /// As many supporting as challenging cards.
    pub balanced_dynamics: String,
    /// Appended to a card list that was cut short.
    pub and_others: String,
    /// Strongest pair. Placeholders: `{first}`, `{second}`, `{interpretation}`.
    pub top_interaction: String,
}

/// Advice sentences. Each carries its own trailing space where needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdviceTemplates {
    /// Names the first supporting card. Placeholder: `{card}`.
    pub supporting: String,
    /// Names the first challenging card. Placeholder: `{card}`.
    pub challenging: String,
    /// Closing sentence, always present.
    pub mirror: String,
}

/// Every piece of text the engine produces, for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateBundle {
    /// The language of every string in this bundle.
    pub language: Language,
    /// Separator between narrated segments.
    pub pause_marker: String,
    /// Polarity words scanned in meaning summaries.
    pub energy_keywords: EnergyKeywords,
    /// Words that mark a forward-looking spread position.
    pub outcome_markers: Vec<String>,
    /// Pair interpretations.
    pub interaction: InteractionTemplates,
    /// Theme phrases.
    pub themes: ThemeTemplates,
    /// Opening lines.
    pub opening: OpeningTemplates,
    /// Body paragraphs.
    pub body: BodyTemplates,
    /// Closing lines.
    pub conclusion: EnergyTemplates,
    /// Advice sentences.
    pub advice: AdviceTemplates,
}

impl TemplateBundle {
    /// Load the bundled templates for a language.
    pub fn load(language: Language) -> ReadingResult<Self> {
        let json = match language {
            Language::English => ENGLISH,
            Language::German => GERMAN,
        };
        let bundle = Self::from_json(json)?;
        if bundle.language != language {
            return Err(ReadingError::BundleLanguageMismatch {
                expected: language,
                found: bundle.language,
            });
        }
        tracing::debug!(%language, "template bundle loaded");
        Ok(bundle)
    }

    /// Parse a bundle from JSON. Unknown or missing keys are errors.
    pub fn from_json(json: &str) -> ReadingResult<Self> {
        serde_json::from_str(json).map_err(ReadingError::Bundle)
    }
}
