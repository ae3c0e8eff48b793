use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::language::{Language, Localized};

/// Canonical identity of a card, e.g. `the-fool` or `three-of-cups`.
///
/// Relationship lists store these keys instead of display names, so matching
/// never depends on the active language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardKey(pub String);

impl CardKey {
    /// Create a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Major or minor arcana.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arcana {
    /// One of the 22 trump cards.
    Major,
    /// One of the 56 suited cards.
    Minor,
}

/// The four minor-arcana suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    /// Fire: energy, ambition, creativity.
    Wands,
    /// Water: emotions, relationships, intuition.
    Cups,
    /// Air: thought, conflict, truth.
    Swords,
    /// Earth: work, money, the material world.
    Pentacles,
}

impl Suit {
    /// Every suit, in traditional order.
    pub const ALL: [Suit; 4] = [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wands => write!(f, "wands"),
            Self::Cups => write!(f, "cups"),
            Self::Swords => write!(f, "swords"),
            Self::Pentacles => write!(f, "pentacles"),
        }
    }
}

/// Life domains a meaning can speak to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Career and finances.
    Work,
    /// Romance and relationships.
    Love,
    /// Body and wellbeing.
    Health,
    /// Inner life and growth.
    Spirituality,
}

impl Domain {
    /// Every domain, in display order.
    pub const ALL: [Domain; 4] = [
        Domain::Work,
        Domain::Love,
        Domain::Health,
        Domain::Spirituality,
    ];
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Work => write!(f, "work"),
            Self::Love => write!(f, "love"),
            Self::Health => write!(f, "health"),
            Self::Spirituality => write!(f, "spirituality"),
        }
    }
}

/// What a card means in one orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meaning {
    /// Short summary, scanned for energy keywords.
    pub summary: Localized,
    /// Reading for career and finances.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Localized>,
    /// Reading for romance and relationships.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub love: Option<Localized>,
    /// Reading for body and wellbeing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Localized>,
    /// Reading for inner life and growth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spirituality: Option<Localized>,
}

impl Meaning {
    /// The text for a single domain, if the deck provides one.
    pub fn domain(&self, domain: Domain) -> Option<&Localized> {
        match domain {
            Domain::Work => self.work.as_ref(),
            Domain::Love => self.love.as_ref(),
            Domain::Health => self.health.as_ref(),
            Domain::Spirituality => self.spirituality.as_ref(),
        }
    }
}

/// Cards this card supports and cards it challenges, by canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationships {
    /// Cards whose energy this card reinforces.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supports: Vec<CardKey>,
    /// Cards whose energy this card works against.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<CardKey>,
}

/// A card definition from the reference deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Numeric id, 0-21 for the majors in the bundled deck.
    pub id: u32,
    /// Canonical key.
    pub key: CardKey,
    /// Display names. The English name is the canonical name.
    pub name: Localized,
    /// Major or minor arcana.
    pub arcana: Arcana,
    /// Suit, for minor arcana only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suit: Option<Suit>,
    /// Ordered keywords, e.g. `["new beginnings", "innocence"]`.
    pub keywords: Vec<String>,
    /// Meaning when drawn upright.
    pub upright: Meaning,
    /// Meaning when drawn reversed.
    pub reversed: Meaning,
    /// Named relationships to other cards.
    #[serde(default)]
    pub relationships: Relationships,
}

impl Card {
    /// The canonical (English) name.
    pub fn canonical_name(&self) -> &str {
        &self.name.en
    }

    /// The name shown to readers of the given language.
    pub fn display_name(&self, language: Language) -> &str {
        self.name.get(language)
    }

    /// The meaning record for an orientation.
    pub fn meaning(&self, reversed: bool) -> &Meaning {
        if reversed {
            &self.reversed
        } else {
            &self.upright
        }
    }

    /// Returns true for major arcana.
    pub fn is_major(&self) -> bool {
        self.arcana == Arcana::Major
    }

    /// Returns true for King, Queen, Knight, and Page cards.
    pub fn is_court(&self) -> bool {
        self.canonical_name()
            .split_whitespace()
            .any(|word| matches!(word, "King" | "Queen" | "Knight" | "Page"))
    }

    /// Returns true if this card's support list names `other`.
    pub fn supports(&self, other: &CardKey) -> bool {
        self.relationships.supports.contains(other)
    }

    /// Returns true if this card's challenge list names `other`.
    pub fn challenges(&self, other: &CardKey) -> bool {
        self.relationships.challenges.contains(other)
    }

    /// Distinct lowercase words across all keywords.
    pub fn keyword_tokens(&self) -> BTreeSet<String> {
        self.keywords
            .iter()
            .flat_map(|k| k.split_whitespace())
            .map(str::to_lowercase)
            .collect()
    }
}
