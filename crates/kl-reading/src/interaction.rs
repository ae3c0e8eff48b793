//! Pairwise card interactions.
//!
//! Every unordered pair of drawn cards is classified and scored. Only pairs
//! stronger than [`INTERACTION_THRESHOLD`] are kept.

use std::fmt;

use serde::Serialize;

use kl_core::DrawnCard;

use crate::bundle::{TemplateBundle, render};

/// Pairs at or below this strength are dropped.
pub const INTERACTION_THRESHOLD: f64 = 0.3;

/// Strength of an explicit support or challenge relationship.
const RELATIONSHIP_STRENGTH: f64 = 0.9;
/// Floor for two cards of the same suit.
const SAME_SUIT_STRENGTH: f64 = 0.5;
/// Floor for two major arcana.
const MAJOR_PAIR_STRENGTH: f64 = 0.6;
/// Strength of a contradiction, which overrides everything else.
const CONTRADICTION_STRENGTH: f64 = 0.7;
/// Shared keyword words needed for a contradiction.
const CONTRADICTION_OVERLAP: usize = 2;

/// How two cards in a reading relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// One card lists the other as supported.
    Supporting,
    /// One card lists the other as challenged.
    Challenging,
    /// Same suit, no explicit relationship.
    Complementary,
    /// Opposite orientations over shared keywords.
    Contradicting,
    /// Nothing in particular.
    Neutral,
}

impl Classification {
    /// Every classification.
    pub const ALL: [Classification; 5] = [
        Classification::Supporting,
        Classification::Challenging,
        Classification::Complementary,
        Classification::Contradicting,
        Classification::Neutral,
    ];
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supporting => write!(f, "supporting"),
            Self::Challenging => write!(f, "challenging"),
            Self::Complementary => write!(f, "complementary"),
            Self::Contradicting => write!(f, "contradicting"),
            Self::Neutral => write!(f, "neutral"),
        }
    }
}

/// A scored relationship between two drawn cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardInteraction<'a> {
    /// The earlier-drawn card of the pair.
    pub first: DrawnCard<'a>,
    /// The later-drawn card of the pair.
    pub second: DrawnCard<'a>,
    /// How the two relate.
    pub classification: Classification,
    /// Strength in (0.3, 1].
    pub strength: f64,
    /// Rendered interpretation in the bundle's language.
    pub interpretation: String,
}

impl CardInteraction<'_> {
    /// Returns true if `key` is one of the two cards.
    pub fn involves(&self, key: &kl_core::CardKey) -> bool {
        &self.first.card.key == key || &self.second.card.key == key
    }
}

/// Number of distinct keyword words the two cards share.
pub fn keyword_overlap(a: &DrawnCard<'_>, b: &DrawnCard<'_>) -> usize {
    let b_tokens = b.card.keyword_tokens();
    a.card
        .keyword_tokens()
        .iter()
        .filter(|t| b_tokens.contains(*t))
        .count()
}

/// Classify and score one pair.
///
/// Rules apply in order; a contradiction overrides whatever the earlier
/// rules decided, explicit relationships included.
pub fn score_pair(a: &DrawnCard<'_>, b: &DrawnCard<'_>) -> (Classification, f64) {
    let mut classification = Classification::Neutral;
    let mut strength: f64 = 0.0;

    let (ka, kb) = (&a.card.key, &b.card.key);
    if a.card.supports(kb) || b.card.supports(ka) {
        classification = Classification::Supporting;
        strength = RELATIONSHIP_STRENGTH;
    } else if a.card.challenges(kb) || b.card.challenges(ka) {
        classification = Classification::Challenging;
        strength = RELATIONSHIP_STRENGTH;
    }

    if a.card.suit.is_some() && a.card.suit == b.card.suit {
        if classification == Classification::Neutral {
            classification = Classification::Complementary;
        }
        strength = strength.max(SAME_SUIT_STRENGTH);
    }

    if a.card.is_major() && b.card.is_major() {
        strength = strength.max(MAJOR_PAIR_STRENGTH);
    }

    if a.reversed != b.reversed && keyword_overlap(a, b) >= CONTRADICTION_OVERLAP {
        classification = Classification::Contradicting;
        strength = CONTRADICTION_STRENGTH;
    }

    (classification, strength)
}

/// Score every unordered pair and keep those above the threshold.
///
/// The result is sorted by descending strength. The sort is stable, so
/// equally strong pairs keep draw order.
pub fn score_interactions<'a>(
    drawn: &[DrawnCard<'a>],
    bundle: &TemplateBundle,
) -> Vec<CardInteraction<'a>> {
    let language = bundle.language;
    let mut interactions = Vec::new();

    for (i, a) in drawn.iter().enumerate() {
        for b in &drawn[i + 1..] {
            let (classification, strength) = score_pair(a, b);
            if strength <= INTERACTION_THRESHOLD {
                continue;
            }
            let interpretation = render(
                bundle.interaction.get(classification),
                &[("first", a.name(language)), ("second", b.name(language))],
            );
            interactions.push(CardInteraction {
                first: *a,
                second: *b,
                classification,
                strength,
                interpretation,
            });
        }
    }

    interactions.sort_by(|x, y| y.strength.total_cmp(&x.strength));
    interactions
}
