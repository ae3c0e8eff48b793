use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::card::{Card, CardKey};
use crate::error::{DeckError, DeckResult};

/// The bundled Rider-Waite deck (English and German).
const STANDARD_DECK: &str = include_str!("../data/deck.json");

/// Minimum similarity score for fuzzy name suggestions (0.0-1.0).
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// On-disk layout of a deck file.
#[derive(Debug, Serialize, Deserialize)]
struct DeckFile {
    cards: Vec<Card>,
}

/// An immutable, validated set of cards.
///
/// Every relationship entry in a loaded deck is a canonical key of another
/// card in the same deck.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    index: HashMap<CardKey, usize>,
}

/// How a relationship entry resolved against the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Resolution {
    Found(CardKey),
    Ambiguous(Vec<CardKey>),
    Missing,
}

impl Deck {
    /// Load the bundled 78-card deck.
    pub fn standard() -> DeckResult<Self> {
        Self::from_json(STANDARD_DECK)
    }

    /// Load a deck from its JSON representation.
    ///
    /// Relationship entries that are not canonical keys are normalized here
    /// (see [`Deck::from_cards`]).
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let file: DeckFile = serde_json::from_str(json)?;
        Self::from_cards(file.cards)
    }

    /// Build a deck from card definitions.
    ///
    /// Older deck files list relationships by display name, sometimes in the
    /// localized form `"Der Narr (The Fool)"`. Each entry that is not already
    /// a canonical key is resolved, in order, by name equality in any
    /// language, by the trailing parenthetical, and finally by containment of
    /// exactly one canonical name. Anything else is an error.
    pub fn from_cards(mut cards: Vec<Card>) -> DeckResult<Self> {
        let mut index = HashMap::with_capacity(cards.len());
        let mut ids = HashSet::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.key.clone(), i).is_some() || !ids.insert(card.id) {
                return Err(DeckError::DuplicateCard(card.key.to_string()));
            }
        }

        let normalized = cards
            .iter()
            .map(|card| {
                let supports = normalize_list(&cards, &card.key, &card.relationships.supports)?;
                let challenges =
                    normalize_list(&cards, &card.key, &card.relationships.challenges)?;
                Ok((supports, challenges))
            })
            .collect::<DeckResult<Vec<_>>>()?;

        let mut rewritten = 0usize;
        for (card, (supports, challenges)) in cards.iter_mut().zip(normalized) {
            rewritten += count_changes(&card.relationships.supports, &supports);
            rewritten += count_changes(&card.relationships.challenges, &challenges);
            card.relationships.supports = supports;
            card.relationships.challenges = challenges;
        }
        if rewritten > 0 {
            tracing::warn!(
                rewritten,
                "deck lists relationships by name; normalized to canonical keys"
            );
        }

        tracing::debug!(cards = cards.len(), "deck loaded");
        Ok(Self { cards, index })
    }

    /// All cards in deck order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns true if the deck has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Look up a card by canonical key.
    pub fn get(&self, key: &CardKey) -> Option<&Card> {
        self.index.get(key).map(|&i| &self.cards[i])
    }

    /// Look up a card by numeric id.
    pub fn by_id(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Find a card by key or by name in any language (case-insensitive).
    pub fn find(&self, query: &str) -> Option<&Card> {
        let query = query.trim().to_lowercase();
        self.cards.iter().find(|c| {
            c.key.as_str() == query || c.name.variants().any(|n| n.to_lowercase() == query)
        })
    }

    /// Find a card or fail with [`DeckError::CardNotFound`].
    pub fn require(&self, query: &str) -> DeckResult<&Card> {
        self.find(query)
            .ok_or_else(|| DeckError::CardNotFound(query.to_string()))
    }

    /// Suggest cards whose key or name resembles `partial`, best first.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<&Card> {
        let partial = partial.trim().to_lowercase();
        let mut scored: Vec<(&Card, f64)> = self
            .cards
            .iter()
            .filter_map(|card| {
                let score = std::iter::once(card.key.as_str().to_string())
                    .chain(card.name.variants().map(str::to_lowercase))
                    .map(|name| {
                        if name.starts_with(&partial) {
                            2.0
                        } else if name.contains(&partial) {
                            1.0
                        } else {
                            jaro_winkler(&partial, &name)
                        }
                    })
                    .fold(0.0, f64::max);
                (score >= SUGGESTION_THRESHOLD).then_some((card, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.into_iter().take(limit).map(|(c, _)| c).collect()
    }
}

fn normalize_list(
    cards: &[Card],
    owner: &CardKey,
    entries: &[CardKey],
) -> DeckResult<Vec<CardKey>> {
    entries
        .iter()
        .map(|entry| match resolve_reference(cards, entry.as_str()) {
            Resolution::Found(key) => Ok(key),
            Resolution::Ambiguous(candidates) => Err(DeckError::AmbiguousReference {
                card: owner.clone(),
                reference: entry.to_string(),
                candidates,
            }),
            Resolution::Missing => Err(DeckError::UnresolvedReference {
                card: owner.clone(),
                reference: entry.to_string(),
            }),
        })
        .collect()
}

fn count_changes(before: &[CardKey], after: &[CardKey]) -> usize {
    before.iter().zip(after).filter(|(a, b)| a != b).count()
}

/// Resolve a relationship entry to a canonical key.
fn resolve_reference(cards: &[Card], reference: &str) -> Resolution {
    let needle = reference.trim().to_lowercase();

    if let Some(card) = cards.iter().find(|c| c.key.as_str() == needle) {
        return Resolution::Found(card.key.clone());
    }

    if let Some(card) = find_by_name(cards, &needle) {
        return Resolution::Found(card.key.clone());
    }

    let by_parenthetical = trailing_parenthetical(&needle).and_then(|inner| {
        cards
            .iter()
            .find(|c| c.key.as_str() == inner)
            .or_else(|| find_by_name(cards, inner))
    });
    if let Some(card) = by_parenthetical {
        return Resolution::Found(card.key.clone());
    }

    let contained: Vec<CardKey> = cards
        .iter()
        .filter(|c| needle.contains(&c.canonical_name().to_lowercase()))
        .map(|c| c.key.clone())
        .collect();
    match contained.len() {
        0 => Resolution::Missing,
        1 => Resolution::Found(contained[0].clone()),
        _ => Resolution::Ambiguous(contained),
    }
}

fn find_by_name<'a>(cards: &'a [Card], lowered: &str) -> Option<&'a Card> {
    cards
        .iter()
        .find(|c| c.name.variants().any(|n| n.to_lowercase() == lowered))
}

/// Extract `inner` from `"outer (inner)"`.
fn trailing_parenthetical(s: &str) -> Option<&str> {
    let body = s.strip_suffix(')')?;
    let open = body.rfind('(')?;
    let inner = body[open + 1..].trim();
    (!inner.is_empty()).then_some(inner)
}
