use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};
use crate::language::Localized;

/// The bundled spread layouts.
const STANDARD_SPREADS: &str = include_str!("../data/spreads.json");

/// A single named slot within a spread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based position number.
    pub number: usize,
    /// Localized position name, e.g. "Past" / "Vergangenheit".
    pub name: Localized,
    /// What the position represents.
    #[serde(default)]
    pub description: Localized,
}

/// A named layout defining how many cards are drawn and what each means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spread {
    /// Stable key, e.g. `celtic-cross`.
    pub key: String,
    /// Localized spread name.
    pub name: Localized,
    /// Localized description.
    #[serde(default)]
    pub description: Localized,
    /// Number of cards drawn.
    pub card_count: usize,
    /// Positions in layout order.
    pub positions: Vec<Position>,
}

impl Spread {
    /// The position with the given 1-based number.
    pub fn position(&self, number: usize) -> Option<&Position> {
        self.positions.iter().find(|p| p.number == number)
    }

    /// Check that the declared count matches the positions and that
    /// positions are numbered `1..=card_count`.
    pub fn validate(&self) -> DeckResult<()> {
        if self.card_count != self.positions.len() || self.card_count == 0 {
            return Err(DeckError::SpreadCountMismatch {
                spread: self.key.clone(),
                declared: self.card_count,
                positions: self.positions.len(),
            });
        }
        let numbers: HashSet<usize> = self.positions.iter().map(|p| p.number).collect();
        if numbers.len() != self.card_count || !(1..=self.card_count).all(|n| numbers.contains(&n))
        {
            return Err(DeckError::InvalidSpread {
                spread: self.key.clone(),
                card_count: self.card_count,
            });
        }
        Ok(())
    }
}

/// On-disk layout of a spreads file.
#[derive(Debug, Serialize, Deserialize)]
struct SpreadFile {
    spreads: Vec<Spread>,
}

/// A validated, ordered collection of spreads.
#[derive(Debug, Clone)]
pub struct SpreadCatalog {
    spreads: Vec<Spread>,
}

impl SpreadCatalog {
    /// Load the bundled spreads.
    pub fn standard() -> DeckResult<Self> {
        Self::from_json(STANDARD_SPREADS)
    }

    /// Load spreads from their JSON representation.
    pub fn from_json(json: &str) -> DeckResult<Self> {
        let file: SpreadFile = serde_json::from_str(json)?;
        Self::new(file.spreads)
    }

    /// Build a catalog, validating every spread.
    pub fn new(spreads: Vec<Spread>) -> DeckResult<Self> {
        let mut keys = HashSet::new();
        for spread in &spreads {
            spread.validate()?;
            if !keys.insert(spread.key.as_str()) {
                return Err(DeckError::DuplicateSpread(spread.key.clone()));
            }
        }
        tracing::debug!(spreads = spreads.len(), "spreads loaded");
        Ok(Self { spreads })
    }

    /// Look up a spread by key.
    pub fn get(&self, key: &str) -> DeckResult<&Spread> {
        self.spreads
            .iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
            .ok_or_else(|| DeckError::SpreadNotFound(key.to_string()))
    }

    /// Iterate over spreads in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Spread> {
        self.spreads.iter()
    }

    /// Number of spreads.
    pub fn len(&self) -> usize {
        self.spreads.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.spreads.is_empty()
    }
}
