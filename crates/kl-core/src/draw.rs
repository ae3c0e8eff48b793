use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::card::{Card, Meaning};
use crate::deck::Deck;
use crate::error::{DeckError, DeckResult};
use crate::language::Language;
use crate::spread::Spread;

/// A card placed in a spread position during a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawnCard<'a> {
    /// The card definition.
    pub card: &'a Card,
    /// 1-based position in the spread.
    pub position: usize,
    /// Whether the card was drawn upside-down.
    pub reversed: bool,
}

impl<'a> DrawnCard<'a> {
    /// Place a card in a position.
    pub fn new(card: &'a Card, position: usize, reversed: bool) -> Self {
        Self {
            card,
            position,
            reversed,
        }
    }

    /// The meaning for the drawn orientation.
    pub fn meaning(&self) -> &'a Meaning {
        self.card.meaning(self.reversed)
    }

    /// Display name in the given language.
    pub fn name(&self, language: Language) -> &'a str {
        self.card.display_name(language)
    }
}

/// Check that a draw fits its spread.
///
/// The reading engine assumes a non-empty draw with one distinct card per
/// spread position; callers run this before handing a draw to it.
pub fn validate_draw(drawn: &[DrawnCard<'_>], spread: &Spread) -> DeckResult<()> {
    if drawn.is_empty() {
        return Err(DeckError::InvalidDraw("no cards drawn".into()));
    }
    if drawn.len() != spread.card_count {
        return Err(DeckError::InvalidDraw(format!(
            "spread \"{}\" needs {} cards, got {}",
            spread.key,
            spread.card_count,
            drawn.len()
        )));
    }

    let mut positions = HashSet::new();
    let mut cards = HashSet::new();
    for d in drawn {
        if spread.position(d.position).is_none() {
            return Err(DeckError::InvalidDraw(format!(
                "position {} is not part of spread \"{}\"",
                d.position, spread.key
            )));
        }
        if !positions.insert(d.position) {
            return Err(DeckError::InvalidDraw(format!(
                "position {} is filled twice",
                d.position
            )));
        }
        if !cards.insert(&d.card.key) {
            return Err(DeckError::InvalidDraw(format!(
                "card \"{}\" is drawn twice",
                d.card.key
            )));
        }
    }
    Ok(())
}

/// Shuffle the deck and deal one card into each position of the spread.
///
/// Cards are dealt in position order. When `allow_reversed` is set, each card
/// lands reversed with probability one half.
pub fn draw_spread<'a, R: Rng + ?Sized>(
    deck: &'a Deck,
    spread: &Spread,
    rng: &mut R,
    allow_reversed: bool,
) -> DeckResult<Vec<DrawnCard<'a>>> {
    if deck.len() < spread.card_count {
        return Err(DeckError::NotEnoughCards {
            available: deck.len(),
            needed: spread.card_count,
        });
    }

    let mut pile: Vec<&Card> = deck.cards().iter().collect();
    pile.shuffle(rng);

    let drawn: Vec<DrawnCard<'a>> = pile
        .into_iter()
        .take(spread.card_count)
        .enumerate()
        .map(|(i, card)| {
            let reversed = allow_reversed && rng.random_bool(0.5);
            DrawnCard::new(card, i + 1, reversed)
        })
        .collect();

    validate_draw(&drawn, spread)?;
    tracing::debug!(spread = %spread.key, cards = drawn.len(), "cards drawn");
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spread::SpreadCatalog;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixtures() -> (Deck, SpreadCatalog) {
        (Deck::standard().unwrap(), SpreadCatalog::standard().unwrap())
    }

    #[test]
    fn draw_fills_every_position() {
        let (deck, spreads) = fixtures();
        let spread = spreads.get("celtic-cross").unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let drawn = draw_spread(&deck, spread, &mut rng, true).unwrap();
        assert_eq!(drawn.len(), 10);
        let positions: Vec<usize> = drawn.iter().map(|d| d.position).collect();
        assert_eq!(positions, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_draw() {
        let (deck, spreads) = fixtures();
        let spread = spreads.get("three-card").unwrap();
        let a = draw_spread(&deck, spread, &mut StdRng::seed_from_u64(7), true).unwrap();
        let b = draw_spread(&deck, spread, &mut StdRng::seed_from_u64(7), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn upright_only_when_reversals_disabled() {
        let (deck, spreads) = fixtures();
        let spread = spreads.get("celtic-cross").unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let drawn = draw_spread(&deck, spread, &mut rng, false).unwrap();
            assert!(drawn.iter().all(|d| !d.reversed));
        }
    }

    #[test]
    fn reversals_happen() {
        let (deck, spreads) = fixtures();
        let spread = spreads.get("celtic-cross").unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let reversed = (0..20)
            .flat_map(|_| draw_spread(&deck, spread, &mut rng, true).unwrap())
            .filter(|d| d.reversed)
            .count();
        assert!(reversed > 0);
    }

    #[test]
    fn small_deck_rejected() {
        let (deck, spreads) = fixtures();
        let mut cards = deck.cards()[..2].to_vec();
        for c in &mut cards {
            c.relationships = Default::default();
        }
        let small = Deck::from_cards(cards).unwrap();
        let spread = spreads.get("three-card").unwrap();
        let err = draw_spread(&small, spread, &mut StdRng::seed_from_u64(1), true).unwrap_err();
        assert!(matches!(
            err,
            DeckError::NotEnoughCards {
                available: 2,
                needed: 3
            }
        ));
    }

    #[test]
    fn validate_rejects_bad_draws() {
        let (deck, spreads) = fixtures();
        let spread = spreads.get("three-card").unwrap();
        let fool = deck.find("the-fool").unwrap();
        let sun = deck.find("the-sun").unwrap();
        let moon = deck.find("the-moon").unwrap();

        assert!(validate_draw(&[], spread).is_err());
        assert!(validate_draw(&[DrawnCard::new(fool, 1, false)], spread).is_err());

        let duplicate_card = [
            DrawnCard::new(fool, 1, false),
            DrawnCard::new(fool, 2, false),
            DrawnCard::new(sun, 3, false),
        ];
        assert!(validate_draw(&duplicate_card, spread).is_err());

        let bad_position = [
            DrawnCard::new(fool, 1, false),
            DrawnCard::new(moon, 2, false),
            DrawnCard::new(sun, 4, false),
        ];
        assert!(validate_draw(&bad_position, spread).is_err());

        let good = [
            DrawnCard::new(fool, 1, false),
            DrawnCard::new(moon, 2, true),
            DrawnCard::new(sun, 3, false),
        ];
        assert!(validate_draw(&good, spread).is_ok());
    }

    proptest! {
        #[test]
        fn any_seed_gives_a_valid_draw(seed in any::<u64>()) {
            let (deck, spreads) = fixtures();
            for spread in spreads.iter() {
                let mut rng = StdRng::seed_from_u64(seed);
                let drawn = draw_spread(&deck, spread, &mut rng, true).unwrap();
                prop_assert!(validate_draw(&drawn, spread).is_ok());
            }
        }
    }
}
