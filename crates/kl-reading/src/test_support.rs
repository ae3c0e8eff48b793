//! Synthetic cards for unit tests.

use kl_core::{Arcana, Card, CardKey, Localized, Meaning, Relationships, Suit};

fn title(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn build(key: &str, arcana: Arcana, suit: Option<Suit>, keywords: &[&str]) -> Card {
    Card {
        id: 0,
        key: CardKey::new(key),
        name: Localized::new(title(key), ""),
        arcana,
        suit,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        upright: Meaning {
            summary: Localized::new("Quiet upright text.", ""),
            ..Meaning::default()
        },
        reversed: Meaning {
            summary: Localized::new("Quiet reversed text.", ""),
            ..Meaning::default()
        },
        relationships: Relationships::default(),
    }
}

/// A major arcana card named after its key, e.g. `alpha` -> "Alpha".
pub fn card(key: &str, keywords: &[&str]) -> Card {
    build(key, Arcana::Major, None, keywords)
}

/// A minor arcana card of the given suit.
pub fn minor(key: &str, suit: Suit, keywords: &[&str]) -> Card {
    build(key, Arcana::Minor, Some(suit), keywords)
}

/// Replace both summaries.
pub fn summarized(mut card: Card, upright: &str, reversed: &str) -> Card {
    card.upright.summary = Localized::new(upright, "");
    card.reversed.summary = Localized::new(reversed, "");
    card
}
