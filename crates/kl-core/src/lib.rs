//! Core types for Kartenleger: cards, spreads, decks, and draws.
//!
//! This crate holds the reference data the reading engine works on. Cards and
//! spreads are loaded once from JSON (the bundled Rider-Waite deck or a custom
//! file) and never mutated afterwards. A reading is a slice of [`DrawnCard`]s
//! borrowing from a [`Deck`].

/// Card definitions: arcana, suits, meanings, and relationships.
pub mod card;
/// Deck loading, relationship normalization, and card lookup.
pub mod deck;
/// Shuffling, drawing, and draw validation.
pub mod draw;
/// Error types used throughout the crate.
pub mod error;
/// Supported languages and localized text.
pub mod language;
/// Spread layouts and their positions.
pub mod spread;

/// Re-export card types.
pub use card::{Arcana, Card, CardKey, Domain, Meaning, Relationships, Suit};
/// Re-export deck types.
pub use deck::Deck;
/// Re-export draw types and helpers.
pub use draw::{DrawnCard, draw_spread, validate_draw};
/// Re-export error types.
pub use error::{DeckError, DeckResult};
/// Re-export language types.
pub use language::{Language, Localized};
/// Re-export spread types.
pub use spread::{Position, Spread, SpreadCatalog};
