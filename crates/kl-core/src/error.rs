use crate::card::CardKey;

/// Alias for `Result<T, DeckError>`.
pub type DeckResult<T> = Result<T, DeckError>;

/// Errors that can occur when loading reference data or validating a draw.
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The reference data was not valid JSON for the expected shape.
    #[error("malformed reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two cards share the same canonical key or numeric id.
    #[error("duplicate card: \"{0}\"")]
    DuplicateCard(String),

    /// A relationship entry does not name any card in the deck.
    #[error("card \"{card}\" references unknown card \"{reference}\"")]
    UnresolvedReference {
        /// The card whose relationship list holds the entry.
        card: CardKey,
        /// The raw relationship entry.
        reference: String,
    },

    /// A relationship entry matches more than one card.
    #[error("card \"{card}\" has ambiguous reference \"{reference}\" (matches {candidates:?})")]
    AmbiguousReference {
        /// The card whose relationship list holds the entry.
        card: CardKey,
        /// The raw relationship entry.
        reference: String,
        /// Canonical keys of every card the entry matched.
        candidates: Vec<CardKey>,
    },

    /// No card matches the requested key or name.
    #[error("card not found: \"{0}\"")]
    CardNotFound(String),

    /// No spread matches the requested key.
    #[error("spread not found: \"{0}\"")]
    SpreadNotFound(String),

    /// Two spreads share the same key.
    #[error("duplicate spread: \"{0}\"")]
    DuplicateSpread(String),

    /// A language tag is not one of the supported languages.
    #[error("unsupported language: \"{0}\"")]
    UnsupportedLanguage(String),

    /// A spread's declared card count disagrees with its positions.
    #[error("spread \"{spread}\" declares {declared} cards but has {positions} positions")]
    SpreadCountMismatch {
        /// The spread key.
        spread: String,
        /// The declared card count.
        declared: usize,
        /// The number of position records.
        positions: usize,
    },

    /// A spread's positions are not numbered `1..=card_count`.
    #[error("spread \"{spread}\" positions must be numbered 1..={card_count}")]
    InvalidSpread {
        /// The spread key.
        spread: String,
        /// The declared card count.
        card_count: usize,
    },

    /// A draw does not fit the spread it was made for.
    #[error("invalid draw: {0}")]
    InvalidDraw(String),

    /// The deck has fewer cards than the spread needs.
    #[error("deck has {available} cards but the spread needs {needed}")]
    NotEnoughCards {
        /// Cards available in the deck.
        available: usize,
        /// Cards the spread needs.
        needed: usize,
    },
}
