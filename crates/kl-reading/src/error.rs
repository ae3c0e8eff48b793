//! Error types for the reading engine.

use kl_core::{DeckError, Language};
use thiserror::Error;

/// Result type for reading operations.
pub type ReadingResult<T> = Result<T, ReadingError>;

/// Errors raised while preparing a reading.
///
/// Analysis itself never fails; these come from loading bundles and
/// reference data or from validating a draw.
#[derive(Debug, Error)]
pub enum ReadingError {
    /// A template bundle is malformed or has the wrong key set.
    #[error("malformed template bundle: {0}")]
    Bundle(#[source] serde_json::Error),

    /// A bundle declares a different language than the one requested.
    #[error("bundle for {expected} declares language {found}")]
    BundleLanguageMismatch {
        /// The language that was requested.
        expected: Language,
        /// The language the bundle declares.
        found: Language,
    },

    /// Reference data or draw error.
    #[error("{0}")]
    Deck(#[from] DeckError),
}
