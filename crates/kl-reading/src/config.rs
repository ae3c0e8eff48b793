//! Configuration for a reading session.

use rand::SeedableRng;
use rand::rngs::StdRng;

use kl_core::Language;

/// Configuration for a reading session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingConfig {
    /// Language of the narrative and card names.
    pub language: Language,
    /// RNG seed for reproducible draws. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Whether drawn cards may land reversed.
    pub allow_reversed: bool,
    /// Separator between narrated segments. `None` uses the bundle's marker.
    pub pause_marker: Option<String>,
}

impl Default for ReadingConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            seed: None,
            allow_reversed: true,
            pause_marker: None,
        }
    }
}

impl ReadingConfig {
    /// Set the language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Allow or forbid reversed cards.
    pub fn with_reversals(mut self, allow: bool) -> Self {
        self.allow_reversed = allow;
        self
    }

    /// Override the narration pause marker.
    pub fn with_pause_marker(mut self, marker: impl Into<String>) -> Self {
        self.pause_marker = Some(marker.into());
        self
    }

    /// A fresh RNG: seeded when a seed is set, otherwise from OS entropy.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
