pub mod card;
pub mod cards;
pub mod check;
pub mod read;
pub mod spreads;

use std::fs;
use std::path::{Path, PathBuf};

use kl_core::{Card, Deck, Language, SpreadCatalog};
use kl_reading::{Reader, ReadingConfig};

/// How many "did you mean" suggestions to offer.
const SUGGESTIONS: usize = 3;

/// Options shared by every command.
pub struct Context {
    pub language: Language,
    pub seed: Option<u64>,
    pub deck_path: Option<PathBuf>,
}

impl Context {
    /// Unsupported language tags fall back to English with a warning.
    pub fn new(lang: &str, seed: Option<u64>, deck_path: Option<PathBuf>) -> Self {
        Self {
            language: Language::from_tag_or_default(lang),
            seed,
            deck_path,
        }
    }

    pub fn config(&self) -> ReadingConfig {
        let config = ReadingConfig::default().with_language(self.language);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    pub fn deck(&self) -> Result<Deck, String> {
        match &self.deck_path {
            Some(path) => load_deck(path),
            None => Deck::standard().map_err(|e| e.to_string()),
        }
    }

    pub fn reader(&self, config: ReadingConfig) -> Result<Reader, String> {
        let spreads = SpreadCatalog::standard().map_err(|e| e.to_string())?;
        Reader::with_deck(self.deck()?, spreads, config).map_err(|e| e.to_string())
    }
}

/// Read and validate a deck file.
fn load_deck(path: &Path) -> Result<Deck, String> {
    let json = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let deck = Deck::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), cards = deck.len(), "loaded custom deck");
    Ok(deck)
}

/// Look up a card, suggesting close names when it is missing.
fn find_card<'d>(deck: &'d Deck, name: &str, language: Language) -> Result<&'d Card, String> {
    if let Some(card) = deck.find(name) {
        return Ok(card);
    }
    let suggestions: Vec<&str> = deck
        .suggest(name, SUGGESTIONS)
        .into_iter()
        .map(|c| c.display_name(language))
        .collect();
    if suggestions.is_empty() {
        Err(format!("card not found: \"{name}\""))
    } else {
        Err(format!(
            "card not found: \"{name}\" (did you mean: {}?)",
            suggestions.join(", ")
        ))
    }
}
