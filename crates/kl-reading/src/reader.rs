//! Reading session management.
//!
//! `Reader` owns the reference data, the language bundle, and the RNG, and
//! hands out draws and analyses that borrow from it.

use std::cell::RefCell;

use rand::rngs::StdRng;

use kl_core::{Deck, DrawnCard, Spread, SpreadCatalog, draw_spread, validate_draw};

use crate::analysis::{FullReadingAnalysis, analyze};
use crate::bundle::TemplateBundle;
use crate::config::ReadingConfig;
use crate::error::ReadingResult;
use crate::narration::narration_script;

/// A tarot reading session.
pub struct Reader {
    deck: Deck,
    spreads: SpreadCatalog,
    bundle: TemplateBundle,
    config: ReadingConfig,
    rng: RefCell<StdRng>,
}

impl Reader {
    /// Create a session over the bundled deck and spreads.
    pub fn new(config: ReadingConfig) -> ReadingResult<Self> {
        Self::with_deck(Deck::standard()?, SpreadCatalog::standard()?, config)
    }

    /// Create a session over custom reference data.
    pub fn with_deck(
        deck: Deck,
        spreads: SpreadCatalog,
        config: ReadingConfig,
    ) -> ReadingResult<Self> {
        let bundle = TemplateBundle::load(config.language)?;
        let rng = RefCell::new(config.rng());
        Ok(Self {
            deck,
            spreads,
            bundle,
            config,
            rng,
        })
    }

    /// Get the deck.
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Get the spread catalog.
    pub fn spreads(&self) -> &SpreadCatalog {
        &self.spreads
    }

    /// Look up a spread by key.
    pub fn spread(&self, key: &str) -> ReadingResult<&Spread> {
        Ok(self.spreads.get(key)?)
    }

    /// The separator used between narrated segments.
    pub fn pause_marker(&self) -> &str {
        self.config
            .pause_marker
            .as_deref()
            .unwrap_or(&self.bundle.pause_marker)
    }

    /// Shuffle and deal a spread.
    pub fn draw(&self, spread_key: &str) -> ReadingResult<Vec<DrawnCard<'_>>> {
        let spread = self.spread(spread_key)?;
        let mut rng = self.rng.borrow_mut();
        Ok(draw_spread(
            &self.deck,
            spread,
            &mut *rng,
            self.config.allow_reversed,
        )?)
    }

    /// Lay out chosen cards, in position order.
    ///
    /// Each pick is a card name or key and a reversed flag.
    pub fn place(
        &self,
        spread_key: &str,
        picks: &[(&str, bool)],
    ) -> ReadingResult<Vec<DrawnCard<'_>>> {
        let spread = self.spread(spread_key)?;
        let drawn = picks
            .iter()
            .enumerate()
            .map(|(i, (name, reversed))| {
                self.deck
                    .require(name)
                    .map(|card| DrawnCard::new(card, i + 1, *reversed))
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate_draw(&drawn, spread)?;
        Ok(drawn)
    }

    /// Validate a draw and analyse it.
    pub fn analyze<'a>(
        &'a self,
        spread_key: &str,
        drawn: &[DrawnCard<'a>],
        question: &str,
    ) -> ReadingResult<FullReadingAnalysis<'a>> {
        let spread = self.spread(spread_key)?;
        validate_draw(drawn, spread)?;
        Ok(analyze(drawn, spread, question, &self.bundle))
    }

    /// Draw a spread and analyse it.
    pub fn read(&self, spread_key: &str, question: &str) -> ReadingResult<FullReadingAnalysis<'_>> {
        let drawn = self.draw(spread_key)?;
        self.analyze(spread_key, &drawn, question)
    }

    /// The narration script for an analysis.
    pub fn narration(&self, analysis: &FullReadingAnalysis<'_>) -> String {
        narration_script(analysis, self.pause_marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReadingError;
    use kl_core::{DeckError, Language};

    #[test]
    fn seeded_sessions_agree() {
        let config = ReadingConfig::default().with_seed(5);
        let a = Reader::new(config.clone()).unwrap();
        let b = Reader::new(config).unwrap();
        let ra = a.read("celtic-cross", "What next?").unwrap();
        let rb = b.read("celtic-cross", "What next?").unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn successive_draws_differ() {
        let reader = Reader::new(ReadingConfig::default().with_seed(5)).unwrap();
        let first = reader.draw("celtic-cross").unwrap();
        let second = reader.draw("celtic-cross").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn place_resolves_names_in_any_language() {
        let reader =
            Reader::new(ReadingConfig::default().with_language(Language::German)).unwrap();
        let drawn = reader
            .place("three-card", &[("Der Narr", false), ("the-sun", true), ("The Moon", false)])
            .unwrap();
        assert_eq!(drawn[1].card.key.as_str(), "the-sun");
        assert!(drawn[1].reversed);
        assert_eq!(drawn[2].position, 3);
    }

    #[test]
    fn place_rejects_wrong_count() {
        let reader = Reader::new(ReadingConfig::default()).unwrap();
        let err = reader.place("three-card", &[("the-fool", false)]).unwrap_err();
        assert!(matches!(err, ReadingError::Deck(DeckError::InvalidDraw(_))));
    }

    #[test]
    fn session_spreads_follow_the_catalog() {
        let reader = Reader::new(ReadingConfig::default()).unwrap();
        let keys: Vec<&str> = reader.spreads().iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys.len(), 5);
        assert!(keys.contains(&"celtic-cross"));
        assert_eq!(reader.spread("single").unwrap().card_count, 1);
    }

    #[test]
    fn unknown_spread() {
        let reader = Reader::new(ReadingConfig::default()).unwrap();
        let err = reader.draw("horseshoe").unwrap_err();
        assert!(matches!(err, ReadingError::Deck(DeckError::SpreadNotFound(_))));
    }

    #[test]
    fn pause_marker_override() {
        let reader = Reader::new(ReadingConfig::default()).unwrap();
        assert_eq!(reader.pause_marker(), "... ");
        let reader = Reader::new(ReadingConfig::default().with_pause_marker(" / ")).unwrap();
        assert_eq!(reader.pause_marker(), " / ");
    }

    #[test]
    fn upright_only_session() {
        let reader =
            Reader::new(ReadingConfig::default().with_seed(1).with_reversals(false)).unwrap();
        let analysis = reader.read("celtic-cross", "").unwrap();
        assert!(analysis.cards.iter().all(|d| !d.reversed));
    }
}
