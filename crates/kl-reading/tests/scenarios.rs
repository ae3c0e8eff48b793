//! End-to-end readings over the bundled deck.

use kl_core::{Deck, DrawnCard, Language, Spread, SpreadCatalog, Suit};
use kl_reading::{
    Classification, Energy, FullReadingAnalysis, SpeechEvent, TemplateBundle, TranscriptSpeaker,
    analyze, narrate, narration_script,
};

struct Fixture {
    deck: Deck,
    spreads: SpreadCatalog,
}

impl Fixture {
    fn new() -> Self {
        Self {
            deck: Deck::standard().unwrap(),
            spreads: SpreadCatalog::standard().unwrap(),
        }
    }

    fn spread(&self, key: &str) -> &Spread {
        self.spreads.get(key).unwrap()
    }

    fn deal(&self, picks: &[(&str, bool)]) -> Vec<DrawnCard<'_>> {
        picks
            .iter()
            .enumerate()
            .map(|(i, (key, reversed))| {
                DrawnCard::new(self.deck.find(key).unwrap(), i + 1, *reversed)
            })
            .collect()
    }

    fn read(
        &self,
        spread: &str,
        picks: &[(&str, bool)],
        question: &str,
        language: Language,
    ) -> FullReadingAnalysis<'_> {
        let drawn = self.deal(picks);
        let bundle = TemplateBundle::load(language).unwrap();
        analyze(&drawn, self.spread(spread), question, &bundle)
    }
}

fn keys(cards: &[DrawnCard<'_>]) -> Vec<String> {
    cards.iter().map(|d| d.card.key.to_string()).collect()
}

const SUN_READING: [(&str, bool); 3] = [
    ("the-sun", false),
    ("three-of-cups", false),
    ("ten-of-swords", true),
];

#[test]
fn sun_reading() {
    let fx = Fixture::new();
    let bundle = TemplateBundle::load(Language::English).unwrap();
    let a = fx.read("three-card", &SUN_READING, "", Language::English);

    assert_eq!(a.theme.major_arcana_count, 1);
    assert_eq!(a.theme.dominant_suit, Some(Suit::Cups));
    assert_eq!(a.theme.primary, bundle.themes.suit.cups);
    assert_eq!(a.theme.secondary, vec![bundle.themes.relationships.clone()]);
    assert_eq!(a.theme.energy, Energy::Positive);
    assert_eq!(a.theme.court_count, 0);

    assert!(a.interactions.is_empty());
    assert!(a.supporting_cards.is_empty());
    assert!(a.challenging_cards.is_empty());
    assert_eq!(keys(&a.outcome_influencers), vec!["ten-of-swords"]);

    assert_eq!(
        a.synthesis.opening,
        format!(
            "The cards shine with encouraging energy, revealing {}.",
            bundle.themes.suit.cups
        )
    );
    assert_eq!(a.synthesis.body, vec![bundle.body.suit.cups.clone()]);
    assert_eq!(a.synthesis.conclusion, bundle.conclusion.positive);
    assert_eq!(a.synthesis.advice, bundle.advice.mirror);
}

#[test]
fn sun_reading_in_german() {
    let fx = Fixture::new();
    let bundle = TemplateBundle::load(Language::German).unwrap();
    let a = fx.read("three-card", &SUN_READING, " Wird es gut? ", Language::German);

    assert_eq!(a.language, Language::German);
    assert_eq!(a.theme.energy, Energy::Positive);
    assert_eq!(
        a.synthesis.opening,
        "Die Karten leuchten voller ermutigender Energie und zeigen Gefühle, Beziehungen und \
         Herzensangelegenheiten. Dies ist die Antwort auf deine Frage: 'Wird es gut?'."
    );
    assert_eq!(a.synthesis.body, vec![bundle.body.suit.cups.clone()]);
    assert_eq!(keys(&a.outcome_influencers), vec!["ten-of-swords"]);
}

#[test]
fn reading_is_deterministic() {
    let fx = Fixture::new();
    let picks = [
        ("the-hermit", false),
        ("two-of-cups", false),
        ("the-star", true),
        ("five-of-cups", false),
        ("justice", false),
    ];
    for language in Language::ALL {
        let a = fx.read("relationship", &picks, "Us?", language);
        let b = fx.read("relationship", &picks, "Us?", language);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}

#[test]
fn major_heavy_overrides_suit_majority() {
    let fx = Fixture::new();
    let bundle = TemplateBundle::load(Language::English).unwrap();
    let picks = [
        ("the-hermit", false),
        ("two-of-cups", false),
        ("the-star", true),
        ("five-of-cups", false),
        ("justice", false),
    ];
    let a = fx.read("relationship", &picks, "", Language::English);

    assert_eq!(a.theme.major_arcana_count, 3);
    assert_eq!(a.theme.dominant_suit, Some(Suit::Cups));
    assert_eq!(a.theme.primary, bundle.themes.major_heavy);
    assert_eq!(a.theme.energy, Energy::Mixed);

    let strengths: Vec<f64> = a.interactions.iter().map(|i| i.strength).collect();
    assert_eq!(strengths, vec![0.9, 0.6, 0.6, 0.5]);
    assert_eq!(a.interactions[0].classification, Classification::Supporting);
    assert_eq!(a.interactions[3].classification, Classification::Complementary);

    assert_eq!(keys(&a.supporting_cards), vec!["the-hermit", "the-star"]);
    assert!(a.challenging_cards.is_empty());
    assert_eq!(keys(&a.outcome_influencers), vec!["justice"]);

    let body = &a.synthesis.body;
    assert_eq!(body.len(), 4);
    assert_eq!(body[0], bundle.body.suit.cups);
    assert!(body[1].starts_with("With 3 Major Arcana cards present"));
    assert!(body[2].contains("carried by The Hermit, The Star."));
    assert!(body[3].starts_with(
        "The strongest connection in the spread lies between The Hermit and The Star: \
         The Hermit and The Star support each other"
    ));
    assert!(a.synthesis.advice.starts_with("Lean on the energy of The Hermit. "));
}

#[test]
fn unrelated_minor_cards_have_no_interactions() {
    let fx = Fixture::new();
    let bundle = TemplateBundle::load(Language::English).unwrap();
    let drawn = fx.deal(&[("two-of-wands", false), ("four-of-pentacles", true)]);
    let mut spread = fx.spread("three-card").clone();
    spread.card_count = 2;
    spread.positions.truncate(2);

    let a = analyze(&drawn, &spread, "", &bundle);
    assert!(a.interactions.is_empty());
    assert!(a.supporting_cards.is_empty());
    assert!(a.challenging_cards.is_empty());
    assert_eq!(a.theme.energy, Energy::Negative);
    assert_eq!(a.synthesis.body, vec![bundle.body.suit.wands.clone()]);
    assert!(!a.synthesis.opening.is_empty());
    assert_eq!(a.synthesis.conclusion, bundle.conclusion.negative);
    assert_eq!(a.synthesis.advice, bundle.advice.mirror);
    // no outcome marker among Past/Present
    assert_eq!(keys(&a.outcome_influencers), vec!["four-of-pentacles"]);
}

#[test]
fn celtic_cross_outcomes_in_both_languages() {
    let fx = Fixture::new();
    let picks: Vec<(&str, bool)> = fx.deck.cards()[40..50]
        .iter()
        .map(|c| (c.key.as_str(), false))
        .collect();
    for language in Language::ALL {
        let a = fx.read("celtic-cross", &picks, "", language);
        let positions: Vec<usize> = a.outcome_influencers.iter().map(|d| d.position).collect();
        assert_eq!(positions, vec![6, 10]);
    }
}

#[test]
fn narration_joins_every_paragraph() {
    let fx = Fixture::new();
    let a = fx.read("three-card", &SUN_READING, "Will it work?", Language::English);
    let script = narration_script(&a, "... ");
    let parts: Vec<&str> = script.split("... ").collect();
    assert_eq!(parts.len(), 4);
    assert_eq!(parts[0], a.synthesis.opening);
    assert_eq!(parts[1], a.synthesis.body[0]);
    assert_eq!(parts[2], a.synthesis.conclusion);
    assert_eq!(parts[3], a.synthesis.advice);
}

#[test]
fn narrate_writes_the_script() {
    let fx = Fixture::new();
    let a = fx.read("three-card", &SUN_READING, "", Language::German);
    let mut speaker = TranscriptSpeaker::new(Vec::new());
    let mut events = Vec::new();
    assert!(narrate(&mut speaker, &a, " | ", &mut |e| events.push(e)));
    assert_eq!(events, vec![SpeechEvent::Started, SpeechEvent::Finished]);

    let text = String::from_utf8(speaker.into_inner()).unwrap();
    assert_eq!(text, format!("{}\n", narration_script(&a, " | ")));
    assert!(text.starts_with("Die Karten leuchten"));
}
