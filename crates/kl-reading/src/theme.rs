//! Aggregate theme and energy of a reading.

use std::fmt;

use serde::Serialize;

use kl_core::{DrawnCard, Suit};

use crate::bundle::TemplateBundle;

const LOVERS: &str = "the-lovers";
const CHARIOT: &str = "the-chariot";
const EMPEROR: &str = "the-emperor";

/// Overall emotional tone of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    /// Uplifting words clearly outweigh heavy ones.
    Positive,
    /// Heavy words clearly outweigh uplifting ones.
    Negative,
    /// Neither side dominates and the scores are far apart.
    Neutral,
    /// The scores are close together.
    Mixed,
}

impl Energy {
    /// Every energy.
    pub const ALL: [Energy; 4] = [
        Energy::Positive,
        Energy::Negative,
        Energy::Neutral,
        Energy::Mixed,
    ];
}

impl fmt::Display for Energy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Neutral => write!(f, "neutral"),
            Self::Mixed => write!(f, "mixed"),
        }
    }
}

/// Thematic summary of a whole reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadingTheme {
    /// Main theme text.
    pub primary: String,
    /// Additional theme texts, relationships before career.
    pub secondary: Vec<String>,
    /// Overall energy.
    pub energy: Energy,
    /// Most frequent suit, if any card has one.
    pub dominant_suit: Option<Suit>,
    /// Number of major arcana drawn.
    pub major_arcana_count: usize,
    /// Number of kings, queens, knights, and pages drawn.
    pub court_count: usize,
}

/// Classify energy from positive and negative scores.
///
/// Checked in order: positive, negative, mixed, then neutral.
pub fn classify_energy(positive: usize, negative: usize) -> Energy {
    // p > 1.5n, kept in integers
    if positive * 2 > negative * 3 {
        Energy::Positive
    } else if negative * 2 > positive * 3 {
        Energy::Negative
    } else if positive.abs_diff(negative) < 2 {
        Energy::Mixed
    } else {
        Energy::Neutral
    }
}

/// Count keyword hits in each card's summary for its drawn orientation.
///
/// Returns `(positive, negative)`. Each keyword scores at most once per card.
pub fn energy_scores(drawn: &[DrawnCard<'_>], bundle: &TemplateBundle) -> (usize, usize) {
    let hits = |text: &str, words: &[String]| {
        words
            .iter()
            .filter(|w| text.contains(&w.to_lowercase()))
            .count()
    };

    drawn.iter().fold((0, 0), |(p, n), d| {
        let text = d.meaning().summary.get(bundle.language).to_lowercase();
        (
            p + hits(&text, &bundle.energy_keywords.positive),
            n + hits(&text, &bundle.energy_keywords.negative),
        )
    })
}

/// The most frequent suit. Ties go to the suit seen first.
pub fn dominant_suit(drawn: &[DrawnCard<'_>]) -> Option<Suit> {
    let mut tally: Vec<(Suit, usize)> = Vec::new();
    for suit in drawn.iter().filter_map(|d| d.card.suit) {
        match tally.iter_mut().find(|(s, _)| *s == suit) {
            Some((_, count)) => *count += 1,
            None => tally.push((suit, 1)),
        }
    }

    let mut best: Option<(Suit, usize)> = None;
    for (suit, count) in tally {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((suit, count));
        }
    }
    best.map(|(suit, _)| suit)
}

/// Build the theme for a reading.
pub fn analyze_theme(drawn: &[DrawnCard<'_>], bundle: &TemplateBundle) -> ReadingTheme {
    let total = drawn.len();
    let major_arcana_count = drawn.iter().filter(|d| d.card.is_major()).count();
    let court_count = drawn.iter().filter(|d| d.card.is_court()).count();
    let dominant = dominant_suit(drawn);
    let (positive, negative) = energy_scores(drawn, bundle);

    let themes = &bundle.themes;
    // 60% or more majors, in integers
    let major_heavy = total > 0 && major_arcana_count * 10 >= total * 6;
    let primary = if major_heavy {
        themes.major_heavy.clone()
    } else if let Some(suit) = dominant {
        themes.suit.get(suit).to_string()
    } else {
        themes.balanced.clone()
    };

    let has = |key: &str| drawn.iter().any(|d| d.card.key.as_str() == key);
    let has_suit = |suit: Suit| drawn.iter().any(|d| d.card.suit == Some(suit));

    let mut secondary = Vec::new();
    if has(LOVERS) || has_suit(Suit::Cups) {
        secondary.push(themes.relationships.clone());
    }
    if has_suit(Suit::Pentacles) || has(CHARIOT) || has(EMPEROR) {
        secondary.push(themes.career.clone());
    }

    ReadingTheme {
        primary,
        secondary,
        energy: classify_energy(positive, negative),
        dominant_suit: dominant,
        major_arcana_count,
        court_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{card, minor, summarized};
    use kl_core::Language;
    use proptest::prelude::*;

    fn bundle() -> TemplateBundle {
        TemplateBundle::load(Language::English).unwrap()
    }

    #[test]
    fn energy_bands() {
        assert_eq!(classify_energy(3, 1), Energy::Positive);
        assert_eq!(classify_energy(1, 3), Energy::Negative);
        assert_eq!(classify_energy(0, 0), Energy::Mixed);
        assert_eq!(classify_energy(3, 2), Energy::Mixed);
        assert_eq!(classify_energy(6, 4), Energy::Neutral);
        assert_eq!(classify_energy(1, 0), Energy::Positive);
        // exactly 1.5x is not enough
        assert_eq!(classify_energy(9, 6), Energy::Neutral);
    }

    #[test]
    fn scores_follow_orientation() {
        let c = summarized(
            minor("alpha", Suit::Cups, &["dawn"]),
            "Joy and hope abound.",
            "Fear of loss and pain.",
        );
        let b = bundle();
        assert_eq!(energy_scores(&[DrawnCard::new(&c, 1, false)], &b), (2, 0));
        assert_eq!(energy_scores(&[DrawnCard::new(&c, 1, true)], &b), (0, 3));
    }

    #[test]
    fn keyword_counted_once_per_card() {
        let c = summarized(card("alpha", &[]), "JOY, joy and more joy.", "");
        assert_eq!(energy_scores(&[DrawnCard::new(&c, 1, false)], &bundle()), (1, 0));
    }

    #[test]
    fn card_can_score_both_ways() {
        let c = summarized(card("alpha", &[]), "Success after struggle.", "");
        assert_eq!(energy_scores(&[DrawnCard::new(&c, 1, false)], &bundle()), (1, 1));
    }

    #[test]
    fn dominant_suit_tie_goes_to_first_seen() {
        let a = minor("a", Suit::Swords, &[]);
        let b = minor("b", Suit::Cups, &[]);
        let c = minor("c", Suit::Cups, &[]);
        let d = minor("d", Suit::Swords, &[]);
        let drawn = [
            DrawnCard::new(&a, 1, false),
            DrawnCard::new(&b, 2, false),
            DrawnCard::new(&c, 3, false),
            DrawnCard::new(&d, 4, false),
        ];
        assert_eq!(dominant_suit(&drawn), Some(Suit::Swords));
    }

    #[test]
    fn dominant_suit_needs_a_suited_card() {
        let a = card("a", &[]);
        assert_eq!(dominant_suit(&[DrawnCard::new(&a, 1, false)]), None);
    }

    #[test]
    fn majors_only_is_major_heavy() {
        let a = card("a", &[]);
        let b = card("b", &[]);
        let drawn = [DrawnCard::new(&a, 1, false), DrawnCard::new(&b, 2, true)];
        let theme = analyze_theme(&drawn, &bundle());
        assert_eq!(theme.primary, bundle().themes.major_heavy);
        assert_eq!(theme.major_arcana_count, 2);
        assert!(theme.secondary.is_empty());
    }

    #[test]
    fn suit_theme_when_majors_are_few() {
        let a = card("a", &[]);
        let b = minor("b", Suit::Wands, &[]);
        let c = minor("c", Suit::Cups, &[]);
        let drawn = [
            DrawnCard::new(&a, 1, false),
            DrawnCard::new(&b, 2, false),
            DrawnCard::new(&c, 3, false),
        ];
        let theme = analyze_theme(&drawn, &bundle());
        assert_eq!(theme.dominant_suit, Some(Suit::Wands));
        assert_eq!(theme.primary, bundle().themes.suit.wands);
    }

    #[test]
    fn secondary_themes_in_order() {
        let b = bundle();
        let emperor = card(EMPEROR, &[]);
        let lovers = card(LOVERS, &[]);
        let w = minor("w", Suit::Wands, &[]);
        let drawn = [
            DrawnCard::new(&emperor, 1, false),
            DrawnCard::new(&w, 2, false),
            DrawnCard::new(&lovers, 3, false),
        ];
        let theme = analyze_theme(&drawn, &b);
        assert_eq!(theme.secondary, vec![b.themes.relationships, b.themes.career]);
    }

    #[test]
    fn court_cards_counted() {
        let mut q = minor("queen-of-cups", Suit::Cups, &[]);
        q.name.en = "Queen of Cups".into();
        let t = minor("ten-of-cups", Suit::Cups, &[]);
        let drawn = [DrawnCard::new(&q, 1, false), DrawnCard::new(&t, 2, false)];
        assert_eq!(analyze_theme(&drawn, &bundle()).court_count, 1);
    }

    proptest! {
        #[test]
        fn classification_is_total(p in 0usize..50, n in 0usize..50) {
            let energy = classify_energy(p, n);
            match energy {
                Energy::Positive => prop_assert!(p as f64 > 1.5 * n as f64),
                Energy::Negative => prop_assert!(n as f64 > 1.5 * p as f64),
                Energy::Mixed => prop_assert!(p.abs_diff(n) < 2),
                Energy::Neutral => prop_assert!(p.abs_diff(n) >= 2),
            }
        }
    }
}
