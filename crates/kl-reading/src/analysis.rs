//! The reading orchestrator.

use std::collections::HashSet;

use serde::Serialize;

use kl_core::{CardKey, DrawnCard, Language, Spread};

use crate::bundle::TemplateBundle;
use crate::interaction::{CardInteraction, Classification, score_interactions};
use crate::outcome::select_outcome;
use crate::synthesis::{Synthesis, SynthesisInput, synthesize};
use crate::theme::{ReadingTheme, analyze_theme};

/// Everything the engine derives from one draw.
///
/// Borrows its cards from the deck the draw came from. The value is fully
/// computed; display and narration only read it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullReadingAnalysis<'a> {
    /// Language of every text field.
    pub language: Language,
    /// The draw, in draw order.
    pub cards: Vec<DrawnCard<'a>>,
    /// Theme and energy.
    pub theme: ReadingTheme,
    /// Interactions above the threshold, strongest first.
    pub interactions: Vec<CardInteraction<'a>>,
    /// Cards touched by a supporting interaction, in draw order.
    pub supporting_cards: Vec<DrawnCard<'a>>,
    /// Cards touched by a challenging interaction, in draw order.
    pub challenging_cards: Vec<DrawnCard<'a>>,
    /// Cards in forward-looking positions.
    pub outcome_influencers: Vec<DrawnCard<'a>>,
    /// The narrative.
    pub synthesis: Synthesis,
}

/// Cards that take part in at least one interaction of `classification`.
fn touched_by<'a>(
    drawn: &[DrawnCard<'a>],
    interactions: &[CardInteraction<'a>],
    classification: Classification,
) -> Vec<DrawnCard<'a>> {
    let keys: HashSet<&CardKey> = interactions
        .iter()
        .filter(|i| i.classification == classification)
        .flat_map(|i| [&i.first.card.key, &i.second.card.key])
        .collect();
    drawn
        .iter()
        .filter(|d| keys.contains(&d.card.key))
        .copied()
        .collect()
}

/// Analyse a draw.
///
/// Runs theme analysis, interaction scoring, outcome selection, and
/// synthesis, in that order. The draw must be non-empty and fit the spread;
/// see [`kl_core::validate_draw`]. Identical inputs give identical output.
pub fn analyze<'a>(
    drawn: &[DrawnCard<'a>],
    spread: &Spread,
    question: &str,
    bundle: &TemplateBundle,
) -> FullReadingAnalysis<'a> {
    let theme = analyze_theme(drawn, bundle);
    let interactions = score_interactions(drawn, bundle);
    let supporting_cards = touched_by(drawn, &interactions, Classification::Supporting);
    let challenging_cards = touched_by(drawn, &interactions, Classification::Challenging);
    let outcome_influencers = select_outcome(drawn, spread, bundle);

    let synthesis = synthesize(
        &SynthesisInput {
            theme: &theme,
            interactions: &interactions,
            supporting: &supporting_cards,
            challenging: &challenging_cards,
            question,
            total_cards: drawn.len(),
        },
        bundle,
    );

    tracing::debug!(
        spread = %spread.key,
        cards = drawn.len(),
        interactions = interactions.len(),
        energy = %theme.energy,
        "reading analysed"
    );

    FullReadingAnalysis {
        language: bundle.language,
        cards: drawn.to_vec(),
        theme,
        interactions,
        supporting_cards,
        challenging_cards,
        outcome_influencers,
        synthesis,
    }
}
