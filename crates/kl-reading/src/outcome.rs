//! Picks the cards that speak to where a reading is heading.

use kl_core::{DrawnCard, Position, Spread};

use crate::bundle::TemplateBundle;

/// Markers matched against the canonical (English) position name.
const CANONICAL_MARKERS: [&str; 3] = ["future", "outcome", "result"];

fn contains_any<S: AsRef<str>>(name: &str, markers: &[S]) -> bool {
    let name = name.to_lowercase();
    markers
        .iter()
        .any(|m| name.contains(&m.as_ref().to_lowercase()))
}

fn is_outcome_position(position: &Position, bundle: &TemplateBundle) -> bool {
    contains_any(&position.name.en, &CANONICAL_MARKERS)
        || contains_any(position.name.get(bundle.language), &bundle.outcome_markers)
}

/// Cards in forward-looking positions, in draw order.
///
/// When no position name carries an outcome marker, the card in the highest
/// position stands in alone. The result is empty only for an empty draw.
pub fn select_outcome<'a>(
    drawn: &[DrawnCard<'a>],
    spread: &Spread,
    bundle: &TemplateBundle,
) -> Vec<DrawnCard<'a>> {
    let selected: Vec<DrawnCard<'a>> = drawn
        .iter()
        .filter(|d| {
            spread
                .position(d.position)
                .is_some_and(|p| is_outcome_position(p, bundle))
        })
        .copied()
        .collect();

    if !selected.is_empty() {
        return selected;
    }
    drawn
        .iter()
        .max_by_key(|d| d.position)
        .copied()
        .into_iter()
        .collect()
}
