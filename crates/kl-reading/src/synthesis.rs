//! Turns the analysed parts of a reading into narrative text.

use std::cmp::Ordering;

use serde::Serialize;

use kl_core::DrawnCard;

use crate::bundle::{TemplateBundle, render};
use crate::interaction::CardInteraction;
use crate::theme::ReadingTheme;

/// Cards named in a dynamics paragraph before falling back to "and others".
const NAMED_CARDS: usize = 2;

/// The narrative of a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Synthesis {
    /// First paragraph, keyed by energy.
    pub opening: String,
    /// Conditional body paragraphs, in a fixed order.
    pub body: Vec<String>,
    /// Closing paragraph, keyed by energy.
    pub conclusion: String,
    /// Practical advice.
    pub advice: String,
}

impl Synthesis {
    /// Every paragraph in reading order: opening, body, conclusion, advice.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.opening.as_str())
            .chain(self.body.iter().map(String::as_str))
            .chain([self.conclusion.as_str(), self.advice.as_str()])
    }
}

/// Everything the synthesizer reads.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'r, 'a> {
    /// Theme of the reading.
    pub theme: &'r ReadingTheme,
    /// Interactions, strongest first.
    pub interactions: &'r [CardInteraction<'a>],
    /// Cards in supporting interactions, in draw order.
    pub supporting: &'r [DrawnCard<'a>],
    /// Cards in challenging interactions, in draw order.
    pub challenging: &'r [DrawnCard<'a>],
    /// The reader's question, possibly empty.
    pub question: &'r str,
    /// Number of cards drawn.
    pub total_cards: usize,
}

/// Build the opening, body, conclusion, and advice.
pub fn synthesize(input: &SynthesisInput<'_, '_>, bundle: &TemplateBundle) -> Synthesis {
    Synthesis {
        opening: opening(input, bundle),
        body: body(input, bundle),
        conclusion: bundle.conclusion.get(input.theme.energy).to_string(),
        advice: advice(input, bundle),
    }
}

fn opening(input: &SynthesisInput<'_, '_>, bundle: &TemplateBundle) -> String {
    let mut text = render(
        bundle.opening.get(input.theme.energy),
        &[("theme", input.theme.primary.as_str())],
    );
    let question = input.question.trim();
    if !question.is_empty() {
        text.push_str(&render(&bundle.opening.question, &[("question", question)]));
    }
    text
}

fn body(input: &SynthesisInput<'_, '_>, bundle: &TemplateBundle) -> Vec<String> {
    let templates = &bundle.body;
    let language = bundle.language;
    let theme = input.theme;
    let mut body = Vec::new();

    if let Some(suit) = theme.dominant_suit {
        body.push(templates.suit.get(suit).to_string());
    }

    if input.total_cards > 0 && theme.major_arcana_count * 2 >= input.total_cards {
        let count = theme.major_arcana_count.to_string();
        body.push(render(&templates.major, &[("count", count.as_str())]));
    }

    let (supporting, challenging) = (input.supporting, input.challenging);
    if !supporting.is_empty() || !challenging.is_empty() {
        let paragraph = match supporting.len().cmp(&challenging.len()) {
            Ordering::Greater => {
                let cards = name_cards(supporting, bundle);
                render(&templates.more_supporting, &[("cards", cards.as_str())])
            }
            Ordering::Less => {
                let cards = name_cards(challenging, bundle);
                render(&templates.more_challenging, &[("cards", cards.as_str())])
            }
            Ordering::Equal => templates.balanced_dynamics.clone(),
        };
        body.push(paragraph);
    }

    if let Some(top) = input.interactions.first() {
        body.push(render(
            &templates.top_interaction,
            &[
                ("first", top.first.name(language)),
                ("second", top.second.name(language)),
                ("interpretation", top.interpretation.as_str()),
            ],
        ));
    }

    body
}

fn name_cards(cards: &[DrawnCard<'_>], bundle: &TemplateBundle) -> String {
    let mut names = cards
        .iter()
        .take(NAMED_CARDS)
        .map(|d| d.name(bundle.language))
        .collect::<Vec<_>>()
        .join(", ");
    if cards.len() > NAMED_CARDS {
        names.push_str(&bundle.body.and_others);
    }
    names
}

fn advice(input: &SynthesisInput<'_, '_>, bundle: &TemplateBundle) -> String {
    let language = bundle.language;
    let mut advice = String::new();
    if let Some(card) = input.supporting.first() {
        advice.push_str(&render(&bundle.advice.supporting, &[("card", card.name(language))]));
    }
    if let Some(card) = input.challenging.first() {
        advice.push_str(&render(&bundle.advice.challenging, &[("card", card.name(language))]));
    }
    advice.push_str(&bundle.advice.mirror);
    advice
}
