use comfy_table::{ContentArrangement, Table};

use kl_core::Suit;

use super::Context;

fn parse_suit(s: &str) -> Result<Suit, String> {
    let lower = s.trim().to_lowercase();
    Suit::ALL
        .into_iter()
        .find(|suit| suit.to_string() == lower)
        .ok_or_else(|| {
            format!("unknown suit: \"{s}\" (expected wands, cups, swords, or pentacles)")
        })
}

pub fn run(ctx: &Context, suit: Option<&str>, major: bool) -> Result<(), String> {
    let deck = ctx.deck()?;
    let suit = suit.map(parse_suit).transpose()?;

    let cards: Vec<_> = deck
        .cards()
        .iter()
        .filter(|c| !major || c.is_major())
        .filter(|c| suit.is_none() || c.suit == suit)
        .collect();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Name", "Key", "Suit", "Keywords"]);

    for card in &cards {
        let suit = card
            .suit
            .map(|s| s.to_string())
            .unwrap_or_else(|| "major".to_string());
        table.add_row(vec![
            card.id.to_string(),
            card.display_name(ctx.language).to_string(),
            card.key.to_string(),
            suit,
            card.keywords.join(", "),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", cards.len());

    Ok(())
}
