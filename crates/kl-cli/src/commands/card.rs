use colored::Colorize;

use kl_core::{CardKey, Deck, Domain, Language, Meaning};

use super::Context;

fn print_meaning(label: &str, meaning: &Meaning, language: Language) {
    println!("  {}", label.bold());
    println!("  {}", meaning.summary.get(language));
    for domain in Domain::ALL {
        if let Some(text) = meaning.domain(domain) {
            println!("  {:<13} {}", format!("{domain}:").dimmed(), text.get(language));
        }
    }
    println!();
}

fn names(deck: &Deck, keys: &[CardKey], language: Language) -> String {
    keys.iter()
        .map(|k| {
            deck.get(k)
                .map(|c| c.display_name(language).to_string())
                .unwrap_or_else(|| k.to_string())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let deck = ctx.deck()?;
    let language = ctx.language;
    let card = super::find_card(&deck, name, language)?;

    let kind = match card.suit {
        Some(suit) => format!("minor, {suit}"),
        None => "major".to_string(),
    };
    println!(
        "  {} [{}] {}",
        card.display_name(language).bold(),
        card.key.as_str().dimmed(),
        kind.dimmed()
    );
    for other in card.name.variants() {
        if other != card.display_name(language) {
            println!("  {}", other.dimmed());
        }
    }
    println!();
    println!("  keywords: {}", card.keywords.join(", "));
    println!();

    print_meaning("Upright", &card.upright, language);
    print_meaning("Reversed", &card.reversed, language);

    let rel = &card.relationships;
    if !rel.supports.is_empty() {
        println!("  supports:   {}", names(&deck, &rel.supports, language));
    }
    if !rel.challenges.is_empty() {
        println!("  challenges: {}", names(&deck, &rel.challenges, language));
    }

    Ok(())
}
