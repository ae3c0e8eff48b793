use std::path::Path;

pub fn run(file: &Path) -> Result<(), String> {
    let deck = super::load_deck(file)?;

    let relationships: usize = deck
        .cards()
        .iter()
        .map(|c| c.relationships.supports.len() + c.relationships.challenges.len())
        .sum();

    println!("  All checks passed for '{}'.", file.display());
    println!("  {} cards, {} relationships", deck.len(), relationships);

    Ok(())
}
