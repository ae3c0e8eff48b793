use std::io;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use kl_core::Language;
use kl_reading::{FullReadingAnalysis, Reader, SpeechEvent, TranscriptSpeaker, narrate};

use super::Context;

pub struct ReadOptions<'a> {
    pub spread: &'a str,
    pub question: &'a str,
    pub cards: Option<&'a str>,
    pub no_reversals: bool,
    pub json: bool,
    pub narrate: bool,
}

/// Parse "the-sun, ten-of-swords:r" into names and reversed flags.
fn parse_picks(list: &str) -> Vec<(&str, bool)> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pick| match pick.rsplit_once(':') {
            Some((name, "r" | "R" | "rev" | "reversed")) => (name.trim(), true),
            _ => (pick, false),
        })
        .collect()
}

pub fn run(ctx: &Context, opts: &ReadOptions<'_>) -> Result<(), String> {
    let config = ctx.config().with_reversals(!opts.no_reversals);
    let reader = ctx.reader(config)?;

    let drawn = match opts.cards {
        Some(list) => {
            let picks = parse_picks(list);
            for (name, _) in &picks {
                super::find_card(reader.deck(), name, ctx.language)?;
            }
            reader.place(opts.spread, &picks)
        }
        None => reader.draw(opts.spread),
    }
    .map_err(|e| e.to_string())?;

    let analysis = reader
        .analyze(opts.spread, &drawn, opts.question)
        .map_err(|e| e.to_string())?;

    if opts.json {
        let json = serde_json::to_string_pretty(&analysis)
            .map_err(|e| format!("failed to serialize reading: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if opts.narrate {
        return speak(&reader, &analysis);
    }

    print_reading(&reader, &analysis, opts)
}

fn speak(reader: &Reader, analysis: &FullReadingAnalysis<'_>) -> Result<(), String> {
    let mut speaker = TranscriptSpeaker::new(io::stdout().lock());
    let mut failure = None;
    let spoken = narrate(&mut speaker, analysis, reader.pause_marker(), &mut |event| {
        if let SpeechEvent::Error(message) = event {
            failure = Some(message);
        }
    });
    match failure {
        Some(message) => Err(format!("narration failed: {message}")),
        None if !spoken => Err("narration failed".into()),
        None => Ok(()),
    }
}

fn orientation(reversed: bool) -> &'static str {
    if reversed { "reversed" } else { "upright" }
}

fn print_reading(
    reader: &Reader,
    analysis: &FullReadingAnalysis<'_>,
    opts: &ReadOptions<'_>,
) -> Result<(), String> {
    let language: Language = analysis.language;
    let spread = reader.spread(opts.spread).map_err(|e| e.to_string())?;

    println!(
        "  {} [{}]",
        spread.name.get(language).bold(),
        spread.key.dimmed()
    );
    let question = opts.question.trim();
    if !question.is_empty() {
        println!("  {} {question}", "question:".dimmed());
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Position", "Card", "Orientation"]);
    for d in &analysis.cards {
        let position = spread
            .position(d.position)
            .map(|p| p.name.get(language))
            .unwrap_or_default();
        table.add_row(vec![
            d.position.to_string(),
            position.to_string(),
            d.name(language).to_string(),
            orientation(d.reversed).to_string(),
        ]);
    }
    println!("{table}");
    println!();

    let theme = &analysis.theme;
    println!("  {} {}", "theme: ".dimmed(), theme.primary);
    if !theme.secondary.is_empty() {
        println!("  {} {}", "also:  ".dimmed(), theme.secondary.join("; "));
    }
    println!("  {} {}", "energy:".dimmed(), theme.energy);
    println!(
        "  {} {} major, {} court",
        "cards: ".dimmed(),
        theme.major_arcana_count,
        theme.court_count
    );
    println!();

    if !analysis.interactions.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Cards", "Kind", "Strength"]);
        for i in &analysis.interactions {
            table.add_row(vec![
                format!("{} + {}", i.first.name(language), i.second.name(language)),
                i.classification.to_string(),
                format!("{:.1}", i.strength),
            ]);
        }
        println!("{table}");
        println!();
    }

    for paragraph in analysis.synthesis.paragraphs() {
        println!("  {paragraph}");
        println!();
    }

    let outcome: Vec<&str> = analysis
        .outcome_influencers
        .iter()
        .map(|d| d.name(language))
        .collect();
    println!("  {} {}", "outcome:".bold(), outcome.join(", "));

    Ok(())
}
