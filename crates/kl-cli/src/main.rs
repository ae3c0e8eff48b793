//! CLI frontend for the Kartenleger tarot reading engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::Context;
use commands::read::ReadOptions;

#[derive(Parser)]
#[command(
    name = "kl",
    about = "Kartenleger: tarot readings with a synthesized interpretation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Reading language: en or de
    #[arg(short, long, global = true, env = "KL_LANG", default_value = "en")]
    lang: String,

    /// RNG seed for reproducible draws
    #[arg(short, long, global = true, env = "KL_SEED")]
    seed: Option<u64>,

    /// Custom deck file (default: the bundled Rider-Waite deck)
    #[arg(long, global = true)]
    deck: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw a spread and interpret it
    Read {
        /// Spread key (see `kl spreads`)
        #[arg(default_value = "three-card")]
        spread: String,

        /// The question to ask the cards
        #[arg(short, long, default_value = "")]
        question: String,

        /// Lay out these cards instead of drawing, e.g. "the-sun,ten-of-swords:r"
        #[arg(short, long)]
        cards: Option<String>,

        /// Never draw reversed cards
        #[arg(long)]
        no_reversals: bool,

        /// Print the analysis as JSON
        #[arg(long, conflicts_with = "narrate")]
        json: bool,

        /// Print the narration script instead of the full reading
        #[arg(long)]
        narrate: bool,
    },

    /// List the cards in the deck
    Cards {
        /// Only cards of this suit (wands, cups, swords, pentacles)
        #[arg(long)]
        suit: Option<String>,

        /// Only the major arcana
        #[arg(long, conflicts_with = "suit")]
        major: bool,
    },

    /// Show a card's meanings and relationships
    Card {
        /// Card name or key, in any language
        name: String,
    },

    /// List the available spreads
    Spreads,

    /// Validate a deck file
    Check {
        /// Path to the deck JSON file
        file: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let ctx = Context::new(&cli.lang, cli.seed, cli.deck);

    let result = match cli.command {
        Commands::Read {
            spread,
            question,
            cards,
            no_reversals,
            json,
            narrate,
        } => commands::read::run(
            &ctx,
            &ReadOptions {
                spread: &spread,
                question: &question,
                cards: cards.as_deref(),
                no_reversals,
                json,
                narrate,
            },
        ),
        Commands::Cards { suit, major } => commands::cards::run(&ctx, suit.as_deref(), major),
        Commands::Card { name } => commands::card::run(&ctx, &name),
        Commands::Spreads => commands::spreads::run(&ctx),
        Commands::Check { file } => commands::check::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
