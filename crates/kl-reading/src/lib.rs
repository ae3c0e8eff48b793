//! Reading synthesis engine for Kartenleger.
//!
//! Takes a draw of cards and produces a [`FullReadingAnalysis`]: pairwise
//! interactions, an overall theme and energy, the outcome cards, and a
//! narrative in the language of the supplied [`TemplateBundle`]. Analysis is
//! pure and deterministic; the only randomness lives in drawing.
//!
//! ```no_run
//! use kl_reading::{Reader, ReadingConfig};
//!
//! let reader = Reader::new(ReadingConfig::default().with_seed(7))?;
//! let analysis = reader.read("three-card", "Where is this going?")?;
//! println!("{}", reader.narration(&analysis));
//! # Ok::<(), kl_reading::ReadingError>(())
//! ```

pub mod analysis;
pub mod bundle;
pub mod config;
pub mod error;
pub mod interaction;
pub mod narration;
pub mod outcome;
pub mod reader;
pub mod synthesis;
pub mod theme;

#[cfg(test)]
mod test_support;

pub use analysis::{FullReadingAnalysis, analyze};
pub use bundle::TemplateBundle;
pub use config::ReadingConfig;
pub use error::{ReadingError, ReadingResult};
pub use interaction::{CardInteraction, Classification, INTERACTION_THRESHOLD, score_interactions};
pub use narration::{SpeechEvent, Speaker, TranscriptSpeaker, narrate, narration_script};
pub use outcome::select_outcome;
pub use reader::Reader;
pub use synthesis::{Synthesis, SynthesisInput, synthesize};
pub use theme::{Energy, ReadingTheme, analyze_theme};
