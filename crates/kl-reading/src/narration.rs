//! Spoken narration of a finished reading.
//!
//! The engine only builds the script. Playback belongs to a [`Speaker`],
//! which may be a platform speech synthesizer or, in the CLI, a
//! [`TranscriptSpeaker`] that prints the script.

use std::io::Write;

use kl_core::Language;

use crate::analysis::FullReadingAnalysis;

/// Join opening, body, conclusion, and advice with a pause marker.
pub fn narration_script(analysis: &FullReadingAnalysis<'_>, pause_marker: &str) -> String {
    analysis
        .synthesis
        .paragraphs()
        .collect::<Vec<_>>()
        .join(pause_marker)
}

/// Progress reported by a [`Speaker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// Playback began.
    Started,
    /// Playback was paused.
    Paused,
    /// Playback resumed after a pause.
    Resumed,
    /// Playback ran to the end.
    Finished,
    /// Playback was cut short by [`Speaker::stop`].
    Stopped,
    /// Playback failed. Never fatal to the caller.
    Error(String),
}

/// A speech synthesizer.
pub trait Speaker {
    /// Speak `text` in the language given by a BCP 47 tag.
    fn speak(&mut self, text: &str, language_tag: &str, on_event: &mut dyn FnMut(SpeechEvent));

    /// Pause playback, if speaking.
    fn pause(&mut self, on_event: &mut dyn FnMut(SpeechEvent));

    /// Resume paused playback.
    fn resume(&mut self, on_event: &mut dyn FnMut(SpeechEvent));

    /// Abandon playback.
    fn stop(&mut self, on_event: &mut dyn FnMut(SpeechEvent));

    /// Whether an utterance is in progress, paused or not.
    fn is_speaking(&self) -> bool;

    /// Whether playback is paused.
    fn is_paused(&self) -> bool;

    /// Whether a voice exists for the language tag.
    fn has_voice(&self, language_tag: &str) -> bool;
}

/// Hand a reading's script to a speaker.
///
/// Returns false, after reporting an error event, when the speaker has no
/// voice for the reading's language.
pub fn narrate<S: Speaker + ?Sized>(
    speaker: &mut S,
    analysis: &FullReadingAnalysis<'_>,
    pause_marker: &str,
    on_event: &mut dyn FnMut(SpeechEvent),
) -> bool {
    let tag = analysis.language.tag();
    if !speaker.has_voice(tag) {
        tracing::warn!(language = tag, "no voice available");
        on_event(SpeechEvent::Error(format!("no voice for language {tag}")));
        return false;
    }
    let script = narration_script(analysis, pause_marker);
    speaker.speak(&script, tag, on_event);
    true
}

/// A speaker that writes each utterance as a line of text.
///
/// Utterances spoken while paused are held back until [`Speaker::resume`].
#[derive(Debug)]
pub struct TranscriptSpeaker<W: Write> {
    out: W,
    pending: Vec<String>,
    paused: bool,
}

impl<W: Write> TranscriptSpeaker<W> {
    /// Write transcripts to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            pending: Vec::new(),
            paused: false,
        }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn flush_pending(&mut self, on_event: &mut dyn FnMut(SpeechEvent)) {
        for text in std::mem::take(&mut self.pending) {
            match writeln!(self.out, "{text}") {
                Ok(()) => on_event(SpeechEvent::Finished),
                Err(e) => on_event(SpeechEvent::Error(e.to_string())),
            }
        }
    }
}

impl<W: Write> Speaker for TranscriptSpeaker<W> {
    fn speak(&mut self, text: &str, _language_tag: &str, on_event: &mut dyn FnMut(SpeechEvent)) {
        on_event(SpeechEvent::Started);
        self.pending.push(text.to_string());
        if !self.paused {
            self.flush_pending(on_event);
        }
    }

    fn pause(&mut self, on_event: &mut dyn FnMut(SpeechEvent)) {
        if !self.paused {
            self.paused = true;
            on_event(SpeechEvent::Paused);
        }
    }

    fn resume(&mut self, on_event: &mut dyn FnMut(SpeechEvent)) {
        if self.paused {
            self.paused = false;
            on_event(SpeechEvent::Resumed);
            self.flush_pending(on_event);
        }
    }

    fn stop(&mut self, on_event: &mut dyn FnMut(SpeechEvent)) {
        self.paused = false;
        if !self.pending.is_empty() {
            self.pending.clear();
            on_event(SpeechEvent::Stopped);
        }
    }

    fn is_speaking(&self) -> bool {
        !self.pending.is_empty()
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn has_voice(&self, language_tag: &str) -> bool {
        Language::from_tag(language_tag).is_ok()
    }
}
