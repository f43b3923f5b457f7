//! Text-to-speech support.
//!
//! Engines play at most one utterance at a time. Starting a new utterance
//! cancels the one in flight; nothing is queued.

mod command;

use std::time::Duration;

use crate::error::Result;
use crate::models::{Quote, Voice};

pub use command::{CommandSpeechEngine, DEFAULT_SPEECH_COMMAND};

/// Speaking rate used for quotes (1.0 is the engine's normal rate)
pub const QUOTE_RATE: f32 = 0.9;

/// Delay between voice list probes while the engine reports no voices
pub const VOICE_RETRY_INTERVAL: Duration = Duration::from_millis(100);

/// Voice list probes before giving up
pub const VOICE_RETRY_ATTEMPTS: usize = 50;

/// One request to speak
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` uses the engine's default voice
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }

    /// Utterance reading a quote and its author
    #[must_use]
    pub fn for_quote(quote: &Quote, voice: Option<Voice>) -> Self {
        Self {
            voice,
            rate: QUOTE_RATE,
            ..Self::new(quote.spoken_text())
        }
    }
}

/// How an utterance ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    /// Played to the end
    Completed,
    /// Stopped by `cancel` or superseded, or nothing was playing
    Cancelled,
    /// The engine reported an error
    Failed(String),
}

/// A speech synthesis engine (async)
#[allow(async_fn_in_trait)]
pub trait SpeechEngine {
    /// Voices currently offered; may be empty while the engine warms up
    async fn voices(&self) -> Result<Vec<Voice>>;

    /// Start speaking, cancelling anything in flight. Returns once playback
    /// has started.
    async fn start(&self, utterance: &Utterance) -> Result<()>;

    /// Stop the active utterance, if any
    fn cancel(&self);

    /// Wait for the active utterance to end. Safe to drop before completion.
    async fn finished(&self) -> SpeechOutcome;
}

/// Load the voice list, probing again while the engine reports none
pub async fn load_voices<E: SpeechEngine>(
    engine: &E,
    attempts: usize,
    interval: Duration,
) -> Vec<Voice> {
    for attempt in 1..=attempts.max(1) {
        match engine.voices().await {
            Ok(voices) if !voices.is_empty() => {
                tracing::debug!("Loaded {} voices", voices.len());
                return voices;
            }
            Ok(_) => tracing::debug!("No voices yet (attempt {})", attempt),
            Err(error) => {
                tracing::warn!("Failed to list voices: {}", error);
                return Vec::new();
            }
        }
        tokio::time::sleep(interval).await;
    }

    tracing::warn!("Speech engine reported no voices; using the default voice");
    Vec::new()
}

/// Voice for a stored selection; missing, malformed or out-of-range values
/// select the default voice (`None`)
#[must_use]
pub fn resolve_voice<'a>(voices: &'a [Voice], stored: Option<&str>) -> Option<&'a Voice> {
    let value = stored?.trim();
    if value.is_empty() {
        return None;
    }
    let index: usize = value.parse().ok()?;
    let voice = voices.get(index);
    if voice.is_none() {
        tracing::debug!(
            "Stored voice {} not available ({} voices), using default",
            index,
            voices.len()
        );
    }
    voice
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct WarmingEngine {
        calls: AtomicUsize,
        ready_after: usize,
    }

    impl SpeechEngine for WarmingEngine {
        async fn voices(&self) -> Result<Vec<Voice>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call >= self.ready_after {
                Ok(vec![Voice::new("English", "en")])
            } else {
                Ok(Vec::new())
            }
        }

        async fn start(&self, _utterance: &Utterance) -> Result<()> {
            Ok(())
        }

        fn cancel(&self) {}

        async fn finished(&self) -> SpeechOutcome {
            SpeechOutcome::Completed
        }
    }

    fn two_voices() -> Vec<Voice> {
        vec![Voice::new("English", "en"), Voice::new("French", "fr")]
    }

    #[test]
    fn test_quote_utterance_settings() {
        let quote = Quote::new("Less, but better.", "Dieter Rams");
        let utterance = Utterance::for_quote(&quote, None);
        assert_eq!(utterance.text, "Less, but better. — Dieter Rams");
        assert!((utterance.rate - 0.9).abs() < f32::EPSILON);
        assert!((utterance.pitch - 1.0).abs() < f32::EPSILON);
        assert!((utterance.volume - 1.0).abs() < f32::EPSILON);
        assert!(utterance.voice.is_none());
    }

    #[test]
    fn test_resolve_voice_in_range() {
        let voices = two_voices();
        assert_eq!(resolve_voice(&voices, Some("1")), Some(&voices[1]));
    }

    #[test]
    fn test_resolve_voice_out_of_range_falls_back_to_default() {
        let voices = two_voices();
        assert_eq!(resolve_voice(&voices, Some("3")), None);
    }

    #[test]
    fn test_resolve_voice_empty_or_malformed_is_default() {
        let voices = two_voices();
        assert_eq!(resolve_voice(&voices, None), None);
        assert_eq!(resolve_voice(&voices, Some("")), None);
        assert_eq!(resolve_voice(&voices, Some("French")), None);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_load_voices_retries_until_ready() {
        let engine = WarmingEngine {
            calls: AtomicUsize::new(0),
            ready_after: 3,
        };
        let voices = load_voices(&engine, 10, VOICE_RETRY_INTERVAL).await;
        assert_eq!(voices.len(), 1);
        assert_eq!(engine.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_load_voices_gives_up() {
        let engine = WarmingEngine {
            calls: AtomicUsize::new(0),
            ready_after: usize::MAX,
        };
        let voices = load_voices(&engine, 4, VOICE_RETRY_INTERVAL).await;
        assert!(voices.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 4);
    }
}
