//! The quote page controller.
//!
//! Wires the quote selector, preference store and speech engine to a
//! [`QuoteView`]. The session runs on a single task; speech completion is
//! reported back through [`DailyQuoteSession::on_speech_finished`].

mod view;

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::db::{read_or_default, write_best_effort, PreferenceStore};
use crate::error::{Error, Result};
use crate::export::display_date;
use crate::models::{
    voice_options, Preferences, Quote, QuoteBook, Theme, Voice, MUTE_STATUS_KEY,
    SELECTED_VOICE_KEY, THEME_KEY,
};
use crate::speech::{
    load_voices, resolve_voice, SpeechEngine, SpeechOutcome, Utterance, VOICE_RETRY_ATTEMPTS,
    VOICE_RETRY_INTERVAL,
};
use crate::state::{PageState, Shortcut};
use crate::theme::{follow_system_change, resolve_theme};

pub use view::{QuoteView, ViewElement};

/// Mute toggle label while auto-read is muted
pub const UNMUTE_LABEL: &str = "Unmute auto-read";
/// Mute toggle label while auto-read is active
pub const MUTE_LABEL: &str = "Mute auto-read";

/// Delays of the display sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    /// Pause while the old quote is faded out
    pub fade_delay: Duration,
    /// Gap between showing the text and the author
    pub author_delay: Duration,
    /// Pause before the first automatic reading
    pub auto_read_delay: Duration,
    /// Gap between voice list probes
    pub voice_retry_interval: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            fade_delay: Duration::from_millis(100),
            author_delay: Duration::from_millis(200),
            auto_read_delay: Duration::from_millis(1000),
            voice_retry_interval: VOICE_RETRY_INTERVAL,
        }
    }
}

impl SessionTiming {
    /// No delays at all
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            fade_delay: Duration::ZERO,
            author_delay: Duration::ZERO,
            auto_read_delay: Duration::ZERO,
            voice_retry_interval: Duration::ZERO,
        }
    }
}

/// Label for the mute toggle
#[must_use]
pub const fn mute_label(muted: bool) -> &'static str {
    if muted {
        UNMUTE_LABEL
    } else {
        MUTE_LABEL
    }
}

/// One quote page: state plus its collaborators
pub struct DailyQuoteSession<S, E, V> {
    store: S,
    engine: Option<Arc<E>>,
    view: V,
    book: QuoteBook,
    timing: SessionTiming,
    page: PageState,
    current_quote: Option<Quote>,
    stored_theme: Option<Theme>,
    theme: Theme,
    muted: bool,
    speaking: bool,
    voices: Vec<Voice>,
    selected_voice: Option<Voice>,
}

impl<S: PreferenceStore, E: SpeechEngine, V: QuoteView> DailyQuoteSession<S, E, V> {
    /// Create a session; `engine` is `None` when speech is unsupported
    pub fn new(store: S, engine: Option<E>, view: V, book: QuoteBook) -> Self {
        Self {
            store,
            engine: engine.map(Arc::new),
            view,
            book,
            timing: SessionTiming::default(),
            page: PageState::Loading,
            current_quote: None,
            stored_theme: None,
            theme: Theme::Light,
            muted: false,
            speaking: false,
            voices: Vec::new(),
            selected_voice: None,
        }
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: SessionTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Initialize the page for `date`, then read the quote aloud after the
    /// auto-read delay unless muted.
    pub async fn start(&mut self, date: NaiveDate, system_prefers_dark: bool) -> Result<()> {
        self.initialize(date, system_prefers_dark).await?;

        if !self.muted && self.engine.is_some() {
            tokio::time::sleep(self.timing.auto_read_delay).await;
            self.speak().await;
        }
        Ok(())
    }

    /// Run the startup sequence. A failure leaves the page in the error
    /// state; there is no retry.
    pub async fn initialize(&mut self, date: NaiveDate, system_prefers_dark: bool) -> Result<()> {
        if let Err(error) = self.try_initialize(date, system_prefers_dark).await {
            tracing::error!("Failed to initialize application: {}", error);
            self.page = PageState::Error;
            self.view.show_error();
            return Err(error);
        }
        Ok(())
    }

    async fn try_initialize(&mut self, date: NaiveDate, system_prefers_dark: bool) -> Result<()> {
        self.validate_view()?;
        self.initialize_theme(system_prefers_dark).await;
        self.initialize_speech().await;

        self.display_quote(date).await;
        self.page = PageState::Ready;
        self.view.hide_loading();
        tracing::info!("Quote page ready");
        Ok(())
    }

    fn validate_view(&self) -> Result<()> {
        for element in ViewElement::ALL {
            if !self.view.has_element(element) {
                return Err(Error::MissingElement(element.name()));
            }
        }
        Ok(())
    }

    async fn initialize_theme(&mut self, system_prefers_dark: bool) {
        let stored = read_or_default(&self.store, THEME_KEY).await;
        self.stored_theme = Preferences::parse_theme(stored.as_deref());
        self.theme = resolve_theme(self.stored_theme, system_prefers_dark);
        self.view.apply_theme(self.theme);
    }

    async fn initialize_speech(&mut self) {
        let Some(engine) = self.engine.clone() else {
            tracing::warn!("Speech synthesis not supported");
            self.view.set_enabled(ViewElement::ReadAgainButton, false);
            self.view.set_enabled(ViewElement::VoiceSelect, false);
            return;
        };

        let muted = read_or_default(&self.store, MUTE_STATUS_KEY).await;
        self.muted = Preferences::parse_muted(muted.as_deref());
        self.view.set_mute_state(self.muted, mute_label(self.muted));

        self.voices = load_voices(
            engine.as_ref(),
            VOICE_RETRY_ATTEMPTS,
            self.timing.voice_retry_interval,
        )
        .await;
        self.load_selected_voice().await;
    }

    async fn load_selected_voice(&mut self) {
        let stored = read_or_default(&self.store, SELECTED_VOICE_KEY).await;
        let selected = resolve_voice(&self.voices, stored.as_deref()).cloned();
        let value = if selected.is_some() {
            stored.unwrap_or_default()
        } else {
            String::new()
        };
        self.selected_voice = selected;
        self.view
            .set_voice_options(&voice_options(&self.voices), value.trim());
    }

    /// Show the quote for `date` with the fade-in sequence
    pub async fn display_quote(&mut self, date: NaiveDate) {
        let quote = self.book.for_date(date).clone();

        self.view.set_visible(ViewElement::QuoteText, false);
        self.view.set_visible(ViewElement::QuoteAuthor, false);
        self.view.set_date(&display_date(date));

        tokio::time::sleep(self.timing.fade_delay).await;
        self.view.set_quote(&quote);
        self.view.set_visible(ViewElement::QuoteText, true);
        self.current_quote = Some(quote);

        tokio::time::sleep(self.timing.author_delay).await;
        self.view.set_visible(ViewElement::QuoteAuthor, true);
    }

    /// Read the current quote aloud, replacing any reading in progress.
    /// Returns whether playback started.
    pub async fn speak(&mut self) -> bool {
        let Some(engine) = self.engine.clone() else {
            return false;
        };
        let Some(quote) = self.current_quote.as_ref() else {
            return false;
        };
        if self.muted {
            return false;
        }

        let utterance = Utterance::for_quote(quote, self.selected_voice.clone());
        match engine.start(&utterance).await {
            Ok(()) => {
                self.speaking = true;
                self.view.set_enabled(ViewElement::ReadAgainButton, false);
                self.view.set_audio_indicator(true);
                true
            }
            Err(error) => {
                self.on_speech_finished(SpeechOutcome::Failed(error.to_string()));
                false
            }
        }
    }

    /// Record the end of a reading
    pub fn on_speech_finished(&mut self, outcome: SpeechOutcome) {
        if let SpeechOutcome::Failed(error) = &outcome {
            tracing::error!("Speech synthesis error: {}", error);
        }
        self.speaking = false;
        self.view.set_enabled(ViewElement::ReadAgainButton, true);
        self.view.set_audio_indicator(false);
    }

    /// Flip the mute flag, persist it, and stop a reading when muting
    pub async fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        write_best_effort(
            &self.store,
            MUTE_STATUS_KEY,
            Preferences::encode_muted(self.muted),
        )
        .await;
        self.view.set_mute_state(self.muted, mute_label(self.muted));

        if self.muted && self.speaking {
            if let Some(engine) = &self.engine {
                engine.cancel();
            }
            self.on_speech_finished(SpeechOutcome::Cancelled);
        }
    }

    /// Apply and persist an explicit theme choice
    pub async fn set_theme(&mut self, theme: Theme) {
        self.stored_theme = Some(theme);
        self.theme = theme;
        self.view.apply_theme(theme);
        write_best_effort(&self.store, THEME_KEY, theme.as_str()).await;
    }

    /// Forget the explicit theme and follow the system preference again
    pub async fn follow_system_theme(&mut self, system_prefers_dark: bool) {
        self.stored_theme = None;
        write_best_effort(&self.store, THEME_KEY, "").await;
        self.theme = resolve_theme(None, system_prefers_dark);
        self.view.apply_theme(self.theme);
    }

    /// React to a system dark-mode change
    pub fn on_system_theme_change(&mut self, system_prefers_dark: bool) {
        if let Some(theme) = follow_system_change(self.stored_theme, system_prefers_dark) {
            tracing::debug!("Following system theme: {}", theme);
            self.theme = theme;
            self.view.apply_theme(theme);
        }
    }

    /// Select a voice by picker value (empty for the default voice) and persist it
    pub async fn select_voice(&mut self, value: &str) {
        self.selected_voice = resolve_voice(&self.voices, Some(value)).cloned();
        write_best_effort(&self.store, SELECTED_VOICE_KEY, value).await;
    }

    /// Run a keyboard shortcut
    pub async fn handle_shortcut(&mut self, shortcut: Shortcut) {
        match shortcut {
            Shortcut::ReadAgain => {
                self.speak().await;
            }
            Shortcut::ToggleMute => self.toggle_mute().await,
        }
    }

    /// Stop reading when the page is hidden
    pub fn on_visibility_change(&mut self, hidden: bool) {
        if hidden {
            if let Some(engine) = &self.engine {
                engine.cancel();
            }
            if self.speaking {
                self.on_speech_finished(SpeechOutcome::Cancelled);
            }
        }
    }

    /// Handle to the speech engine, for awaiting completion alongside other input
    pub fn speech_engine(&self) -> Option<Arc<E>> {
        self.engine.clone()
    }

    pub const fn page_state(&self) -> PageState {
        self.page
    }

    pub const fn current_quote(&self) -> Option<&Quote> {
        self.current_quote.as_ref()
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn stored_theme(&self) -> Option<Theme> {
        self.stored_theme
    }

    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    pub const fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub const fn selected_voice(&self) -> Option<&Voice> {
        self.selected_voice.as_ref()
    }

    pub const fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub const fn store(&self) -> &S {
        &self.store
    }
}
