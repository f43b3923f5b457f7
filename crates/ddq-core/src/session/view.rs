//! Presentation surface driven by the session

use crate::models::{Quote, Theme, VoiceOption};

/// Elements the page needs; all must exist at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewElement {
    QuoteText,
    QuoteAuthor,
    QuoteDate,
    ReadAgainButton,
    MuteToggle,
    ThemeToggle,
    VoiceSelect,
    Loading,
    ErrorMessage,
    AudioIndicator,
}

impl ViewElement {
    pub const ALL: [Self; 10] = [
        Self::QuoteText,
        Self::QuoteAuthor,
        Self::QuoteDate,
        Self::ReadAgainButton,
        Self::MuteToggle,
        Self::ThemeToggle,
        Self::VoiceSelect,
        Self::Loading,
        Self::ErrorMessage,
        Self::AudioIndicator,
    ];

    /// Element name used in diagnostics
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::QuoteText => "quoteText",
            Self::QuoteAuthor => "quoteAuthor",
            Self::QuoteDate => "quoteDate",
            Self::ReadAgainButton => "readAgainBtn",
            Self::MuteToggle => "muteToggle",
            Self::ThemeToggle => "themeToggle",
            Self::VoiceSelect => "voiceSelect",
            Self::Loading => "loading",
            Self::ErrorMessage => "errorMessage",
            Self::AudioIndicator => "audioIndicator",
        }
    }
}

/// Rendering surface for the quote page
pub trait QuoteView {
    /// Whether the surface provides an element
    fn has_element(&self, element: ViewElement) -> bool;

    /// Apply a theme and sync the theme toggle
    fn apply_theme(&mut self, theme: Theme);

    /// Replace the quote text and author content
    fn set_quote(&mut self, quote: &Quote);

    /// Show or hide (fade) an element
    fn set_visible(&mut self, element: ViewElement, visible: bool);

    /// Set the date label
    fn set_date(&mut self, label: &str);

    /// Reflect the mute state on the mute toggle
    fn set_mute_state(&mut self, muted: bool, label: &str);

    /// Enable or disable a control
    fn set_enabled(&mut self, element: ViewElement, enabled: bool);

    /// Replace voice picker entries and select `selected`
    fn set_voice_options(&mut self, options: &[VoiceOption], selected: &str);

    /// Toggle the "speaking" indicator
    fn set_audio_indicator(&mut self, active: bool);

    /// Remove the loading screen
    fn hide_loading(&mut self);

    /// Replace the page with the static error state
    fn show_error(&mut self);
}
