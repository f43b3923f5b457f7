//! Terminal rendering of the quote page

use std::io::{self, Write};

use ddq_core::models::{Quote, Theme, VoiceOption, DEFAULT_VOICE_LABEL};
use ddq_core::session::{QuoteView, ViewElement};

const ERROR_MESSAGE: &str = "Unable to load today's design quote. Please try again later.";

/// Writes the quote page as plain lines. Status changes (theme, mute,
/// speaking) are only announced when `announce_status` is set.
pub struct TerminalView<W: Write> {
    out: W,
    announce_status: bool,
    quote: Option<Quote>,
    theme: Theme,
    mute_label: String,
    read_again_enabled: bool,
    voice_picker_enabled: bool,
    voice_options: Vec<VoiceOption>,
    selected_voice: String,
    speaking: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(announce_status: bool) -> Self {
        Self::new(io::stdout(), announce_status)
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, announce_status: bool) -> Self {
        Self {
            out,
            announce_status,
            quote: None,
            theme: Theme::Light,
            mute_label: String::new(),
            read_again_enabled: true,
            voice_picker_enabled: true,
            voice_options: Vec::new(),
            selected_voice: String::new(),
            speaking: false,
        }
    }

    pub fn voice_options(&self) -> &[VoiceOption] {
        &self.voice_options
    }

    pub fn selected_voice(&self) -> &str {
        &self.selected_voice
    }

    /// Mirror a picker change made outside the session
    pub fn pick_voice(&mut self, value: &str) {
        self.selected_voice = value.trim().to_string();
    }

    /// One-line summary of the page controls
    pub fn status_line(&self) -> String {
        let voice = self
            .voice_options
            .iter()
            .find(|option| option.value == self.selected_voice)
            .map_or(DEFAULT_VOICE_LABEL, |option| option.label.as_str());

        let mut parts = vec![format!("theme: {}", self.theme)];
        if self.voice_picker_enabled {
            parts.push(self.mute_label.clone());
            parts.push(format!("voice: {voice}"));
        } else {
            parts.push("speech unavailable".to_string());
        }
        if self.speaking {
            parts.push("speaking".to_string());
        } else if !self.read_again_enabled {
            parts.push("read again disabled".to_string());
        }
        parts.join(" | ")
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }

    fn status(&mut self, text: &str) {
        if self.announce_status {
            self.line(&format!("[{text}]"));
        }
    }
}

impl<W: Write> QuoteView for TerminalView<W> {
    fn has_element(&self, _element: ViewElement) -> bool {
        true
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.status(&format!("theme: {theme}"));
    }

    fn set_quote(&mut self, quote: &Quote) {
        self.quote = Some(quote.clone());
    }

    fn set_visible(&mut self, element: ViewElement, visible: bool) {
        if !visible {
            return;
        }
        let Some(quote) = self.quote.clone() else {
            return;
        };
        match element {
            ViewElement::QuoteText => self.line(&format!("  \u{201c}{}\u{201d}", quote.text)),
            ViewElement::QuoteAuthor => self.line(&format!("    \u{2014} {}", quote.author)),
            _ => {}
        }
    }

    fn set_date(&mut self, label: &str) {
        self.line(label);
        self.line("");
    }

    fn set_mute_state(&mut self, muted: bool, label: &str) {
        self.mute_label = label.to_string();
        self.status(if muted { "auto-read muted" } else { "auto-read on" });
    }

    fn set_enabled(&mut self, element: ViewElement, enabled: bool) {
        match element {
            ViewElement::ReadAgainButton => self.read_again_enabled = enabled,
            ViewElement::VoiceSelect => self.voice_picker_enabled = enabled,
            _ => {}
        }
    }

    fn set_voice_options(&mut self, options: &[VoiceOption], selected: &str) {
        self.voice_options = options.to_vec();
        self.selected_voice = selected.to_string();
    }

    fn set_audio_indicator(&mut self, active: bool) {
        self.speaking = active;
        self.status(if active { "speaking" } else { "stopped" });
    }

    fn hide_loading(&mut self) {}

    fn show_error(&mut self) {
        let _ = writeln!(self.out, "{ERROR_MESSAGE}");
    }
}
