//! Data models for Daily Design Quote

mod preferences;
mod quote;
mod voice;

pub use preferences::{Preferences, Theme, MUTE_STATUS_KEY, SELECTED_VOICE_KEY, THEME_KEY};
pub use quote::{Quote, QuoteBook};
pub use voice::{voice_options, Voice, VoiceOption, DEFAULT_VOICE_LABEL};
