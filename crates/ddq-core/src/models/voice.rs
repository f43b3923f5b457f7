//! Speech voice model

use serde::{Deserialize, Serialize};

/// A voice offered by the speech engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Display name
    pub name: String,
    /// Language tag, e.g. `en-us`; selects the voice when speaking
    pub lang: String,
}

impl Voice {
    #[must_use]
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    /// Label shown in voice pickers: `name (lang)`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.lang)
    }
}

/// Label of the entry that selects the platform default voice
pub const DEFAULT_VOICE_LABEL: &str = "Default Voice";

/// One entry of a voice picker; `value` is empty for the default voice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceOption {
    pub value: String,
    pub label: String,
}

/// Picker entries: the default voice first, then every voice by index
#[must_use]
pub fn voice_options(voices: &[Voice]) -> Vec<VoiceOption> {
    std::iter::once(VoiceOption {
        value: String::new(),
        label: DEFAULT_VOICE_LABEL.to_string(),
    })
    .chain(voices.iter().enumerate().map(|(index, voice)| VoiceOption {
        value: index.to_string(),
        label: voice.label(),
    }))
    .collect()
}
