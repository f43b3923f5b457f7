//! User preference model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Storage key for the theme preference
pub const THEME_KEY: &str = "theme";
/// Storage key for the auto-read mute flag
pub const MUTE_STATUS_KEY: &str = "mute-status";
/// Storage key for the selected voice index
pub const SELECTED_VOICE_KEY: &str = "selected-voice";

/// Theme options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    #[default]
    Light,
    /// Dark theme
    Dark,
}

impl Theme {
    /// Stored representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Check if the theme is dark
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// Theme matching a dark/light flag
    #[must_use]
    pub const fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::InvalidInput(format!("unknown theme '{other}'"))),
        }
    }
}

/// Persisted user preferences.
///
/// `theme` is `None` when the user never picked one; the effective theme then
/// follows the system preference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Explicitly chosen theme
    pub theme: Option<Theme>,
    /// Whether auto-read is muted
    pub muted: bool,
    /// Raw stored voice selection (index into the engine's voice list)
    pub selected_voice: Option<String>,
}

impl Preferences {
    /// Decode the stored theme value; empty or unknown values mean "unset"
    #[must_use]
    pub fn parse_theme(value: Option<&str>) -> Option<Theme> {
        let value = value?.trim();
        if value.is_empty() {
            return None;
        }
        match value.parse() {
            Ok(theme) => Some(theme),
            Err(error) => {
                tracing::warn!("Ignoring stored theme: {}", error);
                None
            }
        }
    }

    /// Decode the stored mute flag; only `"true"` mutes
    #[must_use]
    pub fn parse_muted(value: Option<&str>) -> bool {
        value == Some("true")
    }

    /// Encode the mute flag for storage
    #[must_use]
    pub const fn encode_muted(muted: bool) -> &'static str {
        if muted {
            "true"
        } else {
            "false"
        }
    }

    /// Stored voice selection as an index, if it is one
    #[must_use]
    pub fn selected_voice_index(&self) -> Option<usize> {
        self.selected_voice
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
    }
}
