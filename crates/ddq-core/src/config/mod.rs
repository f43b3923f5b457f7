//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is loaded by the binary
//! before this runs). Blank variables count as unset.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::Theme;
use crate::speech::DEFAULT_SPEECH_COMMAND;
use crate::theme::is_system_dark_mode;
use crate::util::{is_http_url, normalize_text_option};

/// Origin the offline cache resolves relative asset URLs against
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `DDQ_DB_PATH`: preference and cache database
    pub db_path: Option<PathBuf>,
    /// `DDQ_SPEECH_COMMAND`: `espeak-ng`-compatible speech program
    pub speech_command: String,
    /// `DDQ_ORIGIN`: where same-origin assets are fetched from
    pub origin: String,
    /// `DDQ_THEME_OVERRIDE`: forces the reported system theme
    pub theme_override: Option<Theme>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            speech_command: DEFAULT_SPEECH_COMMAND.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            theme_override: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |name: &str| normalize_text_option(lookup(name));

        let origin = value("DDQ_ORIGIN").unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        if !is_http_url(&origin) {
            return Err(Error::InvalidInput(
                "DDQ_ORIGIN must start with http:// or https://".to_string(),
            ));
        }

        let theme_override = value("DDQ_THEME_OVERRIDE")
            .map(|raw| raw.parse::<Theme>())
            .transpose()?;

        Ok(Self {
            db_path: value("DDQ_DB_PATH").map(PathBuf::from),
            speech_command: value("DDQ_SPEECH_COMMAND")
                .unwrap_or_else(|| DEFAULT_SPEECH_COMMAND.to_string()),
            origin: origin.trim_end_matches('/').to_string(),
            theme_override,
        })
    }

    /// System dark-mode preference, honoring the override
    pub fn system_prefers_dark(&self) -> bool {
        self.theme_override
            .map_or_else(is_system_dark_mode, Theme::is_dark)
    }
}
