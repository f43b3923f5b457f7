//! Preference store implementations

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::{Preferences, MUTE_STATUS_KEY, SELECTED_VOICE_KEY, THEME_KEY};
use libsql::Connection;

/// Key-value storage for user preferences (async)
#[allow(async_fn_in_trait)]
pub trait PreferenceStore {
    /// Read a stored value
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// libSQL implementation of `PreferenceStore`
pub struct LibSqlPreferenceStore<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlPreferenceStore<'a> {
    /// Create a new store with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl PreferenceStore for LibSqlPreferenceStore<'_> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM preferences WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO preferences (key, value) VALUES (?, ?)",
                [key, value],
            )
            .await?;
        Ok(())
    }
}

/// In-memory `PreferenceStore`, used in tests and when durable storage is unavailable
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given entries
    #[must_use]
    pub fn with_entries<'k>(entries: impl IntoIterator<Item = (&'k str, &'k str)>) -> Self {
        let values = entries
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self {
            values: Mutex::new(values),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| Error::Database("preference store lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .map_err(|_| Error::Database("preference store lock poisoned".to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a value, treating storage failures as "not stored"
pub async fn read_or_default<S: PreferenceStore>(store: &S, key: &str) -> Option<String> {
    match store.get(key).await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!("Failed to read preference '{}': {}", key, error);
            None
        }
    }
}

/// Write a value; failures are logged and otherwise ignored
pub async fn write_best_effort<S: PreferenceStore>(store: &S, key: &str, value: &str) {
    if let Err(error) = store.set(key, value).await {
        tracing::warn!("Failed to persist preference '{}': {}", key, error);
    } else {
        tracing::debug!("Persisted preference {}={}", key, value);
    }
}

/// Load all preferences; absent or unreadable values fall back to defaults
pub async fn load_preferences<S: PreferenceStore>(store: &S) -> Preferences {
    let theme = read_or_default(store, THEME_KEY).await;
    let muted = read_or_default(store, MUTE_STATUS_KEY).await;
    let selected_voice = read_or_default(store, SELECTED_VOICE_KEY).await;

    Preferences {
        theme: Preferences::parse_theme(theme.as_deref()),
        muted: Preferences::parse_muted(muted.as_deref()),
        selected_voice,
    }
}
