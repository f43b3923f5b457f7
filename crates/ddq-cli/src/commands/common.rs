use std::path::{Path, PathBuf};

use ddq_core::config::AppConfig;
use ddq_core::cache::AssetResponse;
use ddq_core::db::{
    CacheRepository, Database, LibSqlCacheRepository, LibSqlPreferenceStore,
    MemoryCacheRepository, MemoryPreferenceStore, PreferenceStore,
};
use ddq_core::session::{DailyQuoteSession, QuoteView};
use ddq_core::speech::{CommandSpeechEngine, SpeechEngine, SpeechOutcome};

use crate::error::CliError;

/// Settings shared by every command
pub struct Context {
    pub config: AppConfig,
    pub db_path: PathBuf,
}

impl Context {
    pub fn new(config: AppConfig, cli_db_path: Option<PathBuf>) -> Self {
        let db_path = resolve_db_path(cli_db_path, &config);
        Self { config, db_path }
    }

    /// Speech engine for the configured command, `None` when it is missing
    pub fn speech_engine(&self) -> Option<CommandSpeechEngine> {
        CommandSpeechEngine::detect(&self.config.speech_command)
    }

    pub fn require_speech_engine(&self) -> Result<CommandSpeechEngine, CliError> {
        self.speech_engine().ok_or_else(|| {
            CliError::SpeechUnavailable(format!(
                "'{}' was not found; set DDQ_SPEECH_COMMAND",
                self.config.speech_command
            ))
        })
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.config.system_prefers_dark()
    }
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>, config: &AppConfig) -> PathBuf {
    cli_db_path
        .or_else(|| config.db_path.clone())
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ddq")
        .join("ddq.db")
}

/// Preference and asset storage: the database when it opens, memory otherwise
pub struct Storage {
    database: Option<Database>,
    fallback: MemoryPreferenceStore,
    cache_fallback: MemoryCacheRepository,
}

impl Storage {
    pub async fn open(path: &Path) -> Self {
        let database = match Database::open(path).await {
            Ok(database) => Some(database),
            Err(error) => {
                tracing::warn!(
                    "Could not open {}; preferences and cached assets will not be saved: {}",
                    path.display(),
                    error
                );
                None
            }
        };
        Self {
            database,
            fallback: MemoryPreferenceStore::new(),
            cache_fallback: MemoryCacheRepository::new(),
        }
    }

    pub const fn is_durable(&self) -> bool {
        self.database.is_some()
    }

    pub fn preferences(&self) -> StoragePreferences<'_> {
        match &self.database {
            Some(database) => {
                StoragePreferences::Durable(LibSqlPreferenceStore::new(database.connection()))
            }
            None => StoragePreferences::Memory(&self.fallback),
        }
    }

    pub fn cache_entries(&self) -> StorageCache<'_> {
        match &self.database {
            Some(database) => {
                StorageCache::Durable(LibSqlCacheRepository::new(database.connection()))
            }
            None => StorageCache::Memory(&self.cache_fallback),
        }
    }
}

pub enum StoragePreferences<'a> {
    Durable(LibSqlPreferenceStore<'a>),
    Memory(&'a MemoryPreferenceStore),
}

impl PreferenceStore for StoragePreferences<'_> {
    async fn get(&self, key: &str) -> ddq_core::Result<Option<String>> {
        match self {
            Self::Durable(store) => store.get(key).await,
            Self::Memory(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> ddq_core::Result<()> {
        match self {
            Self::Durable(store) => store.set(key, value).await,
            Self::Memory(store) => store.set(key, value).await,
        }
    }
}

pub enum StorageCache<'a> {
    Durable(LibSqlCacheRepository<'a>),
    Memory(&'a MemoryCacheRepository),
}

impl CacheRepository for StorageCache<'_> {
    async fn put(
        &self,
        cache_name: &str,
        url: &str,
        response: &AssetResponse,
    ) -> ddq_core::Result<()> {
        match self {
            Self::Durable(repo) => repo.put(cache_name, url, response).await,
            Self::Memory(repo) => repo.put(cache_name, url, response).await,
        }
    }

    async fn find(&self, url: &str) -> ddq_core::Result<Option<AssetResponse>> {
        match self {
            Self::Durable(repo) => repo.find(url).await,
            Self::Memory(repo) => repo.find(url).await,
        }
    }

    async fn cache_names(&self) -> ddq_core::Result<Vec<String>> {
        match self {
            Self::Durable(repo) => repo.cache_names().await,
            Self::Memory(repo) => repo.cache_names().await,
        }
    }

    async fn delete_cache(&self, cache_name: &str) -> ddq_core::Result<u64> {
        match self {
            Self::Durable(repo) => repo.delete_cache(cache_name).await,
            Self::Memory(repo) => repo.delete_cache(cache_name).await,
        }
    }

    async fn count(&self, cache_name: &str) -> ddq_core::Result<usize> {
        match self {
            Self::Durable(repo) => repo.count(cache_name).await,
            Self::Memory(repo) => repo.count(cache_name).await,
        }
    }
}

/// Wait for the current reading to end. Ctrl+C stops it like hiding the page.
pub async fn finish_reading<S, E, V>(
    session: &mut DailyQuoteSession<S, E, V>,
) -> Option<SpeechOutcome>
where
    S: PreferenceStore,
    E: SpeechEngine,
    V: QuoteView,
{
    if !session.is_speaking() {
        return None;
    }
    let engine = session.speech_engine()?;

    tokio::select! {
        outcome = engine.finished() => {
            session.on_speech_finished(outcome.clone());
            Some(outcome)
        }
        _ = tokio::signal::ctrl_c() => {
            session.on_visibility_change(true);
            Some(SpeechOutcome::Cancelled)
        }
    }
}

pub fn describe_outcome(outcome: &SpeechOutcome) -> &'static str {
    match outcome {
        SpeechOutcome::Completed => "finished",
        SpeechOutcome::Cancelled => "stopped",
        SpeechOutcome::Failed(_) => "failed",
    }
}
