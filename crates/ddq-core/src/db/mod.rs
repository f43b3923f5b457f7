//! Database layer for Daily Design Quote

mod cache_repository;
mod connection;
mod migrations;
mod preference_store;

pub use cache_repository::{CacheRepository, LibSqlCacheRepository, MemoryCacheRepository};
pub use connection::Database;
pub use preference_store::{
    load_preferences, read_or_default, write_best_effort, LibSqlPreferenceStore,
    MemoryPreferenceStore, PreferenceStore,
};
