//! Offline asset cache repository

#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)] // SQLite stores integers as i64

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::cache::{AssetResponse, ResponseKind};
use crate::error::{Error, Result};
use crate::util::unix_timestamp_millis_now;
use libsql::{params, Connection};

/// Trait for named asset cache storage (async)
#[allow(async_fn_in_trait)]
pub trait CacheRepository {
    /// Store a response under `cache_name`, replacing an existing entry for the URL
    async fn put(&self, cache_name: &str, url: &str, response: &AssetResponse) -> Result<()>;

    /// Find a response for `url` in any cache, most recently stored first
    async fn find(&self, url: &str) -> Result<Option<AssetResponse>>;

    /// Names of all caches holding at least one entry
    async fn cache_names(&self) -> Result<Vec<String>>;

    /// Delete a whole cache, returning the number of removed entries
    async fn delete_cache(&self, cache_name: &str) -> Result<u64>;

    /// Number of entries stored under `cache_name`
    async fn count(&self, cache_name: &str) -> Result<usize>;
}

/// libSQL implementation of `CacheRepository`
pub struct LibSqlCacheRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlCacheRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl CacheRepository for LibSqlCacheRepository<'_> {
    async fn put(&self, cache_name: &str, url: &str, response: &AssetResponse) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO cache_entries
                    (cache_name, url, status, kind, content_type, body, stored_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    cache_name,
                    url,
                    i64::from(response.status),
                    response.kind.as_str(),
                    response.content_type.clone(),
                    response.body.clone(),
                    unix_timestamp_millis_now(),
                ],
            )
            .await?;
        Ok(())
    }

    async fn find(&self, url: &str) -> Result<Option<AssetResponse>> {
        let mut rows = self
            .conn
            .query(
                "SELECT status, kind, content_type, body FROM cache_entries
                 WHERE url = ?
                 ORDER BY stored_at DESC, rowid DESC
                 LIMIT 1",
                [url],
            )
            .await?;

        let Some(row) = rows.next().await? else {
            return Ok(None);
        };

        let status: i64 = row.get(0)?;
        let kind: String = row.get(1)?;
        let content_type: Option<String> = row.get(2)?;
        let body: Vec<u8> = row.get(3)?;

        Ok(Some(AssetResponse {
            url: url.to_string(),
            status: u16::try_from(status).unwrap_or_default(),
            kind: ResponseKind::parse(&kind),
            content_type,
            body,
        }))
    }

    async fn cache_names(&self) -> Result<Vec<String>> {
        let mut rows = self
            .conn
            .query(
                "SELECT DISTINCT cache_name FROM cache_entries ORDER BY cache_name",
                (),
            )
            .await?;

        let mut names = Vec::new();
        while let Some(row) = rows.next().await? {
            names.push(row.get::<String>(0)?);
        }
        Ok(names)
    }

    async fn delete_cache(&self, cache_name: &str) -> Result<u64> {
        let removed = self
            .conn
            .execute("DELETE FROM cache_entries WHERE cache_name = ?", [cache_name])
            .await?;
        Ok(removed)
    }

    async fn count(&self, cache_name: &str) -> Result<usize> {
        let mut rows = self
            .conn
            .query(
                "SELECT COUNT(*) FROM cache_entries WHERE cache_name = ?",
                [cache_name],
            )
            .await?;

        let count: i64 = if let Some(row) = rows.next().await? {
            row.get(0)?
        } else {
            0
        };
        Ok(count as usize)
    }
}

/// In-memory `CacheRepository`, used when no database is available
#[derive(Debug, Default)]
pub struct MemoryCacheRepository {
    entries: Mutex<MemoryEntries>,
}

#[derive(Debug, Default)]
struct MemoryEntries {
    next_seq: u64,
    by_key: BTreeMap<(String, String), (u64, AssetResponse)>,
}

impl MemoryCacheRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryEntries>> {
        self.entries
            .lock()
            .map_err(|_| Error::Database("cache entries lock poisoned".to_string()))
    }
}

impl CacheRepository for MemoryCacheRepository {
    async fn put(&self, cache_name: &str, url: &str, response: &AssetResponse) -> Result<()> {
        let mut entries = self.lock()?;
        entries.next_seq += 1;
        let seq = entries.next_seq;
        entries.by_key.insert(
            (cache_name.to_string(), url.to_string()),
            (seq, response.clone()),
        );
        Ok(())
    }

    async fn find(&self, url: &str) -> Result<Option<AssetResponse>> {
        let entries = self.lock()?;
        Ok(entries
            .by_key
            .iter()
            .filter(|((_, entry_url), _)| entry_url == url)
            .max_by_key(|(_, (seq, _))| *seq)
            .map(|(_, (_, response))| response.clone()))
    }

    async fn cache_names(&self) -> Result<Vec<String>> {
        let entries = self.lock()?;
        let mut names: Vec<String> = entries
            .by_key
            .keys()
            .map(|(cache_name, _)| cache_name.clone())
            .collect();
        names.dedup();
        Ok(names)
    }

    async fn delete_cache(&self, cache_name: &str) -> Result<u64> {
        let mut entries = self.lock()?;
        let before = entries.by_key.len();
        entries.by_key.retain(|(name, _), _| name != cache_name);
        Ok((before - entries.by_key.len()) as u64)
    }

    async fn count(&self, cache_name: &str) -> Result<usize> {
        let entries = self.lock()?;
        Ok(entries
            .by_key
            .keys()
            .filter(|(name, _)| name == cache_name)
            .count())
    }
}
