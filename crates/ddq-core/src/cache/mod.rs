//! Offline asset cache.
//!
//! Mirrors a versioned service-worker cache: `install` pre-caches the
//! manifest, `activate` purges caches from older versions and `fetch`
//! answers cache-first, falling back to the cached home document when a
//! navigation request cannot reach the network.

mod fetcher;

use serde::{Deserialize, Serialize};

use crate::db::CacheRepository;
use crate::error::{Error, Result};

pub use fetcher::{Fetcher, HttpFetcher};

/// Name of the current cache version
pub const CACHE_NAME: &str = "daily-design-quote-v1";

/// Cross-origin stylesheet providing the page fonts
pub const FONT_STYLESHEET_URL: &str = "https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&family=Playfair+Display:wght@400;500;600;700&display=swap";

/// Document served when a navigation request fails offline
pub const OFFLINE_DOCUMENT_URL: &str = "/index.html";

/// Sync tag acknowledged by `OfflineCache::handle_sync`
pub const BACKGROUND_SYNC_TAG: &str = "background-sync";

const SAME_ORIGIN_ASSETS: [&str; 5] = [
    "/",
    "/index.html",
    "/style.css",
    "/script.js",
    "/manifest.json",
];

/// Versioned list of assets cached at install time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheManifest {
    pub cache_name: String,
    pub urls: Vec<String>,
}

impl Default for CacheManifest {
    fn default() -> Self {
        Self {
            cache_name: CACHE_NAME.to_string(),
            urls: SAME_ORIGIN_ASSETS
                .iter()
                .map(ToString::to_string)
                .chain(std::iter::once(FONT_STYLESHEET_URL.to_string()))
                .collect(),
        }
    }
}

/// What a request is for; only documents get the offline fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestDestination {
    Document,
    Style,
    Script,
    Font,
    Manifest,
    #[default]
    Other,
}

impl RequestDestination {
    /// Guess the destination from a URL path
    #[must_use]
    pub fn infer(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        if path.ends_with('/') || path.ends_with(".html") {
            Self::Document
        } else if path.ends_with(".css") || path.contains("/css") {
            Self::Style
        } else if path.ends_with(".js") {
            Self::Script
        } else if path.ends_with(".json") {
            Self::Manifest
        } else if path.ends_with(".woff") || path.ends_with(".woff2") || path.ends_with(".ttf") {
            Self::Font
        } else {
            Self::Other
        }
    }
}

/// A request for an asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest {
    pub url: String,
    pub destination: RequestDestination,
}

impl AssetRequest {
    /// Request with the destination inferred from the URL
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let destination = RequestDestination::infer(&url);
        Self { url, destination }
    }

    /// Navigation request for a document
    #[must_use]
    pub fn navigation(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            destination: RequestDestination::Document,
        }
    }
}

/// Response visibility, as with fetch response types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseKind {
    /// Same-origin response
    Basic,
    /// Cross-origin response
    Cors,
    /// Response whose details are hidden
    Opaque,
}

impl ResponseKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Cors => "cors",
            Self::Opaque => "opaque",
        }
    }

    /// Decode a stored kind; unknown values are opaque
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "basic" => Self::Basic,
            "cors" => Self::Cors,
            _ => Self::Opaque,
        }
    }
}

/// A fetched or cached asset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub url: String,
    pub status: u16,
    pub kind: ResponseKind,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl AssetResponse {
    /// Status in the 200-299 range
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Whether a network response may be written into the cache
    #[must_use]
    pub fn is_cacheable(&self) -> bool {
        self.status == 200 && self.kind == ResponseKind::Basic
    }
}

/// Cache-first asset resolution over a repository and a network fetcher
pub struct OfflineCache<R, F> {
    manifest: CacheManifest,
    repository: R,
    fetcher: F,
}

impl<R: CacheRepository, F: Fetcher> OfflineCache<R, F> {
    pub const fn new(manifest: CacheManifest, repository: R, fetcher: F) -> Self {
        Self {
            manifest,
            repository,
            fetcher,
        }
    }

    pub const fn manifest(&self) -> &CacheManifest {
        &self.manifest
    }

    /// Pre-cache every manifest URL. All-or-nothing: a single failure stores
    /// nothing and is logged. Returns the number of cached entries.
    pub async fn install(&self) -> usize {
        match self.try_install().await {
            Ok(count) => {
                tracing::info!("Opened cache {} ({} assets)", self.manifest.cache_name, count);
                count
            }
            Err(error) => {
                tracing::error!("Failed to cache resources: {}", error);
                0
            }
        }
    }

    async fn try_install(&self) -> Result<usize> {
        let mut responses = Vec::with_capacity(self.manifest.urls.len());
        for url in &self.manifest.urls {
            let response = self.fetcher.fetch(&AssetRequest::new(url.clone())).await?;
            if !response.is_ok() {
                return Err(Error::AssetUnavailable(format!(
                    "{url} returned status {}",
                    response.status
                )));
            }
            responses.push((url, response));
        }

        for (url, response) in &responses {
            self.repository
                .put(&self.manifest.cache_name, url, response)
                .await?;
        }
        Ok(responses.len())
    }

    /// Delete every cache whose name differs from the current version.
    /// Returns the deleted cache names.
    pub async fn activate(&self) -> Result<Vec<String>> {
        let mut deleted = Vec::new();
        for name in self.repository.cache_names().await? {
            if name != self.manifest.cache_name {
                tracing::info!("Deleting old cache: {}", name);
                self.repository.delete_cache(&name).await?;
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    /// Resolve a request: cache first, then network. Successful same-origin
    /// responses are added to the cache. When both fail, navigation requests
    /// get the cached home document and anything else gets `None`.
    pub async fn fetch(&self, request: &AssetRequest) -> Option<AssetResponse> {
        match self.repository.find(&request.url).await {
            Ok(Some(cached)) => {
                tracing::debug!("Cache hit for {}", request.url);
                return Some(cached);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Cache lookup failed for {}: {}", request.url, error);
            }
        }

        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_cacheable() {
                    if let Err(error) = self
                        .repository
                        .put(&self.manifest.cache_name, &request.url, &response)
                        .await
                    {
                        tracing::warn!("Failed to cache {}: {}", request.url, error);
                    }
                }
                Some(response)
            }
            Err(error) => {
                tracing::debug!("Network fetch failed for {}: {}", request.url, error);
                if request.destination == RequestDestination::Document {
                    self.repository
                        .find(OFFLINE_DOCUMENT_URL)
                        .await
                        .ok()
                        .flatten()
                } else {
                    None
                }
            }
        }
    }

    /// Handle a background sync event. Returns whether the tag was recognized.
    pub fn handle_sync(&self, tag: &str) -> bool {
        if tag == BACKGROUND_SYNC_TAG {
            tracing::info!("Background sync triggered");
            true
        } else {
            tracing::debug!("Ignoring sync tag {}", tag);
            false
        }
    }

    /// Number of entries in the current cache
    pub async fn cached_count(&self) -> Result<usize> {
        self.repository.count(&self.manifest.cache_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, LibSqlCacheRepository};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Network stand-in serving fixed bodies; can be switched offline
    #[derive(Default)]
    struct StubFetcher {
        bodies: HashMap<String, (u16, ResponseKind)>,
        offline: AtomicBool,
    }

    impl StubFetcher {
        fn serving(urls: &[&str]) -> Self {
            Self {
                bodies: urls
                    .iter()
                    .map(|url| ((*url).to_string(), (200, ResponseKind::Basic)))
                    .collect(),
                offline: AtomicBool::new(false),
            }
        }

        fn with(mut self, url: &str, status: u16, kind: ResponseKind) -> Self {
            self.bodies.insert(url.to_string(), (status, kind));
            self
        }

        fn go_offline(&self) {
            self.offline.store(true, Ordering::SeqCst);
        }
    }

    impl Fetcher for StubFetcher {
        async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(Error::AssetUnavailable("offline".to_string()));
            }
            let (status, kind) = self
                .bodies
                .get(&request.url)
                .copied()
                .unwrap_or((404, ResponseKind::Basic));
            Ok(AssetResponse {
                url: request.url.clone(),
                status,
                kind,
                content_type: Some("text/plain".to_string()),
                body: format!("body of {}", request.url).into_bytes(),
            })
        }
    }

    fn all_manifest_urls() -> Vec<String> {
        CacheManifest::default().urls
    }

    #[test]
    fn test_default_manifest() {
        let manifest = CacheManifest::default();
        assert_eq!(manifest.cache_name, "daily-design-quote-v1");
        assert_eq!(manifest.urls.len(), 6);
        assert_eq!(manifest.urls[0], "/");
        assert_eq!(manifest.urls[5], FONT_STYLESHEET_URL);
    }

    #[test]
    fn test_destination_inference() {
        assert_eq!(RequestDestination::infer("/"), RequestDestination::Document);
        assert_eq!(
            RequestDestination::infer("/index.html"),
            RequestDestination::Document
        );
        assert_eq!(RequestDestination::infer("/style.css"), RequestDestination::Style);
        assert_eq!(
            RequestDestination::infer(FONT_STYLESHEET_URL),
            RequestDestination::Style
        );
        assert_eq!(RequestDestination::infer("/script.js"), RequestDestination::Script);
        assert_eq!(RequestDestination::infer("/icon.png"), RequestDestination::Other);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_install_caches_manifest() {
        let db = Database::open_in_memory().await.unwrap();
        let urls = all_manifest_urls();
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let cache = OfflineCache::new(
            CacheManifest::default(),
            LibSqlCacheRepository::new(db.connection()),
            StubFetcher::serving(&url_refs).with(FONT_STYLESHEET_URL, 200, ResponseKind::Cors),
        );

        assert_eq!(cache.install().await, 6);
        assert_eq!(cache.cached_count().await.unwrap(), 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_install_is_all_or_nothing() {
        let db = Database::open_in_memory().await.unwrap();
        // "/manifest.json" is missing and answers 404
        let cache = OfflineCache::new(
            CacheManifest::default(),
            LibSqlCacheRepository::new(db.connection()),
            StubFetcher::serving(&["/", "/index.html", "/style.css", "/script.js"]),
        );

        assert_eq!(cache.install().await, 0);
        assert_eq!(cache.cached_count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_activate_purges_other_versions() {
        let db = Database::open_in_memory().await.unwrap();
        let repo = LibSqlCacheRepository::new(db.connection());
        let stale = AssetResponse {
            url: "/".to_string(),
            status: 200,
            kind: ResponseKind::Basic,
            content_type: None,
            body: b"old".to_vec(),
        };
        repo.put("daily-design-quote-v0", "/", &stale).await.unwrap();
        repo.put(CACHE_NAME, "/", &stale).await.unwrap();

        let cache = OfflineCache::new(CacheManifest::default(), repo, StubFetcher::default());
        let deleted = cache.activate().await.unwrap();

        assert_eq!(deleted, vec!["daily-design-quote-v0".to_string()]);
        assert_eq!(cache.cached_count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_fetch_caches_basic_ok_responses_only() {
        let db = Database::open_in_memory().await.unwrap();
        let cache = OfflineCache::new(
            CacheManifest::default(),
            LibSqlCacheRepository::new(db.connection()),
            StubFetcher::serving(&["/icon.png"]).with(
                "https://cdn.example.com/a.js",
                200,
                ResponseKind::Cors,
            ),
        );

        let icon = cache.fetch(&AssetRequest::new("/icon.png")).await.unwrap();
        assert_eq!(icon.status, 200);
        let missing = cache.fetch(&AssetRequest::new("/nope.png")).await.unwrap();
        assert_eq!(missing.status, 404);
        let cross = cache
            .fetch(&AssetRequest::new("https://cdn.example.com/a.js"))
            .await
            .unwrap();
        assert_eq!(cross.kind, ResponseKind::Cors);

        assert_eq!(cache.cached_count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_offline_fetch_serves_cache_and_home_document() {
        let db = Database::open_in_memory().await.unwrap();
        let urls = all_manifest_urls();
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let cache = OfflineCache::new(
            CacheManifest::default(),
            LibSqlCacheRepository::new(db.connection()),
            StubFetcher::serving(&url_refs),
        );
        cache.install().await;
        cache.fetcher.go_offline();

        let style = cache.fetch(&AssetRequest::new("/style.css")).await.unwrap();
        assert_eq!(style.body, b"body of /style.css".to_vec());

        let page = cache
            .fetch(&AssetRequest::navigation("/about"))
            .await
            .unwrap();
        assert_eq!(page.body, b"body of /index.html".to_vec());

        assert!(cache.fetch(&AssetRequest::new("/logo.png")).await.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_handle_sync_recognizes_background_tag() {
        let db = Database::open_in_memory().await.unwrap();
        let cache = OfflineCache::new(
            CacheManifest::default(),
            LibSqlCacheRepository::new(db.connection()),
            StubFetcher::default(),
        );
        assert!(cache.handle_sync("background-sync"));
        assert!(!cache.handle_sync("other"));
    }
}
