//! Network access for the offline cache

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use super::{AssetRequest, AssetResponse, ResponseKind};
use crate::error::{Error, Result};

const FETCH_TIMEOUT_SECS: u64 = 10;

/// Source of network responses (async)
#[allow(async_fn_in_trait)]
pub trait Fetcher {
    /// Fetch a request from the network. Non-2xx statuses are responses,
    /// not errors; errors mean the network could not be reached.
    async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse>;
}

/// `reqwest`-backed fetcher resolving relative URLs against an origin
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    origin: Url,
}

impl HttpFetcher {
    /// Create a fetcher for assets served from `origin`
    pub fn new(origin: &str) -> Result<Self> {
        let origin = Url::parse(origin)
            .map_err(|error| Error::InvalidInput(format!("invalid origin '{origin}': {error}")))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, origin })
    }

    /// Absolute URL for a request URL
    pub fn resolve(&self, url: &str) -> Result<Url> {
        self.origin
            .join(url)
            .map_err(|error| Error::InvalidInput(format!("invalid asset url '{url}': {error}")))
    }

    fn kind_for(&self, url: &Url) -> ResponseKind {
        if url.origin() == self.origin.origin() {
            ResponseKind::Basic
        } else {
            ResponseKind::Cors
        }
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &AssetRequest) -> Result<AssetResponse> {
        let url = self.resolve(&request.url)?;
        tracing::debug!("Fetching {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);
        let body = response.bytes().await?.to_vec();

        Ok(AssetResponse {
            url: request.url.clone(),
            status,
            kind: self.kind_for(&url),
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_origin() {
        assert!(matches!(
            HttpFetcher::new("not a url"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_resolves_relative_and_absolute_urls() {
        let fetcher = HttpFetcher::new("http://localhost:3000").unwrap();
        assert_eq!(
            fetcher.resolve("/style.css").unwrap().as_str(),
            "http://localhost:3000/style.css"
        );
        let font = fetcher.resolve(crate::cache::FONT_STYLESHEET_URL).unwrap();
        assert_eq!(font.host_str(), Some("fonts.googleapis.com"));
    }

    #[test]
    fn test_response_kind_follows_origin() {
        let fetcher = HttpFetcher::new("http://localhost:3000").unwrap();
        let local = fetcher.resolve("/index.html").unwrap();
        let remote = fetcher.resolve("https://fonts.googleapis.com/css2").unwrap();
        assert_eq!(fetcher.kind_for(&local), ResponseKind::Basic);
        assert_eq!(fetcher.kind_for(&remote), ResponseKind::Cors);
    }
}
