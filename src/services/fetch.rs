// src/services/fetch.rs

//! Menu document fetch gateway.
//!
//! Issues exactly one timed, abortable GET per call against the
//! composed readability-proxy URL. Retries are the scheduler's
//! responsibility, never the gateway's.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{CACHE_CONTROL, PRAGMA};

use crate::error::{AppError, Result};
use crate::models::{FetchConfig, SourceConfig};
use crate::utils::url::{bust_url, readable_url};

/// Request headers that disable intermediary caching.
const NO_CACHE: &str = "no-cache, no-store, max-age=0, must-revalidate";

/// Single-shot text fetch, the pipeline's only suspension point.
#[async_trait]
pub trait FetchText: Send + Sync {
    /// Fetch the raw document text once.
    async fn fetch_text(&self) -> Result<String>;
}

/// HTTP gateway for the readability-proxied menu document.
pub struct MenuFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    /// Cache-busting query value, incremented per request
    bust: AtomicU64,
}

impl MenuFetcher {
    /// Create a configured fetcher for the given source.
    pub fn new(source: &SourceConfig, fetch: &FetchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(&fetch.user_agent)
            .build()?;

        // Seeded from wall-clock millis so values stay monotonic across
        // process restarts too; incremented per call within a process.
        let seed = Utc::now().timestamp_millis().max(0) as u64;

        Ok(Self {
            client,
            base_url: readable_url(&source.proxy_prefix, &source.document_url),
            timeout: Duration::from_secs(fetch.timeout_secs),
            bust: AtomicU64::new(seed),
        })
    }

    /// The composed proxy URL without the cache-busting value.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn next_bust(&self) -> u64 {
        self.bust.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl FetchText for MenuFetcher {
    async fn fetch_text(&self) -> Result<String> {
        let url = bust_url(&self.base_url, self.next_bust());
        log::debug!("GET {url}");

        let request = async {
            let response = self
                .client
                .get(&url)
                .header(PRAGMA, "no-cache")
                .header(CACHE_CONTROL, NO_CACHE)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(AppError::Http(status));
            }

            Ok(response.text().await?)
        };

        // The hard timeout drops the in-flight request future, which
        // aborts the connection.
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(AppError::Timeout(self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> MenuFetcher {
        MenuFetcher::new(&SourceConfig::default(), &FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_base_url_composition() {
        let f = fetcher();
        assert!(f.base_url().starts_with("https://r.jina.ai/http://docs.google.com/"));
        assert!(!f.base_url().contains("?v="));
    }

    #[test]
    fn test_bust_values_are_strictly_increasing() {
        let f = fetcher();
        let a = f.next_bust();
        let b = f.next_bust();
        let c = f.next_bust();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_each_call_composes_a_fresh_url() {
        let f = fetcher();
        let first = bust_url(f.base_url(), f.next_bust());
        let second = bust_url(f.base_url(), f.next_bust());
        assert_ne!(first, second);
    }
}
