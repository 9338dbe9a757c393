//! Background cache of the issuer's published JWK set.
//!
//! Verification never waits on this cache. A stale or empty cache triggers a
//! single fire-and-forget fetch; failures are logged and otherwise ignored.
//! After any attempt, no new fetch starts until the retry interval has passed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use moka::future::Cache;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

pub const KEY_SET_TTL: Duration = Duration::from_secs(60 * 60);
/// Minimum gap between two fetch attempts, successful or not.
pub const KEY_SET_RETRY_INTERVAL: Duration = Duration::from_secs(60);
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum KeySetError {
    #[error("key set request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct KeySetCache {
    jwks_uri: String,
    client: reqwest::Client,
    // Single entry keyed by unit; moka handles expiry.
    cache: Cache<(), Arc<JwkSet>>,
    refreshing: Arc<AtomicBool>,
    last_attempt: Mutex<Option<Instant>>,
    retry_interval: Duration,
}

impl KeySetCache {
    pub fn new(jwks_uri: impl Into<String>) -> Result<Self, KeySetError> {
        Self::with_ttl(jwks_uri, KEY_SET_TTL)
    }

    pub fn with_ttl(jwks_uri: impl Into<String>, ttl: Duration) -> Result<Self, KeySetError> {
        let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
        Ok(Self {
            jwks_uri: jwks_uri.into(),
            client,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
            refreshing: Arc::new(AtomicBool::new(false)),
            last_attempt: Mutex::new(None),
            retry_interval: KEY_SET_RETRY_INTERVAL,
        })
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn jwks_uri(&self) -> &str {
        &self.jwks_uri
    }

    pub fn is_fresh(&self) -> bool {
        self.cache.contains_key(&())
    }

    /// A background fetch is running.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    pub async fn current(&self) -> Option<Arc<JwkSet>> {
        self.cache.get(&()).await
    }

    /// Fetch now and store the result.
    pub async fn refresh(&self) -> Result<Arc<JwkSet>, KeySetError> {
        fetch_into(&self.client, &self.jwks_uri, &self.cache).await
    }

    /// Spawn a background fetch when the cache is stale.
    ///
    /// Returns `true` only when a fetch was started. Nothing happens outside
    /// a Tokio runtime, while another fetch is in flight, or within the retry
    /// interval of the previous attempt.
    pub fn refresh_if_stale(&self) -> bool {
        if self.is_fresh() {
            return false;
        }
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("key_set.refresh_skipped reason=no_runtime");
            return false;
        };

        {
            let mut last_attempt = self.last_attempt.lock();
            if last_attempt.is_some_and(|at| at.elapsed() < self.retry_interval) {
                return false;
            }
            if self.refreshing.swap(true, Ordering::AcqRel) {
                return false;
            }
            *last_attempt = Some(Instant::now());
        }

        let client = self.client.clone();
        let uri = self.jwks_uri.clone();
        let cache = self.cache.clone();
        let refreshing = Arc::clone(&self.refreshing);
        handle.spawn(async move {
            if let Err(e) = fetch_into(&client, &uri, &cache).await {
                warn!(error = %e, jwks_uri = %uri, "key_set.fetch_failed");
            }
            refreshing.store(false, Ordering::Release);
        });
        true
    }
}

async fn fetch_into(
    client: &reqwest::Client,
    uri: &str,
    cache: &Cache<(), Arc<JwkSet>>,
) -> Result<Arc<JwkSet>, KeySetError> {
    let set: JwkSet = client
        .get(uri)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    let set = Arc::new(set);
    cache.insert((), Arc::clone(&set)).await;
    info!(keys = set.keys.len(), jwks_uri = %uri, "key_set.refreshed");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    // Discard port; connections are refused immediately.
    const UNREACHABLE: &str = "http://127.0.0.1:9/.well-known/jwks.json";

    async fn wait_idle(cache: &KeySetCache) {
        while cache.is_refreshing() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Answers every connection with a fixed, empty key set.
    async fn serve_empty_key_set() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 4096];
                    let mut read = 0;
                    while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        match socket.read(&mut buf[read..]).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => read += n,
                        }
                    }
                    let body = r#"{"keys":[]}"#;
                    let response = format!(
                        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });
        format!("http://{addr}/.well-known/jwks.json")
    }

    #[test]
    fn no_refresh_outside_runtime() {
        let cache = KeySetCache::new(UNREACHABLE).unwrap();
        assert!(!cache.is_fresh());
        assert!(!cache.refresh_if_stale());
    }

    #[tokio::test]
    async fn only_one_refresh_in_flight() {
        let cache = KeySetCache::new(UNREACHABLE)
            .unwrap()
            .with_retry_interval(Duration::ZERO);
        assert!(cache.refresh_if_stale());
        assert!(!cache.refresh_if_stale());
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_empty() {
        let cache = KeySetCache::new(UNREACHABLE).unwrap();
        assert!(cache.refresh().await.is_err());
        assert!(cache.current().await.is_none());
        assert!(!cache.is_fresh());
    }

    #[tokio::test]
    async fn failed_fetch_is_not_retried_within_interval() {
        let cache = KeySetCache::new(UNREACHABLE).unwrap();
        assert!(cache.refresh_if_stale());
        wait_idle(&cache).await;

        assert!(!cache.is_fresh());
        for _ in 0..5 {
            assert!(!cache.refresh_if_stale());
        }
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_after_interval() {
        let cache = KeySetCache::new(UNREACHABLE)
            .unwrap()
            .with_retry_interval(Duration::from_millis(50));
        assert!(cache.refresh_if_stale());
        wait_idle(&cache).await;
        assert!(!cache.refresh_if_stale());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.refresh_if_stale());
    }

    #[tokio::test]
    async fn successful_fetch_fills_the_cache() {
        let cache = KeySetCache::new(serve_empty_key_set().await).unwrap();

        let set = cache.refresh().await.unwrap();
        assert!(set.keys.is_empty());
        assert!(cache.is_fresh());
        assert!(cache.current().await.is_some());
        cache.cache.run_pending_tasks().await;
        assert_eq!(cache.cache.entry_count(), 1);
        assert!(!cache.refresh_if_stale());
    }

    #[tokio::test]
    async fn background_refresh_fills_the_cache() {
        let cache = KeySetCache::new(serve_empty_key_set().await).unwrap();

        assert!(cache.refresh_if_stale());
        wait_idle(&cache).await;

        assert!(cache.is_fresh());
        assert!(!cache.refresh_if_stale());
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let cache = KeySetCache::with_ttl(serve_empty_key_set().await, Duration::from_millis(50))
            .unwrap()
            .with_retry_interval(Duration::ZERO);
        cache.refresh().await.unwrap();
        assert!(cache.is_fresh());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(!cache.is_fresh());
        assert!(cache.refresh_if_stale());
    }
}
