//! In-process cache backed by a concurrent map.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

/// Thread-safe in-memory cache mapping short key to long URL.
///
/// Entries have no expiry: a stored mapping never changes, so a cached value
/// can only go away through [`CacheService::invalidate`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    inner: DashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently cached.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let hit = self.inner.get(short_key).map(|v| v.value().clone());
        match &hit {
            Some(_) => debug!("Cache HIT: {}", short_key),
            None => debug!("Cache MISS: {}", short_key),
        }
        Ok(hit)
    }

    async fn set_url(
        &self,
        short_key: &str,
        long_url: &str,
        _ttl_seconds: Option<usize>,
    ) -> CacheResult<()> {
        self.inner.insert(short_key.to_string(), long_url.to_string());
        debug!("Cache SET: {} -> {}", short_key, long_url);
        Ok(())
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        if self.inner.remove(short_key).is_some() {
            debug!("Cache INVALIDATE: {}", short_key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_invalidate() {
        let cache = MemoryCache::new();
        assert!(cache.get_url("abcdef").await.unwrap().is_none());

        cache
            .set_url("abcdef", "https://example.com", None)
            .await
            .unwrap();
        assert_eq!(
            cache.get_url("abcdef").await.unwrap().as_deref(),
            Some("https://example.com")
        );
        assert_eq!(cache.len(), 1);

        cache.invalidate("abcdef").await.unwrap();
        assert!(cache.get_url("abcdef").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_set_is_idempotent() {
        let cache = MemoryCache::new();

        for _ in 0..3 {
            cache
                .set_url("abcdef", "https://example.com", Some(10))
                .await
                .unwrap();
        }

        assert_eq!(cache.len(), 1);
    }
}
