//! No-op cache implementation for disabled caching.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Every lookup misses, so every resolution goes to the key store. Selected
/// with `CACHE_BACKEND=none`, or via [`NullCache::unavailable`] as a fallback
/// when the configured backend is unreachable at startup.
pub struct NullCache {
    /// Backend that was configured but could not be reached.
    unavailable: Option<&'static str>,
}

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self { unavailable: None }
    }

    /// Stands in for a configured `backend` that could not be reached.
    ///
    /// Behaves like [`NullCache::new`] but fails health checks and reports
    /// the intended backend name, so `/health` shows the service as degraded.
    pub fn unavailable(backend: &'static str) -> Self {
        debug!("Using NullCache in place of unreachable {}", backend);
        Self {
            unavailable: Some(backend),
        }
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_url(&self, _short_key: &str) -> CacheResult<Option<String>> {
        Ok(None)
    }

    async fn set_url(
        &self,
        _short_key: &str,
        _long_url: &str,
        _ttl_seconds: Option<usize>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _short_key: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        self.unavailable.is_none()
    }

    fn backend(&self) -> &'static str {
        self.unavailable.unwrap_or("none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_cache_is_healthy() {
        let cache = NullCache::new();

        assert!(cache.health_check().await);
        assert_eq!(cache.backend(), "none");
    }

    #[tokio::test]
    async fn test_unavailable_cache_is_degraded() {
        let cache = NullCache::unavailable("redis");

        assert!(!cache.health_check().await);
        assert_eq!(cache.backend(), "redis");

        cache.set_url("abcdef", "https://example.com", None).await.unwrap();
        assert!(cache.get_url("abcdef").await.unwrap().is_none());
    }
}
