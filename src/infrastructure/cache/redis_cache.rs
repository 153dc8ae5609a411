//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis cache shared between service instances.
///
/// All operations are fail-open: Redis errors are logged and reported as a
/// miss (or a successful no-op), so an unavailable cache only costs a store
/// round trip.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis, validates the connection with a PING, and configures the default TTL.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379"`)
    /// - `default_ttl_seconds` - TTL applied when [`CacheService::set_url`] is called
    ///   with `ttl_seconds = None`; controlled via `CACHE_TTL_SECONDS`
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
            key_prefix: "url:".to_string(),
        })
    }

    fn build_key(&self, short_key: &str) -> String {
        format!("{}{}", self.key_prefix, short_key)
    }
}

/// TTL in seconds for a write: the requested one, else the configured default.
fn effective_ttl(requested: Option<usize>, default_ttl: u64) -> u64 {
    requested.map_or(default_ttl, |ttl| u64::try_from(ttl).unwrap_or(u64::MAX))
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_url(&self, short_key: &str) -> CacheResult<Option<String>> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(url)) => {
                debug!("Cache HIT: {} -> {}", short_key, url);
                Ok(Some(url))
            }
            Ok(None) => {
                debug!("Cache MISS: {}", short_key);
                Ok(None)
            }
            Err(e) => {
                warn!("Redis GET error for {}: {}", short_key, e);
                Ok(None)
            }
        }
    }

    async fn set_url(
        &self,
        short_key: &str,
        long_url: &str,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();
        let ttl = effective_ttl(ttl_seconds, self.default_ttl);

        match conn.set_ex::<_, _, ()>(&key, long_url, ttl).await {
            Ok(_) => {
                debug!("Cache SET: {} -> {} (TTL: {}s)", short_key, long_url, ttl);
                Ok(())
            }
            Err(e) => {
                warn!("Redis SET error for {}: {}", short_key, e);
                Ok(())
            }
        }
    }

    async fn invalidate(&self, short_key: &str) -> CacheResult<()> {
        let key = self.build_key(short_key);
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(&key).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {}", short_key);
                }
                Ok(())
            }
            Err(e) => {
                warn!("Redis DEL error for {}: {}", short_key, e);
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_ttl_uses_default() {
        assert_eq!(effective_ttl(None, 3600), 3600);
    }

    #[test]
    fn test_effective_ttl_keeps_large_defaults() {
        let default_ttl = u64::from(u32::MAX) + 1;

        assert_eq!(effective_ttl(None, default_ttl), default_ttl);
    }

    #[test]
    fn test_effective_ttl_prefers_requested() {
        assert_eq!(effective_ttl(Some(60), 3600), 60);
    }
}
