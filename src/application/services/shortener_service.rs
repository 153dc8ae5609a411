//! Short key assignment and resolution service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::KeyStore;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::key_generator::{KeyGenerator, is_valid_key, validate_custom_key};
use crate::utils::url_validator::validate_long_url;

/// Default number of candidate keys tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Service type used by the HTTP layer, with backends chosen at startup.
pub type DynShortenerService = ShortenerService<dyn KeyStore, dyn KeyGenerator>;

/// Service for assigning short keys and resolving them back to URLs.
///
/// The key store is the source of truth; the cache is a read-through copy
/// keyed by short key and is only written after the store confirms a mapping.
/// All collaborators are injected at construction.
pub struct ShortenerService<S: KeyStore + ?Sized, G: KeyGenerator + ?Sized> {
    store: Arc<S>,
    generator: Arc<G>,
    cache: Arc<dyn CacheService>,
    max_attempts: usize,
}

impl<S: KeyStore + ?Sized, G: KeyGenerator + ?Sized> ShortenerService<S, G> {
    /// Creates a new shortener service.
    pub fn new(store: Arc<S>, generator: Arc<G>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            store,
            generator,
            cache,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets the number of candidate keys tried per shorten call.
    ///
    /// Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Assigns a short key to `long_url` and stores the mapping.
    ///
    /// # Key Assignment
    ///
    /// - With `custom_key`: validates its shape and uses it, or fails if taken
    /// - Without: samples random keys until a free one is stored, up to
    ///   the configured attempt budget
    ///
    /// A generated key that loses an insert race to a concurrent caller is
    /// silently replaced with a new candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom key is malformed.
    ///
    /// Returns [`AppError::Conflict`] if the custom key is already assigned.
    ///
    /// Returns [`AppError::KeyspaceExhausted`] if no free key was found.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(
        &self,
        long_url: String,
        custom_key: Option<String>,
    ) -> Result<UrlEntry, AppError> {
        validate_long_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let entry = match custom_key {
            Some(key) => self.save_custom(key, long_url).await?,
            None => self.save_generated(long_url).await?,
        };

        self.populate_cache(&entry.short_key, &entry.long_url).await;

        info!(
            "URL shortened. Original: {}, Short key: {}",
            entry.long_url, entry.short_key
        );

        Ok(entry)
    }

    /// Resolves a short key to its long URL.
    ///
    /// Consults the cache first; on a miss reads the store and populates the
    /// cache with the confirmed mapping. Misses are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is not assigned.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn resolve(&self, short_key: &str) -> Result<String, AppError> {
        // Keys of any other shape can never have been assigned.
        if !is_valid_key(short_key) {
            return Err(not_found_error(short_key));
        }

        match self.cache.get_url(short_key).await {
            Ok(Some(long_url)) => return Ok(long_url),
            Ok(None) => {}
            Err(e) => warn!("Cache lookup failed for {}: {}", short_key, e),
        }

        let entry = self
            .store
            .find_by_short_key(short_key)
            .await?
            .ok_or_else(|| not_found_error(short_key))?;

        self.populate_cache(&entry.short_key, &entry.long_url).await;

        Ok(entry.long_url)
    }

    /// Deletes the entry for a short key and drops it from the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the key is not assigned.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn delete(&self, short_key: &str) -> Result<(), AppError> {
        if !self.store.delete_by_short_key(short_key).await? {
            return Err(not_found_error(short_key));
        }

        if let Err(e) = self.cache.invalidate(short_key).await {
            warn!("Failed to invalidate cache for {}: {}", short_key, e);
        }

        info!("Short key deleted: {}", short_key);
        Ok(())
    }

    /// Number of assigned keys.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.store.count().await
    }

    /// Constructs the public short URL for a key.
    pub fn get_short_url(&self, base_url: &str, short_key: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_key)
    }

    async fn save_custom(&self, key: String, long_url: String) -> Result<UrlEntry, AppError> {
        validate_custom_key(&key)?;

        if self.store.exists_by_short_key(&key).await? {
            return Err(duplicate_key_error(&key));
        }

        // A conflict here means another caller took the key after our check;
        // for a caller-chosen key that is still a duplicate, not a retry.
        match self.store.save(NewUrlEntry::new(key.clone(), long_url)).await {
            Err(AppError::Conflict { .. }) => Err(duplicate_key_error(&key)),
            other => other,
        }
    }

    async fn save_generated(&self, long_url: String) -> Result<UrlEntry, AppError> {
        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate();

            if self.store.exists_by_short_key(&candidate).await? {
                debug!("Key collision on attempt {}: {}", attempt, candidate);
                continue;
            }

            match self
                .store
                .save(NewUrlEntry::new(candidate.clone(), long_url.clone()))
                .await
            {
                Ok(entry) => return Ok(entry),
                Err(AppError::Conflict { .. }) => {
                    debug!("Lost insert race on attempt {}: {}", attempt, candidate);
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            "No free short key after {} attempts; key store may be saturated",
            self.max_attempts
        );

        Err(AppError::keyspace_exhausted(
            "Failed to generate unique short key",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    async fn populate_cache(&self, short_key: &str, long_url: &str) {
        if let Err(e) = self.cache.set_url(short_key, long_url, None).await {
            warn!("Failed to cache {}: {}", short_key, e);
        }
    }
}

fn duplicate_key_error(key: &str) -> AppError {
    AppError::conflict("Short key already exists", json!({ "short_key": key }))
}

fn not_found_error(key: &str) -> AppError {
    AppError::not_found("Short key not found", json!({ "short_key": key }))
}
