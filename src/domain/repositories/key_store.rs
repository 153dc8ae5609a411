//! Repository trait for short key storage.

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable, concurrency-safe storage of [`UrlEntry`] records keyed by short key.
///
/// The store is the source of truth for key assignment. Implementations must
/// make [`KeyStore::save`] an atomic check-and-insert so two writers racing on
/// the same key cannot both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryKeyStore`] - In-process concurrent map
/// - [`crate::infrastructure::persistence::PgKeyStore`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Stores a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short key is already assigned.
    /// The existing entry is never overwritten.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError>;

    /// Finds an entry by its short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlEntry))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<UrlEntry>, AppError>;

    /// Returns true if the short key is assigned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists_by_short_key(&self, short_key: &str) -> Result<bool, AppError>;

    /// Removes an entry, returning `Ok(true)` if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete_by_short_key(&self, short_key: &str) -> Result<bool, AppError>;

    /// Counts stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
