//! In-memory implementation of the key store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde_json::json;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewUrlEntry, UrlEntry};
use crate::domain::repositories::KeyStore;
use crate::error::AppError;

/// Key store backed by a sharded concurrent map.
///
/// Used when no database is configured and in tests. `save` inserts through
/// the map's entry API, so the existence check and the insert happen under
/// the same shard lock.
#[derive(Debug)]
pub struct MemoryKeyStore {
    entries: DashMap<String, UrlEntry>,
    next_id: AtomicI64,
}

impl MemoryKeyStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn save(&self, new_entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        match self.entries.entry(new_entry.short_key) {
            Entry::Occupied(occupied) => Err(AppError::conflict(
                "Short key already exists",
                json!({ "short_key": occupied.key() }),
            )),
            Entry::Vacant(vacant) => {
                let entry = UrlEntry::new(
                    self.next_id.fetch_add(1, Ordering::Relaxed),
                    vacant.key().clone(),
                    new_entry.long_url,
                    Utc::now(),
                );
                vacant.insert(entry.clone());
                Ok(entry)
            }
        }
    }

    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<UrlEntry>, AppError> {
        Ok(self.entries.get(short_key).map(|e| e.value().clone()))
    }

    async fn exists_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        Ok(self.entries.contains_key(short_key))
    }

    async fn delete_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        Ok(self.entries.remove(short_key).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.entries.len() as i64)
    }
}
