//! URL entry entity representing a short key assignment.

use chrono::{DateTime, Utc};

/// A persisted short key to long URL mapping.
///
/// Entries are immutable once stored: there is no update path, only
/// creation, lookup and administrative deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub id: i64,
    pub short_key: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
}

impl UrlEntry {
    /// Creates a new UrlEntry instance.
    pub fn new(id: i64, short_key: String, long_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            short_key,
            long_url,
            created_at,
        }
    }
}

/// Input data for storing a new entry.
///
/// The key store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlEntry {
    pub short_key: String,
    pub long_url: String,
}

impl NewUrlEntry {
    pub fn new(short_key: impl Into<String>, long_url: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            long_url: long_url.into(),
        }
    }
}
