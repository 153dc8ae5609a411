//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::DynShortenerService;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix for short URLs, e.g. `https://s.example.com`.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        shortener: Arc<DynShortenerService>,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            shortener,
            cache,
            base_url: base_url.into(),
        }
    }
}
