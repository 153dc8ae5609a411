#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use short_keys::application::services::{DynShortenerService, ShortenerService};
use short_keys::domain::entities::{NewUrlEntry, UrlEntry};
use short_keys::domain::repositories::KeyStore;
use short_keys::error::AppError;
use short_keys::infrastructure::cache::{CacheService, MemoryCache};
use short_keys::infrastructure::persistence::MemoryKeyStore;
use short_keys::state::AppState;
use short_keys::utils::key_generator::{KeyGenerator, RandomKeyGenerator};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

/// Builds a state backed entirely by in-memory components.
pub fn create_test_state() -> AppState {
    create_state_with(
        Arc::new(MemoryKeyStore::new()),
        Arc::new(RandomKeyGenerator::new()),
        Arc::new(MemoryCache::new()),
        1000,
    )
}

pub fn build_service(
    store: Arc<dyn KeyStore>,
    generator: Arc<dyn KeyGenerator>,
    cache: Arc<dyn CacheService>,
    max_attempts: usize,
) -> DynShortenerService {
    ShortenerService::new(store, generator, cache).with_max_attempts(max_attempts)
}

pub fn create_state_with(
    store: Arc<dyn KeyStore>,
    generator: Arc<dyn KeyGenerator>,
    cache: Arc<dyn CacheService>,
    max_attempts: usize,
) -> AppState {
    let shortener = build_service(store, generator, cache.clone(), max_attempts);

    AppState::new(Arc::new(shortener), cache, BASE_URL)
}

/// Full router (without rate limiting) over the given state.
pub fn create_test_router(state: AppState) -> Router {
    short_keys::routes::router(state)
}

/// Generator that replays a fixed list of candidates in a loop.
pub struct ScriptedKeyGenerator {
    keys: Vec<String>,
    next: AtomicUsize,
}

impl ScriptedKeyGenerator {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            next: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl KeyGenerator for ScriptedKeyGenerator {
    fn generate(&self) -> String {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.keys[i % self.keys.len()].clone()
    }
}

/// Key store wrapper that counts lookups reaching the underlying store.
#[derive(Default)]
pub struct CountingKeyStore {
    inner: MemoryKeyStore,
    finds: AtomicUsize,
}

impl CountingKeyStore {
    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyStore for CountingKeyStore {
    async fn save(&self, entry: NewUrlEntry) -> Result<UrlEntry, AppError> {
        self.inner.save(entry).await
    }

    async fn find_by_short_key(&self, short_key: &str) -> Result<Option<UrlEntry>, AppError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_short_key(short_key).await
    }

    async fn exists_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        self.inner.exists_by_short_key(short_key).await
    }

    async fn delete_by_short_key(&self, short_key: &str) -> Result<bool, AppError> {
        self.inner.delete_by_short_key(short_key).await
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.inner.count().await
    }
}

/// Inserts a fixed peer address, standing in for
/// `into_make_service_with_connect_info` in in-process tests.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
