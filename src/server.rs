//! HTTP server initialization and runtime setup.
//!
//! Selects the key store and cache backends from [`Config`], wires the
//! shortener service and runs the Axum server until Ctrl-C.

use crate::api::middleware::rate_limit;
use crate::application::services::{DynShortenerService, ShortenerService};
use crate::config::{CacheBackend, Config};
use crate::domain::repositories::KeyStore;
use crate::infrastructure::cache::{CacheService, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{MemoryKeyStore, PgKeyStore};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_generator::{KeyGenerator, RandomKeyGenerator};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Opens the PostgreSQL key store and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_pg_store(config: &Config, database_url: &str) -> Result<PgKeyStore> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    Ok(PgKeyStore::new(Arc::new(pool)))
}

/// Builds the key store: PostgreSQL when configured, in-memory otherwise.
///
/// # Errors
///
/// Returns an error if PostgreSQL is configured but unreachable.
pub async fn build_store(config: &Config) -> Result<Arc<dyn KeyStore>> {
    match config.database_url {
        Some(ref url) => Ok(Arc::new(connect_pg_store(config, url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory key store");
            Ok(Arc::new(MemoryKeyStore::new()))
        }
    }
}

/// Builds the resolution cache.
///
/// An unreachable Redis degrades to [`NullCache::unavailable`] instead of
/// failing startup; `/health` then reports the cache as down.
pub async fn build_cache(config: &Config) -> Arc<dyn CacheService> {
    match (config.cache_backend, &config.redis_url) {
        (CacheBackend::Redis, Some(redis_url)) => {
            match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
                Ok(redis) => {
                    tracing::info!("Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                    Arc::new(NullCache::unavailable("redis"))
                }
            }
        }
        (CacheBackend::Memory, _) => {
            tracing::info!("Cache enabled (in-memory)");
            Arc::new(MemoryCache::new())
        }
        _ => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Key store (PostgreSQL with migrations, or in-memory)
/// - Resolution cache (Redis, in-memory, or disabled)
/// - Shortener service with a CSPRNG key generator
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Rate limit settings are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let cache = build_cache(&config).await;

    let generator: Arc<dyn KeyGenerator> = Arc::new(RandomKeyGenerator::new());
    let shortener: DynShortenerService = ShortenerService::new(store, generator, cache.clone())
        .with_max_attempts(config.key_max_attempts);

    let state = AppState::new(Arc::new(shortener), cache, config.base_url.clone());

    let limiter = rate_limit::layer(config.rate_limit_replenish_ms, config.rate_limit_burst)?;
    let app = app_router(state, limiter);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
