//! HTTP server initialization and runtime setup.
//!
//! Wires the configured storage backend, cache, code generator and Axum
//! server lifecycle together.

use crate::application::services::ShortenService;
use crate::config::{Config, StorageBackend};
use crate::domain::codegen::RandomCodeGenerator;
use crate::domain::repositories::MappingStore;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{FileStore, MemoryStore, PgStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - The mapping store backend (Postgres with migrations, file journal, or memory)
/// - Redis cache (or NullCache fallback)
/// - The shorten service
/// - Axum HTTP server with graceful shutdown on SIGINT
///
/// # Errors
///
/// Returns an error if the backend cannot be opened, the bind fails, or a
/// server runtime error occurs.
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn MappingStore> = match config.storage_backend() {
        StorageBackend::Postgres(dsn) => {
            let pool = PgPool::connect(&dsn)
                .await
                .context("Failed to connect to database")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to migrate")?;
            tracing::info!("Connected to database");
            Arc::new(PgStore::new(pool))
        }
        StorageBackend::File(path) => {
            let store = FileStore::open(&path)
                .await
                .context("Failed to open file journal")?;
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::info!("Using in-memory storage");
            Arc::new(MemoryStore::new())
        }
    };

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let generator = Arc::new(RandomCodeGenerator::new(config.code_length));
    let service = Arc::new(ShortenService::new(
        store.clone(),
        generator,
        config.base_url.clone(),
    ));

    let state = AppState {
        service,
        store,
        cache,
    };

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
