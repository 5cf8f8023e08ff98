//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, cache selection, and the Axum
//! server lifecycle.

use crate::config::{CacheBackend, Config};
use crate::infrastructure::cache::{ListingCache, MemoryCache, NullCache, RedisCache};
use crate::infrastructure::persistence::{PgCategoryRepository, PgProductRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

/// Connection attempts made before start-up gives up.
const CONNECT_ATTEMPTS: usize = 5;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (retried with backoff)
/// - Apply migrations
/// - Listing cache (memory, Redis or disabled)
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after every retry
/// - Migrations fail
/// - The Redis cache was requested without a Redis URL
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let cache = build_cache(&config).await?;

    let pool = Arc::new(pool);
    let state = AppState::new(
        Arc::new(PgProductRepository::new(pool.clone())),
        Arc::new(PgCategoryRepository::new(pool)),
        cache,
        config.max_page_size,
    );

    let app = app_router(state, &config.static_dir)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
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

/// Opens the connection pool, retrying with exponential backoff and jitter
/// across [`CONNECT_ATTEMPTS`] attempts.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    Retry::start(connect_backoff(), || {
        let options = options.clone();
        async move {
            options
                .connect(&config.database_url)
                .await
                .inspect_err(|e| tracing::warn!(error = %e, "Database connection attempt failed"))
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Jittered delays between connection attempts, at most 0.5s, 1s, 2s, 4s.
fn connect_backoff() -> impl Iterator<Item = Duration> {
    ExponentialBackoff::from_millis(2)
        .factor(250)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(CONNECT_ATTEMPTS - 1)
}

/// Builds the listing cache selected by `CACHE_BACKEND`.
///
/// An unreachable Redis does not stop start-up: listings are served
/// uncached until the service is restarted.
async fn build_cache(config: &Config) -> Result<Arc<dyn ListingCache>> {
    let ttl = config.cache_ttl();

    let cache: Arc<dyn ListingCache> = match config.cache_backend {
        CacheBackend::Memory => match config.cache_capacity() {
            Some(capacity) => {
                tracing::info!(ttl = ?ttl, capacity = capacity.get(), "Cache enabled (memory, LRU bounded)");
                Arc::new(MemoryCache::bounded(ttl, capacity))
            }
            None => {
                tracing::info!(ttl = ?ttl, "Cache enabled (memory)");
                Arc::new(MemoryCache::new(ttl))
            }
        },
        CacheBackend::Redis => {
            let redis_url = config
                .redis_url
                .as_deref()
                .context("CACHE_BACKEND=redis requires REDIS_URL or REDIS_HOST")?;
            match RedisCache::connect(redis_url, ttl).await {
                Ok(redis) => {
                    tracing::info!(ttl = ?ttl, "Cache enabled (Redis)");
                    Arc::new(redis)
                }
                Err(e) => {
                    tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                    Arc::new(NullCache::new())
                }
            }
        }
        CacheBackend::None => {
            tracing::info!("Cache disabled (NullCache)");
            Arc::new(NullCache::new())
        }
    };

    Ok(cache)
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
