//! HTTP API server.
//!
//! Exposes the Radarr catalog, poster lookup, and list management over a
//! JSON API, plus static serving of the poster cache directory.

mod routes_lists;
mod routes_movies;
mod routes_posters;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::cache::DiskCache;
use crate::config::Config;
use crate::lists::ListStore;
use crate::posters::{PosterDownloader, PosterResolver};
use crate::radarr::RadarrClient;
use crate::tvdb::TvdbClient;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub radarr: Arc<RadarrClient>,
    pub tvdb: Arc<TvdbClient>,
    pub resolver: Arc<PosterResolver>,
    pub downloader: Arc<PosterDownloader>,
    pub lists: Arc<ListStore>,
}

/// Wire up clients, caches, and stores from a loaded config.
pub fn build_context(config: Config) -> Result<AppContext> {
    std::fs::create_dir_all(&config.cache.dir)
        .with_context(|| format!("creating cache directory {}", config.cache.dir.display()))?;
    std::fs::create_dir_all(&config.cache.poster_dir).with_context(|| {
        format!(
            "creating poster directory {}",
            config.cache.poster_dir.display()
        )
    })?;
    std::fs::create_dir_all(&config.lists.dir)
        .with_context(|| format!("creating lists directory {}", config.lists.dir.display()))?;

    let cache = Arc::new(DiskCache::new(&config.cache.dir));
    let radarr = Arc::new(RadarrClient::new(&config.radarr));
    let tvdb = Arc::new(TvdbClient::new(&config.tvdb));
    let resolver = Arc::new(PosterResolver::new(
        cache,
        radarr.clone(),
        Duration::from_secs(config.cache.poster_ttl_hours * 3600),
    ));
    let downloader = Arc::new(PosterDownloader::new(&config.cache.poster_dir));
    let lists = Arc::new(ListStore::new(&config.lists.dir));

    Ok(AppContext {
        config: Arc::new(config),
        radarr,
        tvdb,
        resolver,
        downloader,
        lists,
    })
}

/// Build the full application router.
pub fn create_router(ctx: AppContext) -> Router {
    let poster_dir = ctx.config.cache.poster_dir.clone();

    let api = Router::new()
        .route("/movies", get(routes_movies::list_movies))
        .route("/poster", get(routes_posters::lookup_poster))
        .route("/lists", get(routes_lists::list_lists))
        .route("/lists", post(routes_lists::create_list))
        .route("/lists/:name", get(routes_lists::get_list))
        .route("/lists/:name", delete(routes_lists::delete_list));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .nest_service("/posters", ServeDir::new(poster_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Bind and run the server until shutdown.
pub async fn start_server(ctx: AppContext, host: &str, port: u16) -> Result<()> {
    let app = create_router(ctx);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
