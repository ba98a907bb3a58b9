//! Article feed API server
//!
//! Accepts article submissions over HTTP and republishes them as an RSS feed,
//! backed by a Firestore collection.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    handler::Handler,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{FirestoreArticleRepository, FirestoreClient};
use app::{ArticleService, FeedService};
use config::Config;
use domain::ports::ArticleRepository;

/// Application state shared across all handlers
///
/// Services are `None` when the article store could not be initialized at startup.
#[derive(Clone)]
pub struct AppState {
    pub article_service: Option<Arc<ArticleService<dyn ArticleRepository>>>,
    pub feed_service: Option<Arc<FeedService<dyn ArticleRepository>>>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, articles: Option<Arc<dyn ArticleRepository>>) -> Self {
        Self {
            article_service: articles
                .clone()
                .map(|repo| Arc::new(ArticleService::new(repo))),
            feed_service: articles
                .map(|repo| Arc::new(FeedService::new(repo, config.feed.clone()))),
            config,
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/api/add_article",
            post(handlers::add_article.layer(middleware::from_fn_with_state(
                state.clone(),
                auth::require_api_key,
            )))
            .options(handlers::preflight),
        )
        .route(
            "/api/rss_feed",
            get(handlers::rss_feed).options(handlers::preflight),
        )
        .layer(middleware::map_response(handlers::cors_headers));

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the Firestore-backed repository, or `None` if credentials are unusable
fn connect_store(config: &Config) -> Option<Arc<dyn ArticleRepository>> {
    match config.load_credentials() {
        Ok(credentials) => {
            tracing::info!(
                project_id = %credentials.project_id(),
                collection = %config.articles_collection,
                "Firestore client initialized"
            );
            let client = Arc::new(FirestoreClient::new(credentials));
            let repo: Arc<dyn ArticleRepository> = Arc::new(FirestoreArticleRepository::new(
                client,
                config.articles_collection.clone(),
            ));
            Some(repo)
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                "Failed to initialize Firestore client; API routes will report the store as unavailable"
            );
            None
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,article_feed_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting article feed API...");

    // Load configuration
    let config = Config::from_env();
    if config.add_article_api_key.is_none() {
        tracing::warn!("ADD_ARTICLE_API_KEY is not set; article submissions will be rejected");
    }

    let articles = connect_store(&config);
    let port = config.port;
    let app = build_router(AppState::new(config, articles));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
