use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::Config;
use crate::store::PropertyStore;

pub mod envelope;
pub mod error;
mod health;
pub mod properties;

/// Shared handler state; the store handle is the only shared resource.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PropertyStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }
}

/// Request body limit; fits a 10MB upload once base64-encoded
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// All routes, without CORS or tracing layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest("/api/properties", properties::router())
        .fallback(health::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

/// Allow the configured client origin, with credentials.
pub fn cors_layer(client_url: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(client_url)
        .with_context(|| format!("invalid client origin {client_url}"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
}

pub async fn serve(config: &Config, store: Arc<dyn PropertyStore>) -> anyhow::Result<()> {
    let backend = store.backend_name();
    let app = router(AppState::new(store))
        .layer(cors_layer(&config.client_url)?)
        .layer(TraceLayer::new_for_http());

    let bind_address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind to address {}", bind_address))?;

    tracing::info!(
        port = config.port,
        backend,
        client_url = %config.client_url,
        "🏠 Property Dashboard API listening on http://localhost:{}",
        config.port
    );

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error running axum server")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Shutdown signal received"),
        _ = terminate => tracing::info!("SIGTERM received, shutting down gracefully"),
    }
}
