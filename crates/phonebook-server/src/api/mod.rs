//! HTTP surface of the phonebook server
//!
//! [`create_router`] assembles the full application: static assets first
//! (when configured), then the greeting, health and feature routes, and a
//! JSON 404 for everything else. Every method router carries the same
//! fallback, so an unsupported method on a known path is a 404 too.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use phonebook_common::ErrorBody;
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use tokio::{signal, sync::oneshot};
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::features::{self, FeatureState};
use crate::middleware;
use crate::store::{self, SharedStore};

/// Body of the root greeting
pub const GREETING: &str = "<h1>Hello world!</h1>";

/// Body text for requests no route matched
pub const UNKNOWN_ENDPOINT: &str = "unknown endpoint";

/// Opens the configured store, binds and serves until a shutdown signal
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let store = store::open(&config).await?;
    let app = create_router(store, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    });

    let timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let deadline = async move {
        if signalled_rx.await.is_ok() {
            info!("Waiting up to {} seconds for connections to close", timeout.as_secs());
            tokio::time::sleep(timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = async { server.await } => {
            result?;
            info!("Server shut down gracefully");
        },
        _ = deadline => {
            tracing::warn!("Shutdown timeout elapsed, dropping open connections");
        },
    }

    Ok(())
}

/// Create the application router with all routes and middleware
pub fn create_router(store: SharedStore, config: &Config) -> Router {
    let api = Router::new()
        .route("/", get(root).fallback(unknown_endpoint))
        .route(
            "/health",
            get(health_check)
                .fallback(unknown_endpoint)
                .with_state(store.clone()),
        )
        .merge(features::router(FeatureState { store }))
        .fallback(unknown_endpoint);

    let app = match config.server.static_dir {
        Some(ref dir) if dir.is_dir() => {
            info!(static_dir = %dir.display(), "Serving static assets");
            let assets = ServeDir::new(dir)
                .call_fallback_on_method_not_allowed(true)
                .fallback(api);
            Router::new().fallback_service(assets)
        },
        _ => api,
    };

    // Layers apply from innermost to outermost
    app.layer(middleware::RequestLogLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> Html<&'static str> {
    Html(GREETING)
}

/// Health check handler
async fn health_check(State(store): State<SharedStore>) -> Response {
    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "store": "connected",
                "backend": store.backend(),
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Store health check failed: {:?}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "store": "disconnected",
                    "backend": store.backend(),
                })),
            )
                .into_response()
        },
    }
}

/// Answers requests no route matched, including a known path hit with an
/// unsupported method
pub(crate) async fn unknown_endpoint() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new(UNKNOWN_ENDPOINT)))
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
