//! Static host for the fetch variant's dataset.
//!
//! Serves the ZIP-to-place JSON at the same relative path the lookup page
//! fetches it from, plus a health check and basic metrics.

use std::collections::HashMap;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use frostdate_rs::{DEFAULT_DATASET_PATH, PlaceRecord};

/// Sample dataset served when no file is configured
const SAMPLE_DATASET: &str = include_str!("../../data/frost_tool_dict.json");

/// Server configuration
struct ServerConfig {
    port: u16,
    dataset_file: Option<String>,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            dataset_file: env::var("DATASET_FILE").ok(),
        }
    }
}

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    dataset: Arc<HashMap<String, PlaceRecord>>,
    metrics: Arc<Metrics>,
}

/// Server metrics
struct Metrics {
    dataset_requests: AtomicU64,
    start_time: Instant,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    // Load the dataset once at startup; it never changes afterwards
    let raw = match &config.dataset_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dataset file {}", path))?,
        None => SAMPLE_DATASET.to_string(),
    };
    let dataset: HashMap<String, PlaceRecord> =
        serde_json::from_str(&raw).context("Failed to parse dataset JSON")?;
    tracing::info!("Loaded {} ZIP records", dataset.len());

    let app = build_app(Arc::new(dataset));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Build the Axum application with routes and middleware
fn build_app(dataset: Arc<HashMap<String, PlaceRecord>>) -> Router {
    let metrics = Arc::new(Metrics {
        dataset_requests: AtomicU64::new(0),
        start_time: Instant::now(),
    });

    let state = AppState { dataset, metrics };

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // The resource the lookup widget fetches
        .route(DEFAULT_DATASET_PATH, get(serve_dataset))
        .route("/api/metrics", get(get_metrics))
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

/// Serve the full dataset as one JSON object keyed by ZIP code
async fn serve_dataset(State(state): State<AppState>) -> Json<HashMap<String, PlaceRecord>> {
    state
        .metrics
        .dataset_requests
        .fetch_add(1, Ordering::Relaxed);
    Json(state.dataset.as_ref().clone())
}

/// Get server metrics
async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    Json(MetricsResponse {
        dataset_requests: state.metrics.dataset_requests.load(Ordering::Relaxed),
        uptime_seconds: state.metrics.start_time.elapsed().as_secs(),
    })
}

#[derive(Serialize)]
struct MetricsResponse {
    dataset_requests: u64,
    uptime_seconds: u64,
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}
