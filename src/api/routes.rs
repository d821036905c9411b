//! HTTP API route definitions.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    create_cluster_job, health, ingest, job_status, metrics_exposition, ready, status, AppState,
};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health))
        .route("/ready", get(ready))
        // Control-plane endpoints
        .route("/cluster", post(create_cluster_job))
        .route("/ingest", post(ingest))
        .route("/jobs/:id/status", get(job_status))
        // Status + metrics endpoints
        .route("/api/v1/status", get(status))
        .route("/metrics", get(metrics_exposition))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create a minimal health-only router (for startup).
pub fn health_router() -> Router {
    Router::new().route("/health", get(health))
}
