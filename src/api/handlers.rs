//! HTTP API handlers.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::{Config, DEFAULT_MAX_INGEST_PHOTOS};
use crate::error::ApiError;
use crate::jobs::{IngestRequest, JobRegistry, JobStatus};
use crate::metrics;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether the service is accepting traffic.
    pub ready: Arc<AtomicBool>,
    /// Process start time, for uptime reporting.
    pub started_at: Instant,
    /// Count of clustering placeholder requests received.
    pub cluster_requests: Arc<AtomicU64>,
    /// Ledger of accepted ingest jobs.
    pub jobs: JobRegistry,
    /// Maximum photos accepted per ingest batch.
    pub max_ingest_photos: usize,
    /// Prometheus exposition handle, when a recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with default limits.
    pub fn new() -> Self {
        Self::with_max_ingest_photos(DEFAULT_MAX_INGEST_PHOTOS)
    }

    /// Create app state from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_max_ingest_photos(config.max_ingest_photos)
    }

    fn with_max_ingest_photos(max_ingest_photos: usize) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            started_at: Instant::now(),
            cluster_requests: Arc::new(AtomicU64::new(0)),
            jobs: JobRegistry::new(),
            max_ingest_photos,
            prometheus: None,
        }
    }

    /// Attach the Prometheus exposition handle.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("ready", &self.is_ready())
            .field("jobs_tracked", &self.jobs.len())
            .field("max_ingest_photos", &self.max_ingest_photos)
            .field("prometheus", &self.prometheus.is_some())
            .finish()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether service is ready.
    pub ready: bool,
}

/// Clustering placeholder response.
#[derive(Debug, Serialize)]
pub struct ClusterResponse {
    /// Fixed placeholder message.
    pub message: &'static str,
}

/// Ingest acceptance response.
#[derive(Debug, Serialize)]
pub struct IngestAccepted {
    /// Identifier of the accepted job.
    #[serde(rename = "jobId")]
    pub job_id: Uuid,
}

/// Job-status response.
#[derive(Debug, Serialize)]
pub struct JobStatusResponse {
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Completion percentage, 0-100.
    pub progress: u8,
}

/// Status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Service status.
    pub status: &'static str,
    /// Seconds since the process started.
    pub uptime_seconds: u64,
    /// Clustering placeholder requests received.
    pub cluster_requests: u64,
    /// Job counts.
    pub jobs: JobsSummary,
}

/// Job counts in the status response.
#[derive(Debug, Serialize)]
pub struct JobsSummary {
    /// Jobs tracked by the registry.
    pub tracked: usize,
    /// Jobs in the completed state.
    pub completed: usize,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if ready, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse { ready: is_ready };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Placeholder handler for creating clustering jobs.
///
/// The clustering pipeline is not integrated yet. Any request body is
/// ignored and the response never varies.
pub async fn create_cluster_job(State(state): State<AppState>) -> impl IntoResponse {
    state.cluster_requests.fetch_add(1, Ordering::Relaxed);
    metrics::inc_cluster_requests();

    Json(ClusterResponse {
        message: "TODO: implement clustering job creation",
    })
}

/// Accept a photo batch for ingestion and issue a job id.
///
/// The body is parsed leniently: anything unreadable counts as an empty
/// request and is rejected by validation, not by the JSON layer.
pub async fn ingest(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let _timer = metrics::timer_ingest();

    let request: IngestRequest = serde_json::from_slice(&body).unwrap_or_default();

    let photos = match request.photos {
        Some(photos) if !photos.is_empty() => photos,
        _ => {
            metrics::inc_ingest_rejected();
            return Err(ApiError::InvalidPayload("\"photos\" is required.".to_string()));
        }
    };

    if photos.len() > state.max_ingest_photos {
        metrics::inc_ingest_rejected();
        return Err(ApiError::InvalidPayload(format!(
            "at most {} photos per batch.",
            state.max_ingest_photos
        )));
    }

    let record = state.jobs.create(photos.len());
    metrics::inc_ingest_jobs_created();

    info!(job_id = %record.id, photos = record.photo_count, "Accepted ingest job");

    Ok((StatusCode::ACCEPTED, Json(IngestAccepted { job_id: record.id })))
}

/// Job-status lookup against the in-memory registry.
pub async fn job_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let start = Instant::now();

    let result = match state.jobs.get(&id) {
        Some(record) => {
            metrics::inc_job_status_lookup(true);
            Ok(Json(JobStatusResponse {
                status: record.status,
                progress: record.progress,
            }))
        }
        None => {
            metrics::inc_job_status_lookup(false);
            Err(ApiError::JobNotFound { id })
        }
    };

    metrics::record_http_latency(start, "job_status");
    result
}

/// Status handler - returns service status and counters.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let status = if state.is_ready() { "running" } else { "starting" };

    Json(StatusResponse {
        status,
        uptime_seconds: state.started_at.elapsed().as_secs(),
        cluster_requests: state.cluster_requests.load(Ordering::Relaxed),
        jobs: JobsSummary {
            tracked: state.jobs.len(),
            completed: state.jobs.completed_count(),
        },
    })
}

/// Prometheus exposition handler.
pub async fn metrics_exposition(State(state): State<AppState>) -> Result<String, ApiError> {
    match &state.prometheus {
        Some(handle) => Ok(handle.render()),
        None => Err(ApiError::MetricsUnavailable),
    }
}
