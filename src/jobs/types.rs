//! Ingest job types for the control plane.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle state of an ingest job.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// Accepted but not yet processed.
    #[default]
    Pending,
    /// All work for the job has finished.
    Completed,
}

/// Reference to one uploaded photo object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRef {
    /// Storage key of the object.
    pub key: String,
    /// URL the object can be fetched from.
    pub url: String,
}

/// Ingest request payload.
///
/// Unreadable bodies deserialize to the default (no photos) and are
/// rejected by validation rather than by the JSON layer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestRequest {
    /// Photos to ingest.
    #[serde(default)]
    pub photos: Option<Vec<PhotoRef>>,
}

/// A tracked ingest job.
#[derive(Debug, Clone, Serialize)]
pub struct JobRecord {
    /// Unique job identifier.
    pub id: Uuid,
    /// Number of photos in the batch.
    pub photo_count: usize,
    /// Current lifecycle state.
    pub status: JobStatus,
    /// Completion percentage, 0-100.
    pub progress: u8,
    /// When the job was accepted.
    #[serde(with = "time::serde::rfc3339")]
    pub submitted_at: OffsetDateTime,
}
