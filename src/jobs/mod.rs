//! Ingest job tracking.
//!
//! The registry is a process-local ledger of accepted ingest jobs. Jobs are
//! marked completed at acceptance time: there is no pipeline wired up yet to
//! advance them, so the registry records what was accepted and when.

pub mod types;

pub use types::{IngestRequest, JobRecord, JobStatus, PhotoRef};

use std::sync::Arc;

use dashmap::DashMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// Process-local registry of accepted ingest jobs.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct JobRegistry {
    jobs: Arc<DashMap<Uuid, JobRecord>>,
}

impl JobRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            jobs: Arc::new(DashMap::new()),
        }
    }

    /// Accept a photo batch and record the resulting job.
    pub fn create(&self, photo_count: usize) -> JobRecord {
        let record = JobRecord {
            id: Uuid::new_v4(),
            photo_count,
            status: JobStatus::Completed,
            progress: 100,
            submitted_at: OffsetDateTime::now_utc(),
        };

        self.jobs.insert(record.id, record.clone());
        record
    }

    /// Look up a job by id.
    pub fn get(&self, id: &Uuid) -> Option<JobRecord> {
        self.jobs.get(id).map(|entry| entry.value().clone())
    }

    /// Number of jobs tracked.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether no jobs have been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of tracked jobs in the completed state.
    pub fn completed_count(&self) -> usize {
        self.jobs
            .iter()
            .filter(|entry| entry.value().status == JobStatus::Completed)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_assigns_unique_ids() {
        let registry = JobRegistry::new();

        let first = registry.create(3);
        let second = registry.create(5);

        assert_ne!(first.id, second.id);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn created_jobs_are_completed() {
        let registry = JobRegistry::new();

        let record = registry.create(10);

        assert_eq!(record.status, JobStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.photo_count, 10);
        assert_eq!(registry.completed_count(), 1);
    }

    #[test]
    fn get_round_trips_created_jobs() {
        let registry = JobRegistry::new();

        let record = registry.create(1);
        let fetched = registry.get(&record.id).expect("job should be tracked");

        assert_eq!(fetched.id, record.id);
        assert_eq!(fetched.photo_count, 1);
    }

    #[test]
    fn get_unknown_id_returns_none() {
        let registry = JobRegistry::new();

        assert!(registry.get(&Uuid::new_v4()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn clones_share_state() {
        let registry = JobRegistry::new();
        let clone = registry.clone();

        let record = registry.create(2);

        assert!(clone.get(&record.id).is_some());
        assert_eq!(clone.len(), 1);
    }
}
