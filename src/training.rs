//! Background training jobs.
//!
//! Classifier training is an explicit batch operation with its own
//! lifecycle: a job is queued, runs off the request path, and on success
//! publishes the new model atomically. In-flight classification requests
//! keep using the previous model until the swap; they never observe a
//! partially trained one.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use uuid::Uuid;

use crate::classifier::TrainingSummary;
use crate::errors::{AppError, Result};

/// Lifecycle state of a training job.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobState {
    Queued,
    Running,
    Completed { summary: TrainingSummary },
    Failed { error: String },
}

/// One training job record.
#[derive(Debug, Clone, Serialize)]
pub struct TrainJob {
    pub job_id: Uuid,
    #[serde(flatten)]
    pub state: JobState,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// In-memory registry of training jobs.
#[derive(Default)]
pub struct JobRegistry {
    jobs: RwLock<HashMap<Uuid, TrainJob>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new queued job and return its id.
    pub fn enqueue(&self) -> Uuid {
        let job_id = Uuid::new_v4();
        let job = TrainJob {
            job_id,
            state: JobState::Queued,
            created_at: Utc::now(),
            finished_at: None,
        };
        self.jobs.write().insert(job_id, job);
        job_id
    }

    pub fn mark_running(&self, job_id: Uuid) {
        if let Some(job) = self.jobs.write().get_mut(&job_id) {
            job.state = JobState::Running;
        }
    }

    pub fn mark_completed(&self, job_id: Uuid, summary: TrainingSummary) {
        if let Some(job) = self.jobs.write().get_mut(&job_id) {
            job.state = JobState::Completed { summary };
            job.finished_at = Some(Utc::now());
        }
    }

    pub fn mark_failed(&self, job_id: Uuid, error: String) {
        if let Some(job) = self.jobs.write().get_mut(&job_id) {
            job.state = JobState::Failed { error };
            job.finished_at = Some(Utc::now());
        }
    }

    /// Fetch a job record.
    pub fn get(&self, job_id: Uuid) -> Result<TrainJob> {
        self.jobs
            .read()
            .get(&job_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("training job {job_id}")))
    }
}
