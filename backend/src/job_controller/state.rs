//! Shared state for background work and the in-memory dataset.
//!
//! Dataset ingestion runs outside the request/response cycle (see
//! `services::dataset::upload`). Its progress flows through an MPSC channel
//! into the shared jobs map, which the status endpoint reads. The dataset
//! itself lives behind its own lock and is only ever replaced wholesale
//! once an ingest job finishes.

use crate::services::dataset::extract::Dataset;
use common::jobs::JobStatus;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{mpsc, RwLock};

/// A thread-safe, shareable container for the state of all ingest jobs.
///
/// Created in `main.rs` and shared across the Actix application as
/// `web::Data`.
#[derive(Clone)]
pub struct JobsState {
    /// Map from job ID to its current status; the single source of truth
    /// for everything the polling endpoint reports.
    pub jobs: Arc<RwLock<HashMap<String, JobStatus>>>,

    /// Sender half of the update channel. Blocking workers push
    /// `JobUpdate` messages here instead of taking the write lock
    /// themselves.
    pub tx: mpsc::Sender<JobUpdate>,
}

/// The one in-memory sales dataset, if any. `None` until a CSV has been
/// ingested; replaced as a whole on every successful upload.
#[derive(Clone)]
pub struct DatasetState {
    pub dataset: Arc<RwLock<Option<Dataset>>>,
}

/// A status update for a specific ingest job, sent by background workers
/// via `JobsState.tx`.
#[derive(Debug)]
pub struct JobUpdate {
    pub(crate) job_id: String,
    pub(crate) status: JobStatus,
}

impl JobUpdate {
    pub fn new(job_id: impl Into<String>, status: JobStatus) -> Self {
        Self {
            job_id: job_id.into(),
            status,
        }
    }
}

/// Central job updater. Spawned once from `main.rs`; drains the update
/// channel into the shared jobs map.
pub async fn start_job_updater(state: JobsState, mut rx: mpsc::Receiver<JobUpdate>) {
    while let Some(update) = rx.recv().await {
        let mut jobs = state.jobs.write().await;
        jobs.insert(update.job_id.clone(), update.status);
    }
}
