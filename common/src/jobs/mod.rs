use serde::{Deserialize, Serialize};

/// Status of a background dataset-ingest job, polled by the frontend.
/// `InProgress` carries the number of rows processed so far.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress(u32),
    Completed(String),
    Failed(String),
}
