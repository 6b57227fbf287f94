//! Manages the uploaded sales dataset: ingest, status and catalogs.
//!
//! The provided routes are:
//! - `POST /api/dataset/upload`: multipart/form-data upload with a `file`
//!   field holding the CSV. The header line is validated inline, then a
//!   background ingest job parses the rows and extracts the per-role
//!   catalogs. The response body is the job id.
//!
//! - `GET /api/dataset/jobs/{job_id}`: poll an ingest job. Returns the
//!   current `JobStatus` (`Pending`, `InProgress`, `Completed`, `Failed`).
//!
//! - `GET /api/dataset/status`: dataset availability summary (row/column
//!   counts) for the frontend header.
//!
//! - `GET /api/dataset/catalogs`: role name to candidate-value lists
//!   extracted from the dataset; `{}` while nothing is loaded.

use actix_web::web::{get, post, scope};
use actix_web::Scope;

mod catalogs;
pub mod extract;
mod get_status;
mod status;
mod upload;

const API_PATH: &str = "/api/dataset";

/// Configures and returns the Actix scope for dataset routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        // Route to upload a new dataset CSV.
        .route("/upload", post().to(upload::process))
        // Route to poll an ongoing ingest job.
        .route("/jobs/{job_id}", get().to(get_status::process))
        .route("/status", get().to(status::process))
        .route("/catalogs", get().to(catalogs::process))
}
