//! Server tuning constants.

pub const HOST: &str = "127.0.0.1";
pub const PORT: u16 = 8080;

/// JSON body limit for the chat endpoints (10 MB).
pub const JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Capacity of the ingest-job update channel.
pub const JOB_CHANNEL_CAPACITY: usize = 100;

/// Rows between two ingest progress reports.
pub const INGEST_PROGRESS_EVERY: usize = 50_000;

/// Rows shown in "top N" chat answers.
pub const TOP_N: usize = 5;
