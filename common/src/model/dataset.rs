use serde::{Deserialize, Serialize};

/// Dataset availability report served by the status endpoint and shown in
/// the frontend header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub data_loaded: bool,
    pub rows: usize,
    pub columns: usize,
    pub message: String,
}

impl DatasetSummary {
    pub fn loaded(rows: usize, columns: usize) -> Self {
        Self {
            data_loaded: true,
            rows,
            columns,
            message: "Ready for queries!".to_string(),
        }
    }

    pub fn waiting() -> Self {
        Self {
            data_loaded: false,
            rows: 0,
            columns: 0,
            message: "Waiting for file upload...".to_string(),
        }
    }
}
