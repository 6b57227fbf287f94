use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Request payload for the chat query endpoint.
/// Carries the free-form query string, tokens already substituted.
pub struct QueryRequest {
    pub query: String,
}
