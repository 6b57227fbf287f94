use serde::{Deserialize, Serialize};

/// One titled group of suggested queries. Entries may carry bracketed
/// placeholder tokens (e.g. `[Partner]`) that the token input turns into
/// clickable chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionGroup {
    pub key: String,
    pub title: String,
    pub queries: Vec<String>,
}
