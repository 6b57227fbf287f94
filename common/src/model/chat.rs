use serde::{Deserialize, Serialize};

/// Payload of the chat query endpoint. `response` may embed pre-rendered
/// HTML table markup; the frontend renders it as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Assistant,
}

/// One entry of the chat history shown in the message list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: String,
    pub sender: Sender,
    pub text: String,
}
