//! # Chat Service Module
//!
//! Aggregates the conversational API endpoints under `/api/chat`.
//!
//! ## Registered Routes:
//!
//! *   **`POST /query`**:
//!     - **Handler**: `query::process`
//!     - **Description**: Accepts a `QueryRequest` with the free-form query
//!       string (placeholder tokens already substituted by the client) and
//!       answers from the in-memory dataset. Responds `400` when the query
//!       is blank or no dataset is loaded; otherwise `200` with a
//!       `QueryResponse` whose `response` may embed HTML table markup.
//!
//! *   **`GET /suggestions`**:
//!     - **Handler**: `suggestions::process`
//!     - **Description**: Serves the fixed suggestion groups shown next to
//!       the input. Some entries contain bracketed tokens that the frontend
//!       turns into clickable placeholder chips.

mod query;
mod suggestions;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

/// The base path for all chat-related API endpoints.
const API_PATH: &str = "/api/chat";

/// Configures and returns the Actix `Scope` for chat routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/query", post().to(query::process))
        .route("/suggestions", get().to(suggestions::process))
}
