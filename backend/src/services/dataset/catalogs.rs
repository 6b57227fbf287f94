use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;

use crate::job_controller::state::DatasetState;

/// Serves the role-name to candidate-list map extracted at ingest time.
/// An empty object means the frontend keeps its static fallback catalog.
pub(crate) async fn process(state: web::Data<DatasetState>) -> impl Responder {
    let guard = state.dataset.read().await;
    match guard.as_ref() {
        Some(ds) => HttpResponse::Ok().json(&ds.catalogs),
        None => HttpResponse::Ok().json(HashMap::<String, Vec<String>>::new()),
    }
}
