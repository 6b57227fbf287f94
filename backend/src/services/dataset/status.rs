use actix_web::{web, HttpResponse, Responder};
use common::model::dataset::DatasetSummary;

use crate::job_controller::state::DatasetState;

/// Reports whether a dataset is loaded and how large it is.
pub(crate) async fn process(state: web::Data<DatasetState>) -> impl Responder {
    let guard = state.dataset.read().await;
    let summary = match guard.as_ref() {
        Some(ds) => DatasetSummary::loaded(ds.rows.len(), ds.headers.len()),
        None => DatasetSummary::waiting(),
    };
    HttpResponse::Ok().json(summary)
}
