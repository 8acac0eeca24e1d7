//! Axum router configuration for all endpoints

use axum::{
  routing::{delete, get, post, put},
  Router,
};

use crate::handlers::{mappings, reports, status};
use crate::state::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
  Router::new()
    // Status endpoints
    .route("/status", get(status::status))
    .route("/version", get(status::version))
    // Mapping endpoint
    .route("/mappings/generate", post(mappings::generate_mapping))
    // Report endpoints
    .route("/reports", post(reports::create_report))
    .route("/reports/get", post(reports::get_report))
    .route("/reports/list/company", post(reports::list_by_company))
    .route("/reports/list/template", post(reports::list_by_template))
    .route("/reports/similar", post(reports::similar_reports))
    .route("/reports/embedding", put(reports::update_embedding))
    .route("/reports/remove", delete(reports::remove_report))
    .with_state(state)
}
