pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Upper bound on résumé uploads.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Résumé API
        .route("/api/v1/resumes/parse", post(resume::handle_parse))
        .route("/api/v1/resumes/jobs", post(resume::handle_parse_and_match))
        // Job search API
        .route("/api/v1/jobs", get(jobs::handle_search))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
