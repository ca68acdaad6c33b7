use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::config::parse_list;
use crate::jobs::client::JobPosting;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    /// Comma-separated skills, most relevant first.
    #[serde(default)]
    pub skills: String,
    pub location: Option<String>,
    pub max_results: Option<u32>,
}

/// GET /api/v1/jobs
/// Always 200; an empty list covers every upstream failure.
pub async fn handle_search(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Json<Vec<JobPosting>> {
    let skills = parse_list(&query.skills);
    let location = query.location.unwrap_or(state.job_location);
    let max_results = query.max_results.unwrap_or(state.job_max_results);

    Json(state.jobs.fetch_jobs(&skills, &location, max_results).await)
}
