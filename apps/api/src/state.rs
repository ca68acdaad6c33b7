use std::sync::Arc;

use crate::config::Config;
use crate::jobs::client::JobFetcher;
use crate::resume::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub parser: Arc<ResumeParser>,
    pub jobs: Arc<JobFetcher>,
    /// Defaults for job searches that do not name a location or page size.
    pub job_location: String,
    pub job_max_results: u32,
}

impl AppState {
    pub fn new(config: &Config, parser: ResumeParser, jobs: JobFetcher) -> Self {
        Self {
            parser: Arc::new(parser),
            jobs: Arc::new(jobs),
            job_location: config.job_location.clone(),
            job_max_results: config.job_max_results,
        }
    }
}
