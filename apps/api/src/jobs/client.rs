//! Job search client — maps a skills list to postings from the Adzuna search API.
//!
//! Job search is advisory: [`JobFetcher::fetch_jobs`] never fails, it logs and
//! returns an empty list. [`JobFetcher::try_fetch_jobs`] exposes the error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::jobs::transport::{ClientTransport, FetchError, JobTransport, RawTransport};

pub const DEFAULT_SEARCH_URL: &str = "https://api.adzuna.com/v1/api/jobs/in/search/1";
pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_MAX_RESULTS: u32 = 5;
/// Only the leading skills go into the query.
const QUERY_SKILL_LIMIT: usize = 3;

/// One job posting. Every field is present; missing source data becomes "".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub apply_link: String,
}

/// Search API application credentials.
#[derive(Clone)]
pub struct ApiCredentials {
    pub app_id: String,
    pub app_key: String,
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"***")
            .finish()
    }
}

pub struct JobFetcher {
    transport: Arc<dyn JobTransport>,
    credentials: ApiCredentials,
    search_url: String,
}

impl JobFetcher {
    /// Uses the async HTTP client when it can be built, otherwise the raw transport.
    pub fn new(credentials: ApiCredentials, search_url: impl Into<String>) -> Self {
        let transport: Arc<dyn JobTransport> = match ClientTransport::new() {
            Ok(client) => Arc::new(client),
            Err(e) => {
                warn!("HTTP client unavailable ({e}); using raw transport");
                Arc::new(RawTransport)
            }
        };
        Self::with_transport(credentials, search_url, transport)
    }

    pub fn with_transport(
        credentials: ApiCredentials,
        search_url: impl Into<String>,
        transport: Arc<dyn JobTransport>,
    ) -> Self {
        Self {
            transport,
            credentials,
            search_url: search_url.into(),
        }
    }

    pub fn transport_name(&self) -> &'static str {
        self.transport.name()
    }

    /// Postings for `skills` at `location`; empty on any failure.
    pub async fn fetch_jobs(
        &self,
        skills: &[String],
        location: &str,
        max_results: u32,
    ) -> Vec<JobPosting> {
        match self.try_fetch_jobs(skills, location, max_results).await {
            Ok(jobs) => jobs,
            Err(e) => {
                warn!("Job search failed, returning no results: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`fetch_jobs`](Self::fetch_jobs) but surfaces transport and decoding errors.
    /// An empty skills list short-circuits without a request.
    pub async fn try_fetch_jobs(
        &self,
        skills: &[String],
        location: &str,
        max_results: u32,
    ) -> Result<Vec<JobPosting>, FetchError> {
        if skills.is_empty() {
            return Ok(Vec::new());
        }

        let query = build_query(skills);
        let params = [
            ("app_id", self.credentials.app_id.clone()),
            ("app_key", self.credentials.app_key.clone()),
            ("results_per_page", max_results.to_string()),
            ("what", query),
            ("where", location.to_string()),
        ];

        debug!(
            "Searching jobs via {} transport: what={} where={location}",
            self.transport.name(),
            params[3].1
        );
        let body = self.transport.get(&self.search_url, &params).await?;
        let jobs = map_results(&body);
        info!("Job search returned {} postings", jobs.len());
        Ok(jobs)
    }
}

/// The first three skills joined with `+`.
pub fn build_query(skills: &[String]) -> String {
    skills
        .iter()
        .take(QUERY_SKILL_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("+")
}

/// Maps the `results` array of a search response. A missing or non-array
/// `results` yields no postings.
pub fn map_results(body: &Value) -> Vec<JobPosting> {
    body.get("results")
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(map_posting).collect())
        .unwrap_or_default()
}

fn map_posting(item: &Value) -> JobPosting {
    JobPosting {
        title: string_at(item, &["title"]),
        company: string_at(item, &["company", "display_name"]),
        location: string_at(item, &["location", "display_name"]),
        description: string_at(item, &["description"]),
        apply_link: string_at(item, &["redirect_url"]),
    }
}

fn string_at(item: &Value, path: &[&str]) -> String {
    path.iter()
        .try_fold(item, |v, key| v.get(key))
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
