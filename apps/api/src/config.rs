use anyhow::{Context, Result};

use crate::jobs::client::{DEFAULT_LOCATION, DEFAULT_MAX_RESULTS, DEFAULT_SEARCH_URL};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Clone)]
pub struct Config {
    pub adzuna_app_id: String,
    pub adzuna_app_key: String,
    pub adzuna_search_url: String,
    /// Path to a `tokenizer.json`; skill extraction uses keyword search without it.
    pub tokenizer_path: Option<String>,
    /// Overrides the built-in skill catalog when set.
    pub skill_catalog: Option<Vec<String>>,
    pub job_location: String,
    pub job_max_results: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            adzuna_app_id: require_env("ADZUNA_APP_ID")?,
            adzuna_app_key: require_env("ADZUNA_APP_KEY")?,
            adzuna_search_url: optional_env("ADZUNA_SEARCH_URL")
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            tokenizer_path: optional_env("TOKENIZER_PATH"),
            skill_catalog: optional_env("SKILL_CATALOG").map(|v| parse_list(&v)),
            job_location: optional_env("JOB_SEARCH_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            job_max_results: optional_env("JOB_SEARCH_MAX_RESULTS")
                .map(|v| v.parse::<u32>())
                .transpose()
                .context("JOB_SEARCH_MAX_RESULTS must be a positive integer")?
                .unwrap_or(DEFAULT_MAX_RESULTS),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("adzuna_app_id", &self.adzuna_app_id)
            .field("adzuna_app_key", &"***")
            .field("adzuna_search_url", &self.adzuna_search_url)
            .field("tokenizer_path", &self.tokenizer_path)
            .field("skill_catalog", &self.skill_catalog)
            .field("job_location", &self.job_location)
            .field("job_max_results", &self.job_max_results)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values are both treated as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated list, trimmed, blanks dropped.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_drops_blanks() {
        assert_eq!(
            parse_list(" Rust, Go ,, Machine Learning ,"),
            vec!["Rust", "Go", "Machine Learning"]
        );
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_debug_hides_app_key() {
        let config = Config {
            adzuna_app_id: "scout-id".to_string(),
            adzuna_app_key: "scout-secret".to_string(),
            adzuna_search_url: DEFAULT_SEARCH_URL.to_string(),
            tokenizer_path: None,
            skill_catalog: None,
            job_location: DEFAULT_LOCATION.to_string(),
            job_max_results: DEFAULT_MAX_RESULTS,
            port: 8080,
            rust_log: "info".to_string(),
        };
        let rendered = format!("{config:?}");
        assert!(rendered.contains("scout-id"));
        assert!(!rendered.contains("scout-secret"));
    }
}
