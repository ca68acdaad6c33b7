use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::client::JobPosting;
use crate::resume::parser::{ResumeParser, ResumeProfile};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ProfileWithJobs {
    pub profile: ResumeProfile,
    pub jobs: Vec<JobPosting>,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeProfile>, AppError> {
    let upload = read_upload(multipart).await?;
    let profile = parse_upload(state.parser.clone(), upload).await?;
    Ok(Json(profile))
}

/// POST /api/v1/resumes/jobs
/// Parses the résumé, then searches jobs for its skills at the configured location.
pub async fn handle_parse_and_match(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ProfileWithJobs>, AppError> {
    let upload = read_upload(multipart).await?;
    let profile = parse_upload(state.parser.clone(), upload).await?;

    let jobs = state
        .jobs
        .fetch_jobs(&profile.skills, &state.job_location, state.job_max_results)
        .await;
    info!(
        "Matched {} jobs for résumé with {} skills",
        jobs.len(),
        profile.skills.len()
    );

    Ok(Json(ProfileWithJobs { profile, jobs }))
}

struct Upload {
    file_name: Option<String>,
    data: Bytes,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(FILE_FIELD) {
            let file_name = field.file_name().map(String::from);
            let data = field.bytes().await?;
            if data.is_empty() {
                return Err(AppError::Validation("Uploaded file is empty".to_string()));
            }
            return Ok(Upload { file_name, data });
        }
    }
    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// Spools the upload to a temp file (keeping its extension) and parses it
/// on a blocking thread.
async fn parse_upload(parser: Arc<ResumeParser>, upload: Upload) -> Result<ResumeProfile, AppError> {
    let suffix = upload
        .file_name
        .as_deref()
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_else(|| ".pdf".to_string());

    let profile = tokio::task::spawn_blocking(move || -> Result<ResumeProfile, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&suffix)
            .tempfile()
            .map_err(anyhow::Error::from)?;
        file.write_all(&upload.data).map_err(anyhow::Error::from)?;
        file.flush().map_err(anyhow::Error::from)?;

        Ok(parser.parse(file.path())?)
    })
    .await
    .map_err(anyhow::Error::from)??;

    Ok(profile)
}
