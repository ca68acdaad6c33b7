// Résumé parsing: document text -> contact details, skills, education,
// experience mentions and a heuristic completeness score.
// Field extractors are best-effort; only an unreadable document is an error.

pub mod catalog;
pub mod document;
pub mod extract;
pub mod handlers;
pub mod parser;
pub mod scoring;
pub mod tokenizer;

use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Document unavailable ({path}): {reason}")]
    DocumentUnavailable { path: String, reason: String },
}

impl ResumeError {
    pub fn unavailable(path: &Path, reason: impl Into<String>) -> Self {
        ResumeError::DocumentUnavailable {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
