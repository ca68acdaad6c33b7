//! Résumé Parser — orchestrates document extraction, field extraction and scoring.
//!
//! Collaborators are injected at construction: the document source is
//! mandatory, the tokenizer loader is optional.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::resume::catalog::SkillCatalog;
use crate::resume::document::{DocumentSource, ExtensionRouter};
use crate::resume::extract::{
    extract_education, extract_email, extract_experience, extract_linkedin, extract_phone,
    extract_skills,
};
use crate::resume::scoring::{score_breakdown, ScoreBreakdown};
use crate::resume::tokenizer::TokenizerLoader;
use crate::resume::ResumeError;

/// Structured summary of one résumé. Built once per parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "linkedin")]
    pub linkedin_url: Option<String>,
    /// Unique, in catalog order.
    pub skills: Vec<String>,
    #[serde(rename = "education")]
    pub education_mentions: BTreeSet<String>,
    #[serde(rename = "experience")]
    pub experience_mentions: Vec<String>,
    pub score: u32,
    pub score_breakdown: ScoreBreakdown,
}

pub struct ResumeParser {
    catalog: Arc<SkillCatalog>,
    documents: Arc<dyn DocumentSource>,
    tokenizer: Option<Arc<dyn TokenizerLoader>>,
}

impl ResumeParser {
    pub fn new(
        catalog: Arc<SkillCatalog>,
        documents: Arc<dyn DocumentSource>,
        tokenizer: Option<Arc<dyn TokenizerLoader>>,
    ) -> Self {
        Self {
            catalog,
            documents,
            tokenizer,
        }
    }

    /// PDF/plain-text documents, no tokenizer.
    pub fn with_catalog(catalog: Arc<SkillCatalog>) -> Self {
        Self::new(catalog, Arc::new(ExtensionRouter::default()), None)
    }

    pub fn has_tokenizer(&self) -> bool {
        self.tokenizer.is_some()
    }

    /// Raw document text, pages concatenated in order.
    pub fn extract_text(&self, path: &Path) -> Result<String, ResumeError> {
        self.documents.extract_text(path)
    }

    /// Parses the document at `path`. Fails only when the document cannot be read.
    pub fn parse(&self, path: &Path) -> Result<ResumeProfile, ResumeError> {
        let text = self.extract_text(path)?;
        let profile = self.parse_text(&text);
        info!(
            "Parsed résumé {}: {} skills, score {}",
            path.display(),
            profile.skills.len(),
            profile.score
        );
        Ok(profile)
    }

    /// Runs the extraction pipeline over already-extracted text.
    pub fn parse_text(&self, text: &str) -> ResumeProfile {
        let email = extract_email(text);
        let phone = extract_phone(text);
        let linkedin_url = extract_linkedin(text);
        let skills = extract_skills(text, &self.catalog, self.tokenizer.as_deref());
        let education_mentions = extract_education(text);
        let experience_mentions = extract_experience(text);

        let breakdown = score_breakdown(
            skills.len(),
            !education_mentions.is_empty(),
            !experience_mentions.is_empty(),
            email.is_some(),
            phone.is_some(),
            linkedin_url.is_some(),
        );
        let score = breakdown.total();
        debug!("Score {score}: {breakdown:?}");

        ResumeProfile {
            email,
            phone,
            linkedin_url,
            skills,
            education_mentions,
            experience_mentions,
            score,
            score_breakdown: breakdown,
        }
    }
}
