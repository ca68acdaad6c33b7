//! Field extractors — total functions over résumé text.
//!
//! Every extractor returns "nothing found" rather than failing. Patterns are
//! compiled once per process; the skill vocabulary comes from [`SkillCatalog`].

use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::resume::catalog::SkillCatalog;
use crate::resume::tokenizer::{TokenizerError, TokenizerLoader};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\+91[\-\s]?)?[789]\d{9}").expect("valid phone regex"));

static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://(www\.)?linkedin\.com/in/[a-zA-Z0-9_-]+/?").expect("valid linkedin regex")
});

// The trailing run must reach a newline, comma or period on the same line;
// only the degree token is kept.
static EDUCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(B\.?Tech|M\.?Tech|B\.?Sc|M\.?Sc|Bachelor|Master|Ph\.?D)[^\n,.]*[\n,.]")
        .expect("valid education regex")
});

static EXPERIENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\+?\s*(years|yrs|year)\s*(of)?\s*(experience)?")
        .expect("valid experience regex")
});

/// First email-shaped substring, syntax only.
pub fn extract_email(text: &str) -> Option<String> {
    EMAIL_RE.find(text).map(|m| m.as_str().to_string())
}

/// First Indian mobile number: optional `+91` prefix, ten digits starting 7/8/9.
pub fn extract_phone(text: &str) -> Option<String> {
    PHONE_RE.find(text).map(|m| m.as_str().to_string())
}

pub fn extract_linkedin(text: &str) -> Option<String> {
    LINKEDIN_RE.find(text).map(|m| m.as_str().to_string())
}

/// Catalog skills mentioned in `text`, unique, in catalog order.
///
/// With a tokenizer the text is tokenized and each token is looked up in the
/// catalog (exact, then case-folded). Without one, or when loading or
/// tokenizing fails, each catalog skill is searched as a whole word.
pub fn extract_skills(
    text: &str,
    catalog: &SkillCatalog,
    tokenizer: Option<&dyn TokenizerLoader>,
) -> Vec<String> {
    let found = match tokenizer.map(|loader| skills_by_tokens(text, catalog, loader)) {
        Some(Ok(found)) => found,
        Some(Err(e)) => {
            debug!("Tokenizer unavailable, using keyword search: {e}");
            skills_by_keyword(text, catalog)
        }
        None => skills_by_keyword(text, catalog),
    };

    let mut skills: Vec<String> = found.into_iter().map(str::to_string).collect();
    skills.sort_by_key(|s| catalog.position(s));
    skills
}

fn skills_by_tokens<'c>(
    text: &str,
    catalog: &'c SkillCatalog,
    loader: &dyn TokenizerLoader,
) -> Result<HashSet<&'c str>, TokenizerError> {
    let tokenizer = loader.load()?;
    let tokens = tokenizer.tokenize(text)?;
    Ok(tokens
        .iter()
        .filter_map(|token| catalog.match_token(token))
        .collect())
}

fn skills_by_keyword<'c>(text: &'c str, catalog: &'c SkillCatalog) -> HashSet<&'c str> {
    catalog.find_in_text(text).collect()
}

/// Degree tokens (`B.Tech`, `MSc`, `Bachelor`, `Ph.D`, ...) as written, deduplicated.
pub fn extract_education(text: &str) -> BTreeSet<String> {
    EDUCATION_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Every "N years" mention in order of appearance, duplicates kept.
pub fn extract_experience(text: &str) -> Vec<String> {
    EXPERIENCE_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| format!("{} years", m.as_str()))
        .collect()
}
