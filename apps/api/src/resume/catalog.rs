//! Skill catalog — the fixed recognition vocabulary for skill extraction.
//!
//! Built once at startup and shared read-only. Holds the canonical skill
//! strings in order plus the lookup structures both matching paths need.

use std::collections::{HashMap, HashSet};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Skills recognised when no override is configured, in canonical casing.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "Machine Learning",
    "Deep Learning",
    "Data Science",
    "Django",
    "Flask",
    "React",
    "SQL",
    "MongoDB",
    "Git",
    "HTML",
    "CSS",
    "JavaScript",
];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Skill catalog is empty")]
    Empty,

    #[error("Invalid pattern for skill '{skill}': {source}")]
    Pattern {
        skill: String,
        #[source]
        source: regex::Error,
    },
}

/// A single catalog skill with its precompiled whole-word pattern.
#[derive(Debug, Clone)]
struct SkillEntry {
    canonical: String,
    word_pattern: Regex,
}

#[derive(Debug, Clone)]
pub struct SkillCatalog {
    entries: Vec<SkillEntry>,
    exact: HashSet<String>,
    /// lower-cased skill -> canonical skill
    folded: HashMap<String, String>,
}

impl SkillCatalog {
    /// Builds a catalog from canonical skill strings.
    /// Blank entries are skipped; repeated skills keep their first position.
    pub fn new<I, S>(skills: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut exact = HashSet::new();
        let mut folded = HashMap::new();

        for skill in skills {
            let skill = skill.as_ref().trim();
            if skill.is_empty() || exact.contains(skill) {
                continue;
            }

            let lowered = skill.to_lowercase();
            let word_pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(&lowered)))
                .case_insensitive(true)
                .build()
                .map_err(|source| CatalogError::Pattern {
                    skill: skill.to_string(),
                    source,
                })?;

            exact.insert(skill.to_string());
            folded.entry(lowered).or_insert_with(|| skill.to_string());
            entries.push(SkillEntry {
                canonical: skill.to_string(),
                word_pattern,
            });
        }

        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self {
            entries,
            exact,
            folded,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Canonical skills in catalog order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.canonical.as_str())
    }

    /// Position of a canonical skill in the catalog, used for stable output ordering.
    pub fn position(&self, skill: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.canonical == skill)
    }

    /// Token lookup used by the tokenizer path: exact match first, then a
    /// case-insensitive match normalised to the canonical casing.
    pub fn match_token(&self, token: &str) -> Option<&str> {
        if let Some(skill) = self.exact.get(token) {
            return Some(skill.as_str());
        }
        self.folded.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Whole-word, case-insensitive search used by the fallback path.
    pub fn find_in_text<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.word_pattern.is_match(text))
            .map(|e| e.canonical.as_str())
    }
}

impl Default for SkillCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied()).expect("default skill catalog is valid")
    }
}
