//! Optional word-level tokenizer used by the skill extractor.
//!
//! The parser holds an `Option<Arc<dyn TokenizerLoader>>`. `load()` runs on
//! every skill extraction and is allowed to fail; a failure only means the
//! regex fallback is used for that call.

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TokenizerError {
    #[error("Failed to load tokenizer from {path}: {message}")]
    Load { path: String, message: String },

    #[error("Tokenization failed: {0}")]
    Tokenize(String),
}

/// Splits text into word-level units, each carried as its literal text.
pub trait Tokenizer: Send {
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError>;
}

/// Produces a fresh tokenizer handle. Implementations must not panic.
pub trait TokenizerLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn Tokenizer>, TokenizerError>;
}

/// Loads a Hugging Face `tokenizer.json` from disk.
#[derive(Debug, Clone)]
pub struct HfTokenizerLoader {
    path: PathBuf,
}

impl HfTokenizerLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenizerLoader for HfTokenizerLoader {
    fn load(&self) -> Result<Box<dyn Tokenizer>, TokenizerError> {
        let load_error = |e: tokenizers::Error| TokenizerError::Load {
            path: self.path.display().to_string(),
            message: e.to_string(),
        };
        let mut inner = tokenizers::Tokenizer::from_file(&self.path).map_err(load_error)?;
        // Model exports often carry a max_length; every word of the résumé is needed.
        inner.with_truncation(None).map_err(load_error)?;
        inner.with_padding(None);
        debug!("Loaded tokenizer from {}", self.path.display());
        Ok(Box::new(HfTokenizer { inner }))
    }
}

struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl Tokenizer for HfTokenizer {
    /// Sub-word pieces are grouped back into the words the pre-tokenizer
    /// produced and sliced from the original text, so a word comes back
    /// exactly as written.
    fn tokenize(&self, text: &str) -> Result<Vec<String>, TokenizerError> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| TokenizerError::Tokenize(e.to_string()))?;

        let mut words = Vec::new();
        let mut current: Option<(u32, usize, usize)> = None;

        for (word_id, &(start, end)) in encoding.get_word_ids().iter().zip(encoding.get_offsets()) {
            let Some(word_id) = *word_id else {
                continue;
            };
            match current {
                Some((id, s, e)) if id == word_id => {
                    current = Some((id, s.min(start), e.max(end)));
                }
                Some((_, s, e)) => {
                    push_span(text, s, e, &mut words);
                    current = Some((word_id, start, end));
                }
                None => current = Some((word_id, start, end)),
            }
        }
        if let Some((_, s, e)) = current {
            push_span(text, s, e, &mut words);
        }

        Ok(words)
    }
}

fn push_span(text: &str, start: usize, end: usize, out: &mut Vec<String>) {
    if let Some(word) = text.get(start..end) {
        if !word.is_empty() {
            out.push(word.to_string());
        }
    }
}
