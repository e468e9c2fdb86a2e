//! Cross-lingual lemmatization over frozen per-language dictionaries.
//!
//! The corpus mixes Russian and English tokens. Each model only reliably
//! lemmatizes its own language and passes everything else through, so the
//! pipeline runs the secondary-language (English) model first and the
//! primary-language (Russian) model last: the final pass normalizes the
//! majority-language tokens the first pass left untouched.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct LemmaArtifact {
    lang: String,
    lemmas: AHashMap<String, String>,
}

/// A frozen dictionary model mapping surface forms to their base forms.
/// Read-only after load; safe to share across concurrent batch runs.
#[derive(Debug, Clone)]
pub struct LemmaModel {
    lang: String,
    lemmas: AHashMap<String, String>,
}

impl LemmaModel {
    /// Load a model artifact from a JSON file. A missing or malformed
    /// artifact is a fatal configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::artifact_io(path, e))?;
        let artifact: LemmaArtifact = serde_json::from_slice(&bytes)
            .map_err(|e| Error::artifact_format(path, e.to_string()))?;
        debug!(
            lang = %artifact.lang,
            entries = artifact.lemmas.len(),
            "loaded lemma model"
        );
        Ok(Self {
            lang: artifact.lang,
            lemmas: artifact.lemmas,
        })
    }

    /// Build a model from in-memory entries.
    pub fn from_entries<I>(lang: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            lang: lang.to_string(),
            lemmas: entries.into_iter().collect(),
        }
    }

    /// An empty model that passes every token through unchanged.
    pub fn identity(lang: &str) -> Self {
        Self::from_entries(lang, std::iter::empty())
    }

    #[must_use]
    pub fn lang(&self) -> &str {
        &self.lang
    }

    /// Reduce every known token to its base form, space-joined. Unknown
    /// tokens pass through unchanged.
    pub fn lemmatize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.lemmas.get(token).map_or(token, String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The fixed two-model pipeline: secondary language first, primary last.
#[derive(Debug, Clone)]
pub struct LemmaPipeline {
    secondary: LemmaModel,
    primary: LemmaModel,
}

impl LemmaPipeline {
    pub fn new(secondary: LemmaModel, primary: LemmaModel) -> Self {
        Self { secondary, primary }
    }

    /// Load both model artifacts.
    pub fn load(secondary: &Path, primary: &Path) -> Result<Self> {
        Ok(Self::new(LemmaModel::load(secondary)?, LemmaModel::load(primary)?))
    }

    /// A pipeline of two empty models, for callers that want raw tokens.
    pub fn identity() -> Self {
        Self::new(LemmaModel::identity("en"), LemmaModel::identity("ru"))
    }

    pub fn lemmatize(&self, text: &str) -> String {
        self.primary.lemmatize(&self.secondary.lemmatize(text))
    }
}
