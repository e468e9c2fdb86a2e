//! Frozen TF-IDF vectorizer.
//!
//! The vocabulary and inverse-document-frequency weights are fitted
//! offline and loaded as an immutable artifact; the core never refits
//! them from the current batch. Both sides of a search must be
//! transformed with the same instance so their vectors share one
//! coordinate space.

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::vector::Vector;

#[derive(Debug, Deserialize)]
struct VectorizerArtifact {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f32>,
}

/// A pre-fit TF-IDF model: term -> column index, plus per-column idf
/// weights. Read-only after construction.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: AHashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Load the frozen artifact from a JSON file. Any load or validation
    /// failure is fatal: a batch must never run against a broken model.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| Error::artifact_io(path, e))?;
        let artifact: VectorizerArtifact = serde_json::from_slice(&bytes)
            .map_err(|e| Error::artifact_format(path, e.to_string()))?;
        Self::from_parts(artifact.vocabulary, artifact.idf)
            .map_err(|e| Error::artifact_format(path, e.to_string()))
    }

    /// Build a vectorizer from an in-memory vocabulary and idf table.
    pub fn from_parts<I>(vocabulary: I, idf: Vec<f32>) -> Result<Self>
    where
        I: IntoIterator<Item = (String, usize)>,
    {
        let vocabulary: AHashMap<String, usize> = vocabulary.into_iter().collect();
        if vocabulary.is_empty() {
            return Err(Error::InvalidConfig("empty vocabulary".to_string()));
        }
        if let Some((term, &index)) = vocabulary.iter().find(|(_, &i)| i >= idf.len()) {
            return Err(Error::InvalidConfig(format!(
                "term {:?} maps to column {} but only {} idf weights are present",
                term,
                index,
                idf.len()
            )));
        }
        Ok(Self { vocabulary, idf })
    }

    /// Dimensionality of the produced vectors.
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.idf.len()
    }

    /// Tokenize for vectorization: alphanumeric runs of at least two
    /// characters, matching how the vocabulary was fitted.
    fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() > 1)
    }

    /// Transform one text into an L2-normalized tf-idf vector. Terms
    /// outside the frozen vocabulary are ignored.
    pub fn transform(&self, text: &str) -> Vector {
        let mut data = vec![0.0f32; self.dim()];
        for token in Self::tokenize(text) {
            if let Some(&index) = self.vocabulary.get(token) {
                data[index] += 1.0;
            }
        }
        for (value, idf) in data.iter_mut().zip(&self.idf) {
            *value *= idf;
        }
        let mut vector = Vector::new(data);
        vector.normalize();
        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vectorizer() -> TfidfVectorizer {
        TfidfVectorizer::from_parts(
            [
                ("ultra".to_string(), 0),
                ("clean".to_string(), 1),
                ("гель".to_string(), 2),
            ],
            vec![1.0, 2.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn transform_weights_and_normalizes() {
        let v = vectorizer().transform("ultra clean");
        let data = v.as_slice();
        // counts [1, 1, 0] * idf [1, 2, 1] = [1, 2, 0], norm sqrt(5)
        let norm = 5.0f32.sqrt();
        assert!((data[0] - 1.0 / norm).abs() < 1e-6);
        assert!((data[1] - 2.0 / norm).abs() < 1e-6);
        assert_eq!(data[2], 0.0);
    }

    #[test]
    fn unknown_terms_are_ignored() {
        let v = vectorizer().transform("unknown words");
        assert!(v.as_slice().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn single_character_tokens_are_dropped() {
        let v = vectorizer().transform("м гель");
        assert!(v.as_slice()[2] > 0.0);
        assert_eq!(v.as_slice()[0], 0.0);
    }

    #[test]
    fn identical_texts_yield_identical_vectors() {
        let v = vectorizer();
        assert_eq!(v.transform("ultra гель"), v.transform("ultra гель"));
    }

    #[test]
    fn empty_vocabulary_is_rejected() {
        let err = TfidfVectorizer::from_parts(std::iter::empty(), vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn out_of_range_column_is_rejected() {
        let err =
            TfidfVectorizer::from_parts([("a".to_string(), 5)], vec![1.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn load_roundtrip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"vocabulary": {{"clean": 0, "gel": 1}}, "idf": [1.2, 3.4]}}"#
        )
        .unwrap();
        let vectorizer = TfidfVectorizer::load(file.path()).unwrap();
        assert_eq!(vectorizer.dim(), 2);
    }

    #[test]
    fn corrupt_artifact_is_fatal() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vocabulary": {{"clean": 7}}, "idf": [1.0]}}"#).unwrap();
        let err = TfidfVectorizer::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ArtifactFormat { .. }));
    }
}
