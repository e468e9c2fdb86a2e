use std::path::Path;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors only. Row-level extraction and lookup failures never reach
/// this type; they degrade to the documented defaults (empty article, zero
/// quantity, missing-value sentinel) at the point where they occur.
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read artifact {path}: {source}")]
    ArtifactIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact {path}: {reason}")]
    ArtifactFormat { path: String, reason: String },

    #[error("invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("index must be trained before vectors are added or searched")]
    IndexNotTrained,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn artifact_io(path: &Path, source: std::io::Error) -> Self {
        Error::ArtifactIo {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn artifact_format(path: &Path, reason: impl Into<String>) -> Self {
        Error::ArtifactFormat {
            path: path.display().to_string(),
            reason: reason.into(),
        }
    }
}
