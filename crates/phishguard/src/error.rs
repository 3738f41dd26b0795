//! Error types for the PhishGuard core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PhishError>;

#[derive(Debug, Error)]
pub enum PhishError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid dataset at line {line}: {reason}")]
    InvalidDataset { line: u64, reason: String },

    #[error("feature schema mismatch: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("dataset too small to split: {0} examples")]
    DatasetTooSmall(usize),

    #[error("cannot fit a model on an empty training set")]
    EmptyTrainingSet,

    #[error("feature matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("invalid booster parameters: {0}")]
    InvalidParams(String),

    #[error("invalid model artifact: {0}")]
    InvalidModel(String),

    #[error("tree ensemble error: {0}")]
    Booster(String),

    #[error("model produced a non-finite score ({0})")]
    NonFiniteScore(f64),
}

impl PhishError {
    /// Wrap an I/O error with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
