//! Artifact locations and training settings.

use crate::error::{PhishError, Result};
use crate::model::BoosterParams;
use std::path::{Path, PathBuf};

/// Dataset location relative to the data root.
pub const DATASET_PATH: &str = "data/phishing_dataset.csv";

/// Feature-importance table location relative to the data root.
pub const IMPORTANCE_PATH: &str = "data/feature_importance.csv";

/// Model artifact location relative to the data root.
pub const MODEL_PATH: &str = "model/saved/phishing_model.json";

/// Fraction of examples held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Seed for the train/test shuffle.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Where the dataset, model, and importance table live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub dataset: PathBuf,
    pub importance: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Standard layout under `root`.
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            dataset: root.join(DATASET_PATH),
            importance: root.join(IMPORTANCE_PATH),
            model: root.join(MODEL_PATH),
        }
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::under(".")
    }
}

/// Everything the training routine needs besides the extractor.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub paths: ArtifactPaths,
    pub params: BoosterParams,
    pub test_fraction: f64,
    pub split_seed: u64,
}

impl TrainingConfig {
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            params: BoosterParams::default(),
            test_fraction: DEFAULT_TEST_FRACTION,
            split_seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::new(ArtifactPaths::default())
    }
}

/// Create the directory that will contain `path`, if any.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| PhishError::io(parent, e))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_root() {
        let paths = ArtifactPaths::under("/srv/phish");
        assert_eq!(
            paths.model,
            PathBuf::from("/srv/phish/model/saved/phishing_model.json")
        );
        assert_eq!(
            paths.importance,
            PathBuf::from("/srv/phish/data/feature_importance.csv")
        );
        assert_eq!(
            paths.dataset,
            PathBuf::from("/srv/phish/data/phishing_dataset.csv")
        );
    }

    #[test]
    fn test_ensure_parent_dir_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("a/b/c.json");
        ensure_parent_dir(&target).unwrap();
        assert!(dir.path().join("a/b").is_dir());
        // Bare file names have no directory to create.
        ensure_parent_dir(Path::new("c.json")).unwrap();
    }
}
