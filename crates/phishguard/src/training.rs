//! Offline training: dataset in, model artifact and importance table out.

use crate::config::TrainingConfig;
use crate::dataset::{Dataset, Label};
use crate::error::Result;
use crate::features::FeatureExtractor;
use crate::importance::ImportanceTable;
use crate::metrics::ClassificationMetrics;
use crate::model::GradientBoostedTrees;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Where the training examples came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetSource {
    /// Read from an existing CSV.
    Loaded(PathBuf),
    /// Built from the bundled sample URLs and written to this CSV.
    Synthesized(PathBuf),
}

/// Outcome of one training run.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingReport {
    pub source: DatasetSource,
    pub examples: usize,
    pub phishing: usize,
    pub legitimate: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub metrics: ClassificationMetrics,
    pub importance: ImportanceTable,
    pub model_path: PathBuf,
    pub importance_path: PathBuf,
}

/// Load the dataset at `config.paths.dataset`, or synthesize and persist the
/// sample set when the file does not exist.
pub fn load_or_create_dataset(
    config: &TrainingConfig,
    extractor: &FeatureExtractor,
) -> Result<(Dataset, DatasetSource)> {
    let path = &config.paths.dataset;
    if path.exists() {
        info!(path = %path.display(), "loading dataset");
        let dataset = Dataset::load_csv(path)?;
        Ok((dataset, DatasetSource::Loaded(path.clone())))
    } else {
        info!("no dataset found, creating sample dataset");
        let dataset = Dataset::sample(extractor);
        dataset.save_csv(path)?;
        Ok((dataset, DatasetSource::Synthesized(path.clone())))
    }
}

/// Run the full training routine and persist its artifacts.
pub fn train(config: &TrainingConfig, extractor: &FeatureExtractor) -> Result<TrainingReport> {
    let (dataset, source) = load_or_create_dataset(config, extractor)?;
    info!(
        examples = dataset.len(),
        phishing = dataset.phishing_count(),
        legitimate = dataset.legitimate_count(),
        "dataset ready"
    );

    let (train_set, test_set) = dataset.train_test_split(config.test_fraction, config.split_seed)?;
    let model = GradientBoostedTrees::fit(&train_set, config.params)?;

    let actual: Vec<Label> = test_set.examples().iter().map(|e| e.label).collect();
    let predicted: Vec<Label> = test_set
        .examples()
        .iter()
        .map(|e| model.predict_label(&e.features.to_model_input()))
        .collect();
    let metrics = ClassificationMetrics::compute(&actual, &predicted);
    info!(
        accuracy = metrics.accuracy,
        precision = metrics.precision,
        recall = metrics.recall,
        f1 = metrics.f1,
        "evaluated on held-out set"
    );

    let importance = ImportanceTable::from_model(&model);
    model.save(&config.paths.model)?;
    importance.save_csv(&config.paths.importance)?;
    info!(path = %config.paths.importance.display(), "saved feature importance");

    Ok(TrainingReport {
        source,
        examples: dataset.len(),
        phishing: dataset.phishing_count(),
        legitimate: dataset.legitimate_count(),
        train_size: train_set.len(),
        test_size: test_set.len(),
        metrics,
        importance,
        model_path: config.paths.model.clone(),
        importance_path: config.paths.importance.clone(),
    })
}
