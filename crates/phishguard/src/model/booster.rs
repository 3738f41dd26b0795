//! Binary gradient-boosted tree ensemble with a logistic objective.
//!
//! Fitting and scoring are delegated to `forust-ml`. This wrapper owns the
//! feature schema, the fixed hyperparameters, persistence and importance.

use crate::config::ensure_parent_dir;
use crate::dataset::{Dataset, Label};
use crate::error::{PhishError, Result};
use crate::features::{FEATURE_DIM, FEATURE_NAMES};
use chrono::{DateTime, Utc};
use forust_ml::gradientbooster::ImportanceMethod;
use forust_ml::objective::ObjectiveType;
use forust_ml::{GradientBooster, Matrix};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Fixed training hyperparameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoosterParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
    /// Fraction of rows sampled for each tree.
    pub subsample: f64,
    /// Fraction of features sampled for each tree.
    pub colsample_bytree: f64,
    pub min_child_weight: f64,
    pub gamma: f64,
    pub lambda: f64,
    /// Initial probability before any tree is applied.
    pub base_score: f64,
    pub seed: u64,
}

impl Default for BoosterParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 5,
            learning_rate: 0.1,
            subsample: 0.8,
            colsample_bytree: 0.8,
            min_child_weight: 1.0,
            gamma: 0.0,
            lambda: 1.0,
            base_score: 0.5,
            seed: 42,
        }
    }
}

impl BoosterParams {
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64| {
            if v > 0.0 && v <= 1.0 {
                Ok(())
            } else {
                Err(PhishError::InvalidParams(format!("{name} must be in (0, 1], got {v}")))
            }
        };
        unit("subsample", self.subsample)?;
        unit("colsample_bytree", self.colsample_bytree)?;
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err(PhishError::InvalidParams(format!(
                "base_score must be in (0, 1), got {}",
                self.base_score
            )));
        }
        if self.n_trees == 0 || self.max_depth == 0 {
            return Err(PhishError::InvalidParams(
                "n_trees and max_depth must be positive".into(),
            ));
        }
        if self.learning_rate <= 0.0 || self.lambda < 0.0 || self.gamma < 0.0 {
            return Err(PhishError::InvalidParams(
                "learning_rate must be positive, lambda and gamma non-negative".into(),
            ));
        }
        Ok(())
    }

    /// Unfitted booster configured with these parameters.
    fn booster(&self) -> GradientBooster {
        GradientBooster::default()
            .set_objective_type(ObjectiveType::LogLoss)
            .set_iterations(self.n_trees)
            .set_max_depth(self.max_depth)
            .set_learning_rate(self.learning_rate as _)
            .set_subsample(self.subsample as _)
            .set_colsample_bytree(self.colsample_bytree as _)
            .set_min_leaf_weight(self.min_child_weight as _)
            .set_gamma(self.gamma as _)
            .set_l2(self.lambda as _)
            .set_base_score(logit(self.base_score) as _)
            .set_seed(self.seed)
            .set_parallel(false)
    }
}

/// A trained ensemble. Persisted as JSON together with its feature schema.
#[derive(Serialize, Deserialize)]
pub struct GradientBoostedTrees {
    feature_names: Vec<String>,
    params: BoosterParams,
    trained_at: DateTime<Utc>,
    booster: GradientBooster,
}

impl GradientBoostedTrees {
    /// Fit an ensemble to `train`.
    pub fn fit(train: &Dataset, params: BoosterParams) -> Result<Self> {
        params.validate()?;
        if train.is_empty() {
            return Err(PhishError::EmptyTrainingSet);
        }

        let (x, y) = train.design_matrix()?;
        // The booster reads its input column by column.
        let columns: Vec<f64> = x.t().iter().copied().collect();
        let data = Matrix::new(&columns, x.nrows(), FEATURE_DIM);
        let weights = vec![1.0; x.nrows()];

        let mut booster = params.booster();
        booster
            .fit(&data, &y, &weights, None)
            .map_err(|e| PhishError::Booster(e.to_string()))?;

        info!(
            trees = params.n_trees,
            examples = x.nrows(),
            "fitted gradient-boosted ensemble"
        );

        Ok(Self {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            params,
            trained_at: Utc::now(),
            booster,
        })
    }

    /// Raw additive score (log-odds) before the logistic link.
    pub fn margin(&self, row: &[f64; FEATURE_DIM]) -> f64 {
        // A single row reads the same in row- and column-major order.
        let data = Matrix::new(row, 1, FEATURE_DIM);
        self.booster
            .predict(&data, false)
            .first()
            .copied()
            .unwrap_or(f64::NAN)
    }

    /// Probability that `row` is phishing.
    pub fn predict_proba(&self, row: &[f64; FEATURE_DIM]) -> f64 {
        sigmoid(self.margin(row))
    }

    /// Hard label at the 0.5 threshold.
    pub fn predict_label(&self, row: &[f64; FEATURE_DIM]) -> Label {
        label_for(self.predict_proba(row))
    }

    /// Average split gain per feature, normalized to sum to 1.
    ///
    /// Features never used in a split score 0. If the ensemble has no splits
    /// at all, every feature scores 0.
    pub fn feature_importance(&self) -> [f64; FEATURE_DIM] {
        let mut importance = [0.0f64; FEATURE_DIM];
        for (feature, gain) in self
            .booster
            .calculate_feature_importance(ImportanceMethod::Gain, false)
        {
            if let Some(slot) = importance.get_mut(feature) {
                *slot = f64::from(gain).max(0.0);
            }
        }
        let sum: f64 = importance.iter().sum();
        if sum > 0.0 {
            importance.iter_mut().for_each(|v| *v /= sum);
        }
        importance
    }

    pub fn params(&self) -> &BoosterParams {
        &self.params
    }

    pub fn trained_at(&self) -> DateTime<Utc> {
        self.trained_at
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Write the model as JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| PhishError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| PhishError::io(path, e))?;
        info!(path = %path.display(), "saved model");
        Ok(())
    }

    /// Read a model written by [`save`](Self::save) and check that it was
    /// trained on the current feature schema.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PhishError::io(path, e))?;
        let model: Self = serde_json::from_reader(BufReader::new(file))?;
        model.check_schema()?;
        Ok(model)
    }

    fn check_schema(&self) -> Result<()> {
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(PhishError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                found: self.feature_names.clone(),
            });
        }
        let score = self.margin(&[0.0; FEATURE_DIM]);
        if !score.is_finite() {
            return Err(PhishError::InvalidModel(format!(
                "booster scores an all-zero row as {score}"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for GradientBoostedTrees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientBoostedTrees")
            .field("params", &self.params)
            .field("trained_at", &self.trained_at)
            .finish_non_exhaustive()
    }
}

/// `Phishing` when the positive-class probability exceeds one half.
pub fn label_for(p_phishing: f64) -> Label {
    if p_phishing > 0.5 {
        Label::Phishing
    } else {
        Label::Legitimate
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledExample;
    use crate::features::vector::FEAT_HAS_HTTPS;
    use crate::features::FeatureVector;

    /// Phishing iff plain http, with a noisy but uninformative url_length.
    fn separable() -> Dataset {
        (0..200)
            .map(|i| {
                let phishing = i % 2 == 0;
                LabeledExample {
                    features: FeatureVector {
                        url_length: 20 + (i * 7) % 13,
                        has_https: u32::from(!phishing),
                        ..FeatureVector::default()
                    },
                    label: if phishing {
                        Label::Phishing
                    } else {
                        Label::Legitimate
                    },
                }
            })
            .collect()
    }

    #[test]
    fn test_default_params() {
        let p = BoosterParams::default();
        assert_eq!(p.n_trees, 100);
        assert_eq!(p.max_depth, 5);
        assert!((p.learning_rate - 0.1).abs() < 1e-12);
        assert!((p.subsample - 0.8).abs() < 1e-12);
        assert!((p.colsample_bytree - 0.8).abs() < 1e-12);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let p = BoosterParams {
            subsample: 0.0,
            ..BoosterParams::default()
        };
        assert!(matches!(p.validate(), Err(PhishError::InvalidParams(_))));

        let p = BoosterParams {
            n_trees: 0,
            ..BoosterParams::default()
        };
        assert!(matches!(p.validate(), Err(PhishError::InvalidParams(_))));
    }

    #[test]
    fn test_fit_separates_trivial_data() {
        let params = BoosterParams {
            colsample_bytree: 1.0,
            ..BoosterParams::default()
        };
        let model = GradientBoostedTrees::fit(&separable(), params).unwrap();

        let mut phishy = FeatureVector {
            url_length: 25,
            ..FeatureVector::default()
        };
        assert!(model.predict_proba(&phishy.to_model_input()) > 0.9);
        assert_eq!(model.predict_label(&phishy.to_model_input()), Label::Phishing);

        phishy.has_https = 1;
        assert!(model.predict_proba(&phishy.to_model_input()) < 0.1);

        let importance = model.feature_importance();
        assert!(importance[FEAT_HAS_HTTPS] > 0.5);
        assert!((importance.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_rejects_empty() {
        let err = GradientBoostedTrees::fit(&Dataset::default(), BoosterParams::default());
        assert!(matches!(err, Err(PhishError::EmptyTrainingSet)));
    }

    #[test]
    fn test_fit_is_reproducible() {
        let params = BoosterParams {
            n_trees: 10,
            ..BoosterParams::default()
        };
        let a = GradientBoostedTrees::fit(&separable(), params).unwrap();
        let b = GradientBoostedTrees::fit(&separable(), params).unwrap();
        for example in separable().examples().iter().take(20) {
            let row = example.features.to_model_input();
            assert_eq!(a.margin(&row), b.margin(&row));
        }
        assert_eq!(a.feature_importance(), b.feature_importance());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model/saved/phishing_model.json");
        let params = BoosterParams {
            n_trees: 5,
            ..BoosterParams::default()
        };
        let model = GradientBoostedTrees::fit(&separable(), params).unwrap();
        model.save(&path).unwrap();

        let loaded = GradientBoostedTrees::load(&path).unwrap();
        assert_eq!(loaded.params(), model.params());
        assert_eq!(loaded.trained_at(), model.trained_at());
        for https in [0, 1] {
            let row = FeatureVector {
                has_https: https,
                url_length: 24,
                ..FeatureVector::default()
            }
            .to_model_input();
            assert!((loaded.predict_proba(&row) - model.predict_proba(&row)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_load_rejects_foreign_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let params = BoosterParams {
            n_trees: 2,
            ..BoosterParams::default()
        };
        let model = GradientBoostedTrees::fit(&separable(), params).unwrap();
        let mut json = serde_json::to_value(&model).unwrap();
        json["feature_names"][0] = serde_json::json!("path_length");
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(matches!(
            GradientBoostedTrees::load(&path),
            Err(PhishError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_label_threshold() {
        assert_eq!(label_for(0.5), Label::Legitimate);
        assert_eq!(label_for(0.51), Label::Phishing);
        assert_eq!(label_for(0.1), Label::Legitimate);
    }
}
