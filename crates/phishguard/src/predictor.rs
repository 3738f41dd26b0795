//! Inference handle: load the model once, then score URLs from any thread.

use crate::dataset::Label;
use crate::error::{PhishError, Result};
use crate::features::{FeatureExtractor, FeatureVector};
use crate::model::{label_for, GradientBoostedTrees};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Verdict for one URL.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Probability assigned to `label`, so always at least 0.5.
    pub confidence: f64,
    /// Probability of the phishing class.
    pub phishing_probability: f64,
    pub features: FeatureVector,
}

/// Immutable pairing of a trained model with the extractor used to feed it.
#[derive(Debug)]
pub struct Predictor {
    model: GradientBoostedTrees,
    extractor: FeatureExtractor,
}

impl Predictor {
    pub fn new(model: GradientBoostedTrees, extractor: FeatureExtractor) -> Self {
        Self { model, extractor }
    }

    /// Load the model artifact at `path`.
    pub fn load(path: &Path, extractor: FeatureExtractor) -> Result<Self> {
        let model = GradientBoostedTrees::load(path)?;
        info!(
            path = %path.display(),
            trees = model.params().n_trees,
            trained_at = %model.trained_at(),
            "model loaded"
        );
        Ok(Self::new(model, extractor))
    }

    /// Extract features for `url` and classify them.
    pub fn predict(&self, url: &str) -> Result<Prediction> {
        let features = self.extractor.extract(url);
        self.predict_features(features)
    }

    /// Classify an already extracted feature vector.
    pub fn predict_features(&self, features: FeatureVector) -> Result<Prediction> {
        let p = self.model.predict_proba(&features.to_model_input());
        if !p.is_finite() {
            return Err(PhishError::NonFiniteScore(p));
        }

        let label = label_for(p);
        let confidence = match label {
            Label::Phishing => p,
            Label::Legitimate => 1.0 - p,
        };
        debug!(%label, confidence, "scored URL");

        Ok(Prediction {
            label,
            confidence,
            phishing_probability: p,
            features,
        })
    }

    pub fn model(&self) -> &GradientBoostedTrees {
        &self.model
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }
}
