//! PhishGuard core library.
//!
//! Turns URLs into a fixed 12-field feature vector, trains a gradient-boosted
//! tree ensemble on labeled vectors, and classifies new URLs as phishing or
//! legitimate with a confidence score.
//!
//! # Example
//!
//! ```no_run
//! use phishguard::{FeatureExtractor, Predictor};
//! use std::path::Path;
//!
//! let predictor = Predictor::load(
//!     Path::new("model/saved/phishing_model.json"),
//!     FeatureExtractor::default(),
//! )
//! .unwrap();
//! let verdict = predictor.predict("http://secure-paypal-login.tk").unwrap();
//! println!("{} ({:.2}%)", verdict.label, verdict.confidence * 100.0);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod features;
pub mod importance;
pub mod metrics;
pub mod model;
pub mod predictor;
pub mod training;

pub use config::{ArtifactPaths, TrainingConfig};
pub use dataset::{Dataset, Label, LabeledExample};
pub use error::{PhishError, Result};
pub use features::{
    FeatureExtractor, FeatureVector, FixedSignals, PageSignals, SignalProvider, SimulatedSignals,
    FEATURE_DIM, FEATURE_NAMES,
};
pub use importance::{FeatureImportance, ImportanceTable};
pub use metrics::{ClassificationMetrics, ConfusionMatrix};
pub use model::{BoosterParams, GradientBoostedTrees};
pub use predictor::{Prediction, Predictor};
pub use training::{train, DatasetSource, TrainingReport};
