//! Gradient-boosted decision trees for binary classification.

pub mod booster;

pub use booster::{label_for, BoosterParams, GradientBoostedTrees};
