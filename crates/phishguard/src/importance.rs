//! Per-feature importance table, kept for reporting only.

use crate::config::ensure_parent_dir;
use crate::error::{PhishError, Result};
use crate::features::FEATURE_NAMES;
use crate::model::GradientBoostedTrees;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One row of the importance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

/// Importance of every model feature, most important first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportanceTable {
    rows: Vec<FeatureImportance>,
}

impl ImportanceTable {
    /// Table for a fitted model, one row per feature.
    pub fn from_model(model: &GradientBoostedTrees) -> Self {
        let rows = FEATURE_NAMES
            .iter()
            .zip(model.feature_importance())
            .map(|(name, importance)| FeatureImportance {
                feature: name.to_string(),
                importance,
            })
            .collect();
        Self::from_rows(rows)
    }

    /// Sort `rows` by importance, descending. Ties keep their input order.
    pub fn from_rows(mut rows: Vec<FeatureImportance>) -> Self {
        rows.sort_by(|a, b| b.importance.total_cmp(&a.importance));
        Self { rows }
    }

    pub fn rows(&self) -> &[FeatureImportance] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all importance scores.
    pub fn total(&self) -> f64 {
        self.rows.iter().map(|r| r.importance).sum()
    }

    /// Write as CSV with a `feature,importance` header.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        for row in &self.rows {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| PhishError::io(path, e))?;
        Ok(())
    }

    pub fn load_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)?;
        let rows = reader
            .deserialize()
            .collect::<std::result::Result<Vec<FeatureImportance>, _>>()?;
        Ok(Self::from_rows(rows))
    }
}
