//! Labeled examples, CSV persistence, the bundled sample set, and the
//! seeded train/test split.

use crate::error::{PhishError, Result};
use crate::features::{FeatureExtractor, FeatureVector, FEATURE_DIM, FEATURE_NAMES};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Name of the label column in dataset CSVs.
pub const LABEL_COLUMN: &str = "label";

/// Well-known legitimate sites used when no dataset is available.
pub const SAMPLE_LEGITIMATE_URLS: &[&str] = &[
    "https://www.google.com",
    "https://www.amazon.com",
    "https://www.facebook.com",
    "https://www.twitter.com",
    "https://www.microsoft.com",
    "https://www.github.com",
    "https://www.stackoverflow.com",
    "https://www.wikipedia.org",
    "https://www.reddit.com",
    "https://www.netflix.com",
];

/// Typosquats and lures paired with [`SAMPLE_LEGITIMATE_URLS`].
pub const SAMPLE_PHISHING_URLS: &[&str] = &[
    "http://googlle.com",
    "https://amaz0n-secure.com",
    "http://faceb00k-login.com",
    "https://twitter-verify.com",
    "http://microsoft-365-verify.com",
    "http://githhub.com",
    "http://stackoverfl0w.com",
    "http://wikipediaa.com",
    "http://redd1t-login.com",
    "http://netflix-subscription.com",
];

/// Binary class of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    /// Numeric class as stored in datasets.
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Legitimate),
            1 => Some(Label::Phishing),
            _ => None,
        }
    }

    /// Regression target for the logistic objective.
    pub fn target(self) -> f64 {
        f64::from(self.as_u8())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Label::Legitimate => "legitimate",
            Label::Phishing => "phishing",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature vector paired with its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabeledExample {
    pub features: FeatureVector,
    pub label: Label,
}

/// An ordered collection of labeled examples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    examples: Vec<LabeledExample>,
}

impl Dataset {
    pub fn new(examples: Vec<LabeledExample>) -> Self {
        Self { examples }
    }

    /// Build the 20-URL demonstration set by running each sample URL through
    /// `extractor`.
    pub fn sample(extractor: &FeatureExtractor) -> Self {
        let legitimate = SAMPLE_LEGITIMATE_URLS
            .iter()
            .map(|url| (url, Label::Legitimate));
        let phishing = SAMPLE_PHISHING_URLS.iter().map(|url| (url, Label::Phishing));

        legitimate
            .chain(phishing)
            .map(|(url, label)| LabeledExample {
                features: extractor.extract(url),
                label,
            })
            .collect()
    }

    pub fn examples(&self) -> &[LabeledExample] {
        &self.examples
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of examples labeled phishing.
    pub fn phishing_count(&self) -> usize {
        self.examples
            .iter()
            .filter(|e| e.label == Label::Phishing)
            .count()
    }

    /// Number of examples labeled legitimate.
    pub fn legitimate_count(&self) -> usize {
        self.len() - self.phishing_count()
    }

    /// Row-major `n × 12` feature matrix and the matching target vector.
    pub fn design_matrix(&self) -> Result<(Array2<f64>, Vec<f64>)> {
        let flat: Vec<f64> = self
            .examples
            .iter()
            .flat_map(|e| e.features.to_model_input())
            .collect();
        let x = Array2::from_shape_vec((self.len(), FEATURE_DIM), flat)?;
        let y = self.examples.iter().map(|e| e.label.target()).collect();
        Ok((x, y))
    }

    /// Shuffle with a seeded generator and hold out `ceil(test_fraction · n)`
    /// examples for testing. Returns `(train, test)`.
    pub fn train_test_split(&self, test_fraction: f64, seed: u64) -> Result<(Dataset, Dataset)> {
        let n = self.len();
        let n_test = (test_fraction * n as f64).ceil() as usize;
        if n_test == 0 || n_test >= n {
            return Err(PhishError::DatasetTooSmall(n));
        }

        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(seed);
        order.shuffle(&mut rng);

        let pick = |idx: &[usize]| -> Dataset {
            idx.iter().map(|&i| self.examples[i]).collect()
        };
        let test = pick(&order[..n_test]);
        let train = pick(&order[n_test..]);
        Ok((train, test))
    }

    /// Read a dataset CSV whose header is the 12 feature names followed by
    /// `label`, in exactly that order.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| PhishError::io(path, e))?;
        let mut reader = csv::Reader::from_reader(file);

        let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let expected = expected_header();
        if header != expected {
            return Err(PhishError::SchemaMismatch {
                expected,
                found: header,
            });
        }

        let mut examples = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            examples.push(parse_record(&record, line)?);
        }
        Ok(Self { examples })
    }

    /// Write the dataset as CSV, creating parent directories.
    pub fn save_csv(&self, path: &Path) -> Result<()> {
        crate::config::ensure_parent_dir(path)?;
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(expected_header())?;
        for example in &self.examples {
            let mut row: Vec<String> = example
                .features
                .values()
                .iter()
                .map(u32::to_string)
                .collect();
            row.push(example.label.as_u8().to_string());
            writer.write_record(&row)?;
        }
        writer.flush().map_err(|e| PhishError::io(path, e))?;
        Ok(())
    }
}

impl FromIterator<LabeledExample> for Dataset {
    fn from_iter<I: IntoIterator<Item = LabeledExample>>(iter: I) -> Self {
        Self {
            examples: iter.into_iter().collect(),
        }
    }
}

fn expected_header() -> Vec<String> {
    FEATURE_NAMES
        .iter()
        .chain(std::iter::once(&LABEL_COLUMN))
        .map(|s| s.to_string())
        .collect()
}

fn parse_record(record: &csv::StringRecord, line: u64) -> Result<LabeledExample> {
    let invalid = |reason: String| PhishError::InvalidDataset { line, reason };

    if record.len() != FEATURE_DIM + 1 {
        return Err(invalid(format!(
            "expected {} columns, found {}",
            FEATURE_DIM + 1,
            record.len()
        )));
    }

    let mut values = [0u32; FEATURE_DIM];
    for (i, name) in FEATURE_NAMES.iter().enumerate() {
        let raw = record[i].trim();
        values[i] = raw
            .parse()
            .map_err(|_| invalid(format!("{name} is not a non-negative integer: {raw:?}")))?;
    }

    let raw_label = record[FEATURE_DIM].trim();
    let label = raw_label
        .parse::<u8>()
        .ok()
        .and_then(Label::from_u8)
        .ok_or_else(|| invalid(format!("label must be 0 or 1, found {raw_label:?}")))?;

    Ok(LabeledExample {
        features: FeatureVector::from_values(values),
        label,
    })
}
