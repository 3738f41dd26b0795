//! The fixed-order 12-field feature vector shared by training and inference.

use serde::{Deserialize, Serialize};

/// Number of features the model consumes.
pub const FEATURE_DIM: usize = 12;

/// Feature names in model-input order. Training and inference both index by this.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "url_length",
    "domain_length",
    "has_ip",
    "has_at",
    "redirects",
    "prefix_suffix",
    "dots_count",
    "suspicious_tld",
    "has_https",
    "domain_age_days",
    "has_form",
    "has_iframe",
];

// ── Indices into the dense representation ──
pub const FEAT_URL_LENGTH: usize = 0;
pub const FEAT_DOMAIN_LENGTH: usize = 1;
pub const FEAT_HAS_IP: usize = 2;
pub const FEAT_HAS_AT: usize = 3;
pub const FEAT_REDIRECTS: usize = 4;
pub const FEAT_PREFIX_SUFFIX: usize = 5;
pub const FEAT_DOTS_COUNT: usize = 6;
pub const FEAT_SUSPICIOUS_TLD: usize = 7;
pub const FEAT_HAS_HTTPS: usize = 8;
pub const FEAT_DOMAIN_AGE_DAYS: usize = 9;
pub const FEAT_HAS_FORM: usize = 10;
pub const FEAT_HAS_IFRAME: usize = 11;

/// Numeric description of a single URL.
///
/// Field declaration order matches [`FEATURE_NAMES`], so the JSON mapping
/// produced by serde lists keys in model-input order as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub url_length: u32,
    pub domain_length: u32,
    pub has_ip: u32,
    pub has_at: u32,
    pub redirects: u32,
    pub prefix_suffix: u32,
    pub dots_count: u32,
    pub suspicious_tld: u32,
    pub has_https: u32,
    pub domain_age_days: u32,
    pub has_form: u32,
    pub has_iframe: u32,
}

impl FeatureVector {
    /// Values in [`FEATURE_NAMES`] order.
    pub fn values(&self) -> [u32; FEATURE_DIM] {
        let mut out = [0u32; FEATURE_DIM];
        out[FEAT_URL_LENGTH] = self.url_length;
        out[FEAT_DOMAIN_LENGTH] = self.domain_length;
        out[FEAT_HAS_IP] = self.has_ip;
        out[FEAT_HAS_AT] = self.has_at;
        out[FEAT_REDIRECTS] = self.redirects;
        out[FEAT_PREFIX_SUFFIX] = self.prefix_suffix;
        out[FEAT_DOTS_COUNT] = self.dots_count;
        out[FEAT_SUSPICIOUS_TLD] = self.suspicious_tld;
        out[FEAT_HAS_HTTPS] = self.has_https;
        out[FEAT_DOMAIN_AGE_DAYS] = self.domain_age_days;
        out[FEAT_HAS_FORM] = self.has_form;
        out[FEAT_HAS_IFRAME] = self.has_iframe;
        out
    }

    /// Rebuild a vector from values in [`FEATURE_NAMES`] order.
    pub fn from_values(values: [u32; FEATURE_DIM]) -> Self {
        Self {
            url_length: values[FEAT_URL_LENGTH],
            domain_length: values[FEAT_DOMAIN_LENGTH],
            has_ip: values[FEAT_HAS_IP],
            has_at: values[FEAT_HAS_AT],
            redirects: values[FEAT_REDIRECTS],
            prefix_suffix: values[FEAT_PREFIX_SUFFIX],
            dots_count: values[FEAT_DOTS_COUNT],
            suspicious_tld: values[FEAT_SUSPICIOUS_TLD],
            has_https: values[FEAT_HAS_HTTPS],
            domain_age_days: values[FEAT_DOMAIN_AGE_DAYS],
            has_form: values[FEAT_HAS_FORM],
            has_iframe: values[FEAT_HAS_IFRAME],
        }
    }

    /// Dense model input.
    pub fn to_model_input(&self) -> [f64; FEATURE_DIM] {
        self.values().map(f64::from)
    }

    /// Whether any of the structural red flags (IP host, suspicious TLD,
    /// brand embedded in a foreign domain) is set.
    pub fn looks_suspicious(&self) -> bool {
        self.has_ip == 1 || self.suspicious_tld == 1 || self.prefix_suffix == 1
    }

    /// `(name, value)` pairs in model-input order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, u32)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }
}
