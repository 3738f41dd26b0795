//! URL feature extraction: the fixed-order vector, the extractor, and the
//! pluggable page/domain signal providers.

pub mod extractor;
pub mod signals;
pub mod vector;

pub use extractor::FeatureExtractor;
pub use signals::{FixedSignals, PageSignals, SignalProvider, SimulatedSignals};
pub use vector::{FeatureVector, FEATURE_DIM, FEATURE_NAMES};
