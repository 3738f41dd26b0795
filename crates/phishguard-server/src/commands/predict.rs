//! `phishguard predict` and `phishguard extract`: one-shot queries.

use crate::cli::{ExtractArgs, PredictArgs};
use crate::output::{self, Styled};
use anyhow::{Context, Result};
use phishguard::{ArtifactPaths, FeatureExtractor, Label, Predictor};
use std::path::Path;

pub fn run_predict(root: &Path, args: &PredictArgs) -> Result<()> {
    let paths = ArtifactPaths::under(root);
    let extractor = FeatureExtractor::simulated(args.signals.signal_seed);
    let predictor = Predictor::load(&paths.model, extractor).with_context(|| {
        format!(
            "failed to load model from {} (run `phishguard train` first)",
            paths.model.display()
        )
    })?;

    let verdict = predictor.predict(&args.url)?;
    if args.json {
        return output::print_json(&verdict);
    }

    let s = Styled::new();
    let (sym, label) = match verdict.label {
        Label::Phishing => (s.status(false), s.red("phishing")),
        Label::Legitimate => (s.status(true), s.green("legitimate")),
    };
    println!(
        "  {sym} {} is {label} ({:.2}% confidence)",
        s.bold(&args.url),
        verdict.confidence * 100.0
    );
    for (name, value) in verdict.features.named() {
        output::print_row(name, &value.to_string());
    }
    Ok(())
}

pub fn run_extract(args: &ExtractArgs) -> Result<()> {
    let extractor = FeatureExtractor::simulated(args.signals.signal_seed);
    output::print_json(&extractor.extract(&args.url))
}
