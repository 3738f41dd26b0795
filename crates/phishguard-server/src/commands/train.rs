//! `phishguard train`: fit the model and report held-out metrics.

use crate::cli::TrainArgs;
use crate::output::{self, Styled};
use anyhow::{Context, Result};
use phishguard::{ArtifactPaths, DatasetSource, FeatureExtractor, TrainingConfig, TrainingReport};
use std::path::Path;

pub fn run(root: &Path, args: &TrainArgs) -> Result<()> {
    let mut config = TrainingConfig::new(ArtifactPaths::under(root));
    config.split_seed = args.split_seed;
    let extractor = FeatureExtractor::simulated(args.signals.signal_seed);

    let report = phishguard::train(&config, &extractor).context("training failed")?;

    if args.json {
        output::print_json(&report)?;
    } else {
        print_report(&Styled::new(), &report);
    }
    Ok(())
}

fn print_report(s: &Styled, report: &TrainingReport) {
    output::print_header(s);

    output::print_section(s, "Dataset");
    let source = match &report.source {
        DatasetSource::Loaded(p) => format!("loaded from {}", p.display()),
        DatasetSource::Synthesized(p) => format!("sample set written to {}", p.display()),
    };
    output::print_row("Source", &source);
    output::print_row("Examples", &report.examples.to_string());
    output::print_row("Phishing", &report.phishing.to_string());
    output::print_row("Legitimate", &report.legitimate.to_string());
    output::print_row(
        "Train / test",
        &format!("{} / {}", report.train_size, report.test_size),
    );

    let m = &report.metrics;
    output::print_section(s, "Evaluation");
    output::print_row("Accuracy", &format!("{:.4}", m.accuracy));
    output::print_row("Precision", &format!("{:.4}", m.precision));
    output::print_row("Recall", &format!("{:.4}", m.recall));
    output::print_row("F1 Score", &format!("{:.4}", m.f1));
    println!("    Confusion Matrix:");
    for line in m.confusion.to_string().lines() {
        println!("      {line}");
    }

    output::print_section(s, "Feature Importance");
    for row in report.importance.rows() {
        println!(
            "    {:<18} {} {:.4}",
            row.feature,
            s.dim(&output::bar(row.importance, 20)),
            row.importance
        );
    }

    println!();
    println!(
        "  {} Model saved to {}",
        s.status(true),
        report.model_path.display()
    );
    println!(
        "  {} Feature importance saved to {}",
        s.status(true),
        report.importance_path.display()
    );
}
