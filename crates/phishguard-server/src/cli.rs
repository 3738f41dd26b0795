//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "phishguard",
    version,
    about = "Phishing URL classifier: train the model, serve predictions, inspect features"
)]
pub struct Cli {
    /// Directory holding the data/ and model/ artifacts.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Train the model and write the model and feature-importance artifacts.
    Train(TrainArgs),
    /// Serve predictions over HTTP.
    Serve(ServeArgs),
    /// Classify a single URL with the trained model.
    Predict(PredictArgs),
    /// Print the feature vector extracted from a URL.
    Extract(ExtractArgs),
}

/// Options for the simulated page and domain signals.
#[derive(Debug, Clone, Args)]
pub struct SignalArgs {
    /// Seed for the simulated domain-age/form/iframe signals (random if omitted).
    #[arg(long)]
    pub signal_seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// Seed for the train/test shuffle.
    #[arg(long, default_value_t = phishguard::config::DEFAULT_SPLIT_SEED)]
    pub split_seed: u64,

    /// Print the report as JSON instead of a table.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub signals: SignalArgs,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    #[command(flatten)]
    pub signals: SignalArgs,
}

impl ServeArgs {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Args)]
pub struct PredictArgs {
    /// URL to classify.
    pub url: String,

    /// Print the verdict as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub signals: SignalArgs,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// URL to extract features from.
    pub url: String,

    #[command(flatten)]
    pub signals: SignalArgs,
}
