use anyhow::Result;
use clap::Parser;
use phishguard_server::cli::{Cli, Command};
use phishguard_server::commands;
use phishguard_server::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match &cli.command {
        Command::Train(args) => commands::train::run(&cli.root, args),
        Command::Serve(args) => commands::serve::run(&cli.root, args).await,
        Command::Predict(args) => commands::predict::run_predict(&cli.root, args),
        Command::Extract(args) => commands::predict::run_extract(args),
    };

    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}
