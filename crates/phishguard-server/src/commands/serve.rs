//! `phishguard serve`: load the model once and answer HTTP requests.

use crate::cli::ServeArgs;
use crate::http::{build_router, load_importance, AppState};
use anyhow::{Context, Result};
use phishguard::{ArtifactPaths, FeatureExtractor, Predictor};
use std::future::Future;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{error, info};

pub async fn run(root: &Path, args: &ServeArgs) -> Result<()> {
    let paths = ArtifactPaths::under(root);
    let extractor = FeatureExtractor::simulated(args.signals.signal_seed);

    let predictor = Predictor::load(&paths.model, extractor).with_context(|| {
        format!(
            "failed to load model from {} (run `phishguard train` first)",
            paths.model.display()
        )
    })?;
    let importance = load_importance(&paths.importance);

    let app = build_router(AppState::new(predictor, importance));
    let addr = args.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, version = env!("CARGO_PKG_VERSION"), "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .context("server error")?;
    info!("server stopped");
    Ok(())
}

/// Resolve once `signal` fires. If the handler cannot be installed, log it and
/// keep serving until the process is killed.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("received shutdown signal"),
        Err(e) => {
            error!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_shutdown_fires_on_signal() {
        let done = tokio::time::timeout(
            Duration::from_secs(1),
            wait_for_shutdown(async { Ok(()) }),
        )
        .await;
        assert!(done.is_ok());
    }

    #[tokio::test]
    async fn test_broken_signal_handler_keeps_serving() {
        let done = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_shutdown(async { Err(std::io::Error::other("no signal handler")) }),
        )
        .await;
        assert!(done.is_err());
    }
}
