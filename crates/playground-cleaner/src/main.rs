//! Playground Cleaner - retention sweep for user snippets
//!
//! This is the main entry point for the cleaner job.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use playground_cleaner::{log_outcome, CleanerConfig, SweepJob};
use playground_store::open_store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,playground=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Playground Cleaner");

    let config = CleanerConfig::from_env()?;
    config.validate()?;

    tracing::info!(
        data_dir = %config.store.data_dir.display(),
        project_id = %config.store.project_id,
        mock = config.store.mock,
        day_diff = config.day_diff,
        interval_seconds = config.interval_seconds,
        timeout_seconds = config.timeout_seconds,
        run_once = config.run_once,
        "Cleaner configuration loaded"
    );

    let store = open_store(&config.store)?;
    let job = SweepJob::new(store, config.day_diff, config.timeout());

    if config.run_once {
        let outcome = job.run_once().await;
        log_outcome(&outcome);
        outcome?;
        return Ok(());
    }

    job.run_scheduled(config.interval(), async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    })
    .await;

    Ok(())
}
