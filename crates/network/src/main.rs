//! ScholNet network binary
//!
//! Loads the works snapshot from the database, runs the analysis
//! pipeline, and writes the JSON report.

use scholnet_network::pipeline;
use scholnet_network::records::WorkRecord;
use scholnet_common::{AppConfig, DbPool, Repository, VERSION};
use std::collections::HashMap;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        e
    })?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("Starting ScholNet network analysis v{}", VERSION);

    // Connect and load the snapshot
    let pool = DbPool::new(&config.database).await?;
    let repository = Repository::new(pool);

    let models = repository.load_works().await?;
    info!(works = models.len(), "snapshot loaded");

    let records = models
        .into_iter()
        .map(WorkRecord::from_model)
        .collect::<Result<Vec<_>, _>>()?;

    let alt_ids: HashMap<i64, i64> = repository.author_alt_ids().await?.into_iter().collect();

    // Analyze and report
    let report = pipeline::analyze(&records, &alt_ids)?;
    let path = report.write_to(&config.report.output_dir)?;
    info!(path = %path.display(), "report written");

    Ok(())
}
