//! ScholNet Ingestion Service
//!
//! Builds the relational snapshot:
//! 1. Fetches works per configured concept from OpenAlex
//! 2. Admits and deduplicates them
//! 3. Loads venues, authors, and works into the database
//! 4. Runs the filtering pass (types, cutoff date, author dedup)

mod errors;
mod filtering;
mod loader;
mod openalex;
mod state;

use crate::loader::Loader;
use crate::openalex::OpenAlexClient;
use crate::state::FetchState;
use scholnet_common::{AppConfig, DbPool, Repository, VERSION};
use tracing::{info, warn};
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

    info!("Starting ScholNet ingestion v{}", VERSION);

    if config.openalex.concept_ids.is_empty() {
        warn!("no concept ids configured; nothing to fetch");
    }

    // Initialize database connection
    let pool = DbPool::new(&config.database).await?;
    let repository = Repository::new(pool);

    let client = OpenAlexClient::new(&config.openalex)?;

    // Seed the seen-set with works already stored
    let known = repository.work_external_ids().await?;
    info!(known = known.len(), "existing works found");
    let mut state = FetchState::with_known_ids(known);

    let loader = Loader::new(&repository);
    for concept_id in &config.openalex.concept_ids {
        info!(concept = %concept_id, "fetching works");
        let works = client.works_by_concept(concept_id).await?;

        let fetched = works.len();
        for work in works {
            state.admit(work);
        }
        info!(
            fetched,
            admitted = state.admitted_count(),
            "admit filter applied"
        );

        loader.load(state.drain()).await?;
    }

    // Post-load filtering over the full snapshot
    let summary = filtering::run_filtering(&repository, &config.filter).await?;
    info!(
        removed_by_type = summary.removed_by_type,
        removed_by_date = summary.removed_by_date,
        renamed_authors = summary.renamed_authors,
        alt_ids_assigned = summary.alt_ids_assigned,
        "filtering complete"
    );

    info!("Ingestion finished");
    Ok(())
}
