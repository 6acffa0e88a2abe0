//! Infrastructure bootstrap helpers for runtime wiring.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations, DbPool};
use crate::adapter::outbound::sqlite::{
    SqliteProductCatalog, SqliteRecommendationStore, SqliteTransactionFeed,
};
use crate::application::recommend::{BatchJob, RecommendationService};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Recommendation service backed by one SQLite database.
pub type SqliteService =
    RecommendationService<SqliteTransactionFeed, SqliteProductCatalog, SqliteRecommendationStore>;

/// Batch job over [`SqliteService`].
pub type SqliteBatchJob =
    BatchJob<SqliteTransactionFeed, SqliteProductCatalog, SqliteRecommendationStore>;

/// Open (creating if needed) the database and apply pending migrations.
///
/// # Errors
/// Returns an error if the parent directory cannot be created, the pool
/// cannot be built, or a migration fails.
pub fn open_database(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let url = path.to_string_lossy();
    let pool = create_pool(&url)?;
    run_migrations(&pool)?;
    debug!(database = %url, "Database ready");
    Ok(pool)
}

/// Wire the SQLite adapters into a service using `config`.
///
/// # Errors
/// Returns an error if the engine settings are invalid.
pub fn build_service(config: &Config, pool: DbPool) -> Result<SqliteService> {
    let service = RecommendationService::new(
        SqliteTransactionFeed::new(pool.clone()),
        SqliteProductCatalog::new(pool.clone()),
        SqliteRecommendationStore::new(pool),
        config.engine_settings()?,
    );
    info!(database = %config.database, "Recommendation service ready");
    Ok(service)
}

/// Batch job running the configured clustering recompute for every owner.
#[must_use]
pub fn build_batch_job(config: &Config, service: Arc<SqliteService>) -> SqliteBatchJob {
    let clustering = config.clustering.clone();
    BatchJob::new(service, move |owner| clustering.request(owner))
}
