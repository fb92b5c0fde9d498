use std::sync::Arc;

use anyhow::{Context, Result};
use extcheck_config::Config;
use extcheck_core::database::{
    ExtensionStore, InMemoryExtensionStore, PostgresExtensionStore,
};
use tracing::{info, warn};

/// Open the configured store. PostgreSQL is migrated before use; without a
/// database URL records live in process memory.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn ExtensionStore>> {
    let Some(url) = config.database.url.as_deref() else {
        warn!("DATABASE_URL not set; using the in-memory extension store");
        return Ok(Arc::new(InMemoryExtensionStore::new()));
    };

    let store = connect_postgres(url, config.database.max_connections).await?;
    store
        .migrate()
        .await
        .context("failed to apply database migrations")?;
    info!("Database migrations up to date");

    Ok(Arc::new(store))
}

pub async fn connect_postgres(
    url: &str,
    max_connections: u32,
) -> Result<PostgresExtensionStore> {
    PostgresExtensionStore::connect(url, max_connections)
        .await
        .context("failed to connect to PostgreSQL")
}
