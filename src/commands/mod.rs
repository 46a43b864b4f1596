pub mod calendar;
pub mod import;
pub mod schedule;
pub mod serve;

// Re-export command functions for convenience
pub use calendar::calendar;
pub use import::import;
pub use schedule::schedule;
pub use serve::{serve, ServeParams};

use anyhow::{Context, Result};
use std::sync::Arc;

use talentsync::config::Config;
use talentsync::service::SchedulingService;
use talentsync::storage::SqliteCandidateRepository;

/// Open the configured candidate store
pub(crate) fn open_store(config: &Config) -> Result<Arc<SqliteCandidateRepository>> {
    let store = SqliteCandidateRepository::new(&config.store.sqlite_path).with_context(|| {
        format!(
            "Failed to open candidate store: {}",
            config.store.sqlite_path.display()
        )
    })?;
    Ok(Arc::new(store))
}

/// Build the scheduling service around an open store
pub(crate) fn build_service(
    config: &Config,
    store: &Arc<SqliteCandidateRepository>,
) -> Result<SchedulingService> {
    SchedulingService::from_config(config, store.clone())
        .context("Failed to configure scheduling service")
}

/// Close the store once every other handle is gone
pub(crate) fn close_store(store: Arc<SqliteCandidateRepository>) {
    match Arc::try_unwrap(store) {
        Ok(store) => {
            if let Err(e) = store.close() {
                tracing::warn!(error = %e, "Failed to close candidate store");
            }
        }
        Err(_) => tracing::warn!("Candidate store still in use, dropping handle"),
    }
}
