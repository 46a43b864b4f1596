use anyhow::{Context, Result};

use talentsync::config::Config;
use talentsync::service::failure_message;

/// Run one scheduling pass and print the summary as JSON
pub async fn schedule(config: Config, collection: Option<String>) -> Result<()> {
    let store = super::open_store(&config)?;
    let service = super::build_service(&config, &store)?;

    let collection = collection.unwrap_or_else(|| service.default_collection().to_string());
    let result = service.run(&collection).await;

    drop(service);
    super::close_store(store);

    match result {
        Ok(summary) => {
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{json}");
            Ok(())
        }
        Err(e) => anyhow::bail!(failure_message(&e)),
    }
}
