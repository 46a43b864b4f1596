use anyhow::{Context, Result};
use std::path::Path;

use talentsync::config::Config;
use talentsync::models::Candidate;
use talentsync::storage::CandidateRepository;

/// Load a JSON array of `{name, email, rank}` records into a collection
pub fn import(config: &Config, file: &Path, collection: Option<String>) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read candidate file: {}", file.display()))?;

    let candidates: Vec<Candidate> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse candidate file: {}", file.display()))?;

    let collection = collection.unwrap_or_else(|| config.store.collection.clone());

    let store = super::open_store(config)?;
    let inserted = store
        .insert_all(&collection, &candidates)
        .context("Failed to insert candidates")?;
    let total = store.count(&collection).context("Failed to count candidates")?;
    super::close_store(store);

    tracing::info!(collection = %collection, inserted, total, "Candidates imported");
    println!("Imported {inserted} candidates into '{collection}' ({total} total)");

    Ok(())
}
