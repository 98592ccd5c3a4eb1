//! Render a JSON event list to an ICS file without running the server.

use std::path::Path;

use anyhow::{Context, Result};
use certcal_core::ics::generate_ics;
use certcal_core::{EventInput, EventStore};
use chrono::{DateTime, Utc};

use crate::config::ServerConfig;

pub fn run(config: &ServerConfig, input: &Path, output: Option<&Path>) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read {}", input.display()))?;

    let ics = render(config, &json, Utc::now())?;

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Could not write {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote calendar");
        }
        None => print!("{}", ics),
    }

    Ok(())
}

/// Normalize `json` (the sync-endpoint shape) and generate the feed
fn render(config: &ServerConfig, json: &str, now: DateTime<Utc>) -> Result<String> {
    let inputs: Vec<EventInput> =
        serde_json::from_str(json).context("Expected a JSON array of {user, name, expiry}")?;

    let store = EventStore::new(config.uid_domain.clone());
    store.replace_all(inputs)?;

    let mut events = store.list_all();
    Ok(generate_ics(&mut events, now, &config.ics_options()))
}
