use std::sync::Arc;

use certcal_core::EventStore;
use certcal_core::ics::{IcsOptions, generate_ics};
use chrono::{DateTime, Utc};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EventStore>,
    pub ics: Arc<IcsOptions>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        AppState {
            store: Arc::new(EventStore::new(config.uid_domain.clone())),
            ics: Arc::new(config.ics_options()),
        }
    }

    /// Render the current store contents as an ICS document
    pub fn feed(&self, now: DateTime<Utc>) -> String {
        // UIDs are assigned when events are stored, so nothing is generated here
        let mut events = self.store.list_all();
        generate_ics(&mut events, now, &self.ics)
    }
}
