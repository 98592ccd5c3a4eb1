//! In-memory event store.
//!
//! The store is only ever mutated by replacing its whole contents. A replace
//! builds the new list completely before swapping it in, so concurrent
//! readers see either the previous list or the new one.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::error::{CertCalError, CertCalResult};
use crate::event::{DEFAULT_UID_DOMAIN, Event, EventInput, generate_uid};

#[derive(Debug)]
pub struct EventStore {
    uid_domain: String,
    events: RwLock<Vec<Event>>,
}

impl Default for EventStore {
    fn default() -> Self {
        EventStore::new(DEFAULT_UID_DOMAIN)
    }
}

impl EventStore {
    pub fn new(uid_domain: impl Into<String>) -> Self {
        EventStore {
            uid_domain: uid_domain.into(),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Replace every stored event with `inputs`, returning the count stored.
    ///
    /// All records are normalized first; if any expiry or UID is invalid, or
    /// two records carry the same UID, nothing is changed. Records without a UID
    /// take the UID of a stored event with the same user, name and expiry, so
    /// re-syncing an unchanged list keeps identifiers stable.
    pub fn replace_all(&self, inputs: Vec<EventInput>) -> CertCalResult<usize> {
        let mut events = inputs
            .into_iter()
            .map(EventInput::normalize)
            .collect::<CertCalResult<Vec<_>>>()?;

        let mut claimed: HashSet<String> = HashSet::new();
        for uid in events.iter().filter_map(|e| e.uid.as_ref()) {
            if !claimed.insert(uid.clone()) {
                return Err(CertCalError::DuplicateUid(uid.clone()));
            }
        }

        {
            let current = self.read();
            for event in events.iter_mut().filter(|e| e.uid.is_none()) {
                let reused = current
                    .iter()
                    .filter(|old| old.identity() == event.identity())
                    .filter_map(|old| old.uid.as_ref())
                    .find(|uid| !claimed.contains(*uid))
                    .cloned();

                let uid = reused.unwrap_or_else(|| generate_uid(&self.uid_domain));
                claimed.insert(uid.clone());
                event.uid = Some(uid);
            }
        }

        let count = events.len();
        *self.write() = events;

        debug!(count, "replaced stored events");
        Ok(count)
    }

    /// Snapshot of the stored events in insertion order.
    pub fn list_all(&self) -> Vec<Event> {
        self.read().clone()
    }

    // The list is only ever swapped wholesale, so a poisoned lock still holds
    // a complete list.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Event>> {
        self.events.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Event>> {
        self.events.write().unwrap_or_else(PoisonError::into_inner)
    }
}
