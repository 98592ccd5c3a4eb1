//! Core types for certcal.
//!
//! - `Event` and the sync-endpoint record `EventInput`
//! - `ics` for feed generation and line-prefix parsing
//! - `EventStore`, the authoritative list the feed is generated from

pub mod error;
pub mod event;
pub mod ics;
pub mod store;

pub use error::{CertCalError, CertCalResult};
pub use event::{Event, EventInput, parse_expiry};
pub use store::EventStore;
