//! ICS feed generation and parsing.
//!
//! Generation follows RFC 5545 for all-day events. Parsing is a deliberately
//! small line-prefix scanner.

pub mod builder;
mod generate;
mod parse;

pub use generate::{
    DEFAULT_PRODUCT_ID, IcsOptions, format_date, format_utc_timestamp, generate_ics,
};
pub use parse::{DecodedEvent, field_value, parse_events, split_vevents};
