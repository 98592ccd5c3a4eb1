//! Lightweight ICS field extraction.
//!
//! This is a line-prefix scanner, not an RFC 5545 parser: folded lines are not
//! joined and escaped characters are returned as-is. Callers go through
//! [`split_vevents`] and [`field_value`] only, so either can be replaced by a
//! full parser without touching them.

use chrono::{Days, NaiveDate};

const VEVENT_DELIMITER: &str = "BEGIN:VEVENT";

/// Fields extracted from one VEVENT block; missing fields are empty strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    pub dtstart: String,
    pub dtend: String,
}

impl DecodedEvent {
    /// Extract the known fields from a single block.
    pub fn from_block(block: &str) -> Self {
        DecodedEvent {
            uid: field_value(block, "UID"),
            summary: field_value(block, "SUMMARY"),
            description: field_value(block, "DESCRIPTION"),
            dtstart: field_value(block, "DTSTART"),
            dtend: field_value(block, "DTEND"),
        }
    }

    /// The expiry date this block marks.
    ///
    /// DTSTART is the expiry day. When only DTEND is present it is treated as
    /// the exclusive end of an all-day event, so the day before.
    pub fn expiry(&self) -> Option<NaiveDate> {
        if let Some(start) = parse_ics_date(&self.dtstart) {
            return Some(start);
        }

        parse_ics_date(&self.dtend)?.checked_sub_days(Days::new(1))
    }
}

/// Decode every VEVENT block of `document`. Never fails.
pub fn parse_events(document: &str) -> Vec<DecodedEvent> {
    split_vevents(document)
        .into_iter()
        .map(DecodedEvent::from_block)
        .collect()
}

/// Split a document on `BEGIN:VEVENT`, dropping everything before the first
/// block. A document without VEVENTs yields no blocks.
pub fn split_vevents(document: &str) -> Vec<&str> {
    document.split(VEVENT_DELIMITER).skip(1).collect()
}

/// Value of the first line in `block` that begins with `FIELD:` or `FIELD;`.
///
/// The field name, any parameters and the `:` separator are stripped and the
/// remainder trimmed. Returns an empty string when no line matches.
pub fn field_value(block: &str, field: &str) -> String {
    block
        .lines()
        .find_map(|line| {
            let rest = line.strip_prefix(field)?;
            match rest.chars().next() {
                Some(':') => Some(&rest[1..]),
                Some(';') => rest.split_once(':').map(|(_, value)| value),
                _ => None,
            }
        })
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Parse the date part of a DTSTART/DTEND value (`YYYYMMDD` or
/// `YYYYMMDDTHHMMSS[Z]`).
fn parse_ics_date(value: &str) -> Option<NaiveDate> {
    let digits = value.get(..8)?;
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}
