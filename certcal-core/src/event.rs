//! Certificate expiry events.
//!
//! An `Event` marks the day a certificate expires. Expiry is a plain calendar
//! date; nothing here converts through a timezone, so the day cannot shift.

use chrono::{DateTime, Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CertCalError, CertCalResult};

/// Default domain appended to generated UIDs.
pub const DEFAULT_UID_DOMAIN: &str = "certs.local";

/// A certificate expiry event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier, assigned once and never changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Certificate holder, empty when unknown
    #[serde(default)]
    pub user: String,
    /// Certificate name
    #[serde(default)]
    pub name: String,
    pub expiry: NaiveDate,
}

impl Event {
    pub fn new(user: impl Into<String>, name: impl Into<String>, expiry: NaiveDate) -> Self {
        Event {
            uid: None,
            user: user.into(),
            name: name.into(),
            expiry,
        }
    }

    /// Builder-style setter for an existing UID.
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Return the UID, generating `<uuid>@<domain>` first if none is set.
    pub fn ensure_uid(&mut self, domain: &str) -> &str {
        self.uid
            .get_or_insert_with(|| generate_uid(domain))
            .as_str()
    }

    /// Calendar title, e.g. `Alice – example.com Expires`.
    pub fn summary(&self) -> String {
        if self.user.is_empty() {
            format!("{} Expires", self.name)
        } else {
            format!("{} \u{2013} {} Expires", self.user, self.name)
        }
    }

    /// Human sentence naming the certificate, holder and expiry date.
    pub fn description(&self) -> String {
        let holder = if self.user.is_empty() {
            String::new()
        } else {
            format!(" for {}", self.user)
        };

        format!(
            "Certificate {}{} expires on {}.",
            self.name,
            holder,
            self.expiry.format("%a %b %d %Y")
        )
    }

    /// Key used to recognise the same certificate across re-syncs.
    pub(crate) fn identity(&self) -> (&str, &str, NaiveDate) {
        (&self.user, &self.name, self.expiry)
    }
}

/// Generate a fresh, collision-resistant UID.
pub fn generate_uid(domain: &str) -> String {
    format!("{}@{}", uuid::Uuid::new_v4(), domain)
}

/// A record as submitted to the sync endpoint: `{user, name, expiry}`.
///
/// `uid` is optional so clients that received identifiers from the feed or
/// `/api/events` can send them back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventInput {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub expiry: String,
}

impl EventInput {
    pub fn new(user: &str, name: &str, expiry: &str) -> Self {
        EventInput {
            uid: None,
            user: Some(user.to_string()),
            name: Some(name.to_string()),
            expiry: expiry.to_string(),
        }
    }

    /// Apply the sync normalization rules.
    ///
    /// Missing text fields become empty strings. An unparsable expiry, or a
    /// UID with control characters, is an error rather than a broken feed.
    pub fn normalize(self) -> CertCalResult<Event> {
        let name = self.name.unwrap_or_default();
        let expiry = parse_expiry(&self.expiry).ok_or_else(|| CertCalError::InvalidExpiry {
            name: name.clone(),
            value: self.expiry.clone(),
        })?;

        let uid = self.uid.filter(|uid| !uid.trim().is_empty());
        if let Some(ref uid) = uid {
            // UIDs are written to the feed verbatim
            if uid.chars().any(char::is_control) {
                return Err(CertCalError::InvalidUid(uid.clone()));
            }
        }

        Ok(Event {
            uid,
            user: self.user.unwrap_or_default(),
            name,
            expiry,
        })
    }
}

/// Parse an expiry date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp as produced by a browser's
/// `Date.toJSON()`, in which case the date as written in the timestamp is used.
///
/// The year must be four unsigned digits, and the day after the expiry (the
/// exclusive end of the all-day event) must still have one.
pub fn parse_expiry(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    let bytes = value.as_bytes();
    if bytes.len() < 5 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })?;

    let end = date.checked_add_days(Days::new(1))?;
    (end.year() <= 9999).then_some(date)
}
