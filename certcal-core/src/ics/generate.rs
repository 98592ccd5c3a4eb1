//! ICS feed generation.

use chrono::{DateTime, Days, NaiveDate, Utc};

use super::builder::{Component, Property};
use crate::event::{DEFAULT_UID_DOMAIN, Event};

pub const DEFAULT_PRODUCT_ID: &str = "-//Certificate Expiry//EN";

/// Reminders attached to every event: (trigger, description)
const REMINDERS: [(&str, &str); 2] = [
    ("-P7D", "Certificate expires in 7 days"),
    ("-P1D", "Certificate expires tomorrow"),
];

/// Calendar-level settings for a generated feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsOptions {
    /// PRODID value
    pub product_id: String,
    /// Domain suffix for UIDs generated during encoding
    pub uid_domain: String,
    /// Display name for subscribing clients (X-WR-CALNAME)
    pub calendar_name: Option<String>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            product_id: DEFAULT_PRODUCT_ID.to_string(),
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            calendar_name: None,
        }
    }
}

/// Generate a complete VCALENDAR document for `events`.
///
/// Every VEVENT shares the same DTSTAMP (`now`). Events without a UID get one
/// generated and written back into the slice so callers can persist it.
pub fn generate_ics(events: &mut [Event], now: DateTime<Utc>, options: &IcsOptions) -> String {
    let dtstamp = format_utc_timestamp(now);

    let mut cal = Component::new("VCALENDAR");
    cal.add("VERSION", "2.0")
        .add("CALSCALE", "GREGORIAN")
        .add("METHOD", "PUBLISH")
        .add("PRODID", options.product_id.as_str());

    if let Some(ref name) = options.calendar_name {
        cal.property(Property::text("X-WR-CALNAME", name));
    }

    for event in events.iter_mut() {
        event.ensure_uid(&options.uid_domain);
        cal.component(event_component(event, &dtstamp));
    }

    cal.to_string()
}

/// Build the VEVENT block for one all-day expiry marker
fn event_component(event: &Event, dtstamp: &str) -> Component {
    let mut vevent = Component::new("VEVENT");

    vevent
        .add("UID", event.uid.as_deref().unwrap_or_default())
        .add("DTSTAMP", dtstamp)
        .property(Property::text("SUMMARY", &event.summary()))
        .property(Property::text("DESCRIPTION", &event.description()))
        .property(Property::new("DTSTART", format_date(event.expiry)).param("VALUE=DATE"))
        .property(
            Property::new("DTEND", format_date(all_day_end(event.expiry))).param("VALUE=DATE"),
        );

    for (trigger, description) in REMINDERS {
        let mut alarm = Component::new("VALARM");
        alarm
            .add("TRIGGER", trigger)
            .add("ACTION", "DISPLAY")
            .property(Property::text("DESCRIPTION", description));
        vevent.component(alarm);
    }

    vevent
}

/// Exclusive end of an all-day event: the following day
fn all_day_end(start: NaiveDate) -> NaiveDate {
    start.checked_add_days(Days::new(1)).unwrap_or(start)
}

/// `YYYYMMDD`, taken from the calendar date itself
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// `YYYYMMDDTHHMMSSZ`
pub fn format_utc_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use icalendar::parser::{read_calendar, unfold};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 8, 5, 9).unwrap()
    }

    fn make_test_events() -> Vec<Event> {
        vec![
            Event::new("Alice", "example.com", date(2025, 3, 10)).with_uid("one@certs.local"),
            Event::new("", "internal-ca", date(2025, 12, 31)).with_uid("two@certs.local"),
        ]
    }

    #[test]
    fn test_generate_ics_all_day_end_is_exclusive() {
        let mut events = make_test_events();
        let ics = generate_ics(&mut events, now(), &IcsOptions::default());

        assert!(
            ics.contains("DTSTART;VALUE=DATE:20250310\r\n"),
            "DTSTART should be the expiry date. ICS:\n{}",
            ics
        );
        assert!(
            ics.contains("DTEND;VALUE=DATE:20250311\r\n"),
            "DTEND should be the next day. ICS:\n{}",
            ics
        );
        // Year boundary
        assert!(ics.contains("DTSTART;VALUE=DATE:20251231\r\n"));
        assert!(ics.contains("DTEND;VALUE=DATE:20260101\r\n"));
    }

    #[test]
    fn test_generate_ics_dtstamp_is_uniform() {
        let mut events = make_test_events();
        events.push(Event::new("Bob", "mail", date(2026, 1, 5)));

        let ics = generate_ics(&mut events, now(), &IcsOptions::default());
        let stamps: Vec<&str> = ics.lines().filter(|l| l.starts_with("DTSTAMP:")).collect();

        assert_eq!(stamps.len(), 3);
        assert!(stamps.iter().all(|s| *s == "DTSTAMP:20250201T080509Z"));
    }

    #[test]
    fn test_generate_ics_event_line_order() {
        let mut events = vec![make_test_events().remove(0)];
        let ics = generate_ics(&mut events, now(), &IcsOptions::default());

        let expected = "BEGIN:VCALENDAR\r\n\
            VERSION:2.0\r\n\
            CALSCALE:GREGORIAN\r\n\
            METHOD:PUBLISH\r\n\
            PRODID:-//Certificate Expiry//EN\r\n\
            BEGIN:VEVENT\r\n\
            UID:one@certs.local\r\n\
            DTSTAMP:20250201T080509Z\r\n\
            SUMMARY:Alice \u{2013} example.com Expires\r\n\
            DESCRIPTION:Certificate example.com for Alice expires on Mon Mar 10 2025.\r\n\
            DTSTART;VALUE=DATE:20250310\r\n\
            DTEND;VALUE=DATE:20250311\r\n\
            BEGIN:VALARM\r\n\
            TRIGGER:-P7D\r\n\
            ACTION:DISPLAY\r\n\
            DESCRIPTION:Certificate expires in 7 days\r\n\
            END:VALARM\r\n\
            BEGIN:VALARM\r\n\
            TRIGGER:-P1D\r\n\
            ACTION:DISPLAY\r\n\
            DESCRIPTION:Certificate expires tomorrow\r\n\
            END:VALARM\r\n\
            END:VEVENT\r\n\
            END:VCALENDAR\r\n";

        assert_eq!(ics, expected);
    }

    #[test]
    fn test_generate_ics_two_alarms_per_event() {
        let mut events = make_test_events();
        let ics = generate_ics(&mut events, now(), &IcsOptions::default());

        for block in ics.split("BEGIN:VEVENT").skip(1) {
            assert_eq!(block.matches("BEGIN:VALARM").count(), 2);
            let triggers: Vec<&str> = block.lines().filter(|l| l.starts_with("TRIGGER:")).collect();
            assert_eq!(triggers, vec!["TRIGGER:-P7D", "TRIGGER:-P1D"]);
        }
    }

    #[test]
    fn test_generate_ics_empty_is_envelope_only() {
        let ics = generate_ics(&mut [], now(), &IcsOptions::default());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(!ics.contains("VEVENT"));
    }

    #[test]
    fn test_generate_ics_assigns_and_keeps_missing_uids() {
        let mut events = vec![Event::new("A", "X", date(2025, 1, 1))];
        let options = IcsOptions {
            uid_domain: "example.org".to_string(),
            ..IcsOptions::default()
        };

        let first = generate_ics(&mut events, now(), &options);
        let uid = events[0].uid.clone().expect("UID should be written back");
        assert!(uid.ends_with("@example.org"));
        assert!(first.contains(&format!("UID:{}\r\n", uid)));

        // Same input and timestamp give the same document once UIDs exist
        let second = generate_ics(&mut events, now(), &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_ics_calendar_name() {
        let options = IcsOptions {
            calendar_name: Some("Certificates, prod".to_string()),
            ..IcsOptions::default()
        };
        let ics = generate_ics(&mut [], now(), &options);

        assert!(ics.contains("X-WR-CALNAME:Certificates\\, prod\r\n"));
    }

    #[test]
    fn test_generate_ics_last_representable_date_does_not_panic() {
        let mut events = vec![Event::new("", "forever", NaiveDate::MAX)];
        let ics = generate_ics(&mut events, now(), &IcsOptions::default());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    }

    #[test]
    fn test_generate_ics_is_valid_rfc5545() {
        let mut events = make_test_events();
        let ics = generate_ics(&mut events, now(), &IcsOptions::default());

        let unfolded = unfold(&ics);
        let calendar = read_calendar(&unfolded).expect("generated ICS should parse");
        let vevents: Vec<_> = calendar
            .components
            .iter()
            .filter(|c| c.name == "VEVENT")
            .collect();

        assert_eq!(vevents.len(), 2);
        for vevent in vevents {
            assert!(vevent.find_prop("UID").is_some());
            assert_eq!(
                vevent.components.iter().filter(|c| c.name == "VALARM").count(),
                2
            );
        }
    }
}
