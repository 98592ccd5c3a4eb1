//! Print the events found in an ICS document.

use std::path::Path;

use anyhow::{Context, Result};
use certcal_core::ics::{DecodedEvent, parse_events};

pub fn run(input: &Path) -> Result<()> {
    let document = std::fs::read_to_string(input)
        .with_context(|| format!("Could not read {}", input.display()))?;

    let events = parse_events(&document);
    if events.is_empty() {
        println!("No events found in {}", input.display());
        return Ok(());
    }

    for event in &events {
        println!("{}", format_line(event));
    }

    Ok(())
}

fn format_line(event: &DecodedEvent) -> String {
    let expiry = event
        .expiry()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "(no date)".to_string());

    let uid = if event.uid.is_empty() { "-" } else { event.uid.as_str() };

    format!("{}  {}  [{}]", expiry, event.summary, uid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        let event = DecodedEvent {
            uid: "abc@certs.local".to_string(),
            summary: "Alice \u{2013} example.com Expires".to_string(),
            dtstart: "20250310".to_string(),
            ..DecodedEvent::default()
        };
        assert_eq!(
            format_line(&event),
            "2025-03-10  Alice \u{2013} example.com Expires  [abc@certs.local]"
        );

        assert_eq!(format_line(&DecodedEvent::default()), "(no date)    [-]");
    }
}
