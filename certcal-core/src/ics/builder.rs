//! Structured ICS document builder.
//!
//! Components hold an ordered list of property lines and nested components
//! and are serialized in one pass at the end, so line order is exactly the
//! order in which entries were added.

use std::fmt;

const CRLF: &str = "\r\n";

/// One content line: `NAME[;PARAM...]:VALUE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    params: Vec<String>,
    value: String,
}

impl Property {
    /// A property whose value is written verbatim.
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Property {
            name: name.to_string(),
            params: Vec::new(),
            value: value.into(),
        }
    }

    /// A TEXT property; the value is escaped per RFC 5545 section 3.3.11.
    pub fn text(name: &str, value: &str) -> Self {
        Property::new(name, escape_text(value))
    }

    /// Append a raw parameter such as `VALUE=DATE`.
    pub fn param(mut self, param: &str) -> Self {
        self.params.push(param.to_string());
        self
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for param in &self.params {
            write!(f, ";{}", param)?;
        }
        write!(f, ":{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Property(Property),
    Component(Component),
}

/// A `BEGIN:<NAME>` ... `END:<NAME>` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    entries: Vec<Entry>,
}

impl Component {
    pub fn new(name: &str) -> Self {
        Component {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn property(&mut self, property: Property) -> &mut Self {
        self.entries.push(Entry::Property(property));
        self
    }

    /// Shorthand for a verbatim `name:value` property.
    pub fn add(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.property(Property::new(name, value))
    }

    pub fn component(&mut self, component: Component) -> &mut Self {
        self.entries.push(Entry::Component(component));
        self
    }

    /// Serialize into `out`, every line CRLF-terminated.
    pub fn write_to(&self, out: &mut String) {
        out.push_str("BEGIN:");
        out.push_str(&self.name);
        out.push_str(CRLF);

        for entry in &self.entries {
            match entry {
                Entry::Property(property) => {
                    out.push_str(&property.to_string());
                    out.push_str(CRLF);
                }
                Entry::Component(component) => component.write_to(out),
            }
        }

        out.push_str("END:");
        out.push_str(&self.name);
        out.push_str(CRLF);
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

/// Escape a TEXT value: backslash, semicolon, comma and line breaks.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                escaped.push_str("\\n");
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_preserves_entry_order() {
        let mut alarm = Component::new("VALARM");
        alarm.add("TRIGGER", "-P1D").add("ACTION", "DISPLAY");

        let mut event = Component::new("VEVENT");
        event
            .add("UID", "1@test")
            .property(Property::new("DTSTART", "20250310").param("VALUE=DATE"))
            .component(alarm);

        assert_eq!(
            event.to_string(),
            "BEGIN:VEVENT\r\n\
             UID:1@test\r\n\
             DTSTART;VALUE=DATE:20250310\r\n\
             BEGIN:VALARM\r\n\
             TRIGGER:-P1D\r\n\
             ACTION:DISPLAY\r\n\
             END:VALARM\r\n\
             END:VEVENT\r\n"
        );
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("plain"), "plain");
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\r\nline2\nline3"), "line1\\nline2\\nline3");
    }

    #[test]
    fn test_text_property_cannot_inject_lines() {
        let mut event = Component::new("VEVENT");
        event.property(Property::text("SUMMARY", "x\nEND:VEVENT"));

        let out = event.to_string();
        assert_eq!(out.matches("END:VEVENT").count(), 2);
        assert_eq!(out.lines().filter(|l| *l == "END:VEVENT").count(), 1);
    }
}
