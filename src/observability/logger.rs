//! Structured JSON logger
//!
//! - One log line = one event
//! - `event` first, then `severity`, then fields sorted by key
//! - Values escaped by serde_json
//! - Synchronous, no buffering
//! - Always stderr: stdout carries command responses

use std::fmt;
use std::io::{self, Write};

use serde_json::Value;

use super::events::Event;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues, e.g. an ignored filter value
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: Event, fields: &[(&str, &str)]) {
        Self::log_to_writer(severity, event, fields, &mut io::stderr());
    }

    fn log_to_writer<W: Write>(
        severity: Severity,
        event: Event,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut sorted_fields = fields.to_vec();
        sorted_fields.sort_by_key(|(k, _)| *k);

        let mut line = format!(
            "{{\"event\":{},\"severity\":{}",
            json_string(event.as_str()),
            json_string(severity.as_str())
        );
        for (key, value) in sorted_fields {
            line.push_str(&format!(",{}:{}", json_string(key), json_string(value)));
        }
        line.push_str("}\n");

        // A failed log write is not an operation failure
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub fn trace(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    pub fn info(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: Event, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }
}

/// Quoted and escaped JSON string literal
fn json_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Capture logs to a buffer for testing
#[cfg(test)]
pub fn capture_log(severity: Severity, event: Event, fields: &[(&str, &str)]) -> String {
    let mut buffer = Vec::new();
    Logger::log_to_writer(severity, event, fields, &mut buffer);
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_log(Severity::Info, Event::QueryExecuted, &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "QUERY_COMPLETE");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_deterministic_ordering() {
        let output1 = capture_log(
            Severity::Warn,
            Event::QueryPredicateIgnored,
            &[("reason", "not a date"), ("field", "dateStart")],
        );
        let output2 = capture_log(
            Severity::Warn,
            Event::QueryPredicateIgnored,
            &[("field", "dateStart"), ("reason", "not a date")],
        );

        assert_eq!(output1, output2);
        assert!(output1.find("field").unwrap() < output1.find("reason").unwrap());
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture_log(
            Severity::Error,
            Event::CommandFailed,
            &[("message", "bad \"value\"\nline2")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["message"], "bad \"value\"\nline2");
    }

    #[test]
    fn test_log_control_and_non_ascii_values() {
        let output = capture_log(
            Severity::Warn,
            Event::QueryPredicateIgnored,
            &[("field", "searchTerm"), ("reason", "vehículos\u{1}\ttab")],
        );

        assert!(!output.contains('\u{1}'));
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["reason"], "vehículos\u{1}\ttab");
        assert!(output.starts_with("{\"event\":\"QUERY_PREDICATE_IGNORED\",\"severity\":\"WARN\""));
    }

    #[test]
    fn test_log_one_line() {
        let output = capture_log(Severity::Info, Event::SeedApplied, &[("inserted", "2")]);
        assert_eq!(output.matches('\n').count(), 1);
        assert!(output.ends_with('\n'));
    }
}
