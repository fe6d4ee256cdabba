// LogChain - core/format.rs
//
// Record -> text line rendering. Pure; no I/O.
//
// Layout (prefixed text):
//   [<timestamp>] <LEVEL> <prefix>: <message> key=value key=value
//
// The prefix segment is omitted when the record has no `prefix` field.
// Remaining fields are written in key order, so output is deterministic
// for a given record.

use crate::core::model::{Record, Value};
use crate::util::constants;
use std::fmt::Write;

/// Renders a record into one line of text (without trailing newline).
pub trait Formatter: Send + Sync {
    fn format(&self, record: &Record) -> String;
}

/// Plain-text formatter with a leading timestamp and component tag.
#[derive(Debug, Clone)]
pub struct TextFormatter {
    /// chrono strftime layout for the timestamp.
    pub timestamp_format: String,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            timestamp_format: constants::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl TextFormatter {
    pub fn with_timestamp_format(format: impl Into<String>) -> Self {
        Self {
            timestamp_format: format.into(),
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &Record) -> String {
        let mut out = String::with_capacity(96);

        // An invalid strftime layout surfaces as fmt::Error through `write!`.
        let mut stamp = String::new();
        if write!(stamp, "{}", record.time.format(&self.timestamp_format)).is_err() {
            stamp = record.time.to_rfc3339();
        }
        out.push('[');
        out.push_str(&stamp);
        out.push_str("] ");
        out.push_str(record.severity.short_label());

        if let Some(prefix) = record.prefix() {
            out.push(' ');
            out.push_str(prefix);
            out.push(':');
        }

        if !record.message.is_empty() {
            out.push(' ');
            out.push_str(&record.message);
        }

        for (key, value) in &record.fields {
            if key == constants::PREFIX_KEY {
                continue;
            }
            out.push(' ');
            out.push_str(key);
            out.push('=');
            push_value(&mut out, value);
        }

        out
    }
}

fn push_value(out: &mut String, value: &Value) {
    let text = value.to_string();
    if needs_quoting(&text) {
        let _ = write!(out, "{text:?}");
    } else {
        out.push_str(&text);
    }
}

/// Bare values are limited to characters that cannot be confused with the
/// key=value layout.
fn needs_quoting(text: &str) -> bool {
    text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '/' | '@' | '^' | '+'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Fields, Severity};
    use chrono::{Local, TimeZone};

    fn make_record(severity: Severity, message: &str, fields: &[(&str, Value)]) -> Record {
        let fields: Fields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        Record {
            time: Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap(),
            severity,
            message: message.to_string(),
            fields,
        }
    }

    #[test]
    fn test_prefixed_layout() {
        let record = make_record(
            Severity::Warn,
            "timeout",
            &[
                ("prefix", Value::from("net")),
                ("peer", Value::from("10.0.0.1")),
            ],
        );
        assert_eq!(
            TextFormatter::default().format(&record),
            "[07/03|14:05:09]  WARN net: timeout peer=10.0.0.1"
        );
    }

    #[test]
    fn test_no_prefix_segment_without_module() {
        let record = make_record(Severity::Info, "ready", &[]);
        assert_eq!(
            TextFormatter::default().format(&record),
            "[07/03|14:05:09]  INFO ready"
        );
    }

    #[test]
    fn test_fields_sorted_and_quoted() {
        let record = make_record(
            Severity::Error,
            "write failed",
            &[
                ("zeta", Value::from(3)),
                ("error", Value::Error("disk full".to_string())),
                ("alpha", Value::from("")),
            ],
        );
        let line = TextFormatter::default().format(&record);
        assert!(
            line.ends_with(r#"write failed alpha="" error="disk full" zeta=3"#),
            "unexpected line: {line}"
        );
    }

    #[test]
    fn test_custom_timestamp_format() {
        let record = make_record(Severity::Debug, "x", &[]);
        let line = TextFormatter::with_timestamp_format("%Y-%m-%d").format(&record);
        assert_eq!(line, "[2024-03-07] DEBUG x");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let record = make_record(
            Severity::Info,
            "same",
            &[("b", Value::from(2)), ("a", Value::from(1))],
        );
        let f = TextFormatter::default();
        assert_eq!(f.format(&record), f.format(&record));
    }
}
