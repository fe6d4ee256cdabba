// LogChain - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no global
// state. These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::LevelParseError;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Severity
// =============================================================================

/// Severity of a record, ordered from least to most severe.
///
/// The derived `Ord` is the filter order: a record passes when its
/// severity is `>=` the configured minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl Severity {
    /// Returns all variants in ascending order.
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Trace,
            Severity::Debug,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ]
    }

    /// Lower-case name, as accepted by `set_level`.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }

    /// Fixed-width upper-case label used in rendered lines.
    pub fn short_label(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => " INFO",
            Severity::Warn => " WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    /// Whether records at this severity carry the caller frame.
    pub fn captures_caller(&self) -> bool {
        *self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = LevelParseError;

    /// Case-insensitive. `warning` and `panic` are accepted as aliases of
    /// `warn` and `fatal`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" | "panic" => Ok(Severity::Fatal),
            _ => Err(LevelParseError {
                input: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Level setting (severity or the "no" sentinel)
// =============================================================================

/// Parsed form of a `--log` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelSetting {
    /// `no`: every record is discarded.
    Off,
    /// Records below this severity are dropped.
    AtLeast(Severity),
}

impl FromStr for LevelSetting {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == constants::LEVEL_OFF {
            return Ok(LevelSetting::Off);
        }
        s.parse().map(LevelSetting::AtLeast)
    }
}

// =============================================================================
// Field values
// =============================================================================

/// Ordered map of context fields. Keys are case-sensitive; inserting an
/// existing key replaces its value.
pub type Fields = BTreeMap<String, Value>;

/// A field value. Closed set of shapes so rendering never needs reflection.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    /// Textual message of an error.
    Error(String),
    /// Nested key/value group.
    Map(Fields),
}

impl Value {
    /// Borrow the text of string-shaped values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) | Value::Error(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) | Value::Error(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Map(map) => {
                f.write_str("map[")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Str(v.clone())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<Fields> for Value {
    fn from(v: Fields) -> Self {
        Value::Map(v)
    }
}

macro_rules! value_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! value_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::UInt(u64::from(v))
            }
        })*
    };
}

value_from_signed!(i8, i16, i32, i64);
value_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        Value::Int(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<std::net::IpAddr> for Value {
    fn from(v: std::net::IpAddr) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<std::net::SocketAddr> for Value {
    fn from(v: std::net::SocketAddr) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<&std::path::Path> for Value {
    fn from(v: &std::path::Path) -> Self {
        Value::Str(v.display().to_string())
    }
}

// =============================================================================
// Record (what a sink receives)
// =============================================================================

/// A finished log event: the Entry's fields at emission time, plus the
/// caller frame for error and fatal records.
#[derive(Debug, Clone)]
pub struct Record {
    /// Local wall-clock time of emission.
    pub time: DateTime<Local>,

    pub severity: Severity,

    /// Fully formatted message text.
    pub message: String,

    pub fields: Fields,
}

impl Record {
    /// Component tag seeded by `module()`, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.fields
            .get(constants::PREFIX_KEY)
            .and_then(Value::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
