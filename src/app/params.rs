// LogChain - app/params.rs
//
// The configuration update signal: what an external flag parser or config
// loader hands to `Logger::apply_params`.

use crate::util::constants;
use std::path::PathBuf;

/// Where output goes when no log file is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Output {
    #[default]
    Stderr,
    /// Forward records to the installed `tracing` subscriber.
    Tracing,
}

/// Logging parameters from the command line or config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogParams {
    /// Level name: trace, debug, info, warn, error, fatal, or `no`.
    pub level: String,

    /// Append log output to this file. `None` or empty keeps stderr.
    pub file: Option<PathBuf>,

    /// Override for the timestamp layout of the text formatter.
    pub timestamp_format: Option<String>,

    pub output: Output,
}

impl Default for LogParams {
    fn default() -> Self {
        Self {
            level: constants::DEFAULT_LEVEL.to_string(),
            file: None,
            timestamp_format: None,
            output: Output::Stderr,
        }
    }
}

impl LogParams {
    /// Layer `other` on top of `self`: fields `other` sets explicitly win.
    pub fn overridden_by(mut self, other: PartialParams) -> Self {
        if let Some(level) = other.level {
            self.level = level;
        }
        if other.file.is_some() {
            self.file = other.file;
        }
        if other.timestamp_format.is_some() {
            self.timestamp_format = other.timestamp_format;
        }
        if let Some(output) = other.output {
            self.output = output;
        }
        self
    }
}

/// Parameters where every field is optional, e.g. only the flags the user
/// actually passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialParams {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
    pub timestamp_format: Option<String>,
    pub output: Option<Output>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stderr_info() {
        let params = LogParams::default();
        assert_eq!(params.level, "info");
        assert_eq!(params.file, None);
        assert_eq!(params.output, Output::Stderr);
    }

    #[test]
    fn test_override_only_replaces_set_fields() {
        let base = LogParams {
            level: "debug".to_string(),
            file: Some(PathBuf::from("a.log")),
            timestamp_format: Some("%H".to_string()),
            output: Output::Stderr,
        };
        let merged = base.overridden_by(PartialParams {
            level: Some("warn".to_string()),
            ..PartialParams::default()
        });
        assert_eq!(merged.level, "warn");
        assert_eq!(merged.file, Some(PathBuf::from("a.log")));
        assert_eq!(merged.timestamp_format.as_deref(), Some("%H"));
    }
}
