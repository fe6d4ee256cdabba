// LogChain - platform/sink.rs
//
// Output sinks. A sink receives finished records and decides how to
// render and where to write them. Exactly one sink is active per Logger.
//
// Writes never propagate errors: a failed write loses that line only.

use crate::core::format::Formatter;
use crate::core::model::{Record, Severity};
use crate::util::error::SinkError;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Destination for rendered records.
pub trait Sink: Send + Sync {
    /// Render (if needed) and write one record.
    fn emit(&self, record: &Record, formatter: &dyn Formatter);

    /// Push buffered output to its destination.
    fn flush(&self) {}

    /// True for the sink installed by the `no` level.
    fn is_discard(&self) -> bool {
        false
    }

    /// Short human-readable name, e.g. `stderr` or a file path.
    fn describe(&self) -> String;
}

// =============================================================================
// stderr
// =============================================================================

/// Standard error, the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn emit(&self, record: &Record, formatter: &dyn Formatter) {
        let line = formatter.format(record);
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{line}");
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }

    fn describe(&self) -> String {
        "stderr".to_string()
    }
}

// =============================================================================
// File
// =============================================================================

/// Append-only log file. Lines from concurrent callers never interleave.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Open `path` for append, creating it if absent.
    pub fn open_append(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SinkError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }
}

impl Sink for FileSink {
    fn emit(&self, record: &Record, formatter: &dyn Formatter) {
        let mut line = formatter.format(record);
        line.push('\n');
        // A writer that panicked mid-line leaves the file usable.
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        let _ = file.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let mut file = self.file.lock().unwrap_or_else(|e| e.into_inner());
        let _ = file.flush();
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

// =============================================================================
// Discard
// =============================================================================

/// Swallows everything. Installed by `set_level("no")`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl Sink for DiscardSink {
    #[inline]
    fn emit(&self, _record: &Record, _formatter: &dyn Formatter) {}

    fn is_discard(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        "discard".to_string()
    }
}

// =============================================================================
// Memory
// =============================================================================

/// Keeps every record (and its rendered line) in memory.
///
/// Intended for tests of code that logs: install it with
/// `Logger::with_sink` and inspect what was emitted.
#[derive(Debug, Default)]
pub struct MemorySink {
    captured: Mutex<Vec<(Record, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of captured records, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.lock().iter().map(|(r, _)| r.clone()).collect()
    }

    /// Snapshot of rendered lines, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Record, String)>> {
        self.captured.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Sink for MemorySink {
    fn emit(&self, record: &Record, formatter: &dyn Formatter) {
        let line = formatter.format(record);
        self.lock().push((record.clone(), line));
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// =============================================================================
// tracing bridge
// =============================================================================

/// Forwards each record as a `tracing` event, for applications that already
/// run a `tracing` subscriber. Fatal maps to ERROR; the formatter is unused
/// because the subscriber does its own rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn emit(&self, record: &Record, _formatter: &dyn Formatter) {
        let fields = record
            .fields
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(" ");
        let module = record.prefix().unwrap_or("");
        let message = &record.message;

        match record.severity {
            Severity::Trace => tracing::trace!(module, fields = %fields, "{message}"),
            Severity::Debug => tracing::debug!(module, fields = %fields, "{message}"),
            Severity::Info => tracing::info!(module, fields = %fields, "{message}"),
            Severity::Warn => tracing::warn!(module, fields = %fields, "{message}"),
            Severity::Error | Severity::Fatal => {
                let fatal = record.severity == Severity::Fatal;
                tracing::error!(module, fatal, fields = %fields, "{message}")
            }
        }
    }

    fn describe(&self) -> String {
        "tracing".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::TextFormatter;
    use crate::core::model::{Fields, Value};
    use chrono::Local;

    fn make_record(message: &str) -> Record {
        let mut fields = Fields::new();
        fields.insert("prefix".to_string(), Value::from("disk"));
        Record {
            time: Local::now(),
            severity: Severity::Info,
            message: message.to_string(),
            fields,
        }
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let sink = FileSink::open_append(&path).unwrap();
        sink.emit(&make_record("one"), &TextFormatter::default());
        sink.emit(&make_record("two"), &TextFormatter::default());
        sink.flush();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "existing");
        assert!(lines[1].ends_with("INFO disk: one"), "{}", lines[1]);
        assert!(lines[2].ends_with("INFO disk: two"), "{}", lines[2]);
    }

    #[test]
    fn test_file_sink_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.log");
        let sink = FileSink::open_append(&path).unwrap();
        assert!(path.exists());
        assert_eq!(sink.describe(), path.display().to_string());
    }

    #[test]
    fn test_file_sink_open_failure_is_typed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("app.log");
        let err = FileSink::open_append(&path).unwrap_err();
        assert!(matches!(err, SinkError::Open { .. }));
    }

    #[test]
    fn test_memory_sink_captures_record_and_line() {
        let sink = MemorySink::new();
        sink.emit(&make_record("hello"), &TextFormatter::default());
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.records()[0].message, "hello");
        assert!(sink.lines()[0].ends_with("disk: hello"));
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_only_discard_reports_discard() {
        assert!(DiscardSink.is_discard());
        assert!(!StderrSink.is_discard());
        assert!(!MemorySink::new().is_discard());
    }
}
