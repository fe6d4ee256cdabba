// LogChain - app/logger.rs
//
// The Logger is the configuration object every Entry points at: minimum
// severity, active sink, formatter, caller resolver, and fatal exit
// handler. The process-wide default lives in `app::facade`; any number of
// independent Loggers can be built for tests or embedding.
//
// State is an immutable snapshot behind an `ArcSwap`. Every log call
// loads one snapshot and uses it throughout, so a concurrent `set_level`
// or `set_file` is observed either entirely or not at all. Writers
// replace the whole snapshot via `rcu`.

use crate::app::entry::Entry;
use crate::app::params::{LogParams, Output};
use crate::core::caller::{CallerResolver, StackResolver};
use crate::core::format::{Formatter, TextFormatter};
use crate::core::model::{Fields, LevelSetting, Record, Severity, Value};
use crate::platform::sink::{DiscardSink, FileSink, Sink, StderrSink, TracingSink};
use crate::util::constants;
use arc_swap::ArcSwap;
use chrono::Local;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Called with the exit status after a fatal record has been written.
pub type ExitHandler = Arc<dyn Fn(i32) + Send + Sync>;

/// One consistent view of the configuration.
#[derive(Clone)]
struct LoggerState {
    min_severity: Severity,
    sink: Arc<dyn Sink>,
    formatter: Arc<dyn Formatter>,
    resolver: Arc<dyn CallerResolver>,
    exit: ExitHandler,
}

/// Severity filter plus output configuration shared by all Entries built
/// from it.
pub struct Logger {
    state: ArcSwap<LoggerState>,
    params_applied: AtomicBool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.load();
        f.debug_struct("Logger")
            .field("min_severity", &state.min_severity)
            .field("sink", &state.sink.describe())
            .field("params_applied", &self.params_applied())
            .finish()
    }
}

impl Logger {
    /// Level `info`, output to stderr, text formatting, stack-based caller
    /// resolution, and `std::process::exit` after fatal records.
    pub fn new() -> Self {
        Self {
            state: ArcSwap::from_pointee(LoggerState {
                min_severity: Severity::Info,
                sink: Arc::new(StderrSink),
                formatter: Arc::new(TextFormatter::default()),
                resolver: Arc::new(StackResolver),
                exit: Arc::new(|code: i32| {
                    std::process::exit(code);
                }),
            }),
            params_applied: AtomicBool::new(false),
        }
    }

    // -------------------------------------------------------------------------
    // Construction helpers
    // -------------------------------------------------------------------------

    pub fn with_sink(self, sink: Arc<dyn Sink>) -> Self {
        self.set_sink(sink);
        self
    }

    pub fn with_formatter(self, formatter: Arc<dyn Formatter>) -> Self {
        self.set_formatter(formatter);
        self
    }

    pub fn with_resolver(self, resolver: Arc<dyn CallerResolver>) -> Self {
        self.update(|s| s.resolver = Arc::clone(&resolver));
        self
    }

    pub fn with_exit_handler(self, exit: ExitHandler) -> Self {
        self.set_exit_handler(exit);
        self
    }

    // -------------------------------------------------------------------------
    // Entry points
    // -------------------------------------------------------------------------

    /// Entry with no fields.
    pub fn entry(self: &Arc<Self>) -> Entry {
        Entry::new(Arc::clone(self))
    }

    /// Entry seeded with the component tag `name`.
    pub fn module(self: &Arc<Self>, name: &str) -> Entry {
        self.entry().with_field(constants::PREFIX_KEY, name)
    }

    // -------------------------------------------------------------------------
    // Configuration updates
    // -------------------------------------------------------------------------

    /// Apply a level name.
    ///
    /// `no` installs the discard sink. An unknown name leaves the level
    /// unchanged and is reported as a warning record.
    pub fn set_level(self: &Arc<Self>, name: &str) {
        match name.parse::<LevelSetting>() {
            Ok(LevelSetting::Off) => self.set_sink(Arc::new(DiscardSink)),
            Ok(LevelSetting::AtLeast(severity)) => {
                self.update(|s| s.min_severity = severity);
            }
            Err(e) => {
                self.entry().with_field("level", name).warn(&e);
            }
        }
    }

    /// Redirect output to `path`, opened for append and created if absent.
    ///
    /// On failure the previous sink stays active and an info record
    /// describes the fallback. The previous sink is not flushed or closed.
    pub fn set_file(self: &Arc<Self>, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match FileSink::open_append(path) {
            Ok(sink) => self.set_sink(Arc::new(sink)),
            Err(e) => {
                let previous = self.sink_description();
                self.module(constants::SELF_MODULE)
                    .with_error(&e)
                    .with_field("path", path)
                    .infof(format_args!("Failed to log to file, using {previous}"));
            }
        }
    }

    pub fn set_sink(&self, sink: Arc<dyn Sink>) {
        self.update(|s| s.sink = Arc::clone(&sink));
    }

    pub fn set_formatter(&self, formatter: Arc<dyn Formatter>) {
        self.update(|s| s.formatter = Arc::clone(&formatter));
    }

    pub fn set_exit_handler(&self, exit: ExitHandler) {
        self.update(|s| s.exit = Arc::clone(&exit));
    }

    /// Apply externally parsed parameters. Takes effect at most once per
    /// Logger; later calls return `false` and change nothing.
    pub fn apply_params(self: &Arc<Self>, params: &LogParams) -> bool {
        if self
            .params_applied
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return false;
        }

        if let Some(format) = params.timestamp_format.as_deref() {
            self.set_formatter(Arc::new(TextFormatter::with_timestamp_format(format)));
        }

        let file = params.file.as_deref().filter(|p| !p.as_os_str().is_empty());
        match file {
            Some(path) => self.set_file(path),
            None if params.output == Output::Tracing => self.set_sink(Arc::new(TracingSink)),
            None => {}
        }
        self.set_level(&params.level);

        let shown_path = file.map(|p| p.display().to_string()).unwrap_or_default();
        self.module(constants::SELF_MODULE)
            .with_field("path", shown_path)
            .info("Set log file");
        self.module(constants::SELF_MODULE)
            .with_field("level", params.level.as_str())
            .info("Set log level");
        true
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current minimum severity.
    pub fn level(&self) -> Severity {
        self.state.load().min_severity
    }

    /// True after `set_level("no")` until another sink is installed.
    pub fn is_disabled(&self) -> bool {
        self.state.load().sink.is_discard()
    }

    /// Whether a record at `severity` would reach the sink.
    pub fn enabled(&self, severity: Severity) -> bool {
        let state = self.state.load();
        severity >= state.min_severity && !state.sink.is_discard()
    }

    pub fn sink_description(&self) -> String {
        self.state.load().sink.describe()
    }

    pub fn params_applied(&self) -> bool {
        self.params_applied.load(Ordering::Acquire)
    }

    // -------------------------------------------------------------------------
    // Dispatch
    // -------------------------------------------------------------------------

    /// Filter, attach the caller frame for error/fatal, and write.
    ///
    /// Fatal records bypass the filter and the discard shortcut, and always
    /// end with the exit handler.
    #[track_caller]
    pub(crate) fn dispatch(&self, fields: &Fields, severity: Severity, message: String) {
        let state = self.state.load_full();
        let fatal = severity == Severity::Fatal;

        if !fatal && (severity < state.min_severity || state.sink.is_discard()) {
            return;
        }

        let mut fields = fields.clone();
        if severity.captures_caller() {
            attach_caller(&mut fields, state.resolver.as_ref(), Location::caller());
        }

        let record = Record {
            time: Local::now(),
            severity,
            message,
            fields,
        };
        state.sink.emit(&record, state.formatter.as_ref());

        if fatal {
            state.sink.flush();
            (state.exit)(constants::FATAL_EXIT_CODE);
        }
    }

    fn update(&self, mut change: impl FnMut(&mut LoggerState)) {
        self.state.rcu(|current| {
            let mut next = LoggerState::clone(current);
            change(&mut next);
            next
        });
    }
}

fn attach_caller(
    fields: &mut Fields,
    resolver: &dyn CallerResolver,
    location: &'static Location<'static>,
) {
    match resolver.resolve(location) {
        Some(frame) => {
            fields.insert(constants::FILE_KEY.to_string(), Value::Str(frame.file));
            fields.insert(constants::LINE_KEY.to_string(), Value::from(frame.line));
            if let Some(func) = frame.func {
                fields.insert(constants::FUNC_KEY.to_string(), Value::Str(func));
            }
        }
        None => {
            fields.insert(
                constants::FILE_KEY.to_string(),
                Value::from(constants::UNKNOWN_FILE),
            );
        }
    }
}
