// LogChain - lib.rs
//
// Structured logging facade: leveled records with key/value context,
// built through immutable Entry chains and written to a single sink.
//
//   logchain::module("net").with_field("peer", "10.0.0.1").warn("timeout");
//
// The package-level functions below forward to the process-wide default
// Logger (`app::facade::global`).

pub mod app;
pub mod core;
pub mod platform;
pub mod util;

pub use crate::app::entry::{Concat, Entry};
pub use crate::app::facade::{
    apply_params, debug, debugf, entry, error, errorf, fatal, fatalf, global, info, infof, log,
    module, set_file, set_level, trace, tracef, warn, warnf, with_error, with_field, with_fields,
    with_message, with_messagef,
};
pub use crate::app::logger::{ExitHandler, Logger};
pub use crate::app::params::{LogParams, Output, PartialParams};
pub use crate::core::caller::{CallerFrame, CallerResolver, NoCallerInfo, StackResolver};
pub use crate::core::format::{Formatter, TextFormatter};
pub use crate::core::model::{Fields, LevelSetting, Record, Severity, Value};
pub use crate::platform::sink::{DiscardSink, FileSink, MemorySink, Sink, StderrSink, TracingSink};
