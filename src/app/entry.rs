// LogChain - app/entry.rs
//
// Immutable chain of log context.
//
// Every `with_*` call returns a new Entry; the receiver is never touched.
// Fields live behind an `Arc` and are cloned on the first write of a
// child (copy-on-write), so siblings built from the same parent share
// nothing mutable and can be used from different threads freely.

use crate::app::logger::Logger;
use crate::core::model::{Fields, Severity, Value};
use crate::util::constants;
use std::fmt;
use std::sync::Arc;

/// Accumulated context plus the Logger it will be written through.
#[derive(Clone)]
pub struct Entry {
    fields: Arc<Fields>,
    logger: Arc<Logger>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry").field("fields", &self.fields).finish()
    }
}

impl Entry {
    pub(crate) fn new(logger: Arc<Logger>) -> Self {
        Self {
            fields: Arc::new(Fields::new()),
            logger,
        }
    }

    /// The context this Entry will attach to every record.
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    // -------------------------------------------------------------------------
    // Context
    // -------------------------------------------------------------------------

    /// New Entry with `key` set to `value` (replacing any earlier value).
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry {
        self.derive(|fields| {
            fields.insert(key.into(), value.into());
        })
    }

    /// New Entry with every pair added, later pairs winning on duplicates.
    pub fn with_fields<I, K, V>(&self, pairs: I) -> Entry
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.derive(|fields| {
            for (k, v) in pairs {
                fields.insert(k.into(), v.into());
            }
        })
    }

    /// New Entry with the error's message under `error`.
    pub fn with_error<E>(&self, err: &E) -> Entry
    where
        E: std::error::Error + ?Sized,
    {
        self.with_field(constants::ERROR_KEY, Value::Error(err.to_string()))
    }

    /// New Entry annotated with `msg` under `error`.
    pub fn with_message(&self, msg: impl Into<String>) -> Entry {
        self.with_field(constants::ERROR_KEY, Value::Error(msg.into()))
    }

    /// Formatted variant of [`with_message`](Self::with_message).
    pub fn with_messagef(&self, args: fmt::Arguments<'_>) -> Entry {
        self.with_message(args.to_string())
    }

    fn derive(&self, change: impl FnOnce(&mut Fields)) -> Entry {
        let mut fields = Arc::clone(&self.fields);
        change(Arc::make_mut(&mut fields));
        Entry {
            fields,
            logger: Arc::clone(&self.logger),
        }
    }

    // -------------------------------------------------------------------------
    // Emission
    // -------------------------------------------------------------------------
    //
    // Two shapes per severity: `info(msg)` takes any `Display` (wrap several
    // values in `Concat` to join them), `infof(format_args!(..))` is
    // printf-style. `log` takes the severity as an argument instead.

    /// Emit at a severity chosen at run time, overriding the method name.
    #[track_caller]
    pub fn log(&self, severity: Severity, msg: impl fmt::Display) {
        self.logger
            .dispatch(&self.fields, severity, msg.to_string());
    }

    #[track_caller]
    pub fn trace(&self, msg: impl fmt::Display) {
        self.log(Severity::Trace, msg);
    }

    #[track_caller]
    pub fn tracef(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Trace, args);
    }

    #[track_caller]
    pub fn debug(&self, msg: impl fmt::Display) {
        self.log(Severity::Debug, msg);
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Debug, args);
    }

    #[track_caller]
    pub fn info(&self, msg: impl fmt::Display) {
        self.log(Severity::Info, msg);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Info, args);
    }

    #[track_caller]
    pub fn warn(&self, msg: impl fmt::Display) {
        self.log(Severity::Warn, msg);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Warn, args);
    }

    /// Emit at error, with the caller frame attached.
    #[track_caller]
    pub fn error(&self, msg: impl fmt::Display) {
        self.log(Severity::Error, msg);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Error, args);
    }

    /// Emit at fatal, then run the Logger's exit handler (by default the
    /// process exits with status 1). Applies even when output is off.
    #[track_caller]
    pub fn fatal(&self, msg: impl fmt::Display) {
        self.log(Severity::Fatal, msg);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.log(Severity::Fatal, args);
    }
}

/// Writes each part in order with no separator.
///
/// `entry.info(Concat(&[&"retry ", &attempt, &"/", &max]))`
#[derive(Clone, Copy)]
pub struct Concat<'a>(pub &'a [&'a dyn fmt::Display]);

impl fmt::Display for Concat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in self.0 {
            part.fmt(f)?;
        }
        Ok(())
    }
}
