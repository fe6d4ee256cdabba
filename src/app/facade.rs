// LogChain - app/facade.rs
//
// Package-level entry points backed by a process-wide default Logger.
//
// The default is created lazily with `Logger::new()` settings (info,
// stderr) and lives for the rest of the process. Code that wants an
// isolated configuration builds its own `Arc<Logger>` instead; every
// function here is a thin forward to the same method on `global()`.

use crate::app::entry::Entry;
use crate::app::logger::Logger;
use crate::app::params::LogParams;
use crate::core::model::{Severity, Value};
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static GLOBAL: OnceLock<Arc<Logger>> = OnceLock::new();

/// The process-wide default Logger.
pub fn global() -> &'static Arc<Logger> {
    GLOBAL.get_or_init(|| Arc::new(Logger::new()))
}

// =============================================================================
// Configuration
// =============================================================================

pub fn set_level(name: &str) {
    global().set_level(name);
}

pub fn set_file(path: impl AsRef<Path>) {
    global().set_file(path);
}

/// Apply parameters to the default Logger, at most once per process.
pub fn apply_params(params: &LogParams) -> bool {
    global().apply_params(params)
}

// =============================================================================
// Context
// =============================================================================

pub fn entry() -> Entry {
    global().entry()
}

pub fn module(name: &str) -> Entry {
    global().module(name)
}

pub fn with_field(key: impl Into<String>, value: impl Into<Value>) -> Entry {
    entry().with_field(key, value)
}

pub fn with_fields<I, K, V>(pairs: I) -> Entry
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    entry().with_fields(pairs)
}

pub fn with_error<E>(err: &E) -> Entry
where
    E: std::error::Error + ?Sized,
{
    entry().with_error(err)
}

pub fn with_message(msg: impl Into<String>) -> Entry {
    entry().with_message(msg)
}

pub fn with_messagef(args: fmt::Arguments<'_>) -> Entry {
    entry().with_messagef(args)
}

// =============================================================================
// Emission
// =============================================================================

#[track_caller]
pub fn log(severity: Severity, msg: impl fmt::Display) {
    global().dispatch(&Default::default(), severity, msg.to_string());
}

#[track_caller]
pub fn trace(msg: impl fmt::Display) {
    log(Severity::Trace, msg);
}

#[track_caller]
pub fn tracef(args: fmt::Arguments<'_>) {
    log(Severity::Trace, args);
}

#[track_caller]
pub fn debug(msg: impl fmt::Display) {
    log(Severity::Debug, msg);
}

#[track_caller]
pub fn debugf(args: fmt::Arguments<'_>) {
    log(Severity::Debug, args);
}

#[track_caller]
pub fn info(msg: impl fmt::Display) {
    log(Severity::Info, msg);
}

#[track_caller]
pub fn infof(args: fmt::Arguments<'_>) {
    log(Severity::Info, args);
}

#[track_caller]
pub fn warn(msg: impl fmt::Display) {
    log(Severity::Warn, msg);
}

#[track_caller]
pub fn warnf(args: fmt::Arguments<'_>) {
    log(Severity::Warn, args);
}

#[track_caller]
pub fn error(msg: impl fmt::Display) {
    log(Severity::Error, msg);
}

#[track_caller]
pub fn errorf(args: fmt::Arguments<'_>) {
    log(Severity::Error, args);
}

#[track_caller]
pub fn fatal(msg: impl fmt::Display) {
    log(Severity::Fatal, msg);
}

#[track_caller]
pub fn fatalf(args: fmt::Arguments<'_>) {
    log(Severity::Fatal, args);
}
