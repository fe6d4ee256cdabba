// LogChain - app/macros.rs
//
// Format-string macros over the printf-style emitters.
//
//   logchain::info!("listening on {addr}");          // default Logger
//   logchain::warn!(entry: conn, "retry {n}");       // any Entry
//
// Each expands to a single `*f(format_args!(..))` call at the invocation
// site, so error/fatal records report the macro's location.

#[macro_export]
macro_rules! trace {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.tracef(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::tracef(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debug {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.debugf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::debugf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.infof(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::infof(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warn {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.warnf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::warnf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.errorf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::errorf(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! fatal {
    (entry: $entry:expr, $($arg:tt)+) => {
        $entry.fatalf(format_args!($($arg)+))
    };
    ($($arg:tt)+) => {
        $crate::app::facade::fatalf(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::app::logger::Logger;
    use crate::core::model::Severity;
    use crate::platform::sink::MemorySink;
    use std::sync::Arc;

    #[test]
    fn test_entry_form_formats_message() {
        let sink = Arc::new(MemorySink::new());
        let logger = Arc::new(Logger::new().with_sink(sink.clone()));
        let conn = logger.module("conn");
        let n = 3;

        crate::warn!(entry: conn, "retry {n} of {}", 5);
        crate::error!(entry: logger.entry(), "gave up");

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Warn);
        assert_eq!(records[0].message, "retry 3 of 5");
        assert_eq!(records[0].prefix(), Some("conn"));
        assert_eq!(records[1].field("file").and_then(|v| v.as_str()), Some("macros.rs"));
    }
}
