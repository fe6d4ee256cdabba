// LogChain - core/caller.rs
//
// Caller resolution for error and fatal records.
//
// Every public level method, and the dispatch helper behind them, is
// `#[track_caller]`, so `Location::caller()` inside dispatch is the
// application's call site whichever shape was used (package-level
// function, `Entry` method, or macro). File and line come from that
// location; the function name is recovered from a resolved backtrace.

use std::panic::Location;

/// Resolved application call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerFrame {
    /// Base name of the source file (no directories).
    pub file: String,
    pub line: u32,
    /// Fully-qualified function path, when symbols are available.
    pub func: Option<String>,
}

/// Turns a tracked call-site location into a caller frame.
///
/// Returning `None` is not an error: the record is still emitted, with
/// the unknown-file marker in place of the frame.
pub trait CallerResolver: Send + Sync {
    fn resolve(&self, location: &'static Location<'static>) -> Option<CallerFrame>;
}

/// Default resolver: location for file/line, the `backtrace` crate for the
/// function name.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackResolver;

impl CallerResolver for StackResolver {
    fn resolve(&self, location: &'static Location<'static>) -> Option<CallerFrame> {
        let path = location.file();
        if path.is_empty() {
            return None;
        }

        Some(CallerFrame {
            file: base_name(path).to_string(),
            line: location.line(),
            func: function_at(&capture_symbols(), path, location.line()),
        })
    }
}

/// Resolver that never finds a frame. Useful when stack introspection is
/// unwanted; records carry the unknown-file marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCallerInfo;

impl CallerResolver for NoCallerInfo {
    fn resolve(&self, _location: &'static Location<'static>) -> Option<CallerFrame> {
        None
    }
}

/// Strip directories, accepting either separator.
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// =============================================================================
// Stack inspection
// =============================================================================

/// One resolved symbol, innermost frame first. Inlined calls contribute
/// several symbols to the same frame.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FrameSymbol {
    /// Demangled name without the trailing hash.
    name: String,
    file: Option<String>,
    line: Option<u32>,
}

fn capture_symbols() -> Vec<FrameSymbol> {
    let trace = backtrace::Backtrace::new();
    trace
        .frames()
        .iter()
        .flat_map(|frame| frame.symbols())
        .filter_map(|symbol| {
            let name = symbol.name()?;
            Some(FrameSymbol {
                name: format!("{name:#}"),
                file: symbol
                    .filename()
                    .map(|p| p.to_string_lossy().into_owned()),
                line: symbol.lineno(),
            })
        })
        .collect()
}

/// Pick the function that owns `file:line`.
///
/// Preference order: a symbol on the exact line, then the first symbol in
/// the same file (the call may span several lines), then the first symbol
/// outside the runtime and this library. The last case covers builds
/// without line tables, where symbols carry names only.
fn function_at(symbols: &[FrameSymbol], file: &str, line: u32) -> Option<String> {
    let mut same_file: Option<&FrameSymbol> = None;
    let mut first_outside: Option<&FrameSymbol> = None;

    for symbol in symbols {
        if let (Some(frame_file), Some(frame_line)) = (symbol.file.as_deref(), symbol.line) {
            if same_source(frame_file, file) {
                if frame_line == line {
                    return Some(symbol.name.clone());
                }
                same_file.get_or_insert(symbol);
            }
        }
        if first_outside.is_none() && !is_internal(&symbol.name) {
            first_outside = Some(symbol);
        }
    }

    same_file.or(first_outside).map(|s| s.name.clone())
}

fn same_source(frame_file: &str, tracked: &str) -> bool {
    let frame = frame_file.replace('\\', "/");
    let tracked = tracked.replace('\\', "/");
    frame == tracked || frame.ends_with(&format!("/{tracked}"))
}

/// Runtime, capture machinery, or this library's own emit path.
fn is_internal(name: &str) -> bool {
    const RUNTIME: [&str; 5] = ["std::", "core::", "alloc::", "backtrace::", "__rust"];
    const LIBRARY: [&str; 4] = ["core::", "app::", "platform::", "util::"];

    let name = name.trim_start_matches(['<', '&']);
    if RUNTIME.iter().any(|p| name.starts_with(p)) {
        return true;
    }
    let Some(rest) = name
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .and_then(|r| r.strip_prefix("::"))
    else {
        return false;
    };
    LIBRARY.iter().any(|p| rest.starts_with(p)) && !rest.contains("::tests::")
}
