// LogChain - util/constants.rs
//
// Single source of truth for reserved field keys, defaults, and limits.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LogChain";

/// Application identifier used for config directories.
pub const APP_ID: &str = "logchain";

/// Current crate version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Reserved field keys
// =============================================================================

/// Field carrying the component tag seeded by `module()`.
pub const PREFIX_KEY: &str = "prefix";

/// Field carrying an attached error or error-shaped annotation.
pub const ERROR_KEY: &str = "error";

/// Caller frame: base name of the source file.
pub const FILE_KEY: &str = "file";

/// Caller frame: line number.
pub const LINE_KEY: &str = "line";

/// Caller frame: fully-qualified function name.
pub const FUNC_KEY: &str = "func";

/// Placeholder written under `file` when the call site cannot be resolved.
pub const UNKNOWN_FILE: &str = "<???>";

/// Module name used for the facade's own diagnostic records.
pub const SELF_MODULE: &str = "logger";

// =============================================================================
// Level names
// =============================================================================

/// Level name that switches all output off.
pub const LEVEL_OFF: &str = "no";

/// Severity applied when nothing else is configured.
pub const DEFAULT_LEVEL: &str = "info";

/// Every accepted `--log` value, in ascending severity, sentinel last.
pub const LEVEL_NAMES: &[&str] = &["trace", "debug", "info", "warn", "error", "fatal", "no"];

// =============================================================================
// Rendering
// =============================================================================

/// chrono layout for the record timestamp: day/month|hour:minute:second.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m|%H:%M:%S";

/// Longest accepted `[logging] timestamp_format` in config.toml.
pub const MAX_TIMESTAMP_FORMAT_LEN: usize = 64;

// =============================================================================
// Process lifecycle
// =============================================================================

/// Exit status used after a fatal record has been written.
pub const FATAL_EXIT_CODE: i32 = 1;

// =============================================================================
// Configuration
// =============================================================================

/// File name of the optional configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Config files larger than this are rejected instead of parsed.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB
