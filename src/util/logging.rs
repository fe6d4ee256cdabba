// LogChain - util/logging.rs
//
// `tracing` subscriber setup for the tracing output.
//
// When records are routed through `TracingSink`, something has to
// subscribe to them. Applications that already install their own
// subscriber skip this; the `logchain` binary calls it when config.toml
// selects `output = "tracing"`.
//
// Priority: RUST_LOG env var > requested level > default "info".

use tracing_subscriber::EnvFilter;

/// Install a compact fmt subscriber on stderr.
///
/// `level` is a tracing filter directive (e.g. "debug"). Returns `false`
/// if a global subscriber was already installed.
pub fn init(level: Option<&str>) -> bool {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level.unwrap_or(super::constants::DEFAULT_LEVEL))
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(
            app = super::constants::APP_NAME,
            version = super::constants::APP_VERSION,
            "Tracing output initialised"
        );
    }
    installed
}

/// Map a facade level name to a tracing filter directive. `fatal` has no
/// tracing counterpart and maps to `error`; `no` maps to `off`.
pub fn tracing_directive(level: &str) -> &'static str {
    match level.to_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" | "fatal" | "panic" => "error",
        "no" => "off",
        _ => "info",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_directive_mapping() {
        assert_eq!(tracing_directive("fatal"), "error");
        assert_eq!(tracing_directive("no"), "off");
        assert_eq!(tracing_directive("WARN"), "warn");
        assert_eq!(tracing_directive("bogus"), "info");
    }
}
