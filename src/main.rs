// LogChain - main.rs
//
// Command-line emitter. Handles:
// 1. CLI argument parsing (`--log`, `--log-file`, and the record to write)
// 2. config.toml loading, with CLI flags taking priority
// 3. One-time parameter application on the default Logger
// 4. Writing a single record through the facade
//
// `fatal` records exit with status 1 after being written.

use clap::Parser;
use logchain::util::{constants, logging};
use logchain::{LogParams, Output, PartialParams, Severity};
use std::path::PathBuf;

/// LogChain - write one structured log record.
///
/// Example: logchain --log-file app.log -m net -F peer=10.0.0.1 warn timeout
#[derive(Parser, Debug)]
#[command(name = "logchain", version, about)]
struct Cli {
    /// Log level [trace, debug, info, warn, error, fatal, no].
    #[arg(long = "log")]
    log: Option<String>,

    /// Log file path (defaults to stderr).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// config.toml to read (defaults to the platform config directory).
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Component tag for the record.
    #[arg(short = 'm', long = "module")]
    module: Option<String>,

    /// Context field as key=value. Repeatable; later keys win.
    #[arg(short = 'F', long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Attach an error annotation.
    #[arg(short = 'e', long = "error")]
    error: Option<String>,

    /// Severity of the record.
    severity: Severity,

    /// Message words, joined with spaces.
    message: Vec<String>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{raw}'")),
    }
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(logchain::platform::config::default_config_path);
    let (from_config, warnings) = match config_path.as_deref() {
        Some(path) => logchain::platform::config::load_config(path),
        None => (PartialParams::default(), Vec::new()),
    };

    let params = LogParams::default()
        .overridden_by(from_config)
        .overridden_by(PartialParams {
            level: cli.log.clone(),
            file: cli.log_file.clone(),
            ..PartialParams::default()
        });

    if params.output == Output::Tracing && params.file.is_none() {
        logging::init(Some(logging::tracing_directive(&params.level)));
    }

    logchain::apply_params(&params);

    let shown_config = config_path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    for warning in &warnings {
        logchain::module(constants::SELF_MODULE)
            .with_field("config", shown_config.as_str())
            .warn(warning);
    }

    let mut entry = match cli.module.as_deref() {
        Some(name) => logchain::module(name),
        None => logchain::entry(),
    };
    entry = entry.with_fields(cli.fields);
    if let Some(error) = cli.error {
        entry = entry.with_message(error);
    }

    entry.log(cli.severity, cli.message.join(" "));
}
