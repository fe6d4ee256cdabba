// LogChain - tests/cli.rs
//
// End-to-end tests for the `logchain` binary: flag handling, config.toml
// precedence, file output, and fatal termination in a real process.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

// =============================================================================
// Helpers
// =============================================================================

/// Run the binary with an isolated (absent) config file unless the caller
/// passes `--config` itself.
fn run(dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_logchain"));
    if !args.contains(&"--config") {
        cmd.arg("--config").arg(dir.join("absent.toml"));
    }
    cmd.args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn e2e_writes_record_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(
        dir.path(),
        &["-m", "net", "-F", "peer=10.0.0.1", "warn", "timeout"],
    );

    assert!(output.status.success());
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("WARN net: timeout peer=10.0.0.1"),
        "unexpected stderr: {stderr}"
    );
    assert!(stderr.contains("logger: Set log level level=info"), "{stderr}");
}

#[test]
fn e2e_log_file_flag_redirects_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("app.log");
    let output = run(
        dir.path(),
        &["--log-file", log.to_str().unwrap(), "info", "hello", "world"],
    );

    assert!(output.status.success());
    assert!(!stderr_of(&output).contains("hello world"));
    let content = fs::read_to_string(&log).unwrap();
    assert!(content.contains("INFO hello world"), "{content}");
    assert!(content.contains("Set log file"), "{content}");
}

#[test]
fn e2e_level_filter_drops_lower_records() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--log", "error", "info", "dropped"]);

    assert!(output.status.success());
    assert!(!stderr_of(&output).contains("dropped"));
}

#[test]
fn e2e_error_record_carries_caller_frame() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["-e", "disk full", "error", "write failed"]);

    let stderr = stderr_of(&output);
    assert!(stderr.contains("ERROR write failed"), "{stderr}");
    assert!(stderr.contains(r#"error="disk full""#), "{stderr}");
    assert!(stderr.contains("file=main.rs"), "{stderr}");
    assert!(stderr.contains(r#"func="logchain::main""#), "{stderr}");
    assert!(!stderr.contains("0x"), "{stderr}");
    assert!(stderr.contains("line="), "{stderr}");
}

#[test]
fn e2e_fatal_exits_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["fatal", "cannot continue"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("FATAL cannot continue"));
}

#[test]
fn e2e_fatal_exits_even_when_output_is_off() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--log", "no", "fatal", "silent"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!stderr_of(&output).contains("silent"));
}

#[test]
fn e2e_config_file_applies_and_flags_override() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[logging]\nlevel = \"error\"\n").unwrap();
    let config = config.to_str().unwrap();

    let quiet = run(dir.path(), &["--config", config, "warn", "hidden"]);
    assert!(!stderr_of(&quiet).contains("hidden"));

    let loud = run(
        dir.path(),
        &["--config", config, "--log", "warn", "warn", "visible"],
    );
    assert!(stderr_of(&loud).contains("WARN visible"));
}

#[test]
fn e2e_invalid_config_value_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[logging]\nlevel = \"loud\"\n").unwrap();

    let output = run(
        dir.path(),
        &["--config", config.to_str().unwrap(), "info", "ok"],
    );
    let stderr = stderr_of(&output);
    assert!(output.status.success());
    assert!(stderr.contains("is not recognised"), "{stderr}");
    assert!(stderr.contains("INFO ok"), "{stderr}");
}

#[test]
fn e2e_bogus_log_flag_warns_and_keeps_info() {
    let dir = tempfile::tempdir().unwrap();
    let output = run(dir.path(), &["--log", "bogus", "info", "kept"]);

    let stderr = stderr_of(&output);
    assert!(stderr.contains("not a valid log level"), "{stderr}");
    assert!(stderr.contains("INFO kept"), "{stderr}");
}
