// LogChain - platform/config.rs
//
// config.toml loading with startup validation.
//
// Only the `[logging]` section is read. Invalid values produce actionable
// warnings and are left unset, so the caller's defaults (or CLI flags)
// apply instead. Uses the `directories` crate for XDG (Linux), AppData
// (Windows), and Library (macOS) compliant default locations.

use crate::app::params::{Output, PartialParams};
use crate::core::model::LevelSetting;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys and sections are silently ignored so the file can be
/// shared with the application that embeds this crate.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Level name: trace, debug, info, warn, error, fatal, or "no".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
    /// chrono strftime layout for timestamps.
    pub timestamp_format: Option<String>,
    /// "stderr" or "tracing".
    pub output: Option<String>,
}

/// Default config.toml location for this platform, if one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", constants::APP_ID)
        .map(|dirs| dirs.config_dir().join(constants::CONFIG_FILE_NAME))
}

/// Read and parse config.toml without validating values.
pub fn read_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let size = std::fs::metadata(path)
        .map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?
        .len();
    if size > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate config.toml.
///
/// Returns the parameters the file sets and a list of non-fatal warnings.
/// A missing file yields empty parameters and no warnings (first run).
/// An unreadable or unparseable file yields empty parameters and one
/// warning: the application still starts but the user is informed.
pub fn load_config(path: &Path) -> (PartialParams, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !path.exists() {
        return (PartialParams::default(), warnings);
    }

    let raw = match read_config(path) {
        Ok(raw) => raw,
        Err(e) => {
            warnings.push(format!("{e}. Using defaults."));
            return (PartialParams::default(), warnings);
        }
    };

    let mut params = PartialParams::default();
    let logging = raw.logging;

    // -- Logging: level --
    if let Some(level) = logging.level {
        if level.parse::<LevelSetting>().is_ok() {
            params.level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::LEVEL_NAMES.join(", "),
                constants::DEFAULT_LEVEL,
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = logging.file {
        if !file.is_empty() {
            params.file = Some(PathBuf::from(file));
        }
    }

    // -- Logging: timestamp_format --
    if let Some(format) = logging.timestamp_format {
        if format.is_empty() || format.len() > constants::MAX_TIMESTAMP_FORMAT_LEN {
            warnings.push(format!(
                "[logging] timestamp_format must be 1-{} characters. Using default (\"{}\").",
                constants::MAX_TIMESTAMP_FORMAT_LEN,
                constants::DEFAULT_TIMESTAMP_FORMAT,
            ));
        } else {
            params.timestamp_format = Some(format);
        }
    }

    // -- Logging: output --
    if let Some(output) = logging.output {
        match output.to_lowercase().as_str() {
            "stderr" => params.output = Some(Output::Stderr),
            "tracing" => params.output = Some(Output::Tracing),
            other => warnings.push(format!(
                "[logging] output = \"{other}\" is not recognised. \
                 Expected \"stderr\" or \"tracing\". Using default (stderr).",
            )),
        }
    }

    (params, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (params, warnings) = load_config(&dir.path().join("absent.toml"));
        assert_eq!(params, PartialParams::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_valid_logging_section() {
        let (_dir, path) = write_config(
            r#"
            [logging]
            level = "debug"
            file = "/var/log/app.log"
            timestamp_format = "%H:%M"
            output = "tracing"

            [unrelated]
            key = 1
            "#,
        );
        let (params, warnings) = load_config(&path);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(params.level.as_deref(), Some("debug"));
        assert_eq!(params.file, Some(PathBuf::from("/var/log/app.log")));
        assert_eq!(params.timestamp_format.as_deref(), Some("%H:%M"));
        assert_eq!(params.output, Some(Output::Tracing));
    }

    #[test]
    fn test_off_level_accepted() {
        let (_dir, path) = write_config("[logging]\nlevel = \"no\"\n");
        let (params, warnings) = load_config(&path);
        assert!(warnings.is_empty());
        assert_eq!(params.level.as_deref(), Some("no"));
    }

    #[test]
    fn test_invalid_values_warn_and_stay_unset() {
        let (_dir, path) = write_config(
            "[logging]\nlevel = \"loud\"\noutput = \"syslog\"\nfile = \"\"\n",
        );
        let (params, warnings) = load_config(&path);
        assert_eq!(warnings.len(), 2, "{warnings:?}");
        assert!(params.level.is_none());
        assert!(params.output.is_none());
        assert!(params.file.is_none());
    }

    #[test]
    fn test_unparseable_file_warns_once() {
        let (_dir, path) = write_config("[logging\nlevel = ");
        let (params, warnings) = load_config(&path);
        assert_eq!(params, PartialParams::default());
        assert_eq!(warnings.len(), 1);
        assert!(matches!(read_config(&path), Err(ConfigError::TomlParse { .. })));
    }
}
