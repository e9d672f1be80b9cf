//! Configuration parsing and validation for drowse
//!
//! Supports TOML configuration with:
//! - Versioned schema
//! - General timing settings and command templates
//! - `[[activity]]` and `[[wakeup]]` probe sections
//! - Validation with clear error messages

mod schema;
mod settings;
mod template;
mod validation;

pub use schema::*;
pub use settings::*;
pub use template::*;
pub use validation::*;

use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<ValidationError> },

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<Settings> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> ConfigResult<Settings> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.config_version != CURRENT_CONFIG_VERSION {
        return Err(ConfigError::UnsupportedVersion(raw.config_version));
    }

    let errors = validate_config(&raw);
    if !errors.is_empty() {
        return Err(ConfigError::ValidationFailed { errors });
    }

    Settings::from_raw(raw)
}

/// Current supported config version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_minimal_config() {
        let config = r#"
            config_version = 1

            [general]
            suspend_cmd = "systemctl suspend"

            [[activity]]
            name = "Load"
            enabled = true
        "#;

        let settings = parse_config(config).unwrap();
        assert_eq!(settings.activities.len(), 1);
        assert_eq!(settings.activities[0].class, "Load");
        assert_eq!(settings.commands.suspend, "systemctl suspend");
    }

    #[test]
    fn reject_wrong_version() {
        let config = r#"
            config_version = 99

            [general]
            suspend_cmd = "true"
        "#;

        let result = parse_config(config);
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion(99))));
    }

    #[test]
    fn reject_invalid_config() {
        let config = r#"
            config_version = 1

            [general]
            interval = 0
        "#;

        let Err(ConfigError::ValidationFailed { errors }) = parse_config(config) else {
            panic!("expected validation failure");
        };
        // missing suspend_cmd, zero interval, no activity probes
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            config_version = 1

            [general]
            suspend_cmd = "true"
            idle_time = 10

            [[activity]]
            name = "ping"
            class = "Ping"
            enabled = true
            hosts = ["192.168.0.1"]
            "#
        )
        .unwrap();

        let settings = load_config(file.path()).unwrap();
        assert_eq!(settings.general.idle_time, chrono::TimeDelta::seconds(10));
        assert!(!settings.activities[0].options.is_empty());
    }

    #[test]
    fn missing_file_is_read_error() {
        let result = load_config("/nonexistent/drowse.toml");
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }
}
