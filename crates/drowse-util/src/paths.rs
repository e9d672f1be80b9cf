//! Default paths for drowse components

use std::path::PathBuf;

/// Environment variable for overriding the config file path
pub const DROWSE_CONFIG_ENV: &str = "DROWSE_CONFIG";

/// System-wide configuration file
const SYSTEM_CONFIG_PATH: &str = "/etc/drowse/drowse.toml";

/// Marker written by the resume hook and consumed by the daemon
const WOKE_UP_FILE: &str = "/var/run/drowse-just-woke-up";

/// Get the default configuration file path.
///
/// Order of precedence:
/// 1. `$DROWSE_CONFIG` environment variable (if set)
/// 2. `/etc/drowse/drowse.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(DROWSE_CONFIG_ENV) {
        return PathBuf::from(path);
    }

    PathBuf::from(SYSTEM_CONFIG_PATH)
}

/// Get the default "just woke up" marker path.
pub fn default_woke_up_file() -> PathBuf {
    PathBuf::from(WOKE_UP_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn woke_up_file_is_absolute() {
        let path = default_woke_up_file();
        assert!(path.is_absolute());
        assert!(path.to_string_lossy().contains("drowse"));
    }

    #[test]
    fn config_path_is_toml() {
        let path = PathBuf::from(SYSTEM_CONFIG_PATH);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("toml"));
    }
}
