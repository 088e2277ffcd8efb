//! Runtime configuration resolved from the process environment.
//!
//! # Responsibility
//! - Resolve database, export and logging locations for front-ends.
//!
//! # Invariants
//! - Blank environment values are ignored, never treated as paths.
//! - Defaults live under the OS temp directory so a fresh device works
//!   without any setup.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "CLUBTALLY_DB_PATH";
pub const ENV_EXPORT_DIR: &str = "CLUBTALLY_EXPORT_DIR";
pub const ENV_LOG_LEVEL: &str = "CLUBTALLY_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "CLUBTALLY_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "clubtally.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "clubtally-logs";

/// Locations and levels used by FFI and CLI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let temp = std::env::temp_dir();
        Self {
            db_path: temp.join(DEFAULT_DB_FILE_NAME),
            export_dir: temp.clone(),
            log_level: default_log_level().to_string(),
            log_dir: temp.join(DEFAULT_LOG_DIR_NAME),
        }
    }
}

impl RuntimeConfig {
    /// Builds a config from `CLUBTALLY_*` environment variables over defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup over defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(value) = non_blank(ENV_DB_PATH) {
            config.db_path = PathBuf::from(value);
        }
        if let Some(value) = non_blank(ENV_EXPORT_DIR) {
            config.export_dir = PathBuf::from(value);
        }
        if let Some(value) = non_blank(ENV_LOG_LEVEL) {
            config.log_level = value;
        }
        if let Some(value) = non_blank(ENV_LOG_DIR) {
            config.log_dir = PathBuf::from(value);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::{RuntimeConfig, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::path::PathBuf;

    #[test]
    fn blank_values_keep_defaults() {
        let config = RuntimeConfig::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, RuntimeConfig::default());
    }

    #[test]
    fn set_values_override_defaults() {
        let config = RuntimeConfig::from_lookup(|key| match key {
            ENV_DB_PATH => Some(" /data/club.sqlite3 ".to_string()),
            ENV_LOG_LEVEL => Some("warn".to_string()),
            _ => None,
        });
        assert_eq!(config.db_path, PathBuf::from("/data/club.sqlite3"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.export_dir, RuntimeConfig::default().export_dir);
    }
}
