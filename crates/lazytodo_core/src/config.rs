//! Runtime configuration for hosts embedding the task store.
//!
//! # Responsibility
//! - Resolve database path and logging settings from the environment.
//! - Apply explicit caller overrides on top of environment values.
//!
//! # Invariants
//! - Blank values count as unset.
//! - The resolved log level is always one `init_logging` accepts.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "LAZYTODO_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "LAZYTODO_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "LAZYTODO_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "lazytodo.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

/// Explicit values that win over the environment, e.g. CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from process environment.
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok(), overrides)
    }

    /// Resolves configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    /// - `InvalidLogLevel` when the effective level is unsupported.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).and_then(|value| non_blank(&value));

        let db_path = overrides
            .db_path
            .or_else(|| var(ENV_DB_PATH).map(PathBuf::from))
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));

        let log_level = match overrides
            .log_level
            .and_then(|value| non_blank(&value))
            .or_else(|| var(ENV_LOG_LEVEL))
        {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = overrides
            .log_dir
            .or_else(|| var(ENV_LOG_DIR).map(PathBuf::from));

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, ConfigOverrides, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::resolve(env(&[]), ConfigOverrides::default()).unwrap();
        assert!(config.db_path.ends_with("lazytodo.sqlite3"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn environment_values_are_trimmed_and_blank_ignored() {
        let config = AppConfig::resolve(
            env(&[
                (ENV_DB_PATH, " /data/tasks.db "),
                (ENV_LOG_LEVEL, "WARNING"),
                (ENV_LOG_DIR, "   "),
            ]),
            ConfigOverrides::default(),
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/tasks.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn overrides_win_over_environment() {
        let config = AppConfig::resolve(
            env(&[(ENV_DB_PATH, "/env.db"), (ENV_LOG_LEVEL, "error")]),
            ConfigOverrides {
                db_path: Some(PathBuf::from("/flag.db")),
                log_level: Some("trace".to_string()),
                log_dir: Some(PathBuf::from("/logs")),
            },
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/flag.db"));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.log_dir, Some(PathBuf::from("/logs")));
    }

    #[test]
    fn unsupported_level_is_rejected() {
        let err = AppConfig::resolve(env(&[(ENV_LOG_LEVEL, "verbose")]), ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogLevel(message) if message.contains("verbose")));
    }
}
