//! Runtime configuration for the core crate.
//!
//! # Responsibility
//! - Validate and normalize logging settings before the backend starts.
//! - Load settings from `BLOCKNOTE_LOG_LEVEL` / `BLOCKNOTE_LOG_DIR`.
//!
//! # Invariants
//! - A constructed [`LoggingConfig`] always carries a supported level and an
//!   absolute, non-empty directory.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const LOG_LEVEL_ENV: &str = "BLOCKNOTE_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "BLOCKNOTE_LOG_DIR";

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLevel(value) => write!(
                f,
                "unsupported log level `{value}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(value) => {
                write!(f, "log_dir must be an absolute path, got `{value}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parses a level name; `warning` is accepted as `warn`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLevel(other.to_string())),
        }
    }

    /// Level spec understood by `flexi_logger`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        default_log_level()
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
pub fn default_log_level() -> LogLevel {
    if cfg!(debug_assertions) {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

/// Validated logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    level: LogLevel,
    log_dir: PathBuf,
}

impl LoggingConfig {
    /// Builds a config from raw strings.
    ///
    /// # Errors
    /// - [`ConfigError::UnsupportedLevel`] for unknown level names.
    /// - [`ConfigError::EmptyLogDir`] / [`ConfigError::RelativeLogDir`] when
    ///   the directory is not an absolute path.
    pub fn new(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: LogLevel::parse(level)?,
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Builds a config with the build-mode default level.
    pub fn with_default_level(log_dir: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            level: default_log_level(),
            log_dir: normalize_log_dir(log_dir)?,
        })
    }

    /// Reads settings from the process environment.
    ///
    /// Returns `Ok(None)` when no log directory is configured.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LoggingConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(log_dir) = lookup(LOG_DIR_ENV) else {
            return Ok(None);
        };
        let level = match lookup(LOG_LEVEL_ENV) {
            Some(value) => LogLevel::parse(&value)?,
            None => default_log_level(),
        };
        Ok(Some(Self {
            level,
            log_dir: normalize_log_dir(&log_dir)?,
        }))
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, ConfigError> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(ConfigError::RelativeLogDir(trimmed.to_string()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, LogLevel, LoggingConfig, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn level_names_are_normalized() {
        assert_eq!(LogLevel::parse("INFO").unwrap(), LogLevel::Info);
        assert_eq!(LogLevel::parse(" warning ").unwrap(), LogLevel::Warn);
        assert_eq!(
            LogLevel::parse("loud").unwrap_err(),
            ConfigError::UnsupportedLevel("loud".to_string())
        );
    }

    #[test]
    fn relative_and_empty_dirs_are_rejected() {
        assert_eq!(
            LoggingConfig::new("info", "logs/dev").unwrap_err(),
            ConfigError::RelativeLogDir("logs/dev".to_string())
        );
        assert_eq!(
            LoggingConfig::new("info", "  ").unwrap_err(),
            ConfigError::EmptyLogDir
        );
    }

    #[test]
    fn lookup_without_dir_disables_logging() {
        let config = LoggingConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "trace")])).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn lookup_reads_level_and_dir() {
        let dir = std::env::temp_dir();
        let dir_str = dir.to_str().unwrap();
        let config = LoggingConfig::from_lookup(lookup(&[
            (LOG_DIR_ENV, dir_str),
            (LOG_LEVEL_ENV, "error"),
        ]))
        .unwrap()
        .unwrap();
        assert_eq!(config.level(), LogLevel::Error);
        assert_eq!(config.log_dir(), dir.as_path());

        let defaulted = LoggingConfig::from_lookup(lookup(&[(LOG_DIR_ENV, dir_str)]))
            .unwrap()
            .unwrap();
        assert_eq!(defaulted.level(), LogLevel::default());
    }
}
