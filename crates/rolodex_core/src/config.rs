//! Runtime configuration for the engine and logging bootstrap.
//!
//! # Responsibility
//! - Hold the resolver partial-match policy.
//! - Validate logging level/directory before the backend sees them.
//!
//! # Invariants
//! - A constructed `LogConfig` always has a known level and an absolute directory.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What the name resolver does with a single partial (substring) match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialMatchPolicy {
    /// Resolve to the sole partial match.
    #[default]
    AutoResolve,
    /// Report the sole partial match as a suggestion; the user must retype it.
    Suggest,
}

impl PartialMatchPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoResolve => "auto_resolve",
            Self::Suggest => "suggest",
        }
    }
}

/// Engine-level switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub partial_match: PartialMatchPolicy,
}

impl EngineConfig {
    /// Configuration that never auto-picks a partial name match.
    pub fn strict() -> Self {
        Self {
            partial_match: PartialMatchPolicy::Suggest,
        }
    }
}

/// Configuration validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnsupportedLogLevel(String),
    EmptyLogDir,
    RelativeLogDir(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedLogLevel(level) => write!(
                f,
                "unsupported log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::EmptyLogDir => write!(f, "log_dir cannot be empty"),
            Self::RelativeLogDir(dir) => {
                write!(f, "log_dir must be an absolute path, got `{dir}`")
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
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// `debug` in debug builds, `info` in release builds.
    pub fn default_for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Info
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::UnsupportedLogLevel(other.to_string())),
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    level: LogLevel,
    log_dir: PathBuf,
}

impl LogConfig {
    pub fn new(level: LogLevel, log_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            level,
            log_dir: normalize_log_dir(log_dir.as_ref())?,
        })
    }

    /// Parses a textual level, then validates the directory.
    pub fn parse(level: &str, log_dir: &str) -> Result<Self, ConfigError> {
        Self::new(level.parse()?, Path::new(log_dir.trim()))
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

fn normalize_log_dir(log_dir: &Path) -> Result<PathBuf, ConfigError> {
    if log_dir.as_os_str().is_empty() {
        return Err(ConfigError::EmptyLogDir);
    }
    if !log_dir.is_absolute() {
        return Err(ConfigError::RelativeLogDir(
            log_dir.display().to_string(),
        ));
    }
    Ok(log_dir.to_path_buf())
}
