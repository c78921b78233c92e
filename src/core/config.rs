//! Logger configuration: environment lookup, destination, and the
//! persisted `{"level": n}` record

use super::severity::Severity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable read by [`Logger::configure_from_env`](crate::Logger::configure_from_env)
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Read a variable from the process environment. A value that is not valid
/// UTF-8 still counts as present.
pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
}

/// Map a `LOG_LEVEL` value to a threshold.
///
/// Only the exact names `INFO`, `WARN`, `ERROR` and `CRITICAL` are
/// recognized; anything else falls back to [`Severity::Error`].
pub fn level_from_env_value(value: &str) -> Severity {
    value.parse().unwrap_or(Severity::Error)
}

/// Persisted logger configuration. Only the threshold survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub level: Severity,
}

impl LoggerConfig {
    pub fn new(level: Severity) -> Self {
        Self { level }
    }

    /// Threshold named by `LOG_LEVEL`, or `None` when the variable is unset
    pub fn level_from_env() -> Option<Severity> {
        Self::level_from_lookup(env_lookup)
    }

    /// Same as [`level_from_env`](Self::level_from_env) with a caller-supplied lookup
    pub fn level_from_lookup<F>(lookup: F) -> Option<Severity>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(LOG_LEVEL_ENV).map(|value| level_from_env_value(&value))
    }
}

/// Where a logger writes its lines
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn from_path(path: Option<impl Into<PathBuf>>) -> Self {
        match path {
            Some(path) => Destination::File(path.into()),
            None => Destination::Stdout,
        }
    }
}
