//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message-type tags accepted by [`Logger::notify`](crate::Logger::notify)
const MESSAGE_TYPES: [(&str, Severity); 4] = [
    ("Info", Severity::Info),
    ("Warn", Severity::Warn),
    ("Error", Severity::Error),
    ("Critical", Severity::Critical),
];

/// Ordered severity of a log message.
///
/// A message at severity `S` is written iff `S >= threshold`. Serialized as
/// its integer value (0-3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum Severity {
    #[default]
    Info = 0,
    Warn = 1,
    Error = 2,
    Critical = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Look up a message-type tag (`"Info"`, `"Warn"`, `"Error"`, `"Critical"`).
    /// Tags are case-sensitive.
    pub fn from_message_type(tag: &str) -> Option<Self> {
        MESSAGE_TYPES
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|(_, level)| *level)
    }

    pub fn message_type(&self) -> &'static str {
        MESSAGE_TYPES[*self as usize].0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    /// Parses the exact upper-case names `INFO`, `WARN`, `ERROR`, `CRITICAL`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INFO" => Ok(Severity::Info),
            "WARN" => Ok(Severity::Warn),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(format!("Invalid severity: '{}'", s)),
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = LoggerError;

    fn try_from(value: i64) -> Result<Self, LoggerError> {
        match value {
            0 => Ok(Severity::Info),
            1 => Ok(Severity::Warn),
            2 => Ok(Severity::Error),
            3 => Ok(Severity::Critical),
            other => Err(LoggerError::UnrecognizedSeverity(other)),
        }
    }
}

impl TryFrom<u8> for Severity {
    type Error = LoggerError;

    fn try_from(value: u8) -> Result<Self, LoggerError> {
        Severity::try_from(i64::from(value))
    }
}

impl From<Severity> for u8 {
    fn from(level: Severity) -> Self {
        level as u8
    }
}
