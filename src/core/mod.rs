//! Core logger types and traits

pub mod config;
pub mod error;
pub mod format;
pub mod logger;
pub mod metrics;
pub mod record;
pub mod severity;
pub mod sink;

pub use config::{level_from_env_value, Destination, LoggerConfig, LOG_LEVEL_ENV};
pub use error::{LoggerError, Result};
pub use format::{append_params, format_message, Arg};
pub use logger::{Logger, LoggerBuilder};
pub use metrics::LoggerMetrics;
pub use record::LogRecord;
pub use severity::Severity;
pub use sink::Sink;
