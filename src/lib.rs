//! # notifyme
//!
//! A small leveled logger: informational, warning, error and critical
//! messages, gated by a minimum severity, written one line each to standard
//! output or an append-only file.
//!
//! ## Features
//!
//! - **Ordered severity filter**: `Info < Warn < Error < Critical`
//! - **Thread Safe**: one lock per logger; concurrent lines never interleave
//! - **Critical as errors**: every critical message comes back as a
//!   [`LoggerError::Critical`] the caller can propagate
//! - **Environment configuration**: `LOG_LEVEL=INFO|WARN|ERROR|CRITICAL`
//!
//! Each line has the form `<RFC3339 timestamp> [<LEVEL>] <message> - <context>`.
//!
//! ```
//! use notifyme::prelude::*;
//!
//! let capture = MemorySink::new();
//! let logger = Logger::with_sink(Severity::Warn, Box::new(capture.clone()));
//!
//! logger.info("suppressed");
//! logger.emit(Severity::Error, "retry %d failed", Some("sync"), &[&3]).unwrap();
//!
//! assert_eq!(capture.len(), 1);
//! assert!(capture.lines()[0].ends_with("[ERROR] retry 3 failed - sync"));
//! ```

pub mod core;
pub mod global;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Destination, LogRecord, Logger, LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics,
        Result, Severity, Sink,
    };
    pub use crate::sinks::{FileSink, MemorySink, StdoutSink};
}

pub use crate::core::{
    append_params, format_message, level_from_env_value, Arg, Destination, LogRecord, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, Result, Severity, Sink,
    LOG_LEVEL_ENV,
};
pub use sinks::{FileSink, MemorySink, StdoutSink};
