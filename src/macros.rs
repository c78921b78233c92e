//! Logging macros for ergonomic log message formatting.
//!
//! These macros take `format!`-style arguments, checked at compile time.
//! Use [`Logger::emit`](crate::Logger::emit) instead when the template is
//! only known at run time.
//!
//! # Examples
//!
//! ```
//! use notifyme::prelude::*;
//! use notifyme::info;
//!
//! let logger = Logger::with_sink(Severity::Info, Box::new(MemorySink::new()));
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting.
///
/// Expands to [`Logger::log`](crate::Logger::log), which returns nothing:
/// at `Severity::Critical` the line is written but the critical condition
/// is dropped. Use [`critical!`] to get it back.
///
/// # Examples
///
/// ```
/// # use notifyme::prelude::*;
/// # let logger = Logger::with_sink(Severity::Info, Box::new(MemorySink::new()));
/// use notifyme::log;
/// log!(logger, Severity::Info, "Simple message");
/// log!(logger, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use notifyme::prelude::*;
/// # let logger = Logger::with_sink(Severity::Info, Box::new(MemorySink::new()));
/// use notifyme::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

/// Log a critical message and evaluate to the
/// [`LoggerError::Critical`](crate::LoggerError::Critical) value.
///
/// # Examples
///
/// ```
/// # use notifyme::prelude::*;
/// # let logger = Logger::with_sink(Severity::Info, Box::new(MemorySink::new()));
/// use notifyme::critical;
///
/// fn mount(logger: &Logger) -> Result<()> {
///     Err(critical!(logger, "Unable to mount {}", "/data"))
/// }
///
/// assert_eq!(mount(&logger).unwrap_err().to_string(), "Unable to mount /data");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $logger.critical(format!($($arg)+))
    };
}
