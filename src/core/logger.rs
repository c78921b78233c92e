//! Main logger implementation

use super::{
    config::{env_lookup, Destination, LoggerConfig},
    error::{LoggerError, Result},
    format::{append_params, format_message, Arg},
    metrics::LoggerMetrics,
    record::LogRecord,
    severity::Severity,
    sink::Sink,
};
use crate::sinks::{FileSink, StdoutSink};
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Everything the lock guards
struct LoggerState {
    threshold: Severity,
    sink: Box<dyn Sink>,
}

/// Leveled logger writing one line per message to a single sink.
///
/// A single mutex guards both the threshold and the sink, so a
/// [`set_level`](Logger::set_level) is seen by every later call from any
/// thread and lines from concurrent callers never interleave. Share it
/// between threads with `Arc<Logger>`.
pub struct Logger {
    state: Mutex<LoggerState>,
    metrics: LoggerMetrics,
}

impl Logger {
    /// Logger writing to standard output
    #[must_use]
    pub fn new(threshold: Severity) -> Self {
        Self::with_sink(threshold, Box::new(StdoutSink::new()))
    }

    #[must_use]
    pub fn with_sink(threshold: Severity, sink: Box<dyn Sink>) -> Self {
        Self {
            state: Mutex::new(LoggerState { threshold, sink }),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Logger appending to `path`, created if absent
    pub fn with_file(threshold: Severity, path: impl Into<PathBuf>) -> Result<Self> {
        let sink = FileSink::open(path)?;
        Ok(Self::with_sink(threshold, Box::new(sink)))
    }

    /// Logger writing to `destination` when given, standard output otherwise.
    ///
    /// # Errors
    ///
    /// [`LoggerError::SinkOpen`] if the file cannot be opened for appending.
    pub fn create(threshold: Severity, destination: Option<&Path>) -> Result<Self> {
        Self::from_destination(threshold, &Destination::from_path(destination))
    }

    pub fn from_destination(threshold: Severity, destination: &Destination) -> Result<Self> {
        match destination {
            Destination::Stdout => Ok(Self::new(threshold)),
            Destination::File(path) => Self::with_file(threshold, path.clone()),
        }
    }

    /// Stdout logger with the persisted threshold
    #[must_use]
    pub fn from_config(config: LoggerConfig) -> Self {
        Self::new(config.level)
    }

    pub fn set_level(&self, level: Severity) {
        self.state.lock().threshold = level;
    }

    /// Set the threshold from its integer value.
    ///
    /// Values outside 0..=3 are rejected with
    /// [`LoggerError::UnrecognizedSeverity`] and the threshold is left as is.
    pub fn set_level_raw(&self, level: i64) -> Result<()> {
        let level = Severity::try_from(level)?;
        self.set_level(level);
        Ok(())
    }

    pub fn level(&self) -> Severity {
        self.state.lock().threshold
    }

    pub fn is_enabled(&self, level: Severity) -> bool {
        level >= self.level()
    }

    /// Format and write one message.
    ///
    /// The threshold is checked before `message` is formatted, so suppressed
    /// messages cost no formatting. When `args` is empty the message is
    /// written literally; otherwise see [`format_message`].
    ///
    /// # Errors
    ///
    /// - [`LoggerError::Critical`] for every `Critical` message, written or
    ///   not, carrying the formatted message.
    /// - [`LoggerError::Write`] if the sink rejects the line.
    pub fn emit(
        &self,
        level: Severity,
        message: &str,
        context: Option<&str>,
        args: &[Arg<'_>],
    ) -> Result<()> {
        self.dispatch(level, context, || format_message(message, args))
    }

    /// Dispatch on a message-type tag (`"Info"`, `"Warn"`, `"Error"`,
    /// `"Critical"`).
    ///
    /// An unknown tag is reported as an `Error` line naming the tag, subject
    /// to the threshold like any other `Error` message, and returned as
    /// [`LoggerError::UnrecognizedMessageType`].
    pub fn notify(
        &self,
        message_type: &str,
        message: &str,
        context: Option<&str>,
        args: &[Arg<'_>],
    ) -> Result<()> {
        match Severity::from_message_type(message_type) {
            Some(level) => self.emit(level, message, context, args),
            None => {
                // A failed write is already counted and reported by write_record
                let _ = self.write_record(Severity::Error, context, || {
                    format!("Unknown message type: {}", message_type)
                });
                Err(LoggerError::UnrecognizedMessageType(message_type.to_string()))
            }
        }
    }

    /// Log at an integer level, appending each of `params` after a space.
    ///
    /// An out-of-range level is reported as an `Error` line
    /// (`Unknown log level: <n>`) whatever the threshold, and returned as
    /// [`LoggerError::UnrecognizedSeverity`].
    pub fn log_raw(&self, level: i64, message: &str, params: &[Arg<'_>]) -> Result<()> {
        match Severity::try_from(level) {
            Ok(level) => self.dispatch(level, None, || append_params(message, params)),
            Err(err) => {
                let _ = self.write_unfiltered(Severity::Error, &err.to_string());
                Err(err)
            }
        }
    }

    /// Write `message` literally. Write failures are counted in
    /// [`metrics`](Logger::metrics) and reported on stderr.
    ///
    /// Nothing is returned, not even for `Severity::Critical`; use
    /// [`critical`](Logger::critical) or [`emit`](Logger::emit) to get the
    /// critical condition back.
    pub fn log(&self, level: Severity, message: impl Into<String>) {
        let _ = self.write_record(level, None, || -> String { message.into() });
    }

    pub fn log_with_context(&self, level: Severity, message: impl Into<String>, context: &str) {
        let _ = self.write_record(level, Some(context), || -> String { message.into() });
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    /// Write a critical message and return it as an error for the caller
    /// to propagate. The error is returned even when the line is suppressed.
    #[must_use = "the critical condition should be propagated"]
    pub fn critical(&self, message: impl Into<String>) -> LoggerError {
        self.raise_critical(message.into(), None)
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Name of the current sink (`"stdout"`, `"file"`, ...)
    pub fn sink_name(&self) -> String {
        self.state.lock().sink.name().to_string()
    }

    /// Apply `LOG_LEVEL` from the process environment.
    ///
    /// Returns the applied threshold, or `None` (threshold untouched) when
    /// the variable is unset.
    pub fn configure_from_env(&self) -> Option<Severity> {
        self.configure_with(env_lookup)
    }

    /// [`configure_from_env`](Logger::configure_from_env) with a
    /// caller-supplied variable lookup
    pub fn configure_with<F>(&self, lookup: F) -> Option<Severity>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let level = LoggerConfig::level_from_lookup(lookup)?;
        self.set_level(level);
        Some(level)
    }

    pub fn config(&self) -> LoggerConfig {
        LoggerConfig::new(self.level())
    }

    /// Apply a persisted configuration in place.
    ///
    /// Sets the threshold and resets the sink to standard output; a file
    /// destination is flushed and released, not preserved.
    pub fn restore(&self, config: LoggerConfig) {
        let mut state = self.state.lock();
        if let Err(e) = state.sink.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush replaced sink: {}", e);
        }
        state.threshold = config.level;
        state.sink = Box::new(StdoutSink::new());
    }

    /// Serialize the configuration as `{"level": <0-3>}`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Stdout logger from a `{"level": <0-3>}` record
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a `{"level": <0-3>}` record and [`restore`](Logger::restore) it
    pub fn restore_json(&self, json: &str) -> Result<()> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        self.restore(config);
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        self.state.lock().sink.flush()
    }

    /// Flush and release the sink
    ///
    /// Dropping the logger flushes too, but only reports failures on stderr.
    pub fn shutdown(self) -> Result<()> {
        self.flush()
    }

    /// Critical messages are always formatted and always yield an error;
    /// everything else goes through the lazy path.
    fn dispatch<M, F>(&self, level: Severity, context: Option<&str>, render: F) -> Result<()>
    where
        M: AsRef<str> + Into<String>,
        F: FnOnce() -> M,
    {
        if level == Severity::Critical {
            return Err(self.raise_critical(render().into(), context));
        }
        self.write_record(level, context, render)
    }

    fn raise_critical(&self, message: String, context: Option<&str>) -> LoggerError {
        // A failed write is already counted and reported by write_record
        let _ = self.write_record(Severity::Critical, context, || message.as_str());
        LoggerError::critical(message)
    }

    /// Filter, render and write one record under the lock
    fn write_record<M, F>(&self, level: Severity, context: Option<&str>, render: F) -> Result<()>
    where
        M: AsRef<str>,
        F: FnOnce() -> M,
    {
        let mut state = self.state.lock();
        if level < state.threshold {
            self.metrics.record_suppressed();
            return Ok(());
        }

        self.write_to_sink(state.sink.as_mut(), level, context, render())
    }

    /// Write one record without consulting the threshold
    fn write_unfiltered(&self, level: Severity, message: &str) -> Result<()> {
        let mut state = self.state.lock();
        self.write_to_sink(state.sink.as_mut(), level, None, message)
    }

    fn write_to_sink(
        &self,
        sink: &mut dyn Sink,
        level: Severity,
        context: Option<&str>,
        message: impl AsRef<str>,
    ) -> Result<()> {
        let mut record = LogRecord::new(level, message);
        if let Some(context) = context {
            record = record.with_context(context);
        }

        match sink.write_line(&record.to_line()) {
            Ok(()) => {
                self.metrics.record_logged();
                Ok(())
            }
            Err(e) => {
                self.report_write_failure(&e);
                Err(e)
            }
        }
    }

    fn report_write_failure(&self, err: &LoggerError) {
        let failures = self.metrics.record_write_failure() + 1;

        // Alert on first failure and periodically thereafter
        if failures == 1 || failures % 1000 == 0 {
            eprintln!("[LOGGER ERROR] {} ({} failed writes so far)", err, failures);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Severity::default())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("Logger")
            .field("threshold", &state.threshold)
            .field("sink", &state.sink.name())
            .finish()
    }
}

impl Serialize for Logger {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.config().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Logger {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        LoggerConfig::deserialize(deserializer).map(Logger::from_config)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.state.get_mut().sink.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }

        let failures = self.metrics.write_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Logger shutting down with {} failed writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use notifyme::prelude::*;
///
/// let logger = Logger::builder()
///     .level(Severity::Warn)
///     .sink(MemorySink::new())
///     .build()
///     .expect("memory sink never fails to open");
/// assert_eq!(logger.level(), Severity::Warn);
/// ```
pub struct LoggerBuilder {
    level: Severity,
    destination: Destination,
    sink: Option<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder: `Info` threshold, standard output
    pub fn new() -> Self {
        Self {
            level: Severity::default(),
            destination: Destination::Stdout,
            sink: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Severity) -> Self {
        self.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Append to the file at `path`
    #[must_use = "builder methods return a new value"]
    pub fn file(self, path: impl Into<PathBuf>) -> Self {
        self.destination(Destination::File(path.into()))
    }

    /// Write to a custom sink; takes precedence over any destination
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// [`LoggerError::SinkOpen`] if a file destination cannot be opened.
    pub fn build(self) -> Result<Logger> {
        match self.sink {
            Some(sink) => Ok(Logger::with_sink(self.level, sink)),
            None => Logger::from_destination(self.level, &self.destination),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
