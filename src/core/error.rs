//! Error types for the logger

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The log destination could not be opened
    #[error("Failed to open log file '{path}': {source}")]
    SinkOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A formatted line could not be written to (or flushed from) the sink
    #[error("Write to {sink} sink failed: {source}")]
    Write {
        sink: String,
        #[source]
        source: std::io::Error,
    },

    /// Numeric severity outside 0..=3
    #[error("Unknown log level: {0}")]
    UnrecognizedSeverity(i64),

    /// Message-type tag outside Info/Warn/Error/Critical
    #[error("Unknown message type: {0}")]
    UnrecognizedMessageType(String),

    /// Produced by every critical emit; displays as the formatted message
    #[error("{message}")]
    Critical { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The process-wide logger has not been initialized
    #[error("Global logger not initialized")]
    NotInitialized,
}

impl LoggerError {
    /// Create a sink open error
    pub fn sink_open(path: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::SinkOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a sink write error
    pub fn write(sink: impl Into<String>, source: std::io::Error) -> Self {
        LoggerError::Write {
            sink: sink.into(),
            source,
        }
    }

    /// Create a critical condition carrying the formatted message
    pub fn critical(message: impl Into<String>) -> Self {
        LoggerError::Critical {
            message: message.into(),
        }
    }

    /// True for the error value every critical emit produces
    pub fn is_critical(&self) -> bool {
        matches!(self, LoggerError::Critical { .. })
    }
}
