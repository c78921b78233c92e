//! Log record structure

use super::severity::Severity;
use chrono::{DateTime, Utc};

/// One message on its way to the sink. Never stored by the logger.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub context: Option<String>,
}

impl LogRecord {
    /// Sanitize text to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one record always renders as exactly one line.
    fn sanitize(text: &str) -> String {
        text.replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(severity: Severity, message: impl AsRef<str>) -> Self {
        Self {
            severity,
            timestamp: Utc::now(),
            message: Self::sanitize(message.as_ref()),
            context: None,
        }
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.context = Some(Self::sanitize(context));
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Render as `<RFC3339 timestamp> [<LEVEL>] <message> - <context>`,
    /// without the trailing newline.
    pub fn to_line(&self) -> String {
        format!(
            "{} [{}] {} - {}",
            self.timestamp.to_rfc3339(),
            self.severity.to_str(),
            self.message,
            self.context.as_deref().unwrap_or("")
        )
    }
}
