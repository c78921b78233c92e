//! Sink trait for log output destinations

use super::error::Result;

/// Destination receiving formatted log lines.
///
/// The logger calls `write_line` with one complete line (no trailing
/// newline) while holding its lock, so implementations need no locking of
/// their own.
pub trait Sink: Send {
    fn write_line(&mut self, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
