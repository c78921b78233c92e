//! Optional process-wide logger
//!
//! Passing an `Arc<Logger>` to the code that needs it is the preferred
//! style. For programs that want package-level calls, [`init`] installs one
//! shared logger exactly once and the helpers below forward to it.
//!
//! ```no_run
//! use notifyme::{global, Severity};
//!
//! global::init(Severity::Info, None).expect("stdout never fails to open");
//! global::configure_from_env();
//! global::notify("Warn", "cache miss rate %d%%", None, &[&35]).ok();
//! ```

use crate::core::{format::Arg, Logger, LoggerError, Result, Severity};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::{Arc, OnceLock};

static GLOBAL_LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

// Serializes initialization so the destination is opened at most once
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Initialize the process-wide logger.
///
/// Only the first successful call creates a logger; later calls return the
/// existing instance and ignore their arguments. A failed call leaves the
/// global uninitialized so it can be retried.
pub fn init(threshold: Severity, destination: Option<&Path>) -> Result<Arc<Logger>> {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        return Ok(Arc::clone(logger));
    }

    let _guard = INIT_LOCK.lock();
    if let Some(logger) = GLOBAL_LOGGER.get() {
        return Ok(Arc::clone(logger));
    }

    let logger = Arc::new(Logger::create(threshold, destination)?);
    Ok(Arc::clone(GLOBAL_LOGGER.get_or_init(|| logger)))
}

/// The process-wide logger, if [`init`] has succeeded
pub fn get() -> Option<Arc<Logger>> {
    GLOBAL_LOGGER.get().cloned()
}

/// Set the global threshold. No-op before [`init`].
pub fn set_level(level: Severity) {
    if let Some(logger) = GLOBAL_LOGGER.get() {
        logger.set_level(level);
    }
}

/// [`Logger::notify`] on the global logger.
///
/// # Errors
///
/// [`LoggerError::NotInitialized`] before [`init`]; otherwise as
/// [`Logger::notify`].
pub fn notify(
    message_type: &str,
    message: &str,
    context: Option<&str>,
    args: &[Arg<'_>],
) -> Result<()> {
    GLOBAL_LOGGER
        .get()
        .ok_or(LoggerError::NotInitialized)?
        .notify(message_type, message, context, args)
}

/// [`Logger::configure_from_env`] on the global logger. `None` before
/// [`init`] or when `LOG_LEVEL` is unset.
pub fn configure_from_env() -> Option<Severity> {
    GLOBAL_LOGGER.get()?.configure_from_env()
}
