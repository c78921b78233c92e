//! Basic logger usage example
//!
//! Demonstrates severity filtering, message-type dispatch, environment
//! configuration and critical errors.
//!
//! Run with: cargo run --example basic_usage

use notifyme::prelude::*;
use notifyme::{critical, info};
use std::sync::Arc;

fn check_disk(logger: &Logger, free_percent: u32) -> Result<()> {
    if free_percent < 5 {
        return Err(critical!(logger, "disk almost full: {}% free", free_percent));
    }
    info!(logger, "disk ok: {}% free", free_percent);
    Ok(())
}

fn main() -> Result<()> {
    println!("=== notifyme - Basic Usage Example ===\n");

    let logger = Arc::new(Logger::new(Severity::Info));

    println!("1. Logging at different levels:");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");
    let _ = logger.critical("This is a critical message");

    println!("\n2. Raising the threshold to ERROR:");
    logger.set_level(Severity::Error);
    logger.info("Info message (hidden)");
    logger.warn("Warning message (hidden)");
    logger.error("Error message (visible)");

    println!("\n3. Dispatching on message-type tags:");
    logger.set_level(Severity::Info);
    logger.notify("Warn", "cache hit rate %d%%", Some("cache"), &[&72])?;
    if let Err(e) = logger.notify("Verbose", "unknown tag", None, &[]) {
        println!("   notify returned: {}", e);
    }

    println!("\n4. Critical conditions come back as errors:");
    if let Err(e) = check_disk(&logger, 3) {
        println!("   propagated: {}", e);
    }

    println!("\n5. LOG_LEVEL from the environment:");
    match logger.configure_from_env() {
        Some(level) => println!("   threshold set to {}", level),
        None => println!("   LOG_LEVEL not set, threshold stays {}", logger.level()),
    }

    println!("\n6. Persisted configuration: {}", logger.to_json()?);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
