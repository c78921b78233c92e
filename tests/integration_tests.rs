//! Integration tests for the logger
//!
//! These tests verify:
//! - Severity filtering against a file sink
//! - Log injection prevention
//! - Notify dispatch and critical propagation
//! - Sink open failures
//! - Configuration round trips
//! - Thread safety

use notifyme::prelude::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn file_logger(
    temp_dir: &TempDir,
    name: &str,
    threshold: Severity,
) -> (Logger, std::path::PathBuf) {
    let log_file = temp_dir.path().join(name);
    let logger =
        Logger::create(threshold, Some(log_file.as_path())).expect("Failed to create logger");
    (logger, log_file)
}

#[test]
fn test_log_levels() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, log_file) = file_logger(&temp_dir, "levels_test.log", Severity::Warn);

    logger.info("Info message");
    logger.warn("Warn message");
    logger.error("Error message");
    let _ = logger.critical("Critical message");

    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(!content.contains("Info message"));
    assert!(content.contains("[WARN] Warn message"));
    assert!(content.contains("[ERROR] Error message"));
    assert!(content.contains("[CRITICAL] Critical message"));
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_line_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, log_file) = file_logger(&temp_dir, "format_test.log", Severity::Info);

    logger
        .emit(Severity::Warn, "queue depth %d", Some("worker-3"), &[&128])
        .expect("Failed to emit");
    logger.info("no context");
    drop(logger);

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let (timestamp, rest) = lines[0].split_once(' ').expect("timestamp separator");
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "not RFC 3339: {}",
        timestamp
    );
    assert_eq!(rest, "[WARN] queue depth 128 - worker-3");
    assert!(lines[1].ends_with("[INFO] no context - "));
}

#[test]
fn test_file_is_appended_not_truncated() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append_test.log");

    for run in 0..3 {
        let logger = Logger::with_file(Severity::Info, &log_file).expect("Failed to create logger");
        logger.info(format!("Run {}", run));
        logger.shutdown().expect("Failed to shut down");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 3);
    assert!(content.lines().next().unwrap().contains("Run 0"));
}

#[test]
fn test_sink_open_failure_is_an_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("no-such-dir").join("app.log");

    let err = Logger::create(Severity::Info, Some(log_file.as_path())).unwrap_err();

    assert!(matches!(err, LoggerError::SinkOpen { .. }));
}

#[test]
fn test_builder_file_destination() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("builder_test.log");

    let logger = Logger::builder()
        .level(Severity::Error)
        .file(&log_file)
        .build()
        .expect("Failed to build logger");
    assert_eq!(logger.sink_name(), "file");

    logger.warn("dropped");
    logger.error("kept");
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("kept"));
    assert!(!content.contains("dropped"));
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, log_file) = file_logger(&temp_dir, "injection_test.log", Severity::Info);

    let malicious_message = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    logger.info(malicious_message);
    logger.log_with_context(Severity::Info, "tab\tin context", "ctx\nsplit");

    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert!(content.contains("\\t"));
    assert!(!content.contains("\nERROR [2024-10-17] Fake error injected\n"));

    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2, "Each record should be a single line");
}

#[test]
fn test_notify_critical_returns_message() {
    let capture = MemorySink::new();
    let logger = Logger::with_sink(Severity::Info, Box::new(capture.clone()));

    let err = logger.notify("Critical", "disk full", None, &[]).unwrap_err();

    assert_eq!(err.to_string(), "disk full");
    let lines = capture.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("CRITICAL"));
    assert!(lines[0].contains("disk full"));
}

#[test]
fn test_critical_error_returned_when_write_fails() {
    struct ClosedSink;

    impl Sink for ClosedSink {
        fn write_line(&mut self, _line: &str) -> Result<()> {
            Err(LoggerError::write(
                "closed",
                std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
            ))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "closed"
        }
    }

    let logger = Logger::with_sink(Severity::Info, Box::new(ClosedSink));

    let err = logger.notify("Critical", "still an error", None, &[]).unwrap_err();

    assert!(err.is_critical());
    assert_eq!(err.to_string(), "still an error");
    assert_eq!(logger.metrics().write_failures(), 1);

    let err = logger.notify("Warn", "write failure surfaces", None, &[]).unwrap_err();
    assert!(matches!(err, LoggerError::Write { .. }));
}

#[test]
fn test_notify_bogus_tag() {
    for (threshold, expected_lines) in [
        (Severity::Info, 1),
        (Severity::Warn, 1),
        (Severity::Error, 1),
        (Severity::Critical, 0),
    ] {
        let capture = MemorySink::new();
        let logger = Logger::with_sink(threshold, Box::new(capture.clone()));

        let err = logger.notify("Bogus", "x", None, &[]).unwrap_err();

        assert!(matches!(err, LoggerError::UnrecognizedMessageType(_)));
        assert_eq!(capture.len(), expected_lines, "threshold {}", threshold);
        if expected_lines == 1 {
            let lines = capture.lines();
            assert!(lines[0].contains("[ERROR]"));
            assert!(lines[0].contains("Bogus"));
        }
    }
}

#[test]
fn test_configuration_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    for level in Severity::ALL {
        let (logger, _) = file_logger(&temp_dir, "round_trip.log", level);

        let json = logger.to_json().expect("Failed to serialize");
        let restored = Logger::from_json(&json).expect("Failed to deserialize");

        assert_eq!(restored.level(), level);
        assert_eq!(restored.sink_name(), "stdout");
    }
}

#[test]
fn test_serde_json_value_round_trip() {
    let logger = Logger::new(Severity::Warn);

    let value = serde_json::to_value(&logger).expect("Failed to serialize");
    assert_eq!(value, serde_json::json!({ "level": 1 }));

    let restored: Logger = serde_json::from_value(value).expect("Failed to deserialize");
    assert_eq!(restored.level(), Severity::Warn);
}

#[test]
fn test_concurrent_logging() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let (logger, log_file) = file_logger(&temp_dir, "concurrent_test.log", Severity::Info);
    let logger = Arc::new(logger);

    let mut handles = vec![];
    for thread_id in 0..5 {
        let logger_clone = Arc::clone(&logger);
        let handle = std::thread::spawn(move || {
            for i in 0..10 {
                logger_clone.info(format!("Thread {} - Message {}", thread_id, i));
            }
        });
        handles.push(handle);
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 50, "Should have 50 log entries from 5 threads * 10 messages");
    for line in lines {
        assert!(line.contains("[INFO] Thread "), "torn line: {}", line);
        assert!(line.ends_with(" - "), "torn line: {}", line);
    }
}
