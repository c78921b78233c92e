//! Property-based tests for notifyme using proptest

use notifyme::prelude::*;
use notifyme::{format_message, level_from_env_value};
use proptest::prelude::*;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Info),
        Just(Severity::Warn),
        Just(Severity::Error),
        Just(Severity::Critical),
    ]
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    /// Ordering of the enum matches ordering of the integer values
    #[test]
    fn test_severity_ordering(level1 in any_severity(), level2 in any_severity()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Integer conversion accepts exactly 0..=3
    #[test]
    fn test_severity_from_integer(value in -10i64..10) {
        let parsed = Severity::try_from(value);
        prop_assert_eq!(parsed.is_ok(), (0..=3).contains(&value));
        if let Ok(level) = parsed {
            prop_assert_eq!(level as i64, value);
        }
    }

    /// Any LOG_LEVEL value that is not an exact name maps to Error
    #[test]
    fn test_env_value_fallback(value in "\\PC*") {
        let expected = match value.as_str() {
            "INFO" => Severity::Info,
            "WARN" => Severity::Warn,
            "ERROR" => Severity::Error,
            "CRITICAL" => Severity::Critical,
            _ => Severity::Error,
        };
        prop_assert_eq!(level_from_env_value(&value), expected);
    }
}

// ============================================================================
// Filter Tests
// ============================================================================

proptest! {
    /// A message is written iff its severity is at or above the threshold
    #[test]
    fn test_emit_writes_iff_at_or_above_threshold(
        threshold in any_severity(),
        level in any_severity(),
        message in "[a-zA-Z0-9 ]{0,40}",
    ) {
        let capture = MemorySink::new();
        let logger = Logger::with_sink(threshold, Box::new(capture.clone()));

        let result = logger.emit(level, &message, None, &[]);

        prop_assert_eq!(capture.len(), usize::from(level >= threshold));
        prop_assert_eq!(result.is_err(), level == Severity::Critical);
    }

    /// set_level is observed by the next emit
    #[test]
    fn test_set_level_applies_to_next_emit(
        initial in any_severity(),
        updated in any_severity(),
        level in any_severity(),
    ) {
        let capture = MemorySink::new();
        let logger = Logger::with_sink(initial, Box::new(capture.clone()));

        logger.set_level(updated);
        logger.log(level, "probe");

        prop_assert_eq!(capture.len(), usize::from(level >= updated));
    }

    /// The persisted threshold survives a JSON round trip
    #[test]
    fn test_config_round_trip(level in any_severity()) {
        let logger = Logger::with_sink(level, Box::new(MemorySink::new()));
        let restored = Logger::from_json(&logger.to_json().unwrap()).unwrap();
        prop_assert_eq!(restored.level(), level);
    }
}

// ============================================================================
// Formatter Tests
// ============================================================================

proptest! {
    /// Arbitrary templates and arguments never panic
    #[test]
    fn test_format_never_panics(
        template in "\\PC{0,60}",
        args in prop::collection::vec("\\PC{0,10}", 0..5),
    ) {
        let refs: Vec<&dyn std::fmt::Display> =
            args.iter().map(|a| a as &dyn std::fmt::Display).collect();
        let _ = format_message(&template, &refs);
    }

    /// Templates without `%` pass through, with any unused arguments
    /// reported after them
    #[test]
    fn test_plain_template_reports_extra(
        template in "[a-z ]{0,30}",
        arg in "[a-z]{1,8}",
    ) {
        let formatted = format_message(&template, &[&arg]);
        prop_assert_eq!(formatted.into_owned(), format!("{}%!(EXTRA {})", template, arg));
    }

    /// Every logged record is exactly one line, whatever the message holds
    #[test]
    fn test_record_is_single_line(message in "\\PC*|[\\n\\r\\t]{1,5}") {
        let capture = MemorySink::new();
        let logger = Logger::with_sink(Severity::Info, Box::new(capture.clone()));

        logger.info(message);

        let lines = capture.lines();
        prop_assert_eq!(lines.len(), 1);
        prop_assert!(!lines[0].contains('\n'));
        prop_assert!(!lines[0].contains('\r'));
    }
}
