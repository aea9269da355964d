//! Shared helpers for integration tests.

#![allow(dead_code, unused_macros)]

use alternator::Role;

pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// The first `lines` lines of a clean run: worker first, strictly alternating.
pub fn alternating(lines: usize) -> Vec<String> {
    [Role::Worker, Role::Caller]
        .iter()
        .cycle()
        .take(lines)
        .map(|role| role.line().to_string())
        .collect()
}

/// Phase tracking macro for structured test logging.
macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(test = $name, "=== TEST START ===");
    };
}

/// Section marker inside a test.
macro_rules! test_section {
    ($name:expr) => {
        tracing::info!(section = $name, "--- section ---");
    };
}

/// Marks the successful end of a test.
macro_rules! test_complete {
    ($name:expr) => {
        tracing::info!(test = $name, "=== TEST COMPLETE ===");
    };
    ($name:expr, $($field:tt)+) => {
        tracing::info!(test = $name, $($field)+, "=== TEST COMPLETE ===");
    };
}

/// Assertion with logging for better test output.
macro_rules! assert_with_log {
    ($cond:expr, $msg:expr, $expected:expr, $actual:expr) => {
        if !$cond {
            tracing::error!(
                assertion = $msg,
                expected = ?$expected,
                actual = ?$actual,
                "Assertion failed"
            );
        }
        assert!($cond, "{}: expected {:?}, got {:?}", $msg, $expected, $actual);
    };
}
