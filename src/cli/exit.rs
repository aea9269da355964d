//! Exit codes for the alternator binary.
//!
//! The run either fully succeeds or fails fast, so there is exactly one
//! failure status. It matches the C library's `EXIT_FAILURE`.

/// Process exit codes.
pub struct ExitCode;

impl ExitCode {
    /// Both roles finished every turn and both semaphores were released.
    pub const SUCCESS: i32 = 0;

    /// Any fatal error: setup, thread create/join, or a checked operation.
    pub const FAILURE: i32 = 1;

    /// Get human-readable description of an exit code.
    #[must_use]
    pub const fn description(code: i32) -> &'static str {
        match code {
            0 => "success",
            1 => "fatal error",
            _ => "unknown",
        }
    }

    /// Check if an exit code indicates success (code 0).
    #[must_use]
    pub const fn is_success(code: i32) -> bool {
        code == Self::SUCCESS
    }

    /// Check if an exit code indicates any kind of failure (non-zero).
    #[must_use]
    pub const fn is_failure(code: i32) -> bool {
        code != Self::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn exit_codes_are_distinct() {
        init_test("exit_codes_are_distinct");
        crate::assert_with_log!(
            ExitCode::SUCCESS != ExitCode::FAILURE,
            "distinct codes",
            "0 != 1",
            (ExitCode::SUCCESS, ExitCode::FAILURE)
        );
        crate::test_complete!("exit_codes_are_distinct");
    }

    #[test]
    fn exit_code_descriptions() {
        init_test("exit_code_descriptions");
        let desc = ExitCode::description(ExitCode::SUCCESS);
        crate::assert_with_log!(desc == "success", "0 success", "success", desc);
        let desc = ExitCode::description(ExitCode::FAILURE);
        crate::assert_with_log!(desc == "fatal error", "1 fatal", "fatal error", desc);
        let desc = ExitCode::description(99);
        crate::assert_with_log!(desc == "unknown", "99 unknown", "unknown", desc);
        crate::test_complete!("exit_code_descriptions");
    }

    #[test]
    fn is_success_and_failure() {
        init_test("is_success_and_failure");
        let success0 = ExitCode::is_success(0);
        crate::assert_with_log!(success0, "success 0", true, success0);
        let success1 = ExitCode::is_success(1);
        crate::assert_with_log!(!success1, "success 1 false", false, success1);
        let failure0 = ExitCode::is_failure(0);
        crate::assert_with_log!(!failure0, "failure 0 false", false, failure0);
        let failure1 = ExitCode::is_failure(1);
        crate::assert_with_log!(failure1, "failure 1 true", true, failure1);
        crate::test_complete!("is_success_and_failure");
    }
}
