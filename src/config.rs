//! Run configuration for the alternator.
//!
//! Configuration is programmatic only. The turn count and the emitted lines
//! are fixed constants in [`crate::role`]; what remains configurable is the
//! worker thread's name and the fault plan used by tests.

use crate::fault::FaultPlan;

/// Default name given to the worker thread.
pub const DEFAULT_WORKER_THREAD_NAME: &str = "routine";

/// Configuration for one alternation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternatorConfig {
    /// Name of the spawned worker thread.
    pub worker_thread_name: String,
    /// Faults to inject into the run.
    pub faults: FaultPlan,
}

impl Default for AlternatorConfig {
    fn default() -> Self {
        Self {
            worker_thread_name: DEFAULT_WORKER_THREAD_NAME.to_string(),
            faults: FaultPlan::new(),
        }
    }
}

impl AlternatorConfig {
    /// Sets the worker thread's name.
    #[must_use]
    pub fn worker_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker_thread_name = name.into();
        self
    }

    /// Sets the fault plan.
    #[must_use]
    pub fn faults(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }

    /// Validates the configuration for basic sanity.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.worker_thread_name.is_empty() {
            return Err(ConfigError::EmptyThreadName);
        }
        if self.worker_thread_name.contains('\0') {
            return Err(ConfigError::ThreadNameContainsNul);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Worker thread name is empty.
    #[error("worker thread name must not be empty")]
    EmptyThreadName,
    /// Worker thread name has an interior NUL byte.
    #[error("worker thread name must not contain NUL bytes")]
    ThreadNameContainsNul,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Turn;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn default_config_is_valid() {
        init_test("default_config_is_valid");
        let config = AlternatorConfig::default();
        let result = config.validate();
        crate::assert_with_log!(result.is_ok(), "default valid", "Ok", result);
        assert_eq!(config.worker_thread_name, "routine");
        crate::assert_with_log!(
            !config.faults.is_enabled(),
            "no faults",
            false,
            config.faults.is_enabled()
        );
        crate::test_complete!("default_config_is_valid");
    }

    #[test]
    fn rejects_bad_thread_names() {
        init_test("rejects_bad_thread_names");
        let empty = AlternatorConfig::default().worker_thread_name("");
        assert_eq!(empty.validate(), Err(ConfigError::EmptyThreadName));

        let nul = AlternatorConfig::default().worker_thread_name("rou\0tine");
        assert_eq!(nul.validate(), Err(ConfigError::ThreadNameContainsNul));
        crate::test_complete!("rejects_bad_thread_names");
    }

    #[test]
    fn builder_sets_faults() {
        init_test("builder_sets_faults");
        let plan = FaultPlan::new().fail_init(Turn::Worker);
        let config = AlternatorConfig::default().faults(plan.clone());
        crate::assert_with_log!(config.faults == plan, "faults set", plan, config.faults);
        crate::test_complete!("builder_sets_faults");
    }
}
