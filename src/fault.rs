//! Deterministic fault injection for the alternation protocol.
//!
//! A [`FaultPlan`] names exact points in a run where a checked operation
//! should fail. Injected failures travel the same error paths as real ones,
//! which lets tests drive the worker's record-and-abort path, the caller's
//! fail-fast path, and the setup and shutdown failures without touching
//! the operating system.
//!
//! Iterations are zero-based: `fail_post(Role::Worker, 4)` fails the post
//! on the worker's fifth turn.
//!
//! # Example
//!
//! ```
//! use alternator::{FaultPlan, Role, Turn};
//!
//! let plan = FaultPlan::new()
//!     .fail_init(Turn::Caller)
//!     .fail_post(Role::Worker, 4);
//! assert!(plan.is_enabled());
//! ```

use std::time::Duration;

use crate::role::{Role, Turn};

/// A point in a run where a checked operation can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultPoint {
    /// Creating a turn semaphore.
    Init(Turn),
    /// Spawning the worker thread.
    Spawn,
    /// A role's wait on the given turn.
    Wait {
        /// Role performing the wait.
        role: Role,
        /// Zero-based turn index.
        iteration: u32,
    },
    /// A role's post after the given turn.
    Post {
        /// Role performing the post.
        role: Role,
        /// Zero-based turn index.
        iteration: u32,
    },
    /// Destroying a turn semaphore at shutdown.
    Destroy(Turn),
}

/// Set of fault points plus an optional start delay for the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaultPlan {
    points: Vec<FaultPoint>,
    worker_start_delay: Option<Duration>,
}

impl FaultPlan {
    /// A plan with no faults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: Vec::new(),
            worker_start_delay: None,
        }
    }

    /// Adds an arbitrary fault point.
    #[must_use]
    pub fn inject(mut self, point: FaultPoint) -> Self {
        if !self.points.contains(&point) {
            self.points.push(point);
        }
        self
    }

    /// Fails creation of the given turn semaphore.
    #[must_use]
    pub fn fail_init(self, turn: Turn) -> Self {
        self.inject(FaultPoint::Init(turn))
    }

    /// Fails spawning the worker thread.
    #[must_use]
    pub fn fail_spawn(self) -> Self {
        self.inject(FaultPoint::Spawn)
    }

    /// Fails `role`'s wait on turn `iteration`.
    #[must_use]
    pub fn fail_wait(self, role: Role, iteration: u32) -> Self {
        self.inject(FaultPoint::Wait { role, iteration })
    }

    /// Fails `role`'s post after turn `iteration`.
    #[must_use]
    pub fn fail_post(self, role: Role, iteration: u32) -> Self {
        self.inject(FaultPoint::Post { role, iteration })
    }

    /// Fails destruction of the given turn semaphore.
    #[must_use]
    pub fn fail_destroy(self, turn: Turn) -> Self {
        self.inject(FaultPoint::Destroy(turn))
    }

    /// Sleeps on the worker thread before its first wait.
    #[must_use]
    pub fn delay_worker_start(mut self, delay: Duration) -> Self {
        self.worker_start_delay = Some(delay);
        self
    }

    /// Returns true if `point` should fail.
    #[must_use]
    pub fn should_fail(&self, point: FaultPoint) -> bool {
        self.points.contains(&point)
    }

    /// Delay the worker applies before its first wait, if any.
    #[must_use]
    pub fn worker_start_delay(&self) -> Option<Duration> {
        self.worker_start_delay
    }

    /// Returns true if the plan would change a run in any way.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.points.is_empty() || self.worker_start_delay.is_some()
    }
}
