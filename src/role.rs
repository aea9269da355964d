//! The two fixed participants and their turn semaphores.

use std::fmt;

/// Number of turns each role takes.
pub const ITERATIONS: u32 = 10;

/// Line emitted by the worker on each of its turns.
pub const WORKER_LINE: &str = "routine";

/// Line emitted by the caller on each of its turns.
pub const CALLER_LINE: &str = "main";

/// One of the two participants in the alternation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Runs on the spawned thread and speaks first.
    Worker,
    /// Runs on the thread that started the alternation.
    Caller,
}

impl Role {
    /// The line this role emits per turn.
    #[must_use]
    pub const fn line(self) -> &'static str {
        match self {
            Self::Worker => WORKER_LINE,
            Self::Caller => CALLER_LINE,
        }
    }

    /// Operation name used in diagnostics for failures inside this role.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::Worker => "routine",
            Self::Caller => "main",
        }
    }

    /// The turn semaphore this role waits on.
    #[must_use]
    pub const fn own_turn(self) -> Turn {
        match self {
            Self::Worker => Turn::Worker,
            Self::Caller => Turn::Caller,
        }
    }

    /// The turn semaphore this role posts after acting.
    #[must_use]
    pub const fn next_turn(self) -> Turn {
        match self {
            Self::Worker => Turn::Caller,
            Self::Caller => Turn::Worker,
        }
    }

    /// The other participant.
    #[must_use]
    pub const fn peer(self) -> Self {
        match self {
            Self::Worker => Self::Caller,
            Self::Caller => Self::Worker,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// Identifies one of the two turn semaphores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Permission for the worker to act. Starts ready.
    Worker,
    /// Permission for the caller to act. Starts blocked.
    Caller,
}

impl Turn {
    /// Initial count of this turn's semaphore.
    #[must_use]
    pub const fn initial_permits(self) -> usize {
        match self {
            Self::Worker => 1,
            Self::Caller => 0,
        }
    }

    /// The role that waits on this turn.
    #[must_use]
    pub const fn owner(self) -> Role {
        match self {
            Self::Worker => Role::Worker,
            Self::Caller => Role::Caller,
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Worker => f.write_str("worker turn"),
            Self::Caller => f.write_str("caller turn"),
        }
    }
}
