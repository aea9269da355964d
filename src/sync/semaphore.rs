//! Blocking counting semaphore.
//!
//! `wait` blocks the calling thread until the count is positive and then
//! decrements it. `post` increments the count and wakes one blocked waiter.
//! Visibility is limited to the threads of one process.
//!
//! Closing a semaphore fails every pending and future `wait` and `post`
//! with [`SemaphoreError::Closed`]. The alternation protocol uses this to
//! abort: a thread that hits a failure closes both turn semaphores so its
//! peer cannot block forever on a turn that will never come.
//!
//! # Example
//!
//! ```
//! use alternator::sync::Semaphore;
//!
//! let sem = Semaphore::new(1).expect("init");
//! sem.wait().expect("wait");
//! assert_eq!(sem.value(), 0);
//! sem.post().expect("post");
//! assert_eq!(sem.value(), 1);
//! ```

use parking_lot::{Condvar, Mutex};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Largest count a semaphore may hold.
pub const SEM_VALUE_MAX: usize = i32::MAX as usize;

/// Semaphore operation, used to tag injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemaphoreOp {
    /// Creation with an initial count.
    Init,
    /// Blocking decrement.
    Wait,
    /// Increment and wake.
    Post,
    /// Final release.
    Destroy,
}

impl fmt::Display for SemaphoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("sem_init"),
            Self::Wait => f.write_str("sem_wait"),
            Self::Post => f.write_str("sem_post"),
            Self::Destroy => f.write_str("sem_destroy"),
        }
    }
}

/// Error returned by semaphore operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SemaphoreError {
    /// Initial count above [`SEM_VALUE_MAX`].
    #[error("invalid argument: initial value {value} exceeds {max}")]
    InvalidValue {
        /// Requested initial count.
        value: usize,
        /// Largest permitted count.
        max: usize,
    },
    /// Posting would push the count past [`SEM_VALUE_MAX`].
    #[error("value too large for defined data type")]
    Overflow,
    /// `try_wait` found a zero count.
    #[error("resource temporarily unavailable")]
    WouldBlock,
    /// The semaphore was closed.
    #[error("semaphore closed")]
    Closed,
    /// Failure produced by a fault plan.
    #[error("injected {0} failure")]
    Injected(SemaphoreOp),
}

impl SemaphoreError {
    /// Returns true if this error only reports that the semaphore was closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[derive(Debug)]
struct SemaphoreState {
    /// Current count.
    permits: usize,
    /// Whether the semaphore is closed.
    closed: bool,
    /// Threads blocked in `wait`.
    waiters: usize,
}

/// A blocking counting semaphore.
#[derive(Debug)]
pub struct Semaphore {
    state: Mutex<SemaphoreState>,
    available: Condvar,
    /// Lock-free shadow of the count for diagnostics.
    permits_shadow: AtomicUsize,
    /// Lock-free shadow of the closed flag.
    closed_shadow: AtomicBool,
}

impl Semaphore {
    /// Creates a semaphore holding `initial` permits.
    pub fn new(initial: usize) -> Result<Self, SemaphoreError> {
        if initial > SEM_VALUE_MAX {
            return Err(SemaphoreError::InvalidValue {
                value: initial,
                max: SEM_VALUE_MAX,
            });
        }
        Ok(Self {
            state: Mutex::new(SemaphoreState {
                permits: initial,
                closed: false,
                waiters: 0,
            }),
            available: Condvar::new(),
            permits_shadow: AtomicUsize::new(initial),
            closed_shadow: AtomicBool::new(false),
        })
    }

    /// Returns the current count.
    ///
    /// Advisory only: the value may be stale by the time the caller reads it.
    #[must_use]
    pub fn value(&self) -> usize {
        self.permits_shadow.load(Ordering::Relaxed)
    }

    /// Returns true once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed_shadow.load(Ordering::Acquire)
    }

    /// Returns the number of threads currently blocked in [`wait`](Self::wait).
    #[must_use]
    pub fn waiters(&self) -> usize {
        self.state.lock().waiters
    }

    /// Blocks until the count is positive, then decrements it.
    pub fn wait(&self) -> Result<(), SemaphoreError> {
        let mut state = self.state.lock();
        if state.permits == 0 && !state.closed {
            state.waiters += 1;
            while state.permits == 0 && !state.closed {
                self.available.wait(&mut state);
            }
            state.waiters -= 1;
        }
        if state.closed {
            return Err(SemaphoreError::Closed);
        }
        state.permits -= 1;
        self.permits_shadow.store(state.permits, Ordering::Relaxed);
        Ok(())
    }

    /// Decrements the count if it is positive, without blocking.
    pub fn try_wait(&self) -> Result<(), SemaphoreError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SemaphoreError::Closed);
        }
        if state.permits == 0 {
            return Err(SemaphoreError::WouldBlock);
        }
        state.permits -= 1;
        self.permits_shadow.store(state.permits, Ordering::Relaxed);
        Ok(())
    }

    /// Increments the count and wakes one blocked waiter.
    pub fn post(&self) -> Result<(), SemaphoreError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SemaphoreError::Closed);
        }
        if state.permits >= SEM_VALUE_MAX {
            return Err(SemaphoreError::Overflow);
        }
        state.permits += 1;
        self.permits_shadow.store(state.permits, Ordering::Relaxed);
        let wake = state.waiters > 0;
        drop(state);
        if wake {
            self.available.notify_one();
        }
        Ok(())
    }

    /// Closes the semaphore and wakes every waiter with [`SemaphoreError::Closed`].
    ///
    /// Closing twice is a no-op.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.closed_shadow.store(true, Ordering::Release);
        drop(state);
        self.available.notify_all();
    }

    /// Consumes the semaphore and returns its final count.
    ///
    /// Taking `self` by value means no thread can still be waiting on it.
    #[must_use]
    pub fn destroy(self) -> usize {
        self.state.into_inner().permits
    }
}
