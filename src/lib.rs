//! Strict two-thread alternation over a pair of counting semaphores.
//!
//! Two fixed roles take turns: the worker ("routine") runs on a spawned
//! thread, the caller ("main") runs on the thread that invoked
//! [`Alternator::run`]. Each role waits on its own turn semaphore, emits
//! one line, then posts the other role's turn semaphore. The worker's turn
//! starts ready and the caller's turn starts blocked, so the worker always
//! speaks first.
//!
//! # Example
//!
//! ```
//! use alternator::{Alternator, AlternatorConfig, MemorySink};
//!
//! let sink = MemorySink::new();
//! let report = Alternator::new(AlternatorConfig::default())
//!     .run(&sink)
//!     .expect("alternation failed");
//!
//! assert_eq!(report.worker_turns, 10);
//! assert_eq!(sink.lines().first().map(String::as_str), Some("routine"));
//! ```
//!
//! # Failure model
//!
//! Every semaphore operation is checked. A failure on either side aborts
//! the protocol (both turn semaphores are closed so nobody blocks forever),
//! the worker is joined, and the root cause comes back as an [`Error`].
//! The `alternator` binary turns that into a single diagnostic line and a
//! nonzero exit status.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod alternator;
pub mod cli;
pub mod config;
pub mod error;
pub mod fault;
pub mod role;
pub mod sink;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_utils;

pub use alternator::{Alternator, RunReport, SharedContext};
pub use config::{AlternatorConfig, ConfigError};
pub use error::{Error, ErrorKind};
pub use fault::{FaultPlan, FaultPoint};
pub use role::{ITERATIONS, Role, Turn};
pub use sink::{LineSink, MemorySink, StdoutSink};
pub use sync::{Semaphore, SemaphoreError};
