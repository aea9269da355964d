//! Synchronization primitives for the alternation protocol.
//!
//! # Primitives
//!
//! - [`Semaphore`]: blocking counting semaphore with an abort path
//!   ([`Semaphore::close`]) so a failed peer never strands a waiter

mod semaphore;

pub use semaphore::{SEM_VALUE_MAX, Semaphore, SemaphoreError, SemaphoreOp};
