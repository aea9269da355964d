//! Two-thread alternation over a pair of turn semaphores.
//!
//! [`Alternator::run`] creates the worker's turn (count 1) and the caller's
//! turn (count 0), spawns the worker on a scoped thread, and runs the
//! caller's loop on the current thread. Each role repeats [`ITERATIONS`]
//! times: wait on its own turn, emit its line, post the peer's turn.
//!
//! # Failure handling
//!
//! - Setup failures (`initSem`, `initContext`, spawn) return before any
//!   line is emitted.
//! - A worker failure is recorded in the shared context's failure slot,
//!   then the worker aborts the protocol and returns early.
//! - A caller failure aborts the protocol, joins the worker and returns.
//! - Aborting closes both turns, so the peer's pending wait fails with
//!   `Closed` instead of blocking forever. That `Closed` is a consequence,
//!   and the root cause recorded by the failing side is what gets reported.
//! - A failed join is fatal and returns before the semaphores are released.
//! - Release happens only after a successful join, worker's turn first.

use parking_lot::Mutex;
use std::io;
use std::thread;

use crate::config::AlternatorConfig;
use crate::error::{Error, ErrorKind};
use crate::fault::{FaultPlan, FaultPoint};
use crate::role::{ITERATIONS, Role, Turn};
use crate::sink::LineSink;
use crate::sync::{Semaphore, SemaphoreError, SemaphoreOp};

const INIT_SEM: &str = "initSem";
const INIT_CONTEXT: &str = "initContext";
const RELEASE_RESOURCES: &str = "releaseResources";

/// Turn semaphores plus the worker's failure slot.
///
/// Owned by the caller thread and borrowed by the worker, so it always
/// outlives the worker. The failure slot is written only by the worker and
/// read only after the worker has been joined.
#[derive(Debug)]
pub struct SharedContext {
    worker_turn: Semaphore,
    caller_turn: Semaphore,
    worker_failure: Mutex<Option<Error>>,
}

impl SharedContext {
    /// Bundles two turn semaphores into a context.
    ///
    /// The worker's turn must hold exactly one permit and the caller's turn
    /// none, and neither may be closed. Anything else cannot establish
    /// worker-first alternation and is rejected as an argument error.
    pub fn new(worker_turn: Semaphore, caller_turn: Semaphore) -> Result<Self, Error> {
        if worker_turn.is_closed() || caller_turn.is_closed() {
            return Err(Error::argument(INIT_CONTEXT, "turn semaphore already closed"));
        }
        let (worker_permits, caller_permits) = (worker_turn.value(), caller_turn.value());
        if worker_permits != Turn::Worker.initial_permits()
            || caller_permits != Turn::Caller.initial_permits()
        {
            return Err(Error::argument(
                INIT_CONTEXT,
                format!(
                    "turn counts must start at 1/0, got {worker_permits}/{caller_permits}"
                ),
            ));
        }
        Ok(Self {
            worker_turn,
            caller_turn,
            worker_failure: Mutex::new(None),
        })
    }

    /// Creates both turn semaphores and bundles them.
    pub fn init(faults: &FaultPlan) -> Result<Self, Error> {
        let worker_turn = create_turn(Turn::Worker, faults)?;
        let caller_turn = create_turn(Turn::Caller, faults)?;
        Self::new(worker_turn, caller_turn)
    }

    /// Returns the semaphore for `turn`.
    #[must_use]
    pub fn turn(&self, turn: Turn) -> &Semaphore {
        match turn {
            Turn::Worker => &self.worker_turn,
            Turn::Caller => &self.caller_turn,
        }
    }

    /// Closes both turns, failing every pending and future wait or post.
    pub fn abort(&self) {
        self.worker_turn.close();
        self.caller_turn.close();
    }

    /// Returns true once either turn has been closed.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.worker_turn.is_closed() || self.caller_turn.is_closed()
    }

    /// Stores the worker's failure. The first failure wins.
    fn record_worker_failure(&self, err: Error) {
        let mut slot = self.worker_failure.lock();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    /// Takes the worker's recorded failure, if any.
    ///
    /// Only meaningful after the worker has been joined.
    pub fn take_worker_failure(&self) -> Option<Error> {
        self.worker_failure.lock().take()
    }

    /// Destroys both turns, the worker's first.
    pub fn release(self, faults: &FaultPlan) -> Result<(), Error> {
        let Self {
            worker_turn,
            caller_turn,
            ..
        } = self;
        for (turn, semaphore) in [(Turn::Worker, worker_turn), (Turn::Caller, caller_turn)] {
            if faults.should_fail(FaultPoint::Destroy(turn)) {
                return Err(Error::semaphore(
                    RELEASE_RESOURCES,
                    SemaphoreError::Injected(SemaphoreOp::Destroy),
                ));
            }
            let last = semaphore.destroy();
            tracing::debug!(turn = %turn, final_count = last, "turn semaphore destroyed");
        }
        Ok(())
    }
}

fn create_turn(turn: Turn, faults: &FaultPlan) -> Result<Semaphore, Error> {
    if faults.should_fail(FaultPoint::Init(turn)) {
        return Err(Error::semaphore(
            INIT_SEM,
            SemaphoreError::Injected(SemaphoreOp::Init),
        ));
    }
    Semaphore::new(turn.initial_permits()).map_err(|err| Error::semaphore(INIT_SEM, err))
}

/// Closes both turns if the owning thread unwinds, so a panic on one side
/// never leaves the other blocked.
struct AbortOnUnwind<'a>(&'a SharedContext);

impl Drop for AbortOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abort();
        }
    }
}

/// How the worker thread ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerExit {
    Completed { turns: u32 },
    Aborted,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Turns taken by the worker.
    pub worker_turns: u32,
    /// Turns taken by the caller.
    pub caller_turns: u32,
}

impl RunReport {
    /// Total number of lines emitted.
    #[must_use]
    pub const fn total_lines(&self) -> u32 {
        self.worker_turns + self.caller_turns
    }
}

/// Runs the two-role alternation.
#[derive(Debug, Clone, Default)]
pub struct Alternator {
    config: AlternatorConfig,
}

impl Alternator {
    /// Creates an alternator with the given configuration.
    #[must_use]
    pub fn new(config: AlternatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &AlternatorConfig {
        &self.config
    }

    /// Runs both roles to completion, emitting every line into `sink`.
    pub fn run<S: LineSink + ?Sized>(&self, sink: &S) -> Result<RunReport, Error> {
        self.config
            .validate()
            .map_err(|err| Error::configuration(Role::Caller.operation(), err))?;
        let faults = &self.config.faults;
        let context = SharedContext::init(faults)?;
        tracing::debug!("turn semaphores initialized");

        let (caller, joined) = thread::scope(|scope| {
            let ctx = &context;
            let spawned = if faults.should_fail(FaultPoint::Spawn) {
                Err(io::Error::other("injected thread spawn failure"))
            } else {
                thread::Builder::new()
                    .name(self.config.worker_thread_name.clone())
                    .spawn_scoped(scope, move || routine(ctx, faults, sink))
            };
            let handle = spawned.map_err(|err| {
                Error::new(ErrorKind::Resource, Role::Caller.operation())
                    .with_message("thread spawn failed")
                    .with_source(err)
            })?;

            let caller = {
                let _guard = AbortOnUnwind(ctx);
                take_turns(Role::Caller, ctx, faults, sink)
            };
            if let Err(err) = &caller {
                tracing::warn!(
                role = %Role::Caller,
                peer = %Role::Caller.peer(),
                error = %err,
                "aborting alternation"
            );
                ctx.abort();
            }
            Ok::<_, Error>((caller, handle.join()))
        })?;

        let Ok(worker) = joined else {
            return Err(Error::new(ErrorKind::Resource, Role::Caller.operation())
                .with_message("thread join failed: worker panicked"));
        };
        let worker_failure = context.take_worker_failure();

        let caller_turns = match caller {
            Ok(turns) => turns,
            Err(err) if err.is_abort_consequence() => return Err(worker_failure.unwrap_or(err)),
            Err(err) => return Err(err),
        };
        if let Some(err) = worker_failure {
            return Err(err);
        }
        let WorkerExit::Completed {
            turns: worker_turns,
        } = worker
        else {
            return Err(Error::new(ErrorKind::Resource, Role::Worker.operation())
                .with_message("worker aborted without recording a failure"));
        };

        context.release(faults)?;
        tracing::info!(worker_turns, caller_turns, "alternation complete");
        Ok(RunReport {
            worker_turns,
            caller_turns,
        })
    }
}

/// Worker entry point.
fn routine<S: LineSink + ?Sized>(
    context: &SharedContext,
    faults: &FaultPlan,
    sink: &S,
) -> WorkerExit {
    let _guard = AbortOnUnwind(context);
    if context.is_aborted() {
        context.record_worker_failure(
            Error::new(ErrorKind::Configuration, Role::Worker.operation())
                .with_message("shared context unavailable"),
        );
        return WorkerExit::Aborted;
    }
    if let Some(delay) = faults.worker_start_delay() {
        thread::sleep(delay);
    }

    match take_turns(Role::Worker, context, faults, sink) {
        Ok(turns) => WorkerExit::Completed { turns },
        Err(err) => {
            tracing::warn!(
                role = %Role::Worker,
                peer = %Role::Worker.peer(),
                error = %err,
                "aborting alternation"
            );
            context.record_worker_failure(err);
            context.abort();
            WorkerExit::Aborted
        }
    }
}

fn take_turns<S: LineSink + ?Sized>(
    role: Role,
    context: &SharedContext,
    faults: &FaultPlan,
    sink: &S,
) -> Result<u32, Error> {
    let operation = role.operation();
    let own = context.turn(role.own_turn());
    let next = context.turn(role.next_turn());

    for iteration in 0..ITERATIONS {
        if faults.should_fail(FaultPoint::Wait { role, iteration }) {
            return Err(Error::semaphore(
                operation,
                SemaphoreError::Injected(SemaphoreOp::Wait),
            ));
        }
        own.wait().map_err(|err| Error::semaphore(operation, err))?;

        sink.emit(role.line()).map_err(|err| Error::output(operation, err))?;
        tracing::debug!(role = %role, iteration, next = %role.next_turn().owner(), "turn taken");

        if faults.should_fail(FaultPoint::Post { role, iteration }) {
            return Err(Error::semaphore(
                operation,
                SemaphoreError::Injected(SemaphoreOp::Post),
            ));
        }
        next.post().map_err(|err| Error::semaphore(operation, err))?;
    }
    Ok(ITERATIONS)
}
