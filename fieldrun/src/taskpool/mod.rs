//! Bounded job pool with cooperative cancellation.
//!
//! This module schedules opaque jobs onto a fixed set of workers:
//!
//! - [`Pool`]: submission surface, lifecycle, graceful shutdown
//! - [`JobStore`]: tracking map of active job id -> token
//! - [`CancelFlag`]: three-state latch each job cooperates with
//! - [`Clock`]: injectable time source for the teardown timers
//!
//! # Execution Flow
//!
//! 1. [`Pool::submit`] wraps the job in a token with a fresh
//!    [`CancelFlag`] and enqueues it (blocking while all workers are
//!    busy)
//! 2. A worker dequeues the token, discards it if already canceled,
//!    otherwise runs the body in its own task (panics contained)
//! 3. [`Pool::cancel`] flips a job's flag; the body is expected to
//!    observe it at checkpoints and is abandoned after a grace period
//!    if it does not
//! 4. [`Pool::shutdown_and_wait`] drives the graceful-then-forceful
//!    teardown: ShutDown first, Cancel at the timeout, give up once the
//!    cancel grace has elapsed on top

mod cancel;
mod clock;
mod error;
mod job;
mod pool;
mod processor;
mod store;

pub use cancel::{CancelFlag, JobState};
pub use clock::{Clock, TokioClock};
pub use error::PoolError;
pub use job::{Job, JobToken};
pub use pool::Pool;
pub use store::JobStore;
