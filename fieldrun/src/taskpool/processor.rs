//! Single-job execution with cancellation and panic containment.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinError;

use crate::log::Logger;
use crate::taskpool::cancel::CancelFlag;
use crate::taskpool::clock::Clock;
use crate::taskpool::job::Job;
use crate::{log_debug, log_error, log_trace, log_warn};

/// Runs one job body to completion, cancellation, or abandonment.
///
/// The body executes in its own task so that a panic inside untrusted
/// plugin code is contained: it surfaces as a join error here and is
/// logged as a job failure, never as a worker exit.
///
/// If the cancel flag transitions while the job is running, the job is
/// given `cancel_wait_duration` to finish voluntarily. After that the
/// task is abandoned: it keeps running detached and its eventual
/// completion is ignored.
pub(crate) async fn process(
    logger: &Arc<dyn Logger>,
    job_id: &str,
    job: Box<dyn Job>,
    cancel_flag: CancelFlag,
    cancel_wait_duration: Duration,
    clock: &Arc<dyn Clock>,
) {
    let mut job_task = tokio::spawn(job.run(cancel_flag.clone()));

    tokio::select! {
        result = &mut job_task => {
            log_outcome(logger, job_id, result);
        }
        state = cancel_flag.wait() => {
            log_debug!(
                logger,
                "job {job_id} observed {state}; waiting up to {cancel_wait_duration:?} for it to finish"
            );
            tokio::select! {
                result = &mut job_task => {
                    log_outcome(logger, job_id, result);
                }
                _ = clock.after(cancel_wait_duration) => {
                    log_warn!(
                        logger,
                        "job {job_id} did not return within {cancel_wait_duration:?} after {state}; abandoning it"
                    );
                }
            }
        }
    }
}

fn log_outcome(logger: &Arc<dyn Logger>, job_id: &str, result: Result<(), JoinError>) {
    match result {
        Ok(()) => log_trace!(logger, "job {job_id} returned"),
        Err(join_error) if join_error.is_panic() => {
            log_error!(logger, "job {job_id} panicked: {join_error}");
        }
        Err(join_error) => {
            log_error!(logger, "job {job_id} task ended abnormally: {join_error}");
        }
    }
}
