//! Bounded worker pool with graceful-then-forceful shutdown.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::log::Logger;
use crate::taskpool::cancel::JobState;
use crate::taskpool::clock::Clock;
use crate::taskpool::error::PoolError;
use crate::taskpool::job::{Job, JobToken};
use crate::taskpool::processor::process;
use crate::taskpool::store::JobStore;
use crate::{log_debug, log_trace};

/// A pool of jobs executed by a fixed set of workers.
///
/// Parallelism is bounded by the worker count: each worker services at
/// most one job at a time, and the queue between submitters and workers
/// holds a single in-flight token, so [`Pool::submit`] applies natural
/// backpressure when every worker is busy.
pub struct Pool {
    logger: Arc<dyn Logger>,
    n_workers: usize,
    cancel_duration: Duration,
    clock: Arc<dyn Clock>,
    job_store: Arc<JobStore>,
    inner: Mutex<PoolInner>,
    done_rx: tokio::sync::Mutex<mpsc::UnboundedReceiver<()>>,
}

/// Queue state guarded by the pool mutex.
///
/// `queue_tx` is dropped on shutdown; workers terminate exactly when
/// the queue is closed and drained.
struct PoolInner {
    queue_tx: Option<mpsc::Sender<Arc<JobToken>>>,
    is_shutdown: bool,
}

impl Pool {
    /// Creates a pool and starts `max_parallel` workers.
    ///
    /// `cancel_wait_duration` is how long a canceled job is given to
    /// finish voluntarily before it is abandoned.
    pub fn new(
        logger: Arc<dyn Logger>,
        max_parallel: usize,
        cancel_wait_duration: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (queue_tx, queue_rx) = mpsc::channel::<Arc<JobToken>>(1);
        let queue_rx = Arc::new(tokio::sync::Mutex::new(queue_rx));
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let job_store = Arc::new(JobStore::new());

        for i in 0..max_parallel {
            tokio::spawn(worker_loop(
                format!("worker-{i}"),
                logger.clone(),
                queue_rx.clone(),
                job_store.clone(),
                cancel_wait_duration,
                clock.clone(),
                done_tx.clone(),
            ));
        }

        Self {
            logger,
            n_workers: max_parallel,
            cancel_duration: cancel_wait_duration,
            clock,
            job_store,
            inner: Mutex::new(PoolInner {
                queue_tx: Some(queue_tx),
                is_shutdown: false,
            }),
            done_rx: tokio::sync::Mutex::new(done_rx),
        }
    }

    /// Schedules a job for execution.
    ///
    /// Fails with [`PoolError::DuplicateJob`] if a job with the same id
    /// is already tracked, and with [`PoolError::PoolShutDown`] after
    /// [`Pool::shutdown`]. When every worker is busy the call blocks
    /// until one frees up; callers that need non-blocking submission
    /// must layer their own queue above the pool.
    pub async fn submit(
        &self,
        logger: Arc<dyn Logger>,
        job_id: &str,
        job: impl Job,
    ) -> Result<(), PoolError> {
        self.submit_boxed(logger, job_id, Box::new(job)).await
    }

    /// Schedules an already-boxed job for execution.
    pub async fn submit_boxed(
        &self,
        logger: Arc<dyn Logger>,
        job_id: &str,
        job: Box<dyn Job>,
    ) -> Result<(), PoolError> {
        let token = Arc::new(JobToken::new(job_id, job, logger));

        // Insert first: a concurrent shutdown sweep will then find the
        // token and discard it in ShutDown state rather than forget it.
        self.job_store.add_job(job_id, token.clone())?;

        let queue_tx = {
            let inner = self.lock_inner();
            if inner.is_shutdown {
                None
            } else {
                inner.queue_tx.clone()
            }
        };

        let Some(queue_tx) = queue_tx else {
            self.job_store.delete_job(job_id);
            return Err(PoolError::PoolShutDown);
        };

        if queue_tx.send(token).await.is_err() {
            self.job_store.delete_job(job_id);
            return Err(PoolError::PoolShutDown);
        }
        Ok(())
    }

    /// Returns true if a job with the given id is tracked.
    pub fn has_job(&self, job_id: &str) -> bool {
        self.job_store.get_job(job_id).is_some()
    }

    /// Cancels the job with the given id.
    ///
    /// The token is removed first so repeated cancels return false, then
    /// its flag is set to Canceled. Termination is the job's
    /// responsibility; a job that ignores the flag is eventually
    /// abandoned by its worker.
    pub fn cancel(&self, job_id: &str) -> bool {
        match self.job_store.remove_job(job_id) {
            Some(token) => {
                token.cancel_flag().set(JobState::Canceled);
                true
            }
            None => false,
        }
    }

    /// Cancels all the jobs in this pool and shuts down the workers.
    ///
    /// Pending jobs transition to ShutDown and are discarded by workers
    /// at dequeue; the queue then closes so workers terminate once it
    /// drains. Idempotent.
    pub fn shutdown(&self) {
        self.shut_down_all();

        let mut inner = self.lock_inner();
        if !inner.is_shutdown {
            // Dropping the sender closes the queue once in-flight
            // submissions (which cloned it under this mutex) complete.
            inner.queue_tx = None;
            inner.is_shutdown = true;
        }
    }

    /// Calls [`Pool::shutdown`] and waits for the workers to exit.
    ///
    /// Teardown runs in three phases: at `t=0` pending jobs get
    /// ShutDown and the queue closes; if workers are still running at
    /// `t=timeout`, running jobs are flipped to Canceled and given the
    /// pool's cancel-wait grace; at `t=timeout + cancel_wait_duration`
    /// the wait gives up. Returns true iff every worker exited in time.
    pub async fn shutdown_and_wait(&self, timeout: Duration) -> bool {
        self.shutdown();

        let mut cancel_timer = self.clock.after(timeout);
        let mut exit_timer = self.clock.after(timeout + self.cancel_duration);
        let mut done_rx = self.done_rx.lock().await;
        let mut workers_running = self.n_workers;

        while workers_running > 0 {
            tokio::select! {
                done = done_rx.recv() => {
                    if done.is_none() {
                        // Every worker sender is gone; nothing left to wait for.
                        return true;
                    }
                    workers_running -= 1;
                    if workers_running == 0 {
                        log_debug!(self.logger, "pool shut down normally");
                        return true;
                    }
                    log_debug!(self.logger, "pool worker done; {workers_running} still running");
                }
                _ = &mut cancel_timer => {
                    log_debug!(
                        self.logger,
                        "pool shutdown timed out with {workers_running} workers still running; canceling jobs"
                    );
                    self.cancel_all();
                    cancel_timer = Box::pin(futures::future::pending());
                }
                _ = &mut exit_timer => {
                    log_debug!(
                        self.logger,
                        "pool teardown gave up with {workers_running} workers still running"
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Removes every tracked job and sets its flag to Canceled.
    fn cancel_all(&self) {
        for token in self.job_store.delete_all_jobs() {
            token.cancel_flag().set(JobState::Canceled);
        }
    }

    /// Removes every tracked job and sets its flag to ShutDown.
    fn shut_down_all(&self) {
        for token in self.job_store.delete_all_jobs() {
            token.cancel_flag().set(JobState::ShutDown);
        }
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, PoolInner> {
        self.inner.lock().expect("pool mutex poisoned")
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("n_workers", &self.n_workers)
            .field("cancel_duration", &self.cancel_duration)
            .field("tracked_jobs", &self.job_store.len())
            .finish_non_exhaustive()
    }
}

/// Worker loop: consume tokens until the queue closes and drains.
async fn worker_loop(
    name: String,
    logger: Arc<dyn Logger>,
    queue_rx: Arc<tokio::sync::Mutex<mpsc::Receiver<Arc<JobToken>>>>,
    job_store: Arc<JobStore>,
    cancel_wait_duration: Duration,
    clock: Arc<dyn Clock>,
    done_tx: mpsc::UnboundedSender<()>,
) {
    loop {
        let token = { queue_rx.lock().await.recv().await };
        let Some(token) = token else {
            break;
        };

        // Tokens canceled or shut down while queued are discarded.
        let state = token.cancel_flag().state();
        if state.is_terminal() {
            log_debug!(token.logger(), "{name}: discarding job {} in state {state}", token.id());
            continue;
        }

        let Some(job) = token.take_job() else {
            continue;
        };
        log_trace!(token.logger(), "{name}: starting job {}", token.id());
        process(
            token.logger(),
            token.id(),
            job,
            token.cancel_flag().clone(),
            cancel_wait_duration,
            &clock,
        )
        .await;
        job_store.delete_job(token.id());
    }

    log_debug!(logger, "{name} exiting");
    let _ = done_tx.send(());
}
