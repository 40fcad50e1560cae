//! Job trait and the token that tracks a submitted job.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use crate::log::Logger;
use crate::taskpool::cancel::CancelFlag;

/// A unit of work submitted to the pool.
///
/// The pool treats the body as opaque: it does not inspect return
/// values, and side effects are the job's concern. The body receives the
/// job's [`CancelFlag`] and is expected to observe it at cooperative
/// checkpoints.
///
/// Implemented for any `FnOnce(CancelFlag) -> Future<Output = ()>`
/// closure, so call sites can submit async blocks directly.
pub trait Job: Send + 'static {
    /// Consumes the job and returns its body as a future.
    fn run(self: Box<Self>, cancel_flag: CancelFlag) -> Pin<Box<dyn Future<Output = ()> + Send>>;
}

impl<F, Fut> Job for F
where
    F: FnOnce(CancelFlag) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    fn run(self: Box<Self>, cancel_flag: CancelFlag) -> Pin<Box<dyn Future<Output = ()> + Send>> {
        Box::pin((*self)(cancel_flag))
    }
}

/// A submitted job with its associated bookkeeping.
///
/// One token exists per submitted job. The pool's store and queue share
/// the same token through an `Arc`; whichever worker dequeues it takes
/// the body out exactly once.
pub struct JobToken {
    id: String,
    job: Mutex<Option<Box<dyn Job>>>,
    cancel_flag: CancelFlag,
    logger: Arc<dyn Logger>,
}

impl JobToken {
    /// Creates a token for a freshly submitted job.
    pub fn new(id: &str, job: Box<dyn Job>, logger: Arc<dyn Logger>) -> Self {
        Self {
            id: id.to_string(),
            job: Mutex::new(Some(job)),
            cancel_flag: CancelFlag::new(),
            logger,
        }
    }

    /// The job id this token was submitted under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The cancellation flag shared with the job body.
    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel_flag
    }

    /// The logger attributed to this job.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Takes the job body out of the token. Returns `None` if it has
    /// already been taken.
    pub(crate) fn take_job(&self) -> Option<Box<dyn Job>> {
        self.job
            .lock()
            .expect("job token mutex poisoned")
            .take()
    }
}

impl std::fmt::Debug for JobToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobToken")
            .field("id", &self.id)
            .field("state", &self.cancel_flag.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::NoOpLogger;

    fn noop_job() -> Box<dyn Job> {
        Box::new(|_flag: CancelFlag| async {})
    }

    #[test]
    fn test_take_job_yields_body_once() {
        let token = JobToken::new("job-1", noop_job(), Arc::new(NoOpLogger));
        assert!(token.take_job().is_some());
        assert!(token.take_job().is_none());
    }

    #[test]
    fn test_token_starts_running() {
        let token = JobToken::new("job-1", noop_job(), Arc::new(NoOpLogger));
        assert_eq!(token.id(), "job-1");
        assert!(!token.cancel_flag().canceled());
    }

    #[tokio::test]
    async fn test_closure_job_runs() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = ran.clone();
        let job: Box<dyn Job> = Box::new(move |_flag: CancelFlag| async move {
            ran_clone.store(true, Ordering::SeqCst);
        });

        job.run(CancelFlag::new()).await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
