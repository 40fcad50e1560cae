//! Tracking store for active jobs.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::taskpool::error::PoolError;
use crate::taskpool::job::JobToken;

/// Concurrent map of active job id to job token.
///
/// The store sees one operation per job lifecycle event, so a single
/// mutex over a `HashMap` is sufficient. At most one token exists per id
/// at any time.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: Mutex<HashMap<String, Arc<JobToken>>>,
}

impl JobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a token if no job with the same id is tracked.
    pub fn add_job(&self, job_id: &str, token: Arc<JobToken>) -> Result<(), PoolError> {
        let mut jobs = self.lock();
        if jobs.contains_key(job_id) {
            return Err(PoolError::DuplicateJob(job_id.to_string()));
        }
        jobs.insert(job_id.to_string(), token);
        Ok(())
    }

    /// Returns the token for `job_id`, if tracked.
    pub fn get_job(&self, job_id: &str) -> Option<Arc<JobToken>> {
        self.lock().get(job_id).cloned()
    }

    /// Atomically removes and returns the token for `job_id`.
    pub fn remove_job(&self, job_id: &str) -> Option<Arc<JobToken>> {
        self.lock().remove(job_id)
    }

    /// Removes the token for `job_id`. Idempotent.
    pub fn delete_job(&self, job_id: &str) {
        self.lock().remove(job_id);
    }

    /// Atomically drains the store, returning a snapshot of every
    /// tracked token.
    pub fn delete_all_jobs(&self) -> Vec<Arc<JobToken>> {
        self.lock().drain().map(|(_, token)| token).collect()
    }

    /// Number of tracked jobs.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no jobs are tracked.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Arc<JobToken>>> {
        self.jobs.lock().expect("job store mutex poisoned")
    }
}
