//! Error types for the job pool.

use thiserror::Error;

/// Errors returned by pool operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    /// A job with the same id is already tracked by the pool.
    #[error("a job with id {0} already exists")]
    DuplicateJob(String),

    /// The pool has been shut down and accepts no new jobs.
    #[error("the pool is shut down")]
    PoolShutDown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            PoolError::DuplicateJob("doc-1".to_string()).to_string(),
            "a job with id doc-1 already exists"
        );
        assert_eq!(PoolError::PoolShutDown.to_string(), "the pool is shut down");
    }
}
