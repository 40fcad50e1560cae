//! Cooperative cancellation flag.
//!
//! Every submitted job gets a [`CancelFlag`]. The job body polls
//! [`CancelFlag::canceled`] / [`CancelFlag::shut_down`] at cooperative
//! checkpoints, or selects over [`CancelFlag::wait`] to cut short
//! blocking work. The flag is a monotone latch: once it leaves
//! [`JobState::Running`] it never goes back, and later transitions are
//! ignored.

use tokio::sync::watch;

/// Lifecycle state of a submitted job.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JobState {
    /// The job has not been canceled or shut down.
    #[default]
    Running,

    /// The job was canceled; it should stop as soon as it can.
    Canceled,

    /// The pool is shutting down; the job should stop and may skip
    /// cleanup that only matters for a live agent.
    ShutDown,
}

impl JobState {
    /// Returns true if this state is terminal (not Running).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Canceled => write!(f, "Canceled"),
            Self::ShutDown => write!(f, "ShutDown"),
        }
    }
}

/// Three-state latch a job cooperates with to observe cancellation.
///
/// Built on a `watch` channel so that any number of waiters unblock on
/// the single Running -> terminal transition. Clones share state.
#[derive(Clone, Debug)]
pub struct CancelFlag {
    state_tx: watch::Sender<JobState>,
}

impl CancelFlag {
    /// Creates a flag in the Running state.
    pub fn new() -> Self {
        let (state_tx, _) = watch::channel(JobState::Running);
        Self { state_tx }
    }

    /// Returns the current state.
    pub fn state(&self) -> JobState {
        *self.state_tx.borrow()
    }

    /// Returns true if the flag is in the Canceled state.
    pub fn canceled(&self) -> bool {
        self.state() == JobState::Canceled
    }

    /// Returns true if the flag is in the ShutDown state.
    pub fn shut_down(&self) -> bool {
        self.state() == JobState::ShutDown
    }

    /// Transitions out of Running into `state`.
    ///
    /// A no-op unless the flag is currently Running (and for
    /// `JobState::Running` itself, which is not a valid target). All
    /// pending and future [`wait`](Self::wait) calls observe the
    /// transition.
    pub fn set(&self, state: JobState) {
        if state == JobState::Running {
            return;
        }
        self.state_tx.send_if_modified(|current| {
            if *current == JobState::Running {
                *current = state;
                true
            } else {
                false
            }
        });
    }

    /// Waits until the flag leaves Running and returns the new state.
    ///
    /// Returns immediately if the flag has already transitioned.
    pub async fn wait(&self) -> JobState {
        let mut state_rx = self.state_tx.subscribe();
        let result = match state_rx.wait_for(|state| state.is_terminal()).await {
            Ok(state) => *state,
            // The sender lives in `self`, so the channel cannot close
            // while we are waiting; fall back to the current state.
            Err(_) => self.state(),
        };
        result
    }
}

impl Default for CancelFlag {
    fn default() -> Self {
        Self::new()
    }
}
