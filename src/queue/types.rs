//! Type definitions for the queue system
//!
//! Worker state, failure policy and the statistics snapshot returned
//! by [`ProQueue::stats`](crate::queue::ProQueue::stats).

use serde::Deserialize;
use std::fmt;

/// Lifecycle state of the worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Blocked until a value is pushed or shutdown is requested
    Waiting,
    /// Running callbacks on a value, no shutdown requested
    Processing,
    /// Shutdown requested, flushing the remaining backlog
    Draining,
    /// Thread function has returned
    Terminated,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Waiting => "waiting",
            WorkerState::Processing => "processing",
            WorkerState::Draining => "draining",
            WorkerState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// What the worker does when a callback panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Terminate the worker; `stop()` reports `CallbackFailure`
    #[default]
    Halt,
    /// Log the panic, count it and keep draining
    Continue,
}

/// Point-in-time counters for a queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Values accepted by `push`/`push_all`
    pub pushed: u64,
    /// Values that went through every callback
    pub processed: u64,
    /// Values removed with `pop` without being processed
    pub popped: u64,
    /// Callback invocations that panicked
    pub failed_callbacks: u64,
    /// Values waiting in storage
    pub pending: usize,
    /// Registered callbacks
    pub callbacks: usize,
    /// Current worker state
    pub state: WorkerState,
}
