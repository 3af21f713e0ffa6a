//! Shared queue state guarded by a single lock
//!
//! Storage, callback registry, shutdown flag and counters live in one
//! `QueueState` behind one `Mutex`. The worker sleeps on `work_ready`
//! until storage is non-empty or shutdown has been requested.

use crate::core::sync::{lock_or_recover, recover_poison};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::registry::{Callback, CallbackRegistry};
use crate::queue::types::{QueueStats, WorkerState};
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Everything the lock protects
#[derive(Debug)]
pub(crate) struct QueueState<T> {
    pub(crate) pending: VecDeque<T>,
    pub(crate) registry: CallbackRegistry<T>,
    pub(crate) shutdown_requested: bool,
    /// Set while the worker holds a value outside of `pending`
    pub(crate) in_flight: bool,
    pub(crate) worker_state: WorkerState,
    pub(crate) pushed: u64,
    pub(crate) processed: u64,
    pub(crate) popped: u64,
    pub(crate) failed_callbacks: u64,
}

impl<T> QueueState<T> {
    /// Values waiting plus the one being processed
    pub(crate) fn size(&self) -> usize {
        self.pending.len() + usize::from(self.in_flight)
    }

    /// State the worker settles in after finishing a value
    pub(crate) fn idle_state(&self) -> WorkerState {
        if self.shutdown_requested {
            WorkerState::Draining
        } else if self.pending.is_empty() {
            WorkerState::Waiting
        } else {
            WorkerState::Processing
        }
    }
}

/// A value handed to the worker together with the callbacks to run on it
pub(crate) struct WorkItem<T> {
    pub(crate) value: T,
    pub(crate) callbacks: Vec<Callback<T>>,
}

#[derive(Debug)]
pub(crate) struct Shared<T> {
    state: Mutex<QueueState<T>>,
    work_ready: Condvar,
}

impl<T> Shared<T> {
    pub(crate) fn new(registry: CallbackRegistry<T>) -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                registry,
                shutdown_requested: false,
                in_flight: false,
                worker_state: WorkerState::Waiting,
                pushed: 0,
                processed: 0,
                popped: 0,
                failed_callbacks: 0,
            }),
            work_ready: Condvar::new(),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        lock_or_recover(&self.state)
    }

    pub(crate) fn push(&self, value: T) {
        {
            let mut state = self.lock();
            if state.worker_state == WorkerState::Terminated {
                log::warn!("Value pushed after the worker terminated; it will not be processed");
            }
            state.pending.push_back(value);
            state.pushed += 1;
        }
        self.work_ready.notify_one();
    }

    pub(crate) fn push_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        // Drain the caller's iterator before locking; it may touch the queue
        let values: Vec<T> = values.into_iter().collect();
        let added = values.len();
        {
            let mut state = self.lock();
            state.pending.extend(values);
            state.pushed += added as u64;
            if added > 0 && state.worker_state == WorkerState::Terminated {
                log::warn!(
                    "{} values pushed after the worker terminated; they will not be processed",
                    added
                );
            }
        }
        if added > 0 {
            self.work_ready.notify_one();
        }
    }

    pub(crate) fn pop(&self) -> QueueResult<T> {
        let mut state = self.lock();
        let value = state
            .pending
            .pop_front()
            .ok_or(QueueError::EmptyQueueAccess)?;
        state.popped += 1;
        Ok(value)
    }

    /// Set the shutdown flag, then wake the worker
    ///
    /// Returns `true` the first time it is called.
    pub(crate) fn request_shutdown(&self) -> bool {
        let first = {
            let mut state = self.lock();
            let first = !state.shutdown_requested;
            state.shutdown_requested = true;
            if state.worker_state != WorkerState::Terminated {
                state.worker_state = WorkerState::Draining;
            }
            first
        };
        self.work_ready.notify_all();
        first
    }

    /// Block until there is work, then hand out the head value
    ///
    /// Removing the head, snapshotting the callbacks and marking the value
    /// in flight happen in one critical section. Returns `None` once
    /// shutdown has been requested and storage is empty; the state is then
    /// `Terminated`.
    pub(crate) fn next_item(&self) -> Option<WorkItem<T>> {
        let state = self.lock();
        let mut state = recover_poison(
            self.work_ready
                .wait_while(state, |s| s.pending.is_empty() && !s.shutdown_requested),
        );

        match state.pending.pop_front() {
            Some(value) => {
                state.in_flight = true;
                state.worker_state = if state.shutdown_requested {
                    WorkerState::Draining
                } else {
                    WorkerState::Processing
                };
                Some(WorkItem {
                    value,
                    callbacks: state.registry.snapshot(),
                })
            }
            None => {
                state.worker_state = WorkerState::Terminated;
                None
            }
        }
    }

    /// Record the outcome of one processing step
    pub(crate) fn finish_item(&self, failed_callbacks: u64) {
        let mut state = self.lock();
        state.in_flight = false;
        state.processed += 1;
        state.failed_callbacks += failed_callbacks;
        state.worker_state = state.idle_state();
    }

    /// Record a callback failure that terminates the worker
    pub(crate) fn abort_item(&self) {
        let mut state = self.lock();
        state.in_flight = false;
        state.failed_callbacks += 1;
        state.worker_state = WorkerState::Terminated;
    }

    pub(crate) fn stats(&self) -> QueueStats {
        let state = self.lock();
        QueueStats {
            pushed: state.pushed,
            processed: state.processed,
            popped: state.popped,
            failed_callbacks: state.failed_callbacks,
            pending: state.pending.len(),
            callbacks: state.registry.len(),
            state: state.worker_state,
        }
    }
}
