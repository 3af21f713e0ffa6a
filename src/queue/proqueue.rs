//! ProQueue - asynchronous value queue with a dedicated worker thread
//!
//! Producers push values from any thread. A single worker thread takes
//! them in FIFO order and runs every registered callback on each value
//! before discarding it.

use crate::core::sync::{lock_or_recover, panic_message};
use crate::queue::builder::ProQueueBuilder;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::Shared;
use crate::queue::registry::Callback;
use crate::queue::types::{FailurePolicy, QueueStats, WorkerState};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle, ThreadId};

/// Asynchronous processing queue
///
/// The queue owns its worker thread. Dropping the queue stops it: the
/// worker drains every value already pushed, then the thread is joined.
///
/// # Thread Safety
///
/// All methods take `&self`; share the queue across producer threads with
/// `Arc<ProQueue<T>>`. Callbacks run on the worker thread, outside the
/// queue's lock, so they may call `push` and `add_callback` themselves.
///
/// # Shutdown race
///
/// Values pushed after `stop()` has begun are not guaranteed to be
/// processed. The worker drains what it can see until storage is empty,
/// then exits; anything arriving later stays in storage.
///
/// # Example
///
/// ```rust
/// use proqueue::queue::ProQueue;
///
/// let queue = ProQueue::new(|value: &mut i32| println!("{}", value)).unwrap();
/// for i in 0..5 {
///     queue.push(i);
/// }
/// queue.stop().unwrap();
/// ```
pub struct ProQueue<T: Send + 'static> {
    name: String,
    policy: FailurePolicy,
    shared: Arc<Shared<T>>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
}

impl<T: Send + 'static> ProQueue<T> {
    /// Create a queue with one callback and default configuration
    pub fn new<F>(callback: F) -> QueueResult<Self>
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self::builder().callback(callback).spawn()
    }

    /// Create a queue with the given callbacks, registered in order
    pub fn with_callbacks(callbacks: Vec<Callback<T>>) -> QueueResult<Self> {
        Self::builder().callbacks(callbacks).spawn()
    }

    pub fn builder() -> ProQueueBuilder<T> {
        ProQueueBuilder::new()
    }

    pub(crate) fn from_parts(
        name: String,
        policy: FailurePolicy,
        shared: Arc<Shared<T>>,
        worker: JoinHandle<()>,
    ) -> Self {
        let worker_id = worker.thread().id();
        Self {
            name,
            policy,
            shared,
            worker: Mutex::new(Some(worker)),
            worker_id,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Register another callback
    ///
    /// It applies from the next value the worker picks up. Fails with
    /// `CapacityExceeded`, leaving the registry untouched, when full.
    pub fn add_callback<F>(&self, callback: F) -> QueueResult<()>
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.shared.lock().registry.register(Arc::new(callback))
    }

    /// Number of registered callbacks
    pub fn tasks_count(&self) -> usize {
        self.shared.lock().registry.len()
    }

    pub fn max_callbacks(&self) -> usize {
        self.shared.lock().registry.max_callbacks()
    }

    /// Append a value and wake the worker
    pub fn push(&self, value: T) {
        self.shared.push(value);
    }

    /// Append a batch of values in iteration order under one lock
    pub fn push_all<I>(&self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        self.shared.push_all(values);
    }

    /// Remove the head waiting value without running callbacks
    pub fn pop(&self) -> QueueResult<T> {
        self.shared.pop()
    }

    /// Waiting values plus the one currently being processed
    pub fn size(&self) -> usize {
        self.shared.lock().size()
    }

    pub fn empty(&self) -> bool {
        self.size() == 0
    }

    /// Values not yet handed to the worker
    pub fn pending(&self) -> usize {
        self.shared.lock().pending.len()
    }

    pub fn state(&self) -> WorkerState {
        self.shared.lock().worker_state
    }

    pub fn stats(&self) -> QueueStats {
        self.shared.stats()
    }

    /// Stop the worker after it drains the backlog
    ///
    /// Sets the shutdown flag, wakes the worker and blocks until the
    /// thread has joined. Calling it again is a no-op. Called from a
    /// callback it cannot join its own thread: the flag is still set and
    /// `StopFromWorker` is returned.
    pub fn stop(&self) -> QueueResult<()> {
        if self.shared.request_shutdown() {
            log::debug!("Queue '{}': shutdown requested", self.name);
        }

        if thread::current().id() == self.worker_id {
            return Err(QueueError::StopFromWorker);
        }

        // Held across the join so concurrent callers wait for the drain too
        let mut worker = lock_or_recover(&self.worker);
        let Some(handle) = worker.take() else {
            return Ok(());
        };

        match handle.join() {
            Ok(()) => {
                log::debug!("Queue '{}': worker joined", self.name);
                Ok(())
            }
            Err(payload) => Err(QueueError::CallbackFailure {
                message: panic_message(&*payload),
            }),
        }
    }
}

impl<T: Clone + Send + 'static> ProQueue<T> {
    /// Copy of the head waiting value
    pub fn front(&self) -> QueueResult<T> {
        self.shared
            .lock()
            .pending
            .front()
            .cloned()
            .ok_or(QueueError::EmptyQueueAccess)
    }

    /// Copy of the most recently pushed waiting value
    pub fn back(&self) -> QueueResult<T> {
        self.shared
            .lock()
            .pending
            .back()
            .cloned()
            .ok_or(QueueError::EmptyQueueAccess)
    }
}

impl<T: Send + 'static> std::fmt::Debug for ProQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProQueue")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<T: Send + 'static> Drop for ProQueue<T> {
    fn drop(&mut self) {
        match self.stop() {
            Ok(()) => {}
            Err(QueueError::StopFromWorker) => {
                log::debug!(
                    "Queue '{}': dropped on its own worker thread, worker detached",
                    self.name
                );
            }
            Err(e) => log::error!("Queue '{}': stopped with error: {}", self.name, e),
        }
    }
}
