//! Callback registry
//!
//! Ordered list of processing closures applied to every dequeued value.
//! Entries are appended left to right and never removed. The registry
//! itself is not synchronised; it lives inside the queue's shared state
//! and is only touched while that lock is held.

use crate::queue::error::{QueueError, QueueResult};
use std::fmt;
use std::sync::Arc;

/// Default upper bound on registered callbacks
pub const DEFAULT_MAX_CALLBACKS: usize = 10;

/// A processing closure invoked with mutable access to each value
pub type Callback<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

pub(crate) struct CallbackRegistry<T> {
    callbacks: Vec<Callback<T>>,
    max_callbacks: usize,
}

impl<T> CallbackRegistry<T> {
    pub(crate) fn new(max_callbacks: usize) -> Self {
        Self {
            callbacks: Vec::with_capacity(max_callbacks),
            max_callbacks,
        }
    }

    /// Append a callback, failing without mutation when full
    pub(crate) fn register(&mut self, callback: Callback<T>) -> QueueResult<()> {
        if self.callbacks.len() >= self.max_callbacks {
            return Err(QueueError::CapacityExceeded {
                max: self.max_callbacks,
            });
        }
        self.callbacks.push(callback);
        Ok(())
    }

    /// Append a batch of callbacks in order, all or nothing
    pub(crate) fn register_all(&mut self, callbacks: Vec<Callback<T>>) -> QueueResult<()> {
        if self.callbacks.len() + callbacks.len() > self.max_callbacks {
            return Err(QueueError::CapacityExceeded {
                max: self.max_callbacks,
            });
        }
        self.callbacks.extend(callbacks);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub(crate) fn max_callbacks(&self) -> usize {
        self.max_callbacks
    }

    /// Cheap copy of the current callbacks (Arc clones) in registration order
    pub(crate) fn snapshot(&self) -> Vec<Callback<T>> {
        self.callbacks.clone()
    }
}

impl<T> fmt::Debug for CallbackRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("callbacks", &self.callbacks.len())
            .field("max_callbacks", &self.max_callbacks)
            .finish()
    }
}
