//! Builder for configuring and spawning a [`ProQueue`]

use crate::queue::config::QueueConfig;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::internal::Shared;
use crate::queue::proqueue::ProQueue;
use crate::queue::registry::{Callback, CallbackRegistry};
use crate::queue::types::FailurePolicy;
use crate::queue::worker::spawn_worker;
use std::sync::Arc;

/// Collects configuration and initial callbacks, then starts the worker
///
/// # Example
///
/// ```rust
/// use proqueue::queue::{FailurePolicy, ProQueue};
///
/// let queue = ProQueue::builder()
///     .name("audit")
///     .failure_policy(FailurePolicy::Continue)
///     .callback(|line: &mut String| line.push('!'))
///     .callback(|line: &mut String| println!("{}", line))
///     .spawn()
///     .unwrap();
/// queue.push("hello".to_string());
/// queue.stop().unwrap();
/// ```
pub struct ProQueueBuilder<T> {
    config: QueueConfig,
    callbacks: Vec<Callback<T>>,
}

impl<T: Send + 'static> ProQueueBuilder<T> {
    pub fn new() -> Self {
        Self {
            config: QueueConfig::default(),
            callbacks: Vec::new(),
        }
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: QueueConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.name = name.into();
        self
    }

    pub fn max_callbacks(mut self, max_callbacks: usize) -> Self {
        self.config.max_callbacks = max_callbacks;
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        self.callbacks.push(Arc::new(callback));
        self
    }

    pub fn callbacks(mut self, callbacks: Vec<Callback<T>>) -> Self {
        self.callbacks.extend(callbacks);
        self
    }

    /// Register the callbacks and start the worker thread
    ///
    /// Nothing is spawned when validation fails.
    pub fn spawn(self) -> QueueResult<ProQueue<T>> {
        let Self { config, callbacks } = self;

        if callbacks.is_empty() {
            return Err(QueueError::NoCallbacks);
        }

        let mut registry = CallbackRegistry::new(config.max_callbacks);
        registry.register_all(callbacks)?;

        let shared = Arc::new(Shared::new(registry));
        let worker = spawn_worker(&config.name, Arc::clone(&shared), config.failure_policy)
            .map_err(|source| QueueError::Spawn { source })?;

        log::debug!(
            "Queue '{}': started with {} callbacks (max {})",
            config.name,
            shared.lock().registry.len(),
            config.max_callbacks
        );

        Ok(ProQueue::from_parts(
            config.name,
            config.failure_policy,
            shared,
            worker,
        ))
    }
}

impl<T: Send + 'static> Default for ProQueueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
