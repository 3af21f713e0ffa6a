//! Queue Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Callback registry is full (max callbacks: {max})")]
    CapacityExceeded { max: usize },

    #[error("Queue is empty")]
    EmptyQueueAccess,

    #[error("Worker terminated by a failing callback: {message}")]
    CallbackFailure { message: String },

    #[error("At least one callback is required to construct a queue")]
    NoCallbacks,

    #[error("stop() cannot join the worker thread from inside a callback")]
    StopFromWorker,

    #[error("Failed to spawn worker thread: {source}")]
    Spawn {
        #[source]
        source: std::io::Error,
    },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            QueueError::CapacityExceeded { .. }
                | QueueError::NoCallbacks
                | QueueError::StopFromWorker
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::CapacityExceeded { .. } => {
                Some("Too many callbacks registered; raise max_callbacks in the configuration")
            }
            QueueError::NoCallbacks => Some("A queue needs at least one callback"),
            QueueError::StopFromWorker => {
                Some("A callback asked the queue to stop; the worker will exit after draining")
            }
            _ => None,
        }
    }
}
