//! Public API for the queue system
//!
//! External modules should import from here rather than directly from internal modules.
//! See module documentation for complete usage examples and architecture details.

// Core queue components
pub use crate::queue::builder::ProQueueBuilder;
pub use crate::queue::proqueue::ProQueue;

// Callback registry
pub use crate::queue::registry::{Callback, DEFAULT_MAX_CALLBACKS};

// Configuration
pub use crate::queue::config::{ConfigError, QueueConfig};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Type definitions and statistics
pub use crate::queue::types::{FailurePolicy, QueueStats, WorkerState};
