//! Asynchronous Processing Queue Component
//!
//! A value queue that decouples producers from a single dedicated worker
//! thread. The worker drains values in FIFO order and runs an ordered set
//! of registered callbacks against each one before discarding it.
//!
//! # Overview
//!
//! - **Multiple Producers**: any thread may `push`; pushes never block for long
//! - **Single Consumer**: exactly one worker thread per queue, values are
//!   never processed concurrently or out of order
//! - **Callback Registry**: up to `max_callbacks` closures (10 by default),
//!   invoked in registration order
//! - **Drain on Shutdown**: `stop()` returns only after the backlog present
//!   at shutdown has been processed and the thread has joined
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ push               │ push               │ push
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Shared state (one Mutex)                │
//! │  ┌───┬───┬───┬───┬───┐   callbacks: [f0, f1, ...]       │
//! │  │ 1 │ 2 │ 3 │ 4 │...│   shutdown_requested: bool       │
//! │  └───┴───┴───┴───┴───┘                                  │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ take head + snapshot callbacks
//!                            ▼
//!                  ┌───────────────────┐
//!                  │   Worker thread   │  f0(&mut v); f1(&mut v); ...
//!                  └───────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use proqueue::queue::ProQueue;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = Arc::clone(&seen);
//! let queue = ProQueue::new(move |value: &mut u32| log.lock().unwrap().push(*value)).unwrap();
//!
//! for i in 0..5 {
//!     queue.push(i);
//! }
//! queue.stop().unwrap();
//!
//! assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2, 3, 4]);
//! assert!(queue.empty());
//! ```

pub mod api;
mod builder;
mod config;
mod error;
mod internal;
mod proqueue;
mod registry;
mod types;
mod worker;

pub use builder::ProQueueBuilder;
pub use config::{ConfigError, QueueConfig, DEFAULT_QUEUE_NAME};
pub use error::{QueueError, QueueResult};
pub use proqueue::ProQueue;
pub use registry::{Callback, DEFAULT_MAX_CALLBACKS};
pub use types::{FailurePolicy, QueueStats, WorkerState};

#[cfg(test)]
mod tests;
