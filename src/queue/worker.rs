//! Worker thread and drain loop
//!
//! The worker takes one value at a time from the shared state, runs every
//! callback on it outside the lock, and discards it. It exits once shutdown
//! has been requested and storage is empty.

use crate::core::sync::panic_message;
use crate::queue::internal::{Shared, WorkItem};
use crate::queue::types::FailurePolicy;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Start the worker thread for a queue
pub(crate) fn spawn_worker<T>(
    name: &str,
    shared: Arc<Shared<T>>,
    policy: FailurePolicy,
) -> std::io::Result<JoinHandle<()>>
where
    T: Send + 'static,
{
    let queue_name = name.to_string();
    thread::Builder::new()
        .name(format!("proqueue-{}", name))
        .spawn(move || run(&queue_name, &shared, policy))
}

fn run<T>(name: &str, shared: &Shared<T>, policy: FailurePolicy) {
    log::debug!("Queue '{}': worker started ({:?} on callback failure)", name, policy);

    while let Some(item) = shared.next_item() {
        let failed = process(name, shared, item, policy);
        shared.finish_item(failed);
    }

    log::debug!("Queue '{}': worker drained and terminated", name);
}

/// Run every callback on one value, returning how many of them panicked
///
/// Under `FailurePolicy::Halt` a panicking callback marks the worker
/// terminated and the panic continues unwinding out of the thread.
fn process<T>(name: &str, shared: &Shared<T>, item: WorkItem<T>, policy: FailurePolicy) -> u64 {
    let WorkItem {
        mut value,
        callbacks,
    } = item;
    let mut failed = 0;

    for (index, callback) in callbacks.iter().enumerate() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(&mut value)));
        let Err(payload) = outcome else {
            continue;
        };

        let message = panic_message(&*payload);
        match policy {
            FailurePolicy::Halt => {
                log::error!(
                    "Queue '{}': callback #{} panicked, terminating worker: {}",
                    name,
                    index,
                    message
                );
                shared.abort_item();
                panic::resume_unwind(payload);
            }
            FailurePolicy::Continue => {
                log::error!(
                    "Queue '{}': callback #{} panicked, continuing: {}",
                    name,
                    index,
                    message
                );
                failed += 1;
            }
        }
    }

    log::trace!("Queue '{}': value processed by {} callbacks", name, callbacks.len());
    failed
}
