//! Shared fixtures for queue tests

use std::sync::{Arc, Condvar, Mutex};

/// Shared log of values observed by a callback
pub(crate) type Recorded<V> = Arc<Mutex<Vec<V>>>;

/// Callback that appends a copy of every value it sees
pub(crate) fn recorder<V: Clone + Send + 'static>() -> (Recorded<V>, impl Fn(&mut V) + Send + Sync)
{
    let seen: Recorded<V> = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);
    (seen, move |value: &mut V| log.lock().unwrap().push(value.clone()))
}

/// One-shot latch: `wait` blocks until `open` has been called
#[derive(Default)]
pub(crate) struct Gate {
    open: Mutex<bool>,
    cond: Condvar,
}

impl Gate {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn open(&self) {
        *self.open.lock().unwrap() = true;
        self.cond.notify_all();
    }

    pub(crate) fn wait(&self) {
        let guard = self.open.lock().unwrap();
        let _guard = self.cond.wait_while(guard, |open| !*open).unwrap();
    }
}

/// Callback that signals `entered` and then blocks on `release`
///
/// Holds the worker on its first value so tests can observe the queue
/// with a known backlog.
pub(crate) fn blocking_callback<V>(
    entered: Arc<Gate>,
    release: Arc<Gate>,
) -> impl Fn(&mut V) + Send + Sync {
    move |_: &mut V| {
        entered.open();
        release.wait();
    }
}
