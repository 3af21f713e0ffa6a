//! Synchronization utilities for robust mutex handling
//!
//! Callbacks and batch iterators run outside the queue lock. The only user
//! code reached while it is held is `T::clone` from `front`/`back`, which
//! reads without mutating, so a poisoned lock still guards consistent data.
//! These helpers log the poisoning and hand back the guard instead of
//! failing the caller.

use std::any::Any;
use std::sync::{LockResult, Mutex, MutexGuard};

/// Recover the guard from a possibly poisoned lock result
///
/// Works for `Mutex::lock` as well as `Condvar::wait_while`, which both
/// return a `LockResult` wrapping the guard.
///
/// # Examples
/// ```
/// use std::sync::Mutex;
/// use proqueue::core::sync::recover_poison;
///
/// let mutex = Mutex::new(42);
/// let guard = recover_poison(mutex.lock());
/// assert_eq!(*guard, 42);
/// ```
pub fn recover_poison<G>(result: LockResult<G>) -> G {
    result.unwrap_or_else(|poison_err| {
        log::warn!(
            "Internal synchronisation error (mutex poisoned); continuing with recovered state"
        );
        poison_err.into_inner()
    })
}

/// Lock a mutex, recovering from poisoning
pub fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    recover_poison(mutex.lock())
}

/// Best-effort text from a panic payload
///
/// `panic!` payloads are either `&'static str` or `String`; anything else
/// is reported generically.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
