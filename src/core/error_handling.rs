//! Generic error handling utilities
//!
//! Provides unified error reporting that works across the queue and
//! configuration error types.

/// Trait for errors that can distinguish between user-actionable and system errors
///
/// When `is_user_actionable()` returns `true`, `user_message()` should return
/// `Some(message)`; otherwise it should return `None`.
pub trait ContextualError: std::error::Error {
    /// Returns true if this error carries a message the user can act on
    /// directly (too many callbacks, invalid configuration values)
    fn is_user_actionable(&self) -> bool;

    /// Returns the specific user message if this is a user-actionable error
    fn user_message(&self) -> Option<&str>;
}

/// Log an error with a detail level based on its specificity
///
/// User-actionable errors show their own message; system errors show the
/// operation context. Full details always go to debug level.
///
/// # Examples
/// ```rust,no_run
/// use proqueue::core::error_handling::log_error_with_context;
/// use proqueue::queue::QueueError;
///
/// let err = QueueError::CapacityExceeded { max: 10 };
/// log_error_with_context(&err, "Registering callbacks");
/// // Logs: "FATAL: Too many callbacks registered; raise max_callbacks in the configuration"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", fatal_line(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// The primary line reported for a fatal error
pub fn fatal_line<'a, E: ContextualError + ?Sized>(
    error: &'a E,
    operation_context: &'a str,
) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::{ConfigError, QueueError};

    #[test]
    fn test_user_actionable_error_shows_specific_message() {
        let error = QueueError::CapacityExceeded { max: 10 };

        assert!(error.is_user_actionable());
        assert_eq!(
            fatal_line(&error, "Registering callbacks"),
            "Too many callbacks registered; raise max_callbacks in the configuration"
        );
    }

    #[test]
    fn test_system_error_uses_generic_context() {
        let error = QueueError::CallbackFailure {
            message: "boom".to_string(),
        };

        assert!(!error.is_user_actionable());
        assert_eq!(error.user_message(), None);
        assert_eq!(fatal_line(&error, "Stopping queue"), "Stopping queue");
    }

    #[test]
    fn test_config_error_message() {
        let error = ConfigError::Invalid {
            message: "max_callbacks must be at least 1".to_string(),
        };
        assert_eq!(
            fatal_line(&error, "Loading configuration"),
            "max_callbacks must be at least 1"
        );
        log_error_with_context(&error, "Loading configuration");
    }
}
