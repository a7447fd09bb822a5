//! Error types for `calcgate-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

use std::time::Duration;

/// Unified error type for all core operations.
///
/// Both variants are terminal for the request that triggered them; the
/// HTTP layer maps each to its own status code.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoreError {
    /// The input cannot be computed (zero divisor, negative precision, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The caller's current window is full.
    #[error("rate limit exceeded, retry in {}s", retry_after_secs(.retry_after))]
    RateLimitExceeded { retry_after: Duration },
}

impl CoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidArgument(msg.into())
    }
}

/// Whole seconds to wait, rounded up so a client never retries too early.
pub fn retry_after_secs(retry_after: &Duration) -> u64 {
    let secs = retry_after.as_secs();
    if retry_after.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Convenience alias used throughout `calcgate-core`.
pub type CoreResult<T> = Result<T, CoreError>;
