//! Error types returned by the retry executor.
//!
//! - [`RetryError`]: outcome of a cancellation-aware retry that did not succeed.
//! - [`CancelReason`]: why a wait between attempts was interrupted.
//! - [`RetryMe`]: sentinel failure for operations with nothing better to report.
//!
//! The executor never wraps the operation's error with its own context: the error
//! from the last attempt comes back unchanged, so identity checks still work.

use std::convert::Infallible;

use thiserror::Error;

/// # Why a retry loop stopped waiting.
///
/// Observed only at wait points between attempts; an in-flight operation is never
/// interrupted by the executor.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// The context was cancelled explicitly.
    #[error("context canceled")]
    Cancelled,

    /// The context deadline elapsed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

impl CancelReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use retryit::CancelReason;
    ///
    /// assert_eq!(CancelReason::DeadlineExceeded.as_label(), "deadline_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            CancelReason::Cancelled => "cancelled",
            CancelReason::DeadlineExceeded => "deadline_exceeded",
        }
    }
}

impl From<Infallible> for CancelReason {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// # Failure of a cancellation-aware retry.
///
/// Exhausting the attempt budget is not a variant of its own: it surfaces as
/// [`RetryError::Operation`] holding the error from the last attempt verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// Error returned by the final attempt.
    #[error("{0}")]
    Operation(E),

    /// The context fired while waiting for the next attempt.
    #[error(transparent)]
    Cancelled(#[from] CancelReason),
}

impl<E> RetryError<E> {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RetryError::Operation(_) => "operation_failed",
            RetryError::Cancelled(reason) => reason.as_label(),
        }
    }

    /// Returns the cancellation reason, if the loop was cancelled.
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self {
            RetryError::Cancelled(reason) => Some(*reason),
            RetryError::Operation(_) => None,
        }
    }

    /// Indicates whether the loop stopped because of the context.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled(_))
    }

    /// Consumes the error and returns the operation's error, if any.
    ///
    /// # Example
    /// ```
    /// use retryit::{RetryError, RetryMe};
    ///
    /// let err: RetryError<RetryMe> = RetryError::Operation(RetryMe);
    /// assert_eq!(err.into_operation(), Some(RetryMe));
    /// ```
    pub fn into_operation(self) -> Option<E> {
        match self {
            RetryError::Operation(e) => Some(e),
            RetryError::Cancelled(_) => None,
        }
    }
}

/// Sentinel error: "retry me, no further detail".
///
/// Sugar for operations that fail without a meaningful error of their own.
#[derive(Error, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[error("retry me")]
pub struct RetryMe;
