//! # Retry lifecycle events.
//!
//! The [`EventKind`] enum classifies what happened inside one retry invocation:
//! - **Attempt events**: an attempt is starting, failed, or succeeded
//! - **Wait events**: the next attempt was scheduled after a delay
//! - **Terminal events**: attempts exhausted, or the wait was cancelled
//!
//! The [`Event`] struct carries the metadata: timestamps, attempt number,
//! delay, error text and cancellation reason.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryit::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::BackoffScheduled)
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(500))
//!     .with_error("connection refused");
//!
//! assert_eq!(ev.kind, EventKind::BackoffScheduled);
//! assert_eq!(ev.attempt, Some(2));
//! assert_eq!(ev.error.as_deref(), Some("connection refused"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::error::CancelReason;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of retry events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// An attempt is about to invoke the operation.
    ///
    /// Sets:
    /// - `attempt`: attempt number (1-based)
    AttemptStarting,

    /// The operation returned an error for this attempt.
    ///
    /// Sets:
    /// - `attempt`: attempt number
    /// - `error`: failure message
    AttemptFailed,

    /// The operation succeeded; the loop returns immediately.
    ///
    /// Sets:
    /// - `attempt`: attempt number
    AttemptSucceeded,

    /// The next attempt was scheduled.
    ///
    /// Sets:
    /// - `attempt`: the attempt that just failed
    /// - `delay`: wait before the next attempt
    /// - `error`: the failure that triggered the retry
    BackoffScheduled,

    /// Every attempt failed; the last error is returned.
    ///
    /// Sets:
    /// - `attempt`: total attempts made
    /// - `error`: last failure message
    AttemptsExhausted,

    /// The context fired during a wait; pending retries are discarded.
    ///
    /// Sets:
    /// - `attempt`: the attempt that failed before the wait
    /// - `reason`: cancellation reason
    Cancelled,
}

/// Retry event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Attempt number (starting from 1).
    pub attempt: Option<u32>,
    /// Delay before the next attempt.
    pub delay: Option<Duration>,
    /// Operation error message.
    pub error: Option<Arc<str>>,
    /// Why the wait was interrupted.
    pub reason: Option<CancelReason>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            attempt: None,
            delay: None,
            error: None,
            reason: None,
        }
    }

    /// Attaches an attempt number.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a backoff delay.
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay = Some(d);
        self
    }

    /// Attaches an error message.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Attaches a cancellation reason.
    #[inline]
    pub fn with_reason(mut self, reason: CancelReason) -> Self {
        self.reason = Some(reason);
        self
    }

    /// Whether this event ends a retry invocation.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            EventKind::AttemptSucceeded | EventKind::AttemptsExhausted | EventKind::Cancelled
        )
    }
}
