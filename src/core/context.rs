//! # Cancellation context.
//!
//! [`Context`] pairs a [`CancellationToken`] with an optional deadline. The executor
//! races every inter-attempt wait against it and hands a clone to the operation, so
//! the operation's own blocking work can be interrupted cooperatively too.
//!
//! ## Rules
//! - Derived contexts (`child`, `with_timeout`, `with_deadline`) are cancelled with
//!   their parent; cancelling a child never affects the parent.
//! - A derived deadline never extends the parent's deadline.
//! - When both hold, explicit cancellation is reported before an elapsed deadline.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryit::{CancelReason, Context};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let ctx = Context::new().with_timeout(Duration::from_millis(10));
//! assert_eq!(ctx.done().await, CancelReason::DeadlineExceeded);
//! # }
//! ```

use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::CancelReason;

/// Cancellation token plus optional deadline.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<time::Instant>,
}

impl Context {
    /// Creates a root context with no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing token (for example a runtime shutdown token).
    pub fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Derives a child context with the same deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derives a child context that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(time::Instant::now() + timeout)
    }

    /// Derives a child context that expires at `deadline` (or the parent's, if earlier).
    pub fn with_deadline(&self, deadline: time::Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    /// Cancels this context and every context derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the underlying cancellation token.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns the deadline, if any.
    pub fn deadline(&self) -> Option<time::Instant> {
        self.deadline
    }

    /// Returns why the context is done, or `None` while it is still live.
    pub fn reason(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            return Some(CancelReason::Cancelled);
        }
        match self.deadline {
            Some(at) if time::Instant::now() >= at => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// Whether the context is cancelled or past its deadline.
    pub fn is_done(&self) -> bool {
        self.reason().is_some()
    }

    /// Completes when the context is cancelled or its deadline elapses.
    pub async fn done(&self) -> CancelReason {
        match self.deadline {
            Some(at) => select! {
                biased;
                _ = self.token.cancelled() => CancelReason::Cancelled,
                _ = time::sleep_until(at) => CancelReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        }
    }

    /// Sleeps for `delay` unless the context finishes first.
    ///
    /// If both are ready at the same time the context wins.
    pub async fn sleep(&self, delay: Duration) -> Result<(), CancelReason> {
        select! {
            biased;
            reason = self.done() => Err(reason),
            _ = time::sleep(delay) => Ok(()),
        }
    }
}
