//! # retryit
//!
//! **retryit** retries fallible async operations with a configurable backoff.
//!
//! Given an operation, it invokes it repeatedly on failure, waiting a growing
//! (optionally jittered) delay between attempts, until the operation succeeds,
//! the attempt budget runs out, or a cancellation/deadline fires.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────────┐        ┌────────────────────────────┐
//!     │  BackoffConfig   │        │  operation: FnMut() -> Fut │
//!     │ (raw, mutable)   │        │  (or FnMut(Context) -> Fut)│
//!     └────────┬─────────┘        └─────────────┬──────────────┘
//!              ▼                                │
//!     ┌──────────────────┐  frozen()            │
//!     │  BackoffPolicy   │──(once)──┐           │
//!     └──────────────────┘          ▼           ▼
//!                        ┌───────────────────────────────────────┐
//!                        │  Executor                             │
//!                        │  - FrozenBackoff → Schedule (delays)  │
//!                        │  - retry loop (runner)                │
//!                        │  - optional Context (cancel/deadline) │
//!                        │  - optional Bus (lifecycle events)    │
//!                        └───────────────────┬───────────────────┘
//!                                            ▼
//!                        Ok(T) │ last error │ CancelReason
//! ```
//!
//! ### Lifecycle
//! ```text
//! retry(&policy, op)
//!
//! policy.frozen()  (normalize + snapshot, exactly once per policy)
//! loop {
//!   ├─► attempt += 1
//!   ├─► op().await
//!   │       ├─ Ok  ──► return Ok
//!   │       └─ Err ──► schedule.next()
//!   │                    ├─ None        ──► return last error
//!   │                    └─ Some(delay) ──► drop error
//!   │                                       sleep(delay) (cancellable with a Context)
//!   │                                         └─ cancelled ──► return CancelReason
//!   └─ continue
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / fns                               |
//! |-------------------|---------------------------------------------------------------|-----------------------------------------------|
//! | **Policies**      | Attempt count, delay growth, cap, jitter; freeze on first use.| [`BackoffPolicy`], [`BackoffConfig`]          |
//! | **Execution**     | Retry loop with and without cancellation.                     | [`retry`], [`retry_with_context`], [`Executor`]|
//! | **Cancellation**  | Token plus deadline, passed through to the operation.         | [`Context`], [`CancelReason`]                 |
//! | **Errors**        | Last error verbatim, cancel reasons, sentinel failure.        | [`RetryError`], [`RetryMe`]                   |
//! | **Events**        | Lifecycle events on a broadcast bus.                          | [`Event`], [`Bus`], [`Subscribe`]             |
//! | **Configuration** | Event bus capacity, jitter seed.                              | [`Config`]                                    |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryit::{CONSTANT_DELAY, CancelReason, Context, RetryError, RetryMe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     // give up once 100ms have passed, whatever the policy says
//!     let ctx = Context::new().with_timeout(Duration::from_millis(100));
//!
//!     let res: Result<(), _> = retryit::retry_with_context(&ctx, &CONSTANT_DELAY, |ctx| async move {
//!         if ctx.is_done() {
//!             return Ok(());
//!         }
//!         Err(RetryMe)
//!     })
//!     .await;
//!
//!     assert_eq!(res, Err(RetryError::Cancelled(CancelReason::DeadlineExceeded)));
//! }
//! ```
mod core;
mod error;
mod events;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{Config, Context, Executor, retry, retry_with_context};
pub use error::{CancelReason, RetryError, RetryMe};
pub use events::{Bus, Event, EventKind};
pub use policies::{
    BackoffConfig, BackoffPolicy, CONSTANT_DELAY, EXPONENTIAL_BACKOFF, FOREVER, FrozenBackoff,
    JitterPolicy, Schedule,
};
pub use subscribers::{Subscribe, forward};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
