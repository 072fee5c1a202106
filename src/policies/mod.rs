//! Backoff policies.
//!
//! This module groups the knobs that control **how many** attempts run and
//! **how long** to wait between them.
//!
//! ## Contents
//! - [`BackoffConfig`] raw attempt count and delay progression (freely mutable)
//! - [`BackoffPolicy`] config plus a freeze-once normalized snapshot
//! - [`FrozenBackoff`] the normalized snapshot itself
//! - [`JitterPolicy`]  symmetric randomization to avoid thundering herd
//! - [`Schedule`]      iterator over the waits of one invocation
//!
//! ## Quick wiring
//! ```text
//! BackoffPolicy ──frozen()──► FrozenBackoff ──schedule()──► Schedule
//!      └─► core::runner::run consumes one delay before every attempt after the first
//! ```
//!
//! ## Defaults
//! - [`CONSTANT_DELAY`] → 5 attempts, 500ms apart.
//! - [`EXPONENTIAL_BACKOFF`] → 5 attempts, 500ms × 2 up to 8s, 10% jitter.

mod backoff;
mod jitter;
mod schedule;

pub use backoff::{
    BackoffConfig, BackoffPolicy, CONSTANT_DELAY, EXPONENTIAL_BACKOFF, FOREVER, FrozenBackoff,
};
pub use jitter::JitterPolicy;
pub use schedule::Schedule;
