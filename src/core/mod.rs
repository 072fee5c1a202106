//! Retry core: context, configuration and the retry loop.
//!
//! The public API from this module is [`Executor`], [`Context`], [`Config`] and the
//! free functions [`retry`] / [`retry_with_context`].
//!
//! Internal modules:
//! - [`runner`]: the single retry loop shared by both entry points;
//! - [`executor`]: public entry points, jitter seeding, event bus wiring;
//! - [`context`]: cancellation token plus deadline;
//! - [`config`]: executor settings.

mod config;
mod context;
mod executor;
mod runner;

pub use config::Config;
pub use context::Context;
pub use executor::{Executor, retry, retry_with_context};
