//! # Event subscribers.
//!
//! This module provides the [`Subscribe`] trait, the [`forward`] listener loop and,
//! with the `logging` feature, the built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   retry loop ── publish(Event) ──► Bus ──► receiver per listener
//!                                               │
//!                                               └──► forward() ──► Subscribe::on_event(&Event)
//!                                                                      │
//!                                                          ┌───────────┼───────────┐
//!                                                          ▼           ▼           ▼
//!                                                      LogWriter    Metrics     Custom
//! ```

#[cfg(feature = "logging")]
mod embedded;
mod subscriber;

#[cfg(feature = "logging")]
pub use embedded::LogWriter;
pub use subscriber::{Subscribe, forward};
