//! # Retry events and the broadcast bus.
//!
//! - [`Event`] / [`EventKind`] describe what a retry loop did
//! - [`Bus`] fans events out to any number of receivers
//!
//! Events are only published when the executor was built with a non-zero
//! [`Config::bus_capacity`](crate::Config::bus_capacity).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
