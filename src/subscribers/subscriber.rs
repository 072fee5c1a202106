//! # Event subscriber trait.
//!
//! Provides [`Subscribe`], an extension point for plugging custom event handlers
//! (logging, metrics, alerting) onto an executor's [`Bus`](crate::Bus), and
//! [`forward`], the listener loop that feeds one subscriber from a receiver.
//!
//! ## Architecture
//! ```text
//! Bus ──subscribe()──► broadcast::Receiver ──► forward() ──► subscriber.on_event()
//! ```
//!
//! ## Rules
//! - Events are processed sequentially (FIFO) per listener.
//! - A slow subscriber only lags its own receiver; lagged events are skipped.
//! - Publishers never wait for subscribers.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use retryit::{Config, Event, EventKind, Executor, Subscribe};
//!
//! struct Metrics;
//!
//! #[async_trait]
//! impl Subscribe for Metrics {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::AttemptFailed) {
//!             // export a metric, etc.
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "metrics" }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let executor = Executor::new(Config { bus_capacity: 256, ..Config::default() });
//! if let Some(bus) = executor.bus() {
//!     tokio::spawn(retryit::forward(bus.subscribe(), Arc::new(Metrics)));
//! }
//! # }
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::{Receiver, error::RecvError};

use crate::events::Event;

/// Event subscriber for retry observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the listener task, not in the publisher context.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose - override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Drains `rx` into `subscriber` until the bus is dropped.
///
/// Returns the number of events skipped because the receiver lagged.
pub async fn forward(mut rx: Receiver<Event>, subscriber: Arc<dyn Subscribe>) -> u64 {
    let mut skipped = 0;
    loop {
        match rx.recv().await {
            Ok(ev) => subscriber.on_event(&ev).await,
            Err(RecvError::Lagged(n)) => skipped += n,
            Err(RecvError::Closed) => return skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Bus, EventKind};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        kinds: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, event: &Event) {
            self.kinds.lock().unwrap().push(event.kind);
        }
    }

    #[tokio::test]
    async fn test_forward_delivers_in_order_until_closed() {
        let bus = Bus::new(16);
        let recorder = Arc::new(Recorder::default());
        let listener = tokio::spawn(forward(bus.subscribe(), recorder.clone()));

        bus.publish(Event::new(EventKind::AttemptStarting));
        bus.publish(Event::new(EventKind::AttemptSucceeded));
        drop(bus);

        assert_eq!(listener.await.unwrap(), 0);
        assert_eq!(
            *recorder.kinds.lock().unwrap(),
            vec![EventKind::AttemptStarting, EventKind::AttemptSucceeded]
        );
    }

    #[tokio::test]
    async fn test_forward_counts_lagged_events() {
        let bus = Bus::new(2);
        let rx = bus.subscribe();
        for _ in 0..5 {
            bus.publish(Event::new(EventKind::AttemptFailed));
        }
        drop(bus);

        let recorder = Arc::new(Recorder::default());
        let skipped = forward(rx, recorder.clone()).await;
        assert_eq!(skipped, 3);
        assert_eq!(recorder.kinds.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Recorder::default().name().ends_with("Recorder"));
    }
}
