//! # The retry loop.
//!
//! One loop serves both entry points; the only difference between them is how
//! the executor waits between attempts ([`Pause`]).
//!
//! ## State machine
//! ```text
//! Idle ──► Attempting(i) ──► Ok  ──► Success (terminal)
//!                 │
//!                 └──► Err ──► schedule.next()
//!                               ├─ None        ──► AttemptsExhausted (terminal, last error)
//!                               └─ Some(delay) ──► Waiting(i)
//!                                                    ├─ elapsed     ──► Attempting(i+1)
//!                                                    └─ interrupted ──► Cancelled (terminal)
//! ```
//!
//! ## Rules
//! - Attempts run **sequentially**; attempt `i+1` never starts before attempt `i`
//!   completed and its delay elapsed.
//! - The operation is awaited inline and never interrupted by the loop; interruption
//!   is only observed while waiting.
//! - Errors of earlier attempts are dropped before the wait; only the last one is returned.
//! - No lock is held across an attempt or a wait.

use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time;

use crate::{
    core::context::Context,
    error::CancelReason,
    events::{Bus, Event, EventKind},
    policies::FrozenBackoff,
};

/// How the loop waits between attempts.
pub(crate) trait Pause {
    /// Why a wait may be cut short.
    type Interrupt: Clone + Into<CancelReason>;

    /// Waits for `delay`, or returns early with an interrupt.
    fn pause(&self, delay: Duration) -> impl Future<Output = Result<(), Self::Interrupt>> + Send;
}

/// Always waits the full delay.
pub(crate) struct Uninterrupted;

impl Pause for Uninterrupted {
    type Interrupt = Infallible;

    fn pause(&self, delay: Duration) -> impl Future<Output = Result<(), Infallible>> + Send {
        async move {
            time::sleep(delay).await;
            Ok(())
        }
    }
}

impl Pause for Context {
    type Interrupt = CancelReason;

    fn pause(&self, delay: Duration) -> impl Future<Output = Result<(), CancelReason>> + Send {
        self.sleep(delay)
    }
}

/// Why the loop stopped without a success.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Stop<E, I> {
    /// Every attempt failed; carries the last error.
    Exhausted(E),
    /// A wait was interrupted.
    Interrupted(I),
}

/// Runs `op` until it succeeds, the schedule runs out, or a wait is interrupted.
pub(crate) async fn run<T, E, F, Fut, P, R>(
    backoff: &FrozenBackoff,
    rng: R,
    pause: &P,
    bus: Option<&Bus>,
    mut op: F,
) -> Result<T, Stop<E, P::Interrupt>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
    P: Pause,
    R: Rng,
{
    let mut schedule = backoff.schedule_with(rng);
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        emit(bus, || Event::new(EventKind::AttemptStarting).with_attempt(attempt));

        let err = match op().await {
            Ok(value) => {
                emit(bus, || Event::new(EventKind::AttemptSucceeded).with_attempt(attempt));
                return Ok(value);
            }
            Err(e) => e,
        };
        emit(bus, || {
            Event::new(EventKind::AttemptFailed)
                .with_attempt(attempt)
                .with_error(err.to_string())
        });

        let Some(delay) = schedule.next() else {
            emit(bus, || {
                Event::new(EventKind::AttemptsExhausted)
                    .with_attempt(attempt)
                    .with_error(err.to_string())
            });
            return Err(Stop::Exhausted(err));
        };
        emit(bus, || {
            Event::new(EventKind::BackoffScheduled)
                .with_attempt(attempt)
                .with_delay(delay)
                .with_error(err.to_string())
        });
        drop(err);

        if let Err(interrupt) = pause.pause(delay).await {
            emit(bus, || {
                Event::new(EventKind::Cancelled)
                    .with_attempt(attempt)
                    .with_reason(interrupt.clone().into())
            });
            return Err(Stop::Interrupted(interrupt));
        }
    }
}

/// Publishes an event if a bus is attached; the event is built lazily.
#[inline]
fn emit(bus: Option<&Bus>, make: impl FnOnce() -> Event) {
    if let Some(bus) = bus {
        bus.publish(make());
    }
}
