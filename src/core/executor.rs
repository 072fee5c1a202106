//! # Retry executor.
//!
//! [`Executor`] drives an operation through a [`BackoffPolicy`]:
//! - freezes the policy on first use,
//! - invokes the operation until it succeeds or attempts run out,
//! - waits the scheduled delay between attempts,
//! - optionally races each wait against a [`Context`].
//!
//! ## Entry points
//! ```text
//! retry(&policy, op)                    op: FnMut() -> Future<Result<T, E>>
//!   └─► Result<T, E>                    (last error verbatim)
//!
//! retry_with_context(&ctx, &policy, op) op: FnMut(Context) -> Future<Result<T, E>>
//!   └─► Result<T, RetryError<E>>        (last error, or the cancel reason)
//! ```
//!
//! Both share one loop ([`runner::run`](super::runner)); the plain variant simply
//! never gets interrupted.
//!
//! ## Error bound
//! `E: Display` is required because failed attempts are published on the event bus
//! as [`Event::error`](crate::Event) text. The bound holds even without a bus; the
//! error itself is never formatted into the result and comes back unchanged.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use retryit::{BackoffConfig, BackoffPolicy, RetryMe};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let policy = BackoffPolicy::new(BackoffConfig {
//!     attempts: 3,
//!     initial_delay: Duration::from_millis(1),
//!     factor: 1.0,
//!     ..BackoffConfig::default()
//! });
//!
//! let mut calls = 0;
//! let res = retryit::retry(&policy, || {
//!     calls += 1;
//!     let n = calls;
//!     async move { if n < 3 { Err(RetryMe) } else { Ok(n * n) } }
//! })
//! .await;
//!
//! assert_eq!(res, Ok(9));
//! # }
//! ```

use std::fmt;
use std::future::Future;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    core::{
        config::Config,
        context::Context,
        runner::{self, Stop, Uninterrupted},
    },
    error::RetryError,
    events::Bus,
    policies::BackoffPolicy,
};

/// Runs operations under a backoff policy.
///
/// Holds no per-invocation state: one executor may serve any number of
/// concurrent retries.
#[derive(Clone, Debug, Default)]
pub struct Executor {
    bus: Option<Bus>,
    seed: Option<u64>,
}

impl Executor {
    /// Creates an executor from configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            bus: cfg.bus_capacity().map(Bus::new),
            seed: cfg.seed,
        }
    }

    /// Returns the event bus, if events are enabled.
    pub fn bus(&self) -> Option<&Bus> {
        self.bus.as_ref()
    }

    /// Retries `op` per `policy`, waiting the full delay between attempts.
    ///
    /// Returns the first success, or the error of the last attempt unchanged.
    pub async fn retry<T, E, F, Fut>(&self, policy: &BackoffPolicy, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let res = runner::run(
            policy.frozen(),
            self.rng(),
            &Uninterrupted,
            self.bus.as_ref(),
            op,
        )
        .await;

        match res {
            Ok(value) => Ok(value),
            Err(Stop::Exhausted(e)) => Err(e),
            Err(Stop::Interrupted(never)) => match never {},
        }
    }

    /// Retries `op` per `policy`, aborting a wait when `ctx` is cancelled or expires.
    ///
    /// Each attempt receives a clone of `ctx` so its own work can observe cancellation.
    /// An attempt that is already running is never interrupted by the executor.
    pub async fn retry_with_context<T, E, F, Fut>(
        &self,
        ctx: &Context,
        policy: &BackoffPolicy,
        mut op: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(Context) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let res = runner::run(
            policy.frozen(),
            self.rng(),
            ctx,
            self.bus.as_ref(),
            || op(ctx.clone()),
        )
        .await;

        res.map_err(|stop| match stop {
            Stop::Exhausted(e) => RetryError::Operation(e),
            Stop::Interrupted(reason) => RetryError::Cancelled(reason),
        })
    }

    /// Per-invocation jitter source.
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Retries `op` per `policy` with a default [`Executor`].
///
/// See [`Executor::retry`].
pub async fn retry<T, E, F, Fut>(policy: &BackoffPolicy, op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let executor = Executor::default();
    executor.retry(policy, op).await
}

/// Retries `op` per `policy` under `ctx` with a default [`Executor`].
///
/// See [`Executor::retry_with_context`].
pub async fn retry_with_context<T, E, F, Fut>(
    ctx: &Context,
    policy: &BackoffPolicy,
    op: F,
) -> Result<T, RetryError<E>>
where
    F: FnMut(Context) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    let executor = Executor::default();
    executor.retry_with_context(ctx, policy, op).await
}

impl BackoffPolicy {
    /// Convenience for [`retry`] with this policy.
    pub async fn retry<T, E, F, Fut>(&self, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        retry(self, op).await
    }

    /// Convenience for [`retry_with_context`] with this policy.
    pub async fn retry_with_context<T, E, F, Fut>(
        &self,
        ctx: &Context,
        op: F,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(Context) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        retry_with_context(ctx, self, op).await
    }
}
