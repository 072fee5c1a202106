//! # Jitter policy for retry delays.
//!
//! [`JitterPolicy`] adds randomness to backoff delays to prevent thundering herd effects
//! when many callers retry against the same dependency at once.
//!
//! - [`JitterPolicy::None`]: no randomization, predictable delays
//! - [`JitterPolicy::Symmetric`]: delay drawn from `[d - f·d, d + f·d]`
//!
//! ## Upper edge
//! The sampled interval is `delta·2 + 1ns` wide: the draw is `lo + u·(hi - lo + 1ns)`
//! with `u ∈ [0, 1)`, truncated to whole nanoseconds. The extra nanosecond makes `hi`
//! reachable, and the very top draws land 1ns past it; the width is kept as-is for
//! compatible delay distributions.

use rand::Rng;
use std::time::Duration;

/// Policy controlling randomization of retry delays.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum JitterPolicy {
    /// No jitter: use the exact backoff delay.
    #[default]
    None,

    /// Symmetric jitter around the computed delay.
    ///
    /// `fraction = 0.1` turns a 500ms delay into something in `[450ms, 550ms]`.
    Symmetric {
        /// Fraction of the delay used as the half-width of the interval (`> 0`).
        fraction: f64,
    },
}

impl JitterPolicy {
    /// Builds a policy from an already normalized fraction.
    ///
    /// `0.0` disables the transform entirely.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction > 0.0 {
            JitterPolicy::Symmetric { fraction }
        } else {
            JitterPolicy::None
        }
    }

    /// Returns the jitter fraction (`0.0` for [`JitterPolicy::None`]).
    pub fn fraction(&self) -> f64 {
        match self {
            JitterPolicy::None => 0.0,
            JitterPolicy::Symmetric { fraction } => *fraction,
        }
    }

    /// Applies jitter to the given delay using `rng`.
    ///
    /// A sample below zero (only possible with `fraction > 1.0`) saturates to zero.
    pub fn apply<R: Rng>(&self, delay: Duration, rng: &mut R) -> Duration {
        match self {
            JitterPolicy::None => delay,
            JitterPolicy::Symmetric { fraction } => symmetric(delay, *fraction, rng),
        }
    }
}

fn symmetric<R: Rng>(delay: Duration, fraction: f64, rng: &mut R) -> Duration {
    let nanos = delay.as_nanos() as f64;
    let delta = fraction * nanos;
    let lo = nanos - delta;
    let hi = nanos + delta;

    let sampled = lo + rng.random::<f64>() * (hi - lo + 1.0);
    // float → int casts saturate: negatives and NaN land on zero
    Duration::from_nanos(sampled as u64)
}
