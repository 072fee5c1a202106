//! # Backoff policy for retrying operations.
//!
//! [`BackoffPolicy`] describes how many times an operation is attempted and how the
//! delay between attempts grows. It is parameterized by a raw [`BackoffConfig`]:
//! - [`BackoffConfig::attempts`] total invocations (first try + retries);
//! - [`BackoffConfig::initial_delay`] the wait before the second attempt;
//! - [`BackoffConfig::max_delay`] the cap on any computed delay;
//! - [`BackoffConfig::factor`] the multiplicative growth factor;
//! - [`BackoffConfig::jitter`] the symmetric randomization fraction.
//!
//! ## Freeze on first use
//! The raw fields stay mutable, but the first retry that uses a policy normalizes them
//! into a [`FrozenBackoff`] snapshot exactly once. Every later call (concurrent or not)
//! reads only the snapshot, so edits made after first use have no effect.
//!
//! ## Normalization
//! ```text
//! attempts  == 0            → 1
//! max_delay == 0            → FOREVER
//! factor    <  1.0 or NaN   → 1.0
//! jitter    <  0.0 or !finite → 0.0 (and 0.0 disables jitter)
//! ```
//! Invalid values are clamped silently; no error is ever raised.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use retryit::{BackoffConfig, BackoffPolicy, FOREVER};
//!
//! let policy = BackoffPolicy::new(BackoffConfig {
//!     attempts: 0,
//!     initial_delay: Duration::from_millis(100),
//!     max_delay: Duration::ZERO,
//!     factor: 0.5,
//!     jitter: -1.0,
//! });
//!
//! let frozen = policy.frozen();
//! assert_eq!(frozen.attempts(), 1);
//! assert_eq!(frozen.max_delay(), FOREVER);
//! assert_eq!(frozen.factor(), 1.0);
//! assert_eq!(frozen.jitter(), 0.0);
//! ```

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::policies::jitter::JitterPolicy;
use crate::policies::schedule::Schedule;

/// One year: use as [`BackoffConfig::max_delay`] to effectively disable the cap.
pub const FOREVER: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Attempts a call 5 times with a constant 500ms between calls.
pub static CONSTANT_DELAY: BackoffPolicy = BackoffPolicy::new(BackoffConfig::CONSTANT);

/// A sane default exponential policy: 5 attempts, 500ms doubling up to 8s, 10% jitter.
pub static EXPONENTIAL_BACKOFF: BackoffPolicy = BackoffPolicy::new(BackoffConfig::EXPONENTIAL);

/// Raw, possibly invalid, backoff configuration.
///
/// All fields are public; values are normalized only when a [`BackoffPolicy`]
/// built from this config is first used.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackoffConfig {
    /// Total number of attempts. Treated as `>= 1`.
    pub attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Maximum delay between attempts (`0` = [`FOREVER`]).
    pub max_delay: Duration,
    /// Growth applied to the previous delay. Treated as `>= 1.0`; `2.0` is a standard exponential backoff.
    pub factor: f64,
    /// Symmetric randomization fraction. Treated as `>= 0.0`; `0.0` disables jitter.
    pub jitter: f64,
}

impl BackoffConfig {
    /// 5 attempts, fixed 500ms spacing, no growth.
    pub const CONSTANT: Self = Self {
        attempts: 5,
        initial_delay: Duration::from_millis(500),
        max_delay: Duration::ZERO,
        factor: 1.0,
        jitter: 0.0,
    };

    /// 5 attempts, 500ms initial, 2x growth, 8s cap, 10% jitter.
    pub const EXPONENTIAL: Self = Self {
        attempts: 5,
        initial_delay: Duration::from_millis(500),
        max_delay: Duration::from_secs(8),
        factor: 2.0,
        jitter: 0.1,
    };
}

/// Retry backoff policy: raw configuration plus a freeze-once snapshot.
///
/// Safe to share by reference across any number of concurrent retries.
pub struct BackoffPolicy {
    config: BackoffConfig,
    frozen: OnceLock<FrozenBackoff>,
}

impl BackoffPolicy {
    /// Creates an unfrozen policy from a raw configuration.
    pub const fn new(config: BackoffConfig) -> Self {
        Self {
            config,
            frozen: OnceLock::new(),
        }
    }

    /// Returns the raw configuration as supplied (not normalized).
    pub fn config(&self) -> &BackoffConfig {
        &self.config
    }

    /// Returns the raw configuration for editing.
    ///
    /// Edits only matter before the first use; afterwards the snapshot wins.
    pub fn config_mut(&mut self) -> &mut BackoffConfig {
        &mut self.config
    }

    /// Returns the frozen snapshot, normalizing and freezing on the first call.
    ///
    /// Concurrent first calls race safely: exactly one freeze runs and every caller
    /// observes the same snapshot.
    pub fn frozen(&self) -> &FrozenBackoff {
        self.frozen.get_or_init(|| FrozenBackoff::normalize(&self.config))
    }

    /// Whether the policy has already been frozen by a first use.
    pub fn is_frozen(&self) -> bool {
        self.frozen.get().is_some()
    }
}

impl Default for BackoffPolicy {
    /// Returns an unfrozen [`BackoffConfig::EXPONENTIAL`] policy.
    fn default() -> Self {
        Self::new(BackoffConfig::EXPONENTIAL)
    }
}

impl Clone for BackoffPolicy {
    /// Copies the raw configuration only; the clone freezes independently.
    fn clone(&self) -> Self {
        Self::new(self.config)
    }
}

impl From<BackoffConfig> for BackoffPolicy {
    fn from(config: BackoffConfig) -> Self {
        Self::new(config)
    }
}

impl fmt::Debug for BackoffPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackoffPolicy")
            .field("config", &self.config)
            .field("frozen", &self.frozen.get())
            .finish()
    }
}

/// Normalized, immutable backoff parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrozenBackoff {
    attempts: u32,
    initial_delay: Duration,
    max_delay: Duration,
    factor: f64,
    jitter: JitterPolicy,
}

impl FrozenBackoff {
    /// Normalizes a raw configuration.
    pub fn normalize(config: &BackoffConfig) -> Self {
        let max_delay = if config.max_delay.is_zero() {
            FOREVER
        } else {
            config.max_delay
        };
        // NaN fails the `>=` checks and falls back to the neutral value
        let factor = if config.factor >= 1.0 { config.factor } else { 1.0 };
        let jitter = if config.jitter >= 0.0 && config.jitter.is_finite() {
            config.jitter
        } else {
            0.0
        };

        Self {
            attempts: config.attempts.max(1),
            initial_delay: config.initial_delay,
            max_delay,
            factor,
            jitter: JitterPolicy::from_fraction(jitter),
        }
    }

    /// Total number of attempts (`>= 1`).
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Delay before the second attempt.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Cap on any computed delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Growth factor (`>= 1.0`).
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Jitter fraction (`0.0` when jitter is disabled).
    pub fn jitter(&self) -> f64 {
        self.jitter.fraction()
    }

    /// Jitter transform applied to every grown delay.
    pub fn jitter_policy(&self) -> JitterPolicy {
        self.jitter
    }

    /// Whether the jitter transform is skipped entirely.
    pub fn skips_jitter(&self) -> bool {
        self.jitter == JitterPolicy::None
    }

    /// Computes the delay that follows `prev`.
    ///
    /// `prev × factor`, capped at [`FrozenBackoff::max_delay`], then jittered.
    /// Jitter compounds: callers feed the previous *jittered* value back in.
    pub fn next_delay<R: Rng>(&self, prev: Duration, rng: &mut R) -> Duration {
        let grown = prev.as_nanos() as f64 * self.factor;
        // 0 × ∞ is NaN: a zero delay stays zero under an unbounded factor
        let grown = if grown.is_nan() { 0.0 } else { grown };
        let capped = grown.min(self.max_delay.as_nanos() as f64);
        self.jitter.apply(Duration::from_nanos(capped as u64), rng)
    }

    /// Returns the delay schedule using a generator seeded from the thread-local one.
    pub fn schedule(&self) -> Schedule<StdRng> {
        Schedule::new(*self, StdRng::from_rng(&mut rand::rng()))
    }

    /// Returns the delay schedule driven by the given random source.
    pub fn schedule_with<R: Rng>(&self, rng: R) -> Schedule<R> {
        Schedule::new(*self, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};

    #[test]
    fn test_normalizes_bad_inputs() {
        let policy = BackoffPolicy::new(BackoffConfig {
            attempts: 0,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            factor: 0.0,
            jitter: -1.0,
        });
        let frozen = policy.frozen();

        assert_eq!(frozen.attempts(), 1);
        assert_eq!(frozen.initial_delay(), Duration::ZERO);
        assert_eq!(frozen.max_delay(), FOREVER);
        assert_eq!(frozen.factor(), 1.0);
        assert_eq!(frozen.jitter(), 0.0);
        assert!(frozen.skips_jitter());
    }

    #[test]
    fn test_zero_delay_stays_zero_under_infinite_factor() {
        let frozen = FrozenBackoff::normalize(&BackoffConfig {
            attempts: 3,
            initial_delay: Duration::ZERO,
            max_delay: Duration::from_secs(5),
            factor: f64::INFINITY,
            jitter: 0.0,
        });
        let delays: Vec<_> = frozen.schedule().collect();
        assert_eq!(delays, vec![Duration::ZERO, Duration::ZERO]);

        // a non-zero delay jumps straight to the cap
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            frozen.next_delay(Duration::from_millis(1), &mut rng),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_non_finite_inputs_fall_back() {
        let frozen = FrozenBackoff::normalize(&BackoffConfig {
            attempts: 3,
            factor: f64::NAN,
            jitter: f64::INFINITY,
            ..BackoffConfig::default()
        });
        assert_eq!(frozen.factor(), 1.0);
        assert!(frozen.skips_jitter());
    }

    #[test]
    fn test_valid_inputs_pass_through() {
        let frozen = FrozenBackoff::normalize(&BackoffConfig::EXPONENTIAL);
        assert_eq!(frozen.attempts(), 5);
        assert_eq!(frozen.initial_delay(), Duration::from_millis(500));
        assert_eq!(frozen.max_delay(), Duration::from_secs(8));
        assert_eq!(frozen.factor(), 2.0);
        assert_eq!(frozen.jitter(), 0.1);
        assert!(!frozen.skips_jitter());
    }

    #[test]
    fn test_freeze_ignores_later_edits() {
        let mut policy = BackoffPolicy::new(BackoffConfig {
            attempts: 1,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
            factor: 1.0,
            jitter: 1.0,
        });
        assert!(!policy.is_frozen());
        let before = *policy.frozen();
        assert!(policy.is_frozen());

        *policy.config_mut() = BackoffConfig {
            attempts: 7,
            initial_delay: Duration::from_millis(7),
            max_delay: Duration::from_millis(7),
            factor: 7.0,
            jitter: 7.0,
        };

        assert_eq!(policy.config().attempts, 7);
        assert_eq!(*policy.frozen(), before);
        assert_eq!(policy.frozen().attempts(), 1);
        assert_eq!(policy.frozen().jitter(), 1.0);
    }

    #[test]
    fn test_concurrent_first_use_freezes_once() {
        let policy = Arc::new(BackoffPolicy::new(BackoffConfig::EXPONENTIAL));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let policy = Arc::clone(&policy);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    policy.frozen() as *const FrozenBackoff as usize
                })
            })
            .collect();

        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(addrs[0], policy.frozen() as *const FrozenBackoff as usize);
    }

    #[test]
    fn test_clone_is_unfrozen() {
        let policy = BackoffPolicy::new(BackoffConfig::CONSTANT);
        let _ = policy.frozen();

        let copy = policy.clone();
        assert!(!copy.is_frozen());
        assert_eq!(copy.config(), policy.config());
    }

    #[test]
    fn test_named_defaults() {
        let constant = CONSTANT_DELAY.frozen();
        assert_eq!(constant.attempts(), 5);
        assert_eq!(constant.initial_delay(), Duration::from_millis(500));
        assert_eq!(constant.factor(), 1.0);
        assert_eq!(constant.max_delay(), FOREVER);
        assert!(constant.skips_jitter());

        let exponential = EXPONENTIAL_BACKOFF.frozen();
        assert_eq!(exponential.max_delay(), Duration::from_secs(8));
        assert_eq!(exponential.factor(), 2.0);
        assert_eq!(exponential.jitter(), 0.1);
    }

    #[test]
    fn test_next_delay_grows_and_caps() {
        let mut rng = StdRng::seed_from_u64(1);
        let frozen = FrozenBackoff::normalize(&BackoffConfig {
            attempts: 10,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            factor: 2.0,
            jitter: 0.0,
        });

        assert_eq!(
            frozen.next_delay(Duration::from_millis(100), &mut rng),
            Duration::from_millis(200)
        );
        assert_eq!(
            frozen.next_delay(Duration::from_millis(800), &mut rng),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn test_next_delay_huge_factor_clamps_to_max() {
        let mut rng = StdRng::seed_from_u64(1);
        let frozen = FrozenBackoff::normalize(&BackoffConfig {
            attempts: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            factor: f64::MAX,
            jitter: 0.0,
        });
        assert_eq!(
            frozen.next_delay(Duration::from_secs(1), &mut rng),
            Duration::from_secs(10)
        );
    }
}
