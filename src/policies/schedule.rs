//! # Delay schedule.
//!
//! [`Schedule`] yields the waits between attempts of one retry invocation:
//! exactly `attempts - 1` delays, one before each attempt after the first.
//!
//! ```text
//! delay[0] = initial_delay                            (no cap, no jitter)
//! delay[i] = jitter(min(delay[i-1] × factor, max_delay))
//! ```
//!
//! The sequence is iterative: jitter is reapplied to the already-jittered previous
//! value, so only the count and the `max_delay` bound on the pre-jitter value are
//! deterministic.

use std::time::Duration;

use rand::Rng;

use crate::policies::backoff::FrozenBackoff;

/// Iterator over inter-attempt delays.
#[derive(Debug)]
pub struct Schedule<R> {
    backoff: FrozenBackoff,
    prev: Option<Duration>,
    remaining: u32,
    rng: R,
}

impl<R: Rng> Schedule<R> {
    pub(crate) fn new(backoff: FrozenBackoff, rng: R) -> Self {
        Self {
            remaining: backoff.attempts().saturating_sub(1),
            prev: None,
            backoff,
            rng,
        }
    }
}

impl<R: Rng> Iterator for Schedule<R> {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let delay = match self.prev {
            None => self.backoff.initial_delay(),
            Some(prev) => self.backoff.next_delay(prev, &mut self.rng),
        };
        self.prev = Some(delay);
        Some(delay)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<R: Rng> ExactSizeIterator for Schedule<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::BackoffConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn frozen(config: BackoffConfig) -> FrozenBackoff {
        FrozenBackoff::normalize(&config)
    }

    #[test]
    fn test_single_attempt_has_no_delays() {
        let backoff = frozen(BackoffConfig {
            attempts: 1,
            initial_delay: Duration::from_secs(1),
            ..BackoffConfig::default()
        });
        assert_eq!(backoff.schedule().count(), 0);
    }

    #[test]
    fn test_yields_attempts_minus_one() {
        for attempts in 1..20 {
            let backoff = frozen(BackoffConfig {
                attempts,
                ..BackoffConfig::EXPONENTIAL
            });
            let schedule = backoff.schedule();
            assert_eq!(schedule.len(), attempts as usize - 1);
            assert_eq!(schedule.count(), attempts as usize - 1);
        }
    }

    #[test]
    fn test_exponential_growth_no_jitter() {
        let backoff = frozen(BackoffConfig {
            attempts: 6,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
            factor: 2.0,
            jitter: 0.0,
        });
        let delays: Vec<_> = backoff.schedule().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(400),
                Duration::from_millis(800),
                Duration::from_millis(1600),
            ]
        );
    }

    #[test]
    fn test_constant_factor() {
        let backoff = frozen(BackoffConfig::CONSTANT);
        for delay in backoff.schedule() {
            assert_eq!(delay, Duration::from_millis(500));
        }
    }

    #[test]
    fn test_capped_at_max() {
        let backoff = frozen(BackoffConfig {
            attempts: 12,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            factor: 2.0,
            jitter: 0.0,
        });
        let delays: Vec<_> = backoff.schedule().collect();
        assert!(delays.iter().all(|d| *d <= Duration::from_secs(1)));
        assert_eq!(delays.last(), Some(&Duration::from_secs(1)));
    }

    #[test]
    fn test_initial_delay_above_max_is_not_capped() {
        let backoff = frozen(BackoffConfig {
            attempts: 3,
            initial_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(5),
            factor: 2.0,
            jitter: 0.0,
        });
        let delays: Vec<_> = backoff.schedule().collect();
        assert_eq!(delays, vec![Duration::from_secs(10), Duration::from_secs(5)]);
    }

    #[test]
    fn test_first_delay_is_never_jittered() {
        let backoff = frozen(BackoffConfig {
            attempts: 2,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
            factor: 2.0,
            jitter: 0.5,
        });
        for seed in 0..50 {
            let mut schedule = backoff.schedule_with(StdRng::seed_from_u64(seed));
            assert_eq!(schedule.next(), Some(Duration::from_millis(500)));
        }
    }

    #[test]
    fn test_jittered_delays_stay_within_compounded_bounds() {
        let cap = Duration::from_secs(8);
        let backoff = frozen(BackoffConfig {
            attempts: 30,
            initial_delay: Duration::from_millis(500),
            max_delay: cap,
            factor: 2.0,
            jitter: 0.1,
        });

        for seed in 0..20 {
            let delays: Vec<_> = backoff
                .schedule_with(StdRng::seed_from_u64(seed))
                .collect();
            for pair in delays.windows(2) {
                let raw = pair[0].mul_f64(2.0).min(cap);
                let lo = raw.mul_f64(0.9);
                let hi = raw.mul_f64(1.1);
                let slack = Duration::from_nanos(4);
                assert!(pair[1] >= lo - slack, "{:?} < {lo:?}", pair[1]);
                assert!(pair[1] <= hi + slack, "{:?} > {hi:?}", pair[1]);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let backoff = frozen(BackoffConfig::EXPONENTIAL);
        let a: Vec<_> = backoff.schedule_with(StdRng::seed_from_u64(9)).collect();
        let b: Vec<_> = backoff.schedule_with(StdRng::seed_from_u64(9)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_initial_delay_stays_zero_with_jitter() {
        let backoff = frozen(BackoffConfig {
            attempts: 5,
            initial_delay: Duration::ZERO,
            factor: 2.0,
            jitter: 0.5,
            ..BackoffConfig::default()
        });
        assert!(backoff.schedule().all(|d| d == Duration::ZERO));
    }
}
