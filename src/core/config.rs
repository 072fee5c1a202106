//! # Executor configuration.
//!
//! Provides [`Config`] settings for an [`Executor`](crate::Executor). The backoff
//! itself lives in [`BackoffPolicy`](crate::BackoffPolicy); this covers only how the
//! executor runs it.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → no event bus, nothing is published
//! - `seed = None` → jitter draws from a generator seeded by the thread-local RNG

/// Configuration for the retry executor.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (`0` = events disabled)
/// - `seed`: Fixed jitter seed; every invocation replays the same random sequence
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Receivers that lag behind more than `bus_capacity` messages will
    /// receive `Lagged` and skip older items.
    pub bus_capacity: usize,

    /// Seed for the per-invocation jitter generator.
    ///
    /// Meant for tests and reproducible runs: with a fixed seed, concurrent callers
    /// jitter in lockstep.
    pub seed: Option<u64>,
}

impl Config {
    /// Returns the bus capacity as an `Option`.
    ///
    /// - `None` → no bus
    /// - `Some(n)` → broadcast channel of `n` slots
    #[inline]
    pub fn bus_capacity(&self) -> Option<usize> {
        if self.bus_capacity == 0 {
            None
        } else {
            Some(self.bus_capacity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_bus() {
        let cfg = Config::default();
        assert_eq!(cfg.bus_capacity(), None);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn test_bus_capacity_some() {
        let cfg = Config {
            bus_capacity: 64,
            ..Config::default()
        };
        assert_eq!(cfg.bus_capacity(), Some(64));
    }
}
