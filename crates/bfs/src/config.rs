//! Tunable knobs for the aggregator and the simulated locale count.
//!
//! Plain `Default`-implementing structs rather than a builder: every
//! field has a sensible default and callers override only what they
//! need. The aggregator's two knobs are also part of the external
//! interface as environment variables, so `AggregatorConfig::from_env`
//! layers an environment override on top of the programmatic default —
//! the programmatic value, when explicitly constructed via
//! [`AggregatorConfig::new`], still takes precedence over the
//! environment at the call site that chooses to use it.

use std::env;

/// Buffer capacity and channel back-pressure bound for [`crate::aggregator::Aggregator`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Number of elements buffered per destination locale before a flush
    /// is triggered. Environment override: `CHPL_AGGREGATION_DST_BUFF_SIZE`.
    pub buffer_capacity: usize,
    /// Number of frontier vertices a worker expands between cooperative
    /// yield points (a `std::thread::yield_now()` call giving the OS
    /// scheduler a chance to run other locale workers on the same core).
    /// Environment override: `CHPL_AGGREGATION_YIELD_FREQUENCY`.
    pub yield_frequency: usize,
}

impl AggregatorConfig {
    pub const DEFAULT_BUFFER_CAPACITY: usize = 4096;
    pub const DEFAULT_YIELD_FREQUENCY: usize = 1024;

    pub fn new(buffer_capacity: usize, yield_frequency: usize) -> Self {
        Self {
            buffer_capacity,
            yield_frequency,
        }
    }

    /// Builds a config from `CHPL_AGGREGATION_DST_BUFF_SIZE` /
    /// `CHPL_AGGREGATION_YIELD_FREQUENCY`, falling back to the default
    /// for any variable that is unset or does not parse as a non-zero
    /// `usize`.
    pub fn from_env() -> Self {
        Self {
            buffer_capacity: env_usize(
                "CHPL_AGGREGATION_DST_BUFF_SIZE",
                Self::DEFAULT_BUFFER_CAPACITY,
            ),
            yield_frequency: env_usize(
                "CHPL_AGGREGATION_YIELD_FREQUENCY",
                Self::DEFAULT_YIELD_FREQUENCY,
            ),
        }
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUFFER_CAPACITY, Self::DEFAULT_YIELD_FREQUENCY)
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|&value| value > 0)
        .unwrap_or(default)
}

/// Locale count a BFS run simulates. Defaults to `num_cpus::get()`, the
/// same default a `rayon` thread pool would pick on its own.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub locales: usize,
}

impl EngineConfig {
    pub fn new(locales: usize) -> Self {
        Self { locales }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            locales: num_cpus::get().max(1),
        }
    }
}
