//! Aggregator configuration.

use candlewick_types::{ConfigError, Epoch, Interval};
use serde::{Deserialize, Serialize};

/// Settings shared by every aggregator built from the same configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Bar width.
    pub interval: Interval,
    /// Maximum number of completed bars retained (the current bar is extra).
    pub max_bars: usize,
    /// Alignment origin for bar starts.
    pub epoch: Epoch,
}

impl AggregatorConfig {
    /// Default retention: one week of one-second bars.
    pub const DEFAULT_MAX_BARS: usize = 60 * 60 * 24 * 7;

    /// Creates a configuration with the default epoch.
    #[must_use]
    pub fn new(interval: Interval, max_bars: usize) -> Self {
        Self {
            interval,
            max_bars,
            epoch: Epoch::default(),
        }
    }

    /// Sets the alignment epoch.
    #[must_use]
    pub const fn with_epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxBars`] if `max_bars` is zero. The
    /// interval is positive by construction.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bars == 0 {
            return Err(ConfigError::ZeroMaxBars);
        }
        Ok(())
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self::new(Interval::default(), Self::DEFAULT_MAX_BARS)
    }
}
