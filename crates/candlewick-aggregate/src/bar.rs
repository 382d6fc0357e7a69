//! OHLC bar (candlestick) data structure.

use candlewick_types::Interval;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLC bar summarising every tick seen in one bucket.
///
/// The bucket is `[start, start + interval)`. Once a bar leaves the
/// aggregator's current slot it is never modified again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Bucket lower bound (inclusive), aligned to the aggregator's epoch.
    pub start: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest price.
    pub high: f64,
    /// Lowest price.
    pub low: f64,
    /// Closing (latest) price.
    pub close: f64,
}

impl Bar {
    /// Creates a new bar.
    #[must_use]
    pub const fn new(start: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            start,
            open,
            high,
            low,
            close,
        }
    }

    /// Creates a bar from a single price.
    #[must_use]
    pub const fn from_price(start: DateTime<Utc>, price: f64) -> Self {
        Self::new(start, price, price, price, price)
    }

    /// Creates a flat bar for a bucket that saw no ticks.
    ///
    /// All four prices carry `previous.close`; the bucket follows `previous`.
    #[must_use]
    pub fn flat_after(previous: &Self, interval: Interval) -> Self {
        Self::from_price(previous.end(interval), previous.close)
    }

    /// Returns the exclusive upper bound of the bucket, saturating at
    /// [`DateTime::<Utc>::MAX_UTC`].
    #[must_use]
    pub fn end(&self, interval: Interval) -> DateTime<Utc> {
        self.start
            .checked_add_signed(interval.as_delta())
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns true if `time` falls inside this bar's bucket.
    #[must_use]
    pub fn contains(&self, time: DateTime<Utc>, interval: Interval) -> bool {
        self.start <= time && time < self.end(interval)
    }

    /// Returns the price range (high - low).
    #[must_use]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    /// Returns the body size (|close - open|).
    #[must_use]
    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    /// Returns true if this is a bullish (green) bar.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// Returns true if this is a bearish (red) bar.
    #[must_use]
    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    /// Returns true if open, high, low and close are all equal.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_flat(&self) -> bool {
        self.open == self.high && self.high == self.low && self.low == self.close
    }

    /// Returns the typical price ((high + low + close) / 3).
    #[must_use]
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Returns the weighted close ((high + low + 2*close) / 4).
    #[must_use]
    pub fn weighted_close(&self) -> f64 {
        (self.high + self.low + 2.0 * self.close) / 4.0
    }
}
