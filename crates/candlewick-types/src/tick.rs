//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::InvalidInputError;

/// A single price observation with the time it was seen.
///
/// Live aggregation takes the timestamp from the clock at arrival; recorded
/// ticks carry it so a replay can drive a [`ManualClock`](crate::ManualClock).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Time the price was observed (UTC).
    pub timestamp: DateTime<Utc>,
    /// Observed price.
    pub price: f64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }

    /// Checks that the price is a finite number.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NonFinitePrice`] for NaN or infinite prices.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        validate_price(self.price)
    }
}

/// Checks that a price is finite.
///
/// # Errors
///
/// Returns [`InvalidInputError::NonFinitePrice`] for NaN or infinite prices.
pub const fn validate_price(price: f64) -> Result<(), InvalidInputError> {
    if price.is_finite() {
        Ok(())
    } else {
        Err(InvalidInputError::NonFinitePrice(price))
    }
}
