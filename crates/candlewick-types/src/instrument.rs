//! Instrument identifiers.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Opaque identifier for the instrument an aggregator summarises.
///
/// The caller decides how the key is composed (for example
/// `"binance:btcusdt"`); aggregators only use it to tag notifications.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct InstrumentKey(String);

impl InstrumentKey {
    /// Creates a key from any string-like value.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Composes a key from an exchange (or venue) and a symbol.
    #[must_use]
    pub fn compose(venue: &str, symbol: &str) -> Self {
        Self(format!("{venue}:{symbol}"))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for InstrumentKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl AsRef<str> for InstrumentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
