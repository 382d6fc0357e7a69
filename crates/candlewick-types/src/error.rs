//! Error types for candlewick.

use chrono::TimeDelta;
use thiserror::Error;

use crate::{EpochParseError, IntervalParseError};

/// Result type alias for candlewick operations.
pub type Result<T> = std::result::Result<T, CandlewickError>;

/// Errors that can occur while configuring, feeding or reading aggregators.
#[derive(Error, Debug)]
pub enum CandlewickError {
    /// Invalid aggregator configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A tick was rejected.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    /// Invalid interval string.
    #[error(transparent)]
    Interval(#[from] IntervalParseError),

    /// Invalid epoch string.
    #[error(transparent)]
    Epoch(#[from] EpochParseError),

    /// Malformed tick record.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// One-based line number of the offending record.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Construction-time configuration errors. Fatal: no aggregator is built.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The bar interval was zero or negative.
    #[error("Interval must be positive, got {0}")]
    NonPositiveInterval(TimeDelta),

    /// The bar interval was not a whole number of seconds.
    #[error("Interval must be a whole number of seconds, got {0}")]
    FractionalInterval(TimeDelta),

    /// The bar interval does not fit in 64-bit nanoseconds (about 292 years).
    #[error("Interval is too long")]
    IntervalTooLong,

    /// The retention bound was zero.
    #[error("max_bars must be at least 1")]
    ZeroMaxBars,
}

/// Per-tick input errors. Recoverable: the aggregator state is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum InvalidInputError {
    /// The price was NaN or infinite.
    #[error("Price must be finite, got {0}")]
    NonFinitePrice(f64),
}
