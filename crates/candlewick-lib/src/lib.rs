//! Streaming OHLC bar aggregation with gap filling and pub/sub dispatch.
//!
//! This is a facade crate that re-exports functionality from the candlewick
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```
//! use candlewick_lib::prelude::*;
//! use chrono::TimeDelta;
//!
//! let mut agg = BarAggregator::new(
//!     InstrumentKey::compose("binance", "btcusdt"),
//!     TimeDelta::minutes(1),
//!     60,
//!     SystemClock,
//!     RecordingSink::new(),
//! )?;
//!
//! agg.on_tick(42_000.0)?;
//! assert_eq!(agg.bars(60).len(), 1);
//! # Ok::<(), CandlewickError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use candlewick_types::*;

// Re-export aggregation
pub use candlewick_aggregate::{
    AggregatorConfig, Bar, BarAggregator, BarEvent, BarEventKind, DEFAULT_BAR_COUNT, EventSink,
    RecordingSink,
};

// Re-export dispatch
#[cfg(feature = "hub")]
pub use candlewick_hub::{
    BarHub, BarTopic, Hub, HubSink, SharedSubscriber, Subscriber, SubscriberError, subscriber,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use candlewick_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat, TickReader,
    parse_price, parse_timestamp,
};

/// Prelude module for convenient imports.
///
/// ```
/// use candlewick_lib::prelude::*;
/// ```
pub mod prelude {
    pub use candlewick_types::{
        CandlewickError, Clock, ConfigError, Epoch, InstrumentKey, Interval, InvalidInputError,
        ManualClock, Result, SystemClock, Tick,
    };

    pub use candlewick_aggregate::{
        AggregatorConfig, Bar, BarAggregator, BarEvent, BarEventKind, EventSink, RecordingSink,
    };

    #[cfg(feature = "hub")]
    pub use candlewick_hub::{
        BarHub, BarTopic, HubSink, SharedSubscriber, Subscriber, SubscriberError, subscriber,
    };

    #[cfg(feature = "format")]
    pub use candlewick_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat, TickReader};
}
