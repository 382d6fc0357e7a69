//! Streaming tick-to-OHLC bar aggregation for candlewick.
//!
//! This crate provides the per-instrument bar state machine:
//!
//! - [`Bar`] - OHLC bar value type
//! - [`BarAggregator`] - Bounded, gap-filling streaming aggregator
//! - [`EventSink`] - Receiver of `completed` / `updated` notifications
//! - [`AggregatorConfig`] - Interval, retention and epoch settings

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod bar;
mod config;
mod sink;

pub use aggregator::{BarAggregator, DEFAULT_BAR_COUNT};
pub use bar::Bar;
pub use config::AggregatorConfig;
pub use sink::{BarEvent, BarEventKind, EventSink, RecordingSink};
