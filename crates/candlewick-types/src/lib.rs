//! Core types for the candlewick bar aggregator.
//!
//! This crate provides the fundamental data structures shared by the
//! candlewick crates:
//!
//! - [`Tick`] - A single timestamped price observation
//! - [`Interval`] - A validated, strictly positive bar width
//! - [`Epoch`] - The fixed origin every bar start is aligned to
//! - [`InstrumentKey`] - Opaque, caller-composed instrument identifier
//! - [`Clock`] - Injectable time source ([`SystemClock`], [`ManualClock`])

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod epoch;
mod error;
mod instrument;
mod interval;
mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use epoch::{Epoch, EpochParseError, align_down, buckets_between};
pub use error::{CandlewickError, ConfigError, InvalidInputError, Result};
pub use instrument::InstrumentKey;
pub use interval::{Interval, IntervalParseError};
pub use tick::{Tick, validate_price};
