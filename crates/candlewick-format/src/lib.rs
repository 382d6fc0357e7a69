//! Tick input parsing and bar output formatters for candlewick.
//!
//! This crate reads recorded ticks and writes bars or bar events to
//! various output formats:
//!
//! - [`TickReader`] - `timestamp,price` line reader
//! - [`CsvFormatter`] - CSV / TSV format
//! - [`JsonFormatter`] - JSON array or NDJSON format

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/candlewick/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod json;
mod reader;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use json::{JsonFormatter, JsonStyle};
pub use reader::{TickReader, parse_price, parse_timestamp};
