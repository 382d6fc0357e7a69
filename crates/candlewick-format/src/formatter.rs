//! Output format abstraction.

use candlewick_aggregate::{Bar, BarEvent};
use std::io::Write;
use thiserror::Error;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Tsv, Self::Json, Self::Ndjson]
    }

    /// Writes bars in this format with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError> {
        match self {
            Self::Csv => crate::CsvFormatter::new().write_bars(bars, writer),
            Self::Tsv => crate::CsvFormatter::tsv().write_bars(bars, writer),
            Self::Json => crate::JsonFormatter::new().write_bars(bars, writer),
            Self::Ndjson => crate::JsonFormatter::ndjson().write_bars(bars, writer),
        }
    }

    /// Writes bar events in this format with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_events<W: Write + Send>(
        &self,
        events: &[BarEvent],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => crate::CsvFormatter::new().write_events(events, writer),
            Self::Tsv => crate::CsvFormatter::tsv().write_events(events, writer),
            Self::Json => crate::JsonFormatter::new().write_events(events, writer),
            Self::Ndjson => crate::JsonFormatter::ndjson().write_events(events, writer),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes bars to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], writer: W) -> Result<(), FormatError>;

    /// Writes bar lifecycle events to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_events<W: Write + Send>(
        &self,
        events: &[BarEvent],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
