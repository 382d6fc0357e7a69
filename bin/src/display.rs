//! Shared arguments and output helpers for the candlewick CLI.

use anyhow::{Context, Result};
use candlewick_lib::prelude::*;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for bars and events.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Aggregator settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub(crate) struct AggregationArgs {
    /// Bar interval (preset such as m1, h4, or an amount such as 90s, 2h)
    #[arg(short, long, default_value = "m1")]
    pub(crate) interval: Interval,

    /// Maximum number of completed bars retained
    #[arg(long, default_value_t = AggregatorConfig::DEFAULT_MAX_BARS)]
    pub(crate) max_bars: usize,

    /// Alignment epoch: day, unix, or an RFC 3339 timestamp
    #[arg(long, default_value = "day")]
    pub(crate) epoch: Epoch,

    /// Instrument key used to tag output (e.g. binance:btcusdt)
    #[arg(long, default_value = "default")]
    pub(crate) instrument: String,
}

impl AggregationArgs {
    /// Builds the aggregator configuration.
    pub(crate) fn config(&self) -> AggregatorConfig {
        AggregatorConfig::new(self.interval, self.max_bars).with_epoch(self.epoch)
    }

    /// Returns the instrument key.
    pub(crate) fn key(&self) -> InstrumentKey {
        InstrumentKey::new(self.instrument.as_str())
    }
}

/// Opens `output` for writing, or stdout when absent.
fn open_output(output: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

/// Write bars to a file (or stdout) in the specified format.
pub(crate) fn write_bars(bars: &[Bar], output: Option<&Path>, format: Format) -> Result<()> {
    let writer = open_output(output)?;
    OutputFormat::from(format).write_bars(bars, writer)?;
    Ok(())
}

/// Write bar events to a file (or stdout) in the specified format.
pub(crate) fn write_events(
    events: &[BarEvent],
    output: Option<&Path>,
    format: Format,
) -> Result<()> {
    let writer = open_output(output)?;
    OutputFormat::from(format).write_events(events, writer)?;
    Ok(())
}
