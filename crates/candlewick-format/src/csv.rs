//! CSV output format.

use candlewick_aggregate::{Bar, BarEvent};
use std::io::Write;

use crate::{FormatError, Formatter};

const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn write_bars<W: Write + Send>(&self, bars: &[Bar], mut writer: W) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "start{d}open{d}high{d}low{d}close")?;
        }

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}",
                bar.start.format(TIME_FORMAT),
                bar.open,
                bar.high,
                bar.low,
                bar.close
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_events<W: Write + Send>(
        &self,
        events: &[BarEvent],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "kind{d}instrument{d}interval_secs{d}start{d}open{d}high{d}low{d}close"
            )?;
        }

        for event in events {
            let bar = &event.bar;
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                event.kind,
                event.instrument,
                event.interval_secs,
                bar.start.format(TIME_FORMAT),
                bar.open,
                bar.high,
                bar.low,
                bar.close
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
