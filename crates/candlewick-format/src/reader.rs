//! Recorded tick input.
//!
//! Records are `timestamp,price` lines. The timestamp is either RFC 3339
//! (`2024-01-15T12:30:10Z`) or integer Unix milliseconds. Blank lines,
//! `#` comments and a `timestamp,...` header on the first record line are skipped.

use candlewick_types::{CandlewickError, Tick};
use chrono::{DateTime, Utc};
use std::io::BufRead;

/// Iterator over the ticks in a line-oriented reader.
#[derive(Debug)]
pub struct TickReader<R> {
    lines: std::io::Lines<R>,
    line_no: usize,
    at_start: bool,
}

impl<R: BufRead> TickReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            at_start: true,
        }
    }
}

impl<R: BufRead> Iterator for TickReader<R> {
    type Item = Result<Tick, CandlewickError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            if std::mem::take(&mut self.at_start) && is_header(trimmed) {
                continue;
            }
            return Some(parse_record(trimmed, self.line_no));
        }
    }
}

fn is_header(line: &str) -> bool {
    line.split([',', '\t'])
        .next()
        .is_some_and(|field| field.trim().eq_ignore_ascii_case("timestamp"))
}

fn parse_record(line: &str, line_no: usize) -> Result<Tick, CandlewickError> {
    let mut fields = line.split([',', '\t']).map(str::trim);
    let (Some(ts), Some(price), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(parse_error(line_no, format!("expected 'timestamp,price', got '{line}'")));
    };

    let timestamp = parse_timestamp(ts)
        .ok_or_else(|| parse_error(line_no, format!("invalid timestamp '{ts}'")))?;
    let price =
        parse_price(price).ok_or_else(|| parse_error(line_no, format!("invalid price '{price}'")))?;
    Ok(Tick::new(timestamp, price))
}

/// Parses an RFC 3339 timestamp or integer Unix milliseconds.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parses a price field. Non-finite values (`NaN`, `inf`) are returned as-is
/// so the aggregator can reject them.
#[must_use]
pub fn parse_price(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

fn parse_error(line: usize, message: String) -> CandlewickError {
    CandlewickError::Parse { line, message }
}
