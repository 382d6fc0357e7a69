//! Bar interval definitions.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigError;

/// Width of a bar bucket: a positive whole number of seconds that fits in
/// 64-bit nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval(TimeDelta);

impl Interval {
    /// One second.
    pub const SECOND: Self = Self(TimeDelta::seconds(1));
    /// One minute.
    pub const MINUTE: Self = Self(TimeDelta::minutes(1));
    /// One hour.
    pub const HOUR: Self = Self(TimeDelta::hours(1));
    /// One day.
    pub const DAY: Self = Self(TimeDelta::days(1));

    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveInterval`] if `delta <= 0`,
    /// [`ConfigError::FractionalInterval`] if `delta` has a sub-second part and
    /// [`ConfigError::IntervalTooLong`] if it overflows 64-bit nanoseconds.
    pub fn new(delta: TimeDelta) -> Result<Self, ConfigError> {
        if delta <= TimeDelta::zero() {
            return Err(ConfigError::NonPositiveInterval(delta));
        }
        if delta.subsec_nanos() != 0 {
            return Err(ConfigError::FractionalInterval(delta));
        }
        if delta.num_nanoseconds().is_none() {
            return Err(ConfigError::IntervalTooLong);
        }
        Ok(Self(delta))
    }

    /// Creates an interval of `secs` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveInterval`] if `secs <= 0` and
    /// [`ConfigError::IntervalTooLong`] if `secs` is out of range.
    pub fn from_secs(secs: i64) -> Result<Self, ConfigError> {
        if secs <= 0 {
            return Err(ConfigError::NonPositiveInterval(
                TimeDelta::try_seconds(secs).unwrap_or(TimeDelta::MIN),
            ));
        }
        Self::new(TimeDelta::try_seconds(secs).ok_or(ConfigError::IntervalTooLong)?)
    }

    /// Returns the interval as a [`TimeDelta`].
    #[must_use]
    pub const fn as_delta(&self) -> TimeDelta {
        self.0
    }

    /// Returns the interval in seconds.
    #[must_use]
    pub const fn num_seconds(&self) -> i64 {
        self.0.num_seconds()
    }

    /// Returns the interval in nanoseconds.
    #[must_use]
    pub fn as_nanos(&self) -> i64 {
        // Checked in `new`.
        self.0.num_nanoseconds().unwrap_or(i64::MAX)
    }

    /// Returns the preset codes with their widths, shortest first.
    #[must_use]
    pub const fn presets() -> &'static [(&'static str, i64)] {
        &[
            ("s1", 1),
            ("m1", 60),
            ("m5", 300),
            ("m15", 900),
            ("m30", 1800),
            ("h1", 3600),
            ("h4", 14400),
            ("h6", 21600),
            ("h12", 43200),
            ("d1", 86400),
        ]
    }

    /// Returns the preset code for this interval, if it has one.
    #[must_use]
    pub fn preset_code(&self) -> Option<&'static str> {
        let secs = self.num_seconds();
        Self::presets()
            .iter()
            .find(|(_, width)| *width == secs)
            .map(|(code, _)| *code)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::MINUTE
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.num_seconds() {
            s if s % 86400 == 0 => write!(f, "{}d", s / 86400),
            s if s % 3600 == 0 => write!(f, "{}h", s / 3600),
            s if s % 60 == 0 => write!(f, "{}m", s / 60),
            s => write!(f, "{s}s"),
        }
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let secs = match lower.as_str() {
            "s1" | "second" => 1,
            "m1" | "minute" => 60,
            "m5" => 300,
            "m15" => 900,
            "m30" => 1800,
            "h1" | "hour" => 3600,
            "h4" => 14400,
            "h6" => 21600,
            "h12" => 43200,
            "d1" | "day" | "daily" => 86400,
            other => return parse_amount(other).ok_or_else(|| IntervalParseError(s.to_string())),
        };
        Self::from_secs(secs).map_err(|_| IntervalParseError(s.to_string()))
    }
}

/// Parses `<n><unit>` (`90s`, `5m`, `2h`) or a bare number of seconds.
fn parse_amount(s: &str) -> Option<Interval> {
    let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(split);
    let amount: i64 = digits.parse().ok()?;
    let delta = match unit {
        "" | "s" | "sec" | "secs" => TimeDelta::try_seconds(amount)?,
        "m" | "min" | "mins" => TimeDelta::try_minutes(amount)?,
        "h" | "hr" | "hrs" => TimeDelta::try_hours(amount)?,
        "d" | "day" | "days" => TimeDelta::try_days(amount)?,
        _ => return None,
    };
    Interval::new(delta).ok()
}

impl TryFrom<String> for Interval {
    type Error = IntervalParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.to_string()
    }
}

impl From<Interval> for TimeDelta {
    fn from(interval: Interval) -> Self {
        interval.0
    }
}

/// Error returned when parsing an invalid interval string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid interval '{}', expected a preset (s1, m1, m5, m15, m30, h1, h4, h6, h12, d1) \
             or a positive amount such as 90s, 5m, 2h",
            self.0
        )
    }
}

impl std::error::Error for IntervalParseError {}
