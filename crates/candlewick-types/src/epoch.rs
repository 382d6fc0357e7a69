//! Bucket alignment origin.

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Interval;

/// The fixed origin that every bar start is aligned to.
///
/// A bar start is always `origin + k * interval` for some integer `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Epoch {
    /// Midnight UTC of the day the aggregator was constructed.
    #[default]
    DayStart,
    /// 1970-01-01T00:00:00Z.
    Unix,
    /// An explicit instant.
    Fixed(DateTime<Utc>),
}

impl Epoch {
    /// Resolves the epoch to a concrete instant, using `now` for [`Epoch::DayStart`].
    #[must_use]
    pub fn resolve(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::DayStart => now.date_naive().and_time(NaiveTime::MIN).and_utc(),
            Self::Unix => DateTime::UNIX_EPOCH,
            Self::Fixed(origin) => *origin,
        }
    }
}

/// Returns the start of the bucket containing `time`.
///
/// This is the largest `origin + k * interval` that is `<= time`. Floored
/// division keeps the result correct for instants before `origin`.
#[must_use]
pub fn align_down(origin: DateTime<Utc>, interval: Interval, time: DateTime<Utc>) -> DateTime<Utc> {
    let offset = nanos_between(origin, time);
    let width = interval.as_nanos();
    offset
        .div_euclid(width)
        .checked_mul(width)
        .and_then(|nanos| origin.checked_add_signed(TimeDelta::nanoseconds(nanos)))
        .unwrap_or(if offset < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Returns how many whole intervals separate `from` and `to` (floored).
#[must_use]
pub fn buckets_between(from: DateTime<Utc>, to: DateTime<Utc>, interval: Interval) -> i64 {
    nanos_between(from, to).div_euclid(interval.as_nanos())
}

/// Saturates at `i64::MIN`/`i64::MAX` for spans beyond about 292 years.
fn nanos_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from)
        .num_nanoseconds()
        .unwrap_or(if to < from { i64::MIN } else { i64::MAX })
}

impl std::fmt::Display for Epoch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DayStart => write!(f, "day"),
            Self::Unix => write!(f, "unix"),
            Self::Fixed(origin) => write!(f, "{}", origin.to_rfc3339()),
        }
    }
}

impl FromStr for Epoch {
    type Err = EpochParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "daystart" | "day-start" | "midnight" => Ok(Self::DayStart),
            "unix" | "epoch" => Ok(Self::Unix),
            _ => DateTime::parse_from_rfc3339(s)
                .map(|dt| Self::Fixed(dt.with_timezone(&Utc)))
                .map_err(|_| EpochParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid epoch string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid epoch '{0}', expected one of: day, unix, or an RFC 3339 timestamp")]
pub struct EpochParseError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, minute, second).unwrap()
    }

    #[test]
    fn test_resolve_day_start() {
        assert_eq!(Epoch::DayStart.resolve(at(12, 30, 10)), at(0, 0, 0));
        assert_eq!(Epoch::Unix.resolve(at(12, 30, 10)), DateTime::UNIX_EPOCH);
        assert_eq!(Epoch::Fixed(at(1, 2, 3)).resolve(at(12, 30, 10)), at(1, 2, 3));
    }

    #[test]
    fn test_align_down() {
        let minute = Interval::from_secs(60).unwrap();
        assert_eq!(align_down(at(0, 0, 0), minute, at(12, 30, 10)), at(12, 30, 0));
        // Exactly on a boundary stays on that boundary.
        assert_eq!(align_down(at(0, 0, 0), minute, at(12, 31, 0)), at(12, 31, 0));
    }

    #[test]
    fn test_align_down_odd_interval() {
        // 7 minutes does not divide an hour; alignment follows the origin.
        let seven = Interval::from_secs(7 * 60).unwrap();
        assert_eq!(align_down(at(0, 0, 0), seven, at(1, 0, 0)), at(0, 56, 0));
    }

    #[test]
    fn test_align_down_before_origin() {
        let minute = Interval::from_secs(60).unwrap();
        assert_eq!(align_down(at(12, 0, 0), minute, at(11, 58, 30)), at(11, 58, 0));
    }

    #[test]
    fn test_align_down_far_from_origin() {
        let minute = Interval::from_secs(60).unwrap();
        let far = DateTime::<Utc>::MIN_UTC;
        assert_eq!(align_down(at(0, 0, 0), minute, far), DateTime::<Utc>::MIN_UTC);
        assert!(buckets_between(at(0, 0, 0), far, minute) < 0);
    }

    #[test]
    fn test_buckets_between() {
        let minute = Interval::from_secs(60).unwrap();
        assert_eq!(buckets_between(at(12, 30, 0), at(12, 30, 59), minute), 0);
        assert_eq!(buckets_between(at(12, 30, 0), at(12, 31, 0), minute), 1);
        assert_eq!(buckets_between(at(12, 30, 0), at(12, 33, 10), minute), 3);
    }

    #[test]
    fn test_epoch_parse() {
        assert_eq!("day".parse::<Epoch>().unwrap(), Epoch::DayStart);
        assert_eq!("UNIX".parse::<Epoch>().unwrap(), Epoch::Unix);
        assert_eq!(
            "2024-01-15T01:02:03Z".parse::<Epoch>().unwrap(),
            Epoch::Fixed(at(1, 2, 3))
        );
        assert!("yesterday".parse::<Epoch>().is_err());
    }
}
