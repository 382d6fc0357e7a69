//! Streaming tick-to-bar aggregation.

use std::collections::VecDeque;

use candlewick_types::{
    Clock, ConfigError, InstrumentKey, Interval, InvalidInputError, align_down, buckets_between,
    validate_price,
};
use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, trace, warn};

use crate::{AggregatorConfig, Bar, EventSink};

/// Number of bars returned by [`BarAggregator::latest`].
pub const DEFAULT_BAR_COUNT: usize = 60;

/// Per-(instrument, interval) bar aggregator.
///
/// Ticks carry only a price; the bucket they fall in is decided by reading
/// the injected clock. The aggregator keeps a bounded FIFO history of sealed
/// bars plus the bar currently being built, and reports every change to its
/// sink. When whole buckets pass without a tick, flat bars are synthesised
/// so the history has exactly one bar per interval.
///
/// `on_tick` takes `&mut self`: callers feed each instance from a single
/// task. Independent instances share nothing.
#[derive(Debug)]
pub struct BarAggregator<C, S> {
    key: InstrumentKey,
    interval: Interval,
    max_bars: usize,
    origin: DateTime<Utc>,
    history: VecDeque<Bar>,
    current: Option<Bar>,
    clock: C,
    sink: S,
}

impl<C: Clock, S: EventSink> BarAggregator<C, S> {
    /// Creates an aggregator aligned to [`Epoch::DayStart`](candlewick_types::Epoch).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveInterval`] if `interval <= 0` and
    /// [`ConfigError::ZeroMaxBars`] if `max_bars == 0`.
    pub fn new(
        key: impl Into<InstrumentKey>,
        interval: TimeDelta,
        max_bars: usize,
        clock: C,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let config = AggregatorConfig::new(Interval::new(interval)?, max_bars);
        Self::from_config(key, &config, clock, sink)
    }

    /// Creates an aggregator from a configuration.
    ///
    /// The epoch is resolved here, against the clock's current reading, and
    /// stays fixed for the aggregator's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMaxBars`] if `config.max_bars == 0`.
    pub fn from_config(
        key: impl Into<InstrumentKey>,
        config: &AggregatorConfig,
        clock: C,
        sink: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let origin = config.epoch.resolve(clock.now());
        Ok(Self {
            key: key.into(),
            interval: config.interval,
            max_bars: config.max_bars,
            origin,
            // Retention can be large; grow on demand.
            history: VecDeque::with_capacity(config.max_bars.min(1024)),
            current: None,
            clock,
            sink,
        })
    }

    /// Feeds one price observation, timestamped by the clock.
    ///
    /// Emits a `completed` notification for every bucket sealed by this tick
    /// (oldest first) followed by exactly one `updated` notification for the
    /// current bar.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::NonFinitePrice`] for NaN or infinite
    /// prices; state is left unchanged and nothing is emitted.
    pub fn on_tick(&mut self, price: f64) -> Result<(), InvalidInputError> {
        if let Err(err) = validate_price(price) {
            warn!(instrument = %self.key, price, "rejected tick");
            return Err(err);
        }

        let now = self.clock.now();
        let current = match self.current {
            None => {
                let start = align_down(self.origin, self.interval, now);
                trace!(instrument = %self.key, %start, price, "first bar");
                Bar::from_price(start, price)
            }
            Some(mut bar) if now < bar.end(self.interval) => {
                update(&mut bar, price);
                bar
            }
            Some(bar) => self.seal_and_advance(bar, price, now),
        };

        self.current = Some(current);
        self.sink
            .on_bar_updated(&self.key, self.interval.num_seconds(), &current);
        Ok(())
    }

    /// Seals `bar` (and any empty buckets after it) and returns the new
    /// current bar for the bucket after the last sealed one.
    fn seal_and_advance(&mut self, bar: Bar, price: f64, now: DateTime<Utc>) -> Bar {
        let elapsed = buckets_between(bar.start, now, self.interval);
        debug!(instrument = %self.key, start = %bar.start, elapsed, "bucket elapsed");

        let mut sealed = bar;
        self.seal(sealed);
        for _ in 1..elapsed {
            sealed = Bar::flat_after(&sealed, self.interval);
            self.seal(sealed);
        }
        if elapsed > 1 {
            debug!(instrument = %self.key, flat_bars = elapsed - 1, "filled gap");
        }

        Bar {
            start: sealed.end(self.interval),
            open: sealed.close,
            high: if price > sealed.high { price } else { sealed.high },
            low: if price < sealed.low { price } else { sealed.low },
            close: price,
        }
    }

    fn seal(&mut self, bar: Bar) {
        self.sink
            .on_bar_completed(&self.key, self.interval.num_seconds(), &bar);
        self.history.push_back(bar);
        if self.history.len() > self.max_bars {
            self.history.pop_front();
        }
    }
}

impl<C, S> BarAggregator<C, S> {
    /// Returns the most recent `n` bars, oldest first.
    ///
    /// The current bar is always last. Returns an empty vector before the
    /// first tick or when `n == 0`; otherwise up to `n - 1` history bars
    /// precede the current one.
    #[must_use]
    pub fn bars(&self, n: usize) -> Vec<Bar> {
        let Some(current) = self.current else {
            return Vec::new();
        };
        if n == 0 {
            return Vec::new();
        }

        let take = (n - 1).min(self.history.len());
        self.history
            .iter()
            .skip(self.history.len() - take)
            .copied()
            .chain(std::iter::once(current))
            .collect()
    }

    /// Returns the most recent [`DEFAULT_BAR_COUNT`] bars.
    #[must_use]
    pub fn latest(&self) -> Vec<Bar> {
        self.bars(DEFAULT_BAR_COUNT)
    }

    /// Returns the bar currently being built.
    #[must_use]
    pub const fn current(&self) -> Option<&Bar> {
        self.current.as_ref()
    }

    /// Returns the sealed bars, oldest first.
    #[must_use]
    pub const fn history(&self) -> &VecDeque<Bar> {
        &self.history
    }

    /// Returns the instrument key.
    #[must_use]
    pub const fn key(&self) -> &InstrumentKey {
        &self.key
    }

    /// Returns the bar interval.
    #[must_use]
    pub const fn interval(&self) -> Interval {
        self.interval
    }

    /// Returns the retention bound for sealed bars.
    #[must_use]
    pub const fn max_bars(&self) -> usize {
        self.max_bars
    }

    /// Returns the resolved alignment origin.
    #[must_use]
    pub const fn origin(&self) -> DateTime<Utc> {
        self.origin
    }

    /// Returns the clock.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Returns the sink mutably.
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consumes the aggregator, returning its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Applies a tick that falls inside `bar`'s bucket. Ties keep the existing
/// extremum.
fn update(bar: &mut Bar, price: f64) {
    if price > bar.high {
        bar.high = price;
    }
    if price < bar.low {
        bar.low = price;
    }
    bar.close = price;
}
