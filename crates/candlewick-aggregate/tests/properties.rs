//! Property-based tests for bar aggregation.
//!
//! For any tick sequence with non-decreasing timestamps:
//! - Every bar satisfies `low <= open, close <= high`
//! - `bars(n)` is chronological, contiguous and ends with the current bar
//! - History never exceeds `max_bars`
//! - A gap of `k` whole intervals yields `k - 1` flat bars at the pre-gap close

use std::sync::Arc;

use candlewick_aggregate::{Bar, BarAggregator, BarEventKind, RecordingSink};
use candlewick_types::{Epoch, ManualClock};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 17, 23).unwrap()
}

/// (millisecond step since previous tick, price)
fn ticks_strategy() -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::vec((0i64..=400_000, 1.0f64..1000.0), 1..200)
}

fn run(
    interval_secs: i64,
    max_bars: usize,
    ticks: &[(i64, f64)],
) -> BarAggregator<Arc<ManualClock>, RecordingSink> {
    let clock = Arc::new(ManualClock::new(start_time()));
    let mut agg = BarAggregator::new(
        "prop:test",
        TimeDelta::seconds(interval_secs),
        max_bars,
        clock.clone(),
        RecordingSink::new(),
    )
    .expect("valid configuration");

    for (step_ms, price) in ticks {
        clock.advance(TimeDelta::milliseconds(*step_ms));
        agg.on_tick(*price).expect("finite price");
    }
    agg
}

fn well_formed(bar: &Bar) -> bool {
    bar.low <= bar.open && bar.open <= bar.high && bar.low <= bar.close && bar.close <= bar.high
}

proptest! {
    /// Property: every emitted and retained bar has a consistent OHLC envelope.
    #[test]
    fn bars_are_well_formed(
        interval_secs in 1i64..=300,
        max_bars in 1usize..=50,
        ticks in ticks_strategy(),
    ) {
        let agg = run(interval_secs, max_bars, &ticks);

        for bar in agg.bars(usize::MAX) {
            prop_assert!(well_formed(&bar), "malformed bar {:?}", bar);
        }
        for event in agg.sink().events() {
            prop_assert!(well_formed(&event.bar), "malformed event {:?}", event);
        }
    }

    /// Property: `bars(n)` is ordered, gap-free and ends with the current bar.
    #[test]
    fn bars_are_chronological_and_end_with_current(
        interval_secs in 1i64..=300,
        max_bars in 1usize..=50,
        n in 0usize..=80,
        ticks in ticks_strategy(),
    ) {
        let agg = run(interval_secs, max_bars, &ticks);
        let bars = agg.bars(n);
        let interval = TimeDelta::seconds(interval_secs);

        if n == 0 {
            prop_assert!(bars.is_empty());
        } else {
            prop_assert_eq!(bars.len(), n.min(agg.history().len() + 1));
            prop_assert_eq!(bars.last(), agg.current());
            for pair in bars.windows(2) {
                prop_assert_eq!(pair[1].start - pair[0].start, interval);
            }
        }
    }

    /// Property: retention is bounded and eviction is FIFO.
    #[test]
    fn history_is_bounded_fifo(
        interval_secs in 1i64..=300,
        max_bars in 1usize..=20,
        ticks in ticks_strategy(),
    ) {
        let agg = run(interval_secs, max_bars, &ticks);
        let completed: Vec<Bar> = agg.sink().completed().copied().collect();

        prop_assert!(agg.history().len() <= max_bars);
        let kept = completed.len().min(max_bars);
        let expected: Vec<Bar> = completed[completed.len() - kept..].to_vec();
        let actual: Vec<Bar> = agg.history().iter().copied().collect();
        prop_assert_eq!(actual, expected);
    }

    /// Property: exactly one `updated` notification per tick, last for its tick.
    #[test]
    fn one_update_per_tick(
        interval_secs in 1i64..=300,
        ticks in ticks_strategy(),
    ) {
        let agg = run(interval_secs, 10, &ticks);
        let events = agg.sink().events();

        let updates = events.iter().filter(|e| e.kind == BarEventKind::Updated).count();
        prop_assert_eq!(updates, ticks.len());
        prop_assert_eq!(events.last().map(|e| e.kind), Some(BarEventKind::Updated));
    }

    /// Property: a gap of `k` intervals produces `k - 1` flat bars at the pre-gap close.
    #[test]
    fn gap_produces_flat_bars(
        interval_secs in 1i64..=3600,
        k in 1i64..=30,
        first in 1.0f64..1000.0,
        second in 1.0f64..1000.0,
    ) {
        let clock = Arc::new(ManualClock::new(start_time()));
        let config = candlewick_aggregate::AggregatorConfig::new(
            candlewick_types::Interval::from_secs(interval_secs).unwrap(),
            1000,
        )
        .with_epoch(Epoch::Unix);
        let mut agg =
            BarAggregator::from_config("gap", &config, clock.clone(), RecordingSink::new())
                .unwrap();

        agg.on_tick(first).unwrap();
        let opened = *agg.current().unwrap();
        clock.set(opened.start + TimeDelta::seconds(interval_secs * k));
        agg.on_tick(second).unwrap();

        let completed: Vec<Bar> = agg.sink().completed().copied().collect();
        prop_assert_eq!(completed.len() as i64, k);
        for flat in &completed[1..] {
            prop_assert!(flat.is_flat());
            prop_assert_eq!(flat.close, first);
        }
        let current = agg.current().unwrap();
        prop_assert_eq!(current.start, opened.start + TimeDelta::seconds(interval_secs * k));
        prop_assert_eq!(current.close, second);
    }
}
