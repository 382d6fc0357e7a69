//! Bridge from aggregator notifications to a [`Hub`].

use candlewick_aggregate::{Bar, BarEvent, EventSink};
use candlewick_types::InstrumentKey;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::Hub;

/// Routing key for bar events: one topic per (instrument, interval).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarTopic {
    /// Instrument the bars belong to.
    pub instrument: InstrumentKey,
    /// Bar width in seconds. Intervals are always whole seconds, so each
    /// interval maps to its own topic.
    pub interval_secs: i64,
}

impl BarTopic {
    /// Creates a topic.
    #[must_use]
    pub fn new(instrument: impl Into<InstrumentKey>, interval_secs: i64) -> Self {
        Self {
            instrument: instrument.into(),
            interval_secs,
        }
    }
}

impl std::fmt::Display for BarTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bars.{}.{}s", self.instrument, self.interval_secs)
    }
}

/// Hub carrying bar events.
pub type BarHub = Hub<BarTopic, BarEvent>;

/// [`EventSink`] that publishes every notification on a shared [`BarHub`].
#[derive(Debug, Clone)]
pub struct HubSink {
    hub: Arc<BarHub>,
}

impl HubSink {
    /// Creates a sink publishing to `hub`.
    #[must_use]
    pub const fn new(hub: Arc<BarHub>) -> Self {
        Self { hub }
    }

    /// Returns the hub this sink publishes to.
    #[must_use]
    pub const fn hub(&self) -> &Arc<BarHub> {
        &self.hub
    }

    fn publish(&self, event: &BarEvent) {
        let topic = BarTopic::new(event.instrument.clone(), event.interval_secs);
        self.hub.publish(&topic, event);
    }
}

impl EventSink for HubSink {
    fn on_bar_completed(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        self.publish(&BarEvent::completed(key, interval_secs, bar));
    }

    fn on_bar_updated(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        self.publish(&BarEvent::updated(key, interval_secs, bar));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscriber;
    use candlewick_aggregate::{BarAggregator, BarEventKind};
    use candlewick_types::ManualClock;
    use chrono::{TimeDelta, TimeZone, Utc};
    use parking_lot::Mutex;

    #[test]
    fn test_topic_display() {
        assert_eq!(BarTopic::new("eurusd", 60).to_string(), "bars.eurusd.60s");
    }

    #[test]
    fn test_aggregator_publishes_through_hub() {
        let hub = Arc::new(BarHub::new());
        let seen: Arc<Mutex<Vec<BarEvent>>> = Arc::default();
        let seen_ref = Arc::clone(&seen);
        let sub = subscriber(move |event: &BarEvent| {
            seen_ref.lock().push(event.clone());
            Ok(())
        });
        hub.subscribe(&sub, [BarTopic::new("eurusd", 60)]);

        let start = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 10).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let mut agg = BarAggregator::new(
            "eurusd",
            TimeDelta::minutes(1),
            10,
            clock.clone(),
            HubSink::new(Arc::clone(&hub)),
        )
        .unwrap();

        agg.on_tick(10.0).unwrap();
        clock.advance(TimeDelta::minutes(1));
        agg.on_tick(11.0).unwrap();

        let kinds: Vec<_> = seen.lock().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![BarEventKind::Updated, BarEventKind::Completed, BarEventKind::Updated]
        );
    }

    #[test]
    fn test_other_topics_are_not_notified() {
        let hub = Arc::new(BarHub::new());
        let seen: Arc<Mutex<usize>> = Arc::default();
        let seen_ref = Arc::clone(&seen);
        let sub = subscriber(move |_: &BarEvent| {
            *seen_ref.lock() += 1;
            Ok(())
        });
        hub.subscribe(&sub, [BarTopic::new("eurusd", 300)]);

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 10).unwrap());
        let sink = HubSink::new(hub);
        let mut agg =
            BarAggregator::new("eurusd", TimeDelta::minutes(1), 10, &clock, sink).unwrap();
        agg.on_tick(10.0).unwrap();

        assert_eq!(*seen.lock(), 0);
    }

    #[test]
    fn test_short_intervals_keep_separate_topics() {
        let hub = Arc::new(BarHub::new());
        let seen: Arc<Mutex<Vec<i64>>> = Arc::default();
        let seen_ref = Arc::clone(&seen);
        let sub = subscriber(move |event: &BarEvent| {
            seen_ref.lock().push(event.interval_secs);
            Ok(())
        });
        hub.subscribe(&sub, [BarTopic::new("eurusd", 2)]);

        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 10).unwrap());
        let mut one = BarAggregator::new(
            "eurusd",
            TimeDelta::seconds(1),
            10,
            &clock,
            HubSink::new(Arc::clone(&hub)),
        )
        .unwrap();
        let mut two = BarAggregator::new(
            "eurusd",
            TimeDelta::seconds(2),
            10,
            &clock,
            HubSink::new(Arc::clone(&hub)),
        )
        .unwrap();

        one.on_tick(10.0).unwrap();
        assert!(seen.lock().is_empty());
        two.on_tick(10.0).unwrap();
        assert_eq!(*seen.lock(), vec![2]);

        // Sub-second widths are refused.
        let rejected = BarAggregator::new("eurusd", TimeDelta::milliseconds(250), 10, &clock, ());
        assert!(rejected.is_err());
    }
}
