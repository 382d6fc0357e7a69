//! Bar lifecycle notifications.

use candlewick_types::InstrumentKey;
use serde::{Deserialize, Serialize};

use crate::Bar;

/// Receiver of bar lifecycle notifications.
///
/// Calls are fire-and-forget from the aggregator's side: a sink that can
/// fail must handle (or log) the failure itself, and a slow sink must buffer
/// rather than block.
pub trait EventSink {
    /// Called once per sealed bucket, including synthesised flat buckets,
    /// in chronological order.
    fn on_bar_completed(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar);

    /// Called exactly once per accepted tick with the current bar, after any
    /// completion notifications for that tick.
    fn on_bar_updated(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar);
}

impl EventSink for () {
    fn on_bar_completed(&mut self, _key: &InstrumentKey, _interval_secs: i64, _bar: &Bar) {}

    fn on_bar_updated(&mut self, _key: &InstrumentKey, _interval_secs: i64, _bar: &Bar) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn on_bar_completed(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        (**self).on_bar_completed(key, interval_secs, bar);
    }

    fn on_bar_updated(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        (**self).on_bar_updated(key, interval_secs, bar);
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn on_bar_completed(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        (**self).on_bar_completed(key, interval_secs, bar);
    }

    fn on_bar_updated(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        (**self).on_bar_updated(key, interval_secs, bar);
    }
}

/// Which lifecycle notification a [`BarEvent`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarEventKind {
    /// The bar was sealed into history.
    Completed,
    /// The current bar changed.
    Updated,
}

impl BarEventKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Updated => "updated",
        }
    }
}

impl std::fmt::Display for BarEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An owned copy of one notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarEvent {
    /// Notification kind.
    pub kind: BarEventKind,
    /// Instrument the bar belongs to.
    pub instrument: InstrumentKey,
    /// Bar width in whole seconds.
    pub interval_secs: i64,
    /// Bar state at notification time.
    pub bar: Bar,
}

impl BarEvent {
    /// Creates a `completed` event.
    #[must_use]
    pub fn completed(instrument: &InstrumentKey, interval_secs: i64, bar: &Bar) -> Self {
        Self {
            kind: BarEventKind::Completed,
            instrument: instrument.clone(),
            interval_secs,
            bar: *bar,
        }
    }

    /// Creates an `updated` event.
    #[must_use]
    pub fn updated(instrument: &InstrumentKey, interval_secs: i64, bar: &Bar) -> Self {
        Self {
            kind: BarEventKind::Updated,
            instrument: instrument.clone(),
            interval_secs,
            bar: *bar,
        }
    }

    /// Returns true for `completed` events.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.kind == BarEventKind::Completed
    }
}

/// Sink that keeps every notification in arrival order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<BarEvent>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Returns every recorded event.
    #[must_use]
    pub fn events(&self) -> &[BarEvent] {
        &self.events
    }

    /// Returns the bars of recorded `completed` events.
    pub fn completed(&self) -> impl Iterator<Item = &Bar> {
        self.events
            .iter()
            .filter(|e| e.kind == BarEventKind::Completed)
            .map(|e| &e.bar)
    }

    /// Returns the bars of recorded `updated` events.
    pub fn updated(&self) -> impl Iterator<Item = &Bar> {
        self.events
            .iter()
            .filter(|e| e.kind == BarEventKind::Updated)
            .map(|e| &e.bar)
    }

    /// Removes and returns every recorded event.
    pub fn drain(&mut self) -> Vec<BarEvent> {
        std::mem::take(&mut self.events)
    }

    /// Consumes the recorder, returning its events.
    #[must_use]
    pub fn into_events(self) -> Vec<BarEvent> {
        self.events
    }
}

impl EventSink for RecordingSink {
    fn on_bar_completed(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        self.events.push(BarEvent::completed(key, interval_secs, bar));
    }

    fn on_bar_updated(&mut self, key: &InstrumentKey, interval_secs: i64, bar: &Bar) {
        self.events.push(BarEvent::updated(key, interval_secs, bar));
    }
}
