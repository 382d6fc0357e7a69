//! Replay command implementation.
//!
//! Feeds recorded ticks through an aggregator whose clock is moved to each
//! tick's timestamp before the tick is applied.

use crate::display::{AggregationArgs, Format, write_bars, write_events};
use anyhow::{Context, Result, bail};
use candlewick_lib::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

type ReplayAggregator = BarAggregator<Arc<ManualClock>, RecordingSink>;

/// Replay a tick file and write the resulting bars or events.
#[allow(clippy::too_many_arguments)]
pub(crate) fn replay(
    input: &Path,
    args: &AggregationArgs,
    output: Option<&Path>,
    format: Format,
    count: usize,
    events: bool,
    strict: bool,
) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let ticks = TickReader::new(BufReader::new(file));

    let Some(aggregator) = replay_ticks(ticks, args, strict)? else {
        warn!(input = %input.display(), "no ticks found");
        return Ok(());
    };

    info!(
        instrument = %aggregator.key(),
        interval = %aggregator.interval(),
        completed = aggregator.sink().completed().count(),
        retained = aggregator.history().len(),
        "replay finished"
    );

    if events {
        write_events(aggregator.sink().events(), output, format)
    } else {
        write_bars(&aggregator.bars(count), output, format)
    }
}

/// Runs `ticks` through a fresh aggregator.
///
/// The clock starts at the first tick, so a day-start epoch resolves to that
/// tick's date. Returns `None` if there were no ticks.
pub(crate) fn replay_ticks<I>(
    ticks: I,
    args: &AggregationArgs,
    strict: bool,
) -> Result<Option<ReplayAggregator>>
where
    I: IntoIterator<Item = std::result::Result<Tick, CandlewickError>>,
{
    let mut ticks = ticks.into_iter();
    let Some(first) = ticks.next().transpose()? else {
        return Ok(None);
    };

    let clock = Arc::new(ManualClock::new(first.timestamp));
    let mut aggregator = BarAggregator::from_config(
        args.key(),
        &args.config(),
        Arc::clone(&clock),
        RecordingSink::new(),
    )?;

    let mut last = first.timestamp;
    let mut rejected = 0usize;
    for tick in std::iter::once(Ok(first)).chain(ticks) {
        let tick = tick?;
        if tick.timestamp < last {
            warn!(timestamp = %tick.timestamp, previous = %last, "tick out of order");
        }
        last = last.max(tick.timestamp);

        clock.set(tick.timestamp);
        if let Err(err) = aggregator.on_tick(tick.price) {
            if strict {
                bail!("Rejected tick at {}: {err}", tick.timestamp);
            }
            rejected += 1;
        }
    }

    if rejected > 0 {
        warn!(rejected, "skipped invalid ticks");
    }
    Ok(Some(aggregator))
}
