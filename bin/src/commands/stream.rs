//! Stream command implementation.
//!
//! Reads one price per line from stdin, timestamps it with the system clock
//! and prints every bar notification as NDJSON through a hub subscriber.

use crate::display::AggregationArgs;
use anyhow::Result;
use candlewick_lib::parse_price;
use candlewick_lib::prelude::*;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// Aggregate prices from stdin until EOF or Ctrl-C.
pub(crate) async fn stream(args: &AggregationArgs, completed_only: bool) -> Result<()> {
    let hub = Arc::new(BarHub::new());
    let printer = stdout_subscriber(completed_only);
    let topic = BarTopic::new(args.key(), args.interval.num_seconds());
    hub.subscribe(&printer, [topic.clone()]);

    let mut aggregator = BarAggregator::from_config(
        args.key(),
        &args.config(),
        SystemClock,
        HubSink::new(Arc::clone(&hub)),
    )?;
    info!(%topic, interval = %args.interval, "streaming from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut accepted = 0u64;
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let Some(price) = last_field(&line).and_then(parse_price) else {
                    if !line.trim().is_empty() {
                        warn!(line = %line.trim(), "unparseable price");
                    }
                    continue;
                };
                if aggregator.on_tick(price).is_ok() {
                    accepted += 1;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    hub.unsubscribe(&printer, [topic]);
    info!(
        accepted,
        retained = aggregator.history().len(),
        "stream finished"
    );
    Ok(())
}

/// Returns the last comma/tab separated field, so both `price` and
/// `timestamp,price` lines are accepted. Timestamps are ignored; the
/// system clock decides the bucket.
fn last_field(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    trimmed.rsplit([',', '\t']).next()
}

fn stdout_subscriber(completed_only: bool) -> SharedSubscriber<BarEvent> {
    subscriber(move |event: &BarEvent| {
        if completed_only && !event.is_completed() {
            return Ok(());
        }
        let mut out = std::io::stdout().lock();
        JsonFormatter::write_line(event, &mut out)
            .and_then(|()| out.flush().map_err(Into::into))
            .map_err(|_| SubscriberError::Closed)
    })
}
