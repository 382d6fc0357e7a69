//! Aggregation throughput benchmarks.
//!
//! Run with: `cargo bench --package candlewick-bench`

use candlewick_bench::{StreamConfig, generate_ticks};
use candlewick_lib::{AggregatorConfig, BarAggregator, ManualClock, RecordingSink};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_tick");

    let streams = [("dense", StreamConfig::DENSE), ("sparse", StreamConfig::SPARSE)];
    for (name, config) in streams {
        let ticks = generate_ticks(config);
        group.throughput(Throughput::Elements(ticks.len() as u64));

        for interval in ["m1", "h1"] {
            let id = BenchmarkId::new(name, interval);
            group.bench_with_input(id, &ticks, |b, ticks| {
                b.iter(|| {
                    let clock = Arc::new(ManualClock::new(ticks[0].timestamp));
                    let config = AggregatorConfig::new(interval.parse().unwrap(), 1_000);
                    let mut agg =
                        BarAggregator::from_config("bench", &config, Arc::clone(&clock), ())
                            .unwrap();
                    for tick in ticks {
                        clock.set(tick.timestamp);
                        agg.on_tick(tick.price).unwrap();
                    }
                    black_box(agg.bars(60))
                });
            });
        }
    }

    group.finish();
}

fn recording_benchmark(c: &mut Criterion) {
    let ticks = generate_ticks(StreamConfig::SPARSE);
    c.bench_function("on_tick/recording_sink", |b| {
        b.iter(|| {
            let clock = Arc::new(ManualClock::new(ticks[0].timestamp));
            let mut agg = BarAggregator::new(
                "bench",
                chrono::TimeDelta::minutes(1),
                1_000,
                Arc::clone(&clock),
                RecordingSink::new(),
            )
            .unwrap();
            for tick in &ticks {
                clock.set(tick.timestamp);
                agg.on_tick(tick.price).unwrap();
            }
            black_box(agg.into_sink().into_events().len())
        });
    });
}

criterion_group!(benches, aggregate_benchmark, recording_benchmark);
criterion_main!(benches);
