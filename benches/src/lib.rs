//! Benchmark utilities for candlewick.

use candlewick_lib::Tick;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

/// Shape of a synthetic tick stream.
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// Number of ticks to generate.
    pub ticks: usize,
    /// Mean spacing between ticks in milliseconds.
    pub mean_gap_ms: i64,
    /// Probability (0..1) that a tick follows a long silence.
    pub silence_rate: f64,
    /// Length of a silence in milliseconds.
    pub silence_ms: i64,
}

impl StreamConfig {
    /// Dense stream: every bucket sees many ticks.
    pub const DENSE: Self = Self {
        ticks: 100_000,
        mean_gap_ms: 50,
        silence_rate: 0.0,
        silence_ms: 0,
    };

    /// Sparse stream: frequent multi-bucket gaps that need flat bars.
    pub const SPARSE: Self = Self {
        ticks: 10_000,
        mean_gap_ms: 5_000,
        silence_rate: 0.05,
        silence_ms: 10 * 60 * 1000,
    };
}

/// Deterministic xorshift generator so runs are comparable.
#[derive(Debug, Clone)]
struct XorShift(u64);

impl XorShift {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Generates a random-walk tick stream with non-decreasing timestamps.
pub fn generate_ticks(config: StreamConfig) -> Vec<Tick> {
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut time: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
    let mut price = 100.0;

    (0..config.ticks)
        .map(|_| {
            let gap = (rng.next_f64() * 2.0 * config.mean_gap_ms as f64) as i64;
            time += TimeDelta::milliseconds(gap);
            if rng.next_f64() < config.silence_rate {
                time += TimeDelta::milliseconds(config.silence_ms);
            }
            price += (rng.next_f64() - 0.5) * 0.1;
            Tick::new(time, price)
        })
        .collect()
}
