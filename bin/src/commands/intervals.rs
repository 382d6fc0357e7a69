//! Intervals command implementation.

use candlewick_lib::prelude::*;

/// List the interval presets accepted by `--interval`.
pub(crate) fn list_intervals() {
    println!("{:<8} {:<10} {:>10}", "CODE", "WIDTH", "SECONDS");
    println!("{}", "-".repeat(30));

    for (code, secs) in Interval::presets() {
        let width = Interval::from_secs(*secs).map_or_else(|_| "-".to_string(), |i| i.to_string());
        println!("{code:<8} {width:<10} {secs:>10}");
    }

    println!("\nAny positive amount is also accepted, e.g. 90s, 7m, 2h.");
}
