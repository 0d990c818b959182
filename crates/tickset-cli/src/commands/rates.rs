//! Rates command: the named rate table and interval/rate conversion.

use anyhow::Result;

use tickset_core::{DEFINED_RATES, Tickrate, canonicalize};

pub fn run(value: Option<f32>, as_interval: bool) -> Result<()> {
    match value {
        None => print_table(),
        Some(v) => {
            let interval = if as_interval { v } else { 1.0 / v };
            anyhow::ensure!(
                interval.is_finite() && interval > 0.0,
                "value must be a positive, finite number"
            );
            print_one(canonicalize(Tickrate::custom(interval)));
        }
    }
    Ok(())
}

fn print_table() {
    println!("{:<8} {:>12} {:>12}", "label", "rate", "interval");
    for rate in DEFINED_RATES {
        println!(
            "{:<8} {:>12.3} {:>12.8}",
            rate.label,
            rate.rate(),
            rate.interval
        );
    }
}

fn print_one(rate: Tickrate) {
    println!("Label:    {}", rate.label);
    println!("Rate:     {:.3} ticks/sec", rate.rate());
    println!("Interval: {:.8} sec", rate.interval);
}
