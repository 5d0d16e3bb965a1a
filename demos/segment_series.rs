//! Segments a synthetic step signal and prints the detected levels.
//!
//! ```text
//! RUST_LOG=u_partition=debug cargo run --example segment_series -- l2 25
//! ```
//!
//! The first argument picks the fitness (`l2` or `runs`), the second the
//! per-segment penalty.

use std::env;

use tracing_subscriber::EnvFilter;
use u_partition::partition::{partition_dyn, FitnessFn, Objective};
use u_partition::segmentation::L2Segmentation;
use u_partition::PartitionError;

fn signal() -> Vec<f64> {
    let mut series = Vec::new();
    for (level, len) in [(0.0, 40), (6.0, 25), (2.5, 30), (-3.0, 20)] {
        for k in 0..len {
            // Deterministic ripple in [-0.4, 0.4].
            let ripple = ((k * 7919) % 9) as f64 / 10.0 - 0.4;
            series.push(level + ripple);
        }
    }
    series
}

fn main() -> Result<(), PartitionError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = env::args().skip(1);
    let name = args.next().unwrap_or_else(|| "l2".to_string());
    let penalty: f64 = args
        .next()
        .map(|s| s.parse::<f64>())
        .transpose()
        .map_err(|e| PartitionError::InvalidArgument(format!("bad penalty: {e}")))?
        .unwrap_or(25.0);

    let series = signal();
    let problem = L2Segmentation::new(&series, penalty)?;

    let l2: &FitnessFn<'_, f64, L2Segmentation> =
        &|_, from, to, p| p.squared_error(from, to) + p.penalty();
    let runs: &FitnessFn<'_, f64, L2Segmentation> = &|d, from, to, p| {
        let first = d[from].round();
        if d[from..to].iter().all(|x| x.round() == first) {
            p.penalty()
        } else {
            f64::INFINITY
        }
    };
    let fitness = match name.as_str() {
        "l2" => Some(l2),
        "runs" => Some(runs),
        _ => None,
    };

    let boundaries = partition_dyn(&series, fitness, Objective::Minimize, &problem)?;

    println!(
        "{} points, {} segments ({name}, penalty {penalty})",
        series.len(),
        boundaries.len()
    );
    for (k, &from) in boundaries.iter().enumerate() {
        let to = boundaries.get(k + 1).copied().unwrap_or(series.len());
        println!("  [{from:>3}, {to:>3})  mean {:>6.2}", problem.mean(from, to));
    }
    Ok(())
}
