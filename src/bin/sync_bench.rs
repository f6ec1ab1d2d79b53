use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use treesync::{MessageLevel, SyncOptions, SyncPolicy, Synchronizer};

#[derive(Debug)]
struct BenchResult {
    full: Vec<Duration>,
    differential: Vec<Duration>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let source = match args.next() {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: cargo run --bin sync_bench -- <source_path> [runs]");
            std::process::exit(2);
        }
    };

    let runs: usize = args.next().and_then(|v| v.parse().ok()).unwrap_or(5);

    let dest = env::temp_dir().join(format!("treesync_bench_{}", std::process::id()));

    println!(
        "Benchmarking sync of {}\nDestination: {}\nRuns: {}",
        source.display(),
        dest.display(),
        runs
    );

    let full = Synchronizer::new(SyncOptions {
        policy: SyncPolicy::Full,
        verbosity: MessageLevel::Error,
        exclude: Vec::new(),
    })?;
    let differential = Synchronizer::new(SyncOptions {
        policy: SyncPolicy::Differential,
        verbosity: MessageLevel::Error,
        exclude: Vec::new(),
    })?;

    // Warm up: first run populates the destination so the differential
    // runs measure the skip path, not initial copies.
    full.sync(&source, &dest)?;

    let mut result = BenchResult {
        full: Vec::with_capacity(runs),
        differential: Vec::with_capacity(runs),
    };

    for i in 0..runs {
        let full_start = Instant::now();
        full.sync(&source, &dest)?;
        let full_elapsed = full_start.elapsed();

        let diff_start = Instant::now();
        differential.sync(&source, &dest)?;
        let diff_elapsed = diff_start.elapsed();

        result.full.push(full_elapsed);
        result.differential.push(diff_elapsed);

        println!(
            "run {:>2}: full={:>8.3} ms  differential={:>8.3} ms",
            i + 1,
            full_elapsed.as_secs_f64() * 1000.0,
            diff_elapsed.as_secs_f64() * 1000.0
        );
    }

    let full_avg = average_ms(&result.full);
    let diff_avg = average_ms(&result.differential);
    let speedup = if diff_avg > 0.0 {
        full_avg / diff_avg
    } else {
        0.0
    };

    println!("\nSummary");
    println!("  full         avg: {:>8.3} ms", full_avg);
    println!("  differential avg: {:>8.3} ms", diff_avg);
    println!("  skip speedup    : {:>8.2}x", speedup);

    std::fs::remove_dir_all(&dest)?;

    Ok(())
}

fn average_ms(values: &[Duration]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_ms: f64 = values.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
    sum_ms / values.len() as f64
}
