/// Pure Rust core benchmarks for the cadmium model.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for scenario
/// generation, and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use serde_json::{json, Value};
use soilcd_core::cadmium::params::{validate, Intervention, Permeability, Texture};
use soilcd_core::cadmium::run::run_validated;
use soilcd_core::sweep::sweep;

const REPEATS: usize = 7;

/// Simple LCG PRNG for deterministic raw parameter sets.
fn make_scenarios(n: usize, seed: u64) -> Vec<Value> {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    (0..n)
        .map(|i| {
            json!({
                "texture": Texture::ALL[i % 3].as_str(),
                "permeability": Permeability::ALL[(i / 3) % 3].as_str(),
                "intervention": Intervention::ALL[i % 4].as_str(),
                "organicMatter": next_f64() * 10.0,
                "pH": 4.0 + next_f64() * 4.5,
                "rainfall": next_f64() * 120.0,
                "groundwaterDepth": 0.5 + next_f64() * 9.5,
                "initialConcentration": next_f64() * 200.0,
                "limeDose": next_f64() * 5.0,
                "biocharDose": next_f64() * 5.0,
                "durationWeeks": 52,
            })
        })
        .collect()
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_sequential(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let params: Vec<_> = make_scenarios(n, 42).iter().map(validate).collect();

        // Warmup
        for p in &params {
            black_box(run_validated(p));
        }

        let dur = median_time(|| {
            for p in &params {
                black_box(run_validated(p));
            }
        });
        results.push(("sequential", n, dur));
    }
    results
}

fn bench_sweep(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let raws = make_scenarios(n, 42);

        // Warmup
        black_box(sweep(&raws));

        let dur = median_time(|| {
            black_box(sweep(&raws));
        });
        results.push(("sweep (rayon)", n, dur));
    }
    results
}

fn main() {
    println!("Cadmium Model Benchmarks (52-week runs)");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Mode", "Runs", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_sequential(&[100, 1000, 10000]));
    all_results.extend(bench_sweep(&[100, 1000, 10000]));

    for (mode, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", mode, n, ms);
    }

    println!("============================================================");
}
