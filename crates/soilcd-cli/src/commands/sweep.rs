//! Parallel one-parameter sweep.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use tracing::info;

use soilcd_core::cadmium::risk::classify;
use soilcd_core::sweep::sweep_field;

use super::ScenarioArgs;

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Parameter to vary, e.g. rainfall
    #[arg(short, long)]
    pub field: String,

    /// Comma-separated values, e.g. 10,40,100
    #[arg(long, value_delimiter = ',', required = true)]
    pub values: Vec<String>,
}

pub fn execute(args: SweepArgs) -> Result<()> {
    let base = args.scenario.load_raw()?;
    let values: Vec<Value> = args
        .values
        .iter()
        .map(|v| {
            let v = v.trim();
            serde_json::from_str(v).unwrap_or_else(|_| Value::String(v.to_string()))
        })
        .collect();

    info!("sweeping {} over {} values", args.field, values.len());
    let results = sweep_field(&base, &args.field, &values)
        .with_context(|| format!("cannot sweep '{}'", args.field))?;

    println!(
        "{:>12} | Week | Surface | Deep   | Leached | Mobility | Bioavail | Groundwater",
        args.field
    );
    println!("-------------|------|---------|--------|---------|----------|----------|------------");
    for (value, result) in values.iter().zip(&results) {
        let Some(last) = result.states.last() else {
            continue;
        };
        let total_leached: f64 = result.states.iter().map(|s| s.leached).sum();
        let ind = classify(last);
        println!(
            "{:>12} | {:>4} | {:>7.2} | {:>6.2} | {:>7.3} | {:>8} | {:>8} | {:>11}",
            value.to_string(),
            last.week,
            last.surface_conc,
            last.deep_conc,
            total_leached,
            ind.mobility,
            ind.bioavailability,
            ind.groundwater,
        );
    }
    Ok(())
}
