//! Run the full horizon and print the trajectory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use soilcd_core::cadmium::explain::explain;
use soilcd_core::cadmium::risk::classify;
use soilcd_core::cadmium::run::run;
use soilcd_core::export::{ExportDocument, DEFAULT_EXPORT_FILE};

use super::{print_table_header, print_table_row, ScenarioArgs};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Write the parameters and trajectory as JSON
    #[arg(short, long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_EXPORT_FILE)]
    pub export: Option<PathBuf>,

    /// Print observations on the final week
    #[arg(long)]
    pub explain: bool,
}

pub fn execute(args: RunArgs) -> Result<()> {
    let raw = args.scenario.load_raw()?;
    let result = run(&raw);
    let params = &result.params;

    info!(
        "texture={} cec={:.1} rainfall={} permeability={} intervention={} weeks={}",
        params.texture.as_str(),
        params.cec,
        params.rainfall,
        params.permeability.as_str(),
        params.intervention.as_str(),
        params.duration_weeks
    );

    print_table_header();
    for s in &result.states {
        print_table_row(s);
    }

    let n = result.states.len();
    let last = &result.states[n - 1];
    let prev = &result.states[n.saturating_sub(2)];

    let ind = classify(last);
    println!(
        "\nWeek {}: mobility {}, bioavailability {}, groundwater {}",
        last.week, ind.mobility, ind.bioavailability, ind.groundwater
    );

    let total_leached: f64 = result.states.iter().map(|s| s.leached).sum();
    println!(
        "Totals: surface {:.2} -> {:.2} mg/kg, deep {:.2} -> {:.2} mg/kg, leached {:.2} mg/kg",
        result.states[0].surface_conc,
        last.surface_conc,
        result.states[0].deep_conc,
        last.deep_conc,
        total_leached
    );

    if args.explain {
        println!();
        for bullet in explain(prev, last, params) {
            println!("  - {bullet}");
        }
    }

    if let Some(path) = args.export {
        ExportDocument::from(result)
            .write_json(&path)
            .with_context(|| format!("export to {} failed", path.display()))?;
        info!("exported results to {}", path.display());
    }

    Ok(())
}
