//! Advance a trajectory one week at a time.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use soilcd_core::Simulation;

use super::{print_table_header, print_table_row, ScenarioArgs};

#[derive(Args)]
pub struct StepArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Stop after this week (capped at the configured horizon)
    #[arg(short = 'u', long, default_value = "1")]
    pub until: u32,

    /// Print observations for every week
    #[arg(long)]
    pub explain: bool,
}

pub fn execute(args: StepArgs) -> Result<()> {
    let raw = args.scenario.load_raw()?;
    let mut sim = Simulation::new(&raw);
    let horizon = sim.params().duration_weeks;

    if args.until > horizon {
        warn!(
            "requested week {} is past the horizon of {} weeks; stopping at {}",
            args.until, horizon, horizon
        );
    }

    print_table_header();
    print_table_row(sim.latest());
    if args.explain {
        print_explanation(&sim);
    }

    while sim.latest().week < args.until {
        if sim.try_advance().is_none() {
            break;
        }
        print_table_row(sim.latest());
        if args.explain {
            print_explanation(&sim);
        }
    }

    info!("stopped at week {} of {}", sim.latest().week, horizon);
    Ok(())
}

fn print_explanation(sim: &Simulation) {
    for bullet in sim.explain() {
        println!("        - {bullet}");
    }
}
