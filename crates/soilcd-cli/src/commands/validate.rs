//! Show what the validator makes of a scenario.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use soilcd_core::cadmium::params::{validate_with_report, Adjustment};

use super::ScenarioArgs;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub scenario: ScenarioArgs,

    /// Also report fields that were simply missing
    #[arg(long)]
    pub verbose: bool,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    let raw = args.scenario.load_raw()?;
    let (params, report) = validate_with_report(&raw);

    let mut adjusted = 0;
    for adj in &report {
        match adj {
            Adjustment::Missing { field } => {
                if args.verbose {
                    info!("{}: missing, using default", field);
                }
            }
            Adjustment::Defaulted { field, raw } => {
                adjusted += 1;
                warn!("{}: unusable value {}, using default", field, raw);
            }
            Adjustment::Clamped { field, from, to } => {
                adjusted += 1;
                warn!("{}: {} adjusted to {}", field, from, to);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&params)?);

    if adjusted == 0 {
        info!("all parameters accepted as given");
    } else {
        info!("{} parameter(s) adjusted", adjusted);
    }
    Ok(())
}
