//! Subcommands and the shared scenario loader.

pub mod run;
pub mod step;
pub mod sweep;
pub mod validate;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};
use tracing::{debug, info};

use soilcd_core::cadmium::params::defaults_raw;
use soilcd_core::cadmium::risk::classify;
use soilcd_core::State;

/// Where the raw parameters come from.
#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// JSON scenario file with raw parameters (defaults when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override a parameter, e.g. --set pH=6.2 --set intervention=Lime
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Override the simulation horizon [weeks]
    #[arg(short, long)]
    pub weeks: Option<u32>,
}

impl ScenarioArgs {
    /// Merge config file and overrides into one raw parameter object.
    ///
    /// Precedence: defaults < config file < --set < --weeks.
    pub fn load_raw(&self) -> Result<Value> {
        let mut map = match defaults_raw() {
            Value::Object(m) => m,
            _ => Map::new(),
        };

        if let Some(path) = &self.config {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read scenario file {}", path.display()))?;
            let file: Value = serde_json::from_str(&text)
                .with_context(|| format!("scenario file {} is not valid JSON", path.display()))?;
            let Value::Object(file_map) = file else {
                bail!("scenario file {} must contain a JSON object", path.display());
            };
            info!("loaded scenario: {}", path.display());
            map.extend(file_map);
        }

        for entry in &self.overrides {
            let (key, value) = parse_override(entry)?;
            debug!("override {} = {}", key, value);
            map.insert(key, value);
        }

        if let Some(weeks) = self.weeks {
            map.insert("durationWeeks".to_string(), Value::from(weeks));
        }

        Ok(Value::Object(map))
    }
}

/// Split `key=value`; the value is read as JSON when it parses, else as a string.
pub fn parse_override(entry: &str) -> Result<(String, Value)> {
    let Some((key, raw)) = entry.split_once('=') else {
        bail!("override '{}' must look like key=value", entry);
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("override '{}' has an empty key", entry);
    }
    let raw = raw.trim();
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

pub fn print_table_header() {
    println!(
        "Week |  pH  | Surface | Deep   | Diss % | Leached | Mobility | Bioavail | Groundwater"
    );
    println!(
        "-----|------|---------|--------|--------|---------|----------|----------|------------"
    );
}

pub fn print_table_row(s: &State) {
    let ind = classify(s);
    println!(
        " {:>3} | {:>4.2} | {:>7.2} | {:>6.2} | {:>6.1} | {:>7.3} | {:>8} | {:>8} | {:>11}",
        s.week,
        s.ph,
        s.surface_conc,
        s.deep_conc,
        s.fractions.dissolved * 100.0,
        s.leached,
        ind.mobility,
        ind.bioavailability,
        ind.groundwater,
    );
}
