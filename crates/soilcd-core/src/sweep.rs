//! Parallel parameter sweeps.
//!
//! Runs never share mutable data, so each one is handed to a rayon worker
//! as is. Output order always matches input order.

use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::cadmium::constants::PARAM_NAMES;
use crate::cadmium::run::{run, SimulationResult};
use crate::error::{Result, SoilCdError};

/// Run every raw parameter set in parallel.
pub fn sweep(raws: &[Value]) -> Vec<SimulationResult> {
    debug!(runs = raws.len(), "starting sweep");
    raws.par_iter().map(run).collect()
}

/// Build raw sets by overriding one field of `base`, then sweep them.
///
/// A non-object `base` is treated as empty (all defaults).
pub fn sweep_field(base: &Value, field: &str, values: &[Value]) -> Result<Vec<SimulationResult>> {
    if !PARAM_NAMES.contains(&field) {
        return Err(SoilCdError::UnknownParameter(field.to_string()));
    }
    let raws: Vec<Value> = values
        .iter()
        .map(|v| with_field(base, field, v.clone()))
        .collect();
    Ok(sweep(&raws))
}

/// Copy of `base` with one field replaced.
pub fn with_field(base: &Value, field: &str, value: Value) -> Value {
    let mut map = base.as_object().cloned().unwrap_or_default();
    map.insert(field.to_string(), value);
    Value::Object(map)
}
