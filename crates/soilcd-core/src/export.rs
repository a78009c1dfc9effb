//! JSON export of a finished run.
//!
//! The document carries the validated parameters and the full trajectory,
//! using the same camelCase names as the raw input.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cadmium::params::Parameters;
use crate::cadmium::run::SimulationResult;
use crate::cadmium::state::State;
use crate::error::{Result, SoilCdError};

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_FILE: &str = "cd-simulation-results.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub parameters: Parameters,
    pub results: Vec<State>,
}

impl From<SimulationResult> for ExportDocument {
    fn from(r: SimulationResult) -> Self {
        Self {
            parameters: r.params,
            results: r.states,
        }
    }
}

impl ExportDocument {
    pub fn new(parameters: Parameters, results: Vec<State>) -> Self {
        Self {
            parameters,
            results,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_json()?;
        fs::write(path, text).map_err(|e| SoilCdError::io(path, e))?;
        debug!(path = %path.display(), weeks = self.results.len(), "wrote export");
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SoilCdError::io(path, e))?;
        Self::from_json(&text)
    }
}
