/// Weekly model state.
///
/// One immutable record per simulated week. The stepper never edits a state
/// in place; it builds the next one. Serialized names follow the export
/// schema (`surfaceConc`, `gwRiskScore`, ...).
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::constants::INITIAL_DEEP_RATIO;
use super::params::Parameters;
use super::processes::partition_fractions;
use crate::error::{Result, SoilCdError};

/// Chemical speciation of the contaminant mass. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fractions {
    pub dissolved: f64,
    pub adsorbed: f64,
    pub immobilized: f64,
}

impl Fractions {
    pub fn sum(&self) -> f64 {
        self.dissolved + self.adsorbed + self.immobilized
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    /// Index into the trajectory.
    pub week: u32,
    /// Current soil pH. Only lime moves it.
    #[serde(rename = "pH")]
    pub ph: f64,
    /// Surface layer concentration [mg/kg].
    pub surface_conc: f64,
    /// Deep layer concentration [mg/kg].
    pub deep_conc: f64,
    pub fractions: Fractions,
    pub mobility_score: f64,
    pub bioavailability_score: f64,
    /// Groundwater risk in [0, 1.6]; rescaled only at classification.
    pub gw_risk_score: f64,
    /// Mass moved from surface to deep during the week that produced this state.
    pub leached: f64,
}

impl State {
    /// Week-0 state from parameters alone.
    ///
    /// Deep soil starts at 5% of the surface concentration; scores and
    /// leaching start at zero.
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            week: 0,
            ph: params.ph,
            surface_conc: params.initial_concentration,
            deep_conc: params.initial_concentration * INITIAL_DEEP_RATIO,
            fractions: partition_fractions(params.ph, params),
            mobility_score: 0.0,
            bioavailability_score: 0.0,
            gw_risk_score: 0.0,
            leached: 0.0,
        }
    }

    /// Decode a state record handed over by a collaborator.
    pub fn from_raw(raw: &Value) -> Result<Self> {
        serde_json::from_value(raw.clone()).map_err(|e| SoilCdError::InvalidState(e.to_string()))
    }

    pub fn to_raw(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadmium::params::{defaults_raw, validate};
    use serde_json::json;

    #[test]
    fn initialize_from_defaults() {
        let p = validate(&defaults_raw());
        let s = State::initialize(&p);
        assert_eq!(s.week, 0);
        assert_eq!(s.ph, 5.5);
        assert_eq!(s.surface_conc, 60.0);
        assert!((s.deep_conc - 3.0).abs() < 1e-12);
        assert_eq!(s.leached, 0.0);
        assert_eq!(s.mobility_score, 0.0);
        assert_eq!(s.gw_risk_score, 0.0);
        assert!((s.fractions.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn raw_roundtrip_preserves_state() {
        let s = State::initialize(&Parameters::default());
        let back = State::from_raw(&s.to_raw()).unwrap();
        assert_eq!(s, back);
    }

    #[test]
    fn raw_uses_export_names() {
        let raw = State::initialize(&Parameters::default()).to_raw();
        for key in ["week", "pH", "surfaceConc", "deepConc", "fractions", "gwRiskScore", "leached"] {
            assert!(raw.get(key).is_some(), "missing {key}");
        }
        assert!(raw["fractions"].get("immobilized").is_some());
    }

    #[test]
    fn from_raw_rejects_incomplete_record() {
        let err = State::from_raw(&json!({ "week": 1, "pH": 6.0 })).unwrap_err();
        assert!(matches!(err, SoilCdError::InvalidState(_)));
    }
}
