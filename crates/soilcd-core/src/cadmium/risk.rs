/// Discrete risk levels derived from the continuous scores of a state.
use serde::{Deserialize, Serialize};

use super::constants::{GW_RISK_SCALE, LOW_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD, SCORE_BOUNDS};
use super::state::State;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Map a [0, 1] score: below 0.33 is Low, below 0.66 Medium, else High.
    pub fn from_score(score: f64) -> Self {
        if score < LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if score < MEDIUM_RISK_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Risk levels of one state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indicators {
    pub mobility: RiskLevel,
    pub bioavailability: RiskLevel,
    pub groundwater: RiskLevel,
}

/// Groundwater score compressed from [0, 1.6] into [0, 1].
pub fn groundwater_index(gw_risk_score: f64) -> f64 {
    SCORE_BOUNDS.clamp(gw_risk_score / GW_RISK_SCALE)
}

pub fn classify(state: &State) -> Indicators {
    Indicators {
        mobility: RiskLevel::from_score(state.mobility_score),
        bioavailability: RiskLevel::from_score(state.bioavailability_score),
        groundwater: RiskLevel::from_score(groundwater_index(state.gw_risk_score)),
    }
}
