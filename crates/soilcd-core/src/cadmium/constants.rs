/// Cadmium transport numerical constants and model contract.
///
/// Centralises every fixed value used by the weekly model: defaults, lookup
/// tables, parameter domains and the empirical coefficients of each step.
/// The asymmetric fraction bounds are tuned literals, kept exactly as given.

// -- Parameter domains --

/// Parameter domain: (min, max), both inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Clamp a value into this domain.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Organic matter [%].
pub const ORGANIC_MATTER_BOUNDS: Bounds = Bounds { min: 0.0, max: 10.0 };

/// Soil pH [-].
pub const PH_BOUNDS: Bounds = Bounds { min: 4.0, max: 8.5 };

/// Manually supplied CEC [cmol(+)/kg].
pub const CEC_MANUAL_BOUNDS: Bounds = Bounds { min: 1.0, max: 60.0 };

/// Derived CEC [cmol(+)/kg].
pub const CEC_BOUNDS: Bounds = Bounds { min: 3.0, max: 45.0 };

/// Rainfall / irrigation [mm/week].
pub const RAINFALL_BOUNDS: Bounds = Bounds { min: 0.0, max: 120.0 };

/// Depth to the water table [m].
pub const GROUNDWATER_DEPTH_BOUNDS: Bounds = Bounds { min: 0.5, max: 10.0 };

/// Initial contaminant concentration [mg/kg].
pub const INITIAL_CONCENTRATION_BOUNDS: Bounds = Bounds { min: 0.0, max: 200.0 };

/// Lime and biochar/compost dose [-].
pub const DOSE_BOUNDS: Bounds = Bounds { min: 0.0, max: 5.0 };

/// Simulation horizon [weeks].
pub const DURATION_WEEKS_BOUNDS: Bounds = Bounds { min: 1.0, max: 52.0 };

/// Concentration ceiling for either compartment [mg/kg].
pub const CONCENTRATION_BOUNDS: Bounds = Bounds { min: 0.0, max: 500.0 };

// -- Defaults --

pub const DEFAULT_ORGANIC_MATTER: f64 = 3.0;
pub const DEFAULT_PH: f64 = 5.5;
pub const DEFAULT_ADVANCED_CEC: bool = false;
pub const DEFAULT_CEC_MANUAL: f64 = 14.0;
pub const DEFAULT_RAINFALL: f64 = 40.0;
pub const DEFAULT_GROUNDWATER_DEPTH: f64 = 3.0;
pub const DEFAULT_INITIAL_CONCENTRATION: f64 = 60.0;
pub const DEFAULT_LIME_DOSE: f64 = 0.0;
pub const DEFAULT_BIOCHAR_DOSE: f64 = 0.0;
pub const DEFAULT_DURATION_WEEKS: u32 = 12;

// -- CEC derivation --

/// Base CEC per texture class [cmol(+)/kg].
pub const BASE_CEC_SANDY: f64 = 6.0;
pub const BASE_CEC_LOAM: f64 = 14.0;
pub const BASE_CEC_CLAY: f64 = 24.0;

/// CEC gained per percent organic matter.
pub const CEC_PER_ORGANIC_MATTER: f64 = 0.9;

// -- Fraction partitioning --

pub const DISSOLVED_BASELINE: f64 = 0.42;
pub const ADSORBED_BASELINE: f64 = 0.40;
pub const IMMOBILIZED_BASELINE: f64 = 0.18;

/// pH at which the pH effect on dissolved/adsorbed is zero.
pub const PH_EFFECT_NEUTRAL: f64 = 6.5;
pub const PH_EFFECT_SLOPE: f64 = 0.09;
pub const PH_EFFECT_BOUNDS: Bounds = Bounds { min: -0.2, max: 0.28 };

/// CEC at which the CEC effect is zero.
pub const CEC_EFFECT_NEUTRAL: f64 = 12.0;
pub const CEC_EFFECT_SLOPE: f64 = 0.008;
pub const CEC_EFFECT_BOUNDS: Bounds = Bounds { min: -0.08, max: 0.2 };

/// Organic matter at which the OM effect is zero.
pub const OM_EFFECT_NEUTRAL: f64 = 3.0;
pub const OM_EFFECT_SLOPE: f64 = 0.015;
pub const OM_EFFECT_BOUNDS: Bounds = Bounds { min: -0.05, max: 0.1 };

/// Adsorbed shift per unit of biochar/compost dose.
pub const BIOCHAR_EFFECT_PER_DOSE: f64 = 0.025;

/// Immobilized fraction response to pH above 6.
pub const IMMOBILIZED_PH_NEUTRAL: f64 = 6.0;
pub const IMMOBILIZED_PH_SLOPE: f64 = 0.04;
/// Share of the CEC effect credited to the immobilized pool.
pub const IMMOBILIZED_CEC_SHARE: f64 = 0.5;

pub const DISSOLVED_BOUNDS: Bounds = Bounds { min: 0.05, max: 0.9 };
pub const ADSORBED_BOUNDS: Bounds = Bounds { min: 0.05, max: 0.9 };
pub const IMMOBILIZED_BOUNDS: Bounds = Bounds { min: 0.03, max: 0.7 };

// -- Lime --

pub const LIME_PH_BASE_RISE: f64 = 0.03;
pub const LIME_PH_RISE_PER_DOSE: f64 = 0.02;

// -- Hydrology --

/// Percolation factor per permeability class [-].
pub const PERCOLATION_LOW: f64 = 0.6;
pub const PERCOLATION_MEDIUM: f64 = 1.0;
pub const PERCOLATION_HIGH: f64 = 1.5;

pub const LEACHING_BASE_RATE: f64 = 0.005;
/// Rainfall that saturates the rainfall term [mm/week].
pub const LEACHING_REFERENCE_RAINFALL: f64 = 120.0;
pub const LEACHING_RAINFALL_COEFF: f64 = 0.06;
pub const LEACHING_RATE_BOUNDS: Bounds = Bounds { min: 0.001, max: 0.12 };

pub const ATTENUATION_BASE: f64 = 0.012;
pub const ATTENUATION_IMMOBILIZED_COEFF: f64 = 0.03;
pub const ATTENUATION_BOUNDS: Bounds = Bounds { min: 0.0, max: 0.08 };

/// Share of leached mass reaching the deep compartment, per contaminated depth.
pub const DEEP_TRANSFER_SHALLOW: f64 = 0.9;
pub const DEEP_TRANSFER_DEEP: f64 = 0.7;

pub const DEEP_LOSS_COEFF: f64 = 0.01;
pub const DEEP_LOSS_BOUNDS: Bounds = Bounds { min: 0.005, max: 0.04 };

/// Deep compartment concentration at week 0 as a share of the surface.
pub const INITIAL_DEEP_RATIO: f64 = 0.05;

// -- Risk scores --

pub const MOBILITY_DISSOLVED_COEFF: f64 = 0.75;
pub const MOBILITY_LEACHING_COEFF: f64 = 2.3;

pub const BIOAVAILABILITY_DISSOLVED_COEFF: f64 = 0.65;
pub const BIOAVAILABILITY_PH_NEUTRAL: f64 = 6.8;
pub const BIOAVAILABILITY_PH_COEFF: f64 = 0.08;

/// Water-table depth below which groundwater is no longer considered exposed [m].
pub const GW_REFERENCE_DEPTH: f64 = 4.0;
/// Deep concentration that contributes a full unit of groundwater risk [mg/kg].
pub const GW_DEEP_REFERENCE: f64 = 80.0;
pub const GW_MOBILITY_COEFF: f64 = 0.4;
pub const GW_DEPTH_COEFF: f64 = 0.45;
pub const GW_RISK_MAX: f64 = 1.6;

pub const SCORE_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

// -- Risk classification --

pub const LOW_RISK_THRESHOLD: f64 = 0.33;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.66;
/// Divisor compressing the groundwater score into [0, 1] before classification.
pub const GW_RISK_SCALE: f64 = 1.2;

// -- Model contract constants --

/// Parameter names as they appear in raw input and exported documents.
pub const PARAM_NAMES: &[&str] = &[
    "texture",
    "organicMatter",
    "pH",
    "advancedCEC",
    "cecManual",
    "rainfall",
    "permeability",
    "groundwaterDepth",
    "initialConcentration",
    "contaminatedDepth",
    "intervention",
    "limeDose",
    "biocharDose",
    "durationWeeks",
];

/// Maximum number of explanation bullets per week.
pub const MAX_EXPLANATIONS: usize = 5;
