/// Validated model parameters and the validator that produces them.
///
/// Raw input is an untrusted JSON object. Validation never fails: missing or
/// wrong-typed fields fall back to defaults, numbers are clamped to their
/// domain and categorical fields accept exact matches only. CEC is derived
/// from texture and organic matter unless manual mode is enabled.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use super::constants::*;

/// Soil texture class. Drives the base CEC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Texture {
    Sandy,
    #[default]
    Loam,
    Clay,
}

impl Texture {
    pub const ALL: [Texture; 3] = [Texture::Sandy, Texture::Loam, Texture::Clay];

    /// Base CEC before the organic matter bonus [cmol(+)/kg].
    pub fn base_cec(self) -> f64 {
        match self {
            Texture::Sandy => BASE_CEC_SANDY,
            Texture::Loam => BASE_CEC_LOAM,
            Texture::Clay => BASE_CEC_CLAY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Texture::Sandy => "Sandy",
            Texture::Loam => "Loam",
            Texture::Clay => "Clay",
        }
    }

    /// Exact-match lookup; no case folding.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

/// Soil permeability class. Drives percolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Permeability {
    Low,
    #[default]
    Medium,
    High,
}

impl Permeability {
    pub const ALL: [Permeability; 3] = [Permeability::Low, Permeability::Medium, Permeability::High];

    /// Percolation multiplier applied to leaching and deep losses [-].
    pub fn percolation_factor(self) -> f64 {
        match self {
            Permeability::Low => PERCOLATION_LOW,
            Permeability::Medium => PERCOLATION_MEDIUM,
            Permeability::High => PERCOLATION_HIGH,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permeability::Low => "Low",
            Permeability::Medium => "Medium",
            Permeability::High => "High",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Vertical extent of the initial contamination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContaminatedDepth {
    /// 0-20 cm.
    #[default]
    #[serde(rename = "0-20")]
    Cm0To20,
    /// 0-40 cm.
    #[serde(rename = "0-40")]
    Cm0To40,
}

impl ContaminatedDepth {
    pub const ALL: [ContaminatedDepth; 2] = [ContaminatedDepth::Cm0To20, ContaminatedDepth::Cm0To40];

    /// Share of the leached mass that reaches the deep compartment.
    ///
    /// A thicker contaminated zone stores more of it on the way down.
    pub fn deep_transfer(self) -> f64 {
        match self {
            ContaminatedDepth::Cm0To20 => DEEP_TRANSFER_SHALLOW,
            ContaminatedDepth::Cm0To40 => DEEP_TRANSFER_DEEP,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContaminatedDepth::Cm0To20 => "0-20",
            ContaminatedDepth::Cm0To40 => "0-40",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == name)
    }
}

/// Remediation applied every week of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Intervention {
    #[default]
    None,
    Lime,
    BiocharCompost,
    VegetativeCover,
}

impl Intervention {
    pub const ALL: [Intervention; 4] = [
        Intervention::None,
        Intervention::Lime,
        Intervention::BiocharCompost,
        Intervention::VegetativeCover,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intervention::None => "None",
            Intervention::Lime => "Lime",
            Intervention::BiocharCompost => "BiocharCompost",
            Intervention::VegetativeCover => "VegetativeCover",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.as_str() == name)
    }
}

/// Validated parameter set, fixed for the whole run.
///
/// Serializes with the camelCase names used by raw input and exports, so a
/// validated set can be fed back through [`validate`] unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub texture: Texture,
    /// Organic matter [%].
    pub organic_matter: f64,
    /// Initial soil pH.
    #[serde(rename = "pH")]
    pub ph: f64,
    #[serde(rename = "advancedCEC")]
    pub advanced_cec: bool,
    /// Manually supplied CEC, used only when `advanced_cec` is set.
    pub cec_manual: f64,
    /// Effective CEC [cmol(+)/kg].
    pub cec: f64,
    /// Water input [mm/week].
    pub rainfall: f64,
    pub permeability: Permeability,
    /// Depth to the water table [m].
    pub groundwater_depth: f64,
    /// Surface concentration at week 0 [mg/kg].
    pub initial_concentration: f64,
    pub contaminated_depth: ContaminatedDepth,
    pub intervention: Intervention,
    pub lime_dose: f64,
    pub biochar_dose: f64,
    pub duration_weeks: u32,
}

impl Default for Parameters {
    fn default() -> Self {
        validate(&defaults_raw())
    }
}

impl Parameters {
    /// Serialize back to a raw JSON object.
    pub fn to_raw(&self) -> Value {
        // A struct of plain scalars and unit enums always serializes.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The documented defaults as a raw JSON object.
pub fn defaults_raw() -> Value {
    serde_json::json!({
        "texture": Texture::default().as_str(),
        "organicMatter": DEFAULT_ORGANIC_MATTER,
        "pH": DEFAULT_PH,
        "advancedCEC": DEFAULT_ADVANCED_CEC,
        "cecManual": DEFAULT_CEC_MANUAL,
        "rainfall": DEFAULT_RAINFALL,
        "permeability": Permeability::default().as_str(),
        "groundwaterDepth": DEFAULT_GROUNDWATER_DEPTH,
        "initialConcentration": DEFAULT_INITIAL_CONCENTRATION,
        "contaminatedDepth": ContaminatedDepth::default().as_str(),
        "intervention": Intervention::default().as_str(),
        "limeDose": DEFAULT_LIME_DOSE,
        "biocharDose": DEFAULT_BIOCHAR_DOSE,
        "durationWeeks": DEFAULT_DURATION_WEEKS,
    })
}

/// Derived CEC: texture base plus the organic matter bonus, clamped.
pub fn compute_cec(texture: Texture, organic_matter: f64) -> f64 {
    CEC_BOUNDS.clamp(texture.base_cec() + organic_matter * CEC_PER_ORGANIC_MATTER)
}

/// What the validator did to a raw field.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    /// Field was absent or null.
    Missing { field: &'static str },
    /// Field had an unusable type or value; the default was substituted.
    Defaulted { field: &'static str, raw: Value },
    /// Numeric field was outside its domain (or rounded up) and was moved.
    Clamped { field: &'static str, from: f64, to: f64 },
}

impl Adjustment {
    pub fn field(&self) -> &'static str {
        match self {
            Adjustment::Missing { field }
            | Adjustment::Defaulted { field, .. }
            | Adjustment::Clamped { field, .. } => field,
        }
    }
}

/// Normalize untrusted input into a well-formed parameter set.
///
/// Total and idempotent: `validate(&validate(x).to_raw()) == validate(x)`.
pub fn validate(raw: &Value) -> Parameters {
    validate_with_report(raw).0
}

/// Like [`validate`], also listing every field that was not taken verbatim.
pub fn validate_with_report(raw: &Value) -> (Parameters, Vec<Adjustment>) {
    let empty = Map::new();
    let map = raw.as_object().unwrap_or(&empty);
    let mut reader = FieldReader {
        map,
        adjustments: Vec::new(),
    };

    let texture = reader.category("texture", Texture::from_name);
    let permeability = reader.category("permeability", Permeability::from_name);
    let intervention = reader.category("intervention", Intervention::from_name);
    let contaminated_depth = reader.category("contaminatedDepth", ContaminatedDepth::from_name);

    let organic_matter = reader.number("organicMatter", DEFAULT_ORGANIC_MATTER, ORGANIC_MATTER_BOUNDS);
    let ph = reader.number("pH", DEFAULT_PH, PH_BOUNDS);
    let rainfall = reader.number("rainfall", DEFAULT_RAINFALL, RAINFALL_BOUNDS);
    let groundwater_depth =
        reader.number("groundwaterDepth", DEFAULT_GROUNDWATER_DEPTH, GROUNDWATER_DEPTH_BOUNDS);
    let initial_concentration = reader.number(
        "initialConcentration",
        DEFAULT_INITIAL_CONCENTRATION,
        INITIAL_CONCENTRATION_BOUNDS,
    );
    let lime_dose = reader.number("limeDose", DEFAULT_LIME_DOSE, DOSE_BOUNDS);
    let biochar_dose = reader.number("biocharDose", DEFAULT_BIOCHAR_DOSE, DOSE_BOUNDS);
    let cec_manual = reader.number("cecManual", DEFAULT_CEC_MANUAL, CEC_MANUAL_BOUNDS);
    let duration_weeks = reader.weeks("durationWeeks");
    let advanced_cec = reader.flag("advancedCEC", DEFAULT_ADVANCED_CEC);

    let cec = if advanced_cec {
        cec_manual
    } else {
        compute_cec(texture, organic_matter)
    };

    let params = Parameters {
        texture,
        organic_matter,
        ph,
        advanced_cec,
        cec_manual,
        cec,
        rainfall,
        permeability,
        groundwater_depth,
        initial_concentration,
        contaminated_depth,
        intervention,
        lime_dose,
        biochar_dose,
        duration_weeks,
    };

    debug!(
        adjusted = reader.adjustments.len(),
        cec = params.cec,
        weeks = params.duration_weeks,
        "validated parameters"
    );

    (params, reader.adjustments)
}

struct FieldReader<'a> {
    map: &'a Map<String, Value>,
    adjustments: Vec<Adjustment>,
}

impl<'a> FieldReader<'a> {
    fn get(&mut self, field: &'static str) -> Option<&'a Value> {
        match self.map.get(field) {
            None | Some(Value::Null) => {
                self.adjustments.push(Adjustment::Missing { field });
                None
            }
            Some(v) => Some(v),
        }
    }

    fn category<T: Default>(&mut self, field: &'static str, lookup: fn(&str) -> Option<T>) -> T {
        let Some(value) = self.get(field) else {
            return T::default();
        };
        if let Some(found) = value.as_str().and_then(lookup) {
            return found;
        }
        let raw = value.clone();
        self.adjustments.push(Adjustment::Defaulted { field, raw });
        T::default()
    }

    fn number(&mut self, field: &'static str, default: f64, bounds: Bounds) -> f64 {
        let Some(value) = self.get(field) else {
            return default;
        };
        let Some(n) = coerce_number(value) else {
            let raw = value.clone();
            self.adjustments.push(Adjustment::Defaulted { field, raw });
            return default;
        };
        let clamped = bounds.clamp(n);
        if clamped != n {
            self.adjustments.push(Adjustment::Clamped {
                field,
                from: n,
                to: clamped,
            });
        }
        clamped
    }

    fn weeks(&mut self, field: &'static str) -> u32 {
        let default = f64::from(DEFAULT_DURATION_WEEKS);
        let weeks = self.number(field, default, DURATION_WEEKS_BOUNDS);
        // A partial week still gets simulated.
        let whole = weeks.ceil();
        if whole != weeks {
            self.adjustments.push(Adjustment::Clamped {
                field,
                from: weeks,
                to: whole,
            });
        }
        // Bounded to [1, 52] above.
        whole as u32
    }

    fn flag(&mut self, field: &'static str, default: bool) -> bool {
        let Some(value) = self.get(field) else {
            return default;
        };
        match value {
            Value::Bool(b) => *b,
            other => {
                let raw = other.clone();
                self.adjustments.push(Adjustment::Defaulted { field, raw });
                default
            }
        }
    }
}

/// Numbers pass through; numeric strings are parsed. Anything else is unusable.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}
