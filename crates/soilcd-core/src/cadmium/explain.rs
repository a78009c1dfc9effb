/// Plain-language observations on the change between two consecutive weeks.
///
/// Checks run in a fixed order and at most five bullets are returned. Week 0
/// short-circuits everything else.
use smallvec::SmallVec;

use super::constants::MAX_EXPLANATIONS;
use super::params::{Intervention, Parameters};
use super::state::State;

pub type Explanation = SmallVec<[String; MAX_EXPLANATIONS]>;

const BASELINE_NOTE: &str = "Week 0 baseline loaded. Adjust controls and run to explore outcomes.";
const BIOCHAR_NOTE: &str =
    "Biochar/compost increased adsorption capacity, shifting Cd from dissolved to adsorbed pools.";
const COVER_NOTE: &str = "Vegetative cover reduces erosion risk, but leaching remains controlled mainly by water flow and permeability.";
const TRADE_OFF_NOTE: &str = "Trade-off: stronger immobilization lowers bioavailability but may leave a long-term residual contaminant stock in soil.";

pub fn explain(prev: &State, current: &State, params: &Parameters) -> Explanation {
    let mut bullets = Explanation::new();

    if current.week == 0 {
        bullets.push(BASELINE_NOTE.to_string());
        return bullets;
    }

    if current.surface_conc < prev.surface_conc {
        bullets.push(format!(
            "Surface concentration fell from {:.1} to {:.1} mg/kg due to leaching and retention.",
            prev.surface_conc, current.surface_conc
        ));
    }

    if current.deep_conc > prev.deep_conc {
        bullets.push(format!(
            "Deep soil concentration increased to {:.1} mg/kg as dissolved Cd moved downward.",
            current.deep_conc
        ));
    }

    match params.intervention {
        Intervention::Lime => bullets.push(format!(
            "Lime dose raised pH to {:.2}, which reduced dissolved Cd and mobility.",
            current.ph
        )),
        Intervention::BiocharCompost => bullets.push(BIOCHAR_NOTE.to_string()),
        Intervention::VegetativeCover => bullets.push(COVER_NOTE.to_string()),
        Intervention::None => {}
    }

    bullets.push(TRADE_OFF_NOTE.to_string());
    bullets.truncate(MAX_EXPLANATIONS);
    bullets
}
