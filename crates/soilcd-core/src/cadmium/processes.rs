/// Cadmium transport process functions.
///
/// Pure functions implementing each equation of the weekly step. Every
/// derived quantity is clamped to an explicit range, so all of them are
/// total over the validated parameter domain.
use super::constants::*;
use super::params::{Intervention, Parameters};
use super::state::Fractions;

/// pH after one week of liming; unchanged for any other intervention.
///
/// Lime only ever raises pH, up to the domain ceiling.
pub fn limed_ph(ph: f64, params: &Parameters) -> f64 {
    match params.intervention {
        Intervention::Lime => {
            PH_BOUNDS.clamp(ph + LIME_PH_BASE_RISE + params.lime_dose * LIME_PH_RISE_PER_DOSE)
        }
        Intervention::None | Intervention::BiocharCompost | Intervention::VegetativeCover => ph,
    }
}

/// Split the contaminant mass into dissolved / adsorbed / immobilized.
///
/// Each raw fraction is clamped to its own bounds first, then the triple is
/// divided by its sum. The result sums to 1 whatever the clamps did.
pub fn partition_fractions(ph: f64, params: &Parameters) -> Fractions {
    let ph_effect = PH_EFFECT_BOUNDS.clamp((PH_EFFECT_NEUTRAL - ph) * PH_EFFECT_SLOPE);
    let cec_effect = CEC_EFFECT_BOUNDS.clamp((params.cec - CEC_EFFECT_NEUTRAL) * CEC_EFFECT_SLOPE);
    let om_effect =
        OM_EFFECT_BOUNDS.clamp((params.organic_matter - OM_EFFECT_NEUTRAL) * OM_EFFECT_SLOPE);
    let biochar_effect = match params.intervention {
        Intervention::BiocharCompost => params.biochar_dose * BIOCHAR_EFFECT_PER_DOSE,
        Intervention::None | Intervention::Lime | Intervention::VegetativeCover => 0.0,
    };

    // Everything that favours sorption moves mass from dissolved to adsorbed.
    let sorption = cec_effect + om_effect + biochar_effect;

    let dissolved = DISSOLVED_BOUNDS.clamp(DISSOLVED_BASELINE + ph_effect - sorption);
    let adsorbed = ADSORBED_BOUNDS.clamp(ADSORBED_BASELINE - ph_effect + sorption);
    let immobilized = IMMOBILIZED_BOUNDS.clamp(
        IMMOBILIZED_BASELINE
            + (ph - IMMOBILIZED_PH_NEUTRAL) * IMMOBILIZED_PH_SLOPE
            + cec_effect * IMMOBILIZED_CEC_SHARE,
    );

    let sum = dissolved + adsorbed + immobilized;
    Fractions {
        dissolved: dissolved / sum,
        adsorbed: adsorbed / sum,
        immobilized: immobilized / sum,
    }
}

/// Weekly leaching rate from water input and percolation [-].
pub fn leaching_rate(rainfall: f64, percolation_factor: f64) -> f64 {
    LEACHING_RATE_BOUNDS.clamp(
        LEACHING_BASE_RATE
            + (rainfall / LEACHING_REFERENCE_RAINFALL) * LEACHING_RAINFALL_COEFF * percolation_factor,
    )
}

/// Mass leached from the surface this week [mg/kg].
///
/// Only the dissolved pool is available; never more than the surface stock.
pub fn leached_mass(surface_conc: f64, dissolved: f64, rate: f64) -> f64 {
    let available = surface_conc * dissolved;
    (available * rate).clamp(0.0, surface_conc.max(0.0))
}

/// Mass attenuated in the surface layer this week [mg/kg].
///
/// Capped so that leaching plus retention never exceeds the surface stock.
pub fn retained_mass(surface_conc: f64, immobilized: f64, leached: f64) -> f64 {
    let attenuation =
        ATTENUATION_BOUNDS.clamp(ATTENUATION_BASE + immobilized * ATTENUATION_IMMOBILIZED_COEFF);
    let ceiling = (surface_conc - leached).max(0.0);
    (surface_conc * attenuation).clamp(0.0, ceiling)
}

/// Surface concentration after leaching and retention.
pub fn surface_update(surface_conc: f64, leached: f64, retained: f64) -> f64 {
    CONCENTRATION_BOUNDS.clamp(surface_conc - leached - retained)
}

/// Deep compartment update.
///
/// Returns (deep_next, gain, loss):
/// - gain: share of the leached mass reaching the deep layer
/// - loss: drainage out of the deep layer, scaled by percolation
pub fn deep_update(
    deep_conc: f64,
    leached: f64,
    deep_transfer: f64,
    percolation_factor: f64,
) -> (f64, f64, f64) {
    let gain = leached * deep_transfer;
    let loss = deep_conc * DEEP_LOSS_BOUNDS.clamp(DEEP_LOSS_COEFF * percolation_factor);
    let deep_next = CONCENTRATION_BOUNDS.clamp(deep_conc + gain - loss);
    (deep_next, gain, loss)
}

pub fn mobility_score(dissolved: f64, rate: f64) -> f64 {
    SCORE_BOUNDS.clamp(dissolved * MOBILITY_DISSOLVED_COEFF + rate * MOBILITY_LEACHING_COEFF)
}

pub fn bioavailability_score(dissolved: f64, ph: f64) -> f64 {
    SCORE_BOUNDS.clamp(
        dissolved * BIOAVAILABILITY_DISSOLVED_COEFF
            + (BIOAVAILABILITY_PH_NEUTRAL - ph) * BIOAVAILABILITY_PH_COEFF,
    )
}

/// Groundwater risk in [0, 1.6]: deep stock, mobility and water-table proximity.
pub fn gw_risk_score(deep_conc: f64, mobility: f64, groundwater_depth: f64) -> f64 {
    let depth_factor =
        SCORE_BOUNDS.clamp((GW_REFERENCE_DEPTH - groundwater_depth) / GW_REFERENCE_DEPTH);
    (deep_conc / GW_DEEP_REFERENCE + mobility * GW_MOBILITY_COEFF + depth_factor * GW_DEPTH_COEFF)
        .clamp(0.0, GW_RISK_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadmium::params::{validate, Parameters};
    use serde_json::json;

    fn assert_approx(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected} ± {tol}, got {actual}"
        );
    }

    fn params_with(raw: serde_json::Value) -> Parameters {
        validate(&raw)
    }

    // -- Lime --

    #[test]
    fn lime_raises_ph() {
        let p = params_with(json!({ "intervention": "Lime", "limeDose": 2.0 }));
        assert_approx(limed_ph(5.5, &p), 5.57, 1e-12);
    }

    #[test]
    fn lime_respects_ph_ceiling() {
        let p = params_with(json!({ "intervention": "Lime", "limeDose": 5.0 }));
        assert_eq!(limed_ph(8.45, &p), 8.5);
    }

    #[test]
    fn other_interventions_leave_ph() {
        for name in ["None", "BiocharCompost", "VegetativeCover"] {
            let p = params_with(json!({ "intervention": name, "limeDose": 5.0 }));
            assert_eq!(limed_ph(5.5, &p), 5.5);
        }
    }

    // -- Partitioning --

    #[test]
    fn fractions_sum_to_one_across_ph_range() {
        let p = Parameters::default();
        let mut ph = 4.0;
        while ph <= 8.5 {
            assert_approx(partition_fractions(ph, &p).sum(), 1.0, 1e-9);
            ph += 0.25;
        }
    }

    #[test]
    fn fractions_sum_to_one_at_extremes() {
        let p = params_with(json!({
            "texture": "Clay",
            "organicMatter": 10,
            "intervention": "BiocharCompost",
            "biocharDose": 5,
        }));
        let f = partition_fractions(8.5, &p);
        assert_approx(f.sum(), 1.0, 1e-9);
        assert!(f.dissolved > 0.0);
    }

    #[test]
    fn default_fractions_match_hand_calculation() {
        // pH 5.5, CEC 16.7, OM 3: ph_effect 0.09, cec_effect 0.0376
        let f = partition_fractions(5.5, &Parameters::default());
        let (d, a, i) = (0.4724, 0.3476, 0.1788);
        let sum = d + a + i;
        assert_approx(f.dissolved, d / sum, 1e-12);
        assert_approx(f.adsorbed, a / sum, 1e-12);
        assert_approx(f.immobilized, i / sum, 1e-12);
    }

    #[test]
    fn higher_ph_lowers_dissolved() {
        let p = Parameters::default();
        assert!(partition_fractions(7.5, &p).dissolved < partition_fractions(5.0, &p).dissolved);
    }

    #[test]
    fn biochar_shifts_toward_adsorbed() {
        let none = Parameters::default();
        let biochar = params_with(json!({ "intervention": "BiocharCompost", "biocharDose": 4 }));
        let f0 = partition_fractions(5.5, &none);
        let f1 = partition_fractions(5.5, &biochar);
        assert!(f1.adsorbed > f0.adsorbed);
        assert!(f1.dissolved < f0.dissolved);
    }

    #[test]
    fn biochar_dose_ignored_without_biochar() {
        let a = params_with(json!({ "biocharDose": 4 }));
        let b = Parameters::default();
        assert_eq!(partition_fractions(5.5, &a), partition_fractions(5.5, &b));
    }

    // -- Leaching --

    #[test]
    fn leaching_rate_formula() {
        assert_approx(leaching_rate(40.0, 1.0), 0.025, 1e-12);
        assert_approx(leaching_rate(0.0, 1.0), 0.005, 1e-12);
    }

    #[test]
    fn leaching_rate_is_clamped() {
        assert_approx(leaching_rate(120.0, 1.5), 0.095, 1e-12);
        assert_eq!(leaching_rate(1.0e6, 1.5), 0.12);
    }

    #[test]
    fn leached_mass_bounded_by_stock() {
        let l = leached_mass(60.0, 0.5, 0.025);
        assert_approx(l, 0.75, 1e-12);
        assert!(leached_mass(10.0, 1.0, 5.0) <= 10.0);
        assert_eq!(leached_mass(0.0, 0.5, 0.1), 0.0);
    }

    #[test]
    fn retention_capped_by_remaining_stock() {
        let r = retained_mass(60.0, 0.2, 1.0);
        assert_approx(r, 60.0 * 0.018, 1e-12);
        assert_eq!(retained_mass(1.0, 1.0, 1.0), 0.0);
    }

    #[test]
    fn surface_update_never_negative() {
        assert_eq!(surface_update(1.0, 0.8, 0.5), 0.0);
        assert_approx(surface_update(60.0, 1.0, 1.0), 58.0, 1e-12);
    }

    // -- Deep layer --

    #[test]
    fn deep_update_conserves_terms() {
        let (next, gain, loss) = deep_update(3.0, 1.0, 0.9, 1.0);
        assert_approx(gain, 0.9, 1e-12);
        assert_approx(loss, 0.03, 1e-12);
        assert_approx(next, 3.0 + gain - loss, 1e-12);
    }

    #[test]
    fn deep_loss_rate_clamped() {
        let (_, _, low) = deep_update(100.0, 0.0, 0.9, 0.1);
        assert_approx(low, 0.5, 1e-12);
        let (_, _, high) = deep_update(100.0, 0.0, 0.9, 10.0);
        assert_approx(high, 4.0, 1e-12);
    }

    #[test]
    fn deep_update_respects_ceiling() {
        let (next, _, _) = deep_update(499.0, 100.0, 0.9, 0.6);
        assert_eq!(next, 500.0);
    }

    // -- Scores --

    #[test]
    fn scores_bounded() {
        assert_eq!(mobility_score(1.0, 0.12), 1.0);
        assert_eq!(bioavailability_score(0.05, 8.5), 0.0);
        assert_eq!(gw_risk_score(500.0, 1.0, 0.5), 1.6);
        assert_eq!(gw_risk_score(0.0, 0.0, 10.0), 0.0);
    }

    #[test]
    fn gw_risk_formula() {
        // depth 3 m: factor 0.25
        assert_approx(gw_risk_score(8.0, 0.5, 3.0), 0.1 + 0.2 + 0.1125, 1e-12);
    }
}
