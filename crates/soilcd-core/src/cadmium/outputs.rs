/// Flat per-week records for tabulation and charting.
///
/// `Snapshot` flattens a `State`; `WeekFluxes` holds the intermediate terms
/// of one step. Both derive a columnar `*Series` companion.
use soilcd_macros::Series;

use super::state::State;

/// Every numeric quantity of a state, week included, as `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Series)]
pub struct Snapshot {
    pub week: f64,
    pub ph: f64,
    pub surface_conc: f64,
    pub deep_conc: f64,
    pub dissolved: f64,
    pub adsorbed: f64,
    pub immobilized: f64,
    pub mobility_score: f64,
    pub bioavailability_score: f64,
    pub gw_risk_score: f64,
    pub leached: f64,
}

impl From<&State> for Snapshot {
    fn from(s: &State) -> Self {
        Self {
            week: f64::from(s.week),
            ph: s.ph,
            surface_conc: s.surface_conc,
            deep_conc: s.deep_conc,
            dissolved: s.fractions.dissolved,
            adsorbed: s.fractions.adsorbed,
            immobilized: s.fractions.immobilized,
            mobility_score: s.mobility_score,
            bioavailability_score: s.bioavailability_score,
            gw_risk_score: s.gw_risk_score,
            leached: s.leached,
        }
    }
}

impl SnapshotSeries {
    /// Columnar view of a trajectory.
    pub fn from_states(states: &[State]) -> Self {
        let mut series = Self::with_capacity(states.len());
        for s in states {
            series.push(&Snapshot::from(s));
        }
        series
    }
}

/// Intermediate terms of a single weekly step.
#[derive(Debug, Clone, Copy, PartialEq, Series)]
pub struct WeekFluxes {
    pub percolation_factor: f64,
    pub leaching_rate: f64, // [-/week]
    pub leached: f64,       // surface -> deep [mg/kg]
    pub retained: f64,      // attenuated in surface [mg/kg]
    pub deep_gain: f64,     // [mg/kg]
    pub deep_loss: f64,     // [mg/kg]
}

impl WeekFluxesSeries {
    pub fn from_fluxes(fluxes: &[WeekFluxes]) -> Self {
        let mut series = Self::with_capacity(fluxes.len());
        for f in fluxes {
            series.push(f);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cadmium::params::Parameters;
    use crate::cadmium::run::{run_detailed, run_validated};

    #[test]
    fn series_has_one_row_per_state() {
        let states = run_validated(&Parameters::default());
        let series = SnapshotSeries::from_states(&states);
        assert_eq!(series.len(), states.len());
        assert_eq!(series.week.last().copied(), Some(12.0));
        assert_eq!(series.surface_conc[0], 60.0);
    }

    #[test]
    fn columns_by_name() {
        let states = run_validated(&Parameters::default());
        let series = SnapshotSeries::from_states(&states);
        for name in Snapshot::field_names() {
            assert_eq!(series.column(name).map(<[f64]>::len), Some(states.len()));
        }
        assert!(series.column("texture").is_none());
    }

    #[test]
    fn flux_series_has_one_row_per_step() {
        let p = Parameters::default();
        let (states, fluxes) = run_detailed(&p);
        let series = WeekFluxesSeries::from_fluxes(&fluxes);
        assert_eq!(series.len(), states.len() - 1);
        for (i, f) in fluxes.iter().enumerate() {
            assert_eq!(series.leached[i], f.leached);
            assert_eq!(series.leached[i], states[i + 1].leached);
        }
        assert_eq!(series.percolation_factor[0], 1.0);
    }

    #[test]
    fn empty_trajectory_gives_empty_series() {
        assert!(SnapshotSeries::from_states(&[]).is_empty());
    }
}
