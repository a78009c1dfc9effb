/// Cadmium model orchestration functions.
///
/// - `step()`: advance one week → State
/// - `run()`: validate raw input and run the full horizon
/// - `Simulation`: owns one trajectory and extends it week by week
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, trace};

use super::explain::{explain, Explanation};
use super::outputs::WeekFluxes;
use super::params::{validate, Parameters};
use super::processes;
use super::risk::{classify, Indicators};
use super::state::State;
use crate::traits::TransportModel;

/// Marker type binding the cadmium model to [`TransportModel`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CadmiumModel;

impl TransportModel for CadmiumModel {
    type Params = Parameters;
    type State = State;
    type Fluxes = WeekFluxes;

    fn initialize_state(params: &Parameters) -> State {
        State::initialize(params)
    }

    fn step(state: &State, params: &Parameters) -> (State, WeekFluxes) {
        step_with_fluxes(state, params)
    }

    fn horizon(params: &Parameters) -> usize {
        params.duration_weeks as usize
    }
}

/// Execute one week of the model, returning the new state and its fluxes.
///
/// Pure: the same (state, params) always yields the same result, so a run
/// restarted from any stored state reproduces the rest of its trajectory.
pub fn step_with_fluxes(prev: &State, params: &Parameters) -> (State, WeekFluxes) {
    // Step 1: lime ratchets pH upward
    let ph = processes::limed_ph(prev.ph, params);

    // Step 2: speciation at the new pH
    let fractions = processes::partition_fractions(ph, params);
    debug_assert!(
        (fractions.sum() - 1.0).abs() < 1e-9,
        "fractions sum to {}",
        fractions.sum()
    );

    // Steps 3-4: hydrology
    let percolation_factor = params.permeability.percolation_factor();
    let leaching_rate = processes::leaching_rate(params.rainfall, percolation_factor);

    // Steps 5-7: surface balance
    let leached = processes::leached_mass(prev.surface_conc, fractions.dissolved, leaching_rate);
    let retained = processes::retained_mass(prev.surface_conc, fractions.immobilized, leached);
    let surface_conc = processes::surface_update(prev.surface_conc, leached, retained);

    // Steps 8-10: deep balance
    let (deep_conc, deep_gain, deep_loss) = processes::deep_update(
        prev.deep_conc,
        leached,
        params.contaminated_depth.deep_transfer(),
        percolation_factor,
    );

    // Steps 11-13: risk scores
    let mobility_score = processes::mobility_score(fractions.dissolved, leaching_rate);
    let bioavailability_score = processes::bioavailability_score(fractions.dissolved, ph);
    let gw_risk_score =
        processes::gw_risk_score(deep_conc, mobility_score, params.groundwater_depth);

    let next = State {
        week: prev.week.saturating_add(1),
        ph,
        surface_conc,
        deep_conc,
        fractions,
        mobility_score,
        bioavailability_score,
        gw_risk_score,
        leached,
    };

    trace!(
        week = next.week,
        surface = next.surface_conc,
        deep = next.deep_conc,
        leached,
        "stepped"
    );

    let fluxes = WeekFluxes {
        percolation_factor,
        leaching_rate,
        leached,
        retained,
        deep_gain,
        deep_loss,
    };

    (next, fluxes)
}

/// Execute one week of the model.
pub fn step(prev: &State, params: &Parameters) -> State {
    step_with_fluxes(prev, params).0
}

/// Week-0 state.
pub fn initial_state(params: &Parameters) -> State {
    State::initialize(params)
}

/// Full trajectory for already validated parameters: `duration_weeks + 1` states.
pub fn run_validated(params: &Parameters) -> Vec<State> {
    CadmiumModel::run(params)
}

/// Re-run `weeks` steps from any stored state.
pub fn run_from(state: &State, params: &Parameters, weeks: usize) -> Vec<State> {
    CadmiumModel::run_from(state, params, weeks)
}

/// Validated parameters together with their trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub params: Parameters,
    pub states: Vec<State>,
}

/// Validate raw input and run the full horizon.
///
/// Always applies exactly `duration_weeks` steps; no early termination.
pub fn run(raw: &Value) -> SimulationResult {
    let params = validate(raw);
    debug!(
        weeks = params.duration_weeks,
        intervention = params.intervention.as_str(),
        "starting run"
    );
    let states = run_validated(&params);
    if let Some(last) = states.last() {
        debug!(
            week = last.week,
            surface = last.surface_conc,
            deep = last.deep_conc,
            "run complete"
        );
    }
    SimulationResult { params, states }
}

/// Full trajectory together with the per-week fluxes (one fewer than states).
pub fn run_detailed(params: &Parameters) -> (Vec<State>, Vec<WeekFluxes>) {
    let weeks = params.duration_weeks as usize;
    let mut states = Vec::with_capacity(weeks + 1);
    let mut fluxes = Vec::with_capacity(weeks);
    let mut current = State::initialize(params);
    states.push(current);
    for _ in 0..weeks {
        let (next, f) = step_with_fluxes(&current, params);
        states.push(next);
        fluxes.push(f);
        current = next;
    }
    (states, fluxes)
}

/// An interactive run: validated parameters plus an append-only trajectory.
///
/// Mirrors the run / step / reset controls of a front end. `advance` has no
/// bound; `try_advance` stops at the configured horizon.
#[derive(Debug, Clone)]
pub struct Simulation {
    params: Parameters,
    states: Vec<State>,
}

impl Simulation {
    pub fn new(raw: &Value) -> Self {
        Self::from_params(validate(raw))
    }

    pub fn from_params(params: Parameters) -> Self {
        let mut states = Vec::with_capacity(params.duration_weeks as usize + 1);
        states.push(State::initialize(&params));
        Self { params, states }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn latest(&self) -> &State {
        // Never empty: constructed with the initial state and only appended to.
        &self.states[self.states.len() - 1]
    }

    /// The state before the latest one, or the latest itself at week 0.
    pub fn previous(&self) -> &State {
        let n = self.states.len();
        if n >= 2 {
            &self.states[n - 2]
        } else {
            self.latest()
        }
    }

    /// True once the latest state has reached `duration_weeks`.
    pub fn is_complete(&self) -> bool {
        self.latest().week >= self.params.duration_weeks
    }

    /// Append exactly one week, regardless of the horizon.
    pub fn advance(&mut self) -> &State {
        let next = step(self.latest(), &self.params);
        self.states.push(next);
        self.latest()
    }

    /// Append one week unless the horizon has been reached.
    pub fn try_advance(&mut self) -> Option<&State> {
        if self.is_complete() {
            return None;
        }
        Some(self.advance())
    }

    /// Advance until the horizon; a no-op if already there.
    pub fn run_to_end(&mut self) -> &[State] {
        while self.try_advance().is_some() {}
        &self.states
    }

    /// Drop every state after week 0.
    pub fn reset(&mut self) {
        self.states.truncate(1);
    }

    pub fn indicators(&self) -> Indicators {
        classify(self.latest())
    }

    /// Observations on the latest week compared with the one before.
    pub fn explain(&self) -> Explanation {
        explain(self.previous(), self.latest(), &self.params)
    }

    pub fn into_result(self) -> SimulationResult {
        SimulationResult {
            params: self.params,
            states: self.states,
        }
    }
}
