/// Core trait for weekly transport models.
///
/// Defines the interface a model implements: initialize state, step one
/// week, and run over the configured horizon. All methods are pure; states
/// are values and the default runners only ever append.
pub trait TransportModel {
    type Params;
    type State: Clone;
    type Fluxes;

    /// Create the week-0 state from parameters.
    fn initialize_state(params: &Self::Params) -> Self::State;

    /// Advance exactly one week: given a state and parameters, return the
    /// next state and the fluxes of that week.
    fn step(state: &Self::State, params: &Self::Params) -> (Self::State, Self::Fluxes);

    /// Number of steps a full run applies.
    fn horizon(params: &Self::Params) -> usize;

    /// Run the full horizon from the initial state.
    ///
    /// Returns `horizon + 1` states; index 0 is the initial state.
    fn run(params: &Self::Params) -> Vec<Self::State> {
        let initial = Self::initialize_state(params);
        Self::run_from(&initial, params, Self::horizon(params))
    }

    /// Apply `weeks` steps starting from an arbitrary state.
    ///
    /// Returns `weeks + 1` states, the first being a copy of `state`.
    fn run_from(state: &Self::State, params: &Self::Params, weeks: usize) -> Vec<Self::State> {
        let mut states = Vec::with_capacity(weeks + 1);
        states.push(state.clone());
        for _ in 0..weeks {
            let Some(last) = states.last() else {
                break;
            };
            let (next, _fluxes) = Self::step(last, params);
            states.push(next);
        }
        states
    }
}
