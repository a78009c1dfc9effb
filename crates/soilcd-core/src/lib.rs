/// soilcd — weekly cadmium transport model for contaminated soils.
///
/// Simulates how cadmium redistributes between surface and deep soil and
/// between dissolved, adsorbed and immobilized pools, driven by soil
/// properties, hydrology and remediation.
pub mod cadmium;
pub mod error;
pub mod export;
pub mod sweep;
pub mod traits;

pub use cadmium::explain::{explain, Explanation};
pub use cadmium::params::{validate, Parameters};
pub use cadmium::risk::{classify, Indicators, RiskLevel};
pub use cadmium::run::{initial_state, run, step, Simulation, SimulationResult};
pub use cadmium::state::{Fractions, State};
pub use error::{Result, SoilCdError};
