/// Cadmium transport in a two-compartment soil column.
///
/// A weekly discrete-time model of cadmium moving from surface to deep soil
/// while partitioning between dissolved, adsorbed and immobilized pools.
/// Soil properties, hydrology and a remediation intervention drive each step.
pub mod constants;
pub mod explain;
pub mod outputs;
pub mod params;
pub mod processes;
pub mod risk;
pub mod run;
pub mod state;
