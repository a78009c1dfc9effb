use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::convert::{json_to_py, params_from_py, py_to_json, state_from_py};

use soilcd_core::cadmium::explain::explain;
use soilcd_core::cadmium::outputs::{SnapshotSeries, WeekFluxesSeries};
use soilcd_core::cadmium::risk::classify;
use soilcd_core::cadmium::run::{initial_state, run, run_detailed, run_validated, step, step_with_fluxes};
use soilcd_core::export::ExportDocument;
use soilcd_core::State;

// ---------------------------------------------------------------------------
// Typed pyclass result objects
// ---------------------------------------------------------------------------

define_series_result! {
    /// Trajectory columns as numpy arrays, one entry per week.
    pub struct TrajectoryResult from soilcd_core::cadmium::outputs::SnapshotSeries {
        week, ph, surface_conc, deep_conc, dissolved, adsorbed, immobilized,
        mobility_score, bioavailability_score, gw_risk_score, leached,
    }
}

define_series_result! {
    /// Per-step intermediate terms as numpy arrays, one entry per week after week 0.
    pub struct FluxesResult from soilcd_core::cadmium::outputs::WeekFluxesSeries {
        percolation_factor, leaching_rate, leached, retained, deep_gain, deep_loss,
    }
}

define_row_result! {
    /// Intermediate terms of one weekly step.
    pub struct StepFluxes from soilcd_core::cadmium::outputs::WeekFluxes {
        percolation_factor, leaching_rate, leached, retained, deep_gain, deep_loss,
    }
}

fn state_to_py<'py>(py: Python<'py>, state: &State) -> PyResult<Bound<'py, PyAny>> {
    json_to_py(py, &state.to_raw())
}

fn states_to_py<'py>(py: Python<'py>, states: &[State]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty(py);
    for s in states {
        list.append(state_to_py(py, s)?)?;
    }
    Ok(list)
}

// ---------------------------------------------------------------------------
// Functional surface
// ---------------------------------------------------------------------------

/// Normalize raw parameters; never fails.
#[pyfunction]
#[pyo3(name = "validate", signature = (raw=None))]
fn cadmium_validate<'py>(py: Python<'py>, raw: Option<&Bound<'py, PyAny>>) -> PyResult<Bound<'py, PyAny>> {
    let params = params_from_py(raw)?;
    json_to_py(py, &params.to_raw())
}

#[pyfunction]
#[pyo3(name = "initial_state", signature = (params=None))]
fn cadmium_initial_state<'py>(
    py: Python<'py>,
    params: Option<&Bound<'py, PyAny>>,
) -> PyResult<Bound<'py, PyAny>> {
    let p = params_from_py(params)?;
    state_to_py(py, &initial_state(&p))
}

/// Advance one week. Returns the new state dict.
#[pyfunction]
#[pyo3(name = "step", signature = (state, params=None))]
fn cadmium_step<'py>(
    py: Python<'py>,
    state: &Bound<'py, PyAny>,
    params: Option<&Bound<'py, PyAny>>,
) -> PyResult<Bound<'py, PyAny>> {
    let p = params_from_py(params)?;
    let s = state_from_py(state)?;
    state_to_py(py, &step(&s, &p))
}

/// Advance one week. Returns (new_state, StepFluxes).
#[pyfunction]
#[pyo3(name = "step_detailed", signature = (state, params=None))]
fn cadmium_step_detailed<'py>(
    py: Python<'py>,
    state: &Bound<'py, PyAny>,
    params: Option<&Bound<'py, PyAny>>,
) -> PyResult<(Bound<'py, PyAny>, StepFluxes)> {
    let p = params_from_py(params)?;
    let s = state_from_py(state)?;
    let (next, fluxes) = step_with_fluxes(&s, &p);
    Ok((state_to_py(py, &next)?, StepFluxes::from_row(&fluxes)))
}

/// Validate and run the full horizon.
///
/// Returns (params, states, TrajectoryResult).
#[pyfunction]
#[pyo3(name = "run", signature = (raw=None))]
fn cadmium_run<'py>(
    py: Python<'py>,
    raw: Option<&Bound<'py, PyAny>>,
) -> PyResult<(Bound<'py, PyAny>, Bound<'py, PyList>, TrajectoryResult)> {
    let raw = match raw {
        Some(r) => py_to_json(r)?,
        None => serde_json::Value::Null,
    };
    let result = run(&raw);
    let params = json_to_py(py, &result.params.to_raw())?;
    let states = states_to_py(py, &result.states)?;
    let series = SnapshotSeries::from_states(&result.states);
    Ok((params, states, TrajectoryResult::from_series(py, series)))
}

/// Validate and run; returns a dict of numpy columns keyed by field name.
#[pyfunction]
#[pyo3(name = "run_columns", signature = (raw=None))]
fn cadmium_run_columns<'py>(py: Python<'py>, raw: Option<&Bound<'py, PyAny>>) -> PyResult<Bound<'py, PyDict>> {
    let p = params_from_py(raw)?;
    let series = SnapshotSeries::from_states(&run_validated(&p));
    let dict = series_to_dict!(
        py, series,
        week, ph, surface_conc, deep_conc, dissolved, adsorbed, immobilized,
        mobility_score, bioavailability_score, gw_risk_score, leached,
    );
    Ok(dict)
}

/// Validate and run, keeping the per-step terms.
///
/// Returns (TrajectoryResult, FluxesResult); the fluxes have one entry fewer.
#[pyfunction]
#[pyo3(name = "run_detailed", signature = (raw=None))]
fn cadmium_run_detailed(
    py: Python<'_>,
    raw: Option<&Bound<'_, PyAny>>,
) -> PyResult<(TrajectoryResult, FluxesResult)> {
    let p = params_from_py(raw)?;
    let (states, fluxes) = run_detailed(&p);
    Ok((
        TrajectoryResult::from_series(py, SnapshotSeries::from_states(&states)),
        FluxesResult::from_series(py, WeekFluxesSeries::from_fluxes(&fluxes)),
    ))
}

/// Risk levels of a state as {"mobility", "bioavailability", "groundwater"}.
#[pyfunction]
#[pyo3(name = "classify")]
fn cadmium_classify<'py>(py: Python<'py>, state: &Bound<'py, PyAny>) -> PyResult<Bound<'py, PyDict>> {
    let s = state_from_py(state)?;
    let ind = classify(&s);
    let dict = PyDict::new(py);
    dict.set_item("mobility", ind.mobility.as_str())?;
    dict.set_item("bioavailability", ind.bioavailability.as_str())?;
    dict.set_item("groundwater", ind.groundwater.as_str())?;
    Ok(dict)
}

#[pyfunction]
#[pyo3(name = "explain", signature = (prev, current, params=None))]
fn cadmium_explain(
    prev: &Bound<'_, PyAny>,
    current: &Bound<'_, PyAny>,
    params: Option<&Bound<'_, PyAny>>,
) -> PyResult<Vec<String>> {
    let p = params_from_py(params)?;
    let prev = state_from_py(prev)?;
    let current = state_from_py(current)?;
    Ok(explain(&prev, &current, &p).into_vec())
}

/// Validate, run and render the JSON export document.
#[pyfunction]
#[pyo3(name = "export_json", signature = (raw=None))]
fn cadmium_export_json(raw: Option<&Bound<'_, PyAny>>) -> PyResult<String> {
    let p = params_from_py(raw)?;
    let doc = ExportDocument::new(p, run_validated(&p));
    doc.to_json().map_err(|e| PyValueError::new_err(e.to_string()))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "cadmium")?;
    m.add_function(wrap_pyfunction!(cadmium_validate, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_initial_state, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_step, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_step_detailed, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_run, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_run_columns, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_run_detailed, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_classify, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_explain, &m)?)?;
    m.add_function(wrap_pyfunction!(cadmium_export_json, &m)?)?;
    m.add_class::<TrajectoryResult>()?;
    m.add_class::<FluxesResult>()?;
    m.add_class::<StepFluxes>()?;
    parent.add_submodule(&m)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::types::PyBool;

    const FUNCTIONS: [&str; 10] = [
        "validate",
        "initial_state",
        "step",
        "step_detailed",
        "run",
        "run_columns",
        "run_detailed",
        "classify",
        "explain",
        "export_json",
    ];

    fn with_cadmium<F>(f: F)
    where
        F: for<'py> FnOnce(Python<'py>, &Bound<'py, PyModule>),
    {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let parent = PyModule::new(py, "_core").unwrap();
            register(&parent).unwrap();
            let sub = parent.getattr("cadmium").unwrap();
            f(py, sub.downcast::<PyModule>().unwrap());
        });
    }

    fn item<'py>(dict: &Bound<'py, PyAny>, key: &str) -> Bound<'py, PyAny> {
        dict.downcast::<PyDict>().unwrap().get_item(key).unwrap().unwrap()
    }

    #[test]
    fn register_builds_submodule() {
        with_cadmium(|_py, m| {
            for name in FUNCTIONS {
                assert!(m.hasattr(name).unwrap(), "missing {name}");
            }
            for class in ["TrajectoryResult", "FluxesResult", "StepFluxes"] {
                assert!(m.hasattr(class).unwrap(), "missing {class}");
            }
        });
    }

    #[test]
    fn validate_clamps_and_defaults() {
        with_cadmium(|py, m| {
            let raw = PyDict::new(py);
            raw.set_item("pH", 12.0).unwrap();
            raw.set_item("texture", "clay").unwrap();
            raw.set_item("durationWeeks", 7.4).unwrap();
            let out = m.getattr("validate").unwrap().call1((raw,)).unwrap();
            assert_eq!(item(&out, "pH").extract::<f64>().unwrap(), 8.5);
            assert_eq!(item(&out, "texture").extract::<String>().unwrap(), "Loam");
            assert_eq!(item(&out, "durationWeeks").extract::<u32>().unwrap(), 8);
            assert!(item(&out, "advancedCEC").is_instance_of::<PyBool>());

            let defaults = m.getattr("validate").unwrap().call0().unwrap();
            assert_eq!(item(&defaults, "durationWeeks").extract::<u32>().unwrap(), 12);
        });
    }

    #[test]
    fn step_classify_explain_chain() {
        with_cadmium(|_py, m| {
            let s0 = m.getattr("initial_state").unwrap().call0().unwrap();
            assert_eq!(item(&s0, "week").extract::<u32>().unwrap(), 0);

            let s1 = m.getattr("step").unwrap().call1((&s0,)).unwrap();
            assert_eq!(item(&s1, "week").extract::<u32>().unwrap(), 1);
            assert!(
                item(&s1, "surfaceConc").extract::<f64>().unwrap()
                    < item(&s0, "surfaceConc").extract::<f64>().unwrap()
            );

            let levels = m.getattr("classify").unwrap().call1((&s1,)).unwrap();
            for key in ["mobility", "bioavailability", "groundwater"] {
                let level = item(&levels, key).extract::<String>().unwrap();
                assert!(["Low", "Medium", "High"].contains(&level.as_str()), "{key}: {level}");
            }

            let bullets: Vec<String> = m
                .getattr("explain")
                .unwrap()
                .call1((&s0, &s1))
                .unwrap()
                .extract()
                .unwrap();
            assert!(!bullets.is_empty() && bullets.len() <= 5);
            assert!(bullets.last().unwrap().starts_with("Trade-off"));
        });
    }

    #[test]
    fn step_detailed_returns_fluxes() {
        with_cadmium(|_py, m| {
            let s0 = m.getattr("initial_state").unwrap().call0().unwrap();
            let (s1, fluxes): (Bound<'_, PyAny>, Bound<'_, PyAny>) = m
                .getattr("step_detailed")
                .unwrap()
                .call1((&s0,))
                .unwrap()
                .extract()
                .unwrap();
            let leached: f64 = fluxes.getattr("leached").unwrap().extract().unwrap();
            assert_eq!(leached, item(&s1, "leached").extract::<f64>().unwrap());
            assert_eq!(fluxes.getattr("percolation_factor").unwrap().extract::<f64>().unwrap(), 1.0);
        });
    }

    #[test]
    fn step_saturates_week_of_supplied_state() {
        with_cadmium(|_py, m| {
            let s0 = m.getattr("initial_state").unwrap().call0().unwrap();
            s0.downcast::<PyDict>().unwrap().set_item("week", u32::MAX).unwrap();
            let s1 = m.getattr("step").unwrap().call1((&s0,)).unwrap();
            assert_eq!(item(&s1, "week").extract::<u32>().unwrap(), u32::MAX);
        });
    }

    #[test]
    fn malformed_state_raises_value_error() {
        with_cadmium(|py, m| {
            let bad = PyDict::new(py);
            bad.set_item("week", 1).unwrap();
            let err = m.getattr("step").unwrap().call1((bad,)).unwrap_err();
            assert!(err.is_instance_of::<PyValueError>(py));
        });
    }

    #[test]
    fn export_json_carries_full_trajectory() {
        with_cadmium(|py, m| {
            let raw = PyDict::new(py);
            raw.set_item("durationWeeks", 7.4).unwrap();
            let text: String = m.getattr("export_json").unwrap().call1((raw,)).unwrap().extract().unwrap();
            let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
            assert_eq!(doc["results"].as_array().map(Vec::len), Some(9));
            assert_eq!(doc["parameters"]["durationWeeks"], 8);
        });
    }

    #[test]
    fn run_returns_numpy_columns() {
        with_cadmium(|py, m| {
            if py.import("numpy").is_err() {
                return;
            }
            let (params, states, traj): (Bound<'_, PyAny>, Bound<'_, PyList>, Bound<'_, PyAny>) =
                m.getattr("run").unwrap().call0().unwrap().extract().unwrap();
            assert_eq!(item(&params, "texture").extract::<String>().unwrap(), "Loam");
            assert_eq!(states.len(), 13);
            assert_eq!(traj.getattr("week").unwrap().len().unwrap(), 13);

            let (traj, fluxes): (Bound<'_, PyAny>, Bound<'_, PyAny>) =
                m.getattr("run_detailed").unwrap().call0().unwrap().extract().unwrap();
            assert_eq!(traj.getattr("leached").unwrap().len().unwrap(), 13);
            assert_eq!(fluxes.getattr("leached").unwrap().len().unwrap(), 12);

            let cols = m.getattr("run_columns").unwrap().call0().unwrap();
            assert_eq!(item(&cols, "surface_conc").len().unwrap(), 13);
        });
    }
}
