use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use serde_json::{Map, Number, Value};

use soilcd_core::cadmium::params::{validate, Parameters};
use soilcd_core::State;

/// Convert an arbitrary Python object into JSON.
///
/// Raw parameters are untrusted, so objects with no JSON counterpart become
/// `null` and the validator substitutes defaults for them.
pub fn py_to_json(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::Null);
    }
    // bool before int: Python bools are ints.
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        if let Ok(i) = obj.extract::<i64>() {
            return Ok(Value::from(i));
        }
    }
    if obj.is_instance_of::<PyFloat>() {
        let f: f64 = obj.extract()?;
        return Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::String(obj.extract::<String>()?));
    }
    if let Ok(dict) = obj.downcast::<PyDict>() {
        let mut map = Map::with_capacity(dict.len());
        for (k, v) in dict.iter() {
            map.insert(k.str()?.to_string(), py_to_json(&v)?);
        }
        return Ok(Value::Object(map));
    }
    if let Ok(list) = obj.downcast::<PyList>() {
        return list.iter().map(|v| py_to_json(&v)).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    if let Ok(tuple) = obj.downcast::<PyTuple>() {
        return tuple.iter().map(|v| py_to_json(&v)).collect::<PyResult<Vec<_>>>().map(Value::Array);
    }
    // numpy scalars and other float-likes
    match obj.extract::<f64>() {
        Ok(f) => Ok(Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)),
        Err(_) => Ok(Value::Null),
    }
}

/// Convert JSON into native Python objects (dict / list / str / int / float / bool / None).
pub fn json_to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    let obj = match value {
        Value::Null => py.None().into_bound(py),
        Value::Bool(b) => PyBool::new(py, *b).to_owned().into_any(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into_pyobject(py)?.into_any(),
            None => n.as_f64().unwrap_or(f64::NAN).into_pyobject(py)?.into_any(),
        },
        Value::String(s) => PyString::new(py, s).into_any(),
        Value::Array(items) => {
            let list = PyList::empty(py);
            for item in items {
                list.append(json_to_py(py, item)?)?;
            }
            list.into_any()
        }
        Value::Object(map) => {
            let dict = PyDict::new(py);
            for (k, v) in map {
                dict.set_item(k, json_to_py(py, v)?)?;
            }
            dict.into_any()
        }
    };
    Ok(obj)
}

/// Validate a Python mapping (or `None` for defaults) into parameters.
pub fn params_from_py(obj: Option<&Bound<'_, PyAny>>) -> PyResult<Parameters> {
    let raw = match obj {
        Some(o) => py_to_json(o)?,
        None => Value::Null,
    };
    Ok(validate(&raw))
}

/// Decode a state dict; malformed records raise `ValueError`.
pub fn state_from_py(obj: &Bound<'_, PyAny>) -> PyResult<State> {
    let raw = py_to_json(obj)?;
    State::from_raw(&raw).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_survives_python_roundtrip() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let value = json!({
                "advancedCEC": true,
                "durationWeeks": 12,
                "pH": 5.5,
                "texture": "Clay",
                "tags": [1, null, "x"],
            });
            let obj = json_to_py(py, &value).unwrap();
            assert!(item_is_bool(&obj, "advancedCEC"));
            assert_eq!(py_to_json(&obj).unwrap(), value);
        });
    }

    #[test]
    fn unconvertible_objects_become_null() {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(|py| {
            let obj = py.eval(pyo3::ffi::c_str!("object()"), None, None).unwrap();
            assert_eq!(py_to_json(&obj).unwrap(), Value::Null);
            let tuple = PyTuple::new(py, [1.5, 2.0]).unwrap();
            assert_eq!(py_to_json(tuple.as_any()).unwrap(), json!([1.5, 2.0]));
        });
    }

    #[test]
    fn params_default_when_missing() {
        assert_eq!(params_from_py(None).unwrap(), Parameters::default());
    }

    fn item_is_bool(obj: &Bound<'_, PyAny>, key: &str) -> bool {
        obj.get_item(key).map(|v| v.is_instance_of::<PyBool>()).unwrap_or(false)
    }
}
