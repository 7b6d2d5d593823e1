// core/src/py/mod.rs
//! Python binding, built with `--features python`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SportError;
use crate::models::{DescentDefault, ExerciseInput};
use crate::sports::{self, Sport};

fn to_py_err(e: SportError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Compute the statistics of `sport` from a JSON input mapping and return
/// them as a JSON object.
#[pyfunction]
#[pyo3(signature = (sport, input_json, descent_matches_ascent = false))]
pub fn compute_json(sport: &str, input_json: &str, descent_matches_ascent: bool) -> PyResult<String> {
    let sport: Sport = sport.parse().map_err(to_py_err)?;
    let input = ExerciseInput::from_json(input_json).map_err(to_py_err)?;
    let descent_default = if descent_matches_ascent {
        DescentDefault::MatchAscent
    } else {
        DescentDefault::Zero
    };

    sports::update(sport, &input, descent_default)
        .and_then(|stats| stats.summary().to_json())
        .map_err(to_py_err)
}

/// Output keys of `sport`, in order.
#[pyfunction]
pub fn output_fields(sport: &str) -> PyResult<Vec<&'static str>> {
    let sport: Sport = sport.parse().map_err(to_py_err)?;
    Ok(sport.fields().to_vec())
}

#[pyfunction]
pub fn list_sports() -> Vec<&'static str> {
    Sport::ALL.iter().map(|s| s.name()).collect()
}
