//! Energy expenditure estimates for endurance sports.
//!
//! A caller builds an [`ExerciseInput`], the engine derives the statistics of
//! the chosen [`Sport`] and hands back a flat [`Summary`] for presentation.

pub mod cli;
pub mod conversions;
pub mod error;
pub mod mets;
pub mod models;
pub mod parsers;
pub mod physics;
pub mod sports;
pub mod stats;

#[cfg(feature = "python")]
pub mod py;

pub use error::{Result, SportError};
pub use mets::{ConstantMets, MetsSource, MetsStats, MetsTable};
pub use models::{DescentDefault, ExerciseInput, ExerciseRecord};
pub use physics::{CyclingParameters, CyclingStats};
pub use sports::{compute, compute_json, Sport, SportStats};
pub use stats::{BaseStats, ExerciseStats, ResultValue, Summary};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn sportcalc_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py::compute_json, m)?)?;
    m.add_function(wrap_pyfunction!(py::output_fields, m)?)?;
    m.add_function(wrap_pyfunction!(py::list_sports, m)?)?;
    Ok(())
}
