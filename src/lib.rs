//! polypair Rust extension
//!
//! Custom non-bonded pair potentials for a host molecular-dynamics engine:
//! Lennard-Jones, force-shifted Lennard-Jones, a polydisperse power-law
//! family and polydisperse Yukawa. The Python layer registers potentials
//! and per-type-pair coefficients; the kernels evaluate force and energy
//! per candidate neighbor pair.

use pyo3::prelude::*;

pub mod pair;
pub mod precision;

mod py_pair;

pub use precision::Scalar;

/// Python module
#[pymodule]
fn _polypair(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<py_pair::LennardJonesPair>()?;
    m.add_class::<py_pair::ForceShiftedLJPair>()?;
    m.add_class::<py_pair::PolydispersePair>()?;
    m.add_class::<py_pair::PolydisperseYukawaPair>()?;

    m.add_function(wrap_pyfunction!(py_pair::available_models, m)?)?;

    Ok(())
}
