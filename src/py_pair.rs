//! Python-facing potential registration
//!
//! One class per potential family. Each class owns the coefficient table for
//! its potential: coefficients are set per unordered type pair (with the
//! model's documented defaults filling omitted keywords), `finalize()`
//! freezes the table, and `compute()` forwards candidate neighbor pairs to
//! the native kernels, returning per-pair forces, energies and virials as
//! numpy arrays. Summing those into per-particle totals is the host
//! engine's job.

use numpy::{PyArray1, PyArray2, PyArrayMethods, PyReadonlyArray1, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::pair::{
    compute_pairs, CoeffTable, CoeffTableBuilder, Family, LjParams, PairError, PairParams,
    PolydisperseModel, PolydisperseParams, YukawaParams,
};
use crate::precision::Scalar;

type ComputeArrays<'py> = (
    Bound<'py, PyArray2<Scalar>>,
    Bound<'py, PyArray1<Scalar>>,
    Bound<'py, PyArray1<Scalar>>,
);

fn value_error(e: PairError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Builder/frozen-table state shared by every potential class
struct PotentialState {
    builder: Option<CoeffTableBuilder>,
    table: Option<CoeffTable>,
}

impl PotentialState {
    fn new(family: Family, types: Vec<String>) -> PyResult<Self> {
        let builder = CoeffTableBuilder::new(family, types).map_err(value_error)?;
        Ok(Self {
            builder: Some(builder),
            table: None,
        })
    }

    fn set(&mut self, type_a: &str, type_b: &str, params: PairParams) -> PyResult<()> {
        match self.builder.as_mut() {
            Some(builder) => builder.set(type_a, type_b, params).map_err(value_error),
            None => Err(PyValueError::new_err(
                "coefficients are frozen once finalize() has been called; \
                 build a new potential to change them",
            )),
        }
    }

    fn finalize(&mut self) -> PyResult<()> {
        let builder = self
            .builder
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("finalize() has already been called"))?;
        // finalize on a copy so a failed check leaves the builder usable
        let table = builder.clone().finalize().map_err(value_error)?;
        self.builder = None;
        self.table = Some(table);
        Ok(())
    }

    fn table(&self) -> PyResult<&CoeffTable> {
        self.table.as_ref().ok_or_else(|| {
            PyValueError::new_err("finalize() must be called before evaluating pairs")
        })
    }

    fn evaluate(
        &self,
        type_a: &str,
        type_b: &str,
        r: Scalar,
        diameter_a: Scalar,
        diameter_b: Scalar,
    ) -> PyResult<(Scalar, Scalar)> {
        if r <= 0.0 {
            return Err(PyValueError::new_err(format!(
                "pair distance must be positive, got {r}"
            )));
        }
        let table = self.table()?;
        let i = table.type_index(type_a).map_err(value_error)?;
        let j = table.type_index(type_b).map_err(value_error)?;
        let coeffs = table.get(i, j).map_err(value_error)?;
        Ok(coeffs.evaluate(r, diameter_a, diameter_b))
    }

    fn compute<'py>(
        &self,
        py: Python<'py>,
        types_a: PyReadonlyArray1<'py, i64>,
        types_b: PyReadonlyArray1<'py, i64>,
        separations: PyReadonlyArray2<'py, Scalar>,
        diameters_a: PyReadonlyArray1<'py, Scalar>,
        diameters_b: PyReadonlyArray1<'py, Scalar>,
    ) -> PyResult<ComputeArrays<'py>> {
        let table = self.table()?;

        let types_a = to_type_indices(types_a)?;
        let types_b = to_type_indices(types_b)?;
        let n = types_a.len();

        let sep = separations.as_array();
        if sep.nrows() != n || sep.ncols() != 3 {
            return Err(PyValueError::new_err(format!(
                "separations must have shape ({n}, 3), got ({}, {})",
                sep.nrows(),
                sep.ncols()
            )));
        }
        let mut sep_vecs = Vec::with_capacity(n);
        for row in sep.rows() {
            sep_vecs.push([row[0], row[1], row[2]]);
        }

        let diameters_a = diameters_a.as_array().to_vec();
        let diameters_b = diameters_b.as_array().to_vec();

        let batch = compute_pairs(
            table,
            &types_a,
            &types_b,
            &sep_vecs,
            &diameters_a,
            &diameters_b,
        )
        .map_err(value_error)?;

        let mut flat = Vec::with_capacity(n * 3);
        for f in &batch.forces {
            flat.extend_from_slice(f);
        }
        let forces = PyArray1::from_vec_bound(py, flat).reshape([n, 3])?;
        let energies = PyArray1::from_vec_bound(py, batch.energies);
        let virials = PyArray1::from_vec_bound(py, batch.virials);
        Ok((forces, energies, virials))
    }
}

fn to_type_indices(types: PyReadonlyArray1<'_, i64>) -> PyResult<Vec<usize>> {
    types
        .as_array()
        .iter()
        .map(|&t| {
            usize::try_from(t)
                .map_err(|_| PyValueError::new_err(format!("negative type index: {t}")))
        })
        .collect()
}

/// Truncated Lennard-Jones pair potential
///
/// V(r) = 4 epsilon [ (sigma/r)^12 - alpha (sigma/r)^6 ] for r below the
/// pair's cutoff, zero beyond it.
#[pyclass]
pub struct LennardJonesPair {
    state: PotentialState,
    r_cut_default: Scalar,
}

#[pymethods]
impl LennardJonesPair {
    #[new]
    fn new(types: Vec<String>, r_cut: Scalar) -> PyResult<Self> {
        Ok(Self {
            state: PotentialState::new(Family::LennardJones, types)?,
            r_cut_default: r_cut,
        })
    }

    /// Set coefficients for one unordered type pair
    #[pyo3(signature = (type_a, type_b, epsilon, sigma, alpha = 1.0, r_cut = None))]
    fn set_params(
        &mut self,
        type_a: &str,
        type_b: &str,
        epsilon: Scalar,
        sigma: Scalar,
        alpha: Scalar,
        r_cut: Option<Scalar>,
    ) -> PyResult<()> {
        let params = LjParams::new(epsilon, sigma, r_cut.unwrap_or(self.r_cut_default))
            .with_alpha(alpha);
        self.state
            .set(type_a, type_b, PairParams::LennardJones(params))
    }

    /// Verify every type pair is set and freeze the table
    fn finalize(&mut self) -> PyResult<()> {
        self.state.finalize()
    }

    #[getter]
    fn is_finalized(&self) -> bool {
        self.state.table.is_some()
    }

    /// Name this potential's energy is logged under
    fn name(&self) -> String {
        Family::LennardJones.name()
    }

    /// Force magnitude and energy for one pair at distance r
    #[pyo3(signature = (type_a, type_b, r, diameter_a = 1.0, diameter_b = 1.0))]
    fn evaluate(
        &self,
        type_a: &str,
        type_b: &str,
        r: Scalar,
        diameter_a: Scalar,
        diameter_b: Scalar,
    ) -> PyResult<(Scalar, Scalar)> {
        self.state.evaluate(type_a, type_b, r, diameter_a, diameter_b)
    }

    /// Evaluate a batch of candidate pairs; returns (forces, energies, virials)
    fn compute<'py>(
        &self,
        py: Python<'py>,
        types_a: PyReadonlyArray1<'py, i64>,
        types_b: PyReadonlyArray1<'py, i64>,
        separations: PyReadonlyArray2<'py, Scalar>,
        diameters_a: PyReadonlyArray1<'py, Scalar>,
        diameters_b: PyReadonlyArray1<'py, Scalar>,
    ) -> PyResult<ComputeArrays<'py>> {
        self.state
            .compute(py, types_a, types_b, separations, diameters_a, diameters_b)
    }
}

/// Lennard-Jones with the cutoff force subtracted inside the cutoff, so the
/// force vanishes continuously at r_cut
#[pyclass]
pub struct ForceShiftedLJPair {
    state: PotentialState,
    r_cut_default: Scalar,
}

#[pymethods]
impl ForceShiftedLJPair {
    #[new]
    fn new(types: Vec<String>, r_cut: Scalar) -> PyResult<Self> {
        Ok(Self {
            state: PotentialState::new(Family::ForceShiftedLj, types)?,
            r_cut_default: r_cut,
        })
    }

    #[pyo3(signature = (type_a, type_b, epsilon, sigma, alpha = 1.0, r_cut = None))]
    fn set_params(
        &mut self,
        type_a: &str,
        type_b: &str,
        epsilon: Scalar,
        sigma: Scalar,
        alpha: Scalar,
        r_cut: Option<Scalar>,
    ) -> PyResult<()> {
        let params = LjParams::new(epsilon, sigma, r_cut.unwrap_or(self.r_cut_default))
            .with_alpha(alpha);
        self.state
            .set(type_a, type_b, PairParams::ForceShiftedLj(params))
    }

    fn finalize(&mut self) -> PyResult<()> {
        self.state.finalize()
    }

    #[getter]
    fn is_finalized(&self) -> bool {
        self.state.table.is_some()
    }

    fn name(&self) -> String {
        Family::ForceShiftedLj.name()
    }

    #[pyo3(signature = (type_a, type_b, r, diameter_a = 1.0, diameter_b = 1.0))]
    fn evaluate(
        &self,
        type_a: &str,
        type_b: &str,
        r: Scalar,
        diameter_a: Scalar,
        diameter_b: Scalar,
    ) -> PyResult<(Scalar, Scalar)> {
        self.state.evaluate(type_a, type_b, r, diameter_a, diameter_b)
    }

    fn compute<'py>(
        &self,
        py: Python<'py>,
        types_a: PyReadonlyArray1<'py, i64>,
        types_b: PyReadonlyArray1<'py, i64>,
        separations: PyReadonlyArray2<'py, Scalar>,
        diameters_a: PyReadonlyArray1<'py, Scalar>,
        diameters_b: PyReadonlyArray1<'py, Scalar>,
    ) -> PyResult<ComputeArrays<'py>> {
        self.state
            .compute(py, types_a, types_b, separations, diameters_a, diameters_b)
    }
}

/// Polydisperse power-law pair potential
///
/// Constructed either with a named model (`polydisperse12`,
/// `polydisperse18`, `polydisperse10`, `polydisperse106`, `lennardjones`)
/// or with explicit integer exponents m and n. The cutoff scales with the
/// mean diameter of the two particles in a pair, so interaction range
/// follows particle size, not just type.
#[pyclass]
pub struct PolydispersePair {
    state: PotentialState,
    model: PolydisperseModel,
}

#[pymethods]
impl PolydispersePair {
    #[new]
    #[pyo3(signature = (types, model = None, m = None, n = None))]
    fn new(
        types: Vec<String>,
        model: Option<String>,
        m: Option<i32>,
        n: Option<i32>,
    ) -> PyResult<Self> {
        let model = match (model, m, n) {
            (Some(name), None, None) => PolydisperseModel::from_name(&name).map_err(value_error)?,
            (None, Some(m), Some(n)) => PolydisperseModel::custom(m, n).map_err(value_error)?,
            _ => {
                return Err(PyValueError::new_err(
                    "pass either model=<name> or both m= and n= exponents",
                ))
            }
        };
        Ok(Self {
            state: PotentialState::new(Family::Polydisperse(model), types)?,
            model,
        })
    }

    /// Set coefficients for one unordered type pair; omitted keywords fall
    /// back to the model's defaults
    #[pyo3(signature = (type_a, type_b, v0 = None, eps = None, scaledr_cut = None))]
    fn set_params(
        &mut self,
        type_a: &str,
        type_b: &str,
        v0: Option<Scalar>,
        eps: Option<Scalar>,
        scaledr_cut: Option<Scalar>,
    ) -> PyResult<()> {
        let defaults = self.model.default_params();
        let params = PolydisperseParams::new(
            v0.unwrap_or(defaults.v0),
            eps.unwrap_or(defaults.eps),
            scaledr_cut.unwrap_or(defaults.scaledr_cut),
        );
        self.state
            .set(type_a, type_b, PairParams::Polydisperse(params))
    }

    fn finalize(&mut self) -> PyResult<()> {
        self.state.finalize()
    }

    #[getter]
    fn is_finalized(&self) -> bool {
        self.state.table.is_some()
    }

    fn name(&self) -> String {
        self.model.name()
    }

    /// Repulsive and attractive exponents (m, n)
    #[getter]
    fn exponents(&self) -> (i32, i32) {
        self.model.exponents()
    }

    #[pyo3(signature = (type_a, type_b, r, diameter_a = 1.0, diameter_b = 1.0))]
    fn evaluate(
        &self,
        type_a: &str,
        type_b: &str,
        r: Scalar,
        diameter_a: Scalar,
        diameter_b: Scalar,
    ) -> PyResult<(Scalar, Scalar)> {
        self.state.evaluate(type_a, type_b, r, diameter_a, diameter_b)
    }

    fn compute<'py>(
        &self,
        py: Python<'py>,
        types_a: PyReadonlyArray1<'py, i64>,
        types_b: PyReadonlyArray1<'py, i64>,
        separations: PyReadonlyArray2<'py, Scalar>,
        diameters_a: PyReadonlyArray1<'py, Scalar>,
        diameters_b: PyReadonlyArray1<'py, Scalar>,
    ) -> PyResult<ComputeArrays<'py>> {
        self.state
            .compute(py, types_a, types_b, separations, diameters_a, diameters_b)
    }
}

/// Polydisperse Yukawa (screened Coulomb) pair potential
#[pyclass]
pub struct PolydisperseYukawaPair {
    state: PotentialState,
}

#[pymethods]
impl PolydisperseYukawaPair {
    #[new]
    fn new(types: Vec<String>) -> PyResult<Self> {
        Ok(Self {
            state: PotentialState::new(Family::PolydisperseYukawa, types)?,
        })
    }

    #[pyo3(signature = (type_a, type_b, v0 = None, eps = None, scaledr_cut = None, kappa = None))]
    fn set_params(
        &mut self,
        type_a: &str,
        type_b: &str,
        v0: Option<Scalar>,
        eps: Option<Scalar>,
        scaledr_cut: Option<Scalar>,
        kappa: Option<Scalar>,
    ) -> PyResult<()> {
        let defaults = YukawaParams::default();
        let params = YukawaParams::new(
            v0.unwrap_or(defaults.v0),
            eps.unwrap_or(defaults.eps),
            scaledr_cut.unwrap_or(defaults.scaledr_cut),
            kappa.unwrap_or(defaults.kappa),
        );
        self.state
            .set(type_a, type_b, PairParams::PolydisperseYukawa(params))
    }

    fn finalize(&mut self) -> PyResult<()> {
        self.state.finalize()
    }

    #[getter]
    fn is_finalized(&self) -> bool {
        self.state.table.is_some()
    }

    fn name(&self) -> String {
        Family::PolydisperseYukawa.name()
    }

    #[pyo3(signature = (type_a, type_b, r, diameter_a = 1.0, diameter_b = 1.0))]
    fn evaluate(
        &self,
        type_a: &str,
        type_b: &str,
        r: Scalar,
        diameter_a: Scalar,
        diameter_b: Scalar,
    ) -> PyResult<(Scalar, Scalar)> {
        self.state.evaluate(type_a, type_b, r, diameter_a, diameter_b)
    }

    fn compute<'py>(
        &self,
        py: Python<'py>,
        types_a: PyReadonlyArray1<'py, i64>,
        types_b: PyReadonlyArray1<'py, i64>,
        separations: PyReadonlyArray2<'py, Scalar>,
        diameters_a: PyReadonlyArray1<'py, Scalar>,
        diameters_b: PyReadonlyArray1<'py, Scalar>,
    ) -> PyResult<ComputeArrays<'py>> {
        self.state
            .compute(py, types_a, types_b, separations, diameters_a, diameters_b)
    }
}

/// Registration names of the built-in polydisperse models
#[pyfunction]
pub fn available_models() -> Vec<&'static str> {
    vec![
        "polydisperse12",
        "polydisperse18",
        "polydisperse10",
        "polydisperse106",
        "lennardjones",
    ]
}
