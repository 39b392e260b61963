//! Per-type-pair coefficient table
//!
//! Two-phase lifecycle: a `CoeffTableBuilder` collects and derives
//! coefficients during single-threaded setup, then `finalize` verifies that
//! every unordered type pair has an entry and returns a frozen `CoeffTable`.
//! The frozen table has no mutation API, so a table handed to the force loop
//! can never change under it; any parameter change means building a new
//! table wholesale.

use std::collections::HashMap;

use crate::precision::Scalar;

use super::coeffs::PairCoeffs;
use super::error::PairError;
use super::params::{Family, PairParams};

/// Index into the upper triangle of an n x n symmetric matrix, i <= j
fn tri_index(i: usize, j: usize, n: usize) -> usize {
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    lo * n - lo * (lo + 1) / 2 + hi
}

/// Mutable coefficient table under construction
#[derive(Debug, Clone)]
pub struct CoeffTableBuilder {
    family: Family,
    type_names: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<Option<PairCoeffs>>,
}

impl CoeffTableBuilder {
    /// Start a table for `family` over the given particle types
    pub fn new(family: Family, type_names: Vec<String>) -> Result<Self, PairError> {
        if type_names.is_empty() {
            return Err(PairError::invalid(
                "types",
                "at least one particle type is required",
            ));
        }
        let mut index = HashMap::with_capacity(type_names.len());
        for (i, name) in type_names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(PairError::invalid(
                    "types",
                    format!("duplicate particle type '{name}'"),
                ));
            }
        }
        let n = type_names.len();
        log::debug!(
            "New {} coefficient table for {} types ({} pairs)",
            family.name(),
            n,
            n * (n + 1) / 2
        );
        Ok(Self {
            family,
            type_names,
            index,
            cells: vec![None; n * (n + 1) / 2],
        })
    }

    pub fn family(&self) -> Family {
        self.family
    }

    pub fn n_types(&self) -> usize {
        self.type_names.len()
    }

    /// Dense index of a particle type name
    pub fn type_index(&self, name: &str) -> Result<usize, PairError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PairError::UnknownType(name.to_string()))
    }

    /// Validate, derive and store coefficients for the unordered pair
    /// `(type_a, type_b)`; a failed validation leaves the cell untouched
    pub fn set(&mut self, type_a: &str, type_b: &str, params: PairParams) -> Result<(), PairError> {
        let i = self.type_index(type_a)?;
        let j = self.type_index(type_b)?;
        let coeffs = PairCoeffs::derive(self.family, &params)?;
        let n = self.n_types();
        self.cells[tri_index(i, j, n)] = Some(coeffs);
        log::debug!(
            "Set {} coefficients for pair ({type_a}, {type_b})",
            self.family.name()
        );
        Ok(())
    }

    /// Derived coefficients for the unordered pair, if already set
    pub fn get(&self, type_a: &str, type_b: &str) -> Result<&PairCoeffs, PairError> {
        let i = self.type_index(type_a)?;
        let j = self.type_index(type_b)?;
        self.cells[tri_index(i, j, self.n_types())]
            .as_ref()
            .ok_or_else(|| PairError::MissingCoefficients(type_a.to_string(), type_b.to_string()))
    }

    /// Verify completeness and freeze the table
    pub fn finalize(self) -> Result<CoeffTable, PairError> {
        let n = self.n_types();
        let mut unset = 0usize;
        let mut first_missing = None;
        for i in 0..n {
            for j in i..n {
                if self.cells[tri_index(i, j, n)].is_none() {
                    unset += 1;
                    if first_missing.is_none() {
                        first_missing = Some((i, j));
                    }
                }
            }
        }
        if let Some((i, j)) = first_missing {
            return Err(PairError::IncompleteCoefficients {
                unset,
                total: self.cells.len(),
                a: self.type_names[i].clone(),
                b: self.type_names[j].clone(),
            });
        }
        log::info!(
            "Finalized {} coefficient table: {} types, {} pairs",
            self.family.name(),
            n,
            self.cells.len()
        );
        Ok(CoeffTable {
            family: self.family,
            type_names: self.type_names,
            index: self.index,
            cells: self.cells.into_iter().flatten().collect(),
        })
    }
}

/// Immutable coefficient table, complete by construction
///
/// Shared freely across evaluation threads; lookups never fail for valid
/// type indices.
#[derive(Debug, Clone)]
pub struct CoeffTable {
    family: Family,
    type_names: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<PairCoeffs>,
}

impl CoeffTable {
    pub fn family(&self) -> Family {
        self.family
    }

    pub fn n_types(&self) -> usize {
        self.type_names.len()
    }

    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    pub fn type_index(&self, name: &str) -> Result<usize, PairError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| PairError::UnknownType(name.to_string()))
    }

    /// Derived coefficients for the unordered pair of type indices
    pub fn get(&self, i: usize, j: usize) -> Result<&PairCoeffs, PairError> {
        let n = self.n_types();
        if i >= n {
            return Err(PairError::UnknownType(format!("#{i}")));
        }
        if j >= n {
            return Err(PairError::UnknownType(format!("#{j}")));
        }
        Ok(&self.cells[tri_index(i, j, n)])
    }

    /// Largest effective cutoff over all type pairs, for particles of the
    /// given maximum diameter; what an external neighbor list needs to
    /// guarantee it reports every interacting pair
    pub fn max_r_cut(&self, d_max: Scalar) -> Scalar {
        self.cells
            .iter()
            .map(|c| c.effective_r_cut(d_max, d_max))
            .fold(0.0, Scalar::max)
    }
}
