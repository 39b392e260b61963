//! Pair-loop adapter
//!
//! The contract the host's force-accumulation loop drives: one call per
//! candidate neighbor pair, taking the two type indices, the separation
//! vector and the two diameters, returning the force on particle a, the
//! pair energy and the virial. The force on b is the exact negation of the
//! force on a.
//!
//! Every call is a pure function of its inputs and a frozen table, so pairs
//! may be evaluated in any order and concurrently. Summing per-pair results
//! into per-particle totals is the caller's job and is the one
//! concurrency-sensitive step: parallel callers must reduce partial sums or
//! accumulate atomically.

use crate::precision::Scalar;

use super::error::PairError;
use super::table::CoeffTable;

/// Result of evaluating one candidate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairOutput {
    /// Force on particle a; force on b is its negation
    pub force: [Scalar; 3],
    /// Pair potential energy
    pub energy: Scalar,
    /// Virial contribution r . F, passed through to the pressure sum
    pub virial: Scalar,
}

/// Evaluate one candidate pair
///
/// `separation` points from particle b to particle a. Fails only on a
/// non-positive pair distance, which a well-formed neighbor list never
/// produces; beyond the pair's effective cutoff the result is exactly zero.
pub fn evaluate_pair(
    table: &CoeffTable,
    type_a: usize,
    type_b: usize,
    separation: [Scalar; 3],
    diameter_a: Scalar,
    diameter_b: Scalar,
) -> Result<PairOutput, PairError> {
    let [dx, dy, dz] = separation;
    let rsq = dx * dx + dy * dy + dz * dz;
    if rsq <= 0.0 {
        return Err(PairError::Domain(rsq));
    }
    let coeffs = table.get(type_a, type_b)?;
    let fe = coeffs.evaluate_sq(rsq, diameter_a, diameter_b);
    Ok(PairOutput {
        force: [fe.force_divr * dx, fe.force_divr * dy, fe.force_divr * dz],
        energy: fe.energy,
        virial: fe.force_divr * rsq,
    })
}

/// Batch results for a list of candidate pairs
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub forces: Vec<[Scalar; 3]>,
    pub energies: Vec<Scalar>,
    pub virials: Vec<Scalar>,
}

/// Evaluate a list of candidate pairs in one call
///
/// All slices must have the same length. Per-pair results are independent;
/// nothing is accumulated here.
pub fn compute_pairs(
    table: &CoeffTable,
    types_a: &[usize],
    types_b: &[usize],
    separations: &[[Scalar; 3]],
    diameters_a: &[Scalar],
    diameters_b: &[Scalar],
) -> Result<BatchOutput, PairError> {
    let n = types_a.len();
    if [types_b.len(), separations.len(), diameters_a.len(), diameters_b.len()] != [n; 4] {
        return Err(PairError::invalid(
            "pairs",
            format!(
                "mismatched batch lengths: types {}/{}, separations {}, diameters {}/{}",
                n,
                types_b.len(),
                separations.len(),
                diameters_a.len(),
                diameters_b.len()
            ),
        ));
    }

    let mut forces = Vec::with_capacity(n);
    let mut energies = Vec::with_capacity(n);
    let mut virials = Vec::with_capacity(n);
    for k in 0..n {
        let out = evaluate_pair(
            table,
            types_a[k],
            types_b[k],
            separations[k],
            diameters_a[k],
            diameters_b[k],
        )?;
        forces.push(out.force);
        energies.push(out.energy);
        virials.push(out.virial);
    }
    Ok(BatchOutput {
        forces,
        energies,
        virials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::params::{Family, LjParams, PairParams};
    use crate::pair::table::CoeffTableBuilder;

    fn lj_table() -> CoeffTable {
        let mut b = CoeffTableBuilder::new(
            Family::LennardJones,
            vec!["A".to_string(), "B".to_string()],
        )
        .unwrap();
        b.set(
            "A",
            "A",
            PairParams::LennardJones(LjParams::new(1.0, 1.0, 2.5)),
        )
        .unwrap();
        b.set(
            "A",
            "B",
            PairParams::LennardJones(LjParams::new(1.5, 1.1, 2.5)),
        )
        .unwrap();
        b.set(
            "B",
            "B",
            PairParams::LennardJones(LjParams::new(2.0, 0.9, 2.5)),
        )
        .unwrap();
        b.finalize().unwrap()
    }

    #[test]
    fn test_newtons_third_law() {
        let table = lj_table();
        let separation = [0.8, -0.3, 0.5];
        let reversed = [-0.8, 0.3, -0.5];
        let ab = evaluate_pair(&table, 0, 1, separation, 1.0, 1.0).unwrap();
        let ba = evaluate_pair(&table, 1, 0, reversed, 1.0, 1.0).unwrap();
        for k in 0..3 {
            assert_eq!(ab.force[k], -ba.force[k]);
        }
        assert_eq!(ab.energy, ba.energy);
        assert_eq!(ab.virial, ba.virial);
    }

    #[test]
    fn test_force_points_along_separation() {
        let table = lj_table();
        // r < sigma: repulsive, force on a parallel to the separation
        let out = evaluate_pair(&table, 0, 0, [0.9, 0.0, 0.0], 1.0, 1.0).unwrap();
        assert!(out.force[0] > 0.0);
        assert_eq!(out.force[1], 0.0);
        assert_eq!(out.force[2], 0.0);
    }

    #[test]
    fn test_virial_is_r_dot_f() {
        let table = lj_table();
        let separation = [0.7, 0.4, -0.2];
        let out = evaluate_pair(&table, 0, 1, separation, 1.0, 1.0).unwrap();
        let dot = out.force[0] * separation[0]
            + out.force[1] * separation[1]
            + out.force[2] * separation[2];
        assert!((out.virial - dot).abs() < 1e-12);
    }

    #[test]
    fn test_zero_separation_is_domain_error() {
        let table = lj_table();
        let err = evaluate_pair(&table, 0, 0, [0.0, 0.0, 0.0], 1.0, 1.0).unwrap_err();
        assert!(matches!(err, PairError::Domain(_)));
    }

    #[test]
    fn test_beyond_cutoff_is_exactly_zero() {
        let table = lj_table();
        let out = evaluate_pair(&table, 0, 0, [3.0, 0.0, 0.0], 1.0, 1.0).unwrap();
        assert_eq!(out.force, [0.0, 0.0, 0.0]);
        assert_eq!(out.energy, 0.0);
        assert_eq!(out.virial, 0.0);
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let table = lj_table();
        let types_a = [0usize, 0, 1];
        let types_b = [0usize, 1, 1];
        let separations = [[1.1, 0.0, 0.0], [0.4, 0.9, 0.1], [0.0, 0.0, 1.3]];
        let diameters = [1.0 as Scalar, 1.0, 1.0];
        let batch = compute_pairs(
            &table,
            &types_a,
            &types_b,
            &separations,
            &diameters,
            &diameters,
        )
        .unwrap();
        assert_eq!(batch.energies.len(), 3);
        for k in 0..3 {
            let single = evaluate_pair(
                &table,
                types_a[k],
                types_b[k],
                separations[k],
                1.0,
                1.0,
            )
            .unwrap();
            assert_eq!(batch.forces[k], single.force);
            assert_eq!(batch.energies[k], single.energy);
            assert_eq!(batch.virials[k], single.virial);
        }
    }

    #[test]
    fn test_batch_length_mismatch_rejected() {
        let table = lj_table();
        let err = compute_pairs(
            &table,
            &[0, 1],
            &[0],
            &[[1.0, 0.0, 0.0]],
            &[1.0],
            &[1.0],
        )
        .unwrap_err();
        assert!(matches!(err, PairError::InvalidParameter { .. }));
    }
}
