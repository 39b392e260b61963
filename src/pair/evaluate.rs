//! Per-distance force and energy kernels
//!
//! Pure functions of (squared distance, derived coefficients, diameters).
//! Every kernel returns exact zeros at and beyond the cutoff, computes the
//! force analytically, and is safe to call concurrently across pairs; there
//! is no shared state of any kind. Kernels produce force divided by r so the
//! caller can scale the separation vector directly, without normalizing.
//!
//! Fixed small powers are built by repeated multiplication (r6inv from
//! r2inv), generic integer exponents with `powi`; `powf` is never used here.

use crate::precision::Scalar;

use super::coeffs::{LjCoeffs, PairCoeffs, PolydisperseCoeffs, ShiftedLjCoeffs, YukawaCoeffs};

/// Force divided by distance, and pair energy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceEnergy {
    pub force_divr: Scalar,
    pub energy: Scalar,
}

impl ForceEnergy {
    pub const ZERO: ForceEnergy = ForceEnergy {
        force_divr: 0.0,
        energy: 0.0,
    };
}

/// Truncated 12-6 Lennard-Jones
pub fn lj(rsq: Scalar, c: &LjCoeffs) -> ForceEnergy {
    if rsq >= c.r_cut * c.r_cut {
        return ForceEnergy::ZERO;
    }
    let r2inv = 1.0 / rsq;
    let r6inv = r2inv * r2inv * r2inv;
    ForceEnergy {
        force_divr: r2inv * r6inv * (12.0 * c.lj1 * r6inv - 6.0 * c.lj2),
        energy: r6inv * (c.lj1 * r6inv - c.lj2),
    }
}

/// Lennard-Jones with the cutoff force subtracted everywhere inside the
/// cutoff, and the energy corrected by the matching linear term, so both
/// force and energy are continuous (the force exactly zero) at `r_cut`
pub fn force_shifted_lj(rsq: Scalar, c: &ShiftedLjCoeffs) -> ForceEnergy {
    if rsq >= c.r_cut * c.r_cut {
        return ForceEnergy::ZERO;
    }
    let r = rsq.sqrt();
    let rinv = 1.0 / r;
    let r2inv = 1.0 / rsq;
    let r6inv = r2inv * r2inv * r2inv;
    ForceEnergy {
        force_divr: r2inv * r6inv * (12.0 * c.lj1 * r6inv - 6.0 * c.lj2)
            - c.force_at_cut * rinv,
        energy: r6inv * (c.lj1 * r6inv - c.lj2) - c.energy_at_cut
            + c.force_at_cut * (r - c.r_cut),
    }
}

/// Polydisperse power-law with quartic smoothing
///
/// `sigma` is the pair's mean diameter; the cutoff is `scaledr_cut * sigma`
/// and all distances enter in units of `sigma`.
pub fn polydisperse(rsq: Scalar, sigma: Scalar, c: &PolydisperseCoeffs) -> ForceEnergy {
    let r_cut = c.scaledr_cut * sigma;
    if rsq >= r_cut * r_cut {
        return ForceEnergy::ZERO;
    }
    let sigsq = sigma * sigma;
    let x2 = rsq / sigsq;
    let xinv = (sigsq / rsq).sqrt();
    let xinv_m = xinv.powi(c.m);
    let xinv_n = xinv.powi(c.n);
    let (mf, nf) = (c.m as Scalar, c.n as Scalar);
    ForceEnergy {
        force_divr: (c.v0 * (mf * xinv_m - c.eps * nf * xinv_n) * xinv * xinv
            - 2.0 * c.c1
            - 4.0 * c.c2 * x2)
            / sigsq,
        energy: c.v0 * (xinv_m - c.eps * xinv_n) + c.c0 + c.c1 * x2 + c.c2 * x2 * x2,
    }
}

/// Screened Coulomb with a diameter-dependent contact distance
///
/// `sigma` is the pair's contact distance; the energy at contact is `v0`.
pub fn polydisperse_yukawa(rsq: Scalar, sigma: Scalar, c: &YukawaCoeffs) -> ForceEnergy {
    // a large non-additivity can push the contact distance non-positive,
    // at which point the pair does not interact
    if sigma <= 0.0 {
        return ForceEnergy::ZERO;
    }
    let r_cut = c.scaledr_cut * sigma;
    if rsq >= r_cut * r_cut {
        return ForceEnergy::ZERO;
    }
    let r = rsq.sqrt();
    let rinv = 1.0 / r;
    let energy = c.v0 * sigma * (-c.kappa * (r - sigma)).exp() * rinv;
    ForceEnergy {
        force_divr: energy * (c.kappa + rinv) * rinv,
        energy,
    }
}

/// Contact distance of the Yukawa family: the mean diameter shrunk by the
/// non-additivity term
pub fn yukawa_sigma(eps: Scalar, d_i: Scalar, d_j: Scalar) -> Scalar {
    0.5 * (d_i + d_j) * (1.0 - eps * (d_i - d_j).abs())
}

impl PairCoeffs {
    /// Effective cutoff radius for a pair of particles with the given
    /// diameters; diameters are ignored by the LJ families
    pub fn effective_r_cut(&self, d_i: Scalar, d_j: Scalar) -> Scalar {
        match self {
            PairCoeffs::LennardJones(c) => c.r_cut,
            PairCoeffs::ForceShiftedLj(c) => c.r_cut,
            PairCoeffs::Polydisperse(c) => c.scaledr_cut * 0.5 * (d_i + d_j),
            PairCoeffs::PolydisperseYukawa(c) => {
                c.scaledr_cut * yukawa_sigma(c.eps, d_i, d_j)
            }
        }
    }

    /// Evaluate at squared distance `rsq`, returning force/r and energy
    pub fn evaluate_sq(&self, rsq: Scalar, d_i: Scalar, d_j: Scalar) -> ForceEnergy {
        match self {
            PairCoeffs::LennardJones(c) => lj(rsq, c),
            PairCoeffs::ForceShiftedLj(c) => force_shifted_lj(rsq, c),
            PairCoeffs::Polydisperse(c) => polydisperse(rsq, 0.5 * (d_i + d_j), c),
            PairCoeffs::PolydisperseYukawa(c) => {
                polydisperse_yukawa(rsq, yukawa_sigma(c.eps, d_i, d_j), c)
            }
        }
    }

    /// Evaluate at distance `r`, returning (force magnitude, energy)
    ///
    /// The force magnitude is positive for repulsion and is applied along
    /// the unit separation vector by the caller.
    pub fn evaluate(&self, r: Scalar, d_i: Scalar, d_j: Scalar) -> (Scalar, Scalar) {
        let fe = self.evaluate_sq(r * r, d_i, d_j);
        (fe.force_divr * r, fe.energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pair::coeffs::PairCoeffs;
    use crate::pair::params::{
        Family, LjParams, PairParams, PolydisperseModel, PolydisperseParams, YukawaParams,
    };

    fn lj_coeffs(epsilon: Scalar, sigma: Scalar, r_cut: Scalar) -> PairCoeffs {
        PairCoeffs::derive(
            Family::LennardJones,
            &PairParams::LennardJones(LjParams::new(epsilon, sigma, r_cut)),
        )
        .unwrap()
    }

    fn poly_coeffs(model: PolydisperseModel, p: PolydisperseParams) -> PairCoeffs {
        PairCoeffs::derive(Family::Polydisperse(model), &PairParams::Polydisperse(p)).unwrap()
    }

    #[test]
    fn test_all_families_zero_at_and_beyond_cutoff() {
        let coeffs = [
            lj_coeffs(1.0, 1.0, 2.5),
            PairCoeffs::derive(
                Family::ForceShiftedLj,
                &PairParams::ForceShiftedLj(LjParams::new(1.0, 1.0, 2.5)),
            )
            .unwrap(),
            poly_coeffs(
                PolydisperseModel::Polydisperse12,
                PolydisperseModel::Polydisperse12.default_params(),
            ),
            PairCoeffs::derive(
                Family::PolydisperseYukawa,
                &PairParams::PolydisperseYukawa(YukawaParams::default()),
            )
            .unwrap(),
        ];
        for c in &coeffs {
            let r_cut = c.effective_r_cut(1.0, 1.0);
            for r in [r_cut, r_cut * 1.0001, r_cut * 10.0] {
                let (force, energy) = c.evaluate(r, 1.0, 1.0);
                assert_eq!(force, 0.0);
                assert_eq!(energy, 0.0);
            }
        }
    }

    #[test]
    fn test_lj_minimum() {
        // V(2^(1/6)) = -1 and F = 0 for unit parameters
        let c = lj_coeffs(1.0, 1.0, 3.0);
        let r_min = (2.0 as Scalar).powf(1.0 / 6.0);
        let (force, energy) = c.evaluate(r_min, 1.0, 1.0);
        assert!((energy - (-1.0)).abs() < 1e-6, "energy = {energy}");
        assert!(force.abs() < 1e-6, "force = {force}");
    }

    #[test]
    fn test_lj_repulsive_inside_sigma() {
        let c = lj_coeffs(1.0, 1.0, 3.0);
        let (force, energy) = c.evaluate(0.9, 1.0, 1.0);
        assert!(force > 0.0);
        assert!(energy > 0.0);
    }

    #[test]
    fn test_force_shifted_lj_continuous_at_cutoff() {
        let c = PairCoeffs::derive(
            Family::ForceShiftedLj,
            &PairParams::ForceShiftedLj(LjParams::new(1.0, 1.0, 2.5)),
        )
        .unwrap();
        let r_cut: Scalar = 2.5;
        let delta: Scalar = 1e-6;
        let (force, energy) = c.evaluate(r_cut - delta, 1.0, 1.0);
        // force goes to zero at the cutoff, energy approaches the outside
        // value (zero) with no jump
        assert!(force.abs() < 1e-4, "force just inside cutoff: {force}");
        assert!(energy.abs() < 1e-4, "energy just inside cutoff: {energy}");
    }

    #[test]
    fn test_force_shifted_lj_differs_from_plain_lj_inside() {
        let plain = lj_coeffs(1.0, 1.0, 2.5);
        let shifted = PairCoeffs::derive(
            Family::ForceShiftedLj,
            &PairParams::ForceShiftedLj(LjParams::new(1.0, 1.0, 2.5)),
        )
        .unwrap();
        let (f_plain, _) = plain.evaluate(1.5, 1.0, 1.0);
        let (f_shifted, _) = shifted.evaluate(1.5, 1.0, 1.0);
        // the shift subtracts the (attractive) cutoff force
        let rc: Scalar = 2.5;
        let f_cut = 4.0 * (12.0 * rc.powi(-13) - 6.0 * rc.powi(-7));
        assert!((f_plain - f_shifted - f_cut).abs() < 1e-10);
    }

    #[test]
    fn test_polydisperse12_defaults_vanish_at_effective_cutoff() {
        // v0 = 1, eps = 0.2, scaledr_cut = 1.25, both diameters 1.0: the
        // effective cutoff is 1.25 and the potential is smooth there
        let c = poly_coeffs(
            PolydisperseModel::Polydisperse12,
            PolydisperseModel::Polydisperse12.default_params(),
        );
        assert!((c.effective_r_cut(1.0, 1.0) - 1.25).abs() < 1e-12);

        let (force, energy) = c.evaluate(1.25, 1.0, 1.0);
        assert_eq!((force, energy), (0.0, 0.0));

        let (force, energy) = c.evaluate(1.25 - 1e-5, 1.0, 1.0);
        assert!(force.abs() < 1e-3, "force just inside cutoff: {force}");
        assert!(energy.abs() < 1e-6, "energy just inside cutoff: {energy}");
    }

    #[test]
    fn test_polydisperse_cutoff_scales_with_diameters() {
        let c = poly_coeffs(
            PolydisperseModel::Polydisperse12,
            PolydisperseModel::Polydisperse12.default_params(),
        );
        // mean diameter 1.2 -> cutoff 1.5; r = 1.4 interacts, r = 1.55 not
        assert!((c.effective_r_cut(1.0, 1.4) - 1.5).abs() < 1e-12);
        let (force, _) = c.evaluate(1.4, 1.0, 1.4);
        assert!(force != 0.0);
        let (force, energy) = c.evaluate(1.55, 1.0, 1.4);
        assert_eq!((force, energy), (0.0, 0.0));
    }

    #[test]
    fn test_polydisperse_eps_zero_drops_attraction_exactly() {
        let p = PolydisperseParams::new(1.3, 0.0, 1.25);
        let c = match poly_coeffs(PolydisperseModel::Polydisperse12, p) {
            PairCoeffs::Polydisperse(c) => c,
            _ => unreachable!(),
        };
        let sigma: Scalar = 1.0;
        for r in [0.6, 0.8, 1.0, 1.2] {
            let fe = polydisperse(r * r, sigma, &c);
            // the same expressions with the attractive term dropped
            // algebraically, associated exactly as the kernel computes them
            let sigsq = sigma * sigma;
            let x2 = r * r / sigsq;
            let xinv = (sigsq / (r * r)).sqrt();
            let xinv_m = xinv.powi(c.m);
            let mf = c.m as Scalar;
            let energy = c.v0 * xinv_m + c.c0 + c.c1 * x2 + c.c2 * x2 * x2;
            let force_divr =
                (c.v0 * (mf * xinv_m) * xinv * xinv - 2.0 * c.c1 - 4.0 * c.c2 * x2) / sigsq;
            assert_eq!(fe.energy, energy);
            assert_eq!(fe.force_divr, force_divr);
        }
    }

    #[test]
    fn test_pure_repulsion_force_monotonically_decreasing() {
        let c = poly_coeffs(
            PolydisperseModel::Polydisperse12,
            PolydisperseParams::new(1.0, 0.0, 1.25),
        );
        let mut prev = Scalar::INFINITY;
        let mut r = 0.5;
        while r < 1.25 {
            let (force, _) = c.evaluate(r, 1.0, 1.0);
            assert!(
                force > 0.0 && force < prev,
                "force not strictly decreasing at r = {r}"
            );
            prev = force;
            r += 0.01;
        }
    }

    #[test]
    fn test_polydisperse18_default_is_purely_repulsive() {
        let c = poly_coeffs(
            PolydisperseModel::Polydisperse18,
            PolydisperseModel::Polydisperse18.default_params(),
        );
        for r in [0.7, 0.9, 1.1, 1.2] {
            let (force, _) = c.evaluate(r, 1.0, 1.0);
            assert!(force > 0.0, "attractive force at r = {r}");
        }
    }

    #[test]
    fn test_yukawa_contact_energy_is_v0() {
        let c = PairCoeffs::derive(
            Family::PolydisperseYukawa,
            &PairParams::PolydisperseYukawa(YukawaParams::default()),
        )
        .unwrap();
        // contact distance 1.0 for unit diameters with eps = 0
        let (force, energy) = c.evaluate(1.0, 1.0, 1.0);
        assert!((energy - 10.0).abs() < 1e-9, "contact energy: {energy}");
        // F = V (kappa + 1/r) at contact
        assert!((force - 40.0).abs() < 1e-9, "contact force: {force}");
    }

    #[test]
    fn test_yukawa_non_additivity_shrinks_contact() {
        let c = PairCoeffs::derive(
            Family::PolydisperseYukawa,
            &PairParams::PolydisperseYukawa(YukawaParams::new(10.0, 0.2, 3.0, 3.0)),
        )
        .unwrap();
        // d = (1.0, 1.5): sigma = 1.25 * (1 - 0.2 * 0.5) = 1.125
        let sigma = yukawa_sigma(0.2, 1.0, 1.5);
        assert!((sigma - 1.125).abs() < 1e-12);
        assert!((c.effective_r_cut(1.0, 1.5) - 3.0 * sigma).abs() < 1e-12);
    }

    #[test]
    fn test_yukawa_decays_with_distance() {
        let c = PairCoeffs::derive(
            Family::PolydisperseYukawa,
            &PairParams::PolydisperseYukawa(YukawaParams::default()),
        )
        .unwrap();
        let (_, e1) = c.evaluate(1.0, 1.0, 1.0);
        let (_, e2) = c.evaluate(1.5, 1.0, 1.0);
        let (_, e3) = c.evaluate(2.0, 1.0, 1.0);
        assert!(e1 > e2 && e2 > e3 && e3 > 0.0);
    }
}
