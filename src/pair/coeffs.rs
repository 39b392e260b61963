//! Coefficient derivation
//!
//! Maps validated per-pair parameters to the closed-form constants consumed
//! at every distance evaluation. Derivation runs once per `set`, never in
//! the force loop, and a derived set is always consistent with the
//! parameters that produced it.

use crate::precision::Scalar;

use super::error::PairError;
use super::params::{Family, PairParams, PolydisperseParams, YukawaParams};

/// Lennard-Jones evaluation constants
///
/// lj1 = 4 epsilon sigma^12, lj2 = 4 alpha epsilon sigma^6.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjCoeffs {
    pub lj1: Scalar,
    pub lj2: Scalar,
    pub r_cut: Scalar,
}

/// Force-shifted Lennard-Jones constants
///
/// Carries the plain LJ constants plus the force and energy at the cutoff,
/// so the kernel can subtract a constant force and stay continuous at
/// `r_cut` without re-deriving anything per pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftedLjCoeffs {
    pub lj1: Scalar,
    pub lj2: Scalar,
    pub r_cut: Scalar,
    /// F(r_cut) of the unshifted potential
    pub force_at_cut: Scalar,
    /// V(r_cut) of the unshifted potential
    pub energy_at_cut: Scalar,
}

/// Polydisperse power-law constants
///
/// In the reduced coordinate x = r / sigma_ij the potential is
/// V(x) = v0 (x^-m - eps x^-n) + c0 + c1 x^2 + c2 x^4 for x below
/// `scaledr_cut`. The smoothing constants zero V, V' and V'' at the cutoff;
/// their attractive contributions carry the factor `eps`, so `eps = 0`
/// reduces exactly to the pure repulsive constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolydisperseCoeffs {
    pub v0: Scalar,
    pub eps: Scalar,
    pub scaledr_cut: Scalar,
    pub m: i32,
    pub n: i32,
    pub c0: Scalar,
    pub c1: Scalar,
    pub c2: Scalar,
}

/// Polydisperse Yukawa constants: the raw inputs, no pre-combination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YukawaCoeffs {
    pub v0: Scalar,
    pub eps: Scalar,
    pub scaledr_cut: Scalar,
    pub kappa: Scalar,
}

/// Derived constants for one type pair, tagged by family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairCoeffs {
    LennardJones(LjCoeffs),
    ForceShiftedLj(ShiftedLjCoeffs),
    Polydisperse(PolydisperseCoeffs),
    PolydisperseYukawa(YukawaCoeffs),
}

impl PairCoeffs {
    /// Derive the evaluation constants for `params` under `family`
    ///
    /// Fails with `InvalidParameter` if the parameters are out of domain or
    /// belong to a different family than the table was built for.
    pub fn derive(family: Family, params: &PairParams) -> Result<Self, PairError> {
        if !params.matches(family) {
            return Err(PairError::invalid(
                "params",
                format!(
                    "expected {} parameters, got {}",
                    family.name(),
                    params.family_name()
                ),
            ));
        }
        params.validate()?;

        Ok(match (family, params) {
            (Family::LennardJones, PairParams::LennardJones(p)) => {
                let (lj1, lj2) = lj_prefactors(p.epsilon, p.sigma, p.alpha);
                PairCoeffs::LennardJones(LjCoeffs {
                    lj1,
                    lj2,
                    r_cut: p.r_cut,
                })
            }
            (Family::ForceShiftedLj, PairParams::ForceShiftedLj(p)) => {
                let (lj1, lj2) = lj_prefactors(p.epsilon, p.sigma, p.alpha);
                let rc2inv = 1.0 / (p.r_cut * p.r_cut);
                let rc6inv = rc2inv * rc2inv * rc2inv;
                let force_at_cut = rc6inv * (12.0 * lj1 * rc6inv - 6.0 * lj2) / p.r_cut;
                let energy_at_cut = rc6inv * (lj1 * rc6inv - lj2);
                PairCoeffs::ForceShiftedLj(ShiftedLjCoeffs {
                    lj1,
                    lj2,
                    r_cut: p.r_cut,
                    force_at_cut,
                    energy_at_cut,
                })
            }
            (Family::Polydisperse(model), PairParams::Polydisperse(p)) => {
                let (m, n) = model.exponents();
                PairCoeffs::Polydisperse(polydisperse_coeffs(p, m, n))
            }
            (Family::PolydisperseYukawa, PairParams::PolydisperseYukawa(p)) => {
                PairCoeffs::PolydisperseYukawa(yukawa_coeffs(p))
            }
            // matches() above rules the remaining combinations out
            _ => unreachable!("family/params mismatch slipped past matches()"),
        })
    }
}

fn lj_prefactors(epsilon: Scalar, sigma: Scalar, alpha: Scalar) -> (Scalar, Scalar) {
    let sigma3 = sigma * sigma * sigma;
    let sigma6 = sigma3 * sigma3;
    let lj1 = 4.0 * epsilon * sigma6 * sigma6;
    let lj2 = 4.0 * alpha * epsilon * sigma6;
    (lj1, lj2)
}

/// Smoothing constants for the power-law family
///
/// Fixed by requiring V, V' and V'' to vanish at the scaled cutoff xc. Each
/// inverse power p contributes (per unit prefactor)
///   c0 += -(p+2)(p+4) / (8 xc^p)
///   c1 +=   p  (p+4) / (4 xc^(p+2))
///   c2 +=  -p  (p+2) / (8 xc^(p+4))
/// with prefactor v0 for the repulsive term and -eps v0 for the attractive
/// one. For m = 12, eps = 0 this gives the reference constants
/// (-28, 48, -21) v0 / xc^(12, 14, 16).
fn polydisperse_coeffs(p: &PolydisperseParams, m: i32, n: i32) -> PolydisperseCoeffs {
    let xc = p.scaledr_cut;
    let xcinv = 1.0 / xc;
    let (mf, nf) = (m as Scalar, n as Scalar);

    let c0 = p.v0 / 8.0
        * (-(mf + 2.0) * (mf + 4.0) * xcinv.powi(m)
            + p.eps * (nf + 2.0) * (nf + 4.0) * xcinv.powi(n));
    let c1 = p.v0 / 4.0
        * (mf * (mf + 4.0) * xcinv.powi(m + 2) - p.eps * nf * (nf + 4.0) * xcinv.powi(n + 2));
    let c2 = p.v0 / 8.0
        * (-mf * (mf + 2.0) * xcinv.powi(m + 4) + p.eps * nf * (nf + 2.0) * xcinv.powi(n + 4));

    PolydisperseCoeffs {
        v0: p.v0,
        eps: p.eps,
        scaledr_cut: p.scaledr_cut,
        m,
        n,
        c0,
        c1,
        c2,
    }
}

fn yukawa_coeffs(p: &YukawaParams) -> YukawaCoeffs {
    YukawaCoeffs {
        v0: p.v0,
        eps: p.eps,
        scaledr_cut: p.scaledr_cut,
        kappa: p.kappa,
    }
}
