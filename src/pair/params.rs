//! Per-type-pair parameters for each potential family
//!
//! One explicit parameter struct per family, with the documented defaults of
//! the named models. Validation happens here, once, at setup time; the
//! evaluation kernels assume every stored parameter is already in-domain.

use crate::precision::Scalar;

use super::error::PairError;

/// Potential family a coefficient table is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Plain truncated Lennard-Jones
    LennardJones,
    /// Lennard-Jones with the cutoff force subtracted inside the cutoff
    ForceShiftedLj,
    /// Power-law potential with quartic smoothing and diameter-scaled cutoff
    Polydisperse(PolydisperseModel),
    /// Screened Coulomb with diameter-dependent contact distance
    PolydisperseYukawa,
}

impl Family {
    /// Short lowercase name used when logging energies, one per potential
    pub fn name(&self) -> String {
        match self {
            Family::LennardJones => "lj".to_string(),
            Family::ForceShiftedLj => "force_shifted_lj".to_string(),
            Family::Polydisperse(model) => model.name(),
            Family::PolydisperseYukawa => "polydisperse_yukawa".to_string(),
        }
    }
}

/// Named members of the polydisperse power-law family
///
/// Each named model fixes the repulsive exponent `m` and the attractive
/// exponent `n`, and carries its own default parameter set. `Custom` accepts
/// any integer exponents with `m > n >= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolydisperseModel {
    /// 12-6 with a tight default cutoff, attraction on by default
    Polydisperse12,
    /// 18-6, purely repulsive by default (`eps = 0`)
    Polydisperse18,
    /// 10-6 with a weak default attraction
    Polydisperse10,
    /// 10-6 tuned as a Lennard-Jones-like liquid model
    Polydisperse106,
    /// 12-6 with the conventional LJ cutoff of 2.5 diameters
    LennardJones,
    /// Generic integer exponents, `m > n >= 1`
    Custom { m: i32, n: i32 },
}

impl PolydisperseModel {
    /// Build a custom model, rejecting out-of-domain exponents
    pub fn custom(m: i32, n: i32) -> Result<Self, PairError> {
        if n < 1 {
            return Err(PairError::invalid(
                "n",
                format!("attractive exponent must be a positive integer, got {n}"),
            ));
        }
        if m <= n {
            return Err(PairError::invalid(
                "m",
                format!("repulsive exponent must exceed the attractive one, got m = {m}, n = {n}"),
            ));
        }
        Ok(PolydisperseModel::Custom { m, n })
    }

    /// Look a named model up by its registration string
    pub fn from_name(name: &str) -> Result<Self, PairError> {
        match name {
            "polydisperse12" => Ok(PolydisperseModel::Polydisperse12),
            "polydisperse18" => Ok(PolydisperseModel::Polydisperse18),
            "polydisperse10" => Ok(PolydisperseModel::Polydisperse10),
            "polydisperse106" => Ok(PolydisperseModel::Polydisperse106),
            "lennardjones" => Ok(PolydisperseModel::LennardJones),
            _ => Err(PairError::invalid(
                "model",
                format!(
                    "unknown model '{name}', expected one of polydisperse12, polydisperse18, \
                     polydisperse10, polydisperse106, lennardjones"
                ),
            )),
        }
    }

    /// Repulsive and attractive exponents `(m, n)`
    pub fn exponents(&self) -> (i32, i32) {
        match self {
            PolydisperseModel::Polydisperse12 | PolydisperseModel::LennardJones => (12, 6),
            PolydisperseModel::Polydisperse18 => (18, 6),
            PolydisperseModel::Polydisperse10 | PolydisperseModel::Polydisperse106 => (10, 6),
            PolydisperseModel::Custom { m, n } => (*m, *n),
        }
    }

    /// Default parameter set of the model
    pub fn default_params(&self) -> PolydisperseParams {
        match self {
            PolydisperseModel::Polydisperse12 => PolydisperseParams::new(1.0, 0.2, 1.25),
            PolydisperseModel::Polydisperse18 => PolydisperseParams::new(1.0, 0.0, 1.25),
            PolydisperseModel::Polydisperse10 => PolydisperseParams::new(1.0, 0.0416667, 1.48),
            PolydisperseModel::Polydisperse106 => PolydisperseParams::new(1.0, 0.1, 2.5),
            PolydisperseModel::LennardJones => PolydisperseParams::new(1.0, 0.2, 2.5),
            PolydisperseModel::Custom { .. } => PolydisperseParams::new(1.0, 0.0, 1.25),
        }
    }

    pub fn name(&self) -> String {
        match self {
            PolydisperseModel::Polydisperse12 => "polydisperse-12".to_string(),
            PolydisperseModel::Polydisperse18 => "polydisperse-18".to_string(),
            PolydisperseModel::Polydisperse10 => "polydisperse-10".to_string(),
            PolydisperseModel::Polydisperse106 => "polydisperse-10-6".to_string(),
            PolydisperseModel::LennardJones => "polydisperse-lj".to_string(),
            PolydisperseModel::Custom { m, n } => format!("polydisperse-{m}-{n}"),
        }
    }
}

/// Lennard-Jones parameters for one type pair
///
/// V(r) = 4 epsilon [ (sigma/r)^12 - alpha (sigma/r)^6 ] below `r_cut`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LjParams {
    /// Well depth (energy units), >= 0
    pub epsilon: Scalar,
    /// Zero-crossing distance (distance units), > 0
    pub sigma: Scalar,
    /// Scale on the attractive term, defaults to 1.0
    pub alpha: Scalar,
    /// Cutoff radius for this pair (distance units), > 0
    pub r_cut: Scalar,
}

impl LjParams {
    pub fn new(epsilon: Scalar, sigma: Scalar, r_cut: Scalar) -> Self {
        Self {
            epsilon,
            sigma,
            alpha: 1.0,
            r_cut,
        }
    }

    pub fn with_alpha(mut self, alpha: Scalar) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> Result<(), PairError> {
        require("epsilon", self.epsilon, |v| v >= 0.0, "must be non-negative")?;
        require("sigma", self.sigma, |v| v > 0.0, "must be positive")?;
        require("alpha", self.alpha, |v| v >= 0.0, "must be non-negative")?;
        require("r_cut", self.r_cut, |v| v > 0.0, "must be positive")?;
        Ok(())
    }
}

/// Polydisperse power-law parameters for one type pair
///
/// Distances are measured in units of the pair's mean diameter; the cutoff
/// `scaledr_cut` is therefore a multiple of `(d_i + d_j) / 2` and the
/// potential is polydisperse by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolydisperseParams {
    /// Energy scale, > 0
    pub v0: Scalar,
    /// Strength of the attractive term; 0 disables attraction exactly
    pub eps: Scalar,
    /// Cutoff in units of the pair's mean diameter, > 0
    pub scaledr_cut: Scalar,
}

impl PolydisperseParams {
    pub fn new(v0: Scalar, eps: Scalar, scaledr_cut: Scalar) -> Self {
        Self {
            v0,
            eps,
            scaledr_cut,
        }
    }

    pub fn validate(&self) -> Result<(), PairError> {
        require("v0", self.v0, |v| v > 0.0, "must be positive")?;
        require("eps", self.eps, |v| v >= 0.0, "must be non-negative")?;
        require(
            "scaledr_cut",
            self.scaledr_cut,
            |v| v > 0.0,
            "must be positive",
        )?;
        Ok(())
    }
}

/// Polydisperse Yukawa parameters for one type pair
///
/// `eps` is the diameter non-additivity: the contact distance is
/// `(d_i + d_j) / 2 * (1 - eps |d_i - d_j|)`, so `eps = 0` recovers the
/// plain additive mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YukawaParams {
    /// Contact energy, > 0
    pub v0: Scalar,
    /// Diameter non-additivity, >= 0
    pub eps: Scalar,
    /// Cutoff in units of the pair's contact distance, > 0
    pub scaledr_cut: Scalar,
    /// Inverse screening length, >= 0
    pub kappa: Scalar,
}

impl YukawaParams {
    pub fn new(v0: Scalar, eps: Scalar, scaledr_cut: Scalar, kappa: Scalar) -> Self {
        Self {
            v0,
            eps,
            scaledr_cut,
            kappa,
        }
    }

    pub fn validate(&self) -> Result<(), PairError> {
        require("v0", self.v0, |v| v > 0.0, "must be positive")?;
        require("eps", self.eps, |v| v >= 0.0, "must be non-negative")?;
        require(
            "scaledr_cut",
            self.scaledr_cut,
            |v| v > 0.0,
            "must be positive",
        )?;
        require("kappa", self.kappa, |v| v >= 0.0, "must be non-negative")?;
        Ok(())
    }
}

impl Default for YukawaParams {
    fn default() -> Self {
        Self::new(10.0, 0.0, 3.0, 3.0)
    }
}

/// Parameters for one type pair, tagged by family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PairParams {
    LennardJones(LjParams),
    ForceShiftedLj(LjParams),
    Polydisperse(PolydisperseParams),
    PolydisperseYukawa(YukawaParams),
}

impl PairParams {
    /// Family name used in mismatch diagnostics
    pub fn family_name(&self) -> &'static str {
        match self {
            PairParams::LennardJones(_) => "lennard-jones",
            PairParams::ForceShiftedLj(_) => "force-shifted lennard-jones",
            PairParams::Polydisperse(_) => "polydisperse",
            PairParams::PolydisperseYukawa(_) => "polydisperse yukawa",
        }
    }

    pub fn validate(&self) -> Result<(), PairError> {
        match self {
            PairParams::LennardJones(p) | PairParams::ForceShiftedLj(p) => p.validate(),
            PairParams::Polydisperse(p) => p.validate(),
            PairParams::PolydisperseYukawa(p) => p.validate(),
        }
    }

    /// Whether these parameters belong to the given family
    pub fn matches(&self, family: Family) -> bool {
        matches!(
            (self, family),
            (PairParams::LennardJones(_), Family::LennardJones)
                | (PairParams::ForceShiftedLj(_), Family::ForceShiftedLj)
                | (PairParams::Polydisperse(_), Family::Polydisperse(_))
                | (PairParams::PolydisperseYukawa(_), Family::PolydisperseYukawa)
        )
    }
}

fn require(
    name: &'static str,
    value: Scalar,
    ok: impl Fn(Scalar) -> bool,
    what: &str,
) -> Result<(), PairError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(PairError::invalid(name, format!("{what}, got {value}")))
    }
}
