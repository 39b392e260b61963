//! Error taxonomy for pair-potential setup and evaluation
//!
//! Setup errors (invalid parameters, incomplete tables) surface synchronously
//! at `set`/`finalize` time. Evaluation is total over the validated domain;
//! the only evaluation-time error is a non-positive pair distance, which a
//! well-formed neighbor list never produces.

use thiserror::Error;

use crate::precision::Scalar;

/// Errors during coefficient setup and pair evaluation
#[derive(Error, Debug)]
pub enum PairError {
    /// A parameter is missing or outside its physical domain
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Particle type name not present in the table
    #[error("Unknown particle type: {0}")]
    UnknownType(String),

    /// Lookup of a type pair that was never set
    #[error("No coefficients set for type pair ({0}, {1})")]
    MissingCoefficients(String, String),

    /// `finalize` called while some type pairs have no coefficients
    #[error("Coefficient table incomplete: {unset} of {total} type pairs unset, first missing ({a}, {b})")]
    IncompleteCoefficients {
        unset: usize,
        total: usize,
        a: String,
        b: String,
    },

    /// Evaluation called with a non-positive pair distance
    #[error("Pair distance must be positive, got r^2 = {0}")]
    Domain(Scalar),
}

impl PairError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        PairError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
