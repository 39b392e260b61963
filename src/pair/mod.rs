//! Non-bonded pair-potential kernels
//!
//! Provides coefficient derivation, per-type-pair coefficient tables and
//! per-distance force/energy evaluation for the supported potential
//! families. Neighbor search, particle storage and force accumulation stay
//! with the host engine; this module only answers "given a distance and a
//! type pair, what are the force and energy".

pub mod coeffs;
pub mod compute;
pub mod error;
pub mod evaluate;
pub mod params;
pub mod table;

pub use coeffs::PairCoeffs;
pub use compute::{compute_pairs, evaluate_pair, BatchOutput, PairOutput};
pub use error::PairError;
pub use evaluate::ForceEnergy;
pub use params::{
    Family, LjParams, PairParams, PolydisperseModel, PolydisperseParams, YukawaParams,
};
pub use table::{CoeffTable, CoeffTableBuilder};
