//! Floating-point precision selection
//!
//! The host engine is compiled for either single or double precision; the
//! kernels here must run in the same width without silent upcasting. The
//! `single-precision` cargo feature switches every computation to f32.

#[cfg(feature = "single-precision")]
pub type Scalar = f32;

#[cfg(not(feature = "single-precision"))]
pub type Scalar = f64;
