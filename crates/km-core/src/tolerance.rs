//! Comparison thresholds.
//!
//! Floating-point results drift with every operation, so equality and
//! invertibility are decided against thresholds rather than exact values.
//! [`Tolerance`] bundles both so callers working at unusual scales can tune
//! them in one place.
//!
//! # Usage
//!
//! ```rust
//! use km_core::{Tolerance, EPSILON};
//!
//! let tol = Tolerance::default();
//! assert_eq!(tol.epsilon, EPSILON);
//! assert!(tol.approx_eq(1.0, 1.0 + 1e-6));
//!
//! let strict = tol.with_epsilon(1e-7);
//! assert!(!strict.approx_eq(1.0, 1.0 + 1e-5));
//! ```

use crate::Scalar;

/// Default per-component equality threshold.
pub const EPSILON: Scalar = 1.0e-4;

/// Default determinant magnitude below which a matrix counts as singular.
///
/// This is an absolute bound, so it depends on scale: a uniform scale by
/// `1e-4` has determinant `1e-12` and is rejected even though it is well
/// conditioned. Lower [`Tolerance::singular`] when working at such scales.
pub const SINGULAR_EPSILON: Scalar = 1.0e-10;

/// Thresholds used for approximate comparisons.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerance {
    /// Maximum absolute difference for two scalars to compare equal.
    pub epsilon: Scalar,
    /// Determinant magnitude below which a matrix is treated as singular.
    ///
    /// Compared against the raw determinant, which scales with the cube of
    /// a uniform scale factor; tune it to the magnitudes in use.
    pub singular: Scalar,
}

impl Tolerance {
    /// Creates a tolerance from explicit thresholds.
    #[inline]
    pub const fn new(epsilon: Scalar, singular: Scalar) -> Self {
        Self { epsilon, singular }
    }

    /// Returns a copy with a different equality threshold.
    #[inline]
    pub const fn with_epsilon(self, epsilon: Scalar) -> Self {
        Self { epsilon, ..self }
    }

    /// Returns a copy with a different singularity threshold.
    #[inline]
    pub const fn with_singular(self, singular: Scalar) -> Self {
        Self { singular, ..self }
    }

    /// Compares two scalars within [`epsilon`](Self::epsilon).
    #[inline]
    pub fn approx_eq(&self, a: Scalar, b: Scalar) -> bool {
        (a - b).abs() <= self.epsilon
    }

    /// Returns `true` if `determinant` is too small to invert.
    #[inline]
    pub fn is_singular(&self, determinant: Scalar) -> bool {
        determinant.is_nan() || determinant.abs() < self.singular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(EPSILON, SINGULAR_EPSILON)
    }
}
