//! Error types for km-rs operations.
//!
//! Every fallible operation in the workspace reports one of the variants of
//! [`Error`]. The set is deliberately small: vector math is total except for
//! division by zero and the inversion of a singular matrix.
//!
//! # Usage
//!
//! ```rust
//! use km_core::{Error, Result};
//!
//! fn reciprocal(s: f32) -> Result<f32> {
//!     if s == 0.0 {
//!         return Err(Error::divide_by_zero("reciprocal"));
//!     }
//!     Ok(1.0 / s)
//! }
//!
//! assert!(reciprocal(0.0).unwrap_err().is_divide_by_zero());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - `km-math` - `Vec3` normalization and checked division, `Mat4` inversion,
//!   inverse transforms

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during vector and matrix operations.
///
/// # Categories
///
/// - **Division**: [`DivideByZero`](Error::DivideByZero)
/// - **Inversion**: [`SingularMatrix`](Error::SingularMatrix)
/// - **Overflow**: [`NonFinite`](Error::NonFinite)
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// A divisor was zero.
    ///
    /// Returned when dividing by a zero scalar or a vector with a zero
    /// component, normalizing a zero-length vector, or projecting a point
    /// whose homogeneous `w` is zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use km_core::Error;
    ///
    /// let err = Error::divide_by_zero("normalize");
    /// assert_eq!(err.to_string(), "division by zero in normalize");
    /// ```
    #[error("division by zero in {op}")]
    DivideByZero {
        /// Operation that attempted the division
        op: &'static str,
    },

    /// The matrix has no inverse.
    ///
    /// Returned by inverse transforms when the absolute determinant is
    /// below the configured singularity threshold.
    #[error("matrix is singular (determinant {determinant:e})")]
    SingularMatrix {
        /// Determinant of the rejected matrix
        determinant: f32,
    },

    /// A checked operation produced NaN or infinity.
    #[error("non-finite result in {op}")]
    NonFinite {
        /// Operation that overflowed
        op: &'static str,
    },
}

impl Error {
    /// Creates an [`Error::DivideByZero`] error.
    #[inline]
    pub fn divide_by_zero(op: &'static str) -> Self {
        Self::DivideByZero { op }
    }

    /// Creates an [`Error::SingularMatrix`] error.
    #[inline]
    pub fn singular_matrix(determinant: f32) -> Self {
        Self::SingularMatrix { determinant }
    }

    /// Creates an [`Error::NonFinite`] error.
    #[inline]
    pub fn non_finite(op: &'static str) -> Self {
        Self::NonFinite { op }
    }

    /// Returns `true` if this is a division-by-zero error.
    #[inline]
    pub fn is_divide_by_zero(&self) -> bool {
        matches!(self, Self::DivideByZero { .. })
    }

    /// Returns `true` if this is a singular-matrix error.
    #[inline]
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularMatrix { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_by_zero() {
        let err = Error::divide_by_zero("div");
        assert!(err.is_divide_by_zero());
        assert!(!err.is_singular());
        assert!(err.to_string().contains("div"));
    }

    #[test]
    fn test_singular_matrix() {
        let err = Error::singular_matrix(0.0);
        assert!(err.is_singular());
        assert!(err.to_string().contains("singular"));
    }

    #[test]
    fn test_non_finite() {
        let err = Error::non_finite("try_div_scalar");
        assert_eq!(err.to_string(), "non-finite result in try_div_scalar");
        assert!(!err.is_divide_by_zero());
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_std(_: &dyn std::error::Error) {}
        takes_std(&Error::singular_matrix(1e-12));
    }
}
