//! Applying 4x4 transforms to [`Vec3`].
//!
//! Any type exposing 16 ordered scalars implements [`Transform4`] and can be
//! handed to the transform methods: [`Mat4`], a row-major `[[f32; 4]; 4]`,
//! and (with the `glam` feature) `glam::Mat4`.
//!
//! # Homogeneous coordinates
//!
//! | method                       | 4-vector       | divide by w |
//! |------------------------------|----------------|-------------|
//! | [`Vec3::transform`]          | `(x, y, z, 1)` | no          |
//! | [`Vec3::transform_coord`]    | `(x, y, z, 1)` | yes         |
//! | [`Vec3::transform_normal`]   | `(x, y, z, 0)` | no          |
//!
//! `transform_normal` applies the upper-left 3x3 only. Under non-uniform
//! scale a surface normal must go through the inverse-transpose instead:
//! `n.transform_normal(&m.normal_matrix()?)`.
//!
//! # Usage
//!
//! ```rust
//! use km_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));
//! let p = Vec3::new(1.0, 2.0, 3.0);
//! assert_eq!(p.transform(&m), Vec3::new(1.0, 2.0, 8.0));
//! assert_eq!(p.transform_normal(&m), p);
//! assert_eq!(p.transform(&m).inverse_transform(&m).unwrap(), p);
//! ```

use km_core::{Error, Result, Scalar, Tolerance};

use crate::{Mat4, Vec3};

/// A 4x4 transform: 16 ordered scalars plus an invertibility check.
pub trait Transform4 {
    /// Returns the elements as rows (column-vector convention).
    fn rows(&self) -> [[Scalar; 4]; 4];

    /// Returns the elements as a [`Mat4`].
    #[inline]
    fn to_mat4(&self) -> Mat4 {
        Mat4::from_rows(self.rows())
    }

    /// Inverts the transform with a custom singularity threshold.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if the determinant is too small.
    #[inline]
    fn try_inverse_with(&self, tolerance: &Tolerance) -> Result<Mat4> {
        self.to_mat4().try_inverse_with(tolerance)
    }

    /// Inverts the transform.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if the determinant is too small.
    #[inline]
    fn try_inverse(&self) -> Result<Mat4> {
        self.try_inverse_with(&Tolerance::default())
    }

    /// Returns `true` if the transform has an inverse.
    #[inline]
    fn is_invertible(&self) -> bool {
        self.try_inverse().is_ok()
    }
}

impl Transform4 for Mat4 {
    #[inline]
    fn rows(&self) -> [[Scalar; 4]; 4] {
        self.m
    }

    #[inline]
    fn to_mat4(&self) -> Mat4 {
        *self
    }
}

impl Transform4 for [[Scalar; 4]; 4] {
    #[inline]
    fn rows(&self) -> [[Scalar; 4]; 4] {
        *self
    }
}

#[cfg(feature = "glam")]
impl Transform4 for glam::Mat4 {
    #[inline]
    fn rows(&self) -> [[Scalar; 4]; 4] {
        // glam is column-major
        self.transpose().to_cols_array_2d()
    }
}

impl<T: Transform4 + ?Sized> Transform4 for &T {
    #[inline]
    fn rows(&self) -> [[Scalar; 4]; 4] {
        (**self).rows()
    }
}

#[inline]
fn affine(r: &[Scalar; 4], v: Vec3) -> Scalar {
    r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3]
}

#[inline]
fn linear(r: &[Scalar; 4], v: Vec3) -> Scalar {
    r[0] * v.x + r[1] * v.y + r[2] * v.z
}

impl Vec3 {
    /// Transforms the vector as a point (`w = 1`) without dividing by the
    /// resulting `w`.
    ///
    /// Exact for affine matrices; use [`transform_coord`](Self::transform_coord)
    /// when the matrix carries a projection.
    #[inline]
    pub fn transform<M: Transform4 + ?Sized>(self, m: &M) -> Self {
        let r = m.rows();
        Self::new(affine(&r[0], self), affine(&r[1], self), affine(&r[2], self))
    }

    /// Transforms the vector as a point and projects it back to `w = 1`.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] if the transformed `w` is zero (the point
    /// maps to infinity), [`Error::NonFinite`] if the division overflows.
    ///
    /// # Example
    ///
    /// ```rust
    /// use km_math::{Mat4, Vec3};
    ///
    /// assert_eq!(Vec3::ZERO.transform_coord(&Mat4::IDENTITY).unwrap(), Vec3::ZERO);
    /// ```
    pub fn transform_coord<M: Transform4 + ?Sized>(self, m: &M) -> Result<Self> {
        let r = m.rows();
        let w = affine(&r[3], self);
        if w == 0.0 {
            return Err(Error::divide_by_zero("transform_coord"));
        }
        let p = Self::new(
            affine(&r[0], self) / w,
            affine(&r[1], self) / w,
            affine(&r[2], self) / w,
        );
        if !p.is_finite() && self.is_finite() {
            return Err(Error::non_finite("transform_coord"));
        }
        Ok(p)
    }

    /// Transforms the vector as a direction (`w = 0`), ignoring translation.
    #[inline]
    pub fn transform_normal<M: Transform4 + ?Sized>(self, m: &M) -> Self {
        let r = m.rows();
        Self::new(linear(&r[0], self), linear(&r[1], self), linear(&r[2], self))
    }

    /// Transforms the vector as a point by the inverse of `m`.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if `m` has no inverse.
    #[inline]
    pub fn inverse_transform<M: Transform4 + ?Sized>(self, m: &M) -> Result<Self> {
        Ok(self.transform(&m.try_inverse()?))
    }

    /// Transforms the vector as a direction by the inverse of `m`.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if `m` has no inverse.
    #[inline]
    pub fn inverse_transform_normal<M: Transform4 + ?Sized>(self, m: &M) -> Result<Self> {
        Ok(self.transform_normal(&m.try_inverse()?))
    }

    /// Inverse point transform for rigid matrices (rotation + translation).
    ///
    /// Subtracts the translation and applies the transposed 3x3, which is
    /// the inverse only when the upper 3x3 is orthonormal. No singularity
    /// check is made; scaled or sheared input gives a wrong answer rather
    /// than an error.
    #[inline]
    pub fn inverse_transform_rigid<M: Transform4 + ?Sized>(self, m: &M) -> Self {
        let r = m.rows();
        let d = self - Self::new(r[0][3], r[1][3], r[2][3]);
        Self::new(
            r[0][0] * d.x + r[1][0] * d.y + r[2][0] * d.z,
            r[0][1] * d.x + r[1][1] * d.y + r[2][1] * d.z,
            r[0][2] * d.x + r[1][2] * d.y + r[2][2] * d.z,
        )
    }

    /// Inverse direction transform for rigid matrices.
    ///
    /// Applies the transposed 3x3; same orthonormality caveat as
    /// [`inverse_transform_rigid`](Self::inverse_transform_rigid).
    #[inline]
    pub fn inverse_transform_normal_rigid<M: Transform4 + ?Sized>(self, m: &M) -> Self {
        let r = m.rows();
        Self::new(
            r[0][0] * self.x + r[1][0] * self.y + r[2][0] * self.z,
            r[0][1] * self.x + r[1][1] * self.y + r[2][1] * self.z,
            r[0][2] * self.x + r[1][2] * self.y + r[2][2] * self.z,
        )
    }
}
