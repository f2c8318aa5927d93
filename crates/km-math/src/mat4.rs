//! 4x4 matrix type for homogeneous transforms.
//!
//! [`Mat4`] is the collaborator [`Vec3`](crate::Vec3) transforms consume.
//! It carries only what those transforms need: construction, identity,
//! translation and scale builders, multiplication, transpose, determinant
//! and inverse.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**.
//! Translation lives in the fourth column:
//!
//! ```text
//! | m00 m01 m02 m03 |   | x |
//! | m10 m11 m12 m13 | * | y |
//! | m20 m21 m22 m23 |   | z |
//! | m30 m31 m32 m33 |   | w |
//! ```
//!
//! [`Mat4::from_cols_array`] accepts the 16-scalar column-major layout used
//! by OpenGL-style libraries and `glam`.
//!
//! # Usage
//!
//! ```rust
//! use km_math::{Mat4, Vec3};
//!
//! let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
//! assert_eq!(m * Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
//! ```

use std::ops::{Index, Mul};

use km_core::{Error, Result, Scalar, Tolerance};
use tracing::{debug, trace};

use crate::Vec3;

/// A 4x4 matrix for homogeneous transforms.
///
/// Stored in row-major order. Equality is exact; use the [`approx`] traits
/// for tolerant comparison.
///
/// # Example
///
/// ```rust
/// use km_math::{Mat4, Vec3};
///
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat4::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    /// Matrix elements in row-major order: [row0, row1, row2, row3]
    pub m: [[Scalar; 4]; 4],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 4]; 4] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self {
        m: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[Scalar; 4]; 4]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays.
    ///
    /// Transposes the input (columns become rows internally).
    #[inline]
    pub const fn from_cols(cols: [[Scalar; 4]; 4]) -> Self {
        Self::from_rows(cols).transpose()
    }

    /// Creates a matrix from 16 scalars in column-major order.
    ///
    /// Element `a[c * 4 + r]` lands in row `r`, column `c`, so a translation
    /// stored at indices 12, 13, 14 ends up in the fourth column.
    #[inline]
    pub const fn from_cols_array(a: &[Scalar; 16]) -> Self {
        Self::from_cols([
            [a[0], a[1], a[2], a[3]],
            [a[4], a[5], a[6], a[7]],
            [a[8], a[9], a[10], a[11]],
            [a[12], a[13], a[14], a[15]],
        ])
    }

    /// Returns the 16 scalars in column-major order.
    #[inline]
    #[rustfmt::skip]
    pub const fn to_cols_array(&self) -> [Scalar; 16] {
        let m = &self.m;
        [
            m[0][0], m[1][0], m[2][0], m[3][0],
            m[0][1], m[1][1], m[2][1], m[3][1],
            m[0][2], m[1][2], m[2][2], m[3][2],
            m[0][3], m[1][3], m[2][3], m[3][3],
        ]
    }

    /// Creates a translation matrix.
    #[inline]
    pub const fn from_translation(t: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, t.x],
            [0.0, 1.0, 0.0, t.y],
            [0.0, 0.0, 1.0, t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a (possibly non-uniform) scale matrix.
    #[inline]
    pub const fn from_scale(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Returns a row.
    #[inline]
    pub const fn row(&self, i: usize) -> [Scalar; 4] {
        self.m[i]
    }

    /// Returns a column.
    #[inline]
    pub const fn col(&self, i: usize) -> [Scalar; 4] {
        [self.m[0][i], self.m[1][i], self.m[2][i], self.m[3][i]]
    }

    /// Returns the translation part (fourth column, xyz).
    #[inline]
    pub const fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub const fn transpose(&self) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0], m[1][0], m[2][0], m[3][0]],
            [m[0][1], m[1][1], m[2][1], m[3][1]],
            [m[0][2], m[1][2], m[2][2], m[3][2]],
            [m[0][3], m[1][3], m[2][3], m[3][3]],
        ])
    }

    /// Computes the determinant.
    pub fn determinant(&self) -> Scalar {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    // 2x2 minors of the top two rows (s) and bottom two rows (c).
    fn minors(&self) -> ([Scalar; 6], [Scalar; 6]) {
        let m = &self.m;
        let s = [
            m[0][0] * m[1][1] - m[1][0] * m[0][1],
            m[0][0] * m[1][2] - m[1][0] * m[0][2],
            m[0][0] * m[1][3] - m[1][0] * m[0][3],
            m[0][1] * m[1][2] - m[1][1] * m[0][2],
            m[0][1] * m[1][3] - m[1][1] * m[0][3],
            m[0][2] * m[1][3] - m[1][2] * m[0][3],
        ];
        let c = [
            m[2][0] * m[3][1] - m[3][0] * m[2][1],
            m[2][0] * m[3][2] - m[3][0] * m[2][2],
            m[2][0] * m[3][3] - m[3][0] * m[2][3],
            m[2][1] * m[3][2] - m[3][1] * m[2][2],
            m[2][1] * m[3][3] - m[3][1] * m[2][3],
            m[2][2] * m[3][3] - m[3][2] * m[2][3],
        ];
        (s, c)
    }

    /// Computes the inverse of this matrix.
    ///
    /// Returns `None` if the matrix is singular (determinant below
    /// [`SINGULAR_EPSILON`](km_core::SINGULAR_EPSILON) in magnitude).
    ///
    /// # Example
    ///
    /// ```rust
    /// use km_math::{Mat4, Vec3};
    ///
    /// let m = Mat4::from_scale(Vec3::splat(2.0));
    /// let inv = m.inverse().unwrap();
    /// assert_eq!(inv, Mat4::from_scale(Vec3::splat(0.5)));
    /// assert!(Mat4::ZERO.inverse().is_none());
    /// ```
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.inverse_with(&Tolerance::default())
    }

    /// Computes the inverse with a custom singularity threshold.
    pub fn inverse_with(&self, tolerance: &Tolerance) -> Option<Self> {
        self.try_inverse_with(tolerance).ok()
    }

    /// Computes the inverse, reporting singular input as an error.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if the determinant is too small.
    #[inline]
    pub fn try_inverse(&self) -> Result<Self> {
        self.try_inverse_with(&Tolerance::default())
    }

    /// [`try_inverse`](Self::try_inverse) with a custom singularity threshold.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if `tolerance` deems the determinant too
    /// small.
    pub fn try_inverse_with(&self, tolerance: &Tolerance) -> Result<Self> {
        trace!(singular = tolerance.singular, "mat4 inverse");
        let (s, c) = self.minors();
        let det =
            s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if tolerance.is_singular(det) {
            debug!(det, threshold = tolerance.singular, "matrix is singular");
            return Err(Error::singular_matrix(det));
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Adjugate (transposed cofactors) scaled by 1/det
        Ok(Self::from_rows([
            [
                (m[1][1] * c[5] - m[1][2] * c[4] + m[1][3] * c[3]) * inv_det,
                (-m[0][1] * c[5] + m[0][2] * c[4] - m[0][3] * c[3]) * inv_det,
                (m[3][1] * s[5] - m[3][2] * s[4] + m[3][3] * s[3]) * inv_det,
                (-m[2][1] * s[5] + m[2][2] * s[4] - m[2][3] * s[3]) * inv_det,
            ],
            [
                (-m[1][0] * c[5] + m[1][2] * c[2] - m[1][3] * c[1]) * inv_det,
                (m[0][0] * c[5] - m[0][2] * c[2] + m[0][3] * c[1]) * inv_det,
                (-m[3][0] * s[5] + m[3][2] * s[2] - m[3][3] * s[1]) * inv_det,
                (m[2][0] * s[5] - m[2][2] * s[2] + m[2][3] * s[1]) * inv_det,
            ],
            [
                (m[1][0] * c[4] - m[1][1] * c[2] + m[1][3] * c[0]) * inv_det,
                (-m[0][0] * c[4] + m[0][1] * c[2] - m[0][3] * c[0]) * inv_det,
                (m[3][0] * s[4] - m[3][1] * s[2] + m[3][3] * s[0]) * inv_det,
                (-m[2][0] * s[4] + m[2][1] * s[2] - m[2][3] * s[0]) * inv_det,
            ],
            [
                (-m[1][0] * c[3] + m[1][1] * c[1] - m[1][2] * c[0]) * inv_det,
                (m[0][0] * c[3] - m[0][1] * c[1] + m[0][2] * c[0]) * inv_det,
                (-m[3][0] * s[3] + m[3][1] * s[1] - m[3][2] * s[0]) * inv_det,
                (m[2][0] * s[3] - m[2][1] * s[1] + m[2][2] * s[0]) * inv_det,
            ],
        ]))
    }

    /// Returns the inverse-transpose, the matrix that maps surface normals
    /// correctly under non-uniform scale.
    ///
    /// # Errors
    ///
    /// [`Error::SingularMatrix`] if the matrix has no inverse.
    pub fn normal_matrix(&self) -> Result<Self> {
        Ok(self.try_inverse()?.transpose())
    }

    /// Multiplies a full homogeneous 4-vector: `self * [x, y, z, w]`.
    #[inline]
    pub fn transform_point4(&self, v: [Scalar; 4]) -> [Scalar; 4] {
        let row = |r: &[Scalar; 4]| r[0] * v[0] + r[1] * v[1] + r[2] * v[2] + r[3] * v[3];
        [row(&self.m[0]), row(&self.m[1]), row(&self.m[2]), row(&self.m[3])]
    }

    /// Multiplies two matrices.
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..4 {
            for j in 0..4 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j]
                    + self.m[i][3] * other.m[3][j];
            }
        }
        result
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam Mat4 (column-major).
    #[cfg(feature = "glam")]
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.to_cols_array())
    }

    /// Creates from glam Mat4.
    #[cfg(feature = "glam")]
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_cols_array(&m.to_cols_array())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// Mat4 * Vec3 (point, w = 1, no perspective divide)
impl Mul<Vec3> for Mat4 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.transform(&self)
    }
}

// Mat4 * Mat4
impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat4 {
    type Output = [Scalar; 4];

    #[inline]
    fn index(&self, i: usize) -> &[Scalar; 4] {
        &self.m[i]
    }
}

#[cfg(feature = "glam")]
impl From<glam::Mat4> for Mat4 {
    #[inline]
    fn from(m: glam::Mat4) -> Self {
        Self::from_glam(m)
    }
}

#[cfg(feature = "glam")]
impl From<Mat4> for glam::Mat4 {
    #[inline]
    fn from(m: Mat4) -> glam::Mat4 {
        m.to_glam()
    }
}
