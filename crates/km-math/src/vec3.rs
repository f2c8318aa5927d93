//! 3D vector type for points and directions.
//!
//! [`Vec3`] is a plain value type: three `f32` components, `Copy`, no heap.
//! Derived operations return new values; the compound operators mutate in
//! place.
//!
//! # Equality
//!
//! `==` is approximate. Two vectors compare equal when every component pair
//! differs by at most [`EPSILON`]. Use [`Vec3::eq_with`] or the [`approx`]
//! traits for other thresholds.
//!
//! # Division
//!
//! The `/` and `/=` operators panic on a zero divisor, as integer division
//! does. [`Vec3::try_div`] and [`Vec3::try_div_scalar`] report
//! [`Error::DivideByZero`] instead.
//!
//! # Usage
//!
//! ```rust
//! use km_math::Vec3;
//!
//! let a = Vec3::new(1.0, 0.0, 0.0);
//! let b = Vec3::new(0.0, 1.0, 0.0);
//! assert_eq!(a.cross(b), Vec3::Z);
//! assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
//! ```

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use km_core::{EPSILON, Error, Result, Scalar, Tolerance};
use tracing::debug;

/// A 3D vector.
///
/// # Components
///
/// Access via `.x`, `.y`, `.z` or index `[0]`, `[1]`, `[2]`.
///
/// # Example
///
/// ```rust
/// use km_math::Vec3;
///
/// let v = Vec3::new(2.0, 2.0, 2.0);
/// assert_eq!(v / 2.0, Vec3::ONE);
/// assert_eq!(v.length_squared(), v.dot(v));
/// ```
#[derive(Debug, Clone, Copy, Default)]
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    /// X component
    pub x: Scalar,
    /// Y component
    pub y: Scalar,
    /// Z component
    pub z: Scalar,
}

impl Vec3 {
    /// Zero vector (0, 0, 0).
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// One vector (1, 1, 1).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit X vector (1, 0, 0).
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector (0, 1, 0).
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector (0, 0, 1).
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to the same value.
    #[inline]
    pub const fn splat(v: Scalar) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [Scalar; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [Scalar; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product: the cosine of the angle between the vectors scaled by
    /// both lengths.
    #[inline]
    pub fn dot(self, other: Self) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product.
    ///
    /// The result is perpendicular to both inputs and zero when they are
    /// parallel or either is zero. `a.cross(b) == -b.cross(a)`.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length (magnitude) of the vector.
    ///
    /// Components are scaled by the largest magnitude before squaring, so
    /// the result stays finite whenever the true length is representable.
    #[inline]
    pub fn length(self) -> Scalar {
        if self.is_nan() {
            return Scalar::NAN;
        }
        let m = self.max_abs();
        if m == 0.0 || m.is_infinite() {
            return m;
        }
        m * self.scaled_by(m).length_squared().sqrt()
    }

    /// Squared length (avoids sqrt).
    ///
    /// Overflows to infinity once `x² + y² + z²` exceeds `f32::MAX`.
    #[inline]
    pub fn length_squared(self) -> Scalar {
        self.dot(self)
    }

    // Largest absolute component.
    #[inline]
    fn max_abs(self) -> Scalar {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    // Divides every component by `m` (> 0), leaving the largest at +-1.
    #[inline]
    fn scaled_by(self, m: Scalar) -> Self {
        Self::new(self.x / m, self.y / m, self.z / m)
    }

    /// Returns the vector scaled to unit length.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] if the vector has zero length,
    /// [`Error::NonFinite`] if a component is infinite or NaN.
    ///
    /// # Example
    ///
    /// ```rust
    /// use km_math::Vec3;
    ///
    /// let n = Vec3::new(0.0, 3.0, 4.0).normalize().unwrap();
    /// assert_eq!(n, Vec3::new(0.0, 0.6, 0.8));
    /// assert!(Vec3::ZERO.normalize().is_err());
    /// ```
    pub fn normalize(self) -> Result<Self> {
        if !self.is_finite() {
            return Err(Error::non_finite("normalize"));
        }
        let m = self.max_abs();
        if m == 0.0 {
            debug!(vector = ?self, "refusing to normalize zero-length vector");
            return Err(Error::divide_by_zero("normalize"));
        }
        // Scaled length lies in [1, sqrt(3)], so neither step can overflow.
        let s = self.scaled_by(m);
        let len = s.length_squared().sqrt();
        Ok(Self::new(s.x / len, s.y / len, s.z / len))
    }

    /// Returns the vector scaled to unit length, or [`Vec3::ZERO`] when
    /// that is impossible.
    #[inline]
    pub fn normalize_or_zero(self) -> Self {
        self.normalize().unwrap_or(Self::ZERO)
    }

    /// Component-wise division that reports a zero divisor.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] if any component of `rhs` is zero,
    /// [`Error::NonFinite`] if the quotient overflows.
    pub fn try_div(self, rhs: Self) -> Result<Self> {
        if rhs.x == 0.0 || rhs.y == 0.0 || rhs.z == 0.0 {
            return Err(Error::divide_by_zero("try_div"));
        }
        let q = Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z);
        if !q.is_finite() {
            return Err(Error::non_finite("try_div"));
        }
        Ok(q)
    }

    /// Scalar division that reports a zero divisor.
    ///
    /// # Errors
    ///
    /// [`Error::DivideByZero`] if `rhs` is zero,
    /// [`Error::NonFinite`] if the quotient overflows.
    pub fn try_div_scalar(self, rhs: Scalar) -> Result<Self> {
        self.try_div(Self::splat(rhs))
            .map_err(|e| match e {
                Error::DivideByZero { .. } => Error::divide_by_zero("try_div_scalar"),
                _ => Error::non_finite("try_div_scalar"),
            })
    }

    /// Compares component-wise within an explicit absolute threshold.
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: Scalar) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }

    /// Compares component-wise within `tolerance.epsilon`.
    #[inline]
    pub fn eq_with(self, other: Self, tolerance: &Tolerance) -> bool {
        self.approx_eq(other, tolerance.epsilon)
    }

    /// Returns true if any component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns true if all components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to glam Vec3.
    #[cfg(feature = "glam")]
    #[inline]
    pub fn to_glam(self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }

    /// Creates from glam Vec3.
    #[cfg(feature = "glam")]
    #[inline]
    pub fn from_glam(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl PartialEq for Vec3 {
    /// Equal when every component differs by at most [`EPSILON`].
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other, EPSILON)
    }
}

// Indexing
impl Index<usize> for Vec3 {
    type Output = Scalar;

    #[inline]
    fn index(&self, i: usize) -> &Scalar {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Scalar {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

// Vec3 + Vec3
impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

// Vec3 + f32 (broadcast)
impl Add<Scalar> for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Scalar) -> Self {
        self + Self::splat(rhs)
    }
}

// Vec3 - Vec3
impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

// Vec3 - f32 (broadcast)
impl Sub<Scalar> for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Scalar) -> Self {
        self - Self::splat(rhs)
    }
}

// Vec3 * Vec3 (component-wise)
impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

// Vec3 * f32
impl Mul<Scalar> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// f32 * Vec3
impl Mul<Vec3> for Scalar {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

// Vec3 / Vec3 (component-wise)
impl Div for Vec3 {
    type Output = Self;

    /// # Panics
    ///
    /// If any component of `rhs` is zero.
    #[inline]
    fn div(self, rhs: Self) -> Self {
        assert!(
            rhs.x != 0.0 && rhs.y != 0.0 && rhs.z != 0.0,
            "Vec3 division by zero component: {:?}",
            rhs
        );
        Self::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

// Vec3 / f32
impl Div<Scalar> for Vec3 {
    type Output = Self;

    /// # Panics
    ///
    /// If `rhs` is zero.
    #[inline]
    fn div(self, rhs: Scalar) -> Self {
        assert!(rhs != 0.0, "Vec3 division by zero scalar");
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl AddAssign<Scalar> for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Scalar) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl SubAssign<Scalar> for Vec3 {
    #[inline]
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = *self - rhs;
    }
}

impl MulAssign for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl MulAssign<Scalar> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = *self * rhs;
    }
}

impl DivAssign for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl DivAssign<Scalar> for Vec3 {
    #[inline]
    fn div_assign(&mut self, rhs: Scalar) {
        *self = *self / rhs;
    }
}

impl From<[Scalar; 3]> for Vec3 {
    #[inline]
    fn from(a: [Scalar; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [Scalar; 3] {
    #[inline]
    fn from(v: Vec3) -> [Scalar; 3] {
        v.to_array()
    }
}

impl From<(Scalar, Scalar, Scalar)> for Vec3 {
    #[inline]
    fn from((x, y, z): (Scalar, Scalar, Scalar)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(feature = "glam")]
impl From<glam::Vec3> for Vec3 {
    #[inline]
    fn from(v: glam::Vec3) -> Self {
        Self::from_glam(v)
    }
}

#[cfg(feature = "glam")]
impl From<Vec3> for glam::Vec3 {
    #[inline]
    fn from(v: Vec3) -> glam::Vec3 {
        v.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_new() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_default_is_zero() {
        let v = Vec3::default();
        assert_eq!(v.to_array(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.dot(b), b.dot(a));
    }

    #[test]
    fn test_vec3_cross_basis() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
        assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_vec3_cross_parallel_is_zero() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(a.cross(a * 4.0), Vec3::ZERO);
        assert_eq!(a.cross(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_vec3_length() {
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length(), 5.0);
        assert_eq!(Vec3::new(3.0, 4.0, 0.0).length_squared(), 25.0);
        assert_eq!(Vec3::ZERO.length(), 0.0);
    }

    #[test]
    fn test_vec3_normalize() {
        let n = Vec3::new(10.0, 0.0, 0.0).normalize().unwrap();
        assert_eq!(n, Vec3::X);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec3_normalize_zero() {
        let err = Vec3::ZERO.normalize().unwrap_err();
        assert!(err.is_divide_by_zero());
        assert_eq!(Vec3::ZERO.normalize_or_zero().to_array(), [0.0; 3]);
    }

    #[test]
    fn test_vec3_normalize_infinite() {
        let v = Vec3::new(f32::INFINITY, 0.0, 0.0);
        assert_eq!(v.normalize(), Err(Error::non_finite("normalize")));
    }

    #[test]
    fn test_vec3_normalize_large() {
        let v = Vec3::new(1e20, 0.0, 0.0);
        assert_eq!(v.length(), 1e20);
        assert_eq!(v.normalize(), Ok(Vec3::X));

        let n = Vec3::splat(f32::MAX).normalize().unwrap();
        assert_eq!(n, Vec3::splat(1.0 / 3f32.sqrt()));
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_vec3_normalize_tiny() {
        let v = Vec3::new(0.0, 1e-40, 0.0);
        assert_eq!(v.normalize(), Ok(Vec3::Y));
        assert!(v.length() > 0.0);
    }

    #[test]
    fn test_vec3_length_non_finite() {
        assert_eq!(Vec3::new(0.0, f32::NEG_INFINITY, 1.0).length(), f32::INFINITY);
        assert!(Vec3::new(f32::NAN, 1.0, 0.0).length().is_nan());
        assert!(Vec3::new(f32::NAN, 1.0, 0.0).normalize().is_err());
    }

    #[test]
    fn test_vec3_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / a, Vec3::new(4.0, 2.5, 2.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(a + 1.0, Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(a - 1.0, Vec3::new(0.0, 1.0, 2.0));
        assert_eq!(Vec3::splat(2.0) / 2.0, Vec3::ONE);
    }

    #[test]
    fn test_vec3_compound_assign() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        v += Vec3::ONE;
        assert_eq!(v, Vec3::new(2.0, 3.0, 4.0));
        v -= 1.0;
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
        v *= 2.0;
        assert_eq!(v, Vec3::new(2.0, 4.0, 6.0));
        v /= Vec3::new(2.0, 4.0, 3.0);
        assert_eq!(v, Vec3::new(1.0, 1.0, 2.0));
        v += 0.5;
        v -= Vec3::new(0.5, 0.5, 0.5);
        v *= Vec3::new(3.0, 2.0, 1.0);
        v /= 2.0;
        assert_eq!(v, Vec3::new(1.5, 1.0, 1.0));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_vec3_div_zero_scalar_panics() {
        let _ = Vec3::ONE / 0.0;
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_vec3_div_zero_component_panics() {
        let _ = Vec3::ONE / Vec3::new(1.0, 0.0, 1.0);
    }

    #[test]
    fn test_vec3_try_div() {
        assert_eq!(Vec3::splat(2.0).try_div_scalar(2.0), Ok(Vec3::ONE));
        assert_eq!(
            Vec3::ONE.try_div_scalar(0.0),
            Err(Error::divide_by_zero("try_div_scalar"))
        );
        assert!(
            Vec3::ONE
                .try_div(Vec3::new(1.0, 1.0, 0.0))
                .unwrap_err()
                .is_divide_by_zero()
        );
        assert_eq!(
            Vec3::splat(f32::MAX).try_div_scalar(0.5),
            Err(Error::non_finite("try_div_scalar"))
        );
    }

    #[test]
    fn test_vec3_epsilon_equality() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v, v);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0 + 1e-7));
        assert_eq!(v, Vec3::new(1.00005, 2.0, 3.0));
        assert_ne!(v, Vec3::new(1.0, 2.0, 4.0));
        assert_ne!(v, Vec3::new(1.001, 2.0, 3.0));
    }

    #[test]
    fn test_vec3_eq_with() {
        let tol = Tolerance::default().with_epsilon(0.01);
        let a = Vec3::new(1.0, 2.0, 3.0);
        assert!(a.eq_with(Vec3::new(1.005, 2.0, 3.0), &tol));
        assert!(!a.eq_with(Vec3::new(1.05, 2.0, 3.0), &tol));
    }

    #[test]
    fn test_vec3_index() {
        let mut v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 2.0);
        assert_eq!(v[2], 3.0);
        v[1] = 7.0;
        assert_eq!(v.y, 7.0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_vec3_index_out_of_bounds() {
        let _ = Vec3::ZERO[3];
    }

    #[test]
    fn test_vec3_conversions() {
        let v: Vec3 = [1.0, 2.0, 3.0].into();
        let t: Vec3 = (1.0, 2.0, 3.0).into();
        assert_eq!(v, t);
        let a: [f32; 3] = v.into();
        assert_eq!(a, [1.0, 2.0, 3.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_vec3_serde() {
        let v = Vec3::new(1.0, 2.5, -3.0);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.5,"z":-3.0}"#);
        let back: Vec3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }

    #[cfg(feature = "glam")]
    #[test]
    fn test_vec3_glam_interop() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let g: glam::Vec3 = v.into();
        assert_eq!(g.cross(glam::Vec3::X), v.cross(Vec3::X).to_glam());
        assert_eq!(Vec3::from(g), v);
    }
}
