//! [`approx`] trait implementations for [`Vec3`] and [`Mat4`].
//!
//! These give tests and callers tolerant comparisons with explicit
//! thresholds, independent of the fixed epsilon behind `Vec3 == Vec3`:
//!
//! ```rust
//! use approx::assert_relative_eq;
//! use km_math::Vec3;
//!
//! let n = Vec3::new(1.0, 1.0, 1.0).normalize().unwrap();
//! assert_relative_eq!(n, Vec3::splat(1.0 / 3f32.sqrt()), epsilon = 1e-6);
//! ```

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use km_core::Scalar;

use crate::{Mat4, Vec3};

impl AbsDiffEq for Vec3 {
    type Epsilon = Scalar;

    #[inline]
    fn default_epsilon() -> Scalar {
        Scalar::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Vec3 {
    #[inline]
    fn default_max_relative() -> Scalar {
        Scalar::default_max_relative()
    }

    #[inline]
    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

impl UlpsEq for Vec3 {
    #[inline]
    fn default_max_ulps() -> u32 {
        Scalar::default_max_ulps()
    }

    #[inline]
    fn ulps_eq(&self, other: &Self, epsilon: Scalar, max_ulps: u32) -> bool {
        self.x.ulps_eq(&other.x, epsilon, max_ulps)
            && self.y.ulps_eq(&other.y, epsilon, max_ulps)
            && self.z.ulps_eq(&other.z, epsilon, max_ulps)
    }
}

impl AbsDiffEq for Mat4 {
    type Epsilon = Scalar;

    #[inline]
    fn default_epsilon() -> Scalar {
        Scalar::default_epsilon()
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Scalar) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl RelativeEq for Mat4 {
    #[inline]
    fn default_max_relative() -> Scalar {
        Scalar::default_max_relative()
    }

    #[inline]
    fn relative_eq(&self, other: &Self, epsilon: Scalar, max_relative: Scalar) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

impl UlpsEq for Mat4 {
    #[inline]
    fn default_max_ulps() -> u32 {
        Scalar::default_max_ulps()
    }

    #[inline]
    fn ulps_eq(&self, other: &Self, epsilon: Scalar, max_ulps: u32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}
