//! # km-math
//!
//! 3D vector math.
//!
//! - [`Vec3`] - 3D vectors for points and directions
//! - [`Mat4`] - 4x4 homogeneous transform matrices
//! - [`Transform4`] - Anything that can act as a 4x4 transform
//!
//! # Design
//!
//! Every operation is implemented directly on the scalar fields; there is no
//! external math backend. All matrix operations assume **row-major** storage
//! and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Fallible operations (normalizing a zero vector, checked division,
//! projecting to `w = 0`, inverting a singular matrix) return
//! [`km_core::Result`]. The `/` operators panic on a zero divisor.
//!
//! # Usage
//!
//! ```rust
//! use km_math::{Mat4, Vec3};
//!
//! let a = Vec3::new(1.0, 0.0, 0.0);
//! let b = Vec3::new(0.0, 1.0, 0.0);
//! let up = a.cross(b);
//! assert_eq!(up, Vec3::new(0.0, 0.0, 1.0));
//!
//! let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0));
//! assert_eq!(m * up, Vec3::new(0.0, 0.0, 3.0));
//! assert!(Mat4::ZERO.try_inverse().is_err());
//! ```
//!
//! # Feature Flags
//!
//! - `glam` (default) - Conversions to and from `glam` types; `glam::Mat4`
//!   implements [`Transform4`]
//! - `serde` - Serialization for [`Vec3`] and [`Mat4`]
//!
//! # Dependencies
//!
//! - `km-core` - Scalar type, tolerances, errors
//! - [`approx`] - Tolerant comparison traits
//! - [`tracing`] - Diagnostics for rejected operations

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod compare;
mod mat4;
mod transform;
mod vec3;

pub use mat4::*;
pub use transform::*;
pub use vec3::*;

pub use km_core::{EPSILON, Error, Result, SINGULAR_EPSILON, Scalar, Tolerance};

/// Re-export glam types for direct use
#[cfg(feature = "glam")]
pub mod glam {
    pub use ::glam::{Mat4 as GlamMat4, Vec3 as GlamVec3};
}
