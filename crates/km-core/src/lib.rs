//! # km-core
//!
//! Core types shared by the km-rs crates.
//!
//! - [`Scalar`] - The floating-point type every component uses
//! - [`Tolerance`] - Equality and singularity thresholds
//! - [`Error`], [`Result`] - Unified error handling
//!
//! ## Crate Structure
//!
//! ```text
//! km-core (this crate)
//!    ^
//!    |
//!    +-- km-math (Vec3, Mat4, transforms)
//!           ^
//!           +-- km-bench (benchmarks)
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`Tolerance`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod tolerance;

pub use error::*;
pub use tolerance::*;

/// Scalar type used for every vector and matrix component.
pub type Scalar = f32;

/// Prelude module for convenient imports.
///
/// ```
/// use km_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::tolerance::{Tolerance, EPSILON, SINGULAR_EPSILON};
    pub use crate::Scalar;
}
