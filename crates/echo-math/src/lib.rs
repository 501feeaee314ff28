// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! echo-math: spatial math core for Echo.
//!
//! Vectors, quaternions and 4x4 matrices with the arithmetic, interpolation,
//! decomposition and view/projection constructors a renderer needs, plus
//! scratch storage for allocation-free hot paths.
//!
//! Conventions:
//! - Float32 throughout; angles in radians.
//! - Every operation exists in up to three forms: `op` returns a new value,
//!   `op_in_place` mutates the receiver, `op_to_ref` writes into a
//!   caller-owned result.
//! - Matrices compose in application order: `a.multiply(&b)` applies `a`
//!   first. Points transform as row vectors with translation at indices 12–14.
//! - Degenerate numeric input never panics: zero-length normalize is a no-op,
//!   singular inversion copies through, zero-scale decomposition reports
//!   `false`. Caller misuse surfaces as [`MathError`].
#![forbid(unsafe_code)]

mod error;
mod mat4;
mod prng;
mod quat;
mod vec2;
mod vec3;
mod vec4;

pub mod projection;
pub mod scalar;
pub mod scratch;
pub mod tuple;
pub mod value;

pub use error::MathError;
pub use mat4::Mat4;
pub use prng::Prng;
pub use projection::{Handedness, Projection, ProjectionOptions, Viewport};
pub use quat::Quat;
pub use scalar::EPSILON;
pub use scratch::{with_scratch, ScratchPool};
pub use tuple::Tuple;
pub use value::{ClassName, MathValue};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
