// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry collaborators for the Echo math core.

This crate provides:
- Scale/rotation/translation transforms (`Transform`) and their world
  matrices.
- World-space bounding boxes (`BoundingBox`) whose world extents are cached
  and recomputed only when a local corner or the world matrix changed.

Design notes:
- Change detection rides on `echo-math`: `Vec3` dirty flags and the
  `Mat4::update_flag` counter.
- Degenerate input is reported through `tracing`, never by panicking.
"]
#![forbid(unsafe_code)]

/// Foundational geometric types.
pub mod types;

pub use types::bounds::BoundingBox;
pub use types::transform::Transform;
