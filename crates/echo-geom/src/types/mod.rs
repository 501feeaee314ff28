// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types (transform, bounding box).
//!
//! - Intersection tests are inclusive on faces, with the math core's
//!   `EPSILON` slack for point queries.
//! - World extents are derived data; they are rebuilt lazily from the local
//!   corners and the last world matrix seen.

#[doc = "World-space bounding boxes with cached extents."]
pub mod bounds;
#[doc = "Scale/rotation/translation transforms."]
pub mod transform;
