// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scalar helpers shared by the vector, quaternion and matrix types.
//!
//! Everything here is a pure function over `f32`.

use core::f32::consts::{PI, TAU};

use crate::prng::Prng;
use crate::tuple;

/// Default tolerance used by the `*_with_epsilon` comparisons.
pub const EPSILON: f32 = 0.001;

/// Clamps `value` to the inclusive `[min, max]` range.
///
/// A reversed range (`min > max`) yields `max`.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.max(min).min(max)
}

/// Linear interpolation from `start` to `end` by `amount`.
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + (end - start) * amount
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns `0` when `a == b`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp((value - a) / (b - a), 0.0, 1.0)
}

/// Moves `current` towards `target` by at most `max_delta`.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Hermite-smoothed interpolation between `from` and `to`.
pub fn smooth_step(from: f32, to: f32, t: f32) -> f32 {
    let t = clamp(t, 0.0, 1.0);
    let t = -2.0 * t * t * t + 3.0 * t * t;
    to * t + from * (1.0 - t)
}

/// Loops `value` so that it never exceeds `length` and never drops below 0.
pub fn repeat(value: f32, length: f32) -> f32 {
    value - (value / length).floor() * length
}

/// Shortest signed difference between two angles in degrees.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut num = repeat(target - current, 360.0);
    if num > 180.0 {
        num -= 360.0;
    }
    num
}

/// Wraps an angle in radians into `[-π, π)`.
pub fn normalize_radians(angle: f32) -> f32 {
    angle - TAU * ((angle + PI) / TAU).floor()
}

/// Returns `true` when `a` and `b` differ by at most `epsilon`.
pub fn within_epsilon(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Converts degrees to radians.
pub fn deg_to_rad(value: f32) -> f32 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f32) -> f32 {
    value * (360.0 / TAU)
}

/// Scalar Hermite spline; same kernel as the vector and quaternion variants.
pub fn hermite(value1: f32, tangent1: f32, value2: f32, tangent2: f32, amount: f32) -> f32 {
    tuple::hermite([value1], [tangent1], [value2], [tangent2], amount)[0]
}

/// First derivative of [`hermite`] at `time`.
pub fn hermite_first_derivative(
    value1: f32,
    tangent1: f32,
    value2: f32,
    tangent2: f32,
    time: f32,
) -> f32 {
    tuple::hermite_first_derivative([value1], [tangent1], [value2], [tangent2], time)[0]
}

/// Random float in `[min, max)` drawn from `rng`.
pub fn random_range(rng: &mut Prng, min: f32, max: f32) -> f32 {
    rng.next_range(min, max)
}
