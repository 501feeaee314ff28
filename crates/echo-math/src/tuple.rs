// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Contract shared by the fixed-size numeric tuples (`Vec2`, `Vec3`, `Vec4`,
//! `Quat`) plus the spline kernels they evaluate through.
//!
//! The kernels operate on `[f32; N]` so that every tuple type produces
//! bit-identical Hermite and Catmull-Rom results for the same components.

use core::fmt;

use crate::error::{check_len, MathError};

/// Fixed-size numeric tuple with a stable class tag and flat-array layout.
///
/// Generic code (animation tracks, serializers, buffer uploads) works through
/// this trait. Component-wise operations that only make sense for vectors are
/// exposed as fallible `try_*` methods: vectors always succeed, quaternions
/// reject them with [`MathError::UnsupportedOperation`].
pub trait Tuple: Copy + fmt::Debug + PartialEq {
    /// Stable class tag used at the serialization boundary.
    const CLASS_NAME: &'static str;

    /// Number of `f32` components.
    const DIMENSION: usize;

    /// Borrows the components in storage order.
    fn as_slice(&self) -> &[f32];

    /// Builds a value from `values[offset..offset + DIMENSION]`.
    fn from_slice(values: &[f32], offset: usize) -> Result<Self, MathError>;

    /// Writes the components into `out[offset..offset + DIMENSION]`.
    fn to_slice(&self, out: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_len(Self::DIMENSION, offset, out.len())?;
        out[offset..offset + Self::DIMENSION].copy_from_slice(self.as_slice());
        Ok(())
    }

    /// Component-wise division.
    fn try_divide(&self, other: &Self) -> Result<Self, MathError>;

    /// Component-wise minimum.
    fn try_minimize(&self, other: &Self) -> Result<Self, MathError>;

    /// Component-wise maximum.
    fn try_maximize(&self, other: &Self) -> Result<Self, MathError>;

    /// Component-wise floor.
    fn try_floor(&self) -> Result<Self, MathError>;

    /// Component-wise fractional part (`v - floor(v)`).
    fn try_fract(&self) -> Result<Self, MathError>;
}

/// Hermite spline through `value1` (tangent `tangent1`) and `value2`
/// (tangent `tangent2`) at `amount` in `[0, 1]`.
pub(crate) fn hermite<const N: usize>(
    value1: [f32; N],
    tangent1: [f32; N],
    value2: [f32; N],
    tangent2: [f32; N],
    amount: f32,
) -> [f32; N] {
    let squared = amount * amount;
    let cubed = amount * squared;
    let part1 = 2.0 * cubed - 3.0 * squared + 1.0;
    let part2 = -2.0 * cubed + 3.0 * squared;
    let part3 = cubed - 2.0 * squared + amount;
    let part4 = cubed - squared;

    let mut out = [0.0; N];
    for i in 0..N {
        out[i] = value1[i] * part1 + value2[i] * part2 + tangent1[i] * part3 + tangent2[i] * part4;
    }
    out
}

/// First derivative of [`hermite`] with respect to `time`.
pub(crate) fn hermite_first_derivative<const N: usize>(
    value1: [f32; N],
    tangent1: [f32; N],
    value2: [f32; N],
    tangent2: [f32; N],
    time: f32,
) -> [f32; N] {
    let t2 = time * time;
    let mut out = [0.0; N];
    for i in 0..N {
        out[i] = (t2 - time) * 6.0 * value1[i]
            + (3.0 * t2 - 4.0 * time + 1.0) * tangent1[i]
            + (-t2 + time) * 6.0 * value2[i]
            + (3.0 * t2 - 2.0 * time) * tangent2[i];
    }
    out
}

/// Catmull-Rom spline segment between `value2` and `value3`.
///
/// `amount = 0` returns `value2` and `amount = 1` returns `value3`.
pub(crate) fn catmull_rom<const N: usize>(
    value1: [f32; N],
    value2: [f32; N],
    value3: [f32; N],
    value4: [f32; N],
    amount: f32,
) -> [f32; N] {
    let squared = amount * amount;
    let cubed = amount * squared;
    let mut out = [0.0; N];
    for i in 0..N {
        let (p0, p1, p2, p3) = (value1[i], value2[i], value3[i], value4[i]);
        out[i] = 0.5
            * (2.0 * p1
                + (-p0 + p2) * amount
                + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * squared
                + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * cubed);
    }
    out
}

/// Reads `N` values from `values` at `offset`.
pub(crate) fn read_array<const N: usize>(
    values: &[f32],
    offset: usize,
) -> Result<[f32; N], MathError> {
    check_len(N, offset, values.len())?;
    let mut out = [0.0; N];
    out.copy_from_slice(&values[offset..offset + N]);
    Ok(out)
}
