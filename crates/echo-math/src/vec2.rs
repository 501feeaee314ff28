// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::scalar;
use crate::tuple::{self, Tuple};
use crate::Mat4;

/// 2D vector used for texture coordinates, screen positions and 2D layouts.
///
/// Same three calling conventions as [`crate::Vec3`]; no dirty tracking.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Vec2 {
    data: [f32; 2],
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// All components set to one.
    pub const ONE: Self = Self::new(1.0, 1.0);

    /// Unit vector along +X.
    pub const UNIT_X: Self = Self::new(1.0, 0.0);

    /// Unit vector along +Y.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { data: [x, y] }
    }

    /// Reads two components from `values` starting at `offset`.
    pub fn from_array(values: &[f32], offset: usize) -> Result<Self, MathError> {
        tuple::read_array(values, offset).map(Self::from)
    }

    /// Reads two components from `values` at `offset` into `result`.
    pub fn from_array_to_ref<'a>(
        values: &[f32],
        offset: usize,
        result: &'a mut Self,
    ) -> Result<&'a mut Self, MathError> {
        result.data = tuple::read_array(values, offset)?;
        Ok(result)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 2] {
        self.data
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Overwrites both components.
    pub fn set(&mut self, x: f32, y: f32) -> &mut Self {
        self.data = [x, y];
        self
    }

    /// Copies `source` into `self`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.data = source.data;
        self
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> [f32; 2] {
        [f(self.data[0], other.data[0]), f(self.data[1], other.data[1])]
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> [f32; 2] {
        [f(self.data[0]), f(self.data[1])]
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a + b))
    }

    /// Adds `other` to `self`.
    pub fn add_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, |a, b| a + b);
        self
    }

    /// Writes `self + other` into `result`.
    pub fn add_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, |a, b| a + b);
        result
    }

    /// Subtracts another vector.
    pub fn subtract(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a - b))
    }

    /// Subtracts `other` from `self`.
    pub fn subtract_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, |a, b| a - b);
        self
    }

    /// Writes `self - other` into `result`.
    pub fn subtract_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, |a, b| a - b);
        result
    }

    /// Component-wise product.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a * b))
    }

    /// Multiplies `self` component-wise by `other`.
    pub fn multiply_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, |a, b| a * b);
        self
    }

    /// Writes the component-wise product into `result`.
    pub fn multiply_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, |a, b| a * b);
        result
    }

    /// Component-wise product with raw factors.
    pub fn multiply_by_floats(&self, x: f32, y: f32) -> Self {
        Self::new(self.data[0] * x, self.data[1] * y)
    }

    /// Component-wise quotient; zero divisors yield `inf`/`NaN`.
    pub fn divide(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a / b))
    }

    /// Divides `self` component-wise by `other`.
    pub fn divide_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, |a, b| a / b);
        self
    }

    /// Writes the component-wise quotient into `result`.
    pub fn divide_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, |a, b| a / b);
        result
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::from(self.map(|a| a * scalar))
    }

    /// Scales `self` by `scalar`.
    pub fn scale_in_place(&mut self, scalar: f32) -> &mut Self {
        self.data = self.map(|a| a * scalar);
        self
    }

    /// Writes `self * scalar` into `result`.
    pub fn scale_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        result.data = self.map(|a| a * scalar);
        result
    }

    /// Accumulates `self * scalar` into `result`.
    pub fn scale_and_add_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        result.data = result.zip(self, |r, a| r + a * scalar);
        result
    }

    /// Returns the negated vector.
    pub fn negate(&self) -> Self {
        Self::from(self.map(|a| -a))
    }

    /// Negates `self`.
    pub fn negate_in_place(&mut self) -> &mut Self {
        self.data = self.map(|a| -a);
        self
    }

    /// Writes `-self` into `result`.
    pub fn negate_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.map(|a| -a);
        result
    }

    /// Dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.data[0] * other.data[0] + self.data[1] * other.data[1]
    }

    /// Vector length.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the normalized vector; length 0 or 1 is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }

    /// Normalizes `self` in place.
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        self.normalize_from_length(len)
    }

    /// Writes the normalized vector into `result`.
    pub fn normalize_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).normalize_in_place()
    }

    /// Divides by a precomputed `len` unless it is 0 or 1.
    pub fn normalize_from_length(&mut self, len: f32) -> &mut Self {
        if len == 0.0 || len == 1.0 {
            return self;
        }
        self.scale_in_place(1.0 / len)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance to `other`.
    pub fn distance_squared(&self, other: &Self) -> f32 {
        self.subtract(other).length_squared()
    }

    /// Midpoint between `self` and `other`.
    pub fn center(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| (a + b) * 0.5))
    }

    /// Linear interpolation towards `end`.
    pub fn lerp(&self, end: &Self, amount: f32) -> Self {
        Self::from(self.zip(end, |a, b| scalar::lerp(a, b, amount)))
    }

    /// Writes the interpolation towards `end` into `result`.
    pub fn lerp_to_ref<'a>(&self, end: &Self, amount: f32, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(end, |a, b| scalar::lerp(a, b, amount));
        result
    }

    /// Hermite spline between `value1` and `value2`.
    pub fn hermite(
        value1: &Self,
        tangent1: &Self,
        value2: &Self,
        tangent2: &Self,
        amount: f32,
    ) -> Self {
        Self::from(tuple::hermite(
            value1.data,
            tangent1.data,
            value2.data,
            tangent2.data,
            amount,
        ))
    }

    /// First derivative of the Hermite spline at `time`.
    pub fn hermite_first_derivative(
        value1: &Self,
        tangent1: &Self,
        value2: &Self,
        tangent2: &Self,
        time: f32,
    ) -> Self {
        let mut out = Self::ZERO;
        Self::hermite_first_derivative_to_ref(value1, tangent1, value2, tangent2, time, &mut out);
        out
    }

    /// Writes the Hermite first derivative into `result`.
    pub fn hermite_first_derivative_to_ref<'a>(
        value1: &Self,
        tangent1: &Self,
        value2: &Self,
        tangent2: &Self,
        time: f32,
        result: &'a mut Self,
    ) -> &'a mut Self {
        result.data = tuple::hermite_first_derivative(
            value1.data,
            tangent1.data,
            value2.data,
            tangent2.data,
            time,
        );
        result
    }

    /// Catmull-Rom segment between `value2` and `value3`.
    pub fn catmull_rom(
        value1: &Self,
        value2: &Self,
        value3: &Self,
        value4: &Self,
        amount: f32,
    ) -> Self {
        Self::from(tuple::catmull_rom(
            value1.data,
            value2.data,
            value3.data,
            value4.data,
            amount,
        ))
    }

    /// Component-wise minimum.
    pub fn minimize(&self, other: &Self) -> Self {
        Self::from(self.zip(other, f32::min))
    }

    /// Replaces each component by the minimum with `other`.
    pub fn minimize_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, f32::min);
        self
    }

    /// Writes the component-wise minimum into `result`.
    pub fn minimize_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, f32::min);
        result
    }

    /// Component-wise maximum.
    pub fn maximize(&self, other: &Self) -> Self {
        Self::from(self.zip(other, f32::max))
    }

    /// Replaces each component by the maximum with `other`.
    pub fn maximize_in_place(&mut self, other: &Self) -> &mut Self {
        self.data = self.zip(other, f32::max);
        self
    }

    /// Writes the component-wise maximum into `result`.
    pub fn maximize_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.zip(other, f32::max);
        result
    }

    /// Clamps each component to `[min, max]`.
    pub fn clamp(&self, min: &Self, max: &Self) -> Self {
        self.maximize(min).minimize(max)
    }

    /// Writes the clamped vector into `result`.
    pub fn clamp_to_ref<'a>(&self, min: &Self, max: &Self, result: &'a mut Self) -> &'a mut Self {
        result.data = self.maximize(min).zip(max, f32::min);
        result
    }

    /// Component-wise floor.
    pub fn floor(&self) -> Self {
        Self::from(self.map(f32::floor))
    }

    /// Component-wise fractional part.
    pub fn fract(&self) -> Self {
        Self::from(self.map(|a| a - a.floor()))
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        Self::from(self.map(f32::abs))
    }

    /// Exact component equality.
    pub fn equals(&self, other: &Self) -> bool {
        self.data == other.data
    }

    /// Equality within `epsilon` per component.
    pub fn equals_with_epsilon(&self, other: &Self, epsilon: f32) -> bool {
        scalar::within_epsilon(self.data[0], other.data[0], epsilon)
            && scalar::within_epsilon(self.data[1], other.data[1], epsilon)
    }

    /// Exact equality against raw components.
    pub fn equals_to_floats(&self, x: f32, y: f32) -> bool {
        self.data == [x, y]
    }

    /// Rotates the vector counter-clockwise by `angle` radians.
    pub fn rotate(&self, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        let [x, y] = self.data;
        Self::new(cos * x - sin * y, sin * x + cos * y)
    }

    /// Transforms the point by the 2D affine part of `matrix`.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        let mut out = Self::ZERO;
        self.transform_to_ref(matrix, &mut out);
        out
    }

    /// Writes the transformed point into `result`.
    pub fn transform_to_ref<'a>(&self, matrix: &Mat4, result: &'a mut Self) -> &'a mut Self {
        let m = matrix.as_array();
        let [x, y] = self.data;
        result.data = [x * m[0] + y * m[4] + m[12], x * m[1] + y * m[5] + m[13]];
        result
    }

    /// `true` when `point` lies strictly inside the triangle `(p0, p1, p2)`.
    pub fn point_in_triangle(point: &Self, p0: &Self, p1: &Self, p2: &Self) -> bool {
        let (px, py) = (point.x(), point.y());
        let a = 0.5
            * (-p1.y() * p2.x()
                + p0.y() * (-p1.x() + p2.x())
                + p0.x() * (p1.y() - p2.y())
                + p1.x() * p2.y());
        let sign = if a < 0.0 { -1.0 } else { 1.0 };
        let s = (p0.y() * p2.x() - p0.x() * p2.y() + (p2.y() - p0.y()) * px + (p0.x() - p2.x()) * py)
            * sign;
        let t = (p0.x() * p1.y() - p0.y() * p1.x() + (p0.y() - p1.y()) * px + (p1.x() - p0.x()) * py)
            * sign;
        s > 0.0 && t > 0.0 && s + t < 2.0 * a * sign
    }

    /// Shortest distance from `point` to the segment `[segment_a, segment_b]`.
    pub fn distance_of_point_from_segment(
        point: &Self,
        segment_a: &Self,
        segment_b: &Self,
    ) -> f32 {
        let l2 = segment_a.distance_squared(segment_b);
        if l2 == 0.0 {
            return point.distance(segment_a);
        }
        let v = segment_b.subtract(segment_a);
        let t = scalar::clamp(point.subtract(segment_a).dot(&v) / l2, 0.0, 1.0);
        let projection = segment_a.add(&v.scale(t));
        point.distance(&projection)
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from(value: [f32; 2]) -> Self {
        Self { data: value }
    }
}

impl From<Vec2> for [f32; 2] {
    fn from(value: Vec2) -> Self {
        value.data
    }
}

impl Tuple for Vec2 {
    const CLASS_NAME: &'static str = "Vector2";
    const DIMENSION: usize = 2;

    fn as_slice(&self) -> &[f32] {
        &self.data
    }

    fn from_slice(values: &[f32], offset: usize) -> Result<Self, MathError> {
        Self::from_array(values, offset)
    }

    fn try_divide(&self, other: &Self) -> Result<Self, MathError> {
        Ok(self.divide(other))
    }

    fn try_minimize(&self, other: &Self) -> Result<Self, MathError> {
        Ok(self.minimize(other))
    }

    fn try_maximize(&self, other: &Self) -> Result<Self, MathError> {
        Ok(self.maximize(other))
    }

    fn try_floor(&self) -> Result<Self, MathError> {
        Ok(self.floor())
    }

    fn try_fract(&self) -> Result<Self, MathError> {
        Ok(self.fract())
    }
}

impl core::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec2::add(&self, &rhs)
    }
}

impl core::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl core::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl core::ops::Mul<Vec2> for f32 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs.scale(self)
    }
}

impl core::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl core::ops::AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.add_in_place(&rhs);
    }
}

impl core::ops::SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_in_place(&rhs);
    }
}
