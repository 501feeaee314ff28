// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::projection::Viewport;
use crate::scalar::{self, EPSILON};
use crate::tuple::{self, Tuple};
use crate::{Mat4, Quat};

/// 3D vector used for positions, directions, scales and Euler angles.
///
/// * Components may represent points or directions depending on the caller.
///   Use [`Vec3::transform_coordinates`] for points and
///   [`Vec3::transform_normal`] for directions.
/// * Every mutating method raises a dirty flag that consumers caching data
///   derived from the vector (bounding boxes, world extents) acknowledge with
///   [`Vec3::take_dirty`]. The flag never participates in equality.
/// * Methods come in three forms: `op` returns a new value, `op_in_place`
///   mutates `self`, `op_to_ref` writes into a caller-owned result.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    data: [f32; 3],
    dirty: bool,
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All components set to one.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    ///
    /// Fresh vectors start dirty: nothing has observed them yet.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            data: [x, y, z],
            dirty: true,
        }
    }

    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Reads three components from `values` starting at `offset`.
    pub fn from_array(values: &[f32], offset: usize) -> Result<Self, MathError> {
        tuple::read_array(values, offset).map(Self::from)
    }

    /// Reads three components from `values` at `offset` into `result`.
    pub fn from_array_to_ref<'a>(
        values: &[f32],
        offset: usize,
        result: &'a mut Self,
    ) -> Result<&'a mut Self, MathError> {
        let data = tuple::read_array(values, offset)?;
        Ok(result.write(data))
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
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

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    /// Sets the X component and marks the vector dirty.
    pub fn set_x(&mut self, value: f32) -> &mut Self {
        self.data[0] = value;
        self.dirty = true;
        self
    }

    /// Sets the Y component and marks the vector dirty.
    pub fn set_y(&mut self, value: f32) -> &mut Self {
        self.data[1] = value;
        self.dirty = true;
        self
    }

    /// Sets the Z component and marks the vector dirty.
    pub fn set_z(&mut self, value: f32) -> &mut Self {
        self.data[2] = value;
        self.dirty = true;
        self
    }

    /// Overwrites all three components.
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.write([x, y, z])
    }

    /// Copies the components of `source` into `self`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.write(source.data)
    }

    /// Returns `true` if the vector changed since the last [`Vec3::take_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, returning whether it was set.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn write(&mut self, data: [f32; 3]) -> &mut Self {
        self.data = data;
        self.dirty = true;
        self
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> [f32; 3] {
        [
            f(self.data[0], other.data[0]),
            f(self.data[1], other.data[1]),
            f(self.data[2], other.data[2]),
        ]
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> [f32; 3] {
        [f(self.data[0]), f(self.data[1]), f(self.data[2])]
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a + b))
    }

    /// Adds `other` to `self`.
    pub fn add_in_place(&mut self, other: &Self) -> &mut Self {
        let data = self.zip(other, |a, b| a + b);
        self.write(data)
    }

    /// Writes `self + other` into `result`.
    pub fn add_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, |a, b| a + b))
    }

    /// Adds raw components to `self`.
    pub fn add_in_place_from_floats(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let [sx, sy, sz] = self.data;
        self.write([sx + x, sy + y, sz + z])
    }

    /// Subtracts another vector.
    pub fn subtract(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a - b))
    }

    /// Subtracts `other` from `self`.
    pub fn subtract_in_place(&mut self, other: &Self) -> &mut Self {
        let data = self.zip(other, |a, b| a - b);
        self.write(data)
    }

    /// Writes `self - other` into `result`.
    pub fn subtract_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, |a, b| a - b))
    }

    /// Returns `self - (x, y, z)`.
    pub fn subtract_from_floats(&self, x: f32, y: f32, z: f32) -> Self {
        Self::new(self.data[0] - x, self.data[1] - y, self.data[2] - z)
    }

    /// Component-wise product.
    pub fn multiply(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a * b))
    }

    /// Multiplies `self` component-wise by `other`.
    pub fn multiply_in_place(&mut self, other: &Self) -> &mut Self {
        let data = self.zip(other, |a, b| a * b);
        self.write(data)
    }

    /// Writes the component-wise product into `result`.
    pub fn multiply_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, |a, b| a * b))
    }

    /// Component-wise product with raw factors.
    pub fn multiply_by_floats(&self, x: f32, y: f32, z: f32) -> Self {
        Self::new(self.data[0] * x, self.data[1] * y, self.data[2] * z)
    }

    /// Component-wise quotient.
    ///
    /// Zero divisors are not guarded: the result follows IEEE-754 (`inf`/`NaN`).
    pub fn divide(&self, other: &Self) -> Self {
        Self::from(self.zip(other, |a, b| a / b))
    }

    /// Divides `self` component-wise by `other` (unchecked).
    pub fn divide_in_place(&mut self, other: &Self) -> &mut Self {
        let data = self.zip(other, |a, b| a / b);
        self.write(data)
    }

    /// Writes the component-wise quotient into `result` (unchecked).
    pub fn divide_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, |a, b| a / b))
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::from(self.map(|a| a * scalar))
    }

    /// Scales `self` by `scalar`.
    pub fn scale_in_place(&mut self, scalar: f32) -> &mut Self {
        let data = self.map(|a| a * scalar);
        self.write(data)
    }

    /// Writes `self * scalar` into `result`.
    pub fn scale_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        result.write(self.map(|a| a * scalar))
    }

    /// Accumulates `self * scalar` into `result`.
    pub fn scale_and_add_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        let data = result.zip(self, |r, a| r + a * scalar);
        result.write(data)
    }

    /// Returns the negated vector.
    pub fn negate(&self) -> Self {
        Self::from(self.map(|a| -a))
    }

    /// Negates `self`.
    pub fn negate_in_place(&mut self) -> &mut Self {
        let data = self.map(|a| -a);
        self.write(data)
    }

    /// Writes `-self` into `result`.
    pub fn negate_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.map(|a| -a))
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.data[0] * other.data[0] + self.data[1] * other.data[1] + self.data[2] * other.data[2]
    }

    /// Cross product with another vector (`self × other`).
    pub fn cross(&self, other: &Self) -> Self {
        let mut out = Self::ZERO;
        self.cross_to_ref(other, &mut out);
        out
    }

    /// Writes `self × other` into `result`.
    pub fn cross_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        result.write([ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx])
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the normalized vector.
    ///
    /// A vector of length 0 or 1 is returned unchanged: normalizing the zero
    /// vector yields the zero vector, not an error.
    ///
    /// ```
    /// use echo_math::Vec3;
    /// assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    /// assert_eq!(Vec3::new(0.0, 3.0, 4.0).normalize(), Vec3::new(0.0, 0.6, 0.8));
    /// ```
    pub fn normalize(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }

    /// Normalizes `self` (no-op for length 0 or 1).
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        self.normalize_from_length(len)
    }

    /// Writes the normalized vector into `result`.
    pub fn normalize_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).normalize_in_place()
    }

    /// Divides `self` by a precomputed `len` unless it is 0 or 1.
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
        result.write(self.zip(end, |a, b| scalar::lerp(a, b, amount)))
    }

    /// Hermite spline between `value1` and `value2` with the given tangents.
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
        result.write(tuple::hermite_first_derivative(
            value1.data,
            tangent1.data,
            value2.data,
            tangent2.data,
            time,
        ))
    }

    /// Catmull-Rom segment between `value2` (amount 0) and `value3` (amount 1).
    ///
    /// ```
    /// use echo_math::Vec3;
    /// let p = [
    ///     Vec3::new(0.0, 0.0, 0.0),
    ///     Vec3::new(1.0, 2.0, 0.0),
    ///     Vec3::new(3.0, 2.0, 1.0),
    ///     Vec3::new(4.0, 0.0, 1.0),
    /// ];
    /// assert_eq!(Vec3::catmull_rom(&p[0], &p[1], &p[2], &p[3], 0.0), p[1]);
    /// assert_eq!(Vec3::catmull_rom(&p[0], &p[1], &p[2], &p[3], 1.0), p[2]);
    /// ```
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
        let data = self.zip(other, f32::min);
        self.write(data)
    }

    /// Writes the component-wise minimum into `result`.
    pub fn minimize_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, f32::min))
    }

    /// Component-wise maximum.
    pub fn maximize(&self, other: &Self) -> Self {
        Self::from(self.zip(other, f32::max))
    }

    /// Replaces each component by the maximum with `other`.
    pub fn maximize_in_place(&mut self, other: &Self) -> &mut Self {
        let data = self.zip(other, f32::max);
        self.write(data)
    }

    /// Writes the component-wise maximum into `result`.
    pub fn maximize_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.zip(other, f32::max))
    }

    /// Clamps each component to `[min, max]`.
    pub fn clamp(&self, min: &Self, max: &Self) -> Self {
        let mut out = Self::ZERO;
        self.clamp_to_ref(min, max, &mut out);
        out
    }

    /// Writes the clamped vector into `result`.
    pub fn clamp_to_ref<'a>(&self, min: &Self, max: &Self, result: &'a mut Self) -> &'a mut Self {
        result.write(self.maximize(min).zip(max, f32::min))
    }

    /// Component-wise floor.
    pub fn floor(&self) -> Self {
        Self::from(self.map(f32::floor))
    }

    /// Component-wise fractional part (`v - floor(v)`).
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
        (0..3).all(|i| scalar::within_epsilon(self.data[i], other.data[i], epsilon))
    }

    /// Exact equality against raw components.
    pub fn equals_to_floats(&self, x: f32, y: f32, z: f32) -> bool {
        self.data == [x, y, z]
    }

    /// `true` when the components are not all equal within [`EPSILON`].
    pub fn is_non_uniform(&self) -> bool {
        self.is_non_uniform_within_epsilon(EPSILON)
    }

    /// `true` when the components are not all equal within `epsilon`.
    pub fn is_non_uniform_within_epsilon(&self, epsilon: f32) -> bool {
        let [x, y, z] = self.data.map(f32::abs);
        !scalar::within_epsilon(x, y, epsilon) || !scalar::within_epsilon(x, z, epsilon)
    }

    /// Signed angle in radians from `self` to `other` around `normal`.
    ///
    /// The sign is positive when `self × other` points along `normal`.
    pub fn angle_between(&self, other: &Self, normal: &Self) -> f32 {
        let v0 = self.normalize();
        let v1 = other.normalize();
        let dot = scalar::clamp(v0.dot(&v1), -1.0, 1.0);
        let angle = dot.acos();
        let n = v0.cross(&v1);
        if n.dot(normal) > 0.0 {
            if angle.is_nan() {
                0.0
            } else {
                angle
            }
        } else {
            -angle
        }
    }

    /// Rotates the vector by `rotation`.
    pub fn rotate_by_quaternion(&self, rotation: &Quat) -> Self {
        let mut out = Self::ZERO;
        self.rotate_by_quaternion_to_ref(rotation, &mut out);
        out
    }

    /// Rotates `self` in place by `rotation`.
    pub fn apply_rotation_quaternion(&mut self, rotation: &Quat) -> &mut Self {
        let rotated = self.rotate_by_quaternion(rotation);
        self.write(rotated.data)
    }

    /// Writes `self` rotated by `rotation` into `result`.
    pub fn rotate_by_quaternion_to_ref<'a>(
        &self,
        rotation: &Quat,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let [vx, vy, vz] = self.data;
        let [qx, qy, qz, qw] = rotation.to_array();
        // t = 2 * cross(q.xyz, v); v' = v + w * t + cross(q.xyz, t)
        let tx = 2.0 * (qy * vz - qz * vy);
        let ty = 2.0 * (qz * vx - qx * vz);
        let tz = 2.0 * (qx * vy - qy * vx);
        result.write([
            vx + qw * tx + qy * tz - qz * ty,
            vy + qw * ty + qz * tx - qx * tz,
            vz + qw * tz + qx * ty - qy * tx,
        ])
    }

    /// Transforms a point by `matrix`, dividing by the resulting `w`.
    pub fn transform_coordinates(&self, matrix: &Mat4) -> Self {
        let mut out = Self::ZERO;
        self.transform_coordinates_to_ref(matrix, &mut out);
        out
    }

    /// Writes the transformed point into `result`.
    pub fn transform_coordinates_to_ref<'a>(
        &self,
        matrix: &Mat4,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let [x, y, z] = self.data;
        let m = matrix.as_array();
        let rx = x * m[0] + y * m[4] + z * m[8] + m[12];
        let ry = x * m[1] + y * m[5] + z * m[9] + m[13];
        let rz = x * m[2] + y * m[6] + z * m[10] + m[14];
        let rw = 1.0 / (x * m[3] + y * m[7] + z * m[11] + m[15]);
        result.write([rx * rw, ry * rw, rz * rw])
    }

    /// Transforms a direction by the upper 3x3 of `matrix` (no translation).
    pub fn transform_normal(&self, matrix: &Mat4) -> Self {
        let mut out = Self::ZERO;
        self.transform_normal_to_ref(matrix, &mut out);
        out
    }

    /// Writes the transformed direction into `result`.
    pub fn transform_normal_to_ref<'a>(&self, matrix: &Mat4, result: &'a mut Self) -> &'a mut Self {
        let [x, y, z] = self.data;
        let m = matrix.as_array();
        result.write([
            x * m[0] + y * m[4] + z * m[8],
            x * m[1] + y * m[5] + z * m[9],
            x * m[2] + y * m[6] + z * m[10],
        ])
    }

    /// Projects a world-space point to screen space.
    ///
    /// `world` then `transform` (usually view-projection) are applied, then the
    /// viewport mapping: x/y into pixels (y down). Depth is remapped from
    /// `[-1, 1]` into `[0, 1]` unless `half_z_range` says the projection
    /// already produces `[0, 1]`. [`Vec3::unproject`] with the same flag
    /// inverts it.
    pub fn project(
        &self,
        world: &Mat4,
        transform: &Mat4,
        viewport: &Viewport,
        half_z_range: bool,
    ) -> Self {
        let half_w = viewport.width / 2.0;
        let half_h = viewport.height / 2.0;
        let (depth_scale, depth_offset) = if half_z_range { (1.0, 0.0) } else { (0.5, 0.5) };
        let viewport_matrix = Mat4::new([
            half_w,
            0.0,
            0.0,
            0.0,
            0.0,
            -half_h,
            0.0,
            0.0,
            0.0,
            0.0,
            depth_scale,
            0.0,
            viewport.x + half_w,
            half_h + viewport.y,
            depth_offset,
            1.0,
        ]);
        let matrix = world.multiply(transform).multiply(&viewport_matrix);
        self.transform_coordinates(&matrix)
    }

    /// Inverse of [`Vec3::project`]: maps a screen-space point back to world space.
    ///
    /// `half_z_range` must match the flag given to [`Vec3::project`]: when set,
    /// screen depth is already NDC; otherwise it is expanded from `[0, 1]` to
    /// `[-1, 1]`.
    pub fn unproject(
        &self,
        world: &Mat4,
        view: &Mat4,
        projection: &Mat4,
        viewport: &Viewport,
        half_z_range: bool,
    ) -> Self {
        let mut matrix = world.multiply(view).multiply(projection);
        matrix.invert_in_place();
        let [sx, sy, sz] = self.data;
        let screen = Self::new(
            (sx - viewport.x) / viewport.width * 2.0 - 1.0,
            -((sy - viewport.y) / viewport.height * 2.0 - 1.0),
            if half_z_range { sz } else { 2.0 * sz - 1.0 },
        );
        screen.transform_coordinates(&matrix)
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use echo_math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

impl Tuple for Vec3 {
    const CLASS_NAME: &'static str = "Vector3";
    const DIMENSION: usize = 3;

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

impl core::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3::add(&self, &rhs)
    }
}

impl core::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl core::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.scale(rhs)
    }
}

impl core::ops::Mul<Vec3> for f32 {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs.scale(self)
    }
}

impl core::ops::Div<f32> for Vec3 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        self.scale(1.0 / rhs)
    }
}

impl core::ops::Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl core::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.add_in_place(&rhs);
    }
}

impl core::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_in_place(&rhs);
    }
}

impl core::ops::MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.scale_in_place(rhs);
    }
}
