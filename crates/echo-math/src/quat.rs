// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::f32::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::scalar;
use crate::tuple::{self, Tuple};
use crate::{Mat4, Vec3};

/// Above this `|zAxisY|` the Euler extraction treats the rotation as gimbal locked.
const GIMBAL_LIMIT: f32 = 0.499_999_9;

/// Past this `|dot|` slerp falls back to linear weights.
const SLERP_LINEAR_THRESHOLD: f32 = 0.999_999;

/// Quaternion stored as `(x, y, z, w)`, `w` being the scalar part.
///
/// * All angles are expressed in radians.
/// * Unit length is not enforced; rotation helpers expect unit inputs and
///   [`Quat::normalize`] leaves zero and unit quaternions untouched.
/// * Divide, min/max and floor/fract have no meaning here and are rejected
///   through [`Tuple`] with [`MathError::UnsupportedOperation`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self {
            data: [x, y, z, w],
        }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the all-zero quaternion (not a rotation).
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Reads four components from `values` starting at `offset`.
    pub fn from_array(values: &[f32], offset: usize) -> Result<Self, MathError> {
        tuple::read_array(values, offset).map(Self::from)
    }

    /// Reads four components from `values` at `offset` into `result`.
    pub fn from_array_to_ref<'a>(
        values: &[f32],
        offset: usize,
        result: &'a mut Self,
    ) -> Result<&'a mut Self, MathError> {
        result.data = tuple::read_array(values, offset)?;
        Ok(result)
    }

    /// Returns the quaternion as an array.
    pub fn to_array(self) -> [f32; 4] {
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

    /// W (scalar) component.
    pub fn w(&self) -> f32 {
        self.data[3]
    }

    /// Overwrites all four components.
    pub fn set(&mut self, x: f32, y: f32, z: f32, w: f32) -> &mut Self {
        self.data = [x, y, z, w];
        self
    }

    /// Copies `source` into `self`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.data = source.data;
        self
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// The axis is normalized internally. A zero-length axis yields the
    /// identity quaternion.
    pub fn from_axis_angle(axis: &Vec3, angle: f32) -> Self {
        let len_sq = axis.length_squared();
        if len_sq == 0.0 {
            return Self::identity();
        }
        let norm_axis = axis.scale(1.0 / len_sq.sqrt());
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let scaled = norm_axis.scale(sin_half);
        Self::new(scaled.x(), scaled.y(), scaled.z(), cos_half)
    }

    /// Rotation from yaw (about Y), pitch (about X) and roll (about Z).
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        let mut out = Self::IDENTITY;
        Self::rotation_yaw_pitch_roll_to_ref(yaw, pitch, roll, &mut out);
        out
    }

    /// Writes the yaw/pitch/roll rotation into `result`.
    pub fn rotation_yaw_pitch_roll_to_ref(
        yaw: f32,
        pitch: f32,
        roll: f32,
        result: &mut Self,
    ) -> &mut Self {
        let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
        let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
        let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();

        result.data = [
            cos_yaw * sin_pitch * cos_roll + sin_yaw * cos_pitch * sin_roll,
            sin_yaw * cos_pitch * cos_roll - cos_yaw * sin_pitch * sin_roll,
            cos_yaw * cos_pitch * sin_roll - sin_yaw * sin_pitch * cos_roll,
            cos_yaw * cos_pitch * cos_roll + sin_yaw * sin_pitch * sin_roll,
        ];
        result
    }

    /// Rotation from Euler angles `(x, y, z)` = (pitch, yaw, roll).
    pub fn from_euler_angles(x: f32, y: f32, z: f32) -> Self {
        Self::rotation_yaw_pitch_roll(y, x, z)
    }

    /// Rotation from an Euler-angle vector as produced by [`Quat::to_euler_angles`].
    pub fn from_euler_vector(angles: &Vec3) -> Self {
        Self::from_euler_angles(angles.x(), angles.y(), angles.z())
    }

    /// Extracts the rotation of an unscaled rotation matrix.
    pub fn from_rotation_matrix(matrix: &Mat4) -> Self {
        let mut out = Self::IDENTITY;
        Self::from_rotation_matrix_to_ref(matrix, &mut out);
        out
    }

    /// Writes the rotation of `matrix` (upper 3x3, assumed unscaled) into `result`.
    pub fn from_rotation_matrix_to_ref<'a>(matrix: &Mat4, result: &'a mut Self) -> &'a mut Self {
        let d = matrix.as_array();
        let (m11, m12, m13) = (d[0], d[4], d[8]);
        let (m21, m22, m23) = (d[1], d[5], d[9]);
        let (m31, m32, m33) = (d[2], d[6], d[10]);
        let trace = m11 + m22 + m33;

        result.data = if trace > 0.0 {
            let s = 0.5 / (trace + 1.0).sqrt();
            [(m32 - m23) * s, (m13 - m31) * s, (m21 - m12) * s, 0.25 / s]
        } else if m11 > m22 && m11 > m33 {
            let s = 2.0 * (1.0 + m11 - m22 - m33).sqrt();
            [0.25 * s, (m12 + m21) / s, (m13 + m31) / s, (m32 - m23) / s]
        } else if m22 > m33 {
            let s = 2.0 * (1.0 + m22 - m11 - m33).sqrt();
            [(m12 + m21) / s, 0.25 * s, (m23 + m32) / s, (m13 - m31) / s]
        } else {
            let s = 2.0 * (1.0 + m33 - m11 - m22).sqrt();
            [(m13 + m31) / s, (m23 + m32) / s, 0.25 * s, (m21 - m12) / s]
        };
        result
    }

    /// Shortest rotation taking unit vector `from` onto unit vector `to`.
    ///
    /// Opposite vectors pick an arbitrary perpendicular axis.
    pub fn from_unit_vectors(from: &Vec3, to: &Vec3) -> Self {
        let r = from.dot(to) + 1.0;
        let mut out = if r < scalar::EPSILON {
            if from.x().abs() > from.z().abs() {
                Self::new(-from.y(), from.x(), 0.0, 0.0)
            } else {
                Self::new(0.0, -from.z(), from.y(), 0.0)
            }
        } else {
            let axis = from.cross(to);
            Self::new(axis.x(), axis.y(), axis.z(), r)
        };
        out.normalize_in_place();
        out
    }

    /// Hamilton product `self · other`.
    ///
    /// Rotating a vector by the result applies `other` first, then `self`.
    /// The matrix equivalent is `Mat4::from_quat(other).multiply(&Mat4::from_quat(self))`
    /// because [`Mat4::multiply`] reads left to right in application order.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use echo_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(&Vec3::UNIT_X, FRAC_PI_2);
    /// // Non-commutative.
    /// assert_ne!(yaw.multiply(&pitch), pitch.multiply(&yaw));
    /// assert_eq!(Quat::identity().multiply(&yaw), yaw);
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = Self::IDENTITY;
        self.multiply_to_ref(other, &mut out);
        out
    }

    /// Replaces `self` with `self · other`.
    pub fn multiply_in_place(&mut self, other: &Self) -> &mut Self {
        let product = self.multiply(other);
        self.copy_from(&product)
    }

    /// Writes `self · other` into `result`.
    pub fn multiply_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        result.data = [
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        ];
        result
    }

    /// Returns the conjugate `(-x, -y, -z, w)`.
    pub fn conjugate(&self) -> Self {
        let [x, y, z, w] = self.data;
        Self::new(-x, -y, -z, w)
    }

    /// Conjugates `self`.
    pub fn conjugate_in_place(&mut self) -> &mut Self {
        let c = self.conjugate();
        self.copy_from(&c)
    }

    /// Writes the conjugate into `result`.
    pub fn conjugate_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(&self.conjugate())
    }

    /// Multiplicative inverse.
    ///
    /// The conjugate is scaled by `1/|q|²`, except when `|q|²` is 0 or 1 where
    /// the plain conjugate is returned.
    pub fn inverse(&self) -> Self {
        let mut out = *self;
        out.invert_in_place();
        out
    }

    /// Inverts `self`.
    pub fn invert_in_place(&mut self) -> &mut Self {
        self.conjugate_in_place();
        let len_sq = self.length_squared();
        if len_sq == 0.0 || len_sq == 1.0 {
            return self;
        }
        self.scale_in_place(1.0 / len_sq)
    }

    /// Writes the inverse into `result`.
    pub fn inverse_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).invert_in_place()
    }

    /// Dot product of the four components.
    pub fn dot(&self, other: &Self) -> f32 {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;
        ax * bx + ay * by + az * bz + aw * bw
    }

    /// Quaternion length.
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Squared length.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns the normalized quaternion; length 0 or 1 is returned unchanged.
    pub fn normalize(&self) -> Self {
        let mut out = *self;
        out.normalize_in_place();
        out
    }

    /// Normalizes `self` in place.
    pub fn normalize_in_place(&mut self) -> &mut Self {
        let len = self.length();
        if len == 0.0 || len == 1.0 {
            return self;
        }
        self.scale_in_place(1.0 / len)
    }

    /// Writes the normalized quaternion into `result`.
    pub fn normalize_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).normalize_in_place()
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = *self;
        out.add_in_place(other);
        out
    }

    /// Adds `other` to `self`.
    pub fn add_in_place(&mut self, other: &Self) -> &mut Self {
        for (a, b) in self.data.iter_mut().zip(other.data) {
            *a += b;
        }
        self
    }

    /// Writes `self + other` into `result`.
    pub fn add_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).add_in_place(other)
    }

    /// Component-wise difference.
    pub fn subtract(&self, other: &Self) -> Self {
        let mut out = *self;
        out.subtract_in_place(other);
        out
    }

    /// Subtracts `other` from `self`.
    pub fn subtract_in_place(&mut self, other: &Self) -> &mut Self {
        for (a, b) in self.data.iter_mut().zip(other.data) {
            *a -= b;
        }
        self
    }

    /// Writes `self - other` into `result`.
    pub fn subtract_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        result.copy_from(self).subtract_in_place(other)
    }

    /// Scales all four components.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::from(self.data.map(|a| a * scalar))
    }

    /// Scales `self` by `scalar`.
    pub fn scale_in_place(&mut self, scalar: f32) -> &mut Self {
        self.data = self.data.map(|a| a * scalar);
        self
    }

    /// Writes `self * scalar` into `result`.
    pub fn scale_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        result.data = self.data.map(|a| a * scalar);
        result
    }

    /// Accumulates `self * scalar` into `result`.
    pub fn scale_and_add_to_ref<'a>(&self, scalar: f32, result: &'a mut Self) -> &'a mut Self {
        for (r, a) in result.data.iter_mut().zip(self.data) {
            *r += a * scalar;
        }
        result
    }

    /// Negates all four components (same rotation, other hemisphere).
    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    /// Exact component equality.
    pub fn equals(&self, other: &Self) -> bool {
        self.data == other.data
    }

    /// Equality within `epsilon` per component.
    pub fn equals_with_epsilon(&self, other: &Self, epsilon: f32) -> bool {
        (0..4).all(|i| scalar::within_epsilon(self.data[i], other.data[i], epsilon))
    }

    /// `true` when `a` and `b` lie in the same hemisphere (`dot >= 0`).
    pub fn are_close(a: &Self, b: &Self) -> bool {
        a.dot(b) >= 0.0
    }

    /// Spherical interpolation from `start` to `end` along the shorter arc.
    ///
    /// ```
    /// use echo_math::Quat;
    /// let a = Quat::identity();
    /// assert_eq!(Quat::slerp(&a, &a, 0.37), a);
    /// ```
    pub fn slerp(start: &Self, end: &Self, amount: f32) -> Self {
        let mut out = Self::IDENTITY;
        Self::slerp_to_ref(start, end, amount, &mut out);
        out
    }

    /// Writes the spherical interpolation into `result`.
    pub fn slerp_to_ref<'a>(
        start: &Self,
        end: &Self,
        amount: f32,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let mut cos = start.dot(end);
        let flip = cos < 0.0;
        if flip {
            cos = -cos;
        }

        let (weight_start, weight_end) = if cos > SLERP_LINEAR_THRESHOLD {
            (1.0 - amount, if flip { -amount } else { amount })
        } else {
            let angle = cos.acos();
            let inv_sin = 1.0 / angle.sin();
            let end_weight = (amount * angle).sin() * inv_sin;
            (
                ((1.0 - amount) * angle).sin() * inv_sin,
                if flip { -end_weight } else { end_weight },
            )
        };

        let mut data = [0.0; 4];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = weight_start * start.data[i] + weight_end * end.data[i];
        }
        result.data = data;
        result
    }

    /// Hermite spline between two quaternions (not renormalized).
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

    /// First derivative of the quaternion Hermite spline at `time`.
    pub fn hermite_first_derivative(
        value1: &Self,
        tangent1: &Self,
        value2: &Self,
        tangent2: &Self,
        time: f32,
    ) -> Self {
        let mut out = Self::zero();
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

    /// Euler angles `(pitch, yaw, roll)` as `(x, y, z)`, Y-X-Z convention.
    ///
    /// Near the poles (pitch ±90°) roll is folded into yaw and reported as 0.
    pub fn to_euler_angles(&self) -> Vec3 {
        let mut out = Vec3::ZERO;
        self.to_euler_angles_to_ref(&mut out);
        out
    }

    /// Writes the Euler angles into `result`.
    pub fn to_euler_angles_to_ref<'a>(&self, result: &'a mut Vec3) -> &'a mut Vec3 {
        let [qx, qy, qz, qw] = self.data;
        let z_axis_y = qy * qz - qx * qw;

        if z_axis_y < -GIMBAL_LIMIT {
            result.set(FRAC_PI_2, 2.0 * qy.atan2(qw), 0.0)
        } else if z_axis_y > GIMBAL_LIMIT {
            result.set(-FRAC_PI_2, 2.0 * qy.atan2(qw), 0.0)
        } else {
            let sqw = qw * qw;
            let sqz = qz * qz;
            let sqx = qx * qx;
            let sqy = qy * qy;
            result.set(
                (-2.0 * z_axis_y).asin(),
                (2.0 * (qz * qx + qy * qw)).atan2(sqz - sqx - sqy + sqw),
                (2.0 * (qx * qy + qz * qw)).atan2(-sqz - sqx + sqy + sqw),
            )
        }
    }

    /// Rotation matrix of the quaternion as given (no renormalization).
    pub fn to_rotation_matrix(&self) -> Mat4 {
        let mut out = Mat4::identity();
        self.to_rotation_matrix_to_ref(&mut out);
        out
    }

    /// Writes the rotation matrix into `result`.
    pub fn to_rotation_matrix_to_ref<'a>(&self, result: &'a mut Mat4) -> &'a mut Mat4 {
        let [x, y, z, w] = self.data;

        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let xz = x * z;
        let yz = y * z;
        let wx = w * x;
        let wy = w * y;
        let wz = w * z;

        result.set_from_values([
            1.0 - 2.0 * (yy + zz),
            2.0 * (xy + wz),
            2.0 * (xz - wy),
            0.0,
            2.0 * (xy - wz),
            1.0 - 2.0 * (xx + zz),
            2.0 * (yz + wx),
            0.0,
            2.0 * (xz + wy),
            2.0 * (yz - wx),
            1.0 - 2.0 * (xx + yy),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Converts the quaternion to a rotation matrix, normalizing first.
    pub fn to_mat4(&self) -> Mat4 {
        self.normalize().to_rotation_matrix()
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalization is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl From<Quat> for [f32; 4] {
    fn from(value: Quat) -> Self {
        value.data
    }
}

impl Quat {
    fn unsupported<T>(operation: &'static str) -> Result<T, MathError> {
        Err(MathError::UnsupportedOperation {
            class_name: Self::CLASS_NAME,
            operation,
        })
    }
}

impl Tuple for Quat {
    const CLASS_NAME: &'static str = "Quaternion";
    const DIMENSION: usize = 4;

    fn as_slice(&self) -> &[f32] {
        &self.data
    }

    fn from_slice(values: &[f32], offset: usize) -> Result<Self, MathError> {
        Self::from_array(values, offset)
    }

    fn try_divide(&self, _other: &Self) -> Result<Self, MathError> {
        Self::unsupported("divide")
    }

    fn try_minimize(&self, _other: &Self) -> Result<Self, MathError> {
        Self::unsupported("minimize")
    }

    fn try_maximize(&self, _other: &Self) -> Result<Self, MathError> {
        Self::unsupported("maximize")
    }

    fn try_floor(&self) -> Result<Self, MathError> {
        Self::unsupported("floor")
    }

    fn try_fract(&self) -> Result<Self, MathError> {
        Self::unsupported("fract")
    }
}

impl core::ops::Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl core::ops::MulAssign for Quat {
    fn mul_assign(&mut self, rhs: Self) {
        self.multiply_in_place(&rhs);
    }
}

impl core::ops::Add for Quat {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Quat::add(&self, &rhs)
    }
}

impl core::ops::Sub for Quat {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        self.subtract(&rhs)
    }
}

impl core::ops::Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}
