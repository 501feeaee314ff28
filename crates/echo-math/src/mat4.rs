// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::cell::Cell;
use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{check_len, MathError};
use crate::scalar;
use crate::tuple;
use crate::{Quat, Vec3, Vec4};

const IDENTITY_DATA: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, // row 0
    0.0, 1.0, 0.0, 0.0, // row 1
    0.0, 0.0, 1.0, 0.0, // row 2
    0.0, 0.0, 0.0, 1.0, // row 3 (translation)
];

static UPDATE_FLAG_SEED: AtomicU64 = AtomicU64::new(0);

fn next_update_flag() -> u64 {
    UPDATE_FLAG_SEED.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
}

/// 4×4 transform matrix in Echo’s flat layout.
///
/// - Points are treated as row vectors: `x' = x*m0 + y*m4 + z*m8 + m12`, so
///   the translation lives at indices 12–14. The same 16 floats read
///   column-major with column vectors, which is what GPU uploads expect.
/// - [`Mat4::multiply`] reads in application order: `a.multiply(&b)` applies
///   `a` first, then `b`.
/// - "Is identity" and "is 2D-affine identity" are memoized and recomputed on
///   the first query after any mutation. Every mutation also assigns a fresh
///   [`Mat4::update_flag`] drawn from a process-wide counter, so dependents can
///   detect change by comparing one integer.
///
/// # Examples
/// ```
/// use echo_math::{Mat4, Vec3};
/// let t = Mat4::translation(5.0, -3.0, 2.0);
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(t.transform_point(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
///
/// # Precision
/// - Uses `f32`; repeated multiplies and transforms will accumulate rounding.
/// - Rotation helpers are consistent with [`Quat`] conversions (`from_quat`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "[f32; 16]", into = "[f32; 16]")]
pub struct Mat4 {
    data: [f32; 16],
    is_identity: Cell<Option<bool>>,
    is_identity_3x2: Cell<Option<bool>>,
    update_flag: u64,
}

impl Mat4 {
    /// Creates a matrix from its 16 values in storage order.
    pub fn new(data: [f32; 16]) -> Self {
        Self::with_identity_hint(data, None)
    }

    pub(crate) fn with_identity_hint(data: [f32; 16], is_identity: Option<bool>) -> Self {
        Self {
            data,
            is_identity: Cell::new(is_identity),
            is_identity_3x2: Cell::new(None),
            update_flag: next_update_flag(),
        }
    }

    /// Returns the identity matrix.
    pub fn identity() -> Self {
        Self::with_identity_hint(IDENTITY_DATA, Some(true))
    }

    /// Returns the all-zero matrix.
    pub fn zero() -> Self {
        Self::with_identity_hint([0.0; 16], Some(false))
    }

    /// Reads 16 values from `values` starting at `offset`.
    pub fn from_array(values: &[f32], offset: usize) -> Result<Self, MathError> {
        tuple::read_array(values, offset).map(Self::new)
    }

    /// Reads 16 values from `values` at `offset` into `result`.
    pub fn from_array_to_ref<'a>(
        values: &[f32],
        offset: usize,
        result: &'a mut Self,
    ) -> Result<&'a mut Self, MathError> {
        let data = tuple::read_array(values, offset)?;
        Ok(result.write(data))
    }

    /// Overwrites all 16 values.
    pub fn set_from_values(&mut self, data: [f32; 16]) -> &mut Self {
        self.write(data)
    }

    fn mark_as_updated(&mut self) {
        self.update_flag = next_update_flag();
        self.is_identity.set(None);
        self.is_identity_3x2.set(None);
    }

    fn write(&mut self, data: [f32; 16]) -> &mut Self {
        self.data = data;
        self.mark_as_updated();
        self
    }

    /// Writes `data` and records an identity status known analytically by
    /// the caller (`None` leaves it to be computed on demand).
    pub(crate) fn write_with_identity_hint(
        &mut self,
        data: [f32; 16],
        is_identity: Option<bool>,
    ) -> &mut Self {
        self.write(data);
        self.is_identity.set(is_identity);
        self
    }

    /// Returns the matrix values in storage order.
    pub fn to_array(&self) -> [f32; 16] {
        self.data
    }

    /// Borrows the matrix values in storage order.
    pub fn as_array(&self) -> &[f32; 16] {
        &self.data
    }

    /// Writes the 16 values into `out` starting at `offset`.
    pub fn copy_to_array(&self, out: &mut [f32], offset: usize) -> Result<(), MathError> {
        check_len(16, offset, out.len())?;
        out[offset..offset + 16].copy_from_slice(&self.data);
        Ok(())
    }

    /// Monotonic tag changed by every mutation of this matrix.
    pub fn update_flag(&self) -> u64 {
        self.update_flag
    }

    /// `true` when the matrix equals the identity.
    ///
    /// Memoized; the memo is dropped by every mutating method.
    pub fn is_identity(&self) -> bool {
        if let Some(value) = self.is_identity.get() {
            return value;
        }
        let value = self.data == IDENTITY_DATA;
        self.is_identity.set(Some(value));
        value
    }

    /// `true` when the matrix is the identity as a 2D affine transform
    /// (`m0 = m5 = m15 = 1`, `m1 = m4 = m12 = m13 = 0`).
    pub fn is_identity_as_3x2(&self) -> bool {
        if let Some(value) = self.is_identity_3x2.get() {
            return value;
        }
        let m = &self.data;
        let value = m[0] == 1.0
            && m[5] == 1.0
            && m[15] == 1.0
            && m[1] == 0.0
            && m[4] == 0.0
            && m[12] == 0.0
            && m[13] == 0.0;
        self.is_identity_3x2.set(Some(value));
        value
    }

    /// Builds a translation matrix.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::identity();
        Self::translation_to_ref(x, y, z, &mut out);
        out
    }

    /// Writes a translation matrix into `result`.
    pub fn translation_to_ref(x: f32, y: f32, z: f32, result: &mut Self) -> &mut Self {
        result.write_with_identity_hint(
            [
                1.0, 0.0, 0.0, 0.0, // row 0
                0.0, 1.0, 0.0, 0.0, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                x, y, z, 1.0, // row 3
            ],
            Some(x == 0.0 && y == 0.0 && z == 0.0),
        )
    }

    /// Builds a non-uniform scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        let mut out = Self::identity();
        Self::scaling_to_ref(x, y, z, &mut out);
        out
    }

    /// Writes a scale matrix into `result`.
    pub fn scaling_to_ref(x: f32, y: f32, z: f32, result: &mut Self) -> &mut Self {
        result.write_with_identity_hint(
            [
                x, 0.0, 0.0, 0.0, // row 0
                0.0, y, 0.0, 0.0, // row 1
                0.0, 0.0, z, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
            Some(x == 1.0 && y == 1.0 && z == 1.0),
        )
    }

    /// Builds a rotation matrix around the X axis by `angle` radians.
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, s, 0.0, //
            0.0, -s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, 0.0, -s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c, s, 0.0, 0.0, //
            -s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix from an axis and angle in radians.
    ///
    /// The axis is normalized internally; a zero-length axis yields the
    /// identity rotation.
    pub fn rotation_axis_angle(axis: &Vec3, angle: f32) -> Self {
        Self::from_quat(&Quat::from_axis_angle(axis, angle))
    }

    /// Constructs a matrix from a quaternion.
    ///
    /// This simply forwards to [`Quat::to_mat4`].
    pub fn from_quat(q: &Quat) -> Self {
        q.to_mat4()
    }

    /// Builds a rotation matrix from Euler angles in radians.
    ///
    /// Application order is roll (about +Z), then pitch (about +X), then yaw
    /// (about +Y); matches [`Mat4::rotation_yaw_pitch_roll`].
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use echo_math::{Mat4, Vec3};
    /// // Yaw=90°: +Z maps to +X
    /// let r = Mat4::rotation_from_euler(FRAC_PI_2, 0.0, 0.0);
    /// let v = r.transform_direction(&Vec3::UNIT_Z);
    /// assert!((v.x() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotation_from_euler(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self::rotation_z(roll)
            .multiply(&Self::rotation_x(pitch))
            .multiply(&Self::rotation_y(yaw))
    }

    /// Rotation matrix from yaw, pitch and roll, built through [`Quat`].
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        Quat::rotation_yaw_pitch_roll(yaw, pitch, roll).to_rotation_matrix()
    }

    /// Composes scale, then rotation, then translation into one matrix.
    pub fn compose(scale: &Vec3, rotation: &Quat, translation: &Vec3) -> Self {
        let mut out = Self::identity();
        Self::compose_to_ref(scale, rotation, translation, &mut out);
        out
    }

    /// Writes the scale/rotation/translation composition into `result`.
    pub fn compose_to_ref<'a>(
        scale: &Vec3,
        rotation: &Quat,
        translation: &Vec3,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let [x, y, z, w] = rotation.to_array();
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        let (sx, sy, sz) = (scale.x(), scale.y(), scale.z());

        result.write([
            (1.0 - (yy + zz)) * sx,
            (xy + wz) * sx,
            (xz - wy) * sx,
            0.0,
            (xy - wz) * sy,
            (1.0 - (xx + zz)) * sy,
            (yz + wx) * sy,
            0.0,
            (xz + wy) * sz,
            (yz - wx) * sz,
            (1.0 - (xx + yy)) * sz,
            0.0,
            translation.x(),
            translation.y(),
            translation.z(),
            1.0,
        ])
    }

    /// Element-wise linear interpolation between two matrices.
    pub fn lerp(start: &Self, end: &Self, gradient: f32) -> Self {
        let mut out = Self::identity();
        Self::lerp_to_ref(start, end, gradient, &mut out);
        out
    }

    /// Writes the element-wise interpolation into `result`.
    pub fn lerp_to_ref<'a>(
        start: &Self,
        end: &Self,
        gradient: f32,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let mut data = [0.0; 16];
        for (i, slot) in data.iter_mut().enumerate() {
            *slot = scalar::lerp(start.data[i], end.data[i], gradient);
        }
        result.write(data)
    }

    /// Interpolates decomposed parts: scale and translation linearly,
    /// rotation spherically, then recomposes.
    pub fn decompose_lerp(start: &Self, end: &Self, gradient: f32) -> Self {
        let mut start_scale = Vec3::ONE;
        let mut start_rotation = Quat::IDENTITY;
        let mut start_translation = Vec3::ZERO;
        start.decompose_to_ref(
            &mut start_scale,
            &mut start_rotation,
            &mut start_translation,
            None,
        );

        let mut end_scale = Vec3::ONE;
        let mut end_rotation = Quat::IDENTITY;
        let mut end_translation = Vec3::ZERO;
        end.decompose_to_ref(&mut end_scale, &mut end_rotation, &mut end_translation, None);

        Self::compose(
            &start_scale.lerp(&end_scale, gradient),
            &Quat::slerp(&start_rotation, &end_rotation, gradient),
            &start_translation.lerp(&end_translation, gradient),
        )
    }

    /// Multiplies two matrices in application order (`self` then `other`).
    ///
    /// An identity operand short-circuits to a copy of the other operand.
    ///
    /// # Examples
    /// ```
    /// use echo_math::{Mat4, Vec3};
    /// let s = Mat4::scaling(2.0, 2.0, 2.0);
    /// let t = Mat4::translation(1.0, 0.0, 0.0);
    /// // Scale first, then translate.
    /// let p = s.multiply(&t).transform_point(&Vec3::UNIT_X);
    /// assert_eq!(p.to_array(), [3.0, 0.0, 0.0]);
    /// assert_eq!(Mat4::identity().multiply(&t), t);
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = Self::identity();
        self.multiply_to_ref(other, &mut out);
        out
    }

    /// Replaces `self` with `self` then `other`.
    pub fn multiply_in_place(&mut self, other: &Self) -> &mut Self {
        if other.is_identity() {
            return self;
        }
        if self.is_identity() {
            return self.copy_from(other);
        }
        let data = multiply_arrays(&self.data, &other.data);
        self.write(data)
    }

    /// Writes `self` then `other` into `result`.
    pub fn multiply_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        if self.is_identity() {
            return result.copy_from(other);
        }
        if other.is_identity() {
            return result.copy_from(self);
        }
        result.write(multiply_arrays(&self.data, &other.data))
    }

    /// Writes the product into `out` at `offset` without touching any matrix.
    pub fn multiply_to_array(
        &self,
        other: &Self,
        out: &mut [f32],
        offset: usize,
    ) -> Result<(), MathError> {
        check_len(16, offset, out.len())?;
        out[offset..offset + 16].copy_from_slice(&multiply_arrays(&self.data, &other.data));
        Ok(())
    }

    /// Copies values and identity memo from `source`.
    pub fn copy_from(&mut self, source: &Self) -> &mut Self {
        self.write(source.data);
        self.is_identity.set(source.is_identity.get());
        self.is_identity_3x2.set(source.is_identity_3x2.get());
        self
    }

    /// Sets every element to zero.
    pub fn reset(&mut self) -> &mut Self {
        self.write_with_identity_hint([0.0; 16], Some(false))
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        self.add_to_ref(other, &mut out);
        out
    }

    /// Writes the element-wise sum into `result`.
    pub fn add_to_ref<'a>(&self, other: &Self, result: &'a mut Self) -> &'a mut Self {
        let mut data = self.data;
        for (a, b) in data.iter_mut().zip(other.data) {
            *a += b;
        }
        result.write(data)
    }

    /// Adds `other` to `self` element-wise.
    pub fn add_to_self(&mut self, other: &Self) -> &mut Self {
        let mut data = self.data;
        for (a, b) in data.iter_mut().zip(other.data) {
            *a += b;
        }
        self.write(data)
    }

    /// Multiplies every element by `factor`.
    pub fn scale_by(&self, factor: f32) -> Self {
        let mut out = Self::zero();
        self.scale_to_ref(factor, &mut out);
        out
    }

    /// Writes every element times `factor` into `result`.
    pub fn scale_to_ref<'a>(&self, factor: f32, result: &'a mut Self) -> &'a mut Self {
        result.write(self.data.map(|v| v * factor))
    }

    /// Adds `value` to the element at `index`.
    pub fn add_at_index(&mut self, index: usize, value: f32) -> Result<&mut Self, MathError> {
        let mut data = self.data;
        *data.get_mut(index).ok_or(MathError::IndexOutOfRange(index))? += value;
        Ok(self.write(data))
    }

    /// Multiplies the element at `index` by `value`.
    pub fn multiply_at_index(&mut self, index: usize, value: f32) -> Result<&mut Self, MathError> {
        let mut data = self.data;
        *data.get_mut(index).ok_or(MathError::IndexOutOfRange(index))? *= value;
        Ok(self.write(data))
    }

    /// Exact element equality.
    pub fn equals(&self, other: &Self) -> bool {
        if self.is_identity() && other.is_identity() {
            return true;
        }
        self.data == other.data
    }

    /// Equality within `epsilon` per element.
    pub fn equals_with_epsilon(&self, other: &Self, epsilon: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| scalar::within_epsilon(*a, *b, epsilon))
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        if self.is_identity() {
            return 1.0;
        }
        let c = Cofactors::new(&self.data);
        c.determinant()
    }

    /// Returns the inverse; a singular matrix is returned unchanged.
    ///
    /// ```
    /// use echo_math::Mat4;
    /// let singular = Mat4::zero();
    /// assert_eq!(singular.invert(), singular);
    /// let t = Mat4::translation(1.0, 2.0, 3.0);
    /// assert!(t.multiply(&t.invert()).is_identity());
    /// ```
    pub fn invert(&self) -> Self {
        let mut out = Self::identity();
        self.invert_to_ref(&mut out);
        out
    }

    /// Inverts `self`; singular matrices are left unchanged.
    pub fn invert_in_place(&mut self) -> &mut Self {
        let inverted = self.invert();
        self.copy_from(&inverted)
    }

    /// Writes the inverse into `result`, or a copy of `self` when singular.
    pub fn invert_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        if self.is_identity() {
            return result.copy_from(&Self::identity());
        }
        match Cofactors::new(&self.data).inverse() {
            Some(data) => result.write(data),
            None => result.copy_from(self),
        }
    }

    /// Returns the inverse, or `None` when the determinant is zero.
    pub fn try_invert(&self) -> Option<Self> {
        if self.is_identity() {
            return Some(Self::identity());
        }
        Cofactors::new(&self.data).inverse().map(Self::new)
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut out = Self::identity();
        self.transpose_to_ref(&mut out);
        out
    }

    /// Transposes `self`.
    pub fn transpose_in_place(&mut self) -> &mut Self {
        let transposed = self.transpose();
        self.copy_from(&transposed)
    }

    /// Writes the transpose into `result`.
    pub fn transpose_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        let mut data = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                data[row * 4 + col] = self.data[col * 4 + row];
            }
        }
        let identity = self.is_identity.get();
        result.write_with_identity_hint(data, identity)
    }

    /// Splits the matrix into scale, rotation and translation.
    ///
    /// `scaling_sign`, when given, supplies the signs to apply to the
    /// extracted (always positive) axis lengths; otherwise a negative
    /// determinant flips `scale.y`. Returns `false` when a scale component is
    /// zero: rotation is then reset to identity, scale and translation stay
    /// populated.
    pub fn decompose_to_ref(
        &self,
        scale: &mut Vec3,
        rotation: &mut Quat,
        translation: &mut Vec3,
        scaling_sign: Option<&Vec3>,
    ) -> bool {
        if self.is_identity() {
            translation.set(0.0, 0.0, 0.0);
            scale.set(1.0, 1.0, 1.0);
            rotation.copy_from(&Quat::IDENTITY);
            return true;
        }

        let m = &self.data;
        translation.set(m[12], m[13], m[14]);

        let mut sx = (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt();
        let mut sy = (m[4] * m[4] + m[5] * m[5] + m[6] * m[6]).sqrt();
        let mut sz = (m[8] * m[8] + m[9] * m[9] + m[10] * m[10]).sqrt();

        match scaling_sign {
            Some(sign) => {
                if sign.x() < 0.0 {
                    sx = -sx;
                }
                if sign.y() < 0.0 {
                    sy = -sy;
                }
                if sign.z() < 0.0 {
                    sz = -sz;
                }
            }
            None => {
                if self.determinant() < 0.0 {
                    sy = -sy;
                }
            }
        }
        scale.set(sx, sy, sz);

        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            rotation.copy_from(&Quat::IDENTITY);
            return false;
        }

        let (ix, iy, iz) = (1.0 / sx, 1.0 / sy, 1.0 / sz);
        let unscaled = Self::new([
            m[0] * ix,
            m[1] * ix,
            m[2] * ix,
            0.0,
            m[4] * iy,
            m[5] * iy,
            m[6] * iy,
            0.0,
            m[8] * iz,
            m[9] * iz,
            m[10] * iz,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ]);
        Quat::from_rotation_matrix_to_ref(&unscaled, rotation);
        true
    }

    /// Returns `(scale, rotation, translation)`, or `None` for a zero scale.
    ///
    /// ```
    /// use echo_math::{Mat4, Quat, Vec3};
    /// let m = Mat4::compose(&Vec3::new(2.0, 3.0, 4.0), &Quat::identity(), &Vec3::new(1.0, 2.0, 3.0));
    /// let (s, r, t) = m.decompose().unwrap();
    /// assert_eq!(s, Vec3::new(2.0, 3.0, 4.0));
    /// assert_eq!(r, Quat::identity());
    /// assert_eq!(t, Vec3::new(1.0, 2.0, 3.0));
    /// ```
    pub fn decompose(&self) -> Option<(Vec3, Quat, Vec3)> {
        let mut scale = Vec3::ONE;
        let mut rotation = Quat::IDENTITY;
        let mut translation = Vec3::ZERO;
        self.decompose_to_ref(&mut scale, &mut rotation, &mut translation, None)
            .then_some((scale, rotation, translation))
    }

    /// Translation part (indices 12–14).
    pub fn translation_vector(&self) -> Vec3 {
        Vec3::new(self.data[12], self.data[13], self.data[14])
    }

    /// Overwrites the translation part.
    pub fn set_translation(&mut self, translation: &Vec3) -> &mut Self {
        self.set_translation_from_floats(translation.x(), translation.y(), translation.z())
    }

    /// Overwrites the translation part from raw components.
    pub fn set_translation_from_floats(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let mut data = self.data;
        data[12] = x;
        data[13] = y;
        data[14] = z;
        self.write(data)
    }

    /// Adds to the translation part.
    pub fn add_translation_from_floats(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        let mut data = self.data;
        data[12] += x;
        data[13] += y;
        data[14] += z;
        self.write(data)
    }

    /// Returns row `index` (0..=3).
    pub fn row(&self, index: usize) -> Result<Vec4, MathError> {
        if index > 3 {
            return Err(MathError::RowOutOfRange(index));
        }
        Vec4::from_array(&self.data, index * 4)
    }

    /// Overwrites row `index` (0..=3).
    pub fn set_row(&mut self, index: usize, row: &Vec4) -> Result<&mut Self, MathError> {
        self.set_row_from_floats(index, row.x(), row.y(), row.z(), row.w())
    }

    /// Overwrites row `index` (0..=3) from raw components.
    pub fn set_row_from_floats(
        &mut self,
        index: usize,
        x: f32,
        y: f32,
        z: f32,
        w: f32,
    ) -> Result<&mut Self, MathError> {
        if index > 3 {
            return Err(MathError::RowOutOfRange(index));
        }
        let mut data = self.data;
        data[index * 4..index * 4 + 4].copy_from_slice(&[x, y, z, w]);
        Ok(self.write(data))
    }

    /// Rotation part with scale divided out and translation removed.
    pub fn rotation_matrix(&self) -> Self {
        let mut out = Self::identity();
        self.rotation_matrix_to_ref(&mut out);
        out
    }

    /// Writes the rotation part into `result` (identity for a zero axis).
    ///
    /// A mirrored matrix has its reflection folded into the Y scale, as
    /// [`Mat4::decompose_to_ref`] does, so the result is a proper rotation.
    pub fn rotation_matrix_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        if self.is_identity() {
            return result.copy_from(&Self::identity());
        }
        let m = &self.data;
        let sx = (m[0] * m[0] + m[1] * m[1] + m[2] * m[2]).sqrt();
        let mut sy = (m[4] * m[4] + m[5] * m[5] + m[6] * m[6]).sqrt();
        if self.determinant() < 0.0 {
            sy = -sy;
        }
        let sz = (m[8] * m[8] + m[9] * m[9] + m[10] * m[10]).sqrt();
        if sx == 0.0 || sy == 0.0 || sz == 0.0 {
            return result.copy_from(&Self::identity());
        }
        result.write([
            m[0] / sx,
            m[1] / sx,
            m[2] / sx,
            0.0,
            m[4] / sy,
            m[5] / sy,
            m[6] / sy,
            0.0,
            m[8] / sz,
            m[9] / sz,
            m[10] / sz,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Keeps only the translation part.
    pub fn remove_rotation_and_scaling(&mut self) -> &mut Self {
        let [x, y, z] = [self.data[12], self.data[13], self.data[14]];
        Self::translation_to_ref(x, y, z, self)
    }

    /// Inverse-transpose of the upper 3x3 for transforming normals.
    pub fn to_normal_matrix(&self) -> Self {
        let mut out = Self::identity();
        self.to_normal_matrix_to_ref(&mut out);
        out
    }

    /// Writes the normal matrix into `result`.
    pub fn to_normal_matrix_to_ref<'a>(&self, result: &'a mut Self) -> &'a mut Self {
        let m = self.invert().transpose().data;
        result.write([
            m[0], m[1], m[2], 0.0, //
            m[4], m[5], m[6], 0.0, //
            m[8], m[9], m[10], 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Transforms a point (assumes `w = 1`, no perspective divide).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let m = &self.data;
        let (x, y, z) = (point.x(), point.y(), point.z());
        Vec3::new(
            x * m[0] + y * m[4] + z * m[8] + m[12],
            x * m[1] + y * m[5] + z * m[9] + m[13],
            x * m[2] + y * m[6] + z * m[10] + m[14],
        )
    }

    /// Transforms a direction vector (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        direction.transform_normal(self)
    }

    /// Transforms a point with perspective divide by the resulting `w`.
    pub fn transform_coordinates(&self, point: &Vec3) -> Vec3 {
        point.transform_coordinates(self)
    }
}

/// `out = a then b` for row-vector matrices.
fn multiply_arrays(a: &[f32; 16], b: &[f32; 16]) -> [f32; 16] {
    let mut out = [0.0; 16];
    for row in 0..4 {
        for col in 0..4 {
            out[row * 4 + col] = a[row * 4] * b[col]
                + a[row * 4 + 1] * b[4 + col]
                + a[row * 4 + 2] * b[8 + col]
                + a[row * 4 + 3] * b[12 + col];
        }
    }
    out
}

/// 2x2 minors of the lower rows shared by `determinant` and `inverse`.
struct Cofactors<'a> {
    m: &'a [f32; 16],
    det_22_33: f32,
    det_21_33: f32,
    det_21_32: f32,
    det_20_33: f32,
    det_20_32: f32,
    det_20_31: f32,
    cofact_00: f32,
    cofact_01: f32,
    cofact_02: f32,
    cofact_03: f32,
}

impl<'a> Cofactors<'a> {
    fn new(m: &'a [f32; 16]) -> Self {
        let (m10, m11, m12, m13) = (m[4], m[5], m[6], m[7]);
        let (m20, m21, m22, m23) = (m[8], m[9], m[10], m[11]);
        let (m30, m31, m32, m33) = (m[12], m[13], m[14], m[15]);

        let det_22_33 = m22 * m33 - m32 * m23;
        let det_21_33 = m21 * m33 - m31 * m23;
        let det_21_32 = m21 * m32 - m31 * m22;
        let det_20_33 = m20 * m33 - m30 * m23;
        let det_20_32 = m20 * m32 - m22 * m30;
        let det_20_31 = m20 * m31 - m30 * m21;

        Self {
            m,
            det_22_33,
            det_21_33,
            det_21_32,
            det_20_33,
            det_20_32,
            det_20_31,
            cofact_00: m11 * det_22_33 - m12 * det_21_33 + m13 * det_21_32,
            cofact_01: -(m10 * det_22_33 - m12 * det_20_33 + m13 * det_20_32),
            cofact_02: m10 * det_21_33 - m11 * det_20_33 + m13 * det_20_31,
            cofact_03: -(m10 * det_21_32 - m11 * det_20_32 + m12 * det_20_31),
        }
    }

    fn determinant(&self) -> f32 {
        let m = self.m;
        m[0] * self.cofact_00 + m[1] * self.cofact_01 + m[2] * self.cofact_02 + m[3] * self.cofact_03
    }

    /// Adjugate divided by the determinant; `None` when the determinant is zero.
    fn inverse(&self) -> Option<[f32; 16]> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        let det_inv = 1.0 / det;
        let m = self.m;
        let (m00, m01, m02, m03) = (m[0], m[1], m[2], m[3]);
        let (m10, m11, m12, m13) = (m[4], m[5], m[6], m[7]);
        let (m20, m21, m22, m23) = (m[8], m[9], m[10], m[11]);
        let (m30, m31, m32, m33) = (m[12], m[13], m[14], m[15]);
        let (det_22_33, det_21_33, det_21_32) = (self.det_22_33, self.det_21_33, self.det_21_32);
        let (det_20_33, det_20_32, det_20_31) = (self.det_20_33, self.det_20_32, self.det_20_31);

        let det_12_33 = m12 * m33 - m32 * m13;
        let det_11_33 = m11 * m33 - m31 * m13;
        let det_11_32 = m11 * m32 - m31 * m12;
        let det_10_33 = m10 * m33 - m30 * m13;
        let det_10_32 = m10 * m32 - m30 * m12;
        let det_10_31 = m10 * m31 - m30 * m11;
        let det_12_23 = m12 * m23 - m22 * m13;
        let det_11_23 = m11 * m23 - m21 * m13;
        let det_11_22 = m11 * m22 - m21 * m12;
        let det_10_23 = m10 * m23 - m20 * m13;
        let det_10_22 = m10 * m22 - m20 * m12;
        let det_10_21 = m10 * m21 - m20 * m11;

        let cofact_10 = -(m01 * det_22_33 - m02 * det_21_33 + m03 * det_21_32);
        let cofact_11 = m00 * det_22_33 - m02 * det_20_33 + m03 * det_20_32;
        let cofact_12 = -(m00 * det_21_33 - m01 * det_20_33 + m03 * det_20_31);
        let cofact_13 = m00 * det_21_32 - m01 * det_20_32 + m02 * det_20_31;

        let cofact_20 = m01 * det_12_33 - m02 * det_11_33 + m03 * det_11_32;
        let cofact_21 = -(m00 * det_12_33 - m02 * det_10_33 + m03 * det_10_32);
        let cofact_22 = m00 * det_11_33 - m01 * det_10_33 + m03 * det_10_31;
        let cofact_23 = -(m00 * det_11_32 - m01 * det_10_32 + m02 * det_10_31);

        let cofact_30 = -(m01 * det_12_23 - m02 * det_11_23 + m03 * det_11_22);
        let cofact_31 = m00 * det_12_23 - m02 * det_10_23 + m03 * det_10_22;
        let cofact_32 = -(m00 * det_11_23 - m01 * det_10_23 + m03 * det_10_21);
        let cofact_33 = m00 * det_11_22 - m01 * det_10_22 + m02 * det_10_21;

        Some([
            self.cofact_00 * det_inv,
            cofact_10 * det_inv,
            cofact_20 * det_inv,
            cofact_30 * det_inv,
            self.cofact_01 * det_inv,
            cofact_11 * det_inv,
            cofact_21 * det_inv,
            cofact_31 * det_inv,
            self.cofact_02 * det_inv,
            cofact_12 * det_inv,
            cofact_22 * det_inv,
            cofact_32 * det_inv,
            self.cofact_03 * det_inv,
            cofact_13 * det_inv,
            cofact_23 * det_inv,
            cofact_33 * det_inv,
        ])
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Mat4 {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self::new(value)
    }
}

impl From<Mat4> for [f32; 16] {
    fn from(value: Mat4) -> Self {
        value.data
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl core::ops::Mul<&Mat4> for &Mat4 {
    type Output = Mat4;
    fn mul(self, rhs: &Mat4) -> Mat4 {
        self.multiply(rhs)
    }
}

impl core::ops::MulAssign<&Mat4> for Mat4 {
    fn mul_assign(&mut self, rhs: &Mat4) {
        self.multiply_in_place(rhs);
    }
}
