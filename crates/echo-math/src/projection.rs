// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! View and projection matrix constructors plus their configuration surface.
//!
//! Left-handed constructors look down +Z, right-handed ones down -Z. All
//! projections map into NDC depth `[-1, 1]` unless
//! [`ProjectionOptions::half_z_range`] asks for `[0, 1]`, which post-multiplies
//! the fixed depth remap below.

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::{Mat4, Vec3};

/// `[-1, 1] -> [0, 1]` depth remap applied for half-Z-range projections.
const HALF_Z_REMAP: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 0.5, 0.0, //
    0.0, 0.0, 0.5, 1.0,
];

/// Screen-space rectangle used by [`Vec3::project`] and [`Vec3::unproject`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Coordinate-system convention for view and projection constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    /// +Z points into the screen.
    #[default]
    Left,
    /// -Z points into the screen.
    Right,
}

/// Engine-level knobs honoured by the projection constructors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Map depth into `[0, 1]` instead of `[-1, 1]`.
    pub half_z_range: bool,
    /// Reverse depth buffer (near = 1, far = 0). Only affects perspective-fov
    /// constructors with `znear == 0`, where it yields an infinite far plane.
    pub reverse_depth: bool,
    /// Keep the vertical field of view fixed and derive the horizontal one
    /// from the aspect ratio.
    pub vertical_fov_fixed: bool,
    /// Tilt of the projection plane in radians.
    pub projection_plane_tilt: f32,
}

impl Default for ProjectionOptions {
    fn default() -> Self {
        Self {
            half_z_range: false,
            reverse_depth: false,
            vertical_fov_fixed: true,
            projection_plane_tilt: 0.0,
        }
    }
}

impl ProjectionOptions {
    /// Parses options from JSON; missing fields take their defaults.
    ///
    /// ```
    /// use echo_math::ProjectionOptions;
    /// let opts = ProjectionOptions::from_json_str(r#"{ "half_z_range": true }"#).unwrap();
    /// assert!(opts.half_z_range);
    /// assert!(opts.vertical_fov_fixed);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, MathError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serializable projection description, turned into a matrix with
/// [`Projection::to_mat4`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Projection {
    /// Perspective from a field of view.
    PerspectiveFov {
        /// Field of view in radians (vertical unless configured otherwise).
        fov: f32,
        /// Width / height.
        aspect: f32,
        /// Near plane distance.
        znear: f32,
        /// Far plane distance; 0 means infinite.
        zfar: f32,
    },
    /// Perspective from the near-plane size.
    Perspective {
        /// Near-plane width.
        width: f32,
        /// Near-plane height.
        height: f32,
        /// Near plane distance.
        znear: f32,
        /// Far plane distance.
        zfar: f32,
    },
    /// Centered orthographic box.
    Orthographic {
        /// Box width.
        width: f32,
        /// Box height.
        height: f32,
        /// Near plane distance.
        znear: f32,
        /// Far plane distance.
        zfar: f32,
    },
    /// Orthographic box with explicit bounds.
    OrthographicOffCenter {
        /// Left bound.
        left: f32,
        /// Right bound.
        right: f32,
        /// Bottom bound.
        bottom: f32,
        /// Top bound.
        top: f32,
        /// Near plane distance.
        znear: f32,
        /// Far plane distance.
        zfar: f32,
    },
    /// Orthographic box sheared for oblique (cabinet/cavalier) views.
    ObliqueOffCenter {
        /// Left bound.
        left: f32,
        /// Right bound.
        right: f32,
        /// Bottom bound.
        bottom: f32,
        /// Top bound.
        top: f32,
        /// Near plane distance.
        znear: f32,
        /// Far plane distance.
        zfar: f32,
        /// Shear length.
        length: f32,
        /// Shear angle in radians.
        angle: f32,
        /// Depth at which the shear is zero.
        distance: f32,
    },
}

impl Projection {
    /// Builds the matrix for this projection.
    pub fn to_mat4(&self, handedness: Handedness, options: &ProjectionOptions) -> Mat4 {
        let right = handedness == Handedness::Right;
        match *self {
            Self::PerspectiveFov {
                fov,
                aspect,
                znear,
                zfar,
            } => {
                if right {
                    Mat4::perspective_fov_rh(fov, aspect, znear, zfar, options)
                } else {
                    Mat4::perspective_fov_lh(fov, aspect, znear, zfar, options)
                }
            }
            Self::Perspective {
                width,
                height,
                znear,
                zfar,
            } => {
                if right {
                    Mat4::perspective_rh(width, height, znear, zfar, options)
                } else {
                    Mat4::perspective_lh(width, height, znear, zfar, options)
                }
            }
            Self::Orthographic {
                width,
                height,
                znear,
                zfar,
            } => {
                if right {
                    Mat4::ortho_rh(width, height, znear, zfar, options)
                } else {
                    Mat4::ortho_lh(width, height, znear, zfar, options)
                }
            }
            Self::OrthographicOffCenter {
                left,
                right: r,
                bottom,
                top,
                znear,
                zfar,
            } => {
                if right {
                    Mat4::ortho_off_center_rh(left, r, bottom, top, znear, zfar, options)
                } else {
                    Mat4::ortho_off_center_lh(left, r, bottom, top, znear, zfar, options)
                }
            }
            Self::ObliqueOffCenter {
                left,
                right: r,
                bottom,
                top,
                znear,
                zfar,
                length,
                angle,
                distance,
            } => {
                let mut out = Mat4::identity();
                oblique_off_center_to_ref(
                    [left, r, bottom, top, znear, zfar],
                    length,
                    angle,
                    distance,
                    handedness,
                    options,
                    &mut out,
                );
                out
            }
        }
    }

    /// Parses a projection descriptor from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, MathError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn apply_half_z(result: &mut Mat4, options: &ProjectionOptions) {
    if options.half_z_range {
        result.multiply_in_place(&Mat4::new(HALF_Z_REMAP));
    }
}

fn look_at_to_ref<'a>(x_axis: Vec3, z_axis: Vec3, eye: &Vec3, result: &'a mut Mat4) -> &'a mut Mat4 {
    let y_axis = z_axis.cross(&x_axis).normalize();
    let ex = -x_axis.dot(eye);
    let ey = -y_axis.dot(eye);
    let ez = -z_axis.dot(eye);
    result.write_with_identity_hint(
        [
            x_axis.x(),
            y_axis.x(),
            z_axis.x(),
            0.0,
            x_axis.y(),
            y_axis.y(),
            z_axis.y(),
            0.0,
            x_axis.z(),
            y_axis.z(),
            z_axis.z(),
            0.0,
            ex,
            ey,
            ez,
            1.0,
        ],
        None,
    )
}

fn side_axis(up: &Vec3, z_axis: &Vec3) -> Vec3 {
    let mut x_axis = up.cross(z_axis);
    let len_sq = x_axis.length_squared();
    if len_sq == 0.0 {
        x_axis.set_x(1.0);
    } else {
        x_axis.normalize_from_length(len_sq.sqrt());
    }
    x_axis
}

fn oblique_off_center_to_ref<'a>(
    [left, right, bottom, top, znear, zfar]: [f32; 6],
    length: f32,
    angle: f32,
    distance: f32,
    handedness: Handedness,
    options: &ProjectionOptions,
    result: &'a mut Mat4,
) -> &'a mut Mat4 {
    let sign = match handedness {
        Handedness::Left => -1.0,
        Handedness::Right => 1.0,
    };
    let a = sign * length * angle.cos();
    let b = sign * length * angle.sin();
    let shear = Mat4::new([
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        a, b, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ]);
    let skew = Mat4::translation(0.0, 0.0, -distance)
        .multiply(&shear)
        .multiply(&Mat4::translation(0.0, 0.0, distance));
    let ortho = match handedness {
        Handedness::Left => Mat4::ortho_off_center_lh(left, right, bottom, top, znear, zfar, options),
        Handedness::Right => {
            Mat4::ortho_off_center_rh(left, right, bottom, top, znear, zfar, options)
        }
    };
    skew.multiply_to_ref(&ortho, result)
}

impl Mat4 {
    /// Left-handed view matrix looking from `eye` at `target`.
    ///
    /// ```
    /// use echo_math::{Mat4, Vec3};
    /// let view = Mat4::look_at_lh(&Vec3::new(0.0, 0.0, -10.0), &Vec3::ZERO, &Vec3::UNIT_Y);
    /// assert_eq!(view.transform_coordinates(&Vec3::ZERO), Vec3::new(0.0, 0.0, 10.0));
    /// ```
    pub fn look_at_lh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        let mut out = Self::identity();
        Self::look_at_lh_to_ref(eye, target, up, &mut out);
        out
    }

    /// Writes the left-handed look-at matrix into `result`.
    pub fn look_at_lh_to_ref<'a>(
        eye: &Vec3,
        target: &Vec3,
        up: &Vec3,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let z_axis = target.subtract(eye).normalize();
        let x_axis = side_axis(up, &z_axis);
        look_at_to_ref(x_axis, z_axis, eye, result)
    }

    /// Right-handed view matrix looking from `eye` at `target`.
    pub fn look_at_rh(eye: &Vec3, target: &Vec3, up: &Vec3) -> Self {
        let mut out = Self::identity();
        Self::look_at_rh_to_ref(eye, target, up, &mut out);
        out
    }

    /// Writes the right-handed look-at matrix into `result`.
    pub fn look_at_rh_to_ref<'a>(
        eye: &Vec3,
        target: &Vec3,
        up: &Vec3,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let z_axis = eye.subtract(target).normalize();
        let x_axis = side_axis(up, &z_axis);
        look_at_to_ref(x_axis, z_axis, eye, result)
    }

    /// Left-handed orientation facing `forward` (object space, no translation).
    pub fn look_direction_lh(forward: &Vec3, up: &Vec3) -> Self {
        let mut out = Self::identity();
        Self::look_direction_lh_to_ref(forward, up, &mut out);
        out
    }

    /// Writes the left-handed orientation into `result`.
    pub fn look_direction_lh_to_ref<'a>(
        forward: &Vec3,
        up: &Vec3,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let back = forward.negate();
        let left = up.cross(&back);
        result.set_from_values([
            left.x(),
            left.y(),
            left.z(),
            0.0,
            up.x(),
            up.y(),
            up.z(),
            0.0,
            back.x(),
            back.y(),
            back.z(),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Right-handed orientation facing `forward` (object space, no translation).
    pub fn look_direction_rh(forward: &Vec3, up: &Vec3) -> Self {
        let mut out = Self::identity();
        Self::look_direction_rh_to_ref(forward, up, &mut out);
        out
    }

    /// Writes the right-handed orientation into `result`.
    pub fn look_direction_rh_to_ref<'a>(
        forward: &Vec3,
        up: &Vec3,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let right = up.cross(forward);
        result.set_from_values([
            right.x(),
            right.y(),
            right.z(),
            0.0,
            up.x(),
            up.y(),
            up.z(),
            0.0,
            forward.x(),
            forward.y(),
            forward.z(),
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    /// Left-handed orthographic projection centered on the view axis.
    pub fn ortho_lh(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::ortho_lh_to_ref(width, height, znear, zfar, options, &mut out);
        out
    }

    /// Writes the left-handed orthographic projection into `result`.
    pub fn ortho_lh_to_ref<'a>(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let a = 2.0 / width;
        let b = 2.0 / height;
        let c = 2.0 / (f - n);
        let d = -(f + n) / (f - n);
        let hint = (!options.half_z_range).then_some(a == 1.0 && b == 1.0 && c == 1.0 && d == 0.0);
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, 0.0, //
                0.0, 0.0, c, 0.0, //
                0.0, 0.0, d, 1.0,
            ],
            hint,
        );
        apply_half_z(result, options);
        result
    }

    /// Right-handed orthographic projection centered on the view axis.
    pub fn ortho_rh(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::ortho_rh_to_ref(width, height, znear, zfar, options, &mut out);
        out
    }

    /// Writes the right-handed orthographic projection into `result`.
    pub fn ortho_rh_to_ref<'a>(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        Self::ortho_off_center_rh_to_ref(-hw, hw, -hh, hh, znear, zfar, options, result)
    }

    /// Left-handed orthographic projection with explicit bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho_off_center_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::ortho_off_center_lh_to_ref(left, right, bottom, top, znear, zfar, options, &mut out);
        out
    }

    /// Writes the left-handed off-center orthographic projection into `result`.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho_off_center_lh_to_ref<'a>(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let a = 2.0 / (right - left);
        let b = 2.0 / (top - bottom);
        let c = 2.0 / (f - n);
        let d = -(f + n) / (f - n);
        let i0 = (left + right) / (left - right);
        let i1 = (top + bottom) / (bottom - top);
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, 0.0, //
                0.0, 0.0, c, 0.0, //
                i0, i1, d, 1.0,
            ],
            None,
        );
        apply_half_z(result, options);
        result
    }

    /// Right-handed orthographic projection with explicit bounds.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho_off_center_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::ortho_off_center_rh_to_ref(left, right, bottom, top, znear, zfar, options, &mut out);
        out
    }

    /// Writes the right-handed off-center orthographic projection into `result`.
    ///
    /// Same as the left-handed form with the depth axis flipped.
    #[allow(clippy::too_many_arguments)]
    pub fn ortho_off_center_rh_to_ref<'a>(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        Self::ortho_off_center_lh_to_ref(left, right, bottom, top, znear, zfar, options, result);
        let mut data = result.to_array();
        data[10] *= -1.0;
        result.set_from_values(data)
    }

    /// Left-handed oblique projection: the off-center ortho box sheared by
    /// `length` along `angle`, pivoting at depth `distance`.
    #[allow(clippy::too_many_arguments)]
    pub fn oblique_off_center_lh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        length: f32,
        angle: f32,
        distance: f32,
        options: &ProjectionOptions,
    ) -> Self {
        Projection::ObliqueOffCenter {
            left,
            right,
            bottom,
            top,
            znear,
            zfar,
            length,
            angle,
            distance,
        }
        .to_mat4(Handedness::Left, options)
    }

    /// Writes the left-handed oblique projection into `result`.
    #[allow(clippy::too_many_arguments)]
    pub fn oblique_off_center_lh_to_ref<'a>(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        length: f32,
        angle: f32,
        distance: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        oblique_off_center_to_ref(
            [left, right, bottom, top, znear, zfar],
            length,
            angle,
            distance,
            Handedness::Left,
            options,
            result,
        )
    }

    /// Right-handed oblique projection.
    #[allow(clippy::too_many_arguments)]
    pub fn oblique_off_center_rh(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        length: f32,
        angle: f32,
        distance: f32,
        options: &ProjectionOptions,
    ) -> Self {
        Projection::ObliqueOffCenter {
            left,
            right,
            bottom,
            top,
            znear,
            zfar,
            length,
            angle,
            distance,
        }
        .to_mat4(Handedness::Right, options)
    }

    /// Writes the right-handed oblique projection into `result`.
    #[allow(clippy::too_many_arguments)]
    pub fn oblique_off_center_rh_to_ref<'a>(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        znear: f32,
        zfar: f32,
        length: f32,
        angle: f32,
        distance: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        oblique_off_center_to_ref(
            [left, right, bottom, top, znear, zfar],
            length,
            angle,
            distance,
            Handedness::Right,
            options,
            result,
        )
    }

    /// Left-handed perspective from the near-plane size.
    pub fn perspective_lh(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::perspective_lh_to_ref(width, height, znear, zfar, options, &mut out);
        out
    }

    /// Writes the left-handed perspective into `result`.
    pub fn perspective_lh_to_ref<'a>(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let a = 2.0 * n / width;
        let b = 2.0 * n / height;
        let c = (f + n) / (f - n);
        let d = -2.0 * f * n / (f - n);
        let rot = options.projection_plane_tilt.tan();
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, rot, //
                0.0, 0.0, c, 1.0, //
                0.0, 0.0, d, 0.0,
            ],
            Some(false),
        );
        apply_half_z(result, options);
        result
    }

    /// Right-handed perspective from the near-plane size.
    pub fn perspective_rh(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::perspective_rh_to_ref(width, height, znear, zfar, options, &mut out);
        out
    }

    /// Writes the right-handed perspective into `result`.
    pub fn perspective_rh_to_ref<'a>(
        width: f32,
        height: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let a = 2.0 * n / width;
        let b = 2.0 * n / height;
        let c = -(f + n) / (f - n);
        let d = -2.0 * f * n / (f - n);
        let rot = options.projection_plane_tilt.tan();
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, -rot, //
                0.0, 0.0, c, -1.0, //
                0.0, 0.0, d, 0.0,
            ],
            Some(false),
        );
        apply_half_z(result, options);
        result
    }

    /// Left-handed perspective from a field of view.
    ///
    /// A `zfar` of 0 produces an infinite far plane.
    ///
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use echo_math::{Mat4, ProjectionOptions, Vec3};
    /// let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 1.0, 100.0, &ProjectionOptions::default());
    /// let ndc = proj.transform_coordinates(&Vec3::new(0.0, 0.0, 1.0));
    /// assert!((ndc.z() + 1.0).abs() < 1e-5);
    /// ```
    pub fn perspective_fov_lh(
        fov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::perspective_fov_lh_to_ref(fov, aspect, znear, zfar, options, &mut out);
        out
    }

    /// Writes the left-handed field-of-view perspective into `result`.
    pub fn perspective_fov_lh_to_ref<'a>(
        fov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let (a, b) = fov_scales(fov, aspect, options);
        let infinite_reverse = options.reverse_depth && n == 0.0;
        let c = if infinite_reverse {
            -1.0
        } else if f != 0.0 {
            (f + n) / (f - n)
        } else {
            1.0
        };
        let d = if infinite_reverse {
            2.0 * f
        } else if f != 0.0 {
            -2.0 * f * n / (f - n)
        } else {
            -2.0 * n
        };
        let rot = options.projection_plane_tilt.tan();
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, rot, //
                0.0, 0.0, c, 1.0, //
                0.0, 0.0, d, 0.0,
            ],
            Some(false),
        );
        apply_half_z(result, options);
        result
    }

    /// Right-handed perspective from a field of view.
    pub fn perspective_fov_rh(
        fov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
    ) -> Self {
        let mut out = Self::identity();
        Self::perspective_fov_rh_to_ref(fov, aspect, znear, zfar, options, &mut out);
        out
    }

    /// Writes the right-handed field-of-view perspective into `result`.
    pub fn perspective_fov_rh_to_ref<'a>(
        fov: f32,
        aspect: f32,
        znear: f32,
        zfar: f32,
        options: &ProjectionOptions,
        result: &'a mut Self,
    ) -> &'a mut Self {
        let (n, f) = (znear, zfar);
        let (a, b) = fov_scales(fov, aspect, options);
        let infinite_reverse = options.reverse_depth && n == 0.0;
        let c = if infinite_reverse {
            1.0
        } else if f != 0.0 {
            -(f + n) / (f - n)
        } else {
            -1.0
        };
        let d = if infinite_reverse {
            2.0 * f
        } else if f != 0.0 {
            -2.0 * f * n / (f - n)
        } else {
            -2.0 * n
        };
        let rot = options.projection_plane_tilt.tan();
        result.write_with_identity_hint(
            [
                a, 0.0, 0.0, 0.0, //
                0.0, b, 0.0, -rot, //
                0.0, 0.0, c, -1.0, //
                0.0, 0.0, d, 0.0,
            ],
            Some(false),
        );
        apply_half_z(result, options);
        result
    }
}

fn fov_scales(fov: f32, aspect: f32, options: &ProjectionOptions) -> (f32, f32) {
    let t = 1.0 / (fov * 0.5).tan();
    if options.vertical_fov_fixed {
        (t / aspect, t)
    } else {
        (t, t * aspect)
    }
}
