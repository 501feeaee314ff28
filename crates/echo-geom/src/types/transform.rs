// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use echo_math::{Mat4, Quat, ScratchPool, Vec3};
use tracing::warn;

/// Local placement of a scene node, stored as separate scale, rotation and
/// translation so animation can blend each channel on its own.
///
/// The matrix form is `S` then `R` then `T` in application order, built by
/// [`Mat4::compose`]. A node's world matrix is its local matrix followed by
/// the parent's world matrix ([`Transform::world_matrix_to_ref`]). The
/// rotation is renormalized whenever a matrix is built; the stored value is
/// left as given.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Transform {
    /// Placement that leaves every point where it is.
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE);

    /// Returns [`Transform::IDENTITY`].
    #[must_use]
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Places a node at `translation`, oriented by `rotation` and stretched
    /// by `scale` along its local axes.
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    /// Offset of the local origin inside the parent space.
    #[must_use]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    /// Orientation, possibly not unit length.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Per-axis stretch; a zero component makes the matrix non-invertible.
    #[must_use]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Moves the local origin.
    pub fn set_translation(&mut self, translation: Vec3) -> &mut Self {
        self.translation = translation;
        self
    }

    /// Reorients the node.
    pub fn set_rotation(&mut self, rotation: Quat) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Restretches the node.
    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    /// Local matrix of this transform.
    ///
    /// ```
    /// use echo_geom::Transform;
    /// use echo_math::{Quat, Vec3};
    /// let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::identity(), Vec3::new(2.0, 2.0, 2.0));
    /// let p = t.to_mat4().transform_point(&Vec3::ONE);
    /// assert_eq!(p, Vec3::new(3.0, 4.0, 5.0));
    /// ```
    #[must_use]
    pub fn to_mat4(&self) -> Mat4 {
        let mut out = Mat4::identity();
        self.to_mat4_to_ref(&mut out);
        out
    }

    /// Writes the local matrix into `result`.
    pub fn to_mat4_to_ref<'a>(&self, result: &'a mut Mat4) -> &'a mut Mat4 {
        Mat4::compose_to_ref(
            &self.scale,
            &self.rotation.normalize(),
            &self.translation,
            result,
        )
    }

    /// Splits `matrix` back into scale, rotation and translation.
    ///
    /// Returns `None` (and logs a warning) when an axis has zero scale, since
    /// no rotation can be recovered from a collapsed basis.
    #[must_use]
    pub fn from_mat4(matrix: &Mat4) -> Option<Self> {
        let mut scale = Vec3::ONE;
        let mut rotation = Quat::IDENTITY;
        let mut translation = Vec3::ZERO;
        if matrix.decompose_to_ref(&mut scale, &mut rotation, &mut translation, None) {
            Some(Self::new(translation, rotation, scale))
        } else {
            warn!(
                scale = ?scale.to_array(),
                update_flag = matrix.update_flag(),
                "matrix has a zero-scale axis; cannot decompose into a transform"
            );
            None
        }
    }

    /// Interpolates towards `end`: linear on translation and scale,
    /// spherical on rotation.
    #[must_use]
    pub fn lerp(&self, end: &Self, amount: f32) -> Self {
        Self {
            translation: self.translation.lerp(&end.translation, amount),
            rotation: Quat::slerp(&self.rotation, &end.rotation, amount),
            scale: self.scale.lerp(&end.scale, amount),
        }
    }

    /// Writes the world matrix (`local` then `parent`) into `out`.
    ///
    /// The local matrix is built in `scratch.mat4[0]`, so the call allocates
    /// nothing. Without a parent the local matrix is the world matrix.
    pub fn world_matrix_to_ref<'a>(
        &self,
        parent: Option<&Mat4>,
        scratch: &mut ScratchPool,
        out: &'a mut Mat4,
    ) -> &'a mut Mat4 {
        let local = &mut scratch.mat4[0];
        self.to_mat4_to_ref(local);
        match parent {
            Some(parent) => local.multiply_to_ref(parent, out),
            None => out.copy_from(local),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Transform> for Mat4 {
    fn from(value: Transform) -> Self {
        value.to_mat4()
    }
}
