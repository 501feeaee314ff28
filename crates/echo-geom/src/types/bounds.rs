// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use echo_math::{Mat4, Vec3, EPSILON};
use tracing::trace;

/// Axis-aligned box in local space with cached world-space extents.
///
/// The world extents bound the eight local corners after transformation by
/// the world matrix. They are recomputed by [`BoundingBox::world_extents`]
/// only when a local corner reports itself dirty or the matrix carries a
/// different [`Mat4::update_flag`] than the one last seen.
///
/// Until the first update the world extents equal the local ones.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    minimum: Vec3,
    maximum: Vec3,
    minimum_world: Vec3,
    maximum_world: Vec3,
    world_update_flag: Option<u64>,
}

impl BoundingBox {
    /// Creates a box from its local corners.
    ///
    /// The corners are taken as given; use [`BoundingBox::from_points`] when
    /// their ordering is not known.
    #[must_use]
    pub fn new(minimum: Vec3, maximum: Vec3) -> Self {
        Self {
            minimum,
            maximum,
            minimum_world: minimum,
            maximum_world: maximum,
            world_update_flag: None,
        }
    }

    /// Builds the smallest box containing all `points`.
    ///
    /// Returns `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min.minimize_in_place(p);
            max.maximize_in_place(p);
        }
        Some(Self::new(min, max))
    }

    /// Local minimum corner.
    #[must_use]
    pub fn minimum(&self) -> Vec3 {
        self.minimum
    }

    /// Local maximum corner.
    #[must_use]
    pub fn maximum(&self) -> Vec3 {
        self.maximum
    }

    /// Mutable access to the local minimum corner.
    ///
    /// Any mutation through [`Vec3`]'s setters marks it dirty, so the next
    /// [`BoundingBox::world_extents`] call rebuilds the cache.
    pub fn minimum_mut(&mut self) -> &mut Vec3 {
        &mut self.minimum
    }

    /// Mutable access to the local maximum corner.
    pub fn maximum_mut(&mut self) -> &mut Vec3 {
        &mut self.maximum
    }

    /// Replaces the local minimum corner.
    pub fn set_minimum(&mut self, minimum: &Vec3) -> &mut Self {
        self.minimum.copy_from(minimum);
        self
    }

    /// Replaces the local maximum corner.
    pub fn set_maximum(&mut self, maximum: &Vec3) -> &mut Self {
        self.maximum.copy_from(maximum);
        self
    }

    /// Local center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.minimum.center(&self.maximum)
    }

    /// Local half-size along each axis.
    #[must_use]
    pub fn extend_size(&self) -> Vec3 {
        self.maximum.subtract(&self.minimum).scale(0.5)
    }

    /// Cached world minimum corner from the last update.
    #[must_use]
    pub fn minimum_world(&self) -> Vec3 {
        self.minimum_world
    }

    /// Cached world maximum corner from the last update.
    #[must_use]
    pub fn maximum_world(&self) -> Vec3 {
        self.maximum_world
    }

    /// World center from the last update.
    #[must_use]
    pub fn center_world(&self) -> Vec3 {
        self.minimum_world.center(&self.maximum_world)
    }

    /// World half-size from the last update.
    #[must_use]
    pub fn extend_size_world(&self) -> Vec3 {
        self.maximum_world.subtract(&self.minimum_world).scale(0.5)
    }

    /// Update flag of the matrix the cached extents were built from.
    #[must_use]
    pub fn world_update_flag(&self) -> Option<u64> {
        self.world_update_flag
    }

    /// Returns `(minimum_world, maximum_world)` under `world`, rebuilding the
    /// cache only when the local corners or the matrix changed.
    pub fn world_extents(&mut self, world: &Mat4) -> (Vec3, Vec3) {
        // Both flags must be consumed; `|` keeps the second call from being skipped.
        let corners_dirty = self.minimum.take_dirty() | self.maximum.take_dirty();
        let flag = world.update_flag();
        if corners_dirty || self.world_update_flag != Some(flag) {
            self.recompute(world);
            self.world_update_flag = Some(flag);
            trace!(
                update_flag = flag,
                corners_dirty,
                minimum_world = ?self.minimum_world.to_array(),
                maximum_world = ?self.maximum_world.to_array(),
                "recomputed bounding box world extents"
            );
        }
        (self.minimum_world, self.maximum_world)
    }

    fn recompute(&mut self, world: &Mat4) {
        let [minx, miny, minz] = self.minimum.to_array();
        let [maxx, maxy, maxz] = self.maximum.to_array();
        let corners = [
            Vec3::new(minx, miny, minz),
            Vec3::new(minx, miny, maxz),
            Vec3::new(minx, maxy, minz),
            Vec3::new(minx, maxy, maxz),
            Vec3::new(maxx, miny, minz),
            Vec3::new(maxx, miny, maxz),
            Vec3::new(maxx, maxy, minz),
            Vec3::new(maxx, maxy, maxz),
        ];
        let mut min = Vec3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max = Vec3::new(-f32::MAX, -f32::MAX, -f32::MAX);
        let mut p = Vec3::ZERO;
        for corner in &corners {
            corner.transform_coordinates_to_ref(world, &mut p);
            min.minimize_in_place(&p);
            max.maximize_in_place(&p);
        }
        self.minimum_world = min;
        self.maximum_world = max;
    }

    /// `true` when `point` lies inside the cached world extents (faces
    /// included, with [`EPSILON`] slack).
    #[must_use]
    pub fn intersects_point(&self, point: &Vec3) -> bool {
        let p = point.to_array();
        let min = self.minimum_world.to_array();
        let max = self.maximum_world.to_array();
        (0..3).all(|i| p[i] >= min[i] - EPSILON && p[i] <= max[i] + EPSILON)
    }

    /// `true` when the cached world extents of both boxes overlap (touching
    /// faces count as overlap).
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let a_min = self.minimum_world.to_array();
        let a_max = self.maximum_world.to_array();
        let b_min = other.minimum_world.to_array();
        let b_max = other.maximum_world.to_array();
        (0..3).all(|i| a_max[i] >= b_min[i] && a_min[i] <= b_max[i])
    }
}
