// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Pre-allocated temporaries for allocation-free per-frame code.
//!
//! A [`ScratchPool`] is an ordinary value: callers that want scratch space
//! take `&mut ScratchPool`, so the borrow checker keeps two call graphs from
//! sharing a slot. [`with_scratch`] lends a per-thread pool for entry points
//! that cannot thread one through; a nested request while it is lent out
//! fails with [`MathError::ScratchPoolBusy`].
//!
//! A slot's contents are only meaningful inside the call that wrote it.

use std::cell::RefCell;

use crate::error::MathError;
use crate::{Mat4, Quat, Vec2, Vec3, Vec4};

/// Number of [`Vec2`] slots.
pub const VEC2_SLOTS: usize = 3;
/// Number of [`Vec3`] slots.
pub const VEC3_SLOTS: usize = 13;
/// Number of [`Vec4`] slots.
pub const VEC4_SLOTS: usize = 3;
/// Number of [`Quat`] slots.
pub const QUAT_SLOTS: usize = 2;
/// Number of [`Mat4`] slots.
pub const MAT4_SLOTS: usize = 8;

/// Fixed set of reusable math temporaries.
#[derive(Debug, Clone)]
pub struct ScratchPool {
    /// 2D vector slots.
    pub vec2: [Vec2; VEC2_SLOTS],
    /// 3D vector slots.
    pub vec3: [Vec3; VEC3_SLOTS],
    /// 4D vector slots.
    pub vec4: [Vec4; VEC4_SLOTS],
    /// Quaternion slots.
    pub quat: [Quat; QUAT_SLOTS],
    /// Matrix slots.
    pub mat4: [Mat4; MAT4_SLOTS],
}

impl ScratchPool {
    /// Creates a pool with zero vectors, identity quaternions and identity matrices.
    pub fn new() -> Self {
        Self {
            vec2: [Vec2::ZERO; VEC2_SLOTS],
            vec3: [Vec3::ZERO; VEC3_SLOTS],
            vec4: [Vec4::ZERO; VEC4_SLOTS],
            quat: [Quat::IDENTITY; QUAT_SLOTS],
            mat4: core::array::from_fn(|_| Mat4::identity()),
        }
    }
}

impl Default for ScratchPool {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static THREAD_POOL: RefCell<ScratchPool> = RefCell::new(ScratchPool::new());
}

/// Runs `f` with this thread's scratch pool.
///
/// Returns [`MathError::ScratchPoolBusy`] when called from inside another
/// `with_scratch` closure on the same thread.
///
/// ```
/// use echo_math::{scratch::with_scratch, MathError, Vec3};
/// let len = with_scratch(|pool| {
///     pool.vec3[0].set(3.0, 4.0, 0.0);
///     pool.vec3[0].length()
/// })
/// .unwrap();
/// assert_eq!(len, 5.0);
///
/// let nested = with_scratch(|_| with_scratch(|_| ())).unwrap();
/// assert!(matches!(nested, Err(MathError::ScratchPoolBusy)));
/// ```
pub fn with_scratch<R>(f: impl FnOnce(&mut ScratchPool) -> R) -> Result<R, MathError> {
    THREAD_POOL.with(|cell| {
        let mut pool = cell
            .try_borrow_mut()
            .map_err(|_| MathError::ScratchPoolBusy)?;
        Ok(f(&mut pool))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_released_after_use() {
        assert!(with_scratch(|pool| pool.mat4[0].is_identity()).unwrap());
        assert!(with_scratch(|_| ()).is_ok());
    }

    #[test]
    fn fresh_pool_has_documented_slot_counts() {
        let pool = ScratchPool::new();
        assert_eq!(pool.vec2.len(), 3);
        assert_eq!(pool.vec3.len(), 13);
        assert_eq!(pool.vec4.len(), 3);
        assert_eq!(pool.quat.len(), 2);
        assert_eq!(pool.mat4.len(), 8);
    }
}
