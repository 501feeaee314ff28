// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Integration tests for echo-geom transforms and cached bounding boxes.

use std::io;
use std::sync::{Arc, Mutex};

use core::f32::consts::FRAC_PI_4;
use echo_geom::{BoundingBox, Transform};
use echo_math::{Mat4, Quat, ScratchPool, Vec3};

const EPS: f32 = 1e-4;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    fn count(&self, needle: &str) -> usize {
        self.text().matches(needle).count()
    }
}

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut inner) = self.0.lock() {
            inner.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a thread-local subscriber that records every event.
fn captured<R>(f: impl FnOnce() -> R) -> (R, Capture) {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, capture)
}

fn assert_vec3_close(actual: Vec3, expected: [f32; 3]) {
    let a = actual.to_array();
    for i in 0..3 {
        assert!(
            (a[i] - expected[i]).abs() <= EPS,
            "component {i}: {a:?} vs {expected:?}"
        );
    }
}

const RECOMPUTED: &str = "recomputed bounding box world extents";

#[test]
fn transform_default_is_identity_matrix() {
    assert!(Transform::default().to_mat4().is_identity());
    assert_eq!(Transform::default(), Transform::identity());
    assert_eq!(Transform::IDENTITY.scale(), Vec3::ONE);
}

#[test]
fn transform_applies_scale_then_rotation_then_translation() {
    let t = Transform::new(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_axis_angle(&Vec3::UNIT_Z, core::f32::consts::FRAC_PI_2),
        Vec3::new(2.0, 1.0, 1.0),
    );
    // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (10,2,0)
    let p = t.to_mat4().transform_point(&Vec3::UNIT_X);
    assert_vec3_close(p, [10.0, 2.0, 0.0]);
    let m: Mat4 = t.into();
    assert_eq!(m, t.to_mat4());
}

#[test]
fn transform_normalizes_drifted_rotation() {
    let drifted = Quat::new(0.0, 0.0, 0.0, 2.0);
    let t = Transform::new(Vec3::ZERO, drifted, Vec3::ONE);
    assert!(t.to_mat4().is_identity());
}

#[test]
fn transform_round_trips_through_matrix() {
    let t = Transform::new(
        Vec3::new(1.0, -2.0, 3.5),
        Quat::from_axis_angle(&Vec3::new(1.0, 1.0, 0.0).normalize(), 0.7),
        Vec3::new(1.5, 2.0, 0.5),
    );
    let back = Transform::from_mat4(&t.to_mat4()).expect("non-degenerate matrix");
    assert_vec3_close(back.translation(), t.translation().to_array());
    assert_vec3_close(back.scale(), t.scale().to_array());
    let (a, b) = (back.rotation().to_array(), t.rotation().to_array());
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    assert!((dot.abs() - 1.0).abs() <= EPS, "rotation mismatch {a:?} vs {b:?}");
}

#[test]
fn transform_from_zero_scale_matrix_warns_and_returns_none() {
    let m = Mat4::scaling(1.0, 0.0, 1.0);
    let (out, logs) = captured(|| Transform::from_mat4(&m));
    assert!(out.is_none());
    let text = logs.text();
    assert!(text.contains("WARN"), "expected a warning, got: {text}");
    assert!(text.contains("zero-scale axis"), "got: {text}");
}

#[test]
fn transform_lerp_hits_endpoints_and_midpoint() {
    let a = Transform::identity();
    let b = Transform::new(
        Vec3::new(4.0, 0.0, 0.0),
        Quat::from_axis_angle(&Vec3::UNIT_Y, 1.0),
        Vec3::new(3.0, 3.0, 3.0),
    );
    assert_eq!(a.lerp(&b, 0.0).translation(), a.translation());
    assert_vec3_close(a.lerp(&b, 1.0).scale(), [3.0, 3.0, 3.0]);
    let mid = a.lerp(&b, 0.5);
    assert_vec3_close(mid.translation(), [2.0, 0.0, 0.0]);
    assert_vec3_close(mid.scale(), [2.0, 2.0, 2.0]);
    let half = Quat::from_axis_angle(&Vec3::UNIT_Y, 0.5).to_array();
    let got = mid.rotation().to_array();
    for i in 0..4 {
        assert!((got[i] - half[i]).abs() <= EPS, "{got:?} vs {half:?}");
    }
}

#[test]
fn world_matrix_without_parent_is_local_matrix() {
    let t = Transform::new(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, Vec3::ONE);
    let mut scratch = ScratchPool::new();
    let mut world = Mat4::zero();
    t.world_matrix_to_ref(None, &mut scratch, &mut world);
    assert_eq!(world, t.to_mat4());
}

#[test]
fn world_matrix_applies_local_then_parent() {
    let child = Transform::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ONE);
    let parent = Transform::new(
        Vec3::new(0.0, 5.0, 0.0),
        Quat::IDENTITY,
        Vec3::new(2.0, 2.0, 2.0),
    )
    .to_mat4();
    let mut scratch = ScratchPool::new();
    let mut world = Mat4::identity();
    child.world_matrix_to_ref(Some(&parent), &mut scratch, &mut world);
    // origin -> child (1,0,0) -> parent scale (2,0,0) -> parent translate (2,5,0)
    assert_vec3_close(world.transform_point(&Vec3::ZERO), [2.0, 5.0, 0.0]);
    assert_eq!(world, child.to_mat4().multiply(&parent));
}

#[test]
fn bounding_box_from_points_spans_all_points() {
    assert!(BoundingBox::from_points(&[]).is_none());
    let pts = [
        Vec3::new(1.0, -2.0, 0.5),
        Vec3::new(-3.0, 4.0, 0.0),
        Vec3::new(0.0, 0.0, 2.0),
    ];
    let bb = BoundingBox::from_points(&pts).expect("non-empty");
    assert_eq!(bb.minimum().to_array(), [-3.0, -2.0, 0.0]);
    assert_eq!(bb.maximum().to_array(), [1.0, 4.0, 2.0]);
    assert_eq!(bb.center().to_array(), [-1.0, 1.0, 1.0]);
    assert_eq!(bb.extend_size().to_array(), [2.0, 3.0, 1.0]);
}

#[test]
fn bounding_box_world_extents_start_as_local() {
    let bb = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
    assert_eq!(bb.minimum_world(), bb.minimum());
    assert_eq!(bb.maximum_world(), bb.maximum());
    assert!(bb.world_update_flag().is_none());
}

#[test]
fn bounding_box_world_extents_follow_rotation_and_translation() {
    let mut bb = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
    let world = Mat4::rotation_z(FRAC_PI_4).multiply(&Mat4::translation(10.0, 0.0, 0.0));
    let (min, max) = bb.world_extents(&world);
    let r = 2.0_f32.sqrt();
    assert_vec3_close(min, [10.0 - r, -r, -1.0]);
    assert_vec3_close(max, [10.0 + r, r, 1.0]);
    assert_vec3_close(bb.center_world(), [10.0, 0.0, 0.0]);
    assert_vec3_close(bb.extend_size_world(), [r, r, 1.0]);
    assert_eq!(bb.world_update_flag(), Some(world.update_flag()));
}

#[test]
fn bounding_box_skips_recompute_for_unchanged_inputs() {
    let world = Mat4::translation(1.0, 2.0, 3.0);
    let mut bb = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let (_, logs) = captured(|| {
        let first = bb.world_extents(&world);
        let second = bb.world_extents(&world);
        assert_eq!(first, second);
    });
    assert_eq!(logs.count(RECOMPUTED), 1, "logs: {}", logs.text());
}

#[test]
fn bounding_box_recomputes_when_matrix_changes() {
    let mut world = Mat4::identity();
    let mut bb = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let (_, logs) = captured(|| {
        bb.world_extents(&world);
        let before = world.update_flag();
        world.set_translation_from_floats(5.0, 0.0, 0.0);
        assert_ne!(before, world.update_flag());
        let (min, _) = bb.world_extents(&world);
        assert_eq!(min.to_array(), [5.0, 0.0, 0.0]);
        bb.world_extents(&world);
    });
    assert_eq!(logs.count(RECOMPUTED), 2, "logs: {}", logs.text());
}

#[test]
fn bounding_box_recomputes_when_a_corner_is_dirty() {
    let world = Mat4::identity();
    let mut bb = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let (_, logs) = captured(|| {
        bb.world_extents(&world);
        bb.maximum_mut().set_x(4.0);
        let (_, max) = bb.world_extents(&world);
        assert_eq!(max.to_array(), [4.0, 1.0, 1.0]);
        bb.set_minimum(&Vec3::new(-2.0, 0.0, 0.0));
        let (min, _) = bb.world_extents(&world);
        assert_eq!(min.to_array(), [-2.0, 0.0, 0.0]);
        bb.world_extents(&world);
    });
    assert_eq!(logs.count(RECOMPUTED), 3, "logs: {}", logs.text());
    assert!(!bb.minimum().is_dirty());
    assert!(!bb.maximum().is_dirty());
}

#[test]
fn bounding_box_point_queries_include_faces() {
    let mut bb = BoundingBox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
    bb.world_extents(&Mat4::translation(0.0, 0.0, 10.0));
    assert!(bb.intersects_point(&Vec3::new(0.0, 0.0, 10.0)));
    assert!(bb.intersects_point(&Vec3::new(1.0, 1.0, 11.0)));
    assert!(bb.intersects_point(&Vec3::new(1.0005, 0.0, 10.0)));
    assert!(!bb.intersects_point(&Vec3::new(1.01, 0.0, 10.0)));
    assert!(!bb.intersects_point(&Vec3::ZERO));
}

#[test]
fn bounding_boxes_touching_faces_intersect() {
    let mut a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let mut b = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    let mut c = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
    a.world_extents(&Mat4::identity());
    b.world_extents(&Mat4::translation(1.0, 0.0, 0.0));
    c.world_extents(&Mat4::translation(1.5, 0.0, 0.0));
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(b.intersects(&c));
    assert!(!a.intersects(&c));
}
