// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::FRAC_PI_2;

use echo_math::{
    Mat4, MathError, ProjectionOptions, Quat, Tuple, Vec2, Vec3, Vec4, Viewport,
};

const EPS: f32 = 1e-5;

fn approx3(a: Vec3, b: [f32; 3], eps: f32) {
    let arr = a.to_array();
    for i in 0..3 {
        assert!((arr[i] - b[i]).abs() <= eps, "index {i}: {arr:?} vs {b:?}");
    }
}

#[test]
fn vec3_three_calling_conventions_agree() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 0.5, 2.0);

    let fresh = a.add(&b);
    let mut in_place = a;
    in_place.add_in_place(&b);
    let mut to_ref = Vec3::ZERO;
    a.add_to_ref(&b, &mut to_ref);

    assert_eq!(fresh, Vec3::new(-3.0, 2.5, 5.0));
    assert_eq!(in_place, fresh);
    assert_eq!(to_ref, fresh);
    assert_eq!(a + b, fresh);

    let mut acc = Vec3::ONE;
    a.scale_and_add_to_ref(2.0, &mut acc);
    assert_eq!(acc, Vec3::new(3.0, 5.0, 7.0));
}

#[test]
fn vec3_operators_mirror_methods() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(4.0, 5.0, 6.0);
    assert_eq!(b - a, b.subtract(&a));
    assert_eq!(a * 2.0, a.scale(2.0));
    assert_eq!(2.0 * a, a.scale(2.0));
    assert_eq!(-a, a.negate());
    assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));

    let mut c = a;
    c += b;
    c -= a;
    c *= 0.5;
    assert_eq!(c, Vec3::new(2.0, 2.5, 3.0));
}

#[test]
fn vec3_dirty_flag_tracks_mutation_only() {
    let mut v = Vec3::new(1.0, 2.0, 3.0);
    assert!(v.is_dirty(), "fresh vectors start dirty");
    assert!(v.take_dirty());
    assert!(!v.is_dirty());

    // Read-only and to-new operations leave the receiver clean.
    let _ = v.length();
    let _ = v.add(&Vec3::ONE);
    let _ = v.normalize();
    assert!(!v.is_dirty());

    v.set_x(5.0);
    assert!(v.take_dirty());
    v.set_y(1.0);
    assert!(v.take_dirty());
    v.set_z(1.0);
    assert!(v.take_dirty());
    v.set(0.0, 0.0, 0.0);
    assert!(v.take_dirty());
    v.add_in_place(&Vec3::ONE);
    assert!(v.take_dirty());
    v.scale_in_place(3.0);
    assert!(v.take_dirty());
    v.normalize_in_place();
    assert!(v.take_dirty());

    let mut out = Vec3::ZERO;
    out.take_dirty();
    v.cross_to_ref(&Vec3::UNIT_X, &mut out);
    assert!(out.is_dirty(), "to-ref writes mark the result dirty");
}

#[test]
fn vec3_equality_ignores_dirty_flag() {
    let mut clean = Vec3::new(1.0, 2.0, 3.0);
    clean.take_dirty();
    let dirty = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(clean, dirty);
    assert!(clean.equals(&dirty));
    assert!(clean.equals_to_floats(1.0, 2.0, 3.0));
}

#[test]
fn normalize_is_idempotent_and_keeps_zero() {
    assert_eq!(Vec3::ZERO.normalize(), Vec3::ZERO);
    assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    assert_eq!(Vec4::ZERO.normalize(), Vec4::ZERO);

    let unit = Vec3::UNIT_Y;
    assert_eq!(unit.normalize(), unit);

    let n = Vec3::new(3.0, -4.0, 12.0).normalize();
    assert!((n.length() - 1.0).abs() <= EPS);
    assert!(n.normalize().equals_with_epsilon(&n, EPS));

    let mut v = Vec3::new(0.0, 10.0, 0.0);
    v.normalize_from_length(10.0);
    assert_eq!(v, Vec3::UNIT_Y);
}

#[test]
fn divide_by_zero_component_propagates_ieee_values() {
    let q = Vec3::new(1.0, -1.0, 0.0).divide(&Vec3::ZERO).to_array();
    assert_eq!(q[0], f32::INFINITY);
    assert_eq!(q[1], f32::NEG_INFINITY);
    assert!(q[2].is_nan());
}

#[test]
fn cross_dot_distance_center() {
    assert_eq!(Vec3::UNIT_X.cross(&Vec3::UNIT_Y), Vec3::UNIT_Z);
    assert_eq!(Vec3::UNIT_Y.cross(&Vec3::UNIT_X), -Vec3::UNIT_Z);
    assert_eq!(Vec3::new(1.0, 2.0, 3.0).dot(&Vec3::new(4.0, -5.0, 6.0)), 12.0);

    let a = Vec3::new(1.0, 1.0, 1.0);
    let b = Vec3::new(4.0, 5.0, 1.0);
    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(a.distance_squared(&b), 25.0);
    assert_eq!(a.center(&b), Vec3::new(2.5, 3.0, 1.0));
}

#[test]
fn component_wise_helpers() {
    let v = Vec3::new(-1.5, 2.25, 3.0);
    assert_eq!(v.floor(), Vec3::new(-2.0, 2.0, 3.0));
    assert_eq!(v.fract(), Vec3::new(0.5, 0.25, 0.0));
    assert_eq!(v.abs(), Vec3::new(1.5, 2.25, 3.0));
    assert_eq!(
        v.minimize(&Vec3::ZERO),
        Vec3::new(-1.5, 0.0, 0.0)
    );
    assert_eq!(
        v.maximize(&Vec3::ZERO),
        Vec3::new(0.0, 2.25, 3.0)
    );
    assert_eq!(
        v.clamp(&Vec3::new(-1.0, -1.0, -1.0), &Vec3::ONE),
        Vec3::new(-1.0, 1.0, 1.0)
    );
    assert_eq!(
        Vec3::ZERO.lerp(&Vec3::new(2.0, 4.0, 8.0), 0.5),
        Vec3::new(1.0, 2.0, 4.0)
    );
    assert!(!Vec3::ONE.is_non_uniform());
    assert!(Vec3::new(1.0, 2.0, 1.0).is_non_uniform());
    assert!(!Vec3::new(1.0, -1.0, 1.0005).is_non_uniform());
}

#[test]
fn catmull_rom_passes_through_inner_control_points() {
    let p0 = Vec2::new(-3.0, 1.0);
    let p1 = Vec2::new(0.0, 0.0);
    let p2 = Vec2::new(2.0, 5.0);
    let p3 = Vec2::new(7.0, -2.0);
    assert_eq!(Vec2::catmull_rom(&p0, &p1, &p2, &p3, 0.0), p1);
    assert_eq!(Vec2::catmull_rom(&p0, &p1, &p2, &p3, 1.0), p2);

    let q = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 3.0, -2.0),
        Vec3::new(6.0, 2.0, 4.0),
        Vec3::new(9.0, -1.0, 8.0),
    ];
    assert_eq!(Vec3::catmull_rom(&q[0], &q[1], &q[2], &q[3], 0.0), q[1]);
    assert_eq!(Vec3::catmull_rom(&q[0], &q[1], &q[2], &q[3], 1.0), q[2]);
}

#[test]
fn hermite_matches_across_vector_types() {
    let v1 = Vec2::new(1.0, 2.0);
    let t1 = Vec2::new(0.5, -1.0);
    let v2 = Vec2::new(3.0, -1.0);
    let t2 = Vec2::new(2.0, 0.0);
    assert_eq!(Vec2::hermite(&v1, &t1, &v2, &t2, 0.0), v1);
    assert_eq!(Vec2::hermite(&v1, &t1, &v2, &t2, 1.0), v2);

    let lift = |v: Vec2| Vec3::new(v.x(), v.y(), 0.0);
    for amount in [0.1_f32, 0.35, 0.5, 0.8] {
        let h2 = Vec2::hermite(&v1, &t1, &v2, &t2, amount);
        let h3 = Vec3::hermite(&lift(v1), &lift(t1), &lift(v2), &lift(t2), amount);
        assert_eq!(h2.x().to_bits(), h3.x().to_bits());
        assert_eq!(h2.y().to_bits(), h3.y().to_bits());

        let d2 = Vec2::hermite_first_derivative(&v1, &t1, &v2, &t2, amount);
        let d3 = Vec3::hermite_first_derivative(&lift(v1), &lift(t1), &lift(v2), &lift(t2), amount);
        assert_eq!(d2.x().to_bits(), d3.x().to_bits());
        assert_eq!(d2.y().to_bits(), d3.y().to_bits());
        let ds = echo_math::scalar::hermite_first_derivative(1.0, 0.5, 3.0, 2.0, amount);
        assert_eq!(d2.x().to_bits(), ds.to_bits());

        let lift4 = |v: Vec2| Vec4::new(v.x(), v.y(), 0.0, 0.0);
        let d4 =
            Vec4::hermite_first_derivative(&lift4(v1), &lift4(t1), &lift4(v2), &lift4(t2), amount);
        assert_eq!(d2.x().to_bits(), d4.x().to_bits());
        assert_eq!(d2.y().to_bits(), d4.y().to_bits());
    }
}

#[test]
fn vec2_and_vec4_offer_every_calling_convention() {
    let a2 = Vec2::new(1.0, -4.0);
    let b2 = Vec2::new(-2.0, 3.0);
    let mut out2 = Vec2::ZERO;
    assert_eq!(*a2.lerp_to_ref(&b2, 0.25, &mut out2), a2.lerp(&b2, 0.25));
    assert_eq!(*a2.minimize_to_ref(&b2, &mut out2), Vec2::new(-2.0, -4.0));
    assert_eq!(*a2.maximize_to_ref(&b2, &mut out2), Vec2::new(1.0, 3.0));
    let lo2 = Vec2::new(0.0, 0.0);
    let hi2 = Vec2::new(0.5, 0.5);
    assert_eq!(*a2.clamp_to_ref(&lo2, &hi2, &mut out2), a2.clamp(&lo2, &hi2));
    let mut m2 = a2;
    m2.minimize_in_place(&b2);
    assert_eq!(m2, a2.minimize(&b2));
    let mut m2 = a2;
    m2.maximize_in_place(&b2);
    assert_eq!(m2, a2.maximize(&b2));

    let a4 = Vec4::new(1.0, -4.0, 2.0, 0.0);
    let b4 = Vec4::new(-2.0, 3.0, 2.5, -1.0);
    let mut out4 = Vec4::ZERO;
    assert_eq!(*a4.lerp_to_ref(&b4, 0.75, &mut out4), a4.lerp(&b4, 0.75));
    assert_eq!(*a4.minimize_to_ref(&b4, &mut out4), Vec4::new(-2.0, -4.0, 2.0, -1.0));
    assert_eq!(*a4.maximize_to_ref(&b4, &mut out4), Vec4::new(1.0, 3.0, 2.5, 0.0));
    assert_eq!(
        *a4.clamp_to_ref(&Vec4::ZERO, &Vec4::ONE, &mut out4),
        a4.clamp(&Vec4::ZERO, &Vec4::ONE)
    );
    let mut m4 = a4;
    m4.minimize_in_place(&b4);
    assert_eq!(m4, a4.minimize(&b4));
    let mut m4 = a4;
    m4.maximize_in_place(&b4);
    assert_eq!(m4, a4.maximize(&b4));

    let values = [9.0, 1.0, 2.0, 3.0, 4.0];
    Vec4::from_array_to_ref(&values, 1, &mut out4).unwrap();
    assert_eq!(out4, Vec4::new(1.0, 2.0, 3.0, 4.0));
    assert!(Vec4::from_array_to_ref(&values, 2, &mut out4).is_err());

    let mut v3 = Vec3::ZERO;
    Vec3::new(1.0, 5.0, -1.0).minimize_to_ref(&Vec3::new(0.0, 6.0, -2.0), &mut v3);
    assert_eq!(v3, Vec3::new(0.0, 5.0, -2.0));
    Vec3::new(1.0, 5.0, -1.0).maximize_to_ref(&Vec3::new(0.0, 6.0, -2.0), &mut v3);
    assert_eq!(v3, Vec3::new(1.0, 6.0, -1.0));
}

#[test]
fn flat_array_marshaling_respects_offsets() {
    let data = [9.0, 1.0, 2.0, 3.0, 4.0];
    assert_eq!(Vec3::from_array(&data, 1).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(Vec2::from_array(&data, 3).unwrap(), Vec2::new(3.0, 4.0));
    assert_eq!(Vec4::from_array(&data, 1).unwrap(), Vec4::new(1.0, 2.0, 3.0, 4.0));

    let err = Vec3::from_array(&data, 3).unwrap_err();
    assert!(matches!(
        err,
        MathError::ArrayTooShort {
            needed: 3,
            offset: 3,
            len: 5
        }
    ));

    let mut out = [0.0; 6];
    Vec3::new(7.0, 8.0, 9.0).to_slice(&mut out, 2).unwrap();
    assert_eq!(out, [0.0, 0.0, 7.0, 8.0, 9.0, 0.0]);
    assert!(Vec4::ONE.to_slice(&mut out, 3).is_err());

    let mut target = Vec3::ZERO;
    Vec3::from_array_to_ref(&data, 2, &mut target).unwrap();
    assert_eq!(target, Vec3::new(2.0, 3.0, 4.0));
}

#[test]
fn tuple_trait_ops_succeed_for_vectors() {
    let a = Vec4::new(4.0, 9.0, -1.5, 2.0);
    let b = Vec4::new(2.0, 3.0, 1.0, 4.0);
    assert_eq!(a.try_divide(&b).unwrap(), Vec4::new(2.0, 3.0, -1.5, 0.5));
    assert_eq!(a.try_minimize(&b).unwrap(), Vec4::new(2.0, 3.0, -1.5, 2.0));
    assert_eq!(a.try_maximize(&b).unwrap(), Vec4::new(4.0, 9.0, 1.0, 4.0));
    assert_eq!(a.try_floor().unwrap(), Vec4::new(4.0, 9.0, -2.0, 2.0));
    assert_eq!(a.try_fract().unwrap(), Vec4::new(0.0, 0.0, 0.5, 0.0));
    assert_eq!(Vec2::CLASS_NAME, "Vector2");
    assert_eq!(Vec3::CLASS_NAME, "Vector3");
    assert_eq!(Vec4::CLASS_NAME, "Vector4");
}

#[test]
fn transforms_points_and_normals() {
    let m = Mat4::translation(1.0, 2.0, 3.0);
    assert_eq!(
        Vec3::new(1.0, 1.0, 1.0).transform_coordinates(&m),
        Vec3::new(2.0, 3.0, 4.0)
    );
    assert_eq!(Vec3::UNIT_X.transform_normal(&m), Vec3::UNIT_X);
    assert_eq!(Vec2::new(1.0, 1.0).transform(&m), Vec2::new(2.0, 3.0));
    assert_eq!(
        Vec4::new(1.0, 1.0, 1.0, 0.0).transform(&m),
        Vec4::new(1.0, 1.0, 1.0, 0.0)
    );
    assert_eq!(Vec4::new(1.0, 1.0, 1.0, 1.0).transform(&m).to_vec3(), Vec3::new(2.0, 3.0, 4.0));
}

#[test]
fn rotate_by_quaternion_matches_rotation_matrix() {
    let q = Quat::from_axis_angle(&Vec3::UNIT_Z, FRAC_PI_2);
    approx3(Vec3::UNIT_X.rotate_by_quaternion(&q), [0.0, 1.0, 0.0], EPS);

    let q = Quat::from_axis_angle(&Vec3::new(1.0, 2.0, -0.5), 0.7);
    let v = Vec3::new(0.3, -2.0, 5.0);
    let via_matrix = v.transform_normal(&q.to_rotation_matrix());
    approx3(v.rotate_by_quaternion(&q), via_matrix.to_array(), EPS);

    let mut w = v;
    w.take_dirty();
    w.apply_rotation_quaternion(&q);
    assert!(w.is_dirty());
    approx3(w, via_matrix.to_array(), EPS);
}

#[test]
fn signed_angle_between_vectors() {
    let angle = Vec3::UNIT_X.angle_between(&Vec3::UNIT_Y, &Vec3::UNIT_Z);
    assert!((angle - FRAC_PI_2).abs() <= EPS);
    let angle = Vec3::UNIT_X.angle_between(&Vec3::UNIT_Y, &-Vec3::UNIT_Z);
    assert!((angle + FRAC_PI_2).abs() <= EPS);
}

#[test]
fn vec2_geometry_helpers() {
    let r = Vec2::UNIT_X.rotate(FRAC_PI_2);
    assert!(r.equals_with_epsilon(&Vec2::UNIT_Y, EPS));

    let (p0, p1, p2) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
    assert!(Vec2::point_in_triangle(&Vec2::new(1.0, 1.0), &p0, &p1, &p2));
    assert!(!Vec2::point_in_triangle(&Vec2::new(3.0, 3.0), &p0, &p1, &p2));

    let d = Vec2::distance_of_point_from_segment(&Vec2::new(2.0, 3.0), &p0, &p1);
    assert_eq!(d, 3.0);
    let d = Vec2::distance_of_point_from_segment(&Vec2::new(7.0, 4.0), &p0, &p1);
    assert_eq!(d, 5.0);
    let d = Vec2::distance_of_point_from_segment(&Vec2::new(3.0, 4.0), &p0, &p0);
    assert_eq!(d, 5.0);
}

#[test]
fn project_then_unproject_round_trips() {
    let world = Mat4::identity();
    let view = Mat4::look_at_lh(&Vec3::new(0.0, 0.0, -10.0), &Vec3::ZERO, &Vec3::UNIT_Y);
    let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 1.0, 100.0, &ProjectionOptions::default());
    let viewport = Viewport::new(0.0, 0.0, 800.0, 800.0);

    let center = Vec3::ZERO.project(&world, &view.multiply(&proj), &viewport, false);
    assert!((center.x() - 400.0).abs() <= 1e-3);
    assert!((center.y() - 400.0).abs() <= 1e-3);

    let up = Vec3::new(0.0, 5.0, 0.0).project(&world, &view.multiply(&proj), &viewport, false);
    assert!(up.y() < 400.0, "screen y grows downwards");

    let p = Vec3::new(1.0, 2.0, 3.0);
    let screen = p.project(&world, &view.multiply(&proj), &viewport, false);
    let back = screen.unproject(&world, &view, &proj, &viewport, false);
    assert!(back.equals_with_epsilon(&p, 1e-2), "{back:?} vs {p:?}");
}

#[test]
fn project_then_unproject_round_trips_with_half_z_range() {
    let opts = ProjectionOptions {
        half_z_range: true,
        ..ProjectionOptions::default()
    };
    let world = Mat4::identity();
    let view = Mat4::identity();
    let proj = Mat4::perspective_fov_lh(FRAC_PI_2, 1.0, 1.0, 100.0, &opts);
    let viewport = Viewport::new(0.0, 0.0, 800.0, 600.0);

    let p = Vec3::new(1.0, 2.0, 3.0);
    let screen = p.project(&world, &proj, &viewport, true);
    assert!((0.0..=1.0).contains(&screen.z()), "{screen:?}");
    let back = screen.unproject(&world, &view, &proj, &viewport, true);
    assert!(back.equals_with_epsilon(&p, 1e-2), "{back:?} vs {p:?}");

    let near = Vec3::new(0.0, 0.0, 1.0).project(&world, &proj, &viewport, true);
    assert!(near.z().abs() <= 1e-4, "{near:?}");
}
