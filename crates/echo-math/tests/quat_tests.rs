// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use core::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use echo_math::{Mat4, MathError, Quat, Tuple, Vec3};

const EPS: f32 = 1e-5;

fn approx_eq16(a: &[f32; 16], b: &[f32; 16], eps: f32) {
    for i in 0..16 {
        assert!(
            (a[i] - b[i]).abs() <= eps,
            "index {i}: {a:?} vs {b:?}"
        );
    }
}

fn approx_quat(a: &Quat, b: &Quat, eps: f32) {
    assert!(a.equals_with_epsilon(b, eps), "{a:?} vs {b:?}");
}

fn sample_rotations() -> Vec<Quat> {
    vec![
        Quat::from_axis_angle(&Vec3::UNIT_X, 0.3),
        Quat::from_axis_angle(&Vec3::UNIT_Y, -1.2),
        Quat::from_axis_angle(&Vec3::new(1.0, 1.0, 0.0), FRAC_PI_4),
        Quat::from_axis_angle(&Vec3::new(-0.2, 0.7, 0.4), 2.5),
        Quat::rotation_yaw_pitch_roll(0.4, -0.9, 1.7),
    ]
}

#[test]
fn identity_is_neutral_for_multiply() {
    for q in sample_rotations() {
        approx_quat(&Quat::identity().multiply(&q), &q, 0.0);
        approx_quat(&q.multiply(&Quat::identity()), &q, 0.0);
    }
    assert_eq!(Quat::default(), Quat::IDENTITY);
}

#[test]
fn zero_axis_yields_identity() {
    assert_eq!(Quat::from_axis_angle(&Vec3::ZERO, 1.0), Quat::identity());
}

#[test]
fn multiply_matches_matrix_composition() {
    let rotations = sample_rotations();
    for a in &rotations {
        for b in &rotations {
            let via_quat = Mat4::from_quat(&a.multiply(b));
            let via_matrix = Mat4::from_quat(b).multiply(&Mat4::from_quat(a));
            approx_eq16(&via_quat.to_array(), &via_matrix.to_array(), 1e-5);
        }
    }
}

#[test]
fn multiply_operator_and_in_place_agree() {
    let a = Quat::from_axis_angle(&Vec3::UNIT_Z, 0.5);
    let b = Quat::from_axis_angle(&Vec3::UNIT_X, -0.25);
    let product = a.multiply(&b);
    assert_eq!(a * b, product);

    let mut c = a;
    c.multiply_in_place(&b);
    assert_eq!(c, product);

    let mut d = a;
    d *= b;
    assert_eq!(d, product);

    let mut e = Quat::zero();
    a.multiply_to_ref(&b, &mut e);
    assert_eq!(e, product);
}

#[test]
fn inverse_cancels_rotation() {
    for q in sample_rotations() {
        approx_quat(&q.multiply(&q.inverse()), &Quat::identity(), EPS);
        approx_quat(&q.inverse().multiply(&q), &Quat::identity(), EPS);
        // Unit quaternions invert to their conjugate.
        approx_quat(&q.inverse(), &q.conjugate(), EPS);
    }

    let scaled = Quat::new(0.0, 0.0, 0.0, 2.0);
    approx_quat(&scaled.inverse(), &Quat::new(0.0, 0.0, 0.0, 0.5), 0.0);
}

#[test]
fn normalize_produces_unit_length_and_keeps_zero() {
    let q = Quat::new(1.0, 2.0, 3.0, 4.0).normalize();
    assert!((q.length() - 1.0).abs() <= EPS);
    assert_eq!(Quat::zero().normalize(), Quat::zero());
}

#[test]
fn slerp_hits_endpoints_and_midpoint() {
    let start = Quat::identity();
    let end = Quat::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2);

    approx_quat(&Quat::slerp(&start, &end, 0.0), &start, EPS);
    approx_quat(&Quat::slerp(&start, &end, 1.0), &end, EPS);
    approx_quat(
        &Quat::slerp(&start, &end, 0.5),
        &Quat::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_4),
        EPS,
    );

    let mut out = Quat::zero();
    Quat::slerp_to_ref(&start, &end, 0.5, &mut out);
    assert_eq!(out, Quat::slerp(&start, &end, 0.5));
}

#[test]
fn slerp_takes_the_short_arc() {
    let start = Quat::identity();
    let end = Quat::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_2).negate();
    assert!(!Quat::are_close(&start, &end));

    let mid = Quat::slerp(&start, &end, 0.5);
    let expected = Quat::from_axis_angle(&Vec3::UNIT_Y, FRAC_PI_4);
    approx_quat(&mid, &expected, EPS);
}

#[test]
fn slerp_between_near_equal_quats_is_linear() {
    let a = Quat::identity();
    let b = Quat::from_axis_angle(&Vec3::UNIT_X, 1e-4);
    let mid = Quat::slerp(&a, &b, 0.5);
    assert!(mid.x().is_finite());
    assert!((mid.x() - b.x() * 0.5).abs() <= 1e-7);
}

#[test]
fn slerp_of_a_rotation_with_itself_is_stationary() {
    for q in sample_rotations() {
        for t in [0.0, 0.25, 0.5, 0.9, 1.0] {
            approx_quat(&Quat::slerp(&q, &q, t), &q, EPS);
        }
    }
}

#[test]
fn euler_angles_round_trip_away_from_poles() {
    let angles = Vec3::new(0.3, -1.1, 0.7);
    let q = Quat::from_euler_vector(&angles);
    assert!(q.to_euler_angles().equals_with_epsilon(&angles, 1e-4));

    let q2 = Quat::from_euler_angles(0.3, -1.1, 0.7);
    assert_eq!(q, q2);
    assert_eq!(q, Quat::rotation_yaw_pitch_roll(-1.1, 0.3, 0.7));
}

#[test]
fn euler_angles_snap_at_gimbal_lock() {
    let down = Quat::from_euler_angles(FRAC_PI_2, 0.0, 0.0);
    let e = down.to_euler_angles();
    assert_eq!(e.x(), FRAC_PI_2);
    assert_eq!(e.z(), 0.0);

    let up = Quat::from_euler_angles(-FRAC_PI_2, 0.0, 0.0);
    let e = up.to_euler_angles();
    assert_eq!(e.x(), -FRAC_PI_2);
    assert_eq!(e.z(), 0.0);
}

#[test]
fn euler_angles_just_inside_gimbal_limit_keep_roll() {
    // zAxisY = -sin(pitch) / 2 ≈ -0.49999
    let pitch = 0.99998_f32.asin();
    let (yaw, roll) = (0.3, 0.4);
    let q = Quat::from_euler_angles(pitch, yaw, roll);
    let e = q.to_euler_angles();
    assert_ne!(e.x(), FRAC_PI_2);
    assert!((e.x() - pitch).abs() <= 1e-3, "{e:?}");
    assert!((e.y() - yaw).abs() <= 1e-2, "{e:?}");
    assert!((e.z() - roll).abs() <= 1e-2, "{e:?}");

    // zAxisY = 0.5 - 4·2⁻²⁵, one f32 step below the limit.
    let q = Quat::new(-0.5, 0.5, 0.5 - 2.0_f32.powi(-22), 0.5);
    let e = q.to_euler_angles();
    assert_ne!(e.x(), -FRAC_PI_2);
    assert!(e.x() > -FRAC_PI_2 && e.x() < -1.57, "{e:?}");
}

#[test]
fn euler_angles_past_gimbal_limit_snap() {
    // zAxisY = 0.5 - 2⁻²⁵, above the limit but short of the pole.
    let q = Quat::new(-0.5, 0.5, 0.5 - 2.0_f32.powi(-24), 0.5);
    let e = q.to_euler_angles();
    assert_eq!(e.x(), -FRAC_PI_2);
    assert_eq!(e.y(), 2.0 * 0.5_f32.atan2(0.5));
    assert_eq!(e.z(), 0.0);

    // Mirror case: zAxisY = -(0.5 - 2⁻²⁵).
    let q = Quat::new(0.5, -0.5, 0.5 - 2.0_f32.powi(-24), 0.5);
    let e = q.to_euler_angles();
    assert_eq!(e.x(), FRAC_PI_2);
    assert_eq!(e.y(), 2.0 * (-0.5_f32).atan2(0.5));
    assert_eq!(e.z(), 0.0);
}

#[test]
fn rotation_matrix_round_trips() {
    for q in sample_rotations() {
        let m = q.to_rotation_matrix();
        let back = Quat::from_rotation_matrix(&m);
        // q and -q describe the same rotation.
        let aligned = if Quat::are_close(&q, &back) {
            back
        } else {
            back.negate()
        };
        approx_quat(&aligned, &q, 1e-5);
    }

    // Half-turn exercises the non-trace branches.
    let half_turn = Quat::from_axis_angle(&Vec3::UNIT_Z, PI);
    let back = Quat::from_rotation_matrix(&half_turn.to_rotation_matrix());
    assert!((back.z().abs() - 1.0).abs() <= 1e-5);
}

#[test]
fn from_unit_vectors_rotates_from_onto_to() {
    let from = Vec3::UNIT_X;
    let to = Vec3::new(0.0, 0.6, 0.8);
    let q = Quat::from_unit_vectors(&from, &to);
    assert!(from.rotate_by_quaternion(&q).equals_with_epsilon(&to, EPS));

    let opposite = Quat::from_unit_vectors(&from, &-from);
    let rotated = from.rotate_by_quaternion(&opposite);
    assert!(rotated.equals_with_epsilon(&-from, EPS));
}

#[test]
fn to_mat4_normalizes_first() {
    let q = Quat::from_axis_angle(&Vec3::UNIT_Y, 0.8);
    let scaled = q.scale(3.0);
    approx_eq16(
        &scaled.to_mat4().to_array(),
        &q.to_rotation_matrix().to_array(),
        1e-6,
    );
}

#[test]
fn component_wise_ops_are_rejected() {
    let q = Quat::identity();
    let err = q.try_divide(&q).unwrap_err();
    assert!(matches!(
        err,
        MathError::UnsupportedOperation {
            class_name: "Quaternion",
            operation: "divide"
        }
    ));
    assert!(q.try_minimize(&q).is_err());
    assert!(q.try_maximize(&q).is_err());
    assert!(q.try_floor().is_err());
    assert!(q.try_fract().is_err());
    assert!(err.to_string().contains("Quaternion"));
}

#[test]
fn arithmetic_forms_agree() {
    let a = Quat::new(1.0, 2.0, 3.0, 4.0);
    let b = Quat::new(0.5, -1.0, 2.0, 0.0);
    assert_eq!(a + b, a.add(&b));
    assert_eq!(a - b, a.subtract(&b));
    assert_eq!(-a, a.negate());
    assert_eq!(a.add(&b), Quat::new(1.5, 1.0, 5.0, 4.0));
    assert_eq!(a.scale(2.0), Quat::new(2.0, 4.0, 6.0, 8.0));
    assert_eq!(a.dot(&b), 4.5);

    let mut acc = Quat::zero();
    a.scale_and_add_to_ref(0.5, &mut acc);
    assert_eq!(acc, Quat::new(0.5, 1.0, 1.5, 2.0));
}
