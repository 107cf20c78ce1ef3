//! End-to-end rotation scenarios
//!
//! Checks the invariants that hold across the whole API surface rather than
//! within a single conversion.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use rot3d_math::{
    axis_to_rotation_matrix, mat3, rotation_matrix_to_axis, Quaternion, RotationError, Vec3,
    EPSILON,
};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};

fn samples() -> Vec<Quaternion> {
    vec![
        Quaternion::new(1.0, 2.0, 3.0, 4.0),
        Quaternion::new(-0.5, 0.1, 0.0, 0.7),
        Quaternion::new(0.0, 0.0, 0.0, 2.0),
        Quaternion::new(3.0, -1.0, 0.25, -2.0),
    ]
}

#[test]
fn test_worked_examples() {
    let p = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let q = Quaternion::new(5.0, 6.0, 7.0, 8.0);
    assert_eq!(p + q, Quaternion::new(6.0, 8.0, 10.0, 12.0));
    assert_eq!(p * q, Quaternion::new(-60.0, 12.0, 30.0, 24.0));
    assert!(matches!(Quaternion::ZERO.normalize(), Err(RotationError::ZeroNorm(_))));
    assert_eq!(
        Quaternion::from_axis_angle([1.0, 0.0, 0.0], FRAC_PI_2).unwrap(),
        Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0)
    );
    assert_eq!(
        Quaternion::from_euler([FRAC_PI_2, 0.0, 0.0], "xyz", false).unwrap(),
        Quaternion::from_axis_angle([1.0, 0.0, 0.0], FRAC_PI_2).unwrap()
    );
    assert_eq!(
        Quaternion::from_rotation_matrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]]),
        Err(RotationError::NonOrthogonal)
    );
    assert_eq!(
        (p / Quaternion::new(1.0, -1.0, 1.0, 2.0)).unwrap(),
        Quaternion::new(10.0 / 7.0, 1.0 / 7.0, 10.0 / 7.0, -3.0 / 7.0)
    );
}

#[test]
fn test_normalize_gives_unit_norm() {
    for q in samples() {
        assert_abs_diff_eq!(q.normalize().unwrap().norm(), 1.0, epsilon = EPSILON);
    }
}

#[test]
fn test_product_with_inverse_is_identity() {
    for q in samples() {
        assert_eq!(q * q.inverse().unwrap(), Quaternion::IDENTITY);
    }
}

#[test]
fn test_constructors_return_unit_quaternions() {
    let from_axis = Quaternion::from_axis_angle([3.0, -4.0, 12.0], 2.2).unwrap();
    let from_euler = Quaternion::from_euler([1.0, 2.0, 3.0], "yzy", true).unwrap();
    let m = Quaternion::new(1.0, 2.0, 3.0, 4.0).to_rotation_matrix().unwrap();
    let from_matrix = Quaternion::from_rotation_matrix(m).unwrap();

    for q in [from_axis, from_euler, from_matrix] {
        assert_relative_eq!(q.norm(), 1.0, epsilon = EPSILON);
    }
}

#[test]
fn test_representations_agree_on_rotated_vectors() {
    let q = Quaternion::from_euler([0.4, -1.1, 2.5], "zyz", false).unwrap();
    let m = q.to_rotation_matrix().unwrap();
    let (axis, angle) = q.to_axis_angle().unwrap();
    let via_axis_angle = Quaternion::from_axis_angle(axis, angle).unwrap();
    let (x, y, z) = rotation_matrix_to_axis(m).unwrap();
    let via_triad = Quaternion::from_rotation_matrix(axis_to_rotation_matrix(x, y, z).unwrap()).unwrap();

    let v = Vec3::new(0.2, -0.7, 1.9);
    let expected = mat3::transform(m, v);
    for candidate in [q, via_axis_angle, via_triad] {
        assert_abs_diff_eq!(candidate.rotate_vector(v).unwrap(), expected, epsilon = 1e-9);
    }
}

#[test]
fn test_rotation_composition_matches_product() {
    let first = Quaternion::from_axis_angle(Vec3::X, 0.6).unwrap();
    let second = Quaternion::from_axis_angle(Vec3::Z, -1.4).unwrap();
    let v = Vec3::new(1.0, 2.0, 3.0);

    let stepwise = second
        .rotate_vector(first.rotate_vector(v).unwrap())
        .unwrap();
    let combined = (second * first).rotate_vector(v).unwrap();
    assert_abs_diff_eq!(stepwise, combined, epsilon = 1e-12);

    let m = mat3::mul(second.to_rotation_matrix().unwrap(), first.to_rotation_matrix().unwrap());
    assert_abs_diff_eq!(mat3::transform(m, v), combined, epsilon = 1e-12);
}
