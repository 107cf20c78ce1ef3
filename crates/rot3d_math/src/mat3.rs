//! 3x3 Matrix utilities for rotation matrices
//!
//! Matrices are stored ROW-major: `m[row][col]`. A rotation matrix maps a
//! column vector `v` to `M * v`, so its columns are the images of the basis
//! axes.

use crate::error::{Result, RotationError};
use crate::Vec3;

/// 3x3 matrix type (row-major)
pub type Mat3 = [[f64; 3]; 3];

/// Identity matrix
pub const IDENTITY: Mat3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Multiply two 3x3 matrices: result = a * b
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat3, b: Mat3) -> Mat3 {
    let mut result = [[0.0f64; 3]; 3];

    for i in 0..3 {
        for j in 0..3 {
            for k in 0..3 {
                result[i][j] += a[i][k] * b[k][j];
            }
        }
    }

    result
}

/// Transform a Vec3 by a 3x3 matrix
///
/// result = M * v
pub fn transform(m: Mat3, v: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat3) -> Mat3 {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Get a column vector from a matrix
pub fn column(m: Mat3, col: usize) -> Vec3 {
    Vec3::new(m[0][col], m[1][col], m[2][col])
}

/// Build a matrix whose columns are the given vectors
pub fn from_columns(x: Vec3, y: Vec3, z: Vec3) -> Mat3 {
    [[x.x, y.x, z.x], [x.y, y.y, z.y], [x.z, y.z, z.z]]
}

/// Determinant
pub fn determinant(m: Mat3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Whether `m * m^T` equals the identity within `eps` in every entry
pub fn is_orthogonal(m: Mat3, eps: f64) -> bool {
    let product = mul(m, transpose(m));
    product
        .iter()
        .zip(IDENTITY.iter())
        .all(|(row, id_row)| row.iter().zip(id_row).all(|(p, i)| (p - i).abs() <= eps))
}

/// Fail with [`RotationError::NonOrthogonal`] unless `m` is orthogonal within `eps`
pub fn validate_orthogonal(m: Mat3, eps: f64) -> Result<()> {
    if is_orthogonal(m, eps) {
        Ok(())
    } else {
        Err(RotationError::NonOrthogonal)
    }
}

/// Convert dynamically sized rows into a [`Mat3`]
///
/// Fails unless there are exactly 3 rows of exactly 3 values.
pub fn try_from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Mat3> {
    if rows.len() != 3 || rows.iter().any(|row| row.as_ref().len() != 3) {
        let shape: Vec<usize> = rows.iter().map(|row| row.as_ref().len()).collect();
        return Err(RotationError::InvalidArgument(format!(
            "rotation matrix must be 3x3, got {} rows with lengths {:?}",
            rows.len(),
            shape
        )));
    }

    let mut m = [[0.0f64; 3]; 3];
    for (dst, src) in m.iter_mut().zip(rows) {
        dst.copy_from_slice(src.as_ref());
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f64 = 1e-9;

    fn mat_approx_eq(a: Mat3, b: Mat3) -> bool {
        for i in 0..3 {
            for j in 0..3 {
                if (a[i][j] - b[i][j]).abs() > EPSILON {
                    return false;
                }
            }
        }
        true
    }

    fn rotation_z(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]]
    }

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(transform(IDENTITY, v), v);
    }

    #[test]
    fn test_transform_rotates_x_to_y() {
        use std::f64::consts::FRAC_PI_2;

        let m = rotation_z(FRAC_PI_2);
        assert_abs_diff_eq!(transform(m, Vec3::X), Vec3::Y, epsilon = EPSILON);
        assert_abs_diff_eq!(transform(m, Vec3::Y), -Vec3::X, epsilon = EPSILON);
    }

    #[test]
    fn test_mul_composition() {
        use std::f64::consts::FRAC_PI_4;

        let composed = mul(rotation_z(FRAC_PI_4), rotation_z(FRAC_PI_4));
        assert!(mat_approx_eq(composed, rotation_z(2.0 * FRAC_PI_4)));
        assert!(mat_approx_eq(mul(IDENTITY, composed), composed));
    }

    #[test]
    fn test_columns_round_trip() {
        let m = rotation_z(0.3);
        let rebuilt = from_columns(column(m, 0), column(m, 1), column(m, 2));
        assert_eq!(m, rebuilt);
    }

    #[test]
    fn test_is_orthogonal() {
        assert!(is_orthogonal(IDENTITY, EPSILON));
        assert!(is_orthogonal(rotation_z(1.234), EPSILON));

        let scaled = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 2.0]];
        assert!(!is_orthogonal(scaled, EPSILON));
        assert_eq!(validate_orthogonal(scaled, EPSILON), Err(RotationError::NonOrthogonal));
    }

    #[test]
    fn test_determinant() {
        assert_abs_diff_eq!(determinant(rotation_z(0.7)), 1.0, epsilon = EPSILON);
        let reflection = [[-1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert_abs_diff_eq!(determinant(reflection), -1.0);
    }

    #[test]
    fn test_try_from_rows() {
        let rows = vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0]];
        assert_eq!(try_from_rows(&rows).unwrap(), IDENTITY);

        let two_by_two = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            try_from_rows(&two_by_two),
            Err(RotationError::InvalidArgument(_))
        ));

        let ragged: Vec<&[f64]> = vec![&[1.0, 0.0, 0.0], &[0.0, 1.0], &[0.0, 0.0, 1.0]];
        assert!(try_from_rows(&ragged).is_err());
    }
}
