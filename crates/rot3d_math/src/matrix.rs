//! Rotation matrix conversions
//!
//! Conversions between quaternions, 3x3 rotation matrices and orthonormal
//! axis triads. A rotation matrix's columns are the rotated `x`, `y` and `z`
//! axes, so a triad and a matrix carry the same information.

use crate::error::{Result, RotationError};
use crate::mat3::{self, Mat3};
use crate::{Quaternion, Vec3, EPSILON};

impl Quaternion {
    /// Create a unit quaternion from an orthogonal rotation matrix
    ///
    /// Fails with [`RotationError::NonOrthogonal`] unless `m * m^T = I`
    /// within [`EPSILON`]. The determinant is not checked: a reflection
    /// (det = -1) is accepted and yields a rotation that is not `m`.
    pub fn from_rotation_matrix(m: Mat3) -> Result<Self> {
        Self::from_rotation_matrix_with_tolerance(m, EPSILON)
    }

    pub fn from_rotation_matrix_with_tolerance(m: Mat3, eps: f64) -> Result<Self> {
        mat3::validate_orthogonal(m, eps)?;

        // Branch on the largest of trace and diagonal entries to keep the
        // square root argument away from zero
        let trace = m[0][0] + m[1][1] + m[2][2];
        let q = if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Self::new(
                0.25 * s,
                (m[2][1] - m[1][2]) / s,
                (m[0][2] - m[2][0]) / s,
                (m[1][0] - m[0][1]) / s,
            )
        } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
            let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
            Self::new(
                (m[2][1] - m[1][2]) / s,
                0.25 * s,
                (m[0][1] + m[1][0]) / s,
                (m[0][2] + m[2][0]) / s,
            )
        } else if m[1][1] > m[2][2] {
            let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
            Self::new(
                (m[0][2] - m[2][0]) / s,
                (m[0][1] + m[1][0]) / s,
                0.25 * s,
                (m[1][2] + m[2][1]) / s,
            )
        } else {
            let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
            Self::new(
                (m[1][0] - m[0][1]) / s,
                (m[0][2] + m[2][0]) / s,
                (m[1][2] + m[2][1]) / s,
                0.25 * s,
            )
        };

        q.normalize_with_tolerance(eps)
    }

    /// Like [`Quaternion::from_rotation_matrix`] for a dynamically sized matrix
    ///
    /// Fails with [`RotationError::InvalidArgument`] unless it is exactly 3x3.
    pub fn from_rotation_matrix_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        Self::from_rotation_matrix(mat3::try_from_rows(rows)?)
    }

    /// The 3x3 rotation matrix of this quaternion, normalized first
    pub fn to_rotation_matrix(&self) -> Result<Mat3> {
        self.to_rotation_matrix_with_tolerance(EPSILON)
    }

    pub fn to_rotation_matrix_with_tolerance(&self, eps: f64) -> Result<Mat3> {
        self.ensure_nonzero(eps, "converted")?;
        let Quaternion { a, b, c, d } = self.normalize_with_tolerance(eps)?;

        Ok([
            [
                1.0 - 2.0 * (c * c + d * d),
                2.0 * (b * c - a * d),
                2.0 * (b * d + a * c),
            ],
            [
                2.0 * (b * c + a * d),
                1.0 - 2.0 * (b * b + d * d),
                2.0 * (c * d - a * b),
            ],
            [
                2.0 * (b * d - a * c),
                2.0 * (c * d + a * b),
                1.0 - 2.0 * (b * b + c * c),
            ],
        ])
    }
}

/// Split an orthogonal rotation matrix into its columns `(x_axis, y_axis, z_axis)`
pub fn rotation_matrix_to_axis(m: Mat3) -> Result<(Vec3, Vec3, Vec3)> {
    rotation_matrix_to_axis_with_tolerance(m, EPSILON)
}

pub fn rotation_matrix_to_axis_with_tolerance(m: Mat3, eps: f64) -> Result<(Vec3, Vec3, Vec3)> {
    mat3::validate_orthogonal(m, eps)?;
    Ok((mat3::column(m, 0), mat3::column(m, 1), mat3::column(m, 2)))
}

/// Assemble a rotation matrix whose columns are the given axes
///
/// Fails with [`RotationError::NonOrthonormalBasis`] unless the three vectors
/// are unit length and mutually perpendicular within [`EPSILON`].
pub fn axis_to_rotation_matrix(
    x_axis: impl Into<Vec3>,
    y_axis: impl Into<Vec3>,
    z_axis: impl Into<Vec3>,
) -> Result<Mat3> {
    axis_to_rotation_matrix_with_tolerance(x_axis, y_axis, z_axis, EPSILON)
}

pub fn axis_to_rotation_matrix_with_tolerance(
    x_axis: impl Into<Vec3>,
    y_axis: impl Into<Vec3>,
    z_axis: impl Into<Vec3>,
    eps: f64,
) -> Result<Mat3> {
    let (x, y, z) = (x_axis.into(), y_axis.into(), z_axis.into());
    let unit = x.is_unit(eps) && y.is_unit(eps) && z.is_unit(eps);
    let perpendicular = x.dot(y).abs() <= eps && y.dot(z).abs() <= eps && z.dot(x).abs() <= eps;
    if !(unit && perpendicular) {
        return Err(RotationError::NonOrthonormalBasis);
    }
    Ok(mat3::from_columns(x, y, z))
}
