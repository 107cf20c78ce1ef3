//! Axis-angle conversions

use crate::error::{Result, RotationError};
use crate::{Quaternion, Vec3, EPSILON};

impl Quaternion {
    /// Create the rotation by `angle` radians about `axis`
    ///
    /// The axis does not need to be normalized, but must not be the zero
    /// vector. The result is always a unit quaternion
    /// `(cos(θ/2), sin(θ/2) * axis)`; an angle of 0 gives the identity.
    ///
    /// ```
    /// use rot3d_math::{Quaternion, Vec3};
    /// use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2};
    ///
    /// let q = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2).unwrap();
    /// assert_eq!(q, Quaternion::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2, 0.0, 0.0));
    /// ```
    pub fn from_axis_angle(axis: impl Into<Vec3>, angle: f64) -> Result<Self> {
        Self::from_axis_angle_with_tolerance(axis, angle, EPSILON)
    }

    pub fn from_axis_angle_with_tolerance(
        axis: impl Into<Vec3>,
        angle: f64,
        eps: f64,
    ) -> Result<Self> {
        let axis = axis.into();
        if axis.length() <= eps {
            return Err(RotationError::InvalidArgument(
                "rotation axis must not be the zero vector".to_string(),
            ));
        }
        Ok(Self::from_unit_axis_angle(axis.normalized(), angle))
    }

    /// Like [`Quaternion::from_axis_angle`] for an axis given as a slice
    ///
    /// Fails with [`RotationError::InvalidType`] unless the slice has 3 elements.
    pub fn from_axis_slice_angle(axis: &[f64], angle: f64) -> Result<Self> {
        Self::from_axis_angle(Vec3::try_from(axis)?, angle)
    }

    /// Rotation about an axis already known to be unit length
    pub(crate) fn from_unit_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (sin_h, cos_h) = (angle * 0.5).sin_cos();
        Self::new(cos_h, axis.x * sin_h, axis.y * sin_h, axis.z * sin_h)
    }

    /// Rotation axis and angle (radians) of this quaternion
    ///
    /// The quaternion is normalized first. The angle is `2 * atan2(|v|, a)`,
    /// equal to `2 * acos(a)` but accurate for small rotations, in `[0, 2π]`;
    /// no hemisphere correction is applied, so a quaternion with a negative
    /// scalar part yields an angle above π. When the vector part is within
    /// `eps` of zero the axis is undefined and `(1, 0, 0)` is returned.
    pub fn to_axis_angle(&self) -> Result<(Vec3, f64)> {
        self.to_axis_angle_with_tolerance(EPSILON)
    }

    pub fn to_axis_angle_with_tolerance(&self, eps: f64) -> Result<(Vec3, f64)> {
        self.ensure_nonzero(eps, "converted")?;
        let q = self.normalize_with_tolerance(eps)?;

        let v = q.vector();
        let sin_h = v.length();
        let angle = 2.0 * sin_h.atan2(q.a);
        if sin_h <= eps {
            return Ok((Vec3::X, angle));
        }

        Ok((v / sin_h, angle))
    }
}
