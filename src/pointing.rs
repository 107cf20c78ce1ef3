//! Orientation from pointing directions
//!
//! Antennas and coordinate systems are usually placed by saying where they
//! look and which way is up. This module turns such a pair into an
//! orthonormal axis triad and into an orientation quaternion.

use rot3d_math::{axis_to_rotation_matrix_with_tolerance, Quaternion, Result, RotationError, Vec3};

/// Orthonormal right-handed triad `(x, y, z)` with `x` along `look`
///
/// `z = look × up` and `y = z × look`, so `y` is the component of `up`
/// perpendicular to `look`. `up` does not need to be perpendicular to
/// `look`, but must not be parallel to it. Both directions are normalized
/// before the parallel check, so their lengths do not matter.
pub fn pointing_to_axis(
    look: impl Into<Vec3>,
    up: impl Into<Vec3>,
    eps: f64,
) -> Result<(Vec3, Vec3, Vec3)> {
    let (look, up) = (look.into(), up.into());
    let x = look.try_normalized(eps)?;
    let z = x.cross(up.normalized());
    if z.length() <= eps {
        return Err(RotationError::InvalidArgument(format!(
            "up direction {:?} is parallel to look direction {:?}",
            up.to_array(),
            look.to_array()
        )));
    }
    let z = z.normalized();
    let y = z.cross(x).normalized();
    Ok((x, y, z))
}

/// Orientation quaternion of the triad built by [`pointing_to_axis`]
pub fn orientation_from_pointing(
    look: impl Into<Vec3>,
    up: impl Into<Vec3>,
    eps: f64,
) -> Result<Quaternion> {
    let (x, y, z) = pointing_to_axis(look, up, eps)?;
    let m = axis_to_rotation_matrix_with_tolerance(x, y, z, eps)?;
    Quaternion::from_rotation_matrix_with_tolerance(m, eps)
}
