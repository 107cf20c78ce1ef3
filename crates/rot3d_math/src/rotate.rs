//! Rotating vectors by quaternions

use crate::error::Result;
use crate::{Quaternion, Vec3, EPSILON};

impl Quaternion {
    /// Rotate a vector using the sandwich product `q ⊗ v ⊗ q*`
    ///
    /// The quaternion is normalized first.
    pub fn rotate_vector(&self, v: impl Into<Vec3>) -> Result<Vec3> {
        self.rotate_vector_with_tolerance(v, EPSILON)
    }

    pub fn rotate_vector_with_tolerance(&self, v: impl Into<Vec3>, eps: f64) -> Result<Vec3> {
        self.ensure_nonzero(eps, "used to rotate a vector")?;
        let q = self.normalize_with_tolerance(eps)?;
        Ok(q.sandwich(v.into()))
    }

    /// Undo [`Quaternion::rotate_vector`]: `q* ⊗ v ⊗ q`
    pub fn inverse_rotate_vector(&self, v: impl Into<Vec3>) -> Result<Vec3> {
        self.inverse_rotate_vector_with_tolerance(v, EPSILON)
    }

    pub fn inverse_rotate_vector_with_tolerance(
        &self,
        v: impl Into<Vec3>,
        eps: f64,
    ) -> Result<Vec3> {
        self.ensure_nonzero(eps, "used to rotate a vector")?;
        let q = self.normalize_with_tolerance(eps)?;
        Ok(q.conjugate().sandwich(v.into()))
    }

    /// `self ⊗ (0, v) ⊗ self*` for a unit quaternion
    #[inline]
    fn sandwich(self, v: Vec3) -> Vec3 {
        self.hamilton(Quaternion::from_vector(v))
            .hamilton(self.conjugate())
            .vector()
    }
}
