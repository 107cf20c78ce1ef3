//! Local coordinate frames
//!
//! A [`LocalFrame`] places a named coordinate system in its parent: an origin
//! plus an orientation quaternion whose rotation maps the parent's axes onto
//! the frame's axes.

use rot3d_math::{
    rotation_matrix_to_axis_with_tolerance, Axis, EulerSequence, Quaternion, Result, Vec3,
};
use serde::{Serialize, Deserialize};

use crate::config::{ConfigError, Rot3dConfig};
use crate::pointing;

fn default_epsilon() -> f64 {
    rot3d_math::EPSILON
}

/// A named coordinate frame with origin and orientation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    /// Frame name
    pub name: String,
    /// Tolerance used when the frame transforms points
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    /// Origin in parent coordinates
    pub origin: Vec3,
    /// Unit quaternion rotating parent axes onto frame axes
    pub orientation: Quaternion,
}

impl LocalFrame {
    /// Frame coinciding with its parent
    pub fn identity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: Vec3::ZERO,
            orientation: Quaternion::IDENTITY,
            epsilon: default_epsilon(),
        }
    }

    /// Transform a point from frame coordinates to parent coordinates
    ///
    /// Rotates, then translates.
    pub fn to_global(&self, p: impl Into<Vec3>) -> Result<Vec3> {
        let rotated = self.orientation.rotate_vector_with_tolerance(p, self.epsilon)?;
        Ok(rotated + self.origin)
    }

    /// Transform a point from parent coordinates to frame coordinates
    pub fn to_local(&self, p: impl Into<Vec3>) -> Result<Vec3> {
        self.orientation
            .inverse_rotate_vector_with_tolerance(p.into() - self.origin, self.epsilon)
    }

    /// Transform a direction from frame to parent coordinates (no translation)
    pub fn direction_to_global(&self, d: impl Into<Vec3>) -> Result<Vec3> {
        self.orientation.rotate_vector_with_tolerance(d, self.epsilon)
    }

    /// The frame's axes expressed in parent coordinates
    pub fn axes(&self) -> Result<(Vec3, Vec3, Vec3)> {
        let m = self.orientation.to_rotation_matrix_with_tolerance(self.epsilon)?;
        rotation_matrix_to_axis_with_tolerance(m, self.epsilon)
    }

    /// Express `child`, given relative to this frame, in this frame's parent
    ///
    /// The composed frame keeps the child's name.
    pub fn compose(&self, child: &LocalFrame) -> Result<LocalFrame> {
        let orientation = self
            .orientation
            .hamilton(child.orientation)
            .normalize_with_tolerance(self.epsilon)?;
        Ok(LocalFrame {
            name: child.name.clone(),
            origin: self.to_global(child.origin)?,
            orientation,
            epsilon: self.epsilon,
        })
    }

    /// Move the origin by an offset in parent coordinates
    pub fn translate(&mut self, offset: Vec3) {
        self.origin += offset;
    }

    /// Apply an extra rotation after the current orientation
    pub fn rotate(&mut self, rotation: Quaternion) -> Result<()> {
        self.orientation = rotation
            .hamilton(self.orientation)
            .normalize_with_tolerance(self.epsilon)?;
        Ok(())
    }
}

/// Builds frames with a configured tolerance and Euler convention
#[derive(Clone, Copy, Debug)]
pub struct FrameBuilder {
    epsilon: f64,
    sequence: EulerSequence,
    extrinsic: bool,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self {
            epsilon: rot3d_math::EPSILON,
            sequence: EulerSequence::new(Axis::X, Axis::Y, Axis::Z),
            extrinsic: false,
        }
    }
}

impl FrameBuilder {
    /// Builder using the tolerance and Euler convention of `config`
    pub fn new(config: &Rot3dConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            epsilon: config.tolerance.epsilon,
            sequence: config.euler.parsed_sequence()?,
            extrinsic: config.euler.extrinsic,
        })
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[inline]
    pub fn sequence(&self) -> EulerSequence {
        self.sequence
    }

    #[inline]
    pub fn extrinsic(&self) -> bool {
        self.extrinsic
    }

    fn frame(&self, name: impl Into<String>, origin: Vec3, orientation: Quaternion) -> LocalFrame {
        let frame = LocalFrame {
            name: name.into(),
            origin,
            orientation,
            epsilon: self.epsilon,
        };
        log::debug!(
            "Built frame '{}' at {:?} with orientation {}",
            frame.name,
            frame.origin.to_array(),
            frame.orientation
        );
        frame
    }

    /// Frame with parent-aligned axes
    pub fn identity(&self, name: impl Into<String>, origin: impl Into<Vec3>) -> LocalFrame {
        self.frame(name, origin.into(), Quaternion::IDENTITY)
    }

    /// Frame whose x axis points along `look` with `up` in its xy plane
    pub fn from_pointing(
        &self,
        name: impl Into<String>,
        origin: impl Into<Vec3>,
        look: impl Into<Vec3>,
        up: impl Into<Vec3>,
    ) -> Result<LocalFrame> {
        let orientation = pointing::orientation_from_pointing(look, up, self.epsilon)?;
        Ok(self.frame(name, origin.into(), orientation))
    }

    /// Frame from Euler angles in the configured convention
    pub fn from_euler(
        &self,
        name: impl Into<String>,
        origin: impl Into<Vec3>,
        angles: [f64; 3],
    ) -> LocalFrame {
        let orientation = Quaternion::from_euler_sequence(angles, self.sequence, self.extrinsic);
        self.frame(name, origin.into(), orientation)
    }

    /// Frame rotated by `angle` radians about `axis`
    pub fn from_axis_angle(
        &self,
        name: impl Into<String>,
        origin: impl Into<Vec3>,
        axis: impl Into<Vec3>,
        angle: f64,
    ) -> Result<LocalFrame> {
        let orientation = Quaternion::from_axis_angle_with_tolerance(axis, angle, self.epsilon)?;
        Ok(self.frame(name, origin.into(), orientation))
    }

    /// Frame from an explicit orthonormal axis triad
    pub fn from_axes(
        &self,
        name: impl Into<String>,
        origin: impl Into<Vec3>,
        x_axis: impl Into<Vec3>,
        y_axis: impl Into<Vec3>,
        z_axis: impl Into<Vec3>,
    ) -> Result<LocalFrame> {
        let m = rot3d_math::axis_to_rotation_matrix_with_tolerance(
            x_axis,
            y_axis,
            z_axis,
            self.epsilon,
        )?;
        let orientation = Quaternion::from_rotation_matrix_with_tolerance(m, self.epsilon)?;
        Ok(self.frame(name, origin.into(), orientation))
    }

    /// Euler angles of a frame's orientation in the configured convention
    pub fn euler_angles(&self, frame: &LocalFrame) -> Result<[f64; 3]> {
        frame
            .orientation
            .to_euler_sequence(self.sequence, self.extrinsic, self.epsilon)
    }
}
