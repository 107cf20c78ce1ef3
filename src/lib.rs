//! Orientation frames for 3D design automation
//!
//! This crate builds on [`rot3d_math`] to place named coordinate frames:
//!
//! - [`LocalFrame`] - origin plus orientation quaternion, transforms points
//! - [`FrameBuilder`] - creates frames with the configured tolerance and Euler convention
//! - [`pointing_to_axis`] - look/up directions to an orthonormal axis triad
//! - [`Rot3dConfig`] - layered configuration (TOML files + environment)

pub mod config;
pub mod pointing;
mod frame;

pub use config::{ConfigError, Rot3dConfig};
pub use frame::{FrameBuilder, LocalFrame};
pub use pointing::{orientation_from_pointing, pointing_to_axis};

// Re-export commonly used types from rot3d_math for convenience
pub use rot3d_math::{Axis, EulerSequence, Mat3, Quaternion, RotationError, Vec3, EPSILON};
