//! Quaternion and 3D Rotation Library
//!
//! This crate provides quaternion arithmetic and conversions between the
//! common representations of a 3D rotation.
//!
//! ## Core Types
//!
//! - [`Quaternion`] - 4-component hypercomplex number `(a, b, c, d)`
//! - [`Vec3`] - 3D vector for axes and rotated points
//! - [`Mat3`] - 3x3 row-major rotation matrix
//! - [`EulerSequence`] - validated three-axis Euler sequence
//!
//! ## Conversions
//!
//! - axis-angle: [`Quaternion::from_axis_angle`], [`Quaternion::to_axis_angle`]
//! - rotation matrix: [`Quaternion::from_rotation_matrix`], [`Quaternion::to_rotation_matrix`]
//! - axis triad: [`rotation_matrix_to_axis`], [`axis_to_rotation_matrix`]
//! - Euler angles: [`Quaternion::from_euler`], [`Quaternion::to_euler`]
//! - vectors: [`Quaternion::rotate_vector`], [`Quaternion::inverse_rotate_vector`]
//!
//! ## Tolerance
//!
//! Zero-norm checks, orthogonality checks and quaternion equality all use
//! [`EPSILON`] by default. Each of these operations has a
//! `*_with_tolerance` form taking an explicit tolerance instead.

mod error;
mod vec3;
mod quaternion;
pub mod mat3;
mod axis_angle;
pub mod matrix;
pub mod euler;
mod rotate;

/// Default tolerance for zero, orthogonality and equality checks
pub const EPSILON: f64 = 1e-9;

pub use error::{Result, RotationError};
pub use vec3::Vec3;
pub use quaternion::{product, quotient, Operand, Quaternion, QuaternionLike};
pub use mat3::Mat3;
pub use matrix::{
    axis_to_rotation_matrix, axis_to_rotation_matrix_with_tolerance, rotation_matrix_to_axis,
    rotation_matrix_to_axis_with_tolerance,
};
pub use euler::{Axis, EulerSequence};
