//! Rotation error types
//!
//! Every validation in this crate happens before any numeric work, and every
//! failure surfaces as one of these variants.

use std::fmt;

/// Error type for quaternion and rotation operations
#[derive(Debug, Clone, PartialEq)]
pub enum RotationError {
    /// Wrong-length sequence where a quaternion-like or vector-like value is required
    InvalidType(String),
    /// Euler axis sequence is not three characters drawn from `x`, `y`, `z`
    InvalidSequence(String),
    /// Zero-length axis, wrong-shaped matrix, wrong angle count
    InvalidArgument(String),
    /// Operation requires a quaternion with nonzero norm
    ZeroNorm(&'static str),
    /// Rotation matrix fails `M * M^T = I`
    NonOrthogonal,
    /// Three axis vectors are not mutually orthogonal unit vectors
    NonOrthonormalBasis,
    /// Division by a literal zero scalar
    DivisionByZero,
}

impl fmt::Display for RotationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RotationError::InvalidType(msg) => write!(f, "Invalid type: {}", msg),
            RotationError::InvalidSequence(seq) => write!(
                f,
                "Invalid Euler sequence '{}': expected three characters from 'x', 'y', 'z'",
                seq
            ),
            RotationError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            RotationError::ZeroNorm(op) => write!(f, "A quaternion with norm 0 cannot be {}", op),
            RotationError::NonOrthogonal => write!(f, "The rotation matrix must be orthogonal"),
            RotationError::NonOrthonormalBasis => {
                write!(f, "The axes must form an orthonormal basis")
            }
            RotationError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for RotationError {}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RotationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_norm_display() {
        let err = RotationError::ZeroNorm("converted");
        assert_eq!(format!("{}", err), "A quaternion with norm 0 cannot be converted");
    }

    #[test]
    fn test_orthogonality_display() {
        let msg = format!("{}", RotationError::NonOrthogonal);
        assert!(msg.contains("must be orthogonal"));

        let msg = format!("{}", RotationError::NonOrthonormalBasis);
        assert!(msg.contains("orthonormal basis"));
    }

    #[test]
    fn test_invalid_type_display() {
        let err = RotationError::InvalidType("Cannot convert [1.0, 2.0] to Quaternion".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("Cannot convert"));
        assert!(msg.contains("Quaternion"));
    }

    #[test]
    fn test_invalid_sequence_display() {
        let err = RotationError::InvalidSequence("xyw".to_string());
        assert!(format!("{}", err).contains("xyw"));
    }

    #[test]
    fn test_division_by_zero_is_distinct_from_zero_norm() {
        assert_ne!(RotationError::DivisionByZero, RotationError::ZeroNorm("inverted"));
    }

    #[test]
    fn test_error_trait_object() {
        let err: Box<dyn std::error::Error> = Box::new(RotationError::DivisionByZero);
        assert_eq!(err.to_string(), "Division by zero");
        assert!(err.source().is_none());
    }
}
