//! Quaternion arithmetic
//!
//! A quaternion `q = a + b*i + c*j + d*k` has scalar part `a` and vector part
//! `(b, c, d)`. Arithmetic works on any quaternion; only the rotation
//! conversions (axis-angle, matrix, Euler, vector rotation) interpret a
//! quaternion as a rotation, and they normalize it first.
//!
//! Scalars take part in arithmetic through [`Operand`]: a scalar `s` is
//! promoted to the pure-real quaternion `(s, 0, 0, 0)`, so the Hamilton
//! product is written exactly once in [`Quaternion::hamilton`].

use std::fmt;

use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RotationError};
use crate::{Vec3, EPSILON};

/// Quaternion with scalar part `a` and vector part `(b, c, d)`
///
/// Equality is approximate: two quaternions compare equal when every
/// component differs by at most [`EPSILON`]. Use [`Quaternion::approx_eq`]
/// for a different tolerance.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar component
    pub a: f64,
    /// i component
    pub b: f64,
    /// j component
    pub c: f64,
    /// k component
    pub d: f64,
}

impl Quaternion {
    /// Zero quaternion, also the [`Default`]
    pub const ZERO: Self = Self { a: 0.0, b: 0.0, c: 0.0, d: 0.0 };

    /// Identity rotation
    pub const IDENTITY: Self = Self { a: 1.0, b: 0.0, c: 0.0, d: 0.0 };

    #[inline]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Pure-real quaternion `(s, 0, 0, 0)`
    #[inline]
    pub const fn from_scalar(s: f64) -> Self {
        Self::new(s, 0.0, 0.0, 0.0)
    }

    /// Pure quaternion `(0, v.x, v.y, v.z)`
    #[inline]
    pub const fn from_vector(v: Vec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// The components `(a, b, c, d)` unchanged
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64, f64) {
        (self.a, self.b, self.c, self.d)
    }

    #[inline]
    pub fn scalar(&self) -> f64 {
        self.a
    }

    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.b, self.c, self.d)
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.a * self.a + self.b * self.b + self.c * self.c + self.d * self.d
    }

    /// `sqrt(a² + b² + c² + d²)`
    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Whether the norm is within `eps` of zero
    #[inline]
    pub fn is_zero(&self, eps: f64) -> bool {
        self.norm() <= eps
    }

    /// Fail with [`RotationError::ZeroNorm`] naming `operation` if the norm is within `eps` of zero
    pub(crate) fn ensure_nonzero(&self, eps: f64, operation: &'static str) -> Result<()> {
        if self.is_zero(eps) {
            Err(RotationError::ZeroNorm(operation))
        } else {
            Ok(())
        }
    }

    /// Component-wise sum
    ///
    /// A scalar operand only adds to `a`.
    #[allow(clippy::should_implement_trait)]
    pub fn add(self, rhs: impl Into<Operand>) -> Self {
        let rhs = rhs.into().promote();
        Self::new(self.a + rhs.a, self.b + rhs.b, self.c + rhs.c, self.d + rhs.d)
    }

    /// Hamilton product `self ⊗ rhs`
    ///
    /// Not commutative: `p.hamilton(q)` and `q.hamilton(p)` differ in general.
    /// A scalar operand is promoted to `(s, 0, 0, 0)` first.
    pub fn hamilton(self, rhs: impl Into<Operand>) -> Self {
        let (a1, b1, c1, d1) = self.coefficients();
        let (a2, b2, c2, d2) = rhs.into().promote().coefficients();

        Self {
            a: a1 * a2 - b1 * b2 - c1 * c2 - d1 * d2,
            b: a1 * b2 + b1 * a2 + c1 * d2 - d1 * c2,
            c: a1 * c2 - b1 * d2 + c1 * a2 + d1 * b2,
            d: a1 * d2 + b1 * c2 - c1 * b2 + d1 * a2,
        }
    }

    /// Component-wise sign flip
    #[inline]
    pub fn negate(self) -> Self {
        Self::new(-self.a, -self.b, -self.c, -self.d)
    }

    /// `(a, -b, -c, -d)`
    #[inline]
    pub fn conjugate(self) -> Self {
        Self::new(self.a, -self.b, -self.c, -self.d)
    }

    /// Divide every component by a nonzero scalar
    #[inline]
    fn scaled_down(self, divisor: f64) -> Self {
        Self::new(self.a / divisor, self.b / divisor, self.c / divisor, self.d / divisor)
    }

    /// Unit quaternion pointing the same way as `self`
    pub fn normalize(self) -> Result<Self> {
        self.normalize_with_tolerance(EPSILON)
    }

    pub fn normalize_with_tolerance(self, eps: f64) -> Result<Self> {
        self.ensure_nonzero(eps, "normalized")?;
        Ok(self.scaled_down(self.norm()))
    }

    /// `conjugate(q) / norm(q)²`
    pub fn inverse(self) -> Result<Self> {
        self.inverse_with_tolerance(EPSILON)
    }

    pub fn inverse_with_tolerance(self, eps: f64) -> Result<Self> {
        self.ensure_nonzero(eps, "inverted")?;
        Ok(self.conjugate().scaled_down(self.norm_squared()))
    }

    /// `self ⊗ inverse(rhs)`
    ///
    /// Dividing by a zero scalar fails with [`RotationError::DivisionByZero`];
    /// dividing by a zero quaternion fails with [`RotationError::ZeroNorm`].
    pub fn checked_div(self, rhs: impl Into<Operand>) -> Result<Self> {
        self.checked_div_with_tolerance(rhs, EPSILON)
    }

    pub fn checked_div_with_tolerance(self, rhs: impl Into<Operand>, eps: f64) -> Result<Self> {
        let divisor = match rhs.into() {
            Operand::Scalar(s) if s.abs() <= eps => return Err(RotationError::DivisionByZero),
            operand => operand.promote(),
        };
        Ok(self.hamilton(divisor.inverse_with_tolerance(eps)?))
    }

    /// Component-wise comparison within `eps`
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.a - other.a).abs() <= eps
            && (self.b - other.b).abs() <= eps
            && (self.c - other.c).abs() <= eps
            && (self.d - other.d).abs() <= eps
    }

    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        bytemuck::cast(self)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quaternion({}, {}, {}, {})", self.a, self.b, self.c, self.d)
    }
}

impl PartialEq for Quaternion {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, EPSILON)
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.approx_eq(other, epsilon)
    }
}

/// Anything accepted where a quaternion is expected
#[derive(Clone, Copy, Debug)]
pub enum QuaternionLike {
    Quaternion(Quaternion),
    Components([f64; 4]),
}

impl QuaternionLike {
    /// Canonical quaternion for this input
    pub fn into_quaternion(self) -> Quaternion {
        match self {
            QuaternionLike::Quaternion(q) => q,
            QuaternionLike::Components(c) => bytemuck::cast(c),
        }
    }
}

impl From<Quaternion> for QuaternionLike {
    fn from(q: Quaternion) -> Self {
        QuaternionLike::Quaternion(q)
    }
}

impl From<[f64; 4]> for QuaternionLike {
    fn from(c: [f64; 4]) -> Self {
        QuaternionLike::Components(c)
    }
}

impl From<QuaternionLike> for Quaternion {
    fn from(q: QuaternionLike) -> Self {
        q.into_quaternion()
    }
}

impl From<[f64; 4]> for Quaternion {
    fn from(c: [f64; 4]) -> Self {
        QuaternionLike::Components(c).into_quaternion()
    }
}

impl From<(f64, f64, f64, f64)> for Quaternion {
    fn from((a, b, c, d): (f64, f64, f64, f64)) -> Self {
        Self::new(a, b, c, d)
    }
}

impl From<Quaternion> for [f64; 4] {
    fn from(q: Quaternion) -> Self {
        q.to_array()
    }
}

impl TryFrom<&[f64]> for Quaternion {
    type Error = RotationError;

    fn try_from(values: &[f64]) -> Result<Self> {
        let components: [f64; 4] = values.try_into().map_err(|_| {
            RotationError::InvalidType(format!("Cannot convert {:?} to Quaternion", values))
        })?;
        Ok(components.into())
    }
}

/// A scalar or a quaternion taking part in arithmetic
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    Scalar(f64),
    Quaternion(Quaternion),
}

impl Operand {
    /// The quaternion this operand stands for; scalars become `(s, 0, 0, 0)`
    #[inline]
    pub fn promote(self) -> Quaternion {
        match self {
            Operand::Scalar(s) => Quaternion::from_scalar(s),
            Operand::Quaternion(q) => q,
        }
    }
}

impl From<f64> for Operand {
    fn from(s: f64) -> Self {
        Operand::Scalar(s)
    }
}

impl From<Quaternion> for Operand {
    fn from(q: Quaternion) -> Self {
        Operand::Quaternion(q)
    }
}

impl From<[f64; 4]> for Operand {
    fn from(c: [f64; 4]) -> Self {
        Operand::Quaternion(c.into())
    }
}

impl From<QuaternionLike> for Operand {
    fn from(q: QuaternionLike) -> Self {
        Operand::Quaternion(q.into_quaternion())
    }
}

/// Product of two operands
///
/// Two scalars give a plain scalar product; otherwise the Hamilton product of
/// the promoted operands.
pub fn product(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Operand {
    match (lhs.into(), rhs.into()) {
        (Operand::Scalar(l), Operand::Scalar(r)) => Operand::Scalar(l * r),
        (lhs, rhs) => Operand::Quaternion(lhs.promote().hamilton(rhs)),
    }
}

/// Quotient `lhs ⊗ inverse(rhs)` of two operands
///
/// Two scalars give a plain scalar quotient.
pub fn quotient(lhs: impl Into<Operand>, rhs: impl Into<Operand>) -> Result<Operand> {
    match (lhs.into(), rhs.into()) {
        (Operand::Scalar(_), Operand::Scalar(r)) if r.abs() <= EPSILON => {
            Err(RotationError::DivisionByZero)
        }
        (Operand::Scalar(l), Operand::Scalar(r)) => Ok(Operand::Scalar(l / r)),
        (lhs, rhs) => lhs.promote().checked_div(rhs).map(Operand::Quaternion),
    }
}

// Operator overloads

impl<R: Into<Operand>> std::ops::Add<R> for Quaternion {
    type Output = Self;
    #[inline]
    fn add(self, rhs: R) -> Self {
        Quaternion::add(self, rhs)
    }
}

impl std::ops::Add<Quaternion> for f64 {
    type Output = Quaternion;
    #[inline]
    fn add(self, rhs: Quaternion) -> Quaternion {
        rhs.add(self)
    }
}

impl std::ops::Add<Quaternion> for [f64; 4] {
    type Output = Quaternion;
    #[inline]
    fn add(self, rhs: Quaternion) -> Quaternion {
        Quaternion::from(self).add(rhs)
    }
}

impl<R: Into<Operand>> std::ops::AddAssign<R> for Quaternion {
    #[inline]
    fn add_assign(&mut self, rhs: R) {
        *self = Quaternion::add(*self, rhs);
    }
}

impl<R: Into<Operand>> std::ops::Sub<R> for Quaternion {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: R) -> Self {
        Quaternion::add(self, rhs.into().promote().negate())
    }
}

impl std::ops::Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<R: Into<Operand>> std::ops::Mul<R> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: R) -> Self {
        self.hamilton(rhs)
    }
}

impl std::ops::Mul<Quaternion> for f64 {
    type Output = Quaternion;
    #[inline]
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::from_scalar(self).hamilton(rhs)
    }
}

impl std::ops::Mul<Quaternion> for [f64; 4] {
    type Output = Quaternion;
    #[inline]
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::from(self).hamilton(rhs)
    }
}

impl<R: Into<Operand>> std::ops::MulAssign<R> for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: R) {
        *self = self.hamilton(rhs);
    }
}

/// Division is fallible, so the operator yields a `Result`
impl<R: Into<Operand>> std::ops::Div<R> for Quaternion {
    type Output = Result<Quaternion>;
    #[inline]
    fn div(self, rhs: R) -> Result<Quaternion> {
        self.checked_div(rhs)
    }
}

impl std::ops::Div<Quaternion> for f64 {
    type Output = Result<Quaternion>;
    #[inline]
    fn div(self, rhs: Quaternion) -> Result<Quaternion> {
        Quaternion::from_scalar(self).checked_div(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn q(a: f64, b: f64, c: f64, d: f64) -> Quaternion {
        Quaternion::new(a, b, c, d)
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Quaternion::default().coefficients(), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_coefficients_unchanged() {
        assert_eq!(q(1.5, -2.0, 3.25, 4.0).coefficients(), (1.5, -2.0, 3.25, 4.0));
    }

    #[test]
    fn test_add() {
        assert_eq!(q(1.0, 2.0, 3.0, 4.0) + q(5.0, 6.0, 7.0, 8.0), q(6.0, 8.0, 10.0, 12.0));
    }

    #[test]
    fn test_add_components() {
        assert_eq!(q(1.0, 2.0, 3.0, 4.0) + [1.0, 1.0, 1.0, 1.0], q(2.0, 3.0, 4.0, 5.0));
        assert_eq!([1.0, 1.0, 1.0, 1.0] + q(1.0, 2.0, 3.0, 4.0), q(2.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_add_scalar_only_touches_real_part() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p + 2.0, q(3.0, 2.0, 3.0, 4.0));
        assert_eq!(2.0 + p, p + 2.0);
    }

    #[test]
    fn test_add_assign_and_sub() {
        let mut p = q(1.0, 2.0, 3.0, 4.0);
        p += q(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p, q(2.0, 3.0, 4.0, 5.0));
        assert_eq!(p - q(2.0, 3.0, 4.0, 5.0), Quaternion::ZERO);
        assert_eq!(p - 2.0, q(0.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn test_hamilton_product() {
        assert_eq!(q(1.0, 2.0, 3.0, 4.0) * q(5.0, 6.0, 7.0, 8.0), q(-60.0, 12.0, 30.0, 24.0));
    }

    #[test]
    fn test_hamilton_basis_units() {
        let i = q(0.0, 1.0, 0.0, 0.0);
        let j = q(0.0, 0.0, 1.0, 0.0);
        let k = q(0.0, 0.0, 0.0, 1.0);
        let minus_one = q(-1.0, 0.0, 0.0, 0.0);

        assert_eq!(i * i, minus_one);
        assert_eq!(j * j, minus_one);
        assert_eq!(k * k, minus_one);
        assert_eq!(i * j * k, minus_one);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
    }

    #[test]
    fn test_hamilton_not_commutative() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        let r = q(5.0, 6.0, 7.0, 8.0);
        assert_ne!(p * r, r * p);
    }

    #[test]
    fn test_hamilton_associative() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        let r = q(0.5, -1.0, 2.0, 0.25);
        let s = q(-3.0, 0.0, 1.0, 2.0);
        assert_abs_diff_eq!((p * r) * s, p * (r * s), epsilon = 1e-9);
    }

    #[test]
    fn test_scalar_multiplication() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p * 2.0, q(2.0, 4.0, 6.0, 8.0));
        assert_eq!(2.0 * p, q(2.0, 4.0, 6.0, 8.0));
    }

    #[test]
    fn test_product_of_scalars_stays_scalar() {
        assert_eq!(product(3.0, 4.0), Operand::Scalar(12.0));
        assert_eq!(
            product(2.0, q(1.0, 2.0, 3.0, 4.0)),
            Operand::Quaternion(q(2.0, 4.0, 6.0, 8.0))
        );
    }

    #[test]
    fn test_negate_and_conjugate() {
        let p = q(1.0, -2.0, 3.0, -4.0);
        assert_eq!(-p, q(-1.0, 2.0, -3.0, 4.0));
        assert_eq!(p.conjugate(), q(1.0, 2.0, -3.0, 4.0));
    }

    #[test]
    fn test_norm() {
        assert_abs_diff_eq!(q(1.0, 2.0, 3.0, 4.0).norm(), 30.0_f64.sqrt());
        assert_eq!(Quaternion::ZERO.norm(), 0.0);
    }

    #[test]
    fn test_normalize() {
        let n = q(1.0, 2.0, 3.0, 4.0).normalize().unwrap();
        assert_abs_diff_eq!(n.norm(), 1.0, epsilon = EPSILON);
        assert_eq!(q(0.0, 0.0, 3.0, 0.0).normalize().unwrap(), q(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn test_normalize_zero_fails() {
        assert_eq!(
            Quaternion::ZERO.normalize(),
            Err(RotationError::ZeroNorm("normalized"))
        );
    }

    #[test]
    fn test_normalize_with_loose_tolerance() {
        let tiny = q(1e-7, 0.0, 0.0, 0.0);
        assert!(tiny.normalize().is_ok());
        assert!(tiny.normalize_with_tolerance(1e-6).is_err());
    }

    #[test]
    fn test_inverse() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        let inv = p.inverse().unwrap();
        assert_eq!(inv, q(1.0 / 30.0, -2.0 / 30.0, -3.0 / 30.0, -4.0 / 30.0));
        assert_eq!(p * inv, Quaternion::IDENTITY);
        assert_eq!(inv * p, Quaternion::IDENTITY);
    }

    #[test]
    fn test_inverse_zero_fails() {
        assert!(matches!(
            Quaternion::ZERO.inverse(),
            Err(RotationError::ZeroNorm(_))
        ));
    }

    #[test]
    fn test_division() {
        let result = (q(1.0, 2.0, 3.0, 4.0) / q(1.0, -1.0, 1.0, 2.0)).unwrap();
        assert_eq!(result, q(10.0 / 7.0, 1.0 / 7.0, 10.0 / 7.0, -3.0 / 7.0));
    }

    #[test]
    fn test_division_order_matters() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        let r = q(1.0, -1.0, 1.0, 2.0);
        let pr = (p / r).unwrap();
        let rp = (r / p).unwrap();
        assert_ne!(pr, rp);
        assert_eq!(pr, rp.inverse().unwrap());
        assert_eq!(pr * r, p);
    }

    #[test]
    fn test_division_by_scalar() {
        assert_eq!((q(2.0, 4.0, 6.0, 8.0) / 2.0).unwrap(), q(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_scalar_divided_by_quaternion() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        assert_eq!((1.0 / p).unwrap(), p.inverse().unwrap());
    }

    #[test]
    fn test_division_by_zero_scalar() {
        assert_eq!(q(1.0, 2.0, 3.0, 4.0) / 0.0, Err(RotationError::DivisionByZero));
        assert_eq!(quotient(1.0, 0.0), Err(RotationError::DivisionByZero));
    }

    #[test]
    fn test_division_by_zero_quaternion_is_zero_norm() {
        assert!(matches!(
            q(1.0, 2.0, 3.0, 4.0) / Quaternion::ZERO,
            Err(RotationError::ZeroNorm(_))
        ));
    }

    #[test]
    fn test_quotient_of_scalars_stays_scalar() {
        assert_eq!(quotient(3.0, 4.0), Ok(Operand::Scalar(0.75)));
    }

    #[test]
    fn test_approximate_equality() {
        let p = q(1.0, 2.0, 3.0, 4.0);
        assert_eq!(p, q(1.0 + 1e-12, 2.0, 3.0, 4.0 - 1e-12));
        assert_ne!(p, q(1.0 + 1e-6, 2.0, 3.0, 4.0));
        assert!(p.approx_eq(&q(1.0 + 1e-6, 2.0, 3.0, 4.0), 1e-5));
    }

    #[test]
    fn test_coercion_from_components() {
        let like = QuaternionLike::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(like.into_quaternion(), q(1.0, 2.0, 3.0, 4.0));
        assert_eq!(
            QuaternionLike::from(q(1.0, 2.0, 3.0, 4.0)).into_quaternion(),
            q(1.0, 2.0, 3.0, 4.0)
        );
        assert_eq!(Quaternion::from((1.0, 2.0, 3.0, 4.0)), q(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_coercion_from_wrong_length_slice_fails() {
        let three = [1.0, 2.0, 3.0];
        let err = Quaternion::try_from(&three[..]).unwrap_err();
        assert!(matches!(err, RotationError::InvalidType(_)));
        assert!(err.to_string().contains("Cannot convert"));

        let four = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(Quaternion::try_from(four.as_slice()).unwrap(), q(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn test_to_array_matches_layout() {
        let arr: [f64; 4] = q(1.0, 2.0, 3.0, 4.0).into();
        assert_eq!(arr, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(q(1.0, 0.0, -0.5, 2.0).to_string(), "Quaternion(1, 0, -0.5, 2)");
    }
}
