//! Euler angle conversions
//!
//! An Euler rotation is three elementary rotations about the axes named by a
//! three-letter sequence such as `"xyz"` or `"zxz"`.
//!
//! - **Intrinsic** rotations turn about the axes of the rotating frame and
//!   compose in sequence order: `R = R1 ⊗ R2 ⊗ R3`.
//! - **Extrinsic** rotations turn about the fixed axes and compose in
//!   reverse order: `R = R3 ⊗ R2 ⊗ R1`.
//!
//! Intrinsic angles `(α, β, γ)` for `"xyz"` describe the same rotation as
//! extrinsic angles `(γ, β, α)` for `"zyx"`, which is how [`Quaternion::to_euler`]
//! handles the intrinsic case.
//!
//! ## Gimbal lock
//!
//! When the middle angle reaches a degenerate value (0 or π for proper
//! Euler sequences, ±π/2 for Tait-Bryan sequences) the first and third axes
//! line up and only their sum or difference is defined. The third angle is
//! then reported as 0 and the whole remaining rotation goes to the first
//! angle, for both intrinsic and extrinsic sequences.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RotationError};
use crate::{Quaternion, Vec3, EPSILON};

/// One of the three coordinate axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// 0 for X, 1 for Y, 2 for Z
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit basis vector along this axis
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'x' => Some(Axis::X),
            'y' => Some(Axis::Y),
            'z' => Some(Axis::Z),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

/// A validated three-axis Euler sequence
///
/// Parsed case-insensitively from strings like `"xyz"` or `"ZXZ"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EulerSequence([Axis; 3]);

impl EulerSequence {
    pub const fn new(first: Axis, second: Axis, third: Axis) -> Self {
        Self([first, second, third])
    }

    #[inline]
    pub fn axes(&self) -> [Axis; 3] {
        self.0
    }

    /// Same axes in reverse order
    #[inline]
    pub fn reversed(&self) -> Self {
        Self([self.0[2], self.0[1], self.0[0]])
    }

    /// First and third axes coincide (`zxz`, `xyx`, ...)
    #[inline]
    pub fn is_proper_euler(&self) -> bool {
        self.0[0] == self.0[2]
    }

    /// All three axes differ (`xyz`, `zyx`, ...)
    #[inline]
    pub fn is_tait_bryan(&self) -> bool {
        self.0[0] != self.0[1] && self.0[1] != self.0[2] && self.0[0] != self.0[2]
    }

    /// Whether angles can be recovered for this sequence
    ///
    /// True for the 12 sequences whose adjacent axes differ.
    #[inline]
    pub fn is_decomposable(&self) -> bool {
        self.0[0] != self.0[1] && self.0[1] != self.0[2]
    }
}

impl FromStr for EulerSequence {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || RotationError::InvalidSequence(s.to_string());

        let mut axes = [Axis::X; 3];
        let mut chars = s.chars();
        for slot in axes.iter_mut() {
            *slot = chars.next().and_then(Axis::from_char).ok_or_else(invalid)?;
        }
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(axes))
    }
}

impl TryFrom<&str> for EulerSequence {
    type Error = RotationError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for EulerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in self.0 {
            write!(f, "{}", axis.as_char())?;
        }
        Ok(())
    }
}

/// Wrap an angle in `(-2π, 2π]` into `[-π, π]`
#[inline]
fn wrap_angle(angle: f64) -> f64 {
    if angle < -PI {
        angle + TAU
    } else if angle > PI {
        angle - TAU
    } else {
        angle
    }
}

impl Quaternion {
    /// Create a unit quaternion from three Euler angles (radians)
    ///
    /// `sequence` is three characters from `x`, `y`, `z` (any case).
    ///
    /// ```
    /// use rot3d_math::{Quaternion, Vec3};
    /// use std::f64::consts::FRAC_PI_2;
    ///
    /// let q = Quaternion::from_euler([FRAC_PI_2, 0.0, 0.0], "xyz", false).unwrap();
    /// assert_eq!(q, Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2).unwrap());
    /// ```
    pub fn from_euler(angles: [f64; 3], sequence: &str, extrinsic: bool) -> Result<Self> {
        Ok(Self::from_euler_sequence(angles, sequence.parse()?, extrinsic))
    }

    /// Like [`Quaternion::from_euler`] for angles given as a slice
    ///
    /// Fails with [`RotationError::InvalidArgument`] unless there are exactly 3 angles.
    pub fn from_euler_slice(angles: &[f64], sequence: &str, extrinsic: bool) -> Result<Self> {
        let sequence: EulerSequence = sequence.parse()?;
        let angles: [f64; 3] = angles.try_into().map_err(|_| {
            RotationError::InvalidArgument(format!("expected 3 Euler angles, got {}", angles.len()))
        })?;
        Ok(Self::from_euler_sequence(angles, sequence, extrinsic))
    }

    /// Compose the elementary rotations of a parsed sequence
    pub fn from_euler_sequence(angles: [f64; 3], sequence: EulerSequence, extrinsic: bool) -> Self {
        let [r1, r2, r3] = [0, 1, 2]
            .map(|i| Self::from_unit_axis_angle(sequence.axes()[i].unit(), angles[i]));

        if extrinsic {
            r3.hamilton(r2).hamilton(r1)
        } else {
            r1.hamilton(r2).hamilton(r3)
        }
    }

    /// Euler angles (radians) of this rotation for the given sequence
    ///
    /// The quaternion is normalized first. First and third angles lie in
    /// `[-π, π]`; the middle angle lies in `[-π/2, π/2]` for Tait-Bryan
    /// sequences and in `[0, π]` for proper Euler sequences. Sequences with
    /// repeated adjacent axes (`xxy`) have no decomposition and fail with
    /// [`RotationError::InvalidSequence`].
    pub fn to_euler(&self, sequence: &str, extrinsic: bool) -> Result<[f64; 3]> {
        self.to_euler_with_tolerance(sequence, extrinsic, EPSILON)
    }

    pub fn to_euler_with_tolerance(
        &self,
        sequence: &str,
        extrinsic: bool,
        eps: f64,
    ) -> Result<[f64; 3]> {
        self.to_euler_sequence(sequence.parse()?, extrinsic, eps)
    }

    /// Decompose into angles for a parsed sequence
    ///
    /// `eps` bounds both the zero-norm check and gimbal lock detection.
    pub fn to_euler_sequence(
        &self,
        sequence: EulerSequence,
        extrinsic: bool,
        eps: f64,
    ) -> Result<[f64; 3]> {
        if !sequence.is_decomposable() {
            return Err(RotationError::InvalidSequence(sequence.to_string()));
        }
        self.ensure_nonzero(eps, "converted")?;
        let q = self.normalize_with_tolerance(eps)?;

        // Solve the extrinsic problem; intrinsic is extrinsic on the reversed sequence
        let fixed = if extrinsic { sequence } else { sequence.reversed() };
        let [i, j, k] = fixed.axes().map(Axis::index);

        let proper = i == k;
        // Tait-Bryan angles are solved as the proper Euler problem on (i, j, k)
        let k = if proper { 3 - i - j } else { k };
        let sign = {
            let (i, j, k) = (i as i32, j as i32, k as i32);
            f64::from((i - j) * (j - k) * (k - i) / 2)
        };

        let v = q.vector().to_array();
        let (a, b, c, d) = if proper {
            (q.a, v[i], v[j], v[k] * sign)
        } else {
            (q.a - v[j], v[i] + v[k] * sign, v[j] + q.a, v[k] * sign - v[i])
        };

        let mut middle = 2.0 * c.hypot(d).atan2(a.hypot(b));
        let half_sum = b.atan2(a);
        let half_diff = d.atan2(c);

        let (first, mut third);
        if middle.abs() > eps && (middle - PI).abs() > eps {
            first = half_sum - half_diff;
            third = half_sum + half_diff;
        } else {
            // Gimbal lock: the caller's third angle is zero. For intrinsic
            // input that is the first angle of the reversed problem.
            let sum_locked = middle.abs() <= eps;
            if extrinsic {
                third = 0.0;
                first = if sum_locked { 2.0 * half_sum } else { -2.0 * half_diff };
            } else {
                first = 0.0;
                third = if sum_locked { 2.0 * half_sum } else { 2.0 * half_diff };
            }
        }

        if !proper {
            third *= sign;
            middle -= FRAC_PI_2;
        }

        let angles = if extrinsic {
            [first, middle, third]
        } else {
            [third, middle, first]
        };
        Ok(angles.map(wrap_angle))
    }
}
