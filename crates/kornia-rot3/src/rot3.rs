//! # Rot3 — SO(3) as an orthonormal 3×3 matrix
//!
//! [`Rot3`] stores a rotation as its three column vectors `r1`, `r2`, `r3`, so that
//! `R = [r1 | r2 | r3]`. The matrix is expected to satisfy `RᵀR = I` and `det(R) = +1`.
//!
//! The invariant is guaranteed only by the controlled factories ([`Rot3::rx`],
//! [`Rot3::ry`], [`Rot3::rz`], [`Rot3::rz_ry_rx`], [`Rot3::rodrigues`],
//! [`Rot3::from_axis_angle`]) and by quaternion conversion. The raw constructors
//! ([`Rot3::new`], [`Rot3::from_entries`], [`Rot3::from_matrix`]) take the caller's
//! input as-is; feeding them a non-orthonormal matrix yields numerically meaningless
//! results downstream rather than an error.

use crate::Rot3Error;
use glam::{DMat3, DQuat, DVec3};
use rand::Rng;
use std::fmt;

/// Tolerance on `|‖axis‖² - 1|` accepted by the axis-angle constructor.
const AXIS_NORM_TOLERANCE: f64 = 1e-9;

/// Below this angle [`Rot3::rodrigues`] returns the identity.
const RODRIGUES_ANGLE_EPSILON: f64 = 1e-10;

/// A 3D rotation, stored column-wise as an orthonormal 3×3 matrix.
///
/// `Rot3` is a plain value: every operation returns a new instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rot3 {
    pub(crate) r1: DVec3,
    pub(crate) r2: DVec3,
    pub(crate) r3: DVec3,
}

impl Default for Rot3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Rot3 {
    /// The identity rotation.
    pub const IDENTITY: Self = Self {
        r1: DVec3::X,
        r2: DVec3::Y,
        r3: DVec3::Z,
    };

    /// Create a rotation from its three columns.
    ///
    /// NOTE: the columns are not checked for orthonormality.
    #[inline]
    pub fn new(r1: DVec3, r2: DVec3, r3: DVec3) -> Self {
        Self { r1, r2, r3 }
    }

    /// Create a rotation from its nine entries given in row-major order.
    ///
    /// NOTE: the entries are not checked for orthonormality.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn from_entries(
        r11: f64,
        r12: f64,
        r13: f64,
        r21: f64,
        r22: f64,
        r23: f64,
        r31: f64,
        r32: f64,
        r33: f64,
    ) -> Self {
        Self {
            r1: DVec3::new(r11, r21, r31),
            r2: DVec3::new(r12, r22, r32),
            r3: DVec3::new(r13, r23, r33),
        }
    }

    /// Create a rotation from a 3×3 matrix.
    ///
    /// NOTE: the matrix is not checked for orthonormality.
    #[inline]
    pub fn from_matrix(mat: &DMat3) -> Self {
        Self {
            r1: mat.x_axis,
            r2: mat.y_axis,
            r3: mat.z_axis,
        }
    }

    /// Create a rotation from a unit quaternion.
    /// NOTE: quaternion should be normalized
    pub fn from_quaternion(quat: DQuat) -> Self {
        Self::from_matrix(&DMat3::from_quat(quat))
    }

    /// Convert the rotation to a unit quaternion.
    pub fn to_quaternion(&self) -> DQuat {
        DQuat::from_mat3(&self.matrix())
    }

    /// Sample a rotation uniformly over SO(3).
    pub fn from_random() -> Self {
        let mut rng = rand::rng();

        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        // Shoemake's method for uniform unit quaternions
        let one_minus_r1_sqrt = (1.0 - r1).sqrt();
        let r1_sqrt = r1.sqrt();

        let w = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).cos();
        let x = one_minus_r1_sqrt * (2.0 * std::f64::consts::PI * r2).sin();
        let y = r1_sqrt * (2.0 * std::f64::consts::PI * r3).cos();
        let z = r1_sqrt * (2.0 * std::f64::consts::PI * r3).sin();

        Self::from_quaternion(DQuat::from_xyzw(x, y, z, w).normalize())
    }

    /// Rotation of `t` radians around the x axis.
    pub fn rx(t: f64) -> Self {
        let (st, ct) = t.sin_cos();
        #[rustfmt::skip]
        let rot = Self::from_entries(
            1.0, 0.0, 0.0,
            0.0,  ct, -st,
            0.0,  st,  ct,
        );
        rot
    }

    /// Rotation of `t` radians around the y axis.
    pub fn ry(t: f64) -> Self {
        let (st, ct) = t.sin_cos();
        #[rustfmt::skip]
        let rot = Self::from_entries(
             ct, 0.0,  st,
            0.0, 1.0, 0.0,
            -st, 0.0,  ct,
        );
        rot
    }

    /// Rotation of `t` radians around the z axis.
    pub fn rz(t: f64) -> Self {
        let (st, ct) = t.sin_cos();
        #[rustfmt::skip]
        let rot = Self::from_entries(
             ct, -st, 0.0,
             st,  ct, 0.0,
            0.0, 0.0, 1.0,
        );
        rot
    }

    /// Compute `Rz(z) * Ry(y) * Rx(x)` in a single pass.
    ///
    /// Same result as composing the three elementary rotations, without the two
    /// intermediate matrix products.
    pub fn rz_ry_rx(x: f64, y: f64, z: f64) -> Self {
        let (sx, cx) = x.sin_cos();
        let (sy, cy) = y.sin_cos();
        let (sz, cz) = z.sin_cos();

        let ss_ = sx * sy;
        let cs_ = cx * sy;
        let sc_ = sx * cy;
        let cc_ = cx * cy;
        let c_s = cx * sz;
        let s_s = sx * sz;
        let _cs = cy * sz;
        let _cc = cy * cz;
        let s_c = sx * cz;
        let c_c = cx * cz;
        let ssc = ss_ * cz;
        let csc = cs_ * cz;
        let sss = ss_ * sz;
        let css = cs_ * sz;

        #[rustfmt::skip]
        let rot = Self::from_entries(
            _cc, -c_s + ssc,  s_s + csc,
            _cs,  c_c + sss, -s_c + css,
            -sy,        sc_,        cc_,
        );
        rot
    }

    /// Create a rotation from yaw (z), pitch (y) and roll (x) angles.
    ///
    /// Equivalent to `Rz(yaw) * Ry(pitch) * Rx(roll)`.
    #[inline]
    pub fn from_ypr(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::rz_ry_rx(roll, pitch, yaw)
    }

    /// Create a rotation of `theta` radians around a unit `axis` (Rodrigues' formula).
    ///
    /// # Errors
    ///
    /// Returns [`Rot3Error::NonUnitAxis`] if `|‖axis‖² - 1| > 1e-9`.
    pub fn from_axis_angle(axis: DVec3, theta: f64) -> Result<Self, Rot3Error> {
        let norm_squared = axis.length_squared();
        if (norm_squared - 1.0).abs() > AXIS_NORM_TOLERANCE {
            log::debug!("rejecting rotation axis {axis} with squared norm {norm_squared}");
            return Err(Rot3Error::NonUnitAxis { norm_squared });
        }
        Ok(Self::from_axis_angle_unchecked(axis, theta))
    }

    /// Create a rotation of `theta` radians around `axis` without validating the axis.
    ///
    /// PRECONDITION: `axis` is a unit vector. Only debug builds assert it; otherwise a
    /// non-unit axis silently produces a non-orthonormal matrix.
    pub fn from_axis_angle_unchecked(axis: DVec3, theta: f64) -> Self {
        let (wx, wy, wz) = (axis.x, axis.y, axis.z);
        let (ww_xx, ww_yy, ww_zz) = (wx * wx, wy * wy, wz * wz);
        debug_assert!(
            (ww_xx + ww_yy + ww_zz - 1.0).abs() <= AXIS_NORM_TOLERANCE,
            "rotation axis must be unit length"
        );

        let (s, c) = theta.sin_cos();
        let c_1 = 1.0 - c;

        let swx = wx * s;
        let swy = wy * s;
        let swz = wz * s;
        let c00 = c_1 * ww_xx;
        let c01 = c_1 * wx * wy;
        let c02 = c_1 * wx * wz;
        let c11 = c_1 * ww_yy;
        let c12 = c_1 * wy * wz;
        let c22 = c_1 * ww_zz;

        #[rustfmt::skip]
        let rot = Self::from_entries(
              c + c00, -swz + c01,  swy + c02,
            swz + c01,    c + c11, -swx + c12,
           -swy + c02,  swx + c12,    c + c22,
        );
        rot
    }

    /// Create a rotation from a scaled axis `omega = axis * theta`.
    ///
    /// Returns the identity when `‖omega‖ < 1e-10`.
    pub fn rodrigues(omega: DVec3) -> Self {
        let theta = omega.length();
        if theta < RODRIGUES_ANGLE_EPSILON {
            return Self::IDENTITY;
        }
        Self::from_axis_angle_unchecked(omega / theta, theta)
    }

    /// First column of the rotation matrix.
    #[inline]
    pub fn r1(&self) -> DVec3 {
        self.r1
    }

    /// Second column of the rotation matrix.
    #[inline]
    pub fn r2(&self) -> DVec3 {
        self.r2
    }

    /// Third column of the rotation matrix.
    #[inline]
    pub fn r3(&self) -> DVec3 {
        self.r3
    }

    /// Check whether all nine entries match `other` within `tol`.
    pub fn equals(&self, other: &Self, tol: f64) -> bool {
        self.r1.abs_diff_eq(other.r1, tol)
            && self.r2.abs_diff_eq(other.r2, tol)
            && self.r3.abs_diff_eq(other.r3, tol)
    }

    /// Adjoint representation, which for SO(3) is the rotation matrix itself.
    #[inline]
    pub fn adjoint_map(&self) -> DMat3 {
        self.matrix()
    }
}

impl fmt::Display for Rot3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r1, r2, r3) = (self.r1, self.r2, self.r3);
        write!(
            f,
            "Rot3([[{:.6}, {:.6}, {:.6}], [{:.6}, {:.6}, {:.6}], [{:.6}, {:.6}, {:.6}]])",
            r1.x, r2.x, r3.x, r1.y, r2.y, r3.y, r1.z, r2.z, r3.z
        )
    }
}

#[cfg(feature = "approx")]
impl approx::AbsDiffEq for Rot3 {
    type Epsilon = f64;

    #[inline]
    fn default_epsilon() -> Self::Epsilon {
        f64::EPSILON
    }

    #[inline]
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.equals(other, epsilon)
    }
}

#[cfg(feature = "approx")]
impl approx::RelativeEq for Rot3 {
    #[inline]
    fn default_max_relative() -> Self::Epsilon {
        f64::EPSILON
    }

    #[inline]
    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.matrix()
            .to_cols_array()
            .iter()
            .zip(other.matrix().to_cols_array().iter())
            .all(|(a, b)| approx::RelativeEq::relative_eq(a, b, epsilon, max_relative))
    }
}
