//! RQ decomposition of 3×3 matrices and Euler-angle extraction.

use crate::Rot3;
use glam::{DMat3, DVec3};

/// Decompose `a` as `R * Rz(z) * Ry(y) * Rx(x)`.
///
/// The angles are found by successive Givens eliminations: `x` zeroes the (2, 1) entry,
/// `y` the (2, 0) entry and `z` the (1, 0) entry, leaving `R` upper triangular for a
/// general matrix and the identity for a rotation.
///
/// # Returns
///
/// The remaining matrix `R` and the angles `(x, y, z)` in radians.
pub fn rq(a: &DMat3) -> (DMat3, DVec3) {
    let x = -(-a.y_axis.z).atan2(a.z_axis.z);
    let b = *a * Rot3::rx(-x).matrix();

    let y = -b.x_axis.z.atan2(b.z_axis.z);
    let c = b * Rot3::ry(-y).matrix();

    let z = -(-c.x_axis.y).atan2(c.y_axis.y);
    let r = c * Rot3::rz(-z).matrix();

    (r, DVec3::new(x, y, z))
}

impl Rot3 {
    /// Angles `(x, y, z)` such that `self = Rz(z) * Ry(y) * Rx(x)`.
    pub fn xyz(&self) -> DVec3 {
        let (_, angles) = rq(&self.matrix());
        angles
    }

    /// Angles as `(yaw, pitch, roll)`, i.e. `(z, y, x)`.
    pub fn ypr(&self) -> DVec3 {
        let q = self.xyz();
        DVec3::new(q.z, q.y, q.x)
    }

    /// Angles as `(roll, pitch, yaw)`, i.e. `(x, y, z)`.
    pub fn rpy(&self) -> DVec3 {
        self.xyz()
    }

    /// Rotation around the z axis.
    #[inline]
    pub fn yaw(&self) -> f64 {
        self.ypr().x
    }

    /// Rotation around the y axis.
    #[inline]
    pub fn pitch(&self) -> f64 {
        self.ypr().y
    }

    /// Rotation around the x axis.
    #[inline]
    pub fn roll(&self) -> f64 {
        self.ypr().z
    }
}
