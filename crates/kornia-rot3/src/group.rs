//! Group operations on [`Rot3`].
//!
//! Jacobians follow the right-trivialized convention: the derivative of `f(R)` with
//! respect to `R` is taken along perturbations `R * exp(δ)`, and expressed in the
//! tangent space of the result. The `*_with_jacobians` variants return the value
//! followed by the Jacobians in argument order.

use crate::{manifold::skew_symmetric, Rot3, Rot3Error};
use glam::{DMat3, DVec3};

impl Rot3 {
    /// Rotation matrix `[r1 | r2 | r3]`.
    #[inline]
    pub fn matrix(&self) -> DMat3 {
        DMat3::from_cols(self.r1, self.r2, self.r3)
    }

    /// Transposed rotation matrix, equal to the inverse rotation.
    #[inline]
    pub fn transpose(&self) -> DMat3 {
        self.matrix().transpose()
    }

    /// Column `index` of the rotation matrix, counted from 1.
    ///
    /// # Errors
    ///
    /// Returns [`Rot3Error::InvalidColumnIndex`] if `index` is not 1, 2 or 3.
    pub fn column(&self, index: usize) -> Result<DVec3, Rot3Error> {
        match index {
            1 => Ok(self.r1),
            2 => Ok(self.r2),
            3 => Ok(self.r3),
            _ => Err(Rot3Error::InvalidColumnIndex(index)),
        }
    }

    /// Compose two rotations, `self * other`.
    pub fn compose(&self, other: &Rot3) -> Rot3 {
        Rot3::new(
            self.rotate(other.r1),
            self.rotate(other.r2),
            self.rotate(other.r3),
        )
    }

    /// Compose two rotations and return the Jacobians with respect to `self` and `other`.
    ///
    /// `H1 = otherᵀ`, `H2 = I`.
    pub fn compose_with_jacobians(&self, other: &Rot3) -> (Rot3, DMat3, DMat3) {
        (self.compose(other), other.transpose(), DMat3::IDENTITY)
    }

    /// Inverse rotation, i.e. the transpose.
    pub fn inverse(&self) -> Rot3 {
        let (r1, r2, r3) = (self.r1, self.r2, self.r3);
        #[rustfmt::skip]
        let inv = Rot3::from_entries(
            r1.x, r1.y, r1.z,
            r2.x, r2.y, r2.z,
            r3.x, r3.y, r3.z,
        );
        inv
    }

    /// Inverse rotation together with its Jacobian `H = -R`.
    pub fn inverse_with_jacobian(&self) -> (Rot3, DMat3) {
        (self.inverse(), self.matrix() * -1.0)
    }

    /// Relative rotation `self⁻¹ * other`.
    pub fn between(&self, other: &Rot3) -> Rot3 {
        self.inverse().compose(other)
    }

    /// Relative rotation and its Jacobians with respect to `self` and `other`.
    ///
    /// `H1 = -(otherᵀ * self)`, `H2 = I`.
    pub fn between_with_jacobians(&self, other: &Rot3) -> (Rot3, DMat3, DMat3) {
        let h1 = (other.transpose() * self.matrix()) * -1.0;
        (self.between(other), h1, DMat3::IDENTITY)
    }

    /// Rotate a point, `R * p`.
    #[inline]
    pub fn rotate(&self, p: DVec3) -> DVec3 {
        self.r1 * p.x + self.r2 * p.y + self.r3 * p.z
    }

    /// Rotate a point and return the Jacobians with respect to the rotation and the point.
    ///
    /// `H1 = R * skew(-p)`, `H2 = R`.
    pub fn rotate_with_jacobians(&self, p: DVec3) -> (DVec3, DMat3, DMat3) {
        let r = self.matrix();
        let h1 = r * skew_symmetric(-p.x, -p.y, -p.z);
        (self.rotate(p), h1, r)
    }

    /// Rotate a point by the inverse rotation, `Rᵀ * p`.
    #[inline]
    pub fn unrotate(&self, p: DVec3) -> DVec3 {
        DVec3::new(self.r1.dot(p), self.r2.dot(p), self.r3.dot(p))
    }

    /// Unrotate a point and return the Jacobians with respect to the rotation and the point.
    ///
    /// With `q = Rᵀ * p`: `H1 = skew(q)`, `H2 = Rᵀ`.
    pub fn unrotate_with_jacobians(&self, p: DVec3) -> (DVec3, DMat3, DMat3) {
        let q = self.unrotate(p);
        (q, skew_symmetric(q.x, q.y, q.z), self.transpose())
    }
}

impl std::ops::Mul<Rot3> for Rot3 {
    type Output = Rot3;

    fn mul(self, rhs: Rot3) -> Self::Output {
        self.compose(&rhs)
    }
}

impl std::ops::Mul<DVec3> for Rot3 {
    type Output = DVec3;

    fn mul(self, rhs: DVec3) -> Self::Output {
        self.rotate(rhs)
    }
}
