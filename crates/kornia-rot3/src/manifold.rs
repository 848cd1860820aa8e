//! # Charts on SO(3)
//!
//! The Lie algebra so(3) is identified with R³ through the skew-symmetric (hat) map.
//! A vector `ω ∈ R³` is an axis-angle rotation: the direction is the rotation axis,
//! the magnitude is the angle in radians.
//!
//! - [`Rot3::logmap`]: rotation → canonical coordinates at the identity.
//! - [`Rot3::expmap`]: canonical coordinates → rotation (Rodrigues' formula).
//! - [`Rot3::retract`] / [`Rot3::local_coordinates`]: charts anchored at an arbitrary
//!   rotation `R`, with `retract(R, ω) = R * Δ(ω)` and `local_coordinates` its inverse.
//!
//! The chart `Δ` is selected by [`ChartMode`]. The exponential chart is exact and
//! bijective for `‖ω‖ < π`. The Cayley chart is a rational map that agrees with the
//! exponential map to first order, and is much cheaper to evaluate.
//!
//! ## Singularities
//!
//! `logmap` divides by `sin θ`. Two regions need care:
//! - θ ≈ 0 (trace ≈ 3): the ratio `θ / (2 sin θ)` is replaced by its Taylor surrogate.
//! - θ ≈ π (trace ≈ -1): the skew part of `R` vanishes and the axis is recovered from
//!   a column of `I + R` instead. The two antipodal axes are equally valid there; the
//!   column is picked in the fixed order 3, 2, 1 so the choice is reproducible.

use crate::Rot3;
use glam::{DMat3, DVec3};
use std::f64::consts::PI;

/// `|trace + 1|` below which the rotation is treated as a half-turn.
const HALF_TURN_EPSILON: f64 = 1e-10;

/// `trace - 3` above which `logmap` switches to the small-angle surrogate.
const SMALL_ANGLE_TRACE_EPSILON: f64 = -1e-7;

/// Local chart used by [`Rot3::retract`] and [`Rot3::local_coordinates`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartMode {
    /// Exact exponential map.
    Expmap,
    /// Closed-form Cayley transform.
    #[default]
    Cayley,
    /// Cayley transform through an explicit matrix inverse. Same chart as
    /// [`ChartMode::Cayley`], used as a reference for the closed-form path.
    SlowCayley,
}

/// Skew-symmetric matrix `[w]ₓ` such that `[w]ₓ v = w × v`.
pub fn skew_symmetric(wx: f64, wy: f64, wz: f64) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(0.0, wz, -wy),
        DVec3::new(-wz, 0.0, wx),
        DVec3::new(wy, -wx, 0.0),
    )
}

/// Vector `(Ω₃₂, Ω₁₃, Ω₂₁)` of a skew-symmetric matrix; inverse of [`skew_symmetric`].
pub fn vee(omega: &DMat3) -> DVec3 {
    DVec3::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
}

/// Cayley transform `(I - A) (I + A)⁻¹`.
///
/// The transform is an involution: applying it twice returns `A`. It maps skew-symmetric
/// matrices to rotations and back, except where `I + A` is singular.
pub fn cayley(a: &DMat3) -> DMat3 {
    (DMat3::IDENTITY - *a) * (DMat3::IDENTITY + *a).inverse()
}

impl Rot3 {
    /// Exponential map at the identity. Same as [`Rot3::rodrigues`].
    #[inline]
    pub fn expmap(omega: DVec3) -> Rot3 {
        Rot3::rodrigues(omega)
    }

    /// Logarithm map at the identity: the canonical (axis * angle) coordinates.
    ///
    /// For rotations of angle π the returned axis is one of the two antipodal choices,
    /// picked deterministically.
    pub fn logmap(&self) -> DVec3 {
        let (r1, r2, r3) = (self.r1, self.r2, self.r3);
        let tr = r1.x + r2.y + r3.z;

        if (tr + 1.0).abs() < HALF_TURN_EPSILON {
            log::trace!("logmap: half-turn rotation, trace = {tr}");
            return if (r3.z + 1.0).abs() > HALF_TURN_EPSILON {
                DVec3::new(r3.x, r3.y, 1.0 + r3.z) * (PI / (2.0 + 2.0 * r3.z).sqrt())
            } else if (r2.y + 1.0).abs() > HALF_TURN_EPSILON {
                DVec3::new(r2.x, 1.0 + r2.y, r2.z) * (PI / (2.0 + 2.0 * r2.y).sqrt())
            } else {
                DVec3::new(1.0 + r1.x, r1.y, r1.z) * (PI / (2.0 + 2.0 * r1.x).sqrt())
            };
        }

        // always negative for a rotation
        let tr_3 = tr - 3.0;
        let magnitude = if tr_3 < SMALL_ANGLE_TRACE_EPSILON {
            let theta = ((tr - 1.0) / 2.0).clamp(-1.0, 1.0).acos();
            theta / (2.0 * theta.sin())
        } else {
            0.5 - tr_3 * tr_3 / 12.0
        };

        DVec3::new(r2.z - r3.y, r3.x - r1.z, r1.y - r2.x) * magnitude
    }

    /// Move away from `self` along the tangent vector `omega`, `self * Δ(omega)`.
    pub fn retract(&self, omega: DVec3, mode: ChartMode) -> Rot3 {
        let delta = match mode {
            ChartMode::Expmap => Rot3::expmap(omega),
            ChartMode::Cayley => {
                let (x, y, z) = (omega.x, omega.y, omega.z);
                let (x2, y2, z2) = (x * x, y * y, z * z);
                let (xy, xz, yz) = (x * y, x * z, y * z);
                let f = 1.0 / (4.0 + x2 + y2 + z2);
                let f2 = 2.0 * f;
                #[rustfmt::skip]
                let delta = Rot3::from_entries(
                    (4.0 + x2 - y2 - z2) * f, (xy - 2.0 * z) * f2,      (xz + 2.0 * y) * f2,
                    (xy + 2.0 * z) * f2,      (4.0 - x2 + y2 - z2) * f, (yz - 2.0 * x) * f2,
                    (xz - 2.0 * y) * f2,      (yz + 2.0 * x) * f2,      (4.0 - x2 - y2 + z2) * f,
                );
                delta
            }
            ChartMode::SlowCayley => {
                let omega_hat = skew_symmetric(omega.x, omega.y, omega.z);
                Rot3::from_matrix(&cayley(&(omega_hat * -0.5)))
            }
        };
        self.compose(&delta)
    }

    /// Tangent vector `ω` at `self` such that `self.retract(ω, mode) ≈ other`.
    pub fn local_coordinates(&self, other: &Rot3, mode: ChartMode) -> DVec3 {
        let between = self.between(other);
        match mode {
            ChartMode::Expmap => between.logmap(),
            ChartMode::Cayley => {
                let (c1, c2, c3) = (between.r1, between.r2, between.r3);
                let (a, b, c) = (c1.x, c2.x, c3.x);
                let (d, e, f) = (c1.y, c2.y, c3.y);
                let (g, h, i) = (c1.z, c2.z, c3.z);

                let di = d * i;
                let ce = c * e;
                let cd = c * d;
                let fg = f * g;
                let m = 1.0 + e - f * h + i + e * i;
                let k = 2.0 / (cd * h + m + a * m - g * (c + ce) - b * (d + di - fg));
                let x = (a * f - cd + f) * k;
                let y = (b * f - ce - c) * k;
                let z = (fg - di - d) * k;
                DVec3::new(x, y, z) * -2.0
            }
            ChartMode::SlowCayley => vee(&cayley(&between.matrix())) * -2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-9;

    const MODES: [ChartMode; 3] = [ChartMode::Expmap, ChartMode::Cayley, ChartMode::SlowCayley];

    #[test]
    fn test_skew_symmetric() {
        let w = DVec3::new(1.0, 2.0, 3.0);
        let v = DVec3::new(-0.5, 0.25, 4.0);
        let hat = skew_symmetric(w.x, w.y, w.z);
        assert!((hat * v).abs_diff_eq(w.cross(v), EPSILON));
        assert_eq!(hat.transpose(), hat * -1.0);
        assert_eq!(vee(&hat), w);
    }

    #[test]
    fn test_cayley_is_involution() {
        let a = skew_symmetric(0.3, -0.1, 0.7);
        let c = cayley(&a);
        // the image of a skew-symmetric matrix is a rotation
        assert!((c.transpose() * c).abs_diff_eq(DMat3::IDENTITY, EPSILON));
        assert_relative_eq!(c.determinant(), 1.0, epsilon = EPSILON);
        assert!(cayley(&c).abs_diff_eq(a, EPSILON));
    }

    #[test]
    fn test_logmap_identity() {
        assert_eq!(Rot3::IDENTITY.logmap(), DVec3::ZERO);
    }

    #[test]
    fn test_logmap_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
        let axes = [
            DVec3::X,
            DVec3::new(0.0, 1.0, 1.0).normalize(),
            DVec3::new(-0.3, 0.4, 1.2).normalize(),
            DVec3::new(1.0, -2.0, 0.5).normalize(),
        ];
        for axis in axes {
            for theta in [-3.1, -2.0, -0.5, -1e-3, 1e-3, 0.1, 1.0, 2.5, 3.1] {
                let rot = Rot3::from_axis_angle(axis, theta)?;
                assert!(rot.logmap().abs_diff_eq(axis * theta, 1e-8));
            }
        }
        Ok(())
    }

    #[test]
    fn test_logmap_small_angle() {
        let omega = DVec3::new(1e-5, -2e-5, 3e-6);
        let rot = Rot3::expmap(omega);
        assert!(rot.logmap().abs_diff_eq(omega, 1e-14));
    }

    #[test]
    fn test_logmap_half_turn_z() -> Result<(), Box<dyn std::error::Error>> {
        let rot = Rot3::from_axis_angle(DVec3::Z, PI)?;
        assert!(rot.logmap().abs_diff_eq(DVec3::new(0.0, 0.0, PI), EPSILON));
        Ok(())
    }

    #[test]
    fn test_logmap_half_turn_y() {
        let rot = Rot3::from_entries(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0);
        assert_eq!(rot.logmap(), DVec3::new(0.0, PI, 0.0));
    }

    #[test]
    fn test_logmap_half_turn_x() {
        let rot = Rot3::from_entries(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0);
        assert_eq!(rot.logmap(), DVec3::new(PI, 0.0, 0.0));
    }

    #[test]
    fn test_logmap_half_turn_oblique() -> Result<(), Box<dyn std::error::Error>> {
        let axis = DVec3::new(1.0, 2.0, 2.0) / 3.0;
        let rot = Rot3::from_axis_angle(axis, PI)?;
        let omega = rot.logmap();
        // positive z component picks +axis out of the two antipodal choices
        assert!(omega.abs_diff_eq(axis * PI, 1e-6));
        assert!(Rot3::expmap(omega).equals(&rot, 1e-6));
        Ok(())
    }

    #[test]
    fn test_retract_expmap() {
        let rot = Rot3::rz_ry_rx(0.3, -0.2, 1.1);
        let omega = DVec3::new(0.2, 0.5, -0.1);
        let moved = rot.retract(omega, ChartMode::Expmap);
        assert!(moved.equals(&(rot * Rot3::rodrigues(omega)), EPSILON));
    }

    #[test]
    fn test_retract_zero_is_identity_map() {
        let rot = Rot3::rz_ry_rx(0.3, -0.2, 1.1);
        for mode in MODES {
            assert!(rot.retract(DVec3::ZERO, mode).equals(&rot, EPSILON));
            assert!(rot
                .local_coordinates(&rot, mode)
                .abs_diff_eq(DVec3::ZERO, EPSILON));
        }
    }

    #[test]
    fn test_retract_local_coordinates_roundtrip() {
        let rot = Rot3::rz_ry_rx(-0.7, 0.4, 2.0);
        let omegas = [
            DVec3::new(0.1, 0.0, 0.0),
            DVec3::new(0.01, -0.02, 0.03),
            DVec3::new(-0.3, 0.2, 0.4),
            DVec3::new(0.9, -1.1, 0.6),
        ];
        for mode in MODES {
            for omega in omegas {
                let moved = rot.retract(omega, mode);
                let back = rot.local_coordinates(&moved, mode);
                assert!(back.abs_diff_eq(omega, 1e-8), "{mode:?} {omega} {back}");
            }
        }
    }

    #[test]
    fn test_retract_is_orthonormal() {
        let rot = Rot3::rz_ry_rx(0.2, 0.1, -0.3);
        let omega = DVec3::new(0.8, -0.4, 1.3);
        for mode in MODES {
            let m = rot.retract(omega, mode).matrix();
            assert!((m.transpose() * m).abs_diff_eq(DMat3::IDENTITY, EPSILON));
            assert_relative_eq!(m.determinant(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_cayley_matches_slow_cayley() {
        let rot = Rot3::rz_ry_rx(1.0, -0.5, 0.25);
        let other = Rot3::rz_ry_rx(1.1, -0.45, 0.2);
        for omega in [DVec3::new(0.01, 0.02, -0.03), DVec3::new(0.5, -0.3, 0.2)] {
            let fast = rot.retract(omega, ChartMode::Cayley);
            let slow = rot.retract(omega, ChartMode::SlowCayley);
            assert!(fast.equals(&slow, EPSILON));
        }
        let fast = rot.local_coordinates(&other, ChartMode::Cayley);
        let slow = rot.local_coordinates(&other, ChartMode::SlowCayley);
        assert!(fast.abs_diff_eq(slow, EPSILON));
    }

    #[test]
    fn test_cayley_agrees_with_expmap_to_first_order() {
        let rot = Rot3::rz_ry_rx(0.4, 0.3, -0.9);
        let omega = DVec3::new(1e-3, -2e-3, 5e-4);
        let exact = rot.retract(omega, ChartMode::Expmap);
        let approx = rot.retract(omega, ChartMode::Cayley);
        // charts differ at third order in ‖ω‖
        assert!(exact.equals(&approx, 1e-8));
        assert!(!exact.equals(&approx, 1e-14));
    }

    #[test]
    fn test_default_chart() {
        assert_eq!(ChartMode::default(), ChartMode::Cayley);
    }
}
