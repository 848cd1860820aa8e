//! Local parameterization traits for optimization on manifolds.
use crate::{ChartMode, Rot3};
use glam::{DMat3, DVec3};
use thiserror::Error;

/// Errors raised when a parameter block has the wrong size.
#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    /// The input global parameter block `x` is too small.
    #[error("global parameter block has wrong size: expected {expected}, got {got}")]
    WrongGlobalSize {
        /// Required number of entries.
        expected: usize,
        /// Number of entries provided.
        got: usize,
    },

    /// The input local update `delta` is too small.
    #[error("local update has wrong size: expected {expected}, got {got}")]
    WrongLocalSize {
        /// Required number of entries.
        expected: usize,
        /// Number of entries provided.
        got: usize,
    },

    /// The output buffer `out` is too small.
    #[error("output buffer has wrong size: expected {expected}, got {got}")]
    WrongOutSize {
        /// Required number of entries.
        expected: usize,
        /// Number of entries provided.
        got: usize,
    },
}

/// A manifold variable stored as a flat parameter block.
pub trait Param {
    /// Size of the global parameter block (as stored in the variable).
    const GLOBAL_SIZE: usize;

    /// Size of the local update (tangent space dimension).
    const LOCAL_SIZE: usize;

    /// Apply a local update `delta` to a global parameter block `x`.
    fn plus(x: &[f64], delta: &[f64], out: &mut [f64]) -> Result<(), ParamError>;

    /// Local update taking `x` to `y`, the inverse of [`Param::plus`].
    fn minus(x: &[f64], y: &[f64], out: &mut [f64]) -> Result<(), ParamError>;
}

fn check_len(
    got: usize,
    expected: usize,
    err: fn(usize, usize) -> ParamError,
) -> Result<(), ParamError> {
    if got < expected {
        return Err(err(expected, got));
    }
    Ok(())
}

fn rot3_from_slice(x: &[f64]) -> Rot3 {
    let mut cols = [0.0; 9];
    cols.copy_from_slice(&x[..9]);
    Rot3::from_matrix(&DMat3::from_cols_array(&cols))
}

/// `Rot3` is stored as its column-major rotation matrix and updated through the
/// default [`ChartMode`].
impl Param for Rot3 {
    const GLOBAL_SIZE: usize = 9;
    const LOCAL_SIZE: usize = 3;

    fn plus(x: &[f64], delta: &[f64], out: &mut [f64]) -> Result<(), ParamError> {
        check_len(x.len(), Self::GLOBAL_SIZE, |expected, got| {
            ParamError::WrongGlobalSize { expected, got }
        })?;
        check_len(delta.len(), Self::LOCAL_SIZE, |expected, got| {
            ParamError::WrongLocalSize { expected, got }
        })?;
        check_len(out.len(), Self::GLOBAL_SIZE, |expected, got| {
            ParamError::WrongOutSize { expected, got }
        })?;

        let rot = rot3_from_slice(x);
        let tau = DVec3::new(delta[0], delta[1], delta[2]);
        let rot_plus = rot.retract(tau, ChartMode::default());
        out[..Self::GLOBAL_SIZE].copy_from_slice(&rot_plus.matrix().to_cols_array());
        Ok(())
    }

    fn minus(x: &[f64], y: &[f64], out: &mut [f64]) -> Result<(), ParamError> {
        check_len(x.len(), Self::GLOBAL_SIZE, |expected, got| {
            ParamError::WrongGlobalSize { expected, got }
        })?;
        check_len(y.len(), Self::GLOBAL_SIZE, |expected, got| {
            ParamError::WrongGlobalSize { expected, got }
        })?;
        check_len(out.len(), Self::LOCAL_SIZE, |expected, got| {
            ParamError::WrongOutSize { expected, got }
        })?;

        let tau = rot3_from_slice(x).local_coordinates(&rot3_from_slice(y), ChartMode::default());
        out[..Self::LOCAL_SIZE].copy_from_slice(&tau.to_array());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_matches_retract() -> Result<(), ParamError> {
        let rot = Rot3::rz_ry_rx(0.2, -0.3, 0.9);
        let x = rot.matrix().to_cols_array();
        let delta = [0.05, -0.1, 0.2];
        let mut out = [0.0; 9];
        Rot3::plus(&x, &delta, &mut out)?;

        let expected = rot.retract(DVec3::from_array(delta), ChartMode::Cayley);
        assert_eq!(out, expected.matrix().to_cols_array());
        Ok(())
    }

    #[test]
    fn test_plus_minus_roundtrip() -> Result<(), ParamError> {
        let x = Rot3::rz_ry_rx(-1.0, 0.4, 0.1).matrix().to_cols_array();
        let delta = [0.3, 0.2, -0.25];
        let mut y = [0.0; 9];
        Rot3::plus(&x, &delta, &mut y)?;

        let mut back = [0.0; 3];
        Rot3::minus(&x, &y, &mut back)?;
        for (a, b) in back.iter().zip(delta.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_wrong_sizes() {
        let x = Rot3::IDENTITY.matrix().to_cols_array();
        let mut out = [0.0; 9];
        assert_eq!(
            Rot3::plus(&x[..4], &[0.0; 3], &mut out),
            Err(ParamError::WrongGlobalSize {
                expected: 9,
                got: 4
            })
        );
        assert_eq!(
            Rot3::plus(&x, &[0.0; 2], &mut out),
            Err(ParamError::WrongLocalSize {
                expected: 3,
                got: 2
            })
        );
        assert_eq!(
            Rot3::plus(&x, &[0.0; 3], &mut out[..8]),
            Err(ParamError::WrongOutSize {
                expected: 9,
                got: 8
            })
        );
        let mut local = [0.0; 2];
        assert_eq!(
            Rot3::minus(&x, &x, &mut local),
            Err(ParamError::WrongOutSize {
                expected: 3,
                got: 2
            })
        );
    }
}
