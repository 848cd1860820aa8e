#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Rot3
//!
//! This crate provides [`Rot3`], an element of the rotation group SO(3) stored as an
//! orthonormal 3×3 matrix, together with the manifold machinery needed to use it as a
//! variable inside a nonlinear optimizer:
//!
//! - **Factories**: elementary rotations `Rx`, `Ry`, `Rz`, the fused `RzRyRx` and
//!   the Rodrigues axis-angle constructor.
//! - **Group operations**: compose, inverse, between, rotate and unrotate, each with
//!   analytic (right-trivialized) Jacobians.
//! - **Charts**: logarithm map at the identity and `retract`/`local_coordinates`
//!   around any rotation, using either the exact exponential map or the Cayley
//!   transform (see [`ChartMode`]).
//! - **Decomposition**: RQ factorization of a general 3×3 matrix into a rotation and
//!   an x/y/z angle triple.
//!
//! ## Example
//!
//! ```rust
//! use glam::DVec3;
//! use kornia_rot3::{ChartMode, Rot3};
//!
//! // Create a rotation from axis-angle representation
//! let rotation = Rot3::rodrigues(DVec3::new(0.0, 0.0, std::f64::consts::FRAC_PI_2));
//!
//! // Apply the rotation to a point
//! let rotated = rotation.rotate(DVec3::X);
//! assert!((rotated - DVec3::Y).length() < 1e-12);
//!
//! // Move along the tangent space and come back
//! let omega = DVec3::new(0.1, -0.2, 0.05);
//! let moved = rotation.retract(omega, ChartMode::Cayley);
//! let back = rotation.local_coordinates(&moved, ChartMode::Cayley);
//! assert!((back - omega).length() < 1e-9);
//! ```

mod error;
pub use error::Rot3Error;

/// RQ decomposition and Euler-angle extraction.
pub mod decomposition;

/// Group operations and their Jacobians.
pub mod group;

/// Exponential/logarithm maps and local charts.
pub mod manifold;

/// Local parameterization used by optimizers working on flat parameter blocks.
pub mod param;

/// The rotation type and its factories.
pub mod rot3;

pub use decomposition::rq;
pub use manifold::{cayley, skew_symmetric, ChartMode};
pub use param::{Param, ParamError};
pub use rot3::Rot3;
