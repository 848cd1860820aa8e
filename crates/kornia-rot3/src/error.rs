use thiserror::Error;

/// Errors raised while building or querying a [`Rot3`](crate::Rot3).
#[derive(Debug, Error, PartialEq)]
pub enum Rot3Error {
    /// A column accessor was called with an index other than 1, 2 or 3.
    #[error("column index must be 1, 2 or 3, got {0}")]
    InvalidColumnIndex(usize),

    /// The axis passed to the axis-angle constructor is not unit length.
    #[error("rotation axis must be unit length, got squared norm {norm_squared}")]
    NonUnitAxis {
        /// Squared Euclidean norm of the rejected axis.
        norm_squared: f64,
    },
}
