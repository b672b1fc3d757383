//! Curve-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur when configuring a [`Curve`](crate::Curve).
///
/// Only malformed control-point input is reported. Numerical degeneracies
/// (zero leading coefficients, vanishing tangents, infinite radius of
/// curvature) are absorbed by the solvers and never surface here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurveError {
    /// The coordinate count is neither 6 (quadratic) nor 8 (cubic).
    UnsupportedDegree {
        /// The coordinate count that was requested.
        coords: usize,
    },
    /// The point slice holds fewer coordinates than the declared count.
    MissingCoordinates {
        /// Coordinates required by the declared degree.
        needed: usize,
        /// Coordinates actually supplied.
        got: usize,
    },
}

impl fmt::Display for CurveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedDegree { coords } => {
                write!(
                    f,
                    "curves can only be cubic or quadratic: got {coords} coordinates, expected 6 or 8"
                )
            }
            Self::MissingCoordinates { needed, got } => {
                write!(f, "missing control-point coordinates: needed {needed}, got {got}")
            }
        }
    }
}

impl Error for CurveError {}
