//! Bezier curve analysis for path flattening and stroking.
//!
//! A rasterizer flattens curves into line segments and offsets them to
//! build stroke outlines. Both passes need to know where a segment must be
//! split: at axis extrema, at inflections, and wherever the radius of
//! curvature crosses the offset distance (the offset curve grows a cusp
//! there).
//!
//! # Architecture
//!
//! ```text
//! subdiv::subdivision_points (rotate, collect, filter, sort)
//! └── Curve (reusable polynomial form of one segment)
//!     ├── derivative roots, inflections ─┐
//!     ├── perpendicular extrema ─────────┼── poly (quadratic / cubic solvers)
//!     └── ROC² - w² roots (Illinois false position)
//! ```
//!
//! Everything operates on caller-provided `f64` buffers so that the hot
//! path never allocates. Degenerate geometry never produces an error: the
//! only failure is a malformed control-point count.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod curve;
pub mod error;
pub mod poly;
pub mod subdiv;

pub use curve::{Curve, CUBIC_COORDS, QUAD_COORDS};
pub use error::CurveError;
pub use subdiv::{find_subdivision_points, subdivision_points, SubdivisionPoints, MAX_SUBDIVISIONS};
