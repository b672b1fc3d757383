//! Cinder: the geometry and memory core of a software path rasterizer.
//!
//! This is the facade crate that re-exports the public API of the Cinder
//! sub-crates. The two halves are independent: curve analysis decides
//! where to split each segment, and the array pool supplies the scratch
//! buffers the rasterizer fills along the way.
//!
//! # Quick start
//!
//! ```rust
//! use cinder::prelude::*;
//!
//! // Split a stroked quarter circle where its offset would cusp.
//! let mut curve = Curve::new();
//! let k = 0.5522847498307934;
//! let segment = [1.0, 0.0, 1.0, k, k, 1.0, 0.0, 1.0];
//! let ts = subdivision_points(&mut curve, &segment, 8, 1.01).unwrap();
//! assert_eq!(ts.len(), 2);
//!
//! // Accumulate the flattened points in a pooled buffer.
//! let pool = BucketedArrayPool::<f64>::new(false, 8);
//! let mut pool_ref = pool.new_ref(256);
//! let mut points = pool_ref.initial();
//! let mut used = 0;
//! for &t in [0.0].iter().chain(ts.iter()).chain([1.0].iter()) {
//!     curve.set(&segment, 8).unwrap();
//!     let (x, y) = curve.position_at(t);
//!     points = pool_ref.grow(points, used, used + 2);
//!     points[used] = x;
//!     points[used + 1] = y;
//!     used += 2;
//! }
//! assert_eq!(used, 8);
//! pool_ref.release(points, used);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`curve`] | `cinder-curve` | `Curve`, polynomial root helpers, subdivision points |
//! | [`pool`] | `cinder-pool` | `ArrayCache`, `ArrayRef`, size classes, stats, reclaim |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Curve analysis (`cinder-curve`).
///
/// [`curve::Curve`] holds one segment in polynomial form;
/// [`curve::subdivision_points`] combines its root finders into the split
/// parameters a flattener needs.
pub use cinder_curve as curve;

/// Scratch-array pooling (`cinder-pool`).
///
/// [`pool::ArrayCache`] is the per-element-type pool and
/// [`pool::ArrayRef`] the handle a rendering context holds.
/// [`pool::CacheSet`] bundles the caches one context needs.
pub use cinder_pool as pool;

/// Common imports for typical Cinder usage.
///
/// ```rust
/// use cinder::prelude::*;
/// ```
pub mod prelude {
    // Curve analysis
    pub use cinder_curve::{subdivision_points, Curve, CurveError, SubdivisionPoints};

    // Pooling
    pub use cinder_pool::{
        ArrayCache, ArrayRef, BucketedArrayPool, CacheConfig, CacheSet, PoolDiagnostic,
        ReclaimHandle,
    };
}
