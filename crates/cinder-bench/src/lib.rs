//! Benchmark profiles and utilities for the Cinder rasterizer core.
//!
//! - [`path_profile`]: a deterministic batch of cubic segments
//! - [`churn_profile`]: a deterministic acquire/grow/release workload
//! - [`flatten`]: the reference flattening loop both benches exercise

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use cinder_curve::{find_subdivision_points, Curve, CurveError, CUBIC_COORDS, MAX_SUBDIVISIONS};
use cinder_pool::ArrayRef;
use cinder_test_utils::curves::random_cubics;

/// Coordinate extent of generated segments, in device pixels.
pub const PATH_EXTENT: f64 = 512.0;

/// `count` pseudo-random cubic segments seeded by `seed`.
pub fn path_profile(seed: u64, count: usize) -> Vec<[f64; CUBIC_COORDS]> {
    random_cubics(seed, count, PATH_EXTENT)
}

/// One step of a pool workload: acquire `initial` elements, grow to
/// `grown`, release.
#[derive(Clone, Copy, Debug)]
pub struct ChurnStep {
    /// Length first requested.
    pub initial: usize,
    /// Length the buffer grows to before release.
    pub grown: usize,
}

/// A deterministic mix of small, medium and bucket-crossing requests.
pub fn churn_profile(steps: usize) -> Vec<ChurnStep> {
    (0..steps)
        .map(|i| {
            let initial = 64 << (i % 7);
            ChurnStep {
                initial,
                grown: initial * (1 + i % 5),
            }
        })
        .collect()
}

/// Flatten `segments` into `(x, y)` pairs, stroking at `half_width`.
///
/// Each segment contributes its start point and one point per split
/// parameter; the end point of the last segment closes the run. Points
/// accumulate in a buffer drawn from `pool` and the used length is
/// returned along with it.
///
/// # Errors
///
/// Propagates the [`CurveError`] of a malformed segment.
pub fn flatten(
    pool: &mut ArrayRef<'_, f64>,
    segments: &[[f64; CUBIC_COORDS]],
    half_width: f64,
) -> Result<(Box<[f64]>, usize), CurveError> {
    let mut curve = Curve::new();
    let mut ts = [0.0; MAX_SUBDIVISIONS];
    let mut points = pool.initial();
    let mut used = 0;
    for segment in segments {
        let n = find_subdivision_points(&mut curve, segment, CUBIC_COORDS, half_width, &mut ts)?;
        // Subdivision leaves the curve rotated; evaluate in the original frame.
        curve.set(segment, CUBIC_COORDS)?;
        points = pool.grow(points, used, used + 2 * (n + 1));
        for t in std::iter::once(0.0).chain(ts[..n].iter().copied()) {
            let (x, y) = curve.position_at(t);
            points[used] = x;
            points[used + 1] = y;
            used += 2;
        }
    }
    if let Some(last) = segments.last() {
        points = pool.grow(points, used, used + 2);
        points[used] = last[6];
        points[used + 1] = last[7];
        used += 2;
    }
    Ok((points, used))
}
