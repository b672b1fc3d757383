//! Control-point fixtures for curve analysis tests and benchmarks.
//!
//! All fixtures use the `[x1, y1, x2, y2, ...]` flat layout that
//! `Curve::set` consumes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Radius used by the quarter-circle fixtures in tests.
pub const QUARTER_CIRCLE_RADIUS: f64 = 10.0;

/// Control-point distance factor for the standard cubic circle approximation.
pub const KAPPA: f64 = 0.552_284_749_830_793_4;

/// Cubic approximating the quarter circle of radius `r` from `(r, 0)` to `(0, r)`.
///
/// Its radius of curvature stays within about 2.2% of `r` and is symmetric
/// about `t = 0.5`.
pub fn quarter_circle(r: f64) -> [f64; 8] {
    let k = KAPPA * r;
    [r, 0.0, r, k, k, r, 0.0, r]
}

/// Cubic with a single inflection at exactly `t = 0.5`.
pub fn s_curve() -> [f64; 8] {
    [0.0, 0.0, 1.0, 1.0, 2.0, -1.0, 3.0, 0.0]
}

/// Collinear, evenly spaced cubic: zero curvature everywhere.
pub fn straight_cubic() -> [f64; 8] {
    [0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 3.0, 0.0]
}

/// Cubic whose control polygon self-intersects, producing a loop.
pub fn looped_cubic() -> [f64; 8] {
    [0.0, 0.0, 30.0, 20.0, -10.0, 20.0, 20.0, 0.0]
}

/// Deterministic pseudo-random cubics with coordinates in `[-extent, extent)`.
pub fn random_cubics(seed: u64, count: usize, extent: f64) -> Vec<[f64; 8]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| std::array::from_fn(|_| rng.random_range(-extent..extent)))
        .collect()
}

/// Deterministic pseudo-random quadratics with coordinates in `[-extent, extent)`.
pub fn random_quads(seed: u64, count: usize, extent: f64) -> Vec<[f64; 6]> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| std::array::from_fn(|_| rng.random_range(-extent..extent)))
        .collect()
}
