//! Subdivision points for offsetting a curve segment.
//!
//! A stroker offsets each segment by half the line width. The offset is
//! well behaved only on pieces that are monotonic in x and y, free of
//! inflections, and whose radius of curvature never crosses the offset
//! distance. [`subdivision_points`] finds every parameter where one of
//! those conditions changes.

use smallvec::SmallVec;

use crate::curve::{check_coords, Curve, CUBIC_COORDS};
use crate::error::CurveError;
use crate::poly::{filter_in_range, insertion_sort};

/// Upper bound on subdivision points for one segment: two per axis for
/// the derivative roots, two inflections, and up to four curvature roots
/// partitioned over at most four sub-intervals, with scratch headroom.
pub const MAX_SUBDIVISIONS: usize = 10;

/// Relative interval width at which the curvature solve stops.
pub const ROC_ERROR: f64 = 1e-4;

/// Subdivisions closer than this to either end point are dropped.
const END_MARGIN: f64 = 1e-4;

/// Sorted subdivision parameters for one segment.
pub type SubdivisionPoints = SmallVec<[f64; MAX_SUBDIVISIONS]>;

/// Compute sorted subdivision parameters in `[1e-4, 0.9999)` for the
/// segment described by `points[..coords]`, offset by `half_width`.
///
/// `curve` is scratch: on return it holds the segment rotated so that its
/// first control vector lies along +x (unless that vector was already
/// axis-parallel), which keeps rotated quarter circles from being split
/// at their spurious axis extrema.
///
/// # Errors
///
/// Propagates the [`CurveError`] from validating `points` and `coords`.
pub fn find_subdivision_points(
    curve: &mut Curve,
    points: &[f64],
    coords: usize,
    half_width: f64,
    ts: &mut [f64; MAX_SUBDIVISIONS],
) -> Result<usize, CurveError> {
    check_coords(points, coords)?;
    let p = points;

    let x12 = p[2] - p[0];
    let y12 = p[3] - p[1];
    if y12 != 0.0 && x12 != 0.0 {
        let hypot = (x12 * x12 + y12 * y12).sqrt();
        let cos = x12 / hypot;
        let sin = y12 / hypot;
        let rot = |x: f64, y: f64| (cos * x + sin * y, cos * y - sin * x);
        let (x1, y1) = rot(p[0], p[1]);
        let (x2, y2) = rot(p[2], p[3]);
        let (x3, y3) = rot(p[4], p[5]);
        if coords == CUBIC_COORDS {
            let (x4, y4) = rot(p[6], p[7]);
            curve.set_cubic(x1, y1, x2, y2, x3, y3, x4, y4);
        } else {
            curve.set_quad(x1, y1, x2, y2, x3, y3);
        }
    } else {
        curve.set(points, coords)?;
    }

    let mut ret = 0;
    // Monotonic pieces in the rotated frame.
    ret += curve.derivative_roots_x(ts, ret);
    ret += curve.derivative_roots_y(ts, ret);
    if curve.is_cubic() {
        ret += curve.inflection_points(ts, ret);
    }
    // Cusps in the offset curve: ROC(t) == half_width.
    ret += curve.roc_minus_width_roots(ts, ret, half_width, ROC_ERROR);

    let ret = filter_in_range(ts, 0, ret, END_MARGIN, 1.0 - END_MARGIN);
    insertion_sort(ts, ret);
    Ok(ret)
}

/// Allocation-free convenience wrapper over [`find_subdivision_points`].
pub fn subdivision_points(
    curve: &mut Curve,
    points: &[f64],
    coords: usize,
    half_width: f64,
) -> Result<SubdivisionPoints, CurveError> {
    let mut ts = [0.0; MAX_SUBDIVISIONS];
    let n = find_subdivision_points(curve, points, coords, half_width, &mut ts)?;
    Ok(SmallVec::from_slice(&ts[..n]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_test_utils::curves::{
        looped_cubic, quarter_circle, random_cubics, s_curve, QUARTER_CIRCLE_RADIUS,
    };

    fn rotate(points: &[f64; 8], angle: f64) -> [f64; 8] {
        let (sin, cos) = angle.sin_cos();
        let mut out = [0.0; 8];
        for i in 0..4 {
            let (x, y) = (points[2 * i], points[2 * i + 1]);
            out[2 * i] = x * cos - y * sin;
            out[2 * i + 1] = x * sin + y * cos;
        }
        out
    }

    #[test]
    fn quarter_circle_splits_only_where_roc_crosses_width() {
        let r = QUARTER_CIRCLE_RADIUS;
        let mut c = Curve::new();
        let ts = subdivision_points(&mut c, &quarter_circle(r), 8, 1.01 * r).unwrap();
        assert_eq!(ts.len(), 2, "ts: {ts:?}");
        assert!(ts[0] < 0.5 && ts[1] > 0.5);
    }

    #[test]
    fn rotated_quarter_circle_needs_no_subdivision() {
        let r = QUARTER_CIRCLE_RADIUS;
        let pts = rotate(&quarter_circle(r), 0.5);
        let mut c = Curve::new();
        let ts = subdivision_points(&mut c, &pts, 8, 0.5 * r).unwrap();
        assert!(ts.is_empty(), "ts: {ts:?}");
    }

    #[test]
    fn s_curve_splits_at_inflection() {
        let mut c = Curve::new();
        let ts = subdivision_points(&mut c, &s_curve(), 8, 0.01).unwrap();
        assert!(ts.iter().any(|t| (t - 0.5).abs() < 1e-9), "ts: {ts:?}");
    }

    #[test]
    fn quadratic_skips_inflection_pass() {
        let mut c = Curve::new();
        // Axis-aligned first control vector: no rotation.
        let ts = subdivision_points(&mut c, &[0.0, 0.0, 0.0, 10.0, 10.0, 10.0], 6, 0.1).unwrap();
        assert!(!c.is_cubic());
        assert!(ts.iter().all(|t| (END_MARGIN..1.0 - END_MARGIN).contains(t)));
    }

    #[test]
    fn looped_cubic_output_is_sorted() {
        let mut c = Curve::new();
        let ts = subdivision_points(&mut c, &looped_cubic(), 8, 2.0).unwrap();
        assert!(!ts.is_empty());
        assert!(ts.windows(2).all(|w| w[0] <= w[1]), "ts: {ts:?}");
    }

    #[test]
    fn bad_degree_is_reported() {
        let mut c = Curve::new();
        let err = subdivision_points(&mut c, &[0.0; 8], 4, 1.0).unwrap_err();
        assert_eq!(err, CurveError::UnsupportedDegree { coords: 4 });
    }

    #[test]
    fn random_cubics_stay_within_bounds() {
        let mut c = Curve::new();
        for pts in random_cubics(0x5eed, 256, 200.0) {
            let ts = subdivision_points(&mut c, &pts, 8, 3.0).unwrap();
            assert!(ts.len() <= MAX_SUBDIVISIONS);
            assert!(ts.windows(2).all(|w| w[0] <= w[1]));
            assert!(ts.iter().all(|t| (END_MARGIN..1.0 - END_MARGIN).contains(t)));
        }
    }
}
