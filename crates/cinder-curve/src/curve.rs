//! Polynomial form of a single cubic or quadratic Bezier segment.
//!
//! [`Curve`] stores a segment as `P(t) = ((a·t + b)·t + c)·t + d` per axis,
//! together with the pre-scaled first-derivative coefficients `3a` and
//! `2b`. It is a reusable value: one instance per rasterization context is
//! re-[`set`](Curve::set) for every segment instead of being reallocated.

use crate::error::CurveError;
use crate::poly::{cubic_roots_in_range, quadratic_roots};

/// Coordinate count of a quadratic segment (three control points).
pub const QUAD_COORDS: usize = 6;

/// Coordinate count of a cubic segment (four control points).
pub const CUBIC_COORDS: usize = 8;

/// Hard cap on false-position iterations in the radius-of-curvature solve.
const FALSE_POSITION_ITER_LIMIT: usize = 100;

/// A cubic or quadratic segment in derivative-friendly polynomial form.
///
/// A quadratic is represented with `ax = ay = 0`. The coefficients are
/// fully determined by the most recent `set*` call; a freshly constructed
/// curve is the degenerate all-zero curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Curve {
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
    // First derivative, pre-scaled: dax = 3·ax, dbx = 2·bx.
    dax: f64,
    day: f64,
    dbx: f64,
    dby: f64,
    cubic: bool,
}

impl Curve {
    /// Create an all-zero curve, ready to be [`set`](Curve::set).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cubic from `[x1, y1, x2, y2, x3, y3, x4, y4]`.
    pub fn cubic(p: &[f64; CUBIC_COORDS]) -> Self {
        let mut c = Self::new();
        c.set_cubic(p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]);
        c
    }

    /// Build a quadratic from `[x1, y1, x2, y2, x3, y3]`.
    pub fn quadratic(p: &[f64; QUAD_COORDS]) -> Self {
        let mut c = Self::new();
        c.set_quad(p[0], p[1], p[2], p[3], p[4], p[5]);
        c
    }

    /// Re-derive all coefficients from the first `coords` values of `points`.
    ///
    /// `coords` must be [`QUAD_COORDS`] or [`CUBIC_COORDS`]; `points` may be
    /// longer than that (path iterators commonly hand out a fixed-size
    /// scratch array).
    ///
    /// # Errors
    ///
    /// [`CurveError::UnsupportedDegree`] for any other `coords`, and
    /// [`CurveError::MissingCoordinates`] if `points` is too short. The
    /// curve is left untouched on error.
    pub fn set(&mut self, points: &[f64], coords: usize) -> Result<(), CurveError> {
        check_coords(points, coords)?;
        let p = points;
        if coords == CUBIC_COORDS {
            self.set_cubic(p[0], p[1], p[2], p[3], p[4], p[5], p[6], p[7]);
        } else {
            self.set_quad(p[0], p[1], p[2], p[3], p[4], p[5]);
        }
        Ok(())
    }

    /// Set this curve to the cubic with control points `(x1,y1)..(x4,y4)`.
    #[allow(clippy::too_many_arguments)]
    pub fn set_cubic(
        &mut self,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    ) {
        self.ax = 3.0 * (x2 - x3) + x4 - x1;
        self.ay = 3.0 * (y2 - y3) + y4 - y1;
        self.bx = 3.0 * (x1 - 2.0 * x2 + x3);
        self.by = 3.0 * (y1 - 2.0 * y2 + y3);
        self.cx = 3.0 * (x2 - x1);
        self.cy = 3.0 * (y2 - y1);
        self.dx = x1;
        self.dy = y1;
        self.dax = 3.0 * self.ax;
        self.day = 3.0 * self.ay;
        self.dbx = 2.0 * self.bx;
        self.dby = 2.0 * self.by;
        self.cubic = true;
    }

    /// Set this curve to the quadratic with control points `(x1,y1)..(x3,y3)`.
    pub fn set_quad(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        self.ax = 0.0;
        self.ay = 0.0;
        self.bx = x1 - 2.0 * x2 + x3;
        self.by = y1 - 2.0 * y2 + y3;
        self.cx = 2.0 * (x2 - x1);
        self.cy = 2.0 * (y2 - y1);
        self.dx = x1;
        self.dy = y1;
        self.dax = 0.0;
        self.day = 0.0;
        self.dbx = 2.0 * self.bx;
        self.dby = 2.0 * self.by;
        self.cubic = false;
    }

    /// Whether the last `set*` call described a cubic.
    pub fn is_cubic(&self) -> bool {
        self.cubic
    }

    /// X coordinate at `t`.
    #[inline]
    pub fn x_at(&self, t: f64) -> f64 {
        t * (t * (t * self.ax + self.bx) + self.cx) + self.dx
    }

    /// Y coordinate at `t`.
    #[inline]
    pub fn y_at(&self, t: f64) -> f64 {
        t * (t * (t * self.ay + self.by) + self.cy) + self.dy
    }

    /// X component of the tangent at `t`.
    #[inline]
    pub fn dx_at(&self, t: f64) -> f64 {
        t * (t * self.dax + self.dbx) + self.cx
    }

    /// Y component of the tangent at `t`.
    #[inline]
    pub fn dy_at(&self, t: f64) -> f64 {
        t * (t * self.day + self.dby) + self.cy
    }

    /// Position at `t`. The polynomial is evaluated for any real `t`.
    pub fn position_at(&self, t: f64) -> (f64, f64) {
        (self.x_at(t), self.y_at(t))
    }

    /// First derivative (tangent) at `t`.
    pub fn derivative_at(&self, t: f64) -> (f64, f64) {
        (self.dx_at(t), self.dy_at(t))
    }

    /// Roots of `x'(t)`: the parameters of local X extrema.
    ///
    /// Writes 0..=2 values at `out[off..]` and returns the count. Roots are
    /// not restricted to `[0, 1]`.
    pub fn derivative_roots_x(&self, out: &mut [f64], off: usize) -> usize {
        quadratic_roots(self.dax, self.dbx, self.cx, out, off)
    }

    /// Roots of `y'(t)`: the parameters of local Y extrema.
    pub fn derivative_roots_y(&self, out: &mut [f64], off: usize) -> usize {
        quadratic_roots(self.day, self.dby, self.cy, out, off)
    }

    /// Inflection points in `[0, 1]`.
    ///
    /// An inflection occurs where `x'·y'' - y'·x''` vanishes; for a cubic
    /// that cross product is quadratic in `t`, so there are at most two.
    /// Quadratics have none.
    pub fn inflection_points(&self, out: &mut [f64], off: usize) -> usize {
        let a = self.dax * self.dby - self.dbx * self.day;
        let b = 2.0 * (self.cy * self.dax - self.day * self.cx);
        let c = self.cy * self.dbx - self.cx * self.dby;

        let num = quadratic_roots(a, b, c, out, off);
        let mut ret = off;
        for i in off..off + num {
            let t = out[i];
            if (0.0..=1.0).contains(&t) {
                out[ret] = t;
                ret += 1;
            }
        }
        ret - off
    }

    /// Parameters in `[0, 1)` where the first and second derivatives are
    /// perpendicular, i.e. roots of `f'(t) · f''(t)`.
    ///
    /// These stand in for the local extrema of the radius of curvature:
    /// the true extrema need the roots of a higher-degree derivative that
    /// is harder to solve than the curvature equation itself. Writes up
    /// to three values.
    pub fn perpendicular_extrema(&self, out: &mut [f64], off: usize) -> usize {
        debug_assert!(out.len() >= off + 3);

        // Coefficients of a constant multiple of f'(t)·f''(t); scaling does
        // not move the roots.
        let a = 2.0 * (self.dax * self.dax + self.day * self.day);
        let b = 3.0 * (self.dax * self.dbx + self.day * self.dby);
        let c = 2.0 * (self.dax * self.cx + self.day * self.cy)
            + self.dbx * self.dbx
            + self.dby * self.dby;
        let d = self.dbx * self.cx + self.dby * self.cy;
        cubic_roots_in_range(a, b, c, d, out, off, 0.0, 1.0)
    }

    /// Squared radius of curvature at `t`.
    ///
    /// With `S = |f'|²`, `D = |f''|²` and `C = f'·f''`, this is
    /// `S³ / (S·D - C²)`. It is `+inf` where the curvature vanishes
    /// (inflections, straight segments) and NaN where the tangent does.
    pub fn roc_sq(&self, t: f64) -> f64 {
        let dx = t * (t * self.dax + self.dbx) + self.cx;
        let dy = t * (t * self.day + self.dby) + self.cy;
        let ddx = 2.0 * self.dax * t + self.dbx;
        let ddy = 2.0 * self.day * t + self.dby;
        let dx2dy2 = dx * dx + dy * dy;
        let ddx2ddy2 = ddx * ddx + ddy * ddy;
        let ddxdxddydy = ddx * dx + ddy * dy;
        dx2dy2 * ((dx2dy2 * dx2dy2) / (dx2dy2 * ddx2ddy2 - ddxdxddydy * ddxdxddydy))
    }

    /// Parameters in `[0, 1)` where the radius of curvature equals `w`.
    ///
    /// These are the points where an offset curve at distance `w` grows a
    /// cusp, so a stroke-flattening pass must subdivide there. `[0, 1]` is
    /// partitioned at the [`perpendicular_extrema`](Self::perpendicular_extrema)
    /// (plus the end point `1.0`), and each sub-interval over which
    /// `ROC² - w²` changes sign is solved with Illinois-corrected false
    /// position to relative interval width `err`.
    ///
    /// `out` is used as scratch for the partition and must hold at least
    /// `off + 4` values; callers conventionally pass a 10-slot buffer.
    /// Returns the number of roots written at `out[off..]`.
    #[doc(alias = "radius_of_curvature_minus_width_roots")]
    pub fn roc_minus_width_roots(&self, out: &mut [f64], off: usize, w: f64, err: f64) -> usize {
        debug_assert!(out.len() >= off + 4);

        let w2 = w * w;
        let mut ret = off;
        let mut num_perp = self.perpendicular_extrema(out, off);
        // Always check the interval end point.
        out[off + num_perp] = 1.0;
        num_perp += 1;

        let mut t0 = 0.0;
        let mut ft0 = self.roc_sq(t0) - w2;
        for i in off..off + num_perp {
            let t1 = out[i];
            let ft1 = self.roc_sq(t1) - w2;
            if ft0 == 0.0 {
                out[ret] = t0;
                ret += 1;
            } else if ft1 * ft0 < 0.0 {
                // ROC >= 0 everywhere, so ROC² == w² exactly when ROC == w.
                out[ret] = self.false_position_roc_sq(t0, t1, w2, err);
                ret += 1;
            }
            t0 = t1;
            ft0 = ft1;
        }
        ret - off
    }

    /// False position on `ROC²(t) - target` over a sign-changing bracket,
    /// with the Illinois correction: each consecutive step that keeps the
    /// same bracket side halves the stale end's value once more.
    fn false_position_roc_sq(&self, x0: f64, x1: f64, target: f64, err: f64) -> f64 {
        let mut side: i32 = 0;
        let mut t = x1;
        let mut ft = eliminate_inf(self.roc_sq(t) - target);
        let mut s = x0;
        let mut fs = eliminate_inf(self.roc_sq(s) - target);
        let mut r = s;

        let mut i = 0;
        while i < FALSE_POSITION_ITER_LIMIT && (t - s).abs() > err * (t + s).abs() {
            r = (fs * t - ft * s) / (fs - ft);
            let fr = self.roc_sq(r) - target;
            if same_sign(fr, ft) {
                ft = fr;
                t = r;
                if side < 0 {
                    fs /= 2f64.powi(-side);
                    side -= 1;
                } else {
                    side = -1;
                }
            } else if fr * fs > 0.0 {
                fs = fr;
                s = r;
                if side > 0 {
                    ft /= 2f64.powi(side);
                    side += 1;
                } else {
                    side = 1;
                }
            } else {
                break;
            }
            i += 1;
        }
        r
    }
}

/// Validate a flat control-point slice against its declared coordinate count.
pub(crate) fn check_coords(points: &[f64], coords: usize) -> Result<(), CurveError> {
    if coords != CUBIC_COORDS && coords != QUAD_COORDS {
        return Err(CurveError::UnsupportedDegree { coords });
    }
    if points.len() < coords {
        return Err(CurveError::MissingCoordinates {
            needed: coords,
            got: points.len(),
        });
    }
    Ok(())
}

/// Clamp infinities to the extreme finite values so the false-position
/// update stays well defined.
#[inline]
fn eliminate_inf(x: f64) -> f64 {
    if x == f64::INFINITY {
        f64::MAX
    } else if x == f64::NEG_INFINITY {
        f64::MIN
    } else {
        x
    }
}

/// Strict sign agreement. Testing `x * y > 0` underflows for tiny values.
#[inline]
fn same_sign(x: f64, y: f64) -> bool {
    (x < 0.0 && y < 0.0) || (x > 0.0 && y > 0.0)
}
