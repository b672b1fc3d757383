//! Low-degree polynomial root finding.
//!
//! All solvers write their roots into a caller-provided buffer starting at
//! `off` and return how many they wrote, so the curve analysis code can
//! stack the results of several solves into one scratch array without
//! allocating.

use std::f64::consts::FRAC_PI_3;

/// Discriminants closer to zero than this are treated as a double root.
const DOUBLE_ROOT_EPS: f64 = 1e-8;

/// Returns `true` if `x` lies within `err` of `y`.
#[inline]
pub(crate) fn within(x: f64, y: f64, err: f64) -> bool {
    let d = y - x;
    d <= err && d >= -err
}

/// Solve `a·t² + b·t + c = 0`, writing the real roots at `out[off..]`.
///
/// Degenerates to the linear solve `-c/b` when `a == 0`, and reports no
/// roots when both `a` and `b` vanish. A zero discriminant yields a single
/// root. The two-root case picks the formulation that never adds numbers
/// of opposite sign, which would lose precision.
///
/// # Panics
///
/// Panics if `out` cannot hold two values starting at `off`.
pub fn quadratic_roots(a: f64, b: f64, c: f64, out: &mut [f64], off: usize) -> usize {
    let mut ret = off;
    if a != 0.0 {
        let dis = b * b - 4.0 * a * c;
        if dis > 0.0 {
            let sqrt_dis = dis.sqrt();
            if b >= 0.0 {
                out[ret] = (2.0 * c) / (-b - sqrt_dis);
                out[ret + 1] = (-b - sqrt_dis) / (2.0 * a);
            } else {
                out[ret] = (-b + sqrt_dis) / (2.0 * a);
                out[ret + 1] = (2.0 * c) / (-b + sqrt_dis);
            }
            ret += 2;
        } else if dis == 0.0 {
            out[ret] = -b / (2.0 * a);
            ret += 1;
        }
    } else if b != 0.0 {
        out[ret] = -c / b;
        ret += 1;
    }
    ret - off
}

/// Solve `d·t³ + a·t² + b·t + c = 0` and keep only roots in `[lo, hi)`.
///
/// Falls back to [`quadratic_roots`] when `d == 0`. Otherwise the cubic is
/// normalised and depressed, then solved with Cardano's formula (one real
/// root) or the trigonometric method (three real roots).
///
/// # Panics
///
/// Panics if `out` cannot hold three values starting at `off`.
#[allow(clippy::too_many_arguments)]
pub fn cubic_roots_in_range(
    d: f64,
    a: f64,
    b: f64,
    c: f64,
    out: &mut [f64],
    off: usize,
    lo: f64,
    hi: f64,
) -> usize {
    if d == 0.0 {
        let num = quadratic_roots(a, b, c, out, off);
        return filter_in_range(out, off, num, lo, hi) - off;
    }

    // Normal form: t³ + a·t² + b·t + c = 0.
    let a = a / d;
    let b = b / d;
    let c = c / d;

    // Substituting t = y - a/3 eliminates the quadratic term, leaving
    // y³ + 3p·y + 2q = 0. Only p and q are needed below.
    let sub = (1.0 / 3.0) * a;
    let sq_a = a * a;
    let p = (1.0 / 3.0) * ((-1.0 / 3.0) * sq_a + b);
    let q = 0.5 * ((2.0 / 27.0) * a * sq_a - sub * b + c);

    let cb_p = p * p * p;
    let disc = q * q + cb_p;

    let num = if disc < 0.0 {
        // disc < 0 implies p < 0, so both square roots are real. Rounding
        // can push the acos argument a hair outside [-1, 1].
        let phi = (1.0 / 3.0) * (-q / (-cb_p).sqrt()).clamp(-1.0, 1.0).acos();
        let t = 2.0 * (-p).sqrt();
        out[off] = t * phi.cos();
        out[off + 1] = -t * (phi + FRAC_PI_3).cos();
        out[off + 2] = -t * (phi - FRAC_PI_3).cos();
        3
    } else {
        let sqrt_disc = disc.sqrt();
        let u = (sqrt_disc - q).cbrt();
        let v = -(sqrt_disc + q).cbrt();
        out[off] = u + v;
        if within(disc, 0.0, DOUBLE_ROOT_EPS) {
            out[off + 1] = -(out[off] / 2.0);
            2
        } else {
            1
        }
    };

    for root in &mut out[off..off + num] {
        *root -= sub;
    }
    filter_in_range(out, off, num, lo, hi) - off
}

/// Compact `out[off..off + len]` in place, keeping values in `[lo, hi)`.
///
/// Returns the index one past the last kept value (not a count).
pub fn filter_in_range(out: &mut [f64], off: usize, len: usize, lo: f64, hi: f64) -> usize {
    let mut ret = off;
    for i in off..off + len {
        let v = out[i];
        if v >= lo && v < hi {
            out[ret] = v;
            ret += 1;
        }
    }
    ret
}

/// Sort `out[..len]` ascending. Inputs are at most ten values, so an
/// insertion sort beats anything cleverer.
pub fn insertion_sort(out: &mut [f64], len: usize) {
    for i in 1..len {
        let ai = out[i];
        let mut j = i;
        while j > 0 && out[j - 1] > ai {
            out[j] = out[j - 1];
            j -= 1;
        }
        out[j] = ai;
    }
}
