//! Piecewise-linear interpolation on vertical coordinates.
//!
//! Pressure grids run surface-to-top, so coordinates are usually
//! *decreasing*. The helpers accept either monotonic direction.

use nalgebra::DVector;

/// Index `j` of the segment `[x[j], x[j+1]]` used to evaluate `xi`.
///
/// Inside the grid this is the bracketing segment. Outside it, the end
/// segment nearest to `xi` is returned so callers can extrapolate.
fn segment(x: &[f64], xi: f64) -> usize {
    let last = x.len() - 2;
    for j in 0..=last {
        if (xi - x[j]) * (xi - x[j + 1]) <= 0.0 {
            return j;
        }
    }
    if (xi - x[0]).abs() <= (xi - x[last + 1]).abs() {
        0
    } else {
        last
    }
}

#[inline]
fn lerp(x0: f64, x1: f64, y0: f64, y1: f64, xi: f64) -> f64 {
    if xi == x0 || x1 == x0 {
        return y0;
    }
    if xi == x1 {
        return y1;
    }
    y0 + (xi - x0) * (y1 - y0) / (x1 - x0)
}

/// Linear interpolation of `y(x)` at `xi`, extrapolating linearly from the
/// end segments outside the grid.
///
/// # Arguments
///
/// * `x` - Monotonic coordinate (increasing or decreasing)
/// * `y` - Values on `x`, same length
/// * `xi` - Target coordinate
#[must_use]
pub fn interp_extrapolate(x: &[f64], y: &[f64], xi: f64) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    match x.len() {
        0 => f64::NAN,
        1 => y[0],
        _ => {
            let j = segment(x, xi);
            lerp(x[j], x[j + 1], y[j], y[j + 1], xi)
        }
    }
}

/// Linear interpolation of `y(x)` at `xi`, holding the end values outside
/// the grid.
#[must_use]
pub fn interp_clamped(x: &[f64], y: &[f64], xi: f64) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    match x.len() {
        0 => f64::NAN,
        1 => y[0],
        n => {
            let (lo, hi) = if x[0] <= x[n - 1] { (0, n - 1) } else { (n - 1, 0) };
            if xi <= x[lo] {
                y[lo]
            } else if xi >= x[hi] {
                y[hi]
            } else {
                let j = segment(x, xi);
                lerp(x[j], x[j + 1], y[j], y[j + 1], xi)
            }
        }
    }
}

/// Second-order finite-difference gradient with respect to the array index.
///
/// Centred differences in the interior, one-sided differences at both ends.
/// Arrays shorter than two elements yield zeros.
#[must_use]
pub fn gradient(values: &DVector<f64>) -> DVector<f64> {
    let n = values.len();
    if n < 2 {
        return DVector::zeros(n);
    }
    DVector::from_fn(n, |i, _| {
        if i == 0 {
            values[1] - values[0]
        } else if i == n - 1 {
            values[n - 1] - values[n - 2]
        } else {
            0.5 * (values[i + 1] - values[i - 1])
        }
    })
}

/// Running sum, `out[i] = Σ_{k≤i} values[k]`.
#[must_use]
pub fn cumulative_sum(values: &DVector<f64>) -> DVector<f64> {
    let mut acc = 0.0;
    values.map(|v| {
        acc += v;
        acc
    })
}
