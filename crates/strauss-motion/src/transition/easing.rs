//! Easing functions for animations

/// Quadratic ease-in-out in the classic `(t, b, c, d)` form
///
/// `t` is the elapsed time, `b` the start value, `c` the total change and
/// `d` the duration. The first half accelerates, the second decelerates.
/// Inputs past `d` are not clamped.
#[inline]
pub fn ease_in_out_quad(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t + b;
    }
    t -= 1.0;
    -c / 2.0 * (t * (t - 2.0) - 1.0) + b
}

/// Normalized quadratic ease-in-out over `[0, 1]`
#[inline]
pub fn ease_in_out(t: f64) -> f64 {
    ease_in_out_quad(t, 0.0, 1.0, 1.0)
}
