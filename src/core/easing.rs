//! Easing curves for time-based scroll animation.

/// Cubic ease-in-out.  Input is clamped to `[0, 1]`.
///
/// `t < 0.5 → 4t³`, otherwise `1 - (-2t + 2)³ / 2`.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
