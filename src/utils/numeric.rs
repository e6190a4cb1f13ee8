//! Numeric helpers for progress values.

/// Highest value [`inc`](crate::ProgressController::inc) will move the bar to.
///
/// Only an explicit `set(1.0)` (or `done`) completes the bar.
pub const INC_CEILING: f64 = 0.994;

/// Restricts `n` to `[min, max]`.
///
/// `NaN` is treated as being below the range and yields `min`.
///
/// # Example
///
/// ```rust
/// use jprogress::utils::clamp;
///
/// assert_eq!(clamp(-1.0, 0.0, 1.0), 0.0);
/// assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
/// assert_eq!(clamp(f64::NAN, 0.08, 1.0), 0.08);
/// ```
pub fn clamp(n: f64, min: f64, max: f64) -> f64 {
    if n.is_nan() || n < min {
        min
    } else if n > max {
        max
    } else {
        n
    }
}

/// Converts a status in `[0, 1]` into the bar's horizontal offset in percent.
///
/// `0` maps to `"-100"` (fully off-screen to the left) and `1` to `"0"`.
pub fn to_bar_perc(n: f64) -> String {
    format!("{}", (n - 1.0) * 100.0)
}

/// The automatic increment for a bar currently at `status`.
///
/// Progress slows down as it approaches the end and stops at `0.99`.
pub fn trickle_amount(status: f64) -> f64 {
    match status {
        n if n < 0.2 => 0.1,
        n if n < 0.5 => 0.04,
        n if n < 0.8 => 0.02,
        n if n < 0.99 => 0.005,
        _ => 0.0,
    }
}
