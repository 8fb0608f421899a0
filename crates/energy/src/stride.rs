//! Down-sample stride selection.
//!
//! Longer lookback windows hold proportionally more readings, so the stride
//! grows with the window. The growth is a straight line fitted through two
//! calibration points and capped so very long windows stay readable.

/// `(days, stride)` pairs the stride line is fitted through.
const CALIBRATION: [(f64, f64); 2] = [(1.0, 1.0), (5.0, 3.0)];

/// Upper bound on the stride unless configured otherwise.
pub const DEFAULT_MAX_STRIDE: usize = 8;

/// Least-squares `(slope, intercept)` through [`CALIBRATION`].
fn fitted_line() -> (f64, f64) {
    let n = CALIBRATION.len() as f64;
    let mean_x = CALIBRATION.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = CALIBRATION.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (covariance, variance) =
        CALIBRATION
            .iter()
            .fold((0.0, 0.0), |(cov, var), (x, y)| {
                let dx = x - mean_x;
                (cov + dx * (y - mean_y), var + dx * dx)
            });

    let slope = covariance / variance;
    (slope, mean_y - slope * mean_x)
}

/// Returns the stride for a lookback of `days`, always in `1..=max_stride`.
///
/// A `max_stride` of zero is treated as one.
pub fn stride_for_days(days: u32, max_stride: usize) -> usize {
    let (slope, intercept) = fitted_line();
    let fitted = (slope * f64::from(days) + intercept).round();

    let stride = if fitted.is_finite() && fitted > 1.0 {
        fitted as usize
    } else {
        1
    };

    stride.min(max_stride.max(1))
}
