//! Trend detection over a pattern's strength history.
//!
//! Least-squares slope of strength against observation ordinal; the sign and
//! size of the slope classify the trajectory.

use emergence_core::models::{StrengthSample, Trajectory};

/// Minimum samples for a meaningful slope.
pub const MIN_SAMPLES: usize = 3;

/// Slope of strength per observation, or `None` with fewer than
/// [`MIN_SAMPLES`] samples or a degenerate fit.
pub fn strength_slope(history: &[StrengthSample]) -> Option<f64> {
    if history.len() < MIN_SAMPLES {
        return None;
    }

    let n = history.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, sample) in history.iter().enumerate() {
        let x = i as f64;
        let y = sample.strength;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < 1e-10 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    slope.is_finite().then_some(slope)
}

/// Ascending above `min_slope`, descending below `-min_slope`, stable otherwise.
pub fn classify_trajectory(slope: f64, min_slope: f64) -> Trajectory {
    if slope > min_slope {
        Trajectory::Ascending
    } else if slope < -min_slope {
        Trajectory::Descending
    } else {
        Trajectory::Stable
    }
}
