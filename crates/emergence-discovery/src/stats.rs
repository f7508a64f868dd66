//! Numeric helpers shared by the discovery functions.
//!
//! All helpers return `None` when the statistic is undefined (too few
//! samples, zero variance) instead of producing NaN.

use statrs::distribution::{ContinuousCDF, StudentsT};

use emergence_core::errors::{DiscoveryError, DiscoveryResult};

const EPSILON: f64 = 1e-12;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Pearson correlation over the common prefix of `x` and `y`, clamped to [-1, 1].
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len().min(y.len());
    if n < 2 {
        return None;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    let denom = (vx * vy).sqrt();
    if denom < EPSILON {
        return None;
    }
    let r = cov / denom;
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Pearson correlation of `a[t]` against `b[t + lag]`, with the overlap length.
///
/// A positive lag means `b` follows `a`.
pub fn lagged_pearson(a: &[f64], b: &[f64], lag: i32) -> Option<(f64, usize)> {
    let shift = lag.unsigned_abs() as usize;
    let (xs, ys) = if lag >= 0 {
        (a, b.get(shift..)?)
    } else {
        (a.get(shift..)?, b)
    };
    let n = xs.len().min(ys.len());
    pearson(&xs[..n], &ys[..n]).map(|r| (r, n))
}

/// Sample autocorrelation at `lag`.
pub fn autocorrelation(values: &[f64], lag: usize) -> Option<f64> {
    if lag == 0 || lag >= values.len() {
        return None;
    }
    let m = mean(values)?;
    let denom: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    if denom < EPSILON {
        return None;
    }
    let num: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - m) * (b - m))
        .sum();
    Some(num / denom)
}

/// Excess kurtosis (0 for a normal distribution).
pub fn excess_kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 4 {
        return None;
    }
    let m = mean(values)?;
    let n = values.len() as f64;
    let m2 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / n;
    if m2 < EPSILON {
        return None;
    }
    let m4 = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / n;
    Some(m4 / (m2 * m2) - 3.0)
}

/// `1 - p` for a two-sided Student-t test of `r` over `n` paired samples.
pub fn correlation_significance(r: f64, n: usize) -> DiscoveryResult<f64> {
    if n < 3 {
        return Ok(0.0);
    }
    let r = r.abs();
    if r >= 1.0 - EPSILON {
        return Ok(1.0);
    }

    let df = (n - 2) as f64;
    let t = r * (df / (1.0 - r * r)).sqrt();
    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| DiscoveryError::AnalysisFailed {
        analysis: "correlation",
        reason: e.to_string(),
    })?;
    let p = 2.0 * (1.0 - dist.cdf(t));
    Ok((1.0 - p).clamp(0.0, 1.0))
}

/// Signal values usable for statistics: every value finite.
pub fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
