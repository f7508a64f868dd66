//! Lagged cross-modality correlation scan.
//!
//! Every pair of usable signals from different modalities is scanned over
//! lags `[-max_lag, max_lag]`; the lag with the largest |r| wins. Pairs are
//! independent, so the scan runs on rayon.

use rayon::prelude::*;

use emergence_core::constants::MIN_SERIES_LEN;
use emergence_core::errors::DiscoveryResult;
use emergence_core::models::{Correlation, FeatureBundle};

use crate::stats;

/// A signal eligible for correlation.
struct Usable<'a> {
    feature: String,
    modality: &'a str,
    values: &'a [f64],
}

/// Best-lag correlation for every cross-modality pair, strongest first.
///
/// No strength filtering is applied here.
pub fn scan_pairs(bundle: &FeatureBundle, max_lag: usize) -> DiscoveryResult<Vec<Correlation>> {
    let signals: Vec<Usable<'_>> = bundle
        .signals()
        .filter(|s| s.values.len() >= MIN_SERIES_LEN && stats::all_finite(s.values))
        .map(|s| Usable {
            feature: s.feature_id(),
            modality: s.modality,
            values: s.values,
        })
        .collect();

    let pairs: Vec<(usize, usize)> = (0..signals.len())
        .flat_map(|i| (i + 1..signals.len()).map(move |j| (i, j)))
        .filter(|&(i, j)| signals[i].modality != signals[j].modality)
        .collect();

    let max_lag = i32::try_from(max_lag).unwrap_or(i32::MAX);

    let scanned: Vec<Option<Correlation>> = pairs
        .par_iter()
        .map(|&(i, j)| best_lag(&signals[i], &signals[j], max_lag))
        .collect::<DiscoveryResult<_>>()?;

    let mut correlations: Vec<Correlation> = scanned.into_iter().flatten().collect();
    sort_strongest_first(&mut correlations);
    Ok(correlations)
}

/// Correlations with |r| at least `min_correlation`, capped at `max_correlations`.
pub fn discover_correlations(
    bundle: &FeatureBundle,
    max_lag: usize,
    min_correlation: f64,
    max_correlations: usize,
) -> DiscoveryResult<Vec<Correlation>> {
    let mut correlations = scan_pairs(bundle, max_lag)?;
    correlations.retain(|c| c.correlation.abs() >= min_correlation);
    correlations.truncate(max_correlations);
    Ok(correlations)
}

fn best_lag(a: &Usable<'_>, b: &Usable<'_>, max_lag: i32) -> DiscoveryResult<Option<Correlation>> {
    let longest = i32::try_from(a.values.len().max(b.values.len())).unwrap_or(i32::MAX);
    let max_lag = max_lag.min(longest);
    let mut best: Option<(f64, i32, usize)> = None;

    for lag in -max_lag..=max_lag {
        let Some((r, n)) = stats::lagged_pearson(a.values, b.values, lag) else {
            continue;
        };
        if n < MIN_SERIES_LEN {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_r, best_lag, _)) => {
                r.abs() > best_r.abs()
                    || (r.abs() == best_r.abs() && lag.unsigned_abs() < best_lag.unsigned_abs())
            }
        };
        if better {
            best = Some((r, lag, n));
        }
    }

    let Some((r, lag, n)) = best else {
        return Ok(None);
    };

    Ok(Some(Correlation {
        feature_a: a.feature.clone(),
        feature_b: b.feature.clone(),
        correlation: r,
        significance: stats::correlation_significance(r, n)?,
        lag,
    }))
}

fn sort_strongest_first(correlations: &mut [Correlation]) {
    correlations.sort_by(|x, y| {
        y.correlation
            .abs()
            .total_cmp(&x.correlation.abs())
            .then_with(|| x.key().cmp(&y.key()))
    });
}
