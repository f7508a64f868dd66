//! Per-signal pattern detectors and the cross-modal pattern.
//!
//! Descriptions carry only the feature id and a direction word, so a
//! regularity that recurs across items lands under one pattern key.

use emergence_core::constants::MIN_SERIES_LEN;
use emergence_core::models::{Correlation, FeatureBundle, Pattern, SignalRef};

use crate::stats;

pub const PERIODIC: &str = "periodic";
pub const TREND: &str = "trend";
pub const BURST: &str = "burst";
pub const CROSS_MODAL: &str = "cross_modal";

/// Confidence from sample count: `1 - 1/sqrt(n)`.
pub fn sample_confidence(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    (1.0 - 1.0 / (n as f64).sqrt()).clamp(0.0, 1.0)
}

/// Periodic, trend, and burst patterns for every usable signal.
pub fn signal_patterns(bundle: &FeatureBundle, min_strength: f64) -> Vec<Pattern> {
    bundle
        .signals()
        .filter(|s| s.values.len() >= MIN_SERIES_LEN && stats::all_finite(s.values))
        .flat_map(|signal| {
            [periodic(&signal), trend(&signal), burst(&signal)]
                .into_iter()
                .flatten()
        })
        .filter(|p| p.strength >= min_strength)
        .collect()
}

/// The strongest correlation, promoted to a pattern when |r| reaches `threshold`.
///
/// `strongest_first` must already be sorted by descending |r|.
pub fn cross_modal_pattern(strongest_first: &[Correlation], threshold: f64) -> Option<Pattern> {
    let top = strongest_first.first()?;
    if top.correlation.abs() < threshold {
        return None;
    }
    let relation = if top.correlation >= 0.0 { "tracks" } else { "opposes" };
    Some(Pattern {
        pattern_type: CROSS_MODAL.to_string(),
        description: format!("{} {relation} {}", top.feature_a, top.feature_b),
        strength: top.correlation.abs(),
        confidence: top.significance,
        occurrences: None,
    })
}

/// Peak autocorrelation at a local maximum over lags `2..=n/2`.
fn periodic(signal: &SignalRef<'_>) -> Option<Pattern> {
    let values = signal.values;
    let max_lag = values.len() / 2;

    let mut best: Option<(usize, f64)> = None;
    for lag in 2..=max_lag {
        let (Some(prev), Some(here)) = (
            stats::autocorrelation(values, lag - 1),
            stats::autocorrelation(values, lag),
        ) else {
            continue;
        };
        let next = stats::autocorrelation(values, lag + 1).unwrap_or(f64::NEG_INFINITY);
        let is_peak = here > prev && here >= next;
        if is_peak && best.map_or(true, |(_, r)| here > r) {
            best = Some((lag, here));
        }
    }

    let (period, acf) = best?;
    if acf <= 0.0 {
        return None;
    }
    Some(Pattern {
        pattern_type: PERIODIC.to_string(),
        description: format!("{} periodic", signal.feature_id()),
        strength: acf.min(1.0),
        confidence: sample_confidence(values.len()),
        occurrences: u32::try_from(values.len() / period).ok(),
    })
}

/// |Pearson r| of value against sample index.
fn trend(signal: &SignalRef<'_>) -> Option<Pattern> {
    let index: Vec<f64> = (0..signal.values.len()).map(|i| i as f64).collect();
    let r = stats::pearson(&index, signal.values)?;
    let direction = if r >= 0.0 { "rising" } else { "falling" };
    Some(Pattern {
        pattern_type: TREND.to_string(),
        description: format!("{} {direction}", signal.feature_id()),
        strength: r.abs(),
        confidence: sample_confidence(signal.values.len()),
        occurrences: None,
    })
}

/// Heavy tails: positive excess kurtosis `k`, mapped to `k / (k + 3)`.
fn burst(signal: &SignalRef<'_>) -> Option<Pattern> {
    let values = signal.values;
    let k = stats::excess_kurtosis(values)?;
    if k <= 0.0 {
        return None;
    }
    let mean = stats::mean(values)?;
    let std = stats::std_dev(values)?;
    let spikes = values.iter().filter(|v| (*v - mean).abs() > 2.0 * std).count();

    Some(Pattern {
        pattern_type: BURST.to_string(),
        description: format!("{} bursts", signal.feature_id()),
        strength: k / (k + 3.0),
        confidence: sample_confidence(values.len()),
        occurrences: u32::try_from(spikes).ok(),
    })
}
