//! Unknown-space exploration.
//!
//! A signal whose standard deviation exceeds a multiple of the bundle's
//! median standard deviation is flagged for investigation, unclassified.

use emergence_core::models::{EmergencePotential, FeatureBundle, UnknownSignal};

use crate::stats;

/// Flag unusually variable signals. Signals with fewer than two samples or
/// any non-finite value are skipped.
pub fn explore_unknown(bundle: &FeatureBundle, variance_multiple: f64) -> Vec<UnknownSignal> {
    let measured: Vec<(String, f64, &[f64])> = bundle
        .signals()
        .filter(|s| s.values.len() >= 2 && stats::all_finite(s.values))
        .filter_map(|s| Some((s.feature_id(), stats::std_dev(s.values)?, s.values)))
        .collect();

    let deviations: Vec<f64> = measured.iter().map(|(_, std, _)| *std).collect();
    let Some(baseline) = stats::median(&deviations) else {
        return Vec::new();
    };

    measured
        .into_iter()
        .filter(|(_, std, _)| *std > 0.0 && *std > variance_multiple * baseline)
        .map(|(feature, std, values)| {
            let kurtosis = stats::excess_kurtosis(values).unwrap_or(0.0);
            UnknownSignal {
                feature,
                deviation: std,
                baseline,
                kurtosis,
                emergence_potential: potential(std, baseline, kurtosis, variance_multiple),
                requires_investigation: true,
            }
        })
        .collect()
}

fn potential(std: f64, baseline: f64, kurtosis: f64, multiple: f64) -> EmergencePotential {
    let ratio = if baseline > 0.0 {
        std / baseline
    } else {
        f64::INFINITY
    };
    if ratio >= 2.0 * multiple {
        EmergencePotential::High
    } else if kurtosis > 1.0 {
        EmergencePotential::Medium
    } else {
        EmergencePotential::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_only_the_outlier_signal() {
        let calm: Vec<f64> = (0..10).map(|i| (i % 2) as f64 * 0.1).collect();
        let wild: Vec<f64> = (0..10).map(|i| (i % 2) as f64 * 10.0).collect();
        let bundle = FeatureBundle::new()
            .with_signal("audio", "energy", calm.clone())
            .with_signal("facial", "gaze", calm)
            .with_signal("unknown", "residual", wild);

        let flagged = explore_unknown(&bundle, 1.5);
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].feature, "unknown.residual");
        assert!(flagged[0].requires_investigation);
        assert_eq!(flagged[0].emergence_potential, EmergencePotential::High);
    }

    #[test]
    fn empty_bundle_flags_nothing() {
        assert!(explore_unknown(&FeatureBundle::new(), 1.5).is_empty());
    }
}
