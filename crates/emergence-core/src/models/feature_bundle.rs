//! Feature bundle: modality → signal name → numeric series.
//!
//! Produced by the upstream extractor, one per item. The engine never judges
//! its content; a missing modality or signal is simply absent.
//!
//! Deserialization is lenient: a signal that is not a flat numeric series
//! (nested landmark grids, lists of event objects, scalars) is dropped with a
//! warning and the rest of the bundle is kept.

use std::collections::BTreeMap;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Signals of one modality, keyed by signal name.
pub type ModalitySignals = BTreeMap<String, Vec<f64>>;

/// The full set of numeric signals extracted from one input item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureBundle {
    modalities: BTreeMap<String, ModalitySignals>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSeries {
    Numeric(Vec<f64>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawModality {
    Signals(BTreeMap<String, RawSeries>),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for FeatureBundle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, RawModality>::deserialize(deserializer)?;
        let mut modalities = BTreeMap::new();

        for (modality, value) in raw {
            let RawModality::Signals(signals) = value else {
                warn!(modality = %modality, "dropping modality that is not a signal map");
                continue;
            };
            let mut kept = ModalitySignals::new();
            for (signal, series) in signals {
                match series {
                    RawSeries::Numeric(values) => {
                        kept.insert(signal, values);
                    }
                    RawSeries::Other(_) => {
                        warn!(modality = %modality, signal = %signal, "dropping non-numeric signal");
                    }
                }
            }
            modalities.insert(modality, kept);
        }

        Ok(Self { modalities })
    }
}

/// A borrowed view of one signal inside a bundle.
#[derive(Debug, Clone, Copy)]
pub struct SignalRef<'a> {
    pub modality: &'a str,
    pub name: &'a str,
    pub values: &'a [f64],
}

impl SignalRef<'_> {
    /// Stable identifier: `modality.signal`.
    pub fn feature_id(&self) -> String {
        format!("{}.{}", self.modality, self.name)
    }
}

impl FeatureBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a signal.
    pub fn insert(
        &mut self,
        modality: impl Into<String>,
        signal: impl Into<String>,
        values: Vec<f64>,
    ) -> &mut Self {
        self.modalities
            .entry(modality.into())
            .or_default()
            .insert(signal.into(), values);
        self
    }

    /// Builder-style `insert`.
    pub fn with_signal(
        mut self,
        modality: impl Into<String>,
        signal: impl Into<String>,
        values: Vec<f64>,
    ) -> Self {
        self.insert(modality, signal, values);
        self
    }

    /// Signals of a modality, if present.
    pub fn modality(&self, name: &str) -> Option<&ModalitySignals> {
        self.modalities.get(name)
    }

    pub fn has_modality(&self, name: &str) -> bool {
        self.modalities.contains_key(name)
    }

    pub fn modality_names(&self) -> impl Iterator<Item = &str> {
        self.modalities.keys().map(String::as_str)
    }

    /// All signals in deterministic (modality, signal) order.
    pub fn signals(&self) -> impl Iterator<Item = SignalRef<'_>> {
        self.modalities.iter().flat_map(|(modality, signals)| {
            signals.iter().map(move |(name, values)| SignalRef {
                modality,
                name,
                values,
            })
        })
    }

    /// Number of signals across all modalities.
    pub fn signal_count(&self) -> usize {
        self.modalities.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.signal_count() == 0
    }
}
