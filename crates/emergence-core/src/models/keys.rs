//! Deterministic history keys.
//!
//! A `PatternKey` identifies "the same recurring pattern" across items. It is
//! derived from the pattern type and a canonical, truncated description, so
//! two descriptions that agree on their first
//! [`PATTERN_KEY_DESCRIPTION_LEN`](crate::constants::PATTERN_KEY_DESCRIPTION_LEN)
//! canonical characters share a key.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::PATTERN_KEY_DESCRIPTION_LEN;

/// Key of a pattern's strength history.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternKey(String);

impl PatternKey {
    /// Derive the key for `(pattern_type, description)`.
    ///
    /// Format: `{type}:{canonical}` where both parts are canonicalized and the
    /// description part is truncated.
    pub fn derive(pattern_type: &str, description: &str) -> Self {
        let kind = canonicalize(pattern_type, usize::MAX);
        let desc = canonicalize(description, PATTERN_KEY_DESCRIPTION_LEN);
        Self(format!("{kind}:{desc}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The pattern-type prefix.
    pub fn pattern_type(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(kind, _)| kind)
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a feature pair's correlation history.
///
/// Ordered: `(a, b)` and `(b, a)` are distinct because the lag is directional.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePairKey(String);

impl FeaturePairKey {
    pub fn derive(feature_a: &str, feature_b: &str) -> Self {
        Self(format!("{}~{}", feature_a.trim(), feature_b.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split back into `(feature_a, feature_b)`.
    pub fn features(&self) -> (&str, &str) {
        self.0.split_once('~').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for FeaturePairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lower-case, collapse every run of non-alphanumerics into one `_`, trim
/// leading/trailing `_`, keep at most `max_chars` characters.
fn canonicalize(raw: &str, max_chars: usize) -> String {
    let mut out = String::with_capacity(raw.len().min(max_chars));
    let mut pending_sep = false;
    let mut count = 0;

    for ch in raw.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                if count >= max_chars {
                    break;
                }
                out.push('_');
                count += 1;
            }
            pending_sep = false;
            if count >= max_chars {
                break;
            }
            out.push(ch);
            count += 1;
        } else {
            pending_sep = true;
        }
    }

    while out.ends_with('_') {
        out.pop();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_collapses_separators() {
        assert_eq!(canonicalize("  Voice  pitch -- drop!", 100), "voice_pitch_drop");
    }

    #[test]
    fn canonicalize_truncates_on_char_boundary() {
        assert_eq!(canonicalize("ÄÖÜ äöü", 4), "äöü");
        assert_eq!(canonicalize("abcdef", 3), "abc");
    }

    #[test]
    fn pattern_type_prefix_roundtrips() {
        let key = PatternKey::derive("cross_modal", "pitch drop");
        assert_eq!(key.pattern_type(), "cross_modal");
    }

    #[test]
    fn pair_key_is_ordered() {
        let ab = FeaturePairKey::derive("facial.x", "audio.y");
        let ba = FeaturePairKey::derive("audio.y", "facial.x");
        assert_ne!(ab, ba);
        assert_eq!(ab.features(), ("facial.x", "audio.y"));
    }
}
