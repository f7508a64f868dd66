//! Collision behaviour of history keys.

use emergence_core::models::{FeaturePairKey, Pattern, PatternKey};

#[test]
fn descriptions_differing_after_prefix_share_a_key() {
    // 40 canonical characters: "voice_pitch_drop_shoulder_rotation_decis"
    let a = PatternKey::derive(
        "cross_modal",
        "Voice pitch drop + shoulder rotation = decision point",
    );
    let b = PatternKey::derive(
        "cross_modal",
        "Voice pitch drop + shoulder rotation = decisive moment",
    );
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "cross_modal:voice_pitch_drop_shoulder_rotation_decis");
}

#[test]
fn descriptions_differing_early_stay_distinct() {
    let a = PatternKey::derive("trend", "audio.energy rises across the item");
    let b = PatternKey::derive("trend", "audio.energy falls across the item");
    assert_ne!(a, b);
}

#[test]
fn pattern_key_matches_derive() {
    let pattern = Pattern {
        pattern_type: "periodic".into(),
        description: "facial.eye_gaze repeats with a stable period".into(),
        strength: 0.7,
        confidence: 0.9,
        occurrences: Some(4),
    };
    assert_eq!(
        pattern.key(),
        PatternKey::derive("periodic", "facial.eye_gaze repeats with a stable period")
    );
}

#[test]
fn pair_keys_trim_whitespace() {
    assert_eq!(
        FeaturePairKey::derive(" audio.energy ", "facial.head_pose"),
        FeaturePairKey::derive("audio.energy", "facial.head_pose")
    );
}
