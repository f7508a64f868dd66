use emergence_core::constants::PATTERN_KEY_DESCRIPTION_LEN;
use emergence_core::models::PatternKey;
use proptest::prelude::*;

proptest! {
    #[test]
    fn derive_is_deterministic(kind in "[a-z_]{1,12}", desc in ".{0,120}") {
        prop_assert_eq!(PatternKey::derive(&kind, &desc), PatternKey::derive(&kind, &desc));
    }

    #[test]
    fn description_part_is_bounded(kind in "[a-z]{1,12}", desc in ".{0,200}") {
        let key = PatternKey::derive(&kind, &desc);
        let (_, canonical) = key.as_str().split_once(':').unwrap();
        prop_assert!(canonical.chars().count() <= PATTERN_KEY_DESCRIPTION_LEN);
    }

    #[test]
    fn shared_canonical_prefix_conflates(
        prefix in "[a-z]{40}",
        tail_a in "[a-z ]{0,30}",
        tail_b in "[a-z ]{0,30}",
    ) {
        let a = PatternKey::derive("trend", &format!("{prefix}{tail_a}"));
        let b = PatternKey::derive("trend", &format!("{prefix}{tail_b}"));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn case_and_punctuation_do_not_split_keys(words in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let plain = words.join(" ");
        let noisy = words.iter().map(|w| w.to_uppercase()).collect::<Vec<_>>().join(" -- ");
        prop_assert_eq!(
            PatternKey::derive("burst", &plain),
            PatternKey::derive("burst", &noisy)
        );
    }

    #[test]
    fn different_types_never_collide(desc in "[a-z ]{0,50}") {
        prop_assert_ne!(PatternKey::derive("trend", &desc), PatternKey::derive("burst", &desc));
    }
}
