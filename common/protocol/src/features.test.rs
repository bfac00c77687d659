use std::collections::BTreeMap;

use super::*;

#[test]
fn defaults_are_all_enabled() {
    let features = Features::with_defaults();
    assert!(features.enabled(Feature::MicroCompact));
    assert!(features.enabled(Feature::SessionMemory));
}

#[test]
fn set_disables_a_single_feature() {
    let mut features = Features::with_defaults();
    features.set(Feature::StallRecovery, false);
    assert!(!features.enabled(Feature::StallRecovery));
    assert!(features.enabled(Feature::MicroCompact));
}

#[test]
fn apply_map_overrides_by_key() {
    let mut overrides = BTreeMap::new();
    overrides.insert("model_fallback".to_string(), false);
    overrides.insert("unknown_feature".to_string(), true);

    let mut features = Features::with_defaults();
    features.apply_map(&overrides);

    assert!(!features.enabled(Feature::ModelFallback));
    assert_eq!(features.get("model_fallback"), Some(false));
    assert_eq!(features.get("unknown_feature"), None);
}

#[test]
fn get_round_trips_through_key() {
    let features = Features::with_defaults();
    assert_eq!(features.get("micro_compact"), Some(true));
    assert_eq!(features.get("not_a_feature"), None);
}
