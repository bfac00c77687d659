use super::*;

#[derive(Debug, Clone)]
struct MockOptionsA {
    value: i32,
}

impl ProviderOptionsData for MockOptionsA {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn clone_box(&self) -> Box<dyn ProviderOptionsData> {
        Box::new(self.clone())
    }
}

impl ProviderMarker for MockOptionsA {
    const PROVIDER_NAME: &'static str = "mock-a";
}

#[derive(Debug, Clone)]
struct MockOptionsB;

impl ProviderOptionsData for MockOptionsB {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn clone_box(&self) -> Box<dyn ProviderOptionsData> {
        Box::new(self.clone())
    }
}

#[test]
fn downcast_succeeds_for_matching_type() {
    let opts: ProviderOptions = Box::new(MockOptionsA { value: 7 });
    let result = downcast_options::<MockOptionsA>(&opts);
    assert_eq!(result.unwrap().value, 7);
}

#[test]
fn downcast_returns_none_for_mismatched_type() {
    let opts: ProviderOptions = Box::new(MockOptionsA { value: 7 });
    assert!(downcast_options::<MockOptionsB>(&opts).is_none());
}

#[test]
fn try_downcast_errs_with_descriptive_message() {
    let opts: ProviderOptions = Box::new(MockOptionsA { value: 7 });
    let result = try_downcast_options::<MockOptionsB>(&opts);
    let err = result.unwrap_err().to_string();
    assert!(err.contains("MockOptionsB"));
}

#[test]
fn try_downcast_succeeds_for_matching_type() {
    let opts: ProviderOptions = Box::new(MockOptionsA { value: 42 });
    let result = try_downcast_options::<MockOptionsA>(&opts);
    assert_eq!(result.unwrap().value, 42);
}

#[test]
fn provider_marker_exposes_provider_name() {
    assert_eq!(MockOptionsA::PROVIDER_NAME, "mock-a");
}

#[test]
fn cloning_boxed_options_preserves_value() {
    let opts: ProviderOptions = Box::new(MockOptionsA { value: 3 });
    let cloned = opts.clone();
    assert_eq!(downcast_options::<MockOptionsA>(&cloned).unwrap().value, 3);
}
