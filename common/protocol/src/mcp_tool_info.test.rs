use super::*;

#[test]
fn threshold_chars_scales_with_context_window() {
    let config = McpAutoSearchConfig::default();
    assert_eq!(config.threshold_chars(200_000), 50_000.0);
    assert_eq!(config.threshold_chars(0), 0.0);
}

#[test]
fn default_config_has_sane_ratios() {
    let config = McpAutoSearchConfig::default();
    assert!(config.threshold_ratio > 0.0 && config.threshold_ratio < 1.0);
    assert!(config.chars_per_token > 0.0);
}
