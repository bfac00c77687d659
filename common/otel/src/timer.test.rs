use super::*;

#[test]
fn timezone_parse_defaults_to_local() {
    assert_eq!(Timezone::parse(None), Timezone::Local);
    assert_eq!(Timezone::parse(Some("bogus")), Timezone::Local);
}

#[test]
fn timezone_parse_accepts_utc_case_insensitively() {
    assert_eq!(Timezone::parse(Some("utc")), Timezone::Utc);
    assert_eq!(Timezone::parse(Some("UTC")), Timezone::Utc);
}

#[test]
fn configurable_timer_formats_without_panicking() {
    let local_timer = ConfigurableTimer::new(Timezone::Local);
    let utc_timer = ConfigurableTimer::new(Timezone::Utc);

    let mut local_buf = String::new();
    let mut utc_buf = String::new();
    local_timer
        .format_time(&mut Writer::new(&mut local_buf))
        .unwrap();
    utc_timer
        .format_time(&mut Writer::new(&mut utc_buf))
        .unwrap();

    assert!(!local_buf.is_empty());
    assert!(utc_buf.ends_with('Z'));
}
