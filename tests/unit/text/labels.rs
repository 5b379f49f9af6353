use super::*;

#[test]
fn title_prefixes_trimmed_name() {
    assert_eq!(title_label("edge-01"), "TSSH edge-01");
    assert_eq!(title_label("  lab  "), "TSSH lab");
}

#[test]
fn blank_title_falls_back_to_prefix() {
    assert_eq!(title_label(""), "TSSH");
    assert_eq!(title_label("   \t"), "TSSH");
}

#[test]
fn subtitle_is_trimmed_build_or_placeholder() {
    assert_eq!(subtitle_label(" 2026-10-18T12:00:00Z\n"), "2026-10-18T12:00:00Z");
    assert_eq!(subtitle_label(""), "build unknown");
    assert_eq!(subtitle_label("  "), "build unknown");
}
