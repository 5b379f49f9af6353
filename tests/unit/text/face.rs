use super::*;

#[test]
fn embedded_fonts_load_at_overlay_sizes() {
    let (title, subtitle) = load_overlay_faces(2160).unwrap();
    assert!((title.size_px() - 129.6).abs() < 1e-3);
    assert!((subtitle.size_px() - 77.76).abs() < 1e-3);
    assert!(title.family().contains("DejaVu"));

    let m = title.metrics();
    assert!(m.ascent_px() > 0);
    assert!(m.descent_px() > 0);
    assert!(m.line_height_px() <= m.ascent_px() + m.descent_px());
    assert!(m.line_height_px() >= m.ascent_px());
}

#[test]
fn measure_is_monotonic_and_rounded_up() {
    let face = load_face(REGULAR_FONT, 40.0).unwrap();
    assert_eq!(face.measure(""), 0);

    let one = face.measure("W");
    let two = face.measure("WW");
    assert!(one > 0);
    assert!(two > one);
    assert!(face.measure("WWWWWWWWWW") > face.measure("iiiiiiiiii"));
}

#[test]
fn measure_is_deterministic() {
    let face = load_face(BOLD_FONT, 64.0).unwrap();
    let a = face.measure("TSSH release");
    let b = face.measure("TSSH release");
    assert_eq!(a, b);
}

#[test]
fn bold_face_is_wider_than_regular() {
    let bold = load_face(BOLD_FONT, 50.0).unwrap();
    let regular = load_face(REGULAR_FONT, 50.0).unwrap();
    assert!(bold.measure("TSSH WWWW") > regular.measure("TSSH WWWW"));
}

#[test]
fn garbage_bytes_fail_to_parse() {
    let err = load_face(b"definitely not a font", 12.0).unwrap_err();
    assert!(err.to_string().contains("parse font"), "{err}");
}

#[test]
fn non_positive_size_fails_to_construct() {
    for size in [0.0, -3.0, f64::NAN] {
        let err = load_face(REGULAR_FONT, size).unwrap_err();
        assert!(err.to_string().contains("construct font face"), "{err}");
    }
}

#[test]
fn overlay_face_errors_name_the_stage() {
    let err = load_overlay_faces(0).unwrap_err();
    assert!(
        err.to_string().contains("render: load title font"),
        "{err}"
    );
}

#[test]
fn measure_rounds_the_whole_run_once() {
    let face = load_face(REGULAR_FONT, 77.76).unwrap();
    let one = face.measure("i");
    let exact = face.shape("iiii").width();
    assert_eq!(face.measure("iiii"), exact.ceil() as i32);
    assert!(face.measure("iiii") <= 4 * one);
}
