use super::*;
use crate::text::face::{BOLD_FONT, REGULAR_FONT, load_face};

fn faces_for_height(height: i32) -> (FontFace, FontFace) {
    let title = load_face(BOLD_FONT, f64::from(height) * 0.06).unwrap();
    let subtitle = load_face(REGULAR_FONT, f64::from(height) * 0.036).unwrap();
    (title, subtitle)
}

#[test]
fn standard_resolution_exact_math() {
    let (title_face, subtitle_face) = faces_for_height(TARGET_HEIGHT);
    let title = format!("TSSH {}", "W".repeat(10));
    let subtitle = format!("build {}", "W".repeat(8));

    let l = compute_layout(
        TARGET_WIDTH,
        TARGET_HEIGHT,
        Some(&title_face),
        Some(&subtitle_face),
        &title,
        &subtitle,
    )
    .unwrap();

    let title_advance = title_face.measure(&title);
    let sub_advance = subtitle_face.measure(&subtitle);
    let tm = title_face.metrics();
    let sm = subtitle_face.metrics();

    // 5% of 2160.
    let padding = 108;
    // 2160 / 160 = 13.5, truncated.
    let thickness = 13;
    let box_width = (TARGET_WIDTH * 48 / 100).max(title_advance.max(sub_advance) + 2 * padding);
    let gap_after_title = (padding / 3).max(thickness);
    let gap_after_separator = padding / 2;
    let box_height = padding
        + tm.line_height_px()
        + gap_after_title
        + thickness
        + gap_after_separator
        + sm.line_height_px()
        + padding;
    let box_x0 = (TARGET_WIDTH - box_width) / 2;
    let box_y0 = (TARGET_HEIGHT - box_height) / 2;
    let separator_y = box_y0 + padding + tm.line_height_px() + gap_after_title + thickness / 2;

    assert_eq!((l.width, l.height), (TARGET_WIDTH, TARGET_HEIGHT));
    assert_eq!(l.padding, padding);
    assert_eq!(l.separator_thickness, thickness);
    assert_eq!((l.box_width, l.box_height), (box_width, box_height));
    assert_eq!(
        (l.box_x0, l.box_y0, l.box_x1, l.box_y1),
        (box_x0, box_y0, box_x0 + box_width, box_y0 + box_height)
    );
    assert_eq!(l.box_radius, 10.max(box_width.min(box_height) / 9));
    assert_eq!(l.separator_y, separator_y);
    assert_eq!(
        (l.title_x, l.title_y),
        (
            box_x0 + (box_width - title_advance) / 2,
            box_y0 + padding + tm.ascent_px()
        )
    );
    assert_eq!(
        (l.subtitle_x, l.subtitle_y),
        (
            box_x0 + (box_width - sub_advance) / 2,
            separator_y + thickness / 2 + gap_after_separator + sm.ascent_px()
        )
    );
    assert_eq!(l.box_opacity, 200);
    assert_eq!(l.title_advance, title_advance);
    assert_eq!(l.subtitle_advance, sub_advance);
    assert_eq!(
        l.title_font_size,
        f64::from(tm.ascent_px() + tm.descent_px())
    );
    assert!(l.subtitle_font_size > 0.0);
}

#[test]
fn repeated_calls_are_identical() {
    let (t, s) = faces_for_height(TARGET_HEIGHT);
    let a = compute_layout(3840, 2160, Some(&t), Some(&s), "TSSH lab", "2026-10-18T00:00:00Z")
        .unwrap();
    let b = compute_layout(3840, 2160, Some(&t), Some(&s), "TSSH lab", "2026-10-18T00:00:00Z")
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn non_positive_canvas_falls_back_to_target() {
    let (t, s) = faces_for_height(TARGET_HEIGHT);
    for (w, h) in [(0, 0), (-5, 1080), (1920, 0)] {
        let l = compute_layout(w, h, Some(&t), Some(&s), "TSSH", "b").unwrap();
        assert_eq!((l.width, l.height), (TARGET_WIDTH, TARGET_HEIGHT));
    }
}

#[test]
fn scales_with_resolution_and_stays_inside_canvas() {
    for (w, h) in [(1280, 720), (1920, 1080), (2560, 1440), (3840, 2160)] {
        let (t, s) = faces_for_height(h);
        let title = format!("TSSH {}", "W".repeat(8));
        let l = compute_layout(w, h, Some(&t), Some(&s), &title, "build 42").unwrap();

        assert!(l.box_x0 >= 0 && l.box_y0 >= 0, "{w}x{h}: {l:?}");
        assert!(l.box_x1 <= w && l.box_y1 <= h, "{w}x{h}: {l:?}");
        assert!(l.title_x >= l.box_x0 && l.title_x < l.box_x1);
        assert!(l.subtitle_x >= l.box_x0 && l.subtitle_x < l.box_x1);
        assert!(l.title_y > l.box_y0 && l.title_y < l.separator_y);
        assert!(l.subtitle_y > l.separator_y && l.subtitle_y < l.box_y1);
        assert!(l.separator_thickness >= 2);
        assert!(l.box_radius >= 10);
        assert!(l.clamped_radius() <= l.box_width / 2);
        assert!(l.clamped_radius() <= l.box_height / 2);

        // Horizontally and vertically centered (within the truncation of one pixel).
        assert!((l.box_x0 - (w - l.box_x1)).abs() <= 1);
        assert!((l.box_y0 - (h - l.box_y1)).abs() <= 1);
    }
}

#[test]
fn box_width_tracks_the_wider_text() {
    let (t, s) = faces_for_height(TARGET_HEIGHT);
    let default_width = TARGET_WIDTH * 48 / 100;

    let short = compute_layout(3840, 2160, Some(&t), Some(&s), "TSSH", "b").unwrap();
    assert_eq!(short.box_width, default_width);

    let long_sub = format!("build {}", "W".repeat(30));
    let l = compute_layout(3840, 2160, Some(&t), Some(&s), "TSSH", &long_sub).unwrap();
    let sub_advance = s.measure(&long_sub);
    assert!(sub_advance > t.measure("TSSH"));
    assert_eq!(l.box_width, default_width.max(sub_advance + 2 * l.padding));
    assert!(l.box_width > default_width);

    let long_title = format!("TSSH {}", "W".repeat(16));
    let l = compute_layout(3840, 2160, Some(&t), Some(&s), &long_title, "b").unwrap();
    let title_advance = t.measure(&long_title);
    assert!(title_advance > s.measure("b"));
    assert_eq!(l.box_width, default_width.max(title_advance + 2 * l.padding));
    assert!(l.box_width > default_width);
    assert!(l.content_width() >= title_advance);
}

#[test]
fn missing_faces_are_rejected() {
    let (t, s) = faces_for_height(TARGET_HEIGHT);
    for (title_face, subtitle_face) in [(None, Some(&s)), (Some(&t), None), (None, None)] {
        let err = compute_layout(3840, 2160, title_face, subtitle_face, "a", "b").unwrap_err();
        assert!(err.to_string().contains("font face is missing"), "{err}");
    }
}

#[test]
fn helper_formulas_truncate() {
    assert_eq!(padding_for(3840, 2160), 108);
    assert_eq!(padding_for(100, 100), 14);
    assert_eq!(line_thickness_for(2160), 13);
    assert_eq!(line_thickness_for(100), 2);
}
