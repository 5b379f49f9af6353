use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ReleaseError::precondition("x")
            .to_string()
            .contains("precondition failed:")
    );
    assert!(ReleaseError::font("x").to_string().contains("font error:"));
    assert!(ReleaseError::fetch("x").to_string().contains("fetch error:"));
    assert!(
        ReleaseError::install("x")
            .to_string()
            .contains("install error:")
    );
}

#[test]
fn too_long_names_the_line() {
    let title = ReleaseError::too_long(TextLine::Title).to_string();
    assert!(title.contains("title text is too long"), "{title}");
    assert!(title.contains("please reduce the text"), "{title}");

    let subtitle = ReleaseError::too_long(TextLine::Subtitle).to_string();
    assert!(subtitle.contains("subtitle text is too long"), "{subtitle}");
    assert!(ReleaseError::too_long(TextLine::Subtitle).is_too_long());
    assert!(!ReleaseError::font("x").is_too_long());
}

#[test]
fn in_stage_prefixes_string_variants_only() {
    let err = ReleaseError::font("parse font: bad magic").in_stage("render: load title font");
    assert_eq!(
        err.to_string(),
        "font error: render: load title font: parse font: bad magic"
    );

    let err = ReleaseError::too_long(TextLine::Title).in_stage("outer");
    assert!(matches!(
        err,
        ReleaseError::TooLong {
            line: TextLine::Title
        }
    ));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ReleaseError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
