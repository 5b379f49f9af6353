use image::{DynamicImage, RgbaImage};

use crate::{
    foundation::error::{ReleaseError, ReleaseResult},
    layout::geometry::{Geometry, TARGET_HEIGHT, TARGET_WIDTH, compute_layout},
    render::{
        background::resize_and_crop, composite::unpremultiply_rgba8_in_place,
        overlay::draw_overlay,
    },
    source::wallhaven::{BackgroundSource, Transport},
    text::{
        face::load_overlay_faces,
        labels::{subtitle_label, title_label},
    },
};

/// Compose the release wallpaper for `target_name` and `build_id` over `background`.
///
/// Returns a [`TARGET_WIDTH`] x [`TARGET_HEIGHT`] canvas in straight-alpha RGBA8, ready for
/// any `image` encoder. No image is returned when any stage fails.
#[tracing::instrument(skip(background))]
pub fn render(
    background: Option<&DynamicImage>,
    target_name: &str,
    build_id: &str,
) -> ReleaseResult<RgbaImage> {
    let Some(background) = background else {
        return Err(ReleaseError::precondition("render: background is missing"));
    };

    let title = title_label(target_name);
    let subtitle = subtitle_label(build_id);

    let (title_face, subtitle_face) = load_overlay_faces(TARGET_HEIGHT)?;
    let geometry = compute_layout(
        TARGET_WIDTH,
        TARGET_HEIGHT,
        Some(&title_face),
        Some(&subtitle_face),
        &title,
        &subtitle,
    )?;

    let mut canvas = resize_and_crop(background, geometry.width as u32, geometry.height as u32)?;
    draw_overlay(
        &mut canvas,
        &geometry,
        &title_face,
        &title,
        &subtitle_face,
        &subtitle,
    )?;
    unpremultiply_rgba8_in_place(&mut canvas);

    tracing::debug!(%title, %subtitle, "rendered release wallpaper");
    Ok(canvas)
}

/// Geometry `render` would use for these inputs, without touching any pixels.
pub fn preview_layout(target_name: &str, build_id: &str) -> ReleaseResult<Geometry> {
    let (title_face, subtitle_face) = load_overlay_faces(TARGET_HEIGHT)?;
    compute_layout(
        TARGET_WIDTH,
        TARGET_HEIGHT,
        Some(&title_face),
        Some(&subtitle_face),
        &title_label(target_name),
        &subtitle_label(build_id),
    )
}

/// Fetch a background at the target resolution and render the wallpaper onto it.
pub fn generate<T: Transport>(
    source: &BackgroundSource<T>,
    target_name: &str,
    build_id: &str,
) -> ReleaseResult<RgbaImage> {
    let background = source.fetch(TARGET_WIDTH, TARGET_HEIGHT)?;
    render(Some(&background), target_name, build_id)
}
