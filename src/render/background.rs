use image::{DynamicImage, GenericImageView, RgbaImage, imageops};

use crate::{
    foundation::error::{ReleaseError, ReleaseResult},
    render::composite::premultiply_rgba8_in_place,
};

/// Cover-scale `src` to `width` x `height` and crop the centered window.
///
/// The source is resampled with a Catmull-Rom kernel so that its shorter side exactly
/// fills the target, then trimmed symmetrically along the longer side. The returned
/// canvas holds premultiplied RGBA8.
#[tracing::instrument(skip(src), fields(src_w = src.width(), src_h = src.height()))]
pub fn resize_and_crop(src: &DynamicImage, width: u32, height: u32) -> ReleaseResult<RgbaImage> {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(ReleaseError::precondition("render: background has zero area"));
    }
    if width == 0 || height == 0 {
        return Err(ReleaseError::precondition(format!(
            "render: invalid canvas size {width}x{height}"
        )));
    }

    let (scaled_w, scaled_h) = cover_size(src_w, src_h, width, height);
    tracing::debug!(scaled_w, scaled_h, "scaling background");

    let scaled = imageops::resize(src, scaled_w, scaled_h, imageops::FilterType::CatmullRom);

    let offset_x = (scaled_w - width) / 2;
    let offset_y = (scaled_h - height) / 2;
    let mut cropped = imageops::crop_imm(&scaled, offset_x, offset_y, width, height).to_image();
    premultiply_rgba8_in_place(&mut cropped);
    Ok(cropped)
}

/// Smallest scaled size of a `src_w` x `src_h` image that covers `width` x `height`.
pub fn cover_size(src_w: u32, src_h: u32, width: u32, height: u32) -> (u32, u32) {
    let scale = (f64::from(width) / f64::from(src_w)).max(f64::from(height) / f64::from(src_h));
    let scaled_w = (f64::from(src_w) * scale).ceil() as u32;
    let scaled_h = (f64::from(src_h) * scale).ceil() as u32;
    // Guard against the product rounding just below the target.
    (scaled_w.max(width), scaled_h.max(height))
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
