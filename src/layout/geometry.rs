use crate::{
    foundation::error::{ReleaseError, ReleaseResult},
    text::face::FontFace,
};

/// Output width of the release wallpaper.
pub const TARGET_WIDTH: i32 = 3840;
/// Output height of the release wallpaper.
pub const TARGET_HEIGHT: i32 = 2160;

const BOX_WIDTH_PERCENT: i32 = 48;
const PADDING_PERCENT: i32 = 5;
const MIN_PADDING: i32 = 14;
const RADIUS_DIVISOR: i32 = 9; // relative to the smaller panel dimension
const MIN_RADIUS: i32 = 10;
const LINE_THICKNESS_DIVISOR: i32 = 160;
const MIN_LINE_THICKNESS: i32 = 2;
/// Panel fill alpha.
pub const BOX_OPACITY: u8 = 200;

/// Every geometric quantity of the overlay for one canvas.
///
/// All coordinates are integer pixels in canvas space; `box_x1`/`box_y1` are exclusive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Geometry {
    pub width: i32,
    pub height: i32,

    pub box_x0: i32,
    pub box_y0: i32,
    pub box_x1: i32,
    pub box_y1: i32,
    pub box_width: i32,
    pub box_height: i32,
    pub box_radius: i32,
    pub box_opacity: u8,
    pub padding: i32,

    pub title_x: i32,
    pub title_y: i32,
    pub subtitle_x: i32,
    pub subtitle_y: i32,

    pub separator_y: i32,
    pub separator_thickness: i32,

    /// Measured advance of the title line.
    pub title_advance: i32,
    /// Measured advance of the subtitle line.
    pub subtitle_advance: i32,

    pub title_font_size: f64,
    pub subtitle_font_size: f64,
}

impl Geometry {
    /// Width available to content inside the panel padding.
    pub fn content_width(&self) -> i32 {
        self.box_width - 2 * self.padding
    }

    /// Corner radius actually rasterized: never more than half the smaller panel side.
    pub fn clamped_radius(&self) -> i32 {
        self.box_radius
            .min(self.box_width / 2)
            .min(self.box_height / 2)
    }
}

/// Padding around the panel content for a `width` x `height` canvas.
pub fn padding_for(width: i32, height: i32) -> i32 {
    MIN_PADDING.max(width.min(height) * PADDING_PERCENT / 100)
}

/// Separator thickness for a canvas of `height` pixels.
pub fn line_thickness_for(height: i32) -> i32 {
    MIN_LINE_THICKNESS.max(height / LINE_THICKNESS_DIVISOR)
}

/// Derive the overlay geometry from canvas size and measured text.
///
/// Non-positive canvas dimensions fall back to the target resolution. Both faces are
/// required; a missing face is reported instead of guessed around.
#[tracing::instrument(skip(title_face, subtitle_face))]
pub fn compute_layout(
    width: i32,
    height: i32,
    title_face: Option<&FontFace>,
    subtitle_face: Option<&FontFace>,
    title: &str,
    subtitle: &str,
) -> ReleaseResult<Geometry> {
    let (width, height) = if width <= 0 || height <= 0 {
        (TARGET_WIDTH, TARGET_HEIGHT)
    } else {
        (width, height)
    };
    let (Some(title_face), Some(subtitle_face)) = (title_face, subtitle_face) else {
        return Err(ReleaseError::precondition("layout: font face is missing"));
    };

    let title_advance = title_face.measure(title);
    let subtitle_advance = subtitle_face.measure(subtitle);
    let title_metrics = title_face.metrics();
    let subtitle_metrics = subtitle_face.metrics();

    let title_height = title_metrics.line_height_px();
    let subtitle_height = subtitle_metrics.line_height_px();

    let padding = padding_for(width, height);
    let content_width = title_advance.max(subtitle_advance);
    let default_box_width = width * BOX_WIDTH_PERCENT / 100;
    let box_width = default_box_width.max(content_width + padding * 2);

    let line_thickness = line_thickness_for(height);
    let gap_after_title = (padding / 3).max(line_thickness);
    let gap_after_separator = padding / 2;

    let box_height = padding
        + title_height
        + gap_after_title
        + line_thickness
        + gap_after_separator
        + subtitle_height
        + padding;
    let box_x0 = (width - box_width) / 2;
    let box_y0 = (height - box_height) / 2;

    let radius = MIN_RADIUS.max(box_width.min(box_height) / RADIUS_DIVISOR);

    let title_x = box_x0 + (box_width - title_advance) / 2;
    let title_y = box_y0 + padding + title_metrics.ascent_px();
    let separator_y = box_y0 + padding + title_height + gap_after_title + line_thickness / 2;
    let subtitle_x = box_x0 + (box_width - subtitle_advance) / 2;
    let subtitle_y =
        separator_y + line_thickness / 2 + gap_after_separator + subtitle_metrics.ascent_px();

    let geometry = Geometry {
        width,
        height,
        box_x0,
        box_y0,
        box_x1: box_x0 + box_width,
        box_y1: box_y0 + box_height,
        box_width,
        box_height,
        box_radius: radius,
        box_opacity: BOX_OPACITY,
        padding,
        title_x,
        title_y,
        subtitle_x,
        subtitle_y,
        separator_y,
        separator_thickness: line_thickness,
        title_advance,
        subtitle_advance,
        title_font_size: f64::from(title_metrics.ascent_px() + title_metrics.descent_px()),
        subtitle_font_size: f64::from(
            subtitle_metrics.ascent_px() + subtitle_metrics.descent_px(),
        ),
    };
    tracing::debug!(
        box_width = geometry.box_width,
        box_height = geometry.box_height,
        radius = geometry.box_radius,
        "computed overlay layout"
    );
    Ok(geometry)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
