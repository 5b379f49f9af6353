use image::RgbaImage;

use crate::{
    foundation::{
        core::{PixelRect, Rgba8},
        error::{ReleaseError, ReleaseResult, TextLine},
    },
    layout::geometry::Geometry,
    render::composite::{blit_premul_over, fill_masked_over, fill_rect_over},
    text::face::FontFace,
};

/// Panel fill before the geometry's opacity is applied.
pub const PANEL_RGB: (u8, u8, u8) = (12, 16, 24);
pub const SEPARATOR_COLOR: Rgba8 = Rgba8::new(255, 255, 255, 140);
pub const TITLE_COLOR: Rgba8 = Rgba8::opaque(241, 243, 246);
pub const SUBTITLE_COLOR: Rgba8 = Rgba8::opaque(210, 214, 222);

const MIN_TEXT_MARGIN: i32 = 24;
const TEXT_MARGIN_RATIO: f64 = 0.15;
const MIN_SEPARATOR_EXTRA: i32 = 10;

/// Draw panel, separator and both text lines onto `canvas`.
///
/// Each line is checked against the safe width before anything of it is drawn; a line
/// that does not fit aborts the overlay with [`ReleaseError::TooLong`].
pub fn draw_overlay(
    canvas: &mut RgbaImage,
    geometry: &Geometry,
    title_face: &FontFace,
    title: &str,
    subtitle_face: &FontFace,
    subtitle: &str,
) -> ReleaseResult<()> {
    draw_panel(canvas, geometry);
    draw_separator(
        canvas,
        geometry,
        geometry.title_advance.max(geometry.subtitle_advance),
    );

    let max_width = max_text_width_for_image(geometry.width)?;

    validate_text_width(TextLine::Title, title_face, title, max_width)?;
    draw_text(
        canvas,
        title_face,
        title,
        geometry.title_x,
        geometry.title_y,
        TITLE_COLOR,
    )?;

    validate_text_width(TextLine::Subtitle, subtitle_face, subtitle, max_width)?;
    draw_text(
        canvas,
        subtitle_face,
        subtitle,
        geometry.subtitle_x,
        geometry.subtitle_y,
        SUBTITLE_COLOR,
    )
}

/// Fill the translucent rounded panel.
pub fn draw_panel(canvas: &mut RgbaImage, geometry: &Geometry) {
    let (r, g, b) = PANEL_RGB;
    let color = Rgba8::new(r, g, b, geometry.box_opacity);
    let rect = PixelRect::new(
        geometry.box_x0,
        geometry.box_y0,
        geometry.box_x1,
        geometry.box_y1,
    );
    if geometry.box_radius <= 0 {
        fill_rect_over(canvas, rect, color);
        return;
    }

    let (w, h) = (rect.width(), rect.height());
    let radius = geometry.clamped_radius();
    fill_masked_over(canvas, rect, color, |x, y| {
        rounded_rect_contains(x, y, w, h, radius)
    });
}

/// Whether pixel `(x, y)` of a `w` x `h` box belongs to the box with corners of `radius`.
///
/// Pixels in the cross-shaped middle are always inside. In a corner square the pixel is
/// inside when its squared distance to the corner circle's center is below `radius²`.
pub fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, radius: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    let r = radius;
    if (x >= r && x < w - r) || (y >= r && y < h - r) {
        return true;
    }

    let dx = if x < r {
        r - 1 - x
    } else if x >= w - r {
        x - (w - r)
    } else {
        0
    };
    let dy = if y < r {
        r - 1 - y
    } else if y >= h - r {
        y - (h - r)
    } else {
        0
    };
    dx * dx + dy * dy < r * r
}

/// Rectangle of the horizontal rule for content `text_width` pixels wide.
///
/// The rule is slightly wider than the widest text line, never wider than the panel's
/// padded content area, and centered in the panel.
pub fn separator_rect(geometry: &Geometry, text_width: i32) -> PixelRect {
    let max_width = geometry.content_width();
    let text_width = text_width.min(max_width);
    let extra = (geometry.padding / 4).max(MIN_SEPARATOR_EXTRA);
    let desired_width = (text_width + extra).min(max_width);

    let start_x = geometry.box_x0 + (geometry.box_width - desired_width) / 2;
    let half = geometry.separator_thickness / 2;
    PixelRect::new(
        start_x,
        geometry.separator_y - half,
        start_x + desired_width,
        geometry.separator_y + half,
    )
}

pub fn draw_separator(canvas: &mut RgbaImage, geometry: &Geometry, text_width: i32) {
    fill_rect_over(canvas, separator_rect(geometry, text_width), SEPARATOR_COLOR);
}

/// Widest text line allowed on an `image_width` pixel canvas.
///
/// The result may be zero or negative for very narrow canvases; validation then rejects
/// every line.
pub fn max_text_width_for_image(image_width: i32) -> ReleaseResult<i32> {
    if image_width <= 0 {
        return Err(ReleaseError::precondition(format!(
            "render: invalid image width {image_width}"
        )));
    }
    let margin = MIN_TEXT_MARGIN.max((f64::from(image_width) * TEXT_MARGIN_RATIO).round() as i32);
    Ok(image_width - 2 * margin)
}

/// Reject `text` when its advance in `face` exceeds `max_width`.
pub fn validate_text_width(
    line: TextLine,
    face: &FontFace,
    text: &str,
    max_width: i32,
) -> ReleaseResult<()> {
    if max_width <= 0 || face.measure(text) > max_width {
        return Err(ReleaseError::too_long(line));
    }
    Ok(())
}

/// Rasterize `text` with its baseline starting at `(x, y)`.
pub fn draw_text(
    canvas: &mut RgbaImage,
    face: &FontFace,
    text: &str,
    x: i32,
    y: i32,
    color: Rgba8,
) -> ReleaseResult<()> {
    let layout = face.shape(text);
    let Some(line) = layout.lines().next() else {
        return Ok(());
    };

    let metrics = face.metrics();
    let ascent = metrics.ascent_px();
    // Room for ink that overhangs the advance box (negative bearings, accents).
    let bleed = ((face.size_px() * 0.25).ceil() as i32).max(2);
    let width = layout.width().ceil() as i32 + 2 * bleed;
    let height = metrics.line_height_px() + 2 * bleed;
    let (Ok(w16), Ok(h16)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(ReleaseError::precondition(format!(
            "render: text surface {width}x{height} exceeds rasterizer limits"
        )));
    };

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((
        f64::from(bleed),
        f64::from(bleed + ascent) - f64::from(line.metrics().baseline),
    )));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    for item in line.items() {
        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
            continue;
        };
        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
            id: g.id,
            x: g.x,
            y: g.y,
        });
        ctx.glyph_run(face.font_data())
            .font_size(run.run().font_size())
            .fill_glyphs(glyphs);
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    blit_premul_over(
        canvas,
        pixmap.data_as_u8_slice(),
        u32::from(w16),
        u32::from(h16),
        x - bleed,
        y - ascent - bleed,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/overlay.rs"]
mod tests;
