use std::{borrow::Cow, cell::RefCell};

use crate::foundation::error::{ReleaseError, ReleaseResult};

/// Bold face used for the title line.
pub const BOLD_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");
/// Regular face used for the subtitle line.
pub const REGULAR_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

/// Faces are rasterized at a fixed 72 DPI, so one point maps to one pixel.
pub const FACE_DPI: f64 = 72.0;

const METRICS_PROBE: &str = "H";

pub(crate) type TextBrush = [u8; 4];

/// Vertical line metrics of a face, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceMetrics {
    /// Distance from the baseline to the top of the line box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line box (positive).
    pub descent: f32,
}

impl FaceMetrics {
    /// Ascent rounded up to whole pixels.
    pub fn ascent_px(self) -> i32 {
        self.ascent.ceil() as i32
    }

    /// Descent rounded up to whole pixels.
    pub fn descent_px(self) -> i32 {
        self.descent.ceil() as i32
    }

    /// Height of one line of text, rounded up after summing ascent and descent.
    pub fn line_height_px(self) -> i32 {
        (self.ascent + self.descent).ceil() as i32
    }
}

struct Shaper {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    family: String,
}

impl Shaper {
    fn layout(&mut self, text: &str, size_px: f32) -> parley::Layout<TextBrush> {
        let Self {
            font_ctx,
            layout_ctx,
            family,
        } = self;

        let mut builder = layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// A single font loaded at one pixel size.
///
/// Each face owns its own Parley contexts with exactly one registered font, so
/// measurement never falls back to a different family and two faces never share
/// mutable state.
pub struct FontFace {
    size_px: f32,
    metrics: FaceMetrics,
    font: vello_cpu::peniko::FontData,
    shaper: RefCell<Shaper>,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family", &self.shaper.borrow().family)
            .field("size_px", &self.size_px)
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl FontFace {
    /// Pixel size the face was loaded at.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }

    /// Family name read from the font data.
    pub fn family(&self) -> String {
        self.shaper.borrow().family.clone()
    }

    /// Ascent/descent of the face.
    pub fn metrics(&self) -> FaceMetrics {
        self.metrics
    }

    /// Horizontal advance of `text` in pixels, rounded up.
    ///
    /// The advance is summed in floating point and rounded once, so it can exceed a sum of
    /// per-glyph fixed-point advances by one pixel.
    pub fn measure(&self, text: &str) -> i32 {
        self.shape(text).width().ceil() as i32
    }

    pub(crate) fn shape(&self, text: &str) -> parley::Layout<TextBrush> {
        self.shaper.borrow_mut().layout(text, self.size_px)
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }
}

/// Parse `font_bytes` and build a face at `point_size`.
pub fn load_face(font_bytes: &[u8], point_size: f64) -> ReleaseResult<FontFace> {
    if !point_size.is_finite() || point_size <= 0.0 {
        return Err(ReleaseError::font(format!(
            "construct font face: invalid size {point_size}"
        )));
    }
    let size_px = (point_size * FACE_DPI / 72.0) as f32;

    let mut font_ctx = parley::FontContext::default();
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| ReleaseError::font("parse font: no font families registered"))?;
    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| ReleaseError::font("parse font: registered family has no name"))?
        .to_string();

    let mut shaper = Shaper {
        font_ctx,
        layout_ctx: parley::LayoutContext::new(),
        family,
    };

    let probe = shaper.layout(METRICS_PROBE, size_px);
    let line = probe.lines().next().ok_or_else(|| {
        ReleaseError::font("construct font face: probe text produced no line")
    })?;
    let line_metrics = line.metrics();
    let metrics = FaceMetrics {
        ascent: line_metrics.ascent,
        descent: line_metrics.descent.abs(),
    };
    if !metrics.ascent.is_finite() || metrics.ascent <= 0.0 {
        return Err(ReleaseError::font(format!(
            "construct font face: degenerate ascent {} at {size_px}px",
            metrics.ascent
        )));
    }

    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(font_bytes.to_vec()),
        0,
    );

    Ok(FontFace {
        size_px,
        metrics,
        font,
        shaper: RefCell::new(shaper),
    })
}

/// Load the bold title face and the regular subtitle face for a canvas `height`.
pub fn load_overlay_faces(height: i32) -> ReleaseResult<(FontFace, FontFace)> {
    let title = load_face(BOLD_FONT, f64::from(height) * TITLE_SIZE_RATIO)
        .map_err(|e| e.in_stage("render: load title font"))?;
    let subtitle = load_face(REGULAR_FONT, f64::from(height) * SUBTITLE_SIZE_RATIO)
        .map_err(|e| e.in_stage("render: load subtitle font"))?;
    Ok((title, subtitle))
}

/// Title point size as a fraction of canvas height.
pub const TITLE_SIZE_RATIO: f64 = 0.06;
/// Subtitle point size as a fraction of canvas height.
pub const SUBTITLE_SIZE_RATIO: f64 = 0.036;

#[cfg(test)]
#[path = "../../tests/unit/text/face.rs"]
mod tests;
