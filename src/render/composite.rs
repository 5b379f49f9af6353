use std::ops::DerefMut;

use rayon::prelude::*;

use crate::foundation::{
    core::{PixelRect, PremulRgba8, Rgba8, mul_div255},
    error::{ReleaseError, ReleaseResult},
};

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite `color` over every pixel of `rect` for which `inside(x, y)` holds.
///
/// `x`/`y` passed to `inside` are relative to `rect`'s top-left corner, so the predicate
/// can describe a shape independently of where it lands on the canvas. Rows are blended
/// in parallel; each pixel is written exactly once, so the result does not depend on
/// scheduling.
pub fn fill_masked_over<F>(canvas: &mut image::RgbaImage, rect: PixelRect, color: Rgba8, inside: F)
where
    F: Fn(i32, i32) -> bool + Sync,
{
    let (cw, ch) = canvas.dimensions();
    let clipped = rect.clip_to(cw, ch);
    if clipped.is_empty() || color.a == 0 {
        return;
    }

    let src = color.premultiplied();
    let stride = cw as usize * 4;
    let buf: &mut [u8] = canvas.deref_mut();
    let rows = &mut buf[clipped.y0 as usize * stride..clipped.y1 as usize * stride];

    rows.par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(row_i, row)| {
            let local_y = clipped.y0 + row_i as i32 - rect.y0;
            for x in clipped.x0..clipped.x1 {
                if !inside(x - rect.x0, local_y) {
                    continue;
                }
                let px = &mut row[x as usize * 4..x as usize * 4 + 4];
                let out = over([px[0], px[1], px[2], px[3]], src);
                px.copy_from_slice(&out);
            }
        });
}

/// Composite `color` over the whole of `rect`.
pub fn fill_rect_over(canvas: &mut image::RgbaImage, rect: PixelRect, color: Rgba8) {
    fill_masked_over(canvas, rect, color, |_, _| true);
}

/// Composite a premultiplied `src_w` x `src_h` RGBA8 buffer over the canvas at `(dst_x, dst_y)`.
///
/// Parts of the source falling outside the canvas are skipped.
pub fn blit_premul_over(
    canvas: &mut image::RgbaImage,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    dst_x: i32,
    dst_y: i32,
) -> ReleaseResult<()> {
    let expected = src_w as usize * src_h as usize * 4;
    if src.len() != expected {
        return Err(ReleaseError::precondition(format!(
            "render: blit expects {expected} bytes for {src_w}x{src_h}, got {}",
            src.len()
        )));
    }

    let rect = PixelRect::new(
        dst_x,
        dst_y,
        dst_x + src_w as i32,
        dst_y + src_h as i32,
    );
    let (cw, ch) = canvas.dimensions();
    let clipped = rect.clip_to(cw, ch);
    if clipped.is_empty() {
        return Ok(());
    }

    let stride = cw as usize * 4;
    let src_stride = src_w as usize * 4;
    let buf: &mut [u8] = canvas.deref_mut();
    for y in clipped.y0..clipped.y1 {
        let sy = (y - dst_y) as usize;
        let dst_row = &mut buf[y as usize * stride..(y as usize + 1) * stride];
        let src_row = &src[sy * src_stride..(sy + 1) * src_stride];
        for x in clipped.x0..clipped.x1 {
            let sx = (x - dst_x) as usize * 4;
            let s = [src_row[sx], src_row[sx + 1], src_row[sx + 2], src_row[sx + 3]];
            let d = &mut dst_row[x as usize * 4..x as usize * 4 + 4];
            let out = over([d[0], d[1], d[2], d[3]], s);
            d.copy_from_slice(&out);
        }
    }
    Ok(())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        px[0] = mul_div255(u16::from(px[0]), a);
        px[1] = mul_div255(u16::from(px[1]), a);
        px[2] = mul_div255(u16::from(px[2]), a);
    }
}

/// Convert premultiplied RGBA8 back to straight alpha. Fully transparent pixels become zero.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        match a {
            255 => continue,
            0 => px[..3].fill(0),
            _ => {
                for c in &mut px[..3] {
                    *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
                }
            }
        }
    }
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
