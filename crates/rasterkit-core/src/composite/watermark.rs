//! Anchored text and image watermark placement.
//!
//! Text glyphs come from the `font8x8` bitmap set, integer-scaled to the
//! requested size, so no font files or system font access are involved.
//! Overlays composite with a straight-alpha opacity multiply.

use font8x8::{UnicodeFonts, BASIC_FONTS};

use crate::buffer::{Color, PixelBuffer};
use crate::options::Anchor;

/// Fixed inset from the chosen edge(s) for corner anchors, in pixels.
pub const ANCHOR_MARGIN: i64 = 20;

/// Base glyph size of the `font8x8` bitmaps.
const GLYPH_SIZE: u32 = 8;

/// Resolve an anchor to the top-left placement of an `ow x oh` overlay on a
/// `w x h` canvas.
pub fn anchor_position(anchor: Anchor, w: u32, h: u32, ow: u32, oh: u32) -> (i64, i64) {
    let (w, h) = (w as i64, h as i64);
    let (ow, oh) = (ow as i64, oh as i64);
    match anchor {
        Anchor::TopLeft => (ANCHOR_MARGIN, ANCHOR_MARGIN),
        Anchor::TopRight => (w - ow - ANCHOR_MARGIN, ANCHOR_MARGIN),
        Anchor::BottomLeft => (ANCHOR_MARGIN, h - oh - ANCHOR_MARGIN),
        Anchor::BottomRight => (w - ow - ANCHOR_MARGIN, h - oh - ANCHOR_MARGIN),
        Anchor::Center => ((w - ow) / 2, (h - oh) / 2),
    }
}

/// Rasterize a line of text into a transparent buffer.
///
/// Glyphs are scaled by the integer factor `max(1, font_size / 8)`.
/// Characters without a bitmap render as blank advances.
pub fn render_text(text: &str, font_size: u32, color: Color) -> PixelBuffer {
    let scale = (font_size / GLYPH_SIZE).max(1);
    let glyph_px = GLYPH_SIZE * scale;
    let chars: Vec<char> = text.chars().collect();
    let width = glyph_px * chars.len() as u32;
    let mut out = PixelBuffer::new(width.max(1), glyph_px);

    for (i, &ch) in chars.iter().enumerate() {
        let Some(glyph) = BASIC_FONTS.get(ch) else {
            continue;
        };
        let origin_x = i as u32 * glyph_px;
        for (row_idx, row) in glyph.iter().enumerate() {
            for bit in 0..GLYPH_SIZE {
                if row & (1 << bit) == 0 {
                    continue;
                }
                for sy in 0..scale {
                    for sx in 0..scale {
                        let x = origin_x + bit * scale + sx;
                        let y = row_idx as u32 * scale + sy;
                        out.set(x, y, color.channels());
                    }
                }
            }
        }
    }

    out
}

/// Stamp a text watermark onto a copy of the buffer.
pub fn watermark_text(
    buf: &PixelBuffer,
    text: &str,
    font_size: u32,
    color: Color,
    opacity: f32,
    anchor: Anchor,
) -> PixelBuffer {
    let stamp = render_text(text, font_size, color);
    let (x, y) = anchor_position(anchor, buf.width, buf.height, stamp.width, stamp.height);
    let mut out = buf.clone();
    out.draw_buffer(&stamp, x, y, opacity);
    out
}

/// Stamp an image watermark onto a copy of the buffer.
///
/// The overlay is scaled so its width equals `scale * min(width, height)`
/// of the target, height proportional, then placed at the anchor.
pub fn watermark_image(
    buf: &PixelBuffer,
    overlay: &PixelBuffer,
    scale: f32,
    opacity: f32,
    anchor: Anchor,
) -> PixelBuffer {
    let mut out = buf.clone();
    if overlay.width == 0 || overlay.height == 0 {
        return out;
    }
    let target_w = (scale.max(0.0) * buf.width.min(buf.height) as f32).round() as u32;
    if target_w == 0 {
        return out;
    }
    let target_h =
        ((target_w as f32 * overlay.height as f32 / overlay.width as f32).round() as u32).max(1);
    let (x, y) = anchor_position(anchor, buf.width, buf.height, target_w, target_h);
    out.draw_buffer_scaled(overlay, x, y, target_w, target_h, opacity);
    out
}
