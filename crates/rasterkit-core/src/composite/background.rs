//! Padded background canvases: solid, random solid, and linear gradients.

use rand::Rng;

use crate::buffer::{Color, PixelBuffer};
use crate::options::{BackgroundKind, BackgroundOptions, GradientDirection};

/// Surround a buffer with a painted border of `padding` pixels on all sides.
///
/// `padding <= 0` is a passthrough copy, not an error. The fill is a solid
/// color, a uniformly sampled random opaque color, or a two-stop linear
/// gradient whose axis is picked by `direction`.
pub fn add_background<R: Rng>(
    buf: &PixelBuffer,
    options: &BackgroundOptions,
    rng: &mut R,
) -> PixelBuffer {
    if options.padding <= 0 {
        return buf.clone();
    }
    let padding = options.padding as u32;
    let out_w = buf.width + padding * 2;
    let out_h = buf.height + padding * 2;

    let mut out = match options.kind {
        BackgroundKind::Solid => {
            PixelBuffer::filled(out_w, out_h, options.color.unwrap_or(Color::WHITE))
        }
        BackgroundKind::Random => PixelBuffer::filled(out_w, out_h, random_color(rng)),
        BackgroundKind::Gradient => gradient_canvas(
            out_w,
            out_h,
            options.color.unwrap_or(Color::WHITE),
            options.color2.unwrap_or(Color::BLACK),
            options.direction,
        ),
    };

    out.draw_buffer(buf, padding as i64, padding as i64, 1.0);
    out
}

/// Uniformly sampled opaque RGB color.
pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::rgb(rng.random(), rng.random(), rng.random())
}

/// Paint a two-stop linear gradient across a fresh canvas.
fn gradient_canvas(
    width: u32,
    height: u32,
    from: Color,
    to: Color,
    direction: GradientDirection,
) -> PixelBuffer {
    let mut out = PixelBuffer::new(width, height);
    let max_x = (width.saturating_sub(1)).max(1) as f32;
    let max_y = (height.saturating_sub(1)).max(1) as f32;

    for y in 0..height {
        for x in 0..width {
            // Project the pixel onto the gradient axis, t in [0, 1].
            let t = match direction {
                GradientDirection::ToBottom => y as f32 / max_y,
                GradientDirection::ToRight => x as f32 / max_x,
                GradientDirection::ToTopRight => {
                    (x as f32 / max_x + (max_y - y as f32) / max_y) / 2.0
                }
                GradientDirection::ToBottomRight => (x as f32 / max_x + y as f32 / max_y) / 2.0,
            };
            out.set(x, y, lerp_color(from, to, t));
        }
    }

    out
}

#[inline]
fn lerp_color(from: Color, to: Color, t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    [
        mix(from.r, to.r),
        mix(from.g, to.g),
        mix(from.b, to.b),
        mix(from.a, to.a),
    ]
}
