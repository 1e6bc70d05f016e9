//! Radial darkening overlays.
//!
//! A centered radial gradient composited source-over: fully transparent
//! inside the inner radius, ramping 0 -> mid -> dark toward the outer
//! radius (half the canvas diagonal).

use crate::buffer::PixelBuffer;

/// Opacity at the gradient midpoint.
const MID_ALPHA: f32 = 0.30;
/// Opacity at the outer radius.
const EDGE_ALPHA: f32 = 0.70;

/// Darken the borders with the tight lomo radius (`min(w, h) / 3`).
pub fn lomo_vignette(buf: &mut PixelBuffer) {
    radial_overlay(buf, 3.0);
}

/// Generic vignette with a wider clear center (`min(w, h) / 2.5`).
pub fn vignette(buf: &mut PixelBuffer) {
    radial_overlay(buf, 2.5);
}

/// Composite a black radial gradient over the buffer.
///
/// `inner_divisor` sets the clear inner radius as `min(w, h) / divisor`;
/// the outer radius is half the canvas diagonal.
pub fn radial_overlay(buf: &mut PixelBuffer, inner_divisor: f32) {
    if buf.width == 0 || buf.height == 0 {
        return;
    }
    let cx = buf.width as f32 / 2.0;
    let cy = buf.height as f32 / 2.0;
    let inner = buf.width.min(buf.height) as f32 / inner_divisor;
    let outer = (cx * cx + cy * cy).sqrt();
    if outer <= inner {
        return;
    }

    for y in 0..buf.height {
        for x in 0..buf.width {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let t = ((dist - inner) / (outer - inner)).clamp(0.0, 1.0);
            let alpha = ramp(t);
            if alpha <= 0.0 {
                continue;
            }
            buf.blend_pixel(x as i64, y as i64, [0, 0, 0, 255], alpha);
        }
    }
}

/// Two-segment opacity ramp: 0 at the inner radius, `MID_ALPHA` halfway,
/// `EDGE_ALPHA` at the outer radius.
#[inline]
fn ramp(t: f32) -> f32 {
    if t <= 0.5 {
        MID_ALPHA * (t * 2.0)
    } else {
        MID_ALPHA + (EDGE_ALPHA - MID_ALPHA) * ((t - 0.5) * 2.0)
    }
}
