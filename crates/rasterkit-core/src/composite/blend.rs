//! Per-channel blend-mode math.
//!
//! The formulas are the W3C compositing-and-blending definitions, applied
//! verbatim: visual output is the contract, so these are exact, not
//! approximations. Channels are normalized to `[0, 1]` for the math and
//! clamped back to bytes afterward.

use serde::{Deserialize, Serialize};

use crate::buffer::{Color, PixelBuffer};

/// Supported separable blend modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source-over: the source replaces the backdrop.
    Normal,
    ColorDodge,
    Overlay,
    SoftLight,
}

/// Blend one normalized channel pair: `b` backdrop, `s` source.
#[inline]
pub fn blend_channel(mode: BlendMode, b: f32, s: f32) -> f32 {
    match mode {
        BlendMode::Normal => s,
        BlendMode::ColorDodge => {
            if s >= 1.0 {
                1.0
            } else {
                (b / (1.0 - s)).min(1.0)
            }
        }
        BlendMode::Overlay => {
            // Overlay is hard-light with operands swapped.
            if b <= 0.5 {
                2.0 * b * s
            } else {
                1.0 - 2.0 * (1.0 - b) * (1.0 - s)
            }
        }
        BlendMode::SoftLight => {
            if s <= 0.5 {
                b - (1.0 - 2.0 * s) * b * (1.0 - b)
            } else {
                let d = if b <= 0.25 {
                    ((16.0 * b - 12.0) * b + 4.0) * b
                } else {
                    b.sqrt()
                };
                b + (2.0 * s - 1.0) * (d - b)
            }
        }
    }
}

/// Composite a flat color over the whole buffer with the given blend mode.
///
/// The color's alpha weights the blended result against the backdrop; the
/// destination alpha plane is left untouched.
pub fn blend_fill(buf: &mut PixelBuffer, color: Color, mode: BlendMode) {
    let alpha = color.a as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let src = [
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
    ];
    for chunk in buf.pixels.chunks_exact_mut(4) {
        for c in 0..3 {
            let b = chunk[c] as f32 / 255.0;
            let blended = blend_channel(mode, b, src[c]);
            let out = b + (blended - b) * alpha;
            chunk[c] = (out.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
    }
}
