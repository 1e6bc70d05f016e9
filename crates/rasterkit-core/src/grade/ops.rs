//! Composable unary color operators.
//!
//! Each operator follows the CSS filter-function math so that a declarative
//! preset chain renders the same as its stylesheet equivalent. Per-pixel
//! operators work on normalized `f32` triples and clamp once at the end of
//! the chain; blur is the only whole-buffer operator.

use crate::buffer::PixelBuffer;

/// One step in a declarative adjustment chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjust {
    /// Amount in `[0, 1]`.
    Grayscale(f32),
    /// Amount in `[0, 1]`.
    Sepia(f32),
    /// Amount in `[0, 1]`.
    Invert(f32),
    /// Gaussian blur radius in pixels.
    Blur(f32),
    /// Multiplier (1.0 = unchanged).
    Brightness(f32),
    /// Multiplier (1.0 = unchanged).
    Contrast(f32),
    /// Multiplier (1.0 = unchanged).
    Saturate(f32),
    /// Rotation in degrees.
    HueRotate(f32),
}

/// Apply one adjustment chain to a buffer, producing a new buffer.
///
/// Pixel-wise steps run fused in a single pass per blur-free segment;
/// a `Blur` step flushes the segment and blurs the whole buffer.
pub fn apply_chain(buf: &PixelBuffer, chain: &[Adjust]) -> PixelBuffer {
    let mut out = buf.clone();
    let mut segment: Vec<Adjust> = Vec::new();

    for &step in chain {
        if let Adjust::Blur(radius) = step {
            apply_pixel_segment(&mut out, &segment);
            segment.clear();
            out = gaussian_blur(&out, radius);
        } else {
            segment.push(step);
        }
    }
    apply_pixel_segment(&mut out, &segment);

    out
}

fn apply_pixel_segment(buf: &mut PixelBuffer, segment: &[Adjust]) {
    if segment.is_empty() {
        return;
    }
    for chunk in buf.pixels.chunks_exact_mut(4) {
        let mut r = chunk[0] as f32 / 255.0;
        let mut g = chunk[1] as f32 / 255.0;
        let mut b = chunk[2] as f32 / 255.0;

        for &step in segment {
            (r, g, b) = match step {
                Adjust::Grayscale(amount) => apply_grayscale(r, g, b, amount),
                Adjust::Sepia(amount) => apply_sepia(r, g, b, amount),
                Adjust::Invert(amount) => apply_invert(r, g, b, amount),
                Adjust::Brightness(factor) => apply_brightness(r, g, b, factor),
                Adjust::Contrast(factor) => apply_contrast(r, g, b, factor),
                Adjust::Saturate(factor) => apply_saturate(r, g, b, factor),
                Adjust::HueRotate(degrees) => apply_hue_rotate(r, g, b, degrees),
                Adjust::Blur(_) => (r, g, b),
            };
        }

        chunk[0] = (r.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[1] = (g.clamp(0.0, 1.0) * 255.0).round() as u8;
        chunk[2] = (b.clamp(0.0, 1.0) * 255.0).round() as u8;
    }
}

/// Gaussian blur over the whole buffer.
///
/// The radius is the Gaussian standard deviation in pixels, matching the
/// CSS `blur(<length>)` definition.
pub fn gaussian_blur(buf: &PixelBuffer, radius: f32) -> PixelBuffer {
    if radius <= 0.0 || buf.width == 0 || buf.height == 0 {
        return buf.clone();
    }
    match buf.to_rgba_image() {
        Some(img) => PixelBuffer::from_rgba_image(image::imageops::blur(&img, radius)),
        None => buf.clone(),
    }
}

/// Rec. 601-style luminance weights used by the CSS grayscale/saturate
/// matrices.
#[inline]
fn filter_luminance(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

#[inline]
fn apply_grayscale(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    let amount = amount.clamp(0.0, 1.0);
    let gray = filter_luminance(r, g, b);
    (
        r + (gray - r) * amount,
        g + (gray - g) * amount,
        b + (gray - b) * amount,
    )
}

/// The CSS sepia matrix, interpolated toward identity by `1 - amount`.
#[inline]
fn apply_sepia(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    let amount = amount.clamp(0.0, 1.0);
    let sr = 0.393 * r + 0.769 * g + 0.189 * b;
    let sg = 0.349 * r + 0.686 * g + 0.168 * b;
    let sb = 0.272 * r + 0.534 * g + 0.131 * b;
    (
        r + (sr - r) * amount,
        g + (sg - g) * amount,
        b + (sb - b) * amount,
    )
}

#[inline]
fn apply_invert(r: f32, g: f32, b: f32, amount: f32) -> (f32, f32, f32) {
    let amount = amount.clamp(0.0, 1.0);
    (
        r + (1.0 - 2.0 * r) * amount,
        g + (1.0 - 2.0 * g) * amount,
        b + (1.0 - 2.0 * b) * amount,
    )
}

#[inline]
fn apply_brightness(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    let factor = factor.max(0.0);
    (r * factor, g * factor, b * factor)
}

#[inline]
fn apply_contrast(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    let factor = factor.max(0.0);
    (
        (r - 0.5) * factor + 0.5,
        (g - 0.5) * factor + 0.5,
        (b - 0.5) * factor + 0.5,
    )
}

#[inline]
fn apply_saturate(r: f32, g: f32, b: f32, factor: f32) -> (f32, f32, f32) {
    let factor = factor.max(0.0);
    let gray = filter_luminance(r, g, b);
    (
        gray + (r - gray) * factor,
        gray + (g - gray) * factor,
        gray + (b - gray) * factor,
    )
}

/// The W3C hue-rotation matrix.
#[inline]
fn apply_hue_rotate(r: f32, g: f32, b: f32, degrees: f32) -> (f32, f32, f32) {
    let rad = degrees.to_radians();
    let cos = rad.cos();
    let sin = rad.sin();
    (
        (0.213 + cos * 0.787 - sin * 0.213) * r
            + (0.715 - cos * 0.715 - sin * 0.715) * g
            + (0.072 - cos * 0.072 + sin * 0.928) * b,
        (0.213 - cos * 0.213 + sin * 0.143) * r
            + (0.715 + cos * 0.285 + sin * 0.140) * g
            + (0.072 - cos * 0.072 - sin * 0.283) * b,
        (0.213 - cos * 0.213 - sin * 0.787) * r
            + (0.715 - cos * 0.715 + sin * 0.715) * g
            + (0.072 + cos * 0.928 + sin * 0.072) * b,
    )
}
