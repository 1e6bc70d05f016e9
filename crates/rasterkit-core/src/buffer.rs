//! Core raster types: RGBA pixel buffer and color.
//!
//! Every engine in this crate operates on [`PixelBuffer`], a row-major RGBA8
//! raster with straight (non-premultiplied) alpha. Buffers are created fresh
//! per operation and owned exclusively by one call at a time.

use serde::{Deserialize, Serialize};

/// An RGBA color with 8-bit channels and straight alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string (leading `#` optional).
    ///
    /// Returns `None` for any other length or non-hex digits.
    pub fn from_hex(input: &str) -> Option<Self> {
        let hex = input.trim().trim_start_matches('#');
        if hex.len() != 6 && hex.len() != 8 {
            return None;
        }
        let (rgb, alpha) = if hex.len() == 6 {
            (hex, "ff")
        } else {
            hex.split_at(6)
        };
        let r = u8::from_str_radix(&rgb[0..2], 16).ok()?;
        let g = u8::from_str_radix(&rgb[2..4], 16).ok()?;
        let b = u8::from_str_radix(&rgb[4..6], 16).ok()?;
        let a = u8::from_str_radix(alpha, 16).ok()?;
        Some(Self { r, g, b, a })
    }

    /// Channel array in RGBA order.
    #[inline]
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// A width x height RGBA8 raster in row-major order.
///
/// Invariant: `pixels.len() == width * height * 4`. Alpha is straight
/// (non-premultiplied).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a fully transparent buffer with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Create a buffer from existing RGBA pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut buf = Self::new(width, height);
        buf.fill(color);
        buf
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read the pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.index(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Write the pixel at `(x, y)`. Coordinates must be in bounds.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        let i = self.index(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    /// Fill the whole buffer with one color.
    pub fn fill(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color.channels());
        }
    }

    /// Composite a single source pixel over `(x, y)` with straight alpha.
    ///
    /// `opacity` multiplies the source alpha before blending (0.0 to 1.0).
    /// Out-of-bounds coordinates are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4], opacity: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let sa = (rgba[3] as f32 / 255.0) * opacity.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.get(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let mut out = [0u8; 4];
        for c in 0..3 {
            let sc = rgba[c] as f32;
            let dc = dst[c] as f32;
            // Straight-alpha source-over.
            let v = (sc * sa + dc * da * (1.0 - sa)) / out_a;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.set(x, y, out);
    }

    /// Composite `src` over this buffer with its top-left corner at `(dx, dy)`.
    ///
    /// Source pixels that land outside this buffer are skipped.
    pub fn draw_buffer(&mut self, src: &PixelBuffer, dx: i64, dy: i64, opacity: f32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let px = src.get(sx, sy);
                self.blend_pixel(dx + sx as i64, dy + sy as i64, px, opacity);
            }
        }
    }

    /// Composite `src` scaled to `dw x dh` with its top-left at `(dx, dy)`.
    ///
    /// Uses bilinear sampling of the source.
    pub fn draw_buffer_scaled(
        &mut self,
        src: &PixelBuffer,
        dx: i64,
        dy: i64,
        dw: u32,
        dh: u32,
        opacity: f32,
    ) {
        if dw == 0 || dh == 0 || src.width == 0 || src.height == 0 {
            return;
        }
        let sx_step = src.width as f32 / dw as f32;
        let sy_step = src.height as f32 / dh as f32;
        for oy in 0..dh {
            for ox in 0..dw {
                let sx = (ox as f32 + 0.5) * sx_step - 0.5;
                let sy = (oy as f32 + 0.5) * sy_step - 0.5;
                let px = src.sample_bilinear(sx, sy);
                self.blend_pixel(dx + ox as i64, dy + oy as i64, px, opacity);
            }
        }
    }

    /// Sample the buffer at a fractional coordinate with bilinear weights.
    ///
    /// Sample points are clamped to the buffer edges.
    pub fn sample_bilinear(&self, x: f32, y: f32) -> [u8; 4] {
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let x = x.clamp(0.0, max_x);
        let y = y.clamp(0.0, max_y);

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);
        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let p00 = self.get(x0, y0);
        let p10 = self.get(x1, y0);
        let p01 = self.get(x0, y1);
        let p11 = self.get(x1, y1);

        let mut out = [0u8; 4];
        for c in 0..4 {
            let v = p00[c] as f32 * (1.0 - fx) * (1.0 - fy)
                + p10[c] as f32 * fx * (1.0 - fy)
                + p01[c] as f32 * (1.0 - fx) * fy
                + p11[c] as f32 * fx * fy;
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Create a PixelBuffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an `image::RgbaImage` for resampling and encoding.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let buf = PixelBuffer::new(4, 3);
        assert_eq!(buf.pixels.len(), 4 * 3 * 4);
        assert!(buf.pixels.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_fill_and_get() {
        let buf = PixelBuffer::filled(2, 2, Color::rgb(10, 20, 30));
        assert_eq!(buf.get(1, 1), [10, 20, 30, 255]);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut buf = PixelBuffer::new(3, 3);
        buf.set(2, 1, [1, 2, 3, 4]);
        assert_eq!(buf.get(2, 1), [1, 2, 3, 4]);
    }

    #[test]
    fn test_hex_color_rgb() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_hex_color_rgba() {
        let c = Color::from_hex("00ff0080").unwrap();
        assert_eq!(c, Color::rgba(0, 255, 0, 128));
    }

    #[test]
    fn test_hex_color_invalid() {
        assert!(Color::from_hex("#fff").is_none());
        assert!(Color::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn test_blend_opaque_over() {
        let mut buf = PixelBuffer::filled(1, 1, Color::BLACK);
        buf.blend_pixel(0, 0, [255, 255, 255, 255], 1.0);
        assert_eq!(buf.get(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blend_half_opacity() {
        let mut buf = PixelBuffer::filled(1, 1, Color::BLACK);
        buf.blend_pixel(0, 0, [255, 255, 255, 255], 0.5);
        let px = buf.get(0, 0);
        assert!((px[0] as i32 - 128).abs() <= 1);
        assert_eq!(px[3], 255, "Opaque backdrop stays opaque");
    }

    #[test]
    fn test_blend_out_of_bounds_ignored() {
        let mut buf = PixelBuffer::filled(2, 2, Color::BLACK);
        let before = buf.clone();
        buf.blend_pixel(-1, 0, [255, 0, 0, 255], 1.0);
        buf.blend_pixel(0, 5, [255, 0, 0, 255], 1.0);
        assert_eq!(buf, before);
    }

    #[test]
    fn test_draw_buffer_offset() {
        let mut dst = PixelBuffer::filled(4, 4, Color::BLACK);
        let src = PixelBuffer::filled(2, 2, Color::rgb(200, 0, 0));
        dst.draw_buffer(&src, 1, 1, 1.0);
        assert_eq!(dst.get(0, 0), [0, 0, 0, 255]);
        assert_eq!(dst.get(1, 1), [200, 0, 0, 255]);
        assert_eq!(dst.get(2, 2), [200, 0, 0, 255]);
        assert_eq!(dst.get(3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_draw_buffer_clips_at_edges() {
        let mut dst = PixelBuffer::filled(2, 2, Color::BLACK);
        let src = PixelBuffer::filled(4, 4, Color::rgb(0, 200, 0));
        dst.draw_buffer(&src, -2, -2, 1.0);
        // Only the overlapping quarter lands.
        assert_eq!(dst.get(0, 0), [0, 200, 0, 255]);
        assert_eq!(dst.get(1, 1), [0, 200, 0, 255]);
    }

    #[test]
    fn test_draw_scaled_dimensions() {
        let mut dst = PixelBuffer::new(8, 8);
        let src = PixelBuffer::filled(2, 2, Color::rgb(9, 9, 9));
        dst.draw_buffer_scaled(&src, 0, 0, 8, 8, 1.0);
        assert_eq!(dst.get(0, 0), [9, 9, 9, 255]);
        assert_eq!(dst.get(7, 7), [9, 9, 9, 255]);
    }

    #[test]
    fn test_bilinear_sample_center() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.set(0, 0, [0, 0, 0, 255]);
        buf.set(1, 0, [100, 100, 100, 255]);
        let px = buf.sample_bilinear(0.5, 0.0);
        assert_eq!(px[0], 50);
    }

    #[test]
    fn test_rgba_image_roundtrip() {
        let buf = PixelBuffer::filled(3, 2, Color::rgba(1, 2, 3, 4));
        let img = buf.to_rgba_image().unwrap();
        let back = PixelBuffer::from_rgba_image(img);
        assert_eq!(back, buf);
    }
}
