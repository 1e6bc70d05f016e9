//! JPEG encoding for export.
//!
//! JPEG carries no alpha channel, so the RGBA buffer is flattened onto a
//! background color before it reaches the `image` crate's encoder.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::buffer::{Color, PixelBuffer};

/// Encode a buffer to JPEG bytes.
///
/// # Arguments
///
/// * `buf` - The RGBA buffer to encode
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
/// * `background` - Color composited under partially transparent pixels
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(
    buf: &PixelBuffer,
    quality: u8,
    background: Color,
) -> Result<Vec<u8>, EncodeError> {
    if buf.width == 0 || buf.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: buf.width,
            height: buf.height,
        });
    }

    let rgb = flatten_to_rgb(buf, background);
    let quality = quality.clamp(1, 100);

    let mut out = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .write_image(&rgb, buf.width, buf.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// Composite straight-alpha RGBA over an opaque background, dropping alpha.
fn flatten_to_rgb(buf: &PixelBuffer, background: Color) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(buf.pixel_count() as usize * 3);
    let bg = [background.r as f32, background.g as f32, background.b as f32];

    for px in buf.pixels.chunks_exact(4) {
        let a = px[3] as f32 / 255.0;
        for c in 0..3 {
            let v = px[c] as f32 * a + bg[c] * (1.0 - a);
            rgb.push(v.round().clamp(0.0, 255.0) as u8);
        }
    }
    rgb
}
