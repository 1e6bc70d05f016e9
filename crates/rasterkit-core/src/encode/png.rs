//! PNG encoding for export.
//!
//! PNG keeps the RGBA buffer verbatim; no flattening or quality setting is
//! involved.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::EncodeError;
use crate::buffer::PixelBuffer;

/// Encode a buffer to PNG bytes.
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    if buf.width == 0 || buf.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: buf.width,
            height: buf.height,
        });
    }

    let mut out = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut out);
    encoder
        .write_image(&buf.pixels, buf.width, buf.height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}
