//! Output encoding glue.
//!
//! Transformed buffers leave the engine through this module. PNG keeps the
//! full RGBA channel set; JPEG has no alpha channel, so the buffer is
//! flattened onto a background color first.

mod jpeg;
mod png;

use thiserror::Error;

use crate::buffer::{Color, PixelBuffer};
use crate::options::{ConvertOptions, OutputFormat};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// JPEG quality used when the caller does not specify one.
const DEFAULT_JPEG_QUALITY: f32 = 0.9;

/// Errors that can occur during output encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying codec rejected the image
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a buffer into its output container.
///
/// # Arguments
///
/// * `buf` - The finished RGBA buffer
/// * `options` - Target format, optional quality in `[0, 1]`, and the
///   flatten color used when the format has no alpha channel
///
/// # Returns
///
/// The encoded file bytes, or an error if the buffer is empty or the codec
/// fails.
pub fn encode(buf: &PixelBuffer, options: &ConvertOptions) -> Result<Vec<u8>, EncodeError> {
    match options.format {
        OutputFormat::Png => encode_png(buf),
        OutputFormat::Jpeg => {
            let quality = quality_to_jpeg(options.quality.unwrap_or(DEFAULT_JPEG_QUALITY));
            let background = options.background_color.unwrap_or(Color::WHITE);
            encode_jpeg(buf, quality, background)
        }
    }
}

/// Map a normalized quality in `[0, 1]` to the JPEG encoder's 1-100 scale.
///
/// Out-of-range and non-finite inputs clamp rather than fail.
fn quality_to_jpeg(quality: f32) -> u8 {
    if !quality.is_finite() {
        return quality_to_jpeg(DEFAULT_JPEG_QUALITY);
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}
