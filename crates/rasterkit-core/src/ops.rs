//! Single-image operation dispatch.
//!
//! An orchestrator builds one [`Operation`] per request and hands it to
//! [`apply`] with the decoded buffer. Option validation runs before any
//! pixel work, so a rejected request never produces a half-transformed
//! image. Multi-image splicing has its own entry point, [`apply_splice`],
//! because its input is a slice of buffers rather than one.

use rand::Rng;

use crate::buffer::PixelBuffer;
use crate::composite::background::add_background;
use crate::composite::watermark::{watermark_image, watermark_text};
use crate::encode;
use crate::error::EngineError;
use crate::grade;
use crate::inpaint;
use crate::layout;
use crate::options::{
    BackgroundOptions, ConvertOptions, FilterOptions, MaskOptions, ResizeOptions, SpliceOptions,
    WatermarkKind, WatermarkOptions,
};
use crate::transform;

/// Default glyph height for text watermarks, in pixels.
const DEFAULT_FONT_SIZE: u32 = 24;
/// Default overlay width fraction for image watermarks.
const DEFAULT_WATERMARK_SCALE: f32 = 0.2;

/// One transformation request against a single input image.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Re-encode without pixel changes.
    Convert(ConvertOptions),
    Resize(ResizeOptions),
    WatermarkAdd {
        options: WatermarkOptions,
        /// Decoded overlay image; required when `options.kind` is `Image`.
        overlay: Option<PixelBuffer>,
    },
    WatermarkRemove(MaskOptions),
    Filter(FilterOptions),
    Background(BackgroundOptions),
}

/// A finished buffer plus the conversion settings it should be encoded with.
#[derive(Debug, Clone)]
pub struct OperationResult {
    pub buffer: PixelBuffer,
    pub convert: ConvertOptions,
}

impl OperationResult {
    fn png(buffer: PixelBuffer) -> Self {
        Self {
            buffer,
            convert: ConvertOptions::default(),
        }
    }

    /// Encode the result into its output container.
    pub fn to_bytes(&self) -> Result<Vec<u8>, EngineError> {
        Ok(encode::encode(&self.buffer, &self.convert)?)
    }
}

/// Apply one operation to a buffer.
///
/// `rng` feeds the operations with random elements; pass a seeded
/// `StdRng` for reproducible output.
pub fn apply<R: Rng>(
    buf: &PixelBuffer,
    op: &Operation,
    rng: &mut R,
) -> Result<OperationResult, EngineError> {
    match op {
        Operation::Convert(options) => Ok(OperationResult {
            buffer: buf.clone(),
            convert: options.clone(),
        }),
        Operation::Resize(options) => Ok(OperationResult::png(transform::resize(buf, options))),
        Operation::WatermarkAdd { options, overlay } => {
            options.validate(overlay.is_some())?;
            let opacity = options.opacity.clamp(0.0, 1.0);
            let out = match options.kind {
                WatermarkKind::Text => watermark_text(
                    buf,
                    options.text.as_deref().unwrap_or(""),
                    options.font_size.unwrap_or(DEFAULT_FONT_SIZE),
                    options.color.unwrap_or(crate::buffer::Color::WHITE),
                    opacity,
                    options.anchor,
                ),
                WatermarkKind::Image => {
                    // validate() guarantees the overlay is present.
                    let overlay = overlay.as_ref().ok_or_else(|| {
                        EngineError::invalid("watermark-add", "missing overlay image")
                    })?;
                    watermark_image(
                        buf,
                        overlay,
                        options.scale.unwrap_or(DEFAULT_WATERMARK_SCALE),
                        opacity,
                        options.anchor,
                    )
                }
            };
            Ok(OperationResult::png(out))
        }
        Operation::WatermarkRemove(options) => {
            let expected = options.mask_width as usize * options.mask_height as usize;
            if options.mask.len() != expected {
                return Err(EngineError::invalid(
                    "watermark-remove",
                    format!(
                        "mask length {} does not match {}x{}",
                        options.mask.len(),
                        options.mask_width,
                        options.mask_height
                    ),
                ));
            }
            let mask = inpaint::resample_mask(
                &options.mask,
                options.mask_width,
                options.mask_height,
                buf.width,
                buf.height,
            );
            if !inpaint::mask_has_pixels(&mask) {
                return Err(EngineError::EmptyMask);
            }
            Ok(OperationResult::png(inpaint::diffusion_fill(buf, &mask)))
        }
        Operation::Filter(options) => {
            let out = match options {
                FilterOptions::Preset { preset } => grade::apply_preset(buf, *preset),
                FilterOptions::Manual(adjustments) => grade::apply_manual(buf, adjustments),
            };
            Ok(OperationResult::png(out))
        }
        Operation::Background(options) => {
            options.validate()?;
            Ok(OperationResult::png(add_background(buf, options, rng)))
        }
    }
}

/// Compose several buffers into one canvas.
pub fn apply_splice<R: Rng>(
    images: &[PixelBuffer],
    options: &SpliceOptions,
    rng: &mut R,
) -> Result<OperationResult, EngineError> {
    Ok(OperationResult::png(layout::splice(images, options, rng)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Color;
    use crate::options::{
        Anchor, BackgroundKind, GradientDirection, ManualAdjustments, OutputFormat, ResizeMode,
        SpliceMode,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1)
    }

    fn sample() -> PixelBuffer {
        PixelBuffer::filled(20, 10, Color::rgb(120, 60, 30))
    }

    #[test]
    fn test_convert_keeps_pixels() {
        let buf = sample();
        let op = Operation::Convert(ConvertOptions {
            format: OutputFormat::Jpeg,
            quality: Some(0.8),
            background_color: None,
        });
        let result = apply(&buf, &op, &mut rng()).unwrap();
        assert_eq!(result.buffer, buf);
        assert_eq!(result.convert.format, OutputFormat::Jpeg);

        let bytes = result.to_bytes().unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_resize_operation() {
        let op = Operation::Resize(ResizeOptions {
            mode: ResizeMode::Percentage,
            width: 50.0,
            height: 0.0,
            keep_aspect_ratio: false,
        });
        let result = apply(&sample(), &op, &mut rng()).unwrap();
        assert_eq!((result.buffer.width, result.buffer.height), (10, 5));
    }

    #[test]
    fn test_watermark_text_operation() {
        let op = Operation::WatermarkAdd {
            options: WatermarkOptions {
                kind: WatermarkKind::Text,
                opacity: 1.0,
                anchor: Anchor::Center,
                text: Some("ok".into()),
                font_size: Some(8),
                color: Some(Color::WHITE),
                scale: None,
            },
            overlay: None,
        };
        let buf = PixelBuffer::filled(64, 64, Color::BLACK);
        let result = apply(&buf, &op, &mut rng()).unwrap();
        assert_ne!(result.buffer, buf);
    }

    #[test]
    fn test_watermark_text_rejects_blank() {
        let op = Operation::WatermarkAdd {
            options: WatermarkOptions {
                kind: WatermarkKind::Text,
                opacity: 1.0,
                anchor: Anchor::Center,
                text: Some("  ".into()),
                font_size: None,
                color: None,
                scale: None,
            },
            overlay: None,
        };
        assert!(apply(&sample(), &op, &mut rng()).is_err());
    }

    #[test]
    fn test_watermark_image_requires_overlay() {
        let op = Operation::WatermarkAdd {
            options: WatermarkOptions {
                kind: WatermarkKind::Image,
                opacity: 0.5,
                anchor: Anchor::BottomRight,
                text: None,
                font_size: None,
                color: None,
                scale: Some(0.3),
            },
            overlay: None,
        };
        assert!(matches!(
            apply(&sample(), &op, &mut rng()),
            Err(EngineError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_watermark_remove_empty_mask() {
        let op = Operation::WatermarkRemove(MaskOptions {
            mask: vec![0; 200],
            mask_width: 20,
            mask_height: 10,
        });
        assert!(matches!(
            apply(&sample(), &op, &mut rng()),
            Err(EngineError::EmptyMask)
        ));
    }

    #[test]
    fn test_watermark_remove_mask_length_mismatch() {
        let op = Operation::WatermarkRemove(MaskOptions {
            mask: vec![255; 10],
            mask_width: 20,
            mask_height: 10,
        });
        assert!(matches!(
            apply(&sample(), &op, &mut rng()),
            Err(EngineError::InvalidOptions { .. })
        ));
    }

    #[test]
    fn test_watermark_remove_resamples_and_fills() {
        // Half-resolution mask marking one pixel; the target is uniform so
        // the fill reproduces the surround.
        let mut buf = PixelBuffer::filled(8, 8, Color::rgb(40, 40, 40));
        buf.set(4, 4, [255, 0, 0, 255]);
        buf.set(4, 5, [255, 0, 0, 255]);
        buf.set(5, 4, [255, 0, 0, 255]);
        buf.set(5, 5, [255, 0, 0, 255]);
        let mut mask = vec![0u8; 16];
        mask[2 * 4 + 2] = 255;
        let op = Operation::WatermarkRemove(MaskOptions {
            mask,
            mask_width: 4,
            mask_height: 4,
        });
        let result = apply(&buf, &op, &mut rng()).unwrap();
        assert_eq!(result.buffer.get(4, 4), [40, 40, 40, 255]);
        assert_eq!(result.buffer.get(5, 5), [40, 40, 40, 255]);
    }

    #[test]
    fn test_filter_preset_operation() {
        let op = Operation::Filter(FilterOptions::Preset {
            preset: grade::FilterPreset::Grayscale,
        });
        let buf = PixelBuffer::filled(4, 4, Color::rgb(200, 50, 10));
        let result = apply(&buf, &op, &mut rng()).unwrap();
        let px = result.buffer.get(0, 0);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
    }

    #[test]
    fn test_filter_manual_operation() {
        let op = Operation::Filter(FilterOptions::Manual(ManualAdjustments::default()));
        let buf = sample();
        let result = apply(&buf, &op, &mut rng()).unwrap();
        assert_eq!(result.buffer, buf);
    }

    #[test]
    fn test_background_operation_validates_first() {
        let op = Operation::Background(BackgroundOptions {
            kind: BackgroundKind::Solid,
            padding: 10,
            color: None,
            color2: None,
            direction: GradientDirection::default(),
        });
        assert!(apply(&sample(), &op, &mut rng()).is_err());
    }

    #[test]
    fn test_background_operation_pads() {
        let op = Operation::Background(BackgroundOptions {
            kind: BackgroundKind::Solid,
            padding: 4,
            color: Some(Color::WHITE),
            color2: None,
            direction: GradientDirection::default(),
        });
        let result = apply(&sample(), &op, &mut rng()).unwrap();
        assert_eq!((result.buffer.width, result.buffer.height), (28, 18));
    }

    #[test]
    fn test_apply_splice_entry_point() {
        let images = [sample(), sample()];
        let options = SpliceOptions {
            mode: SpliceMode::Horizontal,
            spacing: 2,
            width: None,
            height: None,
        };
        let result = apply_splice(&images, &options, &mut rng()).unwrap();
        assert_eq!((result.buffer.width, result.buffer.height), (42, 10));
    }

    #[test]
    fn test_default_result_encodes_png() {
        let result = OperationResult::png(sample());
        let bytes = result.to_bytes().unwrap();
        assert_eq!(&bytes[0..4], &[0x89, b'P', b'N', b'G']);
    }
}
